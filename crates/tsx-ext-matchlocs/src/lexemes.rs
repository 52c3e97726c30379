use tsx_types::TsVector;

/// The distinct lexemes of `vector`, in its storage order.
#[must_use]
pub fn lexemes(vector: &TsVector) -> Vec<String> {
    vector.iter().map(|entry| entry.lexeme.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexemes_in_storage_order() {
        let vector = TsVector::from_occurrences([("rat", 3), ("fat", 1), ("cat", 2), ("fat", 4)]);
        assert_eq!(lexemes(&vector), vec!["cat", "fat", "rat"]);
    }

    #[test]
    fn test_lexemes_empty() {
        assert!(lexemes(&TsVector::new()).is_empty());
    }
}
