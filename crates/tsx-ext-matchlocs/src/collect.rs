//! Batch extraction: drain a cursor into a growable buffer and materialize
//! the result as a fixed two-column table.

use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_func::{ColumnDef, ColumnType, RowShape};
use tsx_types::{ArrayValue, MatchLocation, Value, WordEntry};

use crate::config::ExtractorConfig;
use crate::locate::{ExtractionCursor, validate_words};

/// Growable match collector with an explicit capacity schedule.
///
/// Capacity starts at the configured initial value and, whenever the buffer
/// is full, grows by the growth factor (and by at least one slot). Memory is
/// reserved fallibly, so exhaustion surfaces as [`TsError::OutOfMemory`].
#[derive(Debug)]
pub struct MatchBuffer {
    items: Vec<MatchLocation>,
    capacity: usize,
    growth_factor: f64,
    reallocations: usize,
}

impl MatchBuffer {
    /// An empty buffer following `config`'s capacity schedule.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let initial = config.initial_capacity();
        let mut items = Vec::new();
        items
            .try_reserve_exact(initial)
            .map_err(|_| TsError::OutOfMemory { requested: initial })?;
        Ok(Self {
            items,
            capacity: initial,
            growth_factor: config.growth_factor(),
            reallocations: 0,
        })
    }

    /// Append a location, growing the buffer first if it is full.
    pub fn push(&mut self, location: MatchLocation) -> Result<()> {
        if self.items.len() == self.capacity {
            let grown = grown_capacity(self.capacity, self.growth_factor);
            self.items
                .try_reserve_exact(grown - self.items.len())
                .map_err(|_| TsError::OutOfMemory { requested: grown })?;
            self.capacity = grown;
            self.reallocations += 1;
        }
        self.items.push(location);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of times the buffer had to grow.
    #[must_use]
    pub const fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// The collected locations, trimmed to their exact count.
    #[must_use]
    pub fn into_locations(mut self) -> Vec<MatchLocation> {
        self.items.shrink_to_fit();
        self.items
    }
}

/// Capacity after one growth step: `current * factor`, at least `current + 1`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn grown_capacity(current: usize, factor: f64) -> usize {
    // Float-to-int `as` saturates, so huge products clamp to usize::MAX.
    let scaled = (current as f64 * factor) as usize;
    scaled.max(current.saturating_add(1))
}

/// Run an extraction to exhaustion and return every match in order.
///
/// Malformed input fails before any match is collected.
pub fn collect_matches(words: &[WordEntry], config: &ExtractorConfig) -> Result<Vec<MatchLocation>> {
    let policy = config.policy();
    validate_words(words, policy)?;
    let mut buffer = MatchBuffer::new(config)?;
    let mut cursor = ExtractionCursor::new();
    while let Some(found) = cursor.advance(words, policy) {
        buffer.push(found)?;
    }
    debug!(
        words = words.len(),
        matches = buffer.len(),
        capacity = buffer.capacity,
        reallocations = buffer.reallocations(),
        %policy,
        "match buffer drained"
    );
    Ok(buffer.into_locations())
}

/// Fixed-size `(offset, len)` result table in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchTable {
    rows: Vec<MatchLocation>,
}

impl MatchTable {
    #[must_use]
    pub fn new(rows: Vec<MatchLocation>) -> Self {
        Self { rows }
    }

    /// The row shape every consumer of match locations must accept.
    #[must_use]
    pub fn shape() -> RowShape {
        RowShape::new(vec![
            ColumnDef::new("offset", ColumnType::Integer),
            ColumnDef::new("len", ColumnType::Integer),
        ])
    }

    #[must_use]
    pub fn rows(&self) -> &[MatchLocation] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialize as an `n x 2` integer array; an empty table gives `[0, 2]`.
    pub fn to_value(&self) -> Result<Value> {
        let elements = self
            .rows
            .iter()
            .flat_map(|m| [Value::from(m.offset), Value::from(m.len)])
            .collect();
        ArrayValue::two_dim(2, elements)
            .map(Value::Array)
            .ok_or_else(|| TsError::internal("match table is not two columns wide"))
    }
}

impl From<Vec<MatchLocation>> for MatchTable {
    fn from(rows: Vec<MatchLocation>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::ExclusionPolicy;

    fn selected_run(n: usize) -> Vec<WordEntry> {
        (0..n).map(|_| WordEntry::new(2).selected()).collect()
    }

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(6, 1.5), 9);
        assert_eq!(grown_capacity(9, 1.5), 13);
        assert_eq!(grown_capacity(0, 1.5), 1);
        assert_eq!(grown_capacity(1, 1.5), 2);
        assert_eq!(grown_capacity(4, 1.0), 5);
        assert_eq!(grown_capacity(usize::MAX - 1, 2.0), usize::MAX);
    }

    #[test]
    fn test_buffer_grows_on_schedule() {
        let config = ExtractorConfig::default();
        let mut buffer = MatchBuffer::new(&config).unwrap();
        for i in 0..6 {
            buffer.push(MatchLocation::new(i, 1)).unwrap();
        }
        assert_eq!(buffer.reallocations(), 0);
        buffer.push(MatchLocation::new(6, 1)).unwrap();
        assert_eq!(buffer.reallocations(), 1);
        for i in 7..14 {
            buffer.push(MatchLocation::new(i, 1)).unwrap();
        }
        // 6 -> 9 -> 13 -> 19
        assert_eq!(buffer.reallocations(), 3);
        let out = buffer.into_locations();
        assert_eq!(out.len(), 14);
        assert!(out.iter().enumerate().all(|(i, m)| m.offset == i32::try_from(i).unwrap()));
    }

    #[test]
    fn test_unreservable_capacity_is_out_of_memory() {
        let config = ExtractorConfig::default().with_initial_capacity(usize::MAX);
        let err = MatchBuffer::new(&config).unwrap_err();
        assert!(matches!(err, TsError::OutOfMemory { requested: usize::MAX }));
        assert_eq!(err.error_code().sqlstate(), "53200");

        let err = collect_matches(&selected_run(2), &config).unwrap_err();
        assert!(matches!(err, TsError::OutOfMemory { .. }));
    }

    #[test]
    fn test_collect_matches_order_and_offsets() {
        let config = ExtractorConfig::default();
        let out = collect_matches(&selected_run(20), &config).unwrap();
        assert_eq!(out.len(), 20);
        assert_eq!(out[0], MatchLocation::new(0, 2));
        assert_eq!(out[19], MatchLocation::new(38, 2));
    }

    #[test]
    fn test_collect_matches_zero_initial_capacity() {
        let config = ExtractorConfig::default().with_initial_capacity(0);
        let out = collect_matches(&selected_run(3), &config).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_collect_matches_malformed_has_no_partial_result() {
        let mut words = selected_run(4);
        words.push(WordEntry::new(-2));
        let err = collect_matches(&words, &ExtractorConfig::default()).unwrap_err();
        assert!(matches!(err, TsError::MalformedWord { index: 4, .. }));
    }

    #[test]
    fn test_collect_matches_respects_policy() {
        let words = vec![
            WordEntry::new(2).skipped(),
            WordEntry::new(3).selected(),
        ];
        let legacy = ExtractorConfig::default().with_policy(ExclusionPolicy::AdvanceThroughSkip);
        assert_eq!(
            collect_matches(&words, &legacy).unwrap(),
            vec![MatchLocation::new(2, 3)]
        );
        assert_eq!(
            collect_matches(&words, &ExtractorConfig::default()).unwrap(),
            vec![MatchLocation::new(0, 3)]
        );
    }

    #[test]
    fn test_table_to_value() {
        let table = MatchTable::from(vec![MatchLocation::new(5, 3), MatchLocation::new(12, 6)]);
        let value = table.to_value().unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.dims(), &[2, 2]);
        assert_eq!(array.to_string(), "{{5,3},{12,6}}");
    }

    #[test]
    fn test_empty_table_to_value() {
        let value = MatchTable::default().to_value().unwrap();
        assert_eq!(value.as_array().unwrap().dims(), &[0, 2]);
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(MatchTable::shape().to_string(), "(offset integer, len integer)");
    }
}
