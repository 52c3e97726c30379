//! Match locations: where in a document did the query match?
//!
//! Given a document and an already-parsed query, the headline annotator
//! produces one [`WordEntry`](tsx_types::WordEntry) per document unit. This
//! crate walks that sequence and turns it into `(offset, len)` pairs in
//! document characters, either one at a time ([`MatchStream`]) or all at
//! once ([`collect_matches`], [`MatchTable`]).
//!
//! Functions exposed to the host:
//!
//! - `ts_match_locs([config,] document, query)`: rows `(offset, len)`.
//! - `ts_match_locs_array([config,] document, query)`: `int[n][2]`.
//! - `tsvector_lexemes(tsvector)`: `text[]`.

use std::sync::Arc;

use tracing::info;
use tsx_func::FunctionRegistry;
use tsx_headline::TextSearchCatalog;

pub mod collect;
pub mod config;
pub mod functions;
pub mod lexemes;
pub mod locate;
pub mod locator;

pub use collect::{MatchBuffer, MatchTable, collect_matches};
pub use config::{DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CAPACITY, ExtractorConfig};
pub use functions::{
    TS_MATCH_LOCS, TS_MATCH_LOCS_ARRAY, TSVECTOR_LEXEMES, TsMatchLocsArrayFunc, TsMatchLocsFunc,
    TsvectorLexemesFunc,
};
pub use lexemes::lexemes;
pub use locate::{ExclusionPolicy, ExtractionCursor, MatchStream, validate_words};
pub use locator::MatchLocator;

#[must_use]
pub const fn extension_name() -> &'static str {
    "matchlocs"
}

/// Register every function of this extension with the default extraction
/// options.
pub fn register_matchlocs_functions(
    registry: &mut FunctionRegistry,
    catalog: Arc<TextSearchCatalog>,
) {
    register_matchlocs_functions_with(registry, MatchLocator::new(catalog));
}

/// Register every function of this extension around `locator`.
pub fn register_matchlocs_functions_with(registry: &mut FunctionRegistry, locator: MatchLocator) {
    info!(
        policy = %locator.extractor_config().policy(),
        "matchlocs extension: registering functions"
    );
    for with_config in [false, true] {
        registry.register_table(TsMatchLocsFunc::new(locator.clone(), with_config));
        registry.register_scalar(TsMatchLocsArrayFunc::new(locator.clone(), with_config));
    }
    registry.register_scalar(TsvectorLexemesFunc);
}

#[cfg(test)]
mod tests {
    use tsx_types::{TsQuery, Value};

    use super::*;

    #[test]
    fn test_extension_name_matches_crate_suffix() {
        let expected = env!("CARGO_PKG_NAME")
            .strip_prefix("tsx-ext-")
            .expect("extension crates should use tsx-ext-* naming");
        assert_eq!(extension_name(), expected);
    }

    #[test]
    fn test_register_all_functions() {
        let mut registry = FunctionRegistry::new();
        register_matchlocs_functions(&mut registry, Arc::new(TextSearchCatalog::with_builtin()));

        assert!(registry.contains_table(TS_MATCH_LOCS));
        assert!(registry.contains_scalar(TS_MATCH_LOCS_ARRAY));
        assert!(registry.contains_scalar(TSVECTOR_LEXEMES));
        for arity in [2, 3] {
            assert!(registry.find_table(TS_MATCH_LOCS, arity).is_some());
            assert!(registry.find_scalar(TS_MATCH_LOCS_ARRAY, arity).is_some());
        }
        assert!(registry.find_table(TS_MATCH_LOCS, 4).is_none());
    }

    #[test]
    fn test_registered_functions_callable() {
        let mut registry = FunctionRegistry::new();
        register_matchlocs_functions(&mut registry, Arc::new(TextSearchCatalog::with_builtin()));

        let args = [Value::from("one two one"), Value::from(TsQuery::term("one"))];
        let array = registry.call_scalar("TS_MATCH_LOCS_ARRAY", &args).unwrap();
        assert_eq!(array.to_string(), "{{0,3},{8,3}}");

        let rows = registry
            .scan_table("ts_match_locs", &args, None)
            .unwrap()
            .collect_rows()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Value::Integer(0), Value::Integer(3)],
                vec![Value::Integer(8), Value::Integer(3)],
            ]
        );
    }
}
