//! SQL-callable surface: `ts_match_locs`, `ts_match_locs_array` and
//! `tsvector_lexemes`.
//!
//! Both match functions come in a 2-argument form `(document, query)` that
//! uses the current default configuration and a 3-argument form
//! `(config, document, query)`. The configuration may be given as a
//! `regconfig`, a name or a numeric id. All functions are strict: a NULL
//! argument is an error.
#![allow(clippy::unnecessary_literal_bound)]

use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_func::{
    ColumnContext, RowShape, ScalarFunction, TableFunction, TableFunctionCursor, check_arg_count,
    check_not_null,
};
use tsx_headline::ConfigRef;
use tsx_types::{ArrayValue, MatchLocation, TsQuery, Value};

use crate::collect::MatchTable;
use crate::lexemes::lexemes;
use crate::locate::MatchStream;
use crate::locator::MatchLocator;

pub const TS_MATCH_LOCS: &str = "ts_match_locs";
pub const TS_MATCH_LOCS_ARRAY: &str = "ts_match_locs_array";
pub const TSVECTOR_LEXEMES: &str = "tsvector_lexemes";

/// Arguments of a match-location call, after type checking.
struct MatchArgs<'a> {
    config: Option<ConfigRef>,
    document: &'a str,
    query: &'a TsQuery,
}

fn match_args<'a>(name: &str, args: &'a [Value], with_config: bool) -> Result<MatchArgs<'a>> {
    check_arg_count(name, args, if with_config { 3 } else { 2 })?;
    check_not_null(name, args)?;
    let (config, rest) = if with_config {
        (Some(ConfigRef::from_value(&args[0])?), &args[1..])
    } else {
        (None, args)
    };
    let document = rest[0]
        .as_text()
        .ok_or_else(|| TsError::type_mismatch("text", rest[0].type_name()))?;
    let query = rest[1]
        .as_query()
        .ok_or_else(|| TsError::type_mismatch("tsquery", rest[1].type_name()))?;
    Ok(MatchArgs {
        config,
        document,
        query,
    })
}

const fn arity(with_config: bool) -> i32 {
    if with_config { 3 } else { 2 }
}

// ---------------------------------------------------------------------------
// ts_match_locs: one row per match
// ---------------------------------------------------------------------------

/// Streaming `ts_match_locs`, returning rows `(offset integer, len integer)`.
pub struct TsMatchLocsFunc {
    locator: MatchLocator,
    with_config: bool,
}

impl TsMatchLocsFunc {
    #[must_use]
    pub fn new(locator: MatchLocator, with_config: bool) -> Self {
        Self {
            locator,
            with_config,
        }
    }
}

impl TableFunction for TsMatchLocsFunc {
    fn name(&self) -> &str {
        TS_MATCH_LOCS
    }

    fn num_args(&self) -> i32 {
        arity(self.with_config)
    }

    fn result_shape(&self) -> RowShape {
        MatchTable::shape()
    }

    fn open(&self) -> Result<Box<dyn TableFunctionCursor>> {
        Ok(Box::new(TsMatchLocsCursor {
            locator: self.locator.clone(),
            with_config: self.with_config,
            stream: None,
            current: None,
            ordinal: 0,
        }))
    }
}

/// Cursor over one `ts_match_locs` call. Holds the call's stream between
/// rows and drops it once the last match has been read.
pub struct TsMatchLocsCursor {
    locator: MatchLocator,
    with_config: bool,
    stream: Option<MatchStream>,
    current: Option<MatchLocation>,
    ordinal: i64,
}

impl TsMatchLocsCursor {
    fn pull(&mut self) {
        self.current = self.stream.as_mut().and_then(MatchStream::next_match);
        if self.current.is_some() {
            self.ordinal += 1;
        } else {
            self.stream = None;
        }
    }
}

impl TableFunctionCursor for TsMatchLocsCursor {
    fn filter(&mut self, args: &[Value]) -> Result<()> {
        let call = match_args(TS_MATCH_LOCS, args, self.with_config)?;
        let stream = self
            .locator
            .stream(call.document, call.query, call.config.as_ref())?;
        self.stream = Some(stream);
        self.ordinal = 0;
        self.pull();
        debug!(first = ?self.current, "ts_match_locs: cursor positioned");
        Ok(())
    }

    fn next(&mut self) -> Result<()> {
        if self.current.is_some() {
            self.pull();
        }
        Ok(())
    }

    fn eof(&self) -> bool {
        self.current.is_none()
    }

    fn column(&self, ctx: &mut ColumnContext, col: i32) -> Result<()> {
        let val = match (self.current, col) {
            (Some(m), 0) => Value::from(m.offset),
            (Some(m), 1) => Value::from(m.len),
            _ => Value::Null,
        };
        ctx.set_value(val);
        Ok(())
    }

    fn rowid(&self) -> Result<i64> {
        Ok(self.ordinal)
    }
}

// ---------------------------------------------------------------------------
// ts_match_locs_array: all matches as int[n][2]
// ---------------------------------------------------------------------------

/// Batch `ts_match_locs_array`, returning a two-dimensional integer array.
pub struct TsMatchLocsArrayFunc {
    locator: MatchLocator,
    with_config: bool,
}

impl TsMatchLocsArrayFunc {
    #[must_use]
    pub fn new(locator: MatchLocator, with_config: bool) -> Self {
        Self {
            locator,
            with_config,
        }
    }
}

impl ScalarFunction for TsMatchLocsArrayFunc {
    fn invoke(&self, args: &[Value]) -> Result<Value> {
        let call = match_args(TS_MATCH_LOCS_ARRAY, args, self.with_config)?;
        self.locator
            .locate(call.document, call.query, call.config.as_ref())?
            .to_value()
    }

    fn num_args(&self) -> i32 {
        arity(self.with_config)
    }

    fn name(&self) -> &str {
        TS_MATCH_LOCS_ARRAY
    }
}

// ---------------------------------------------------------------------------
// tsvector_lexemes
// ---------------------------------------------------------------------------

/// `tsvector_lexemes(tsvector) -> text[]`.
pub struct TsvectorLexemesFunc;

impl ScalarFunction for TsvectorLexemesFunc {
    fn invoke(&self, args: &[Value]) -> Result<Value> {
        check_arg_count(TSVECTOR_LEXEMES, args, 1)?;
        check_not_null(TSVECTOR_LEXEMES, args)?;
        let vector = args[0]
            .as_vector()
            .ok_or_else(|| TsError::type_mismatch("tsvector", args[0].type_name()))?;
        let elements = lexemes(vector).into_iter().map(Value::Text).collect();
        Ok(Value::Array(ArrayValue::one_dim(elements)))
    }

    fn num_args(&self) -> i32 {
        1
    }

    fn name(&self) -> &str {
        TSVECTOR_LEXEMES
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsx_func::TableScan;
    use tsx_headline::TextSearchCatalog;
    use tsx_types::TsVector;

    use super::*;

    fn locator() -> MatchLocator {
        MatchLocator::new(Arc::new(TextSearchCatalog::with_builtin()))
    }

    fn rows(scan: TableScan) -> Vec<(i64, i64)> {
        scan.collect_rows()
            .unwrap()
            .into_iter()
            .map(|row| (row[0].as_integer().unwrap(), row[1].as_integer().unwrap()))
            .collect()
    }

    #[test]
    fn test_ts_match_locs_rows() {
        let func = TsMatchLocsFunc::new(locator(), false);
        let args = [Value::from("fat cats and a fat rat"), Value::from(TsQuery::term("fat"))];
        let scan = TableScan::start(&func, &args, Some(&MatchTable::shape())).unwrap();
        assert_eq!(rows(scan), vec![(0, 3), (15, 3)]);
    }

    #[test]
    fn test_ts_match_locs_cursor_protocol() {
        let func = TsMatchLocsFunc::new(locator(), true);
        let mut cursor = func.open().unwrap();
        cursor
            .filter(&[
                Value::from("simple"),
                Value::from("a b a"),
                Value::from(TsQuery::term("a")),
            ])
            .unwrap();
        let mut seen = Vec::new();
        while !cursor.eof() {
            let mut ctx = ColumnContext::new();
            cursor.column(&mut ctx, 0).unwrap();
            seen.push((cursor.rowid().unwrap(), ctx.take_value().unwrap()));
            cursor.next().unwrap();
        }
        assert_eq!(seen, vec![(1, Value::Integer(0)), (2, Value::Integer(4))]);
        cursor.next().unwrap();
        assert!(cursor.eof());
    }

    #[test]
    fn test_ts_match_locs_rejects_wrong_shape_before_work() {
        let func = TsMatchLocsFunc::new(locator(), false);
        let expected = RowShape::new(vec![tsx_func::ColumnDef::new(
            "headline",
            tsx_func::ColumnType::Text,
        )]);
        // Arguments are invalid too; the shape check must win.
        let err = TableScan::start(&func, &[], Some(&expected)).err().unwrap();
        assert!(matches!(err, TsError::ResultShapeMismatch { .. }));
    }

    #[test]
    fn test_ts_match_locs_argument_errors() {
        let func = TsMatchLocsFunc::new(locator(), false);
        let null_err = TableScan::start(&func, &[Value::Null, Value::from(TsQuery::term("a"))], None)
            .err()
            .unwrap();
        assert!(matches!(null_err, TsError::NullArgument { .. }));

        let type_err = TableScan::start(&func, &[Value::from("a"), Value::from("a")], None)
            .err()
            .unwrap();
        assert!(matches!(type_err, TsError::TypeMismatch { .. }));

        let count_err = TableScan::start(&func, &[Value::from("a")], None).err().unwrap();
        assert!(matches!(count_err, TsError::WrongArgumentCount { .. }));
    }

    #[test]
    fn test_ts_match_locs_array() {
        let func = TsMatchLocsArrayFunc::new(locator(), true);
        let value = func
            .invoke(&[
                Value::Integer(1),
                Value::from("fat cats and a fat rat"),
                Value::from(TsQuery::term("fat")),
            ])
            .unwrap();
        assert_eq!(value.to_string(), "{{0,3},{15,3}}");
    }

    #[test]
    fn test_ts_match_locs_array_empty() {
        let func = TsMatchLocsArrayFunc::new(locator(), false);
        let value = func
            .invoke(&[Value::from("nothing here"), Value::from(TsQuery::term("fat"))])
            .unwrap();
        assert_eq!(value.as_array().unwrap().dims(), &[0, 2]);
    }

    #[test]
    fn test_ts_match_locs_array_unknown_config() {
        let func = TsMatchLocsArrayFunc::new(locator(), true);
        let err = func
            .invoke(&[
                Value::from("klingon"),
                Value::from("x"),
                Value::from(TsQuery::term("x")),
            ])
            .unwrap_err();
        assert!(matches!(err, TsError::UnknownConfiguration { .. }));
    }

    #[test]
    fn test_tsvector_lexemes() {
        let vector = TsVector::from_lexemes(["rat", "cat", "fat"]);
        let value = TsvectorLexemesFunc.invoke(&[Value::from(vector)]).unwrap();
        assert_eq!(value.to_string(), "{cat,fat,rat}");
        assert!(matches!(
            TsvectorLexemesFunc.invoke(&[Value::from("cat")]).unwrap_err(),
            TsError::TypeMismatch { .. }
        ));
    }
}
