//! Set-returning (table) function and cursor traits.
//!
//! A table function produces rows one at a time through a cursor that
//! follows the filter/eof/column/next protocol. Control returns to the
//! caller between rows; the cursor keeps whatever state it needs to resume
//! and is dropped when the scan is complete or abandoned.
//!
//! These traits are **open** (user-implementable).

use std::fmt;

use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_types::Value;

// ---------------------------------------------------------------------------
// Row shape
// ---------------------------------------------------------------------------

/// Declared type of a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "text",
        }
    }
}

/// A named, typed result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The record shape of a table function's rows (a tuple descriptor).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowShape {
    columns: Vec<ColumnDef>,
}

impl RowShape {
    #[must_use]
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fail unless `expected` has the same column count and types.
    ///
    /// Column names are not compared; callers may alias them freely.
    pub fn check_compatible(&self, expected: &Self) -> Result<()> {
        let same = self.columns.len() == expected.columns.len()
            && self
                .columns
                .iter()
                .zip(&expected.columns)
                .all(|(a, b)| a.ty == b.ty);
        if same {
            Ok(())
        } else {
            Err(TsError::ResultShapeMismatch {
                expected: expected.to_string(),
                actual: self.to_string(),
            })
        }
    }
}

impl fmt::Display for RowShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", col.name, col.ty.sql_name())?;
        }
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// Column context
// ---------------------------------------------------------------------------

/// A context object passed to [`TableFunctionCursor::column`] for writing
/// the column value.
#[derive(Debug, Default)]
pub struct ColumnContext {
    value: Option<Value>,
}

impl ColumnContext {
    #[must_use]
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Set the value for this column.
    pub fn set_value(&mut self, val: Value) {
        self.value = Some(val);
    }

    /// Take the value out of this context, leaving `None`.
    pub fn take_value(&mut self) -> Option<Value> {
        self.value.take()
    }
}

// ---------------------------------------------------------------------------
// TableFunction / TableFunctionCursor
// ---------------------------------------------------------------------------

/// A set-returning function.
#[allow(clippy::missing_errors_doc)]
pub trait TableFunction: Send + Sync {
    /// The function name, used for registration and error messages.
    fn name(&self) -> &str;

    /// The number of arguments this function accepts (`-1` = variadic).
    fn num_args(&self) -> i32;

    /// Shape of every row this function produces.
    fn result_shape(&self) -> RowShape;

    /// Open a fresh cursor. Each call is an independent scan.
    fn open(&self) -> Result<Box<dyn TableFunctionCursor>>;
}

/// A cursor over a table function's rows.
///
/// Cursors are `Send` but not `Sync`: single-threaded scan objects bound to
/// one invocation.
///
/// # Lifecycle
///
/// 1. [`filter`](Self::filter) begins a scan and positions on the first row.
/// 2. Iterate: check [`eof`](Self::eof), read [`column`](Self::column), advance with [`next`](Self::next).
/// 3. The cursor is dropped when the scan is complete.
#[allow(clippy::missing_errors_doc)]
pub trait TableFunctionCursor: Send {
    /// Begin a scan with the call's arguments.
    fn filter(&mut self, args: &[Value]) -> Result<()>;

    /// Advance to the next row. A no-op once [`eof`](Self::eof) is true.
    fn next(&mut self) -> Result<()>;

    /// Whether the cursor has moved past the last row.
    fn eof(&self) -> bool;

    /// Write the value of column `col` into `ctx`.
    fn column(&self, ctx: &mut ColumnContext, col: i32) -> Result<()>;

    /// 1-based ordinal of the current row.
    fn rowid(&self) -> Result<i64>;
}

// ---------------------------------------------------------------------------
// TableScan
// ---------------------------------------------------------------------------

/// Drives a table function one row per call, the way a host executor would.
pub struct TableScan {
    cursor: Box<dyn TableFunctionCursor>,
    width: usize,
    pending_advance: bool,
    finished: bool,
}

impl TableScan {
    /// Validate the caller's expected shape, open a cursor and filter it.
    ///
    /// The shape check happens before any row is produced.
    pub fn start(
        function: &dyn TableFunction,
        args: &[Value],
        expected: Option<&RowShape>,
    ) -> Result<Self> {
        let declared = function.result_shape();
        if let Some(expected) = expected {
            declared.check_compatible(expected)?;
        }
        let mut cursor = function.open()?;
        cursor.filter(args)?;
        debug!(function = function.name(), args = args.len(), "table scan started");
        Ok(Self {
            cursor,
            width: declared.len(),
            pending_advance: false,
            finished: false,
        })
    }

    /// Produce the next row, or `None` once the cursor is exhausted.
    pub fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        if self.finished {
            return Ok(None);
        }
        if self.pending_advance {
            self.cursor.next()?;
        }
        if self.cursor.eof() {
            self.finished = true;
            return Ok(None);
        }
        let mut row = Vec::with_capacity(self.width);
        let mut ctx = ColumnContext::new();
        for col in 0..self.width {
            let col = i32::try_from(col).map_err(|_| TsError::internal("too many columns"))?;
            self.cursor.column(&mut ctx, col)?;
            row.push(ctx.take_value().unwrap_or(Value::Null));
        }
        self.pending_advance = true;
        Ok(Some(row))
    }

    /// Drain every remaining row.
    pub fn collect_rows(mut self) -> Result<Vec<Vec<Value>>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }
}

impl Iterator for TableScan {
    type Item = Result<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_row() {
            Ok(row) => row.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
