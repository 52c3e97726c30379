//! SQL-callable function surfaces.
//!
//! This crate defines open, user-implementable traits for:
//! - scalar functions ([`ScalarFunction`])
//! - set-returning functions and their cursors ([`TableFunction`],
//!   [`TableFunctionCursor`])
//!
//! It also provides a small in-memory [`FunctionRegistry`] for registering and
//! resolving functions by `(name, num_args)` key with variadic fallback.
#![allow(clippy::unnecessary_literal_bound)]

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use tsx_error::{Result, TsError};
use tsx_types::Value;

pub mod scalar;
pub mod table;

pub use scalar::{ScalarFunction, check_arg_count, check_not_null};
pub use table::{
    ColumnContext, ColumnDef, ColumnType, RowShape, TableFunction, TableFunctionCursor, TableScan,
};

/// Composite lookup key for functions: `(lowercase name, num_args)`.
///
/// `-1` for `num_args` means variadic (any number of arguments).
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct FunctionKey {
    /// Function name, stored as lowercase ASCII.
    pub name: String,
    /// Expected argument count, or `-1` for variadic.
    pub num_args: i32,
}

impl FunctionKey {
    /// Create a new function key with the name canonicalized to lowercase.
    #[must_use]
    pub fn new(name: &str, num_args: i32) -> Self {
        Self {
            name: canonical_name(name),
            num_args,
        }
    }
}

/// Registry for scalar and table functions, keyed by `(name, num_args)`.
///
/// Lookup strategy:
/// 1. Exact match on `(lowercase_name, num_args)`.
/// 2. Fallback to variadic version `(lowercase_name, -1)`.
/// 3. `None` if neither found.
#[derive(Default)]
pub struct FunctionRegistry {
    scalars: HashMap<FunctionKey, Arc<dyn ScalarFunction>>,
    tables: HashMap<FunctionKey, Arc<dyn TableFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scalar function, keyed by `(name, num_args)`.
    ///
    /// Overwrites any existing function with the same key. Returns the
    /// previous function if one existed.
    pub fn register_scalar<F>(&mut self, function: F) -> Option<Arc<dyn ScalarFunction>>
    where
        F: ScalarFunction + 'static,
    {
        let key = FunctionKey::new(function.name(), function.num_args());
        self.scalars.insert(key, Arc::new(function))
    }

    /// Register a table function, keyed by `(name, num_args)`.
    pub fn register_table<F>(&mut self, function: F) -> Option<Arc<dyn TableFunction>>
    where
        F: TableFunction + 'static,
    {
        let key = FunctionKey::new(function.name(), function.num_args());
        self.tables.insert(key, Arc::new(function))
    }

    /// Look up a scalar function by `(name, num_args)`.
    #[must_use]
    pub fn find_scalar(&self, name: &str, num_args: i32) -> Option<Arc<dyn ScalarFunction>> {
        lookup(&self.scalars, name, num_args, "scalar")
    }

    /// Look up a table function by `(name, num_args)`.
    #[must_use]
    pub fn find_table(&self, name: &str, num_args: i32) -> Option<Arc<dyn TableFunction>> {
        lookup(&self.tables, name, num_args, "table")
    }

    /// Resolve and invoke a scalar function.
    pub fn call_scalar(&self, name: &str, args: &[Value]) -> Result<Value> {
        let num_args = arity(args)?;
        let function = self
            .find_scalar(name, num_args)
            .ok_or_else(|| TsError::NoSuchFunction {
                name: canonical_name(name),
                num_args,
            })?;
        function.invoke(args)
    }

    /// Resolve a table function and start a scan over its rows.
    ///
    /// `expected` is the row shape the caller is prepared to accept; a
    /// mismatch fails before any row is produced.
    pub fn scan_table(
        &self,
        name: &str,
        args: &[Value],
        expected: Option<&RowShape>,
    ) -> Result<TableScan> {
        let num_args = arity(args)?;
        let function = self
            .find_table(name, num_args)
            .ok_or_else(|| TsError::NoSuchFunction {
                name: canonical_name(name),
                num_args,
            })?;
        TableScan::start(function.as_ref(), args, expected)
    }

    /// Whether the registry contains any scalar function with this name.
    #[must_use]
    pub fn contains_scalar(&self, name: &str) -> bool {
        let canon = canonical_name(name);
        self.scalars.keys().any(|k| k.name == canon)
    }

    /// Whether the registry contains any table function with this name.
    #[must_use]
    pub fn contains_table(&self, name: &str) -> bool {
        let canon = canonical_name(name);
        self.tables.keys().any(|k| k.name == canon)
    }
}

fn lookup<T: ?Sized>(
    map: &HashMap<FunctionKey, Arc<T>>,
    name: &str,
    num_args: i32,
    kind: &'static str,
) -> Option<Arc<T>> {
    let canon = canonical_name(name);
    let exact = FunctionKey {
        name: canon.clone(),
        num_args,
    };
    if let Some(f) = map.get(&exact) {
        debug!(name = %canon, arity = num_args, kind, hit = "exact", "registry lookup");
        return Some(Arc::clone(f));
    }
    // Variadic fallback
    let variadic = FunctionKey {
        name: canon.clone(),
        num_args: -1,
    };
    let result = map.get(&variadic).map(Arc::clone);
    debug!(
        name = %canon,
        arity = num_args,
        kind,
        hit = if result.is_some() { "variadic" } else { "miss" },
        "registry lookup"
    );
    result
}

fn arity(args: &[Value]) -> Result<i32> {
    i32::try_from(args.len()).map_err(|_| TsError::WrongArgumentCount {
        name: "<call>".to_owned(),
        expected: "at most i32::MAX".to_owned(),
        actual: args.len(),
    })
}

fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
