//! Scalar (row-level) function trait.
//!
//! Scalar functions compute a single output value from zero or more input
//! values. They are stateless across calls: each invocation is independent.
//!
//! # Send + Sync
//!
//! Scalar functions may be shared across threads via `Arc`. Implementations
//! must be thread-safe.
#![allow(clippy::unnecessary_literal_bound)]

use tsx_error::{Result, TsError};
use tsx_types::Value;

/// A scalar SQL function.
///
/// Stored in the [`FunctionRegistry`](crate::FunctionRegistry) as
/// `Arc<dyn ScalarFunction>`.
///
/// # Error Handling
///
/// - Return [`TsError::TypeMismatch`] or [`TsError::NullArgument`] for bad
///   arguments.
/// - Return [`TsError::OutOfMemory`] if the result cannot be allocated.
pub trait ScalarFunction: Send + Sync {
    /// Execute this function on the given arguments.
    fn invoke(&self, args: &[Value]) -> Result<Value>;

    /// Whether this function is deterministic (same inputs, same output).
    fn is_deterministic(&self) -> bool {
        true
    }

    /// The number of arguments this function accepts.
    ///
    /// `-1` means variadic (any number of arguments).
    fn num_args(&self) -> i32;

    /// The function name, used in error messages.
    fn name(&self) -> &str;
}

/// Reject calls whose argument count differs from `expected`.
pub fn check_arg_count(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(TsError::WrongArgumentCount {
            name: name.to_owned(),
            expected: expected.to_string(),
            actual: args.len(),
        })
    }
}

/// Reject NULL arguments (strict functions).
pub fn check_not_null(name: &str, args: &[Value]) -> Result<()> {
    if args.iter().any(Value::is_null) {
        return Err(TsError::NullArgument {
            name: name.to_owned(),
        });
    }
    Ok(())
}
