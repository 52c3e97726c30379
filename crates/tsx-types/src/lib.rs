//! Shared data types for the tsearch-extras crates.
//!
//! - [`Value`]: the host's dynamically-typed argument/result value.
//! - [`WordEntry`] / [`MatchLocation`]: the annotated word stream and the
//!   offsets extracted from it.
//! - [`TsVector`] / [`TsQuery`]: indexed documents and already-parsed queries.

pub mod headline;
pub mod tsquery;
pub mod tsvector;
pub mod value;

pub use headline::{MatchLocation, WordEntry};
pub use tsquery::{QueryOperand, TsQuery};
pub use tsvector::{MAX_POSITION, TsVector, TsVectorEntry};
pub use value::{ArrayValue, Value};

use std::fmt;

/// Numeric identifier of a text search configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ConfigId(u32);

impl ConfigId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ConfigId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
