use std::fmt;

use crate::{ConfigId, TsQuery, TsVector};

/// A dynamically-typed host value.
///
/// Covers the argument and result types the text-search functions exchange
/// with their host: integers, text, configuration identifiers, parsed
/// queries, indexed documents and (multi-dimensional) arrays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A text string.
    Text(String),
    /// A text search configuration identifier (`regconfig`).
    Config(ConfigId),
    /// A parsed query (`tsquery`).
    Query(TsQuery),
    /// An indexed document (`tsvector`).
    Vector(TsVector),
    /// An array of values.
    Array(ArrayValue),
}

impl Value {
    /// Name of this value's type, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Config(_) => "regconfig",
            Self::Query(_) => "tsquery",
            Self::Vector(_) => "tsvector",
            Self::Array(_) => "array",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_query(&self) -> Option<&TsQuery> {
        match self {
            Self::Query(q) => Some(q),
            _ => None,
        }
    }

    pub const fn as_vector(&self) -> Option<&TsVector> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Config(id) => write!(f, "regconfig {id}"),
            Self::Query(q) => write!(f, "{q}"),
            Self::Vector(v) => write!(f, "{v}"),
            Self::Array(a) => write!(f, "{a}"),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<TsQuery> for Value {
    fn from(q: TsQuery) -> Self {
        Self::Query(q)
    }
}

impl From<TsVector> for Value {
    fn from(v: TsVector) -> Self {
        Self::Vector(v)
    }
}

impl From<ConfigId> for Value {
    fn from(id: ConfigId) -> Self {
        Self::Config(id)
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Self::Array(a)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// A rectangular array stored in row-major order.
///
/// `dims` lists the extent of each dimension; the number of elements always
/// equals their product.
#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ArrayValue {
    dims: Vec<usize>,
    elements: Vec<Value>,
}

impl ArrayValue {
    /// A one-dimensional array.
    #[must_use]
    pub fn one_dim(elements: Vec<Value>) -> Self {
        Self {
            dims: vec![elements.len()],
            elements,
        }
    }

    /// A two-dimensional array with `columns` elements per row.
    ///
    /// Returns `None` if `columns` is zero or does not evenly divide the
    /// element count.
    #[must_use]
    pub fn two_dim(columns: usize, elements: Vec<Value>) -> Option<Self> {
        if columns == 0 || elements.len() % columns != 0 {
            return None;
        }
        Some(Self {
            dims: vec![elements.len() / columns, columns],
            elements,
        })
    }

    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at a 0-based multi-dimensional index.
    #[must_use]
    pub fn get(&self, index: &[usize]) -> Option<&Value> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut flat = 0;
        for (i, d) in index.iter().zip(&self.dims) {
            if i >= d {
                return None;
            }
            flat = flat * d + i;
        }
        self.elements.get(flat)
    }

    /// Rows of the innermost dimension.
    pub fn rows(&self) -> std::slice::Chunks<'_, Value> {
        let width = self.dims.last().copied().unwrap_or(1).max(1);
        self.elements.chunks(width)
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level(
            f: &mut fmt::Formatter<'_>,
            dims: &[usize],
            elements: &[Value],
        ) -> fmt::Result {
            f.write_str("{")?;
            match dims {
                [] | [_] => {
                    for (i, e) in elements.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        match e {
                            Value::Text(s) => f.write_str(s)?,
                            other => write!(f, "{other}")?,
                        }
                    }
                }
                [_, inner @ ..] => {
                    let stride: usize = inner.iter().product();
                    for (i, chunk) in elements.chunks(stride.max(1)).enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write_level(f, inner, chunk)?;
                    }
                }
            }
            f.write_str("}")
        }
        write_level(f, &self.dims, &self.elements)
    }
}
