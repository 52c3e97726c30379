//! Already-parsed search queries (`tsquery`).
//!
//! Queries are built programmatically; turning query text into a tree is the
//! search engine's job, not ours.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single query operand: a normalized lexeme, optionally a prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryOperand {
    pub lexeme: String,
    pub prefix: bool,
}

impl QueryOperand {
    /// Whether `lexeme` satisfies this operand.
    #[must_use]
    pub fn matches(&self, lexeme: &str) -> bool {
        if self.prefix {
            lexeme.starts_with(self.lexeme.as_str())
        } else {
            lexeme == self.lexeme
        }
    }
}

/// A parsed query expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TsQuery {
    Operand(QueryOperand),
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),
}

impl TsQuery {
    /// Exact-lexeme operand.
    pub fn term(lexeme: impl Into<String>) -> Self {
        Self::Operand(QueryOperand {
            lexeme: lexeme.into(),
            prefix: false,
        })
    }

    /// Prefix operand (`lexeme:*`).
    pub fn prefix(lexeme: impl Into<String>) -> Self {
        Self::Operand(QueryOperand {
            lexeme: lexeme.into(),
            prefix: true,
        })
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Operands that a matching document occurrence can satisfy.
    ///
    /// An operand counts when it sits beneath an even number of `NOT`
    /// nodes; operands under an odd number of negations never match.
    #[must_use]
    pub fn positive_operands(&self) -> Vec<&QueryOperand> {
        let mut out = Vec::new();
        collect_operands(self, false, &mut out);
        out
    }
}

fn collect_operands<'a>(node: &'a TsQuery, negated: bool, out: &mut Vec<&'a QueryOperand>) {
    match node {
        TsQuery::Operand(op) => {
            if !negated {
                out.push(op);
            }
        }
        TsQuery::And(l, r) | TsQuery::Or(l, r) => {
            collect_operands(l, negated, out);
            collect_operands(r, negated, out);
        }
        TsQuery::Not(inner) => collect_operands(inner, !negated, out),
    }
}

impl fmt::Display for QueryOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.lexeme.replace('\'', "''"))?;
        if self.prefix {
            f.write_str(":*")?;
        }
        Ok(())
    }
}

impl fmt::Display for TsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(op) => write!(f, "{op}"),
            Self::And(l, r) => write!(f, "{l} & {r}"),
            // Parenthesized so that `a | b & c` renders unambiguously.
            Self::Or(l, r) => write!(f, "( {l} | {r} )"),
            Self::Not(inner) => match inner.as_ref() {
                Self::Operand(_) | Self::Not(_) => write!(f, "!{inner}"),
                _ => write!(f, "!( {inner} )"),
            },
        }
    }
}
