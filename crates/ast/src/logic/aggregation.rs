//! Aggregates: `op target : { body }`.
//!
//! # Example
//! ```rust
//! use ast::logic::{Aggregation, AggregationOperator, Argument, Atom, Literal};
//! let agg = Aggregation::new(
//!     AggregationOperator::Sum,
//!     Some(Argument::var("x")),
//!     vec![Literal::Atom(Atom::new("price", vec![Argument::var("x")]))],
//! );
//! assert_eq!(agg.to_string(), "sum x : { price(x) }");
//! ```

use super::atom::{collect_literal_atoms, join};
use super::{Argument, Atom, Literal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported aggregation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationOperator {
    Min,
    Max,
    Count,
    Sum,
}

impl fmt::Display for AggregationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
            Self::Count => write!(f, "count"),
            Self::Sum => write!(f, "sum"),
        }
    }
}

/// An aggregate term with its own sub-body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aggregation {
    operator: AggregationOperator,
    #[serde(default)]
    target: Option<Argument>,
    #[serde(default)]
    body: Vec<Literal>,
}

impl Aggregation {
    #[must_use]
    pub fn new(
        operator: AggregationOperator,
        target: Option<Argument>,
        body: Vec<Literal>,
    ) -> Self {
        Self {
            operator,
            target,
            body,
        }
    }

    #[must_use]
    #[inline]
    pub fn operator(&self) -> AggregationOperator {
        self.operator
    }

    /// Aggregated expression; `None` for `count`.
    #[must_use]
    #[inline]
    pub fn target(&self) -> Option<&Argument> {
        self.target.as_ref()
    }

    #[must_use]
    #[inline]
    pub fn body(&self) -> &[Literal] {
        &self.body
    }

    pub(crate) fn collect_atoms<'a>(&'a self, out: &mut Vec<(&'a Atom, bool)>) {
        if let Some(target) = &self.target {
            target.collect_atoms(out);
        }
        collect_literal_atoms(&self.body, out);
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator)?;
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        write!(f, " : {{ {} }}", join(&self.body))
    }
}
