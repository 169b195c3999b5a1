//! Atoms and argument terms.
//!
//! - [`Argument`]: variable / constant / `_` / record / functor / aggregate
//! - [`Atom`]: `name(arg1, ..., argN)`
//!
//! Aggregates may appear anywhere a term may, and they carry a body of
//! literals, so an atom can hide arbitrarily deep inside another atom's
//! arguments. [`Argument::collect_atoms`] reaches all of them.

use super::{Aggregation, Literal};
use crate::primitive::ConstType;
use crate::QualifiedName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A term in argument position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    Var(String),
    Const(ConstType),
    Placeholder,
    /// Record constructor `[a, b, ...]`.
    Record(Vec<Argument>),
    /// Intrinsic or user-defined functor, e.g. `+(x, 1)` or `@f(x)`.
    Functor { name: String, args: Vec<Argument> },
    Aggregate(Box<Aggregation>),
}

impl Argument {
    /// Shorthand for [`Argument::Var`].
    #[must_use]
    pub fn var(name: &str) -> Self {
        Self::Var(name.to_string())
    }

    /// Push every atom nested in this term, paired with whether it occurs
    /// negated inside its enclosing aggregate body. Pre-order, left to right.
    pub fn collect_atoms<'a>(&'a self, out: &mut Vec<(&'a Atom, bool)>) {
        match self {
            Self::Var(_) | Self::Const(_) | Self::Placeholder => {}
            Self::Record(args) | Self::Functor { args, .. } => {
                for arg in args {
                    arg.collect_atoms(out);
                }
            }
            Self::Aggregate(agg) => agg.collect_atoms(out),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "{v}"),
            Self::Const(c) => write!(f, "{c}"),
            Self::Placeholder => write!(f, "_"),
            Self::Record(args) => write!(f, "[{}]", join(args)),
            Self::Functor { name, args } => write!(f, "{name}({})", join(args)),
            Self::Aggregate(agg) => write!(f, "{agg}"),
        }
    }
}

pub(crate) fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `name(arg1, ..., argN)` reference to a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    name: QualifiedName,
    #[serde(default)]
    arguments: Vec<Argument>,
}

impl Atom {
    #[must_use]
    pub fn new(name: impl Into<QualifiedName>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Referenced relation name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Atoms nested in this atom's arguments (not including `self`).
    pub fn collect_nested_atoms<'a>(&'a self, out: &mut Vec<(&'a Atom, bool)>) {
        for arg in &self.arguments {
            arg.collect_atoms(out);
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, join(&self.arguments))
    }
}

/// Collect the atoms of a literal sequence, used by aggregate bodies and clauses.
pub(crate) fn collect_literal_atoms<'a>(literals: &'a [Literal], out: &mut Vec<(&'a Atom, bool)>) {
    for literal in literals {
        literal.collect_atoms(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::AggregationOperator;

    fn names(found: &[(&Atom, bool)]) -> Vec<(String, bool)> {
        found
            .iter()
            .map(|(a, neg)| (a.name().to_string(), *neg))
            .collect()
    }

    #[test]
    fn atom_display() {
        let a = Atom::new(
            "person",
            vec![
                Argument::Const(ConstType::Symbol("Alice".into())),
                Argument::Const(ConstType::Number(25)),
                Argument::Placeholder,
                Argument::var("Z"),
            ],
        );
        assert_eq!(a.to_string(), "person(\"Alice\", 25, _, Z)");
        assert_eq!(Atom::new("flag", vec![]).to_string(), "flag()");
    }

    #[test]
    fn compound_terms_display() {
        let rec = Argument::Record(vec![Argument::var("x"), Argument::var("y")]);
        assert_eq!(rec.to_string(), "[x, y]");
        let fun = Argument::Functor {
            name: "+".into(),
            args: vec![Argument::var("x"), Argument::Const(ConstType::Number(1))],
        };
        assert_eq!(fun.to_string(), "+(x, 1)");
    }

    #[test]
    fn plain_terms_have_no_atoms() {
        let x = Argument::var("x");
        let placeholder = Argument::Placeholder;
        let mut out = Vec::new();
        x.collect_atoms(&mut out);
        placeholder.collect_atoms(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn atoms_inside_records_and_functors_are_found() {
        let count_b = Argument::Aggregate(Box::new(Aggregation::new(
            AggregationOperator::Count,
            None,
            vec![Literal::Atom(Atom::new("b", vec![]))],
        )));
        let neg_c = Argument::Aggregate(Box::new(Aggregation::new(
            AggregationOperator::Count,
            None,
            vec![Literal::Negation(Atom::new("c", vec![]))],
        )));
        let term = Argument::Record(vec![
            Argument::Functor {
                name: "+".into(),
                args: vec![count_b, Argument::var("x")],
            },
            neg_c,
        ]);
        let mut out = Vec::new();
        term.collect_atoms(&mut out);
        assert_eq!(
            names(&out),
            vec![("b".to_string(), false), ("c".to_string(), true)]
        );
    }

    #[test]
    fn json_shapes() {
        let a: Atom = serde_json::from_str(
            r#"{"name":"g.edge","arguments":[{"var":"x"},"placeholder",{"const":3}]}"#,
        )
        .unwrap();
        assert_eq!(a.to_string(), "g.edge(x, _, 3)");
    }
}
