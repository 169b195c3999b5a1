//! Clauses: `head :- l1, l2, ..., ln.`

use super::atom::{collect_literal_atoms, join};
use super::{Atom, Literal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A clause defining the relation named by its head.
///
/// A clause with an empty body is a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    head: Atom,
    #[serde(default)]
    body: Vec<Literal>,
}

impl Clause {
    #[must_use]
    pub fn new(head: Atom, body: Vec<Literal>) -> Self {
        Self { head, body }
    }

    #[must_use]
    #[inline]
    pub fn head(&self) -> &Atom {
        &self.head
    }

    #[must_use]
    #[inline]
    pub fn body(&self) -> &[Literal] {
        &self.body
    }

    /// Every atom reachable from the body literals, with its negation flag.
    #[must_use]
    pub fn body_atoms(&self) -> Vec<(&Atom, bool)> {
        let mut out = Vec::new();
        collect_literal_atoms(&self.body, &mut out);
        out
    }

    /// Atoms embedded in the head arguments (inside aggregates and other terms).
    ///
    /// The head atom itself is not included.
    #[must_use]
    pub fn head_atoms(&self) -> Vec<&Atom> {
        let mut out = Vec::new();
        self.head.collect_nested_atoms(&mut out);
        out.into_iter().map(|(atom, _)| atom).collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}.", self.head)
        } else {
            write!(f, "{} :- {}.", self.head, join(&self.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Aggregation, AggregationOperator, Argument};

    fn atom(name: &str) -> Atom {
        Atom::new(name, vec![Argument::var("x")])
    }

    #[test]
    fn fact_display() {
        let c = Clause::new(atom("a"), vec![]);
        assert!(c.body().is_empty());
        assert_eq!(c.to_string(), "a(x).");
    }

    #[test]
    fn body_atoms_in_order_with_polarity() {
        let c = Clause::new(
            atom("a"),
            vec![
                Literal::Atom(atom("b")),
                Literal::Bool(true),
                Literal::Negation(atom("c")),
            ],
        );
        let got: Vec<_> = c
            .body_atoms()
            .into_iter()
            .map(|(a, neg)| (a.name().to_string(), neg))
            .collect();
        assert_eq!(got, vec![("b".into(), false), ("c".into(), true)]);
    }

    #[test]
    fn head_atoms_exclude_head_itself() {
        let total = Argument::Aggregate(Box::new(Aggregation::new(
            AggregationOperator::Sum,
            Some(Argument::var("y")),
            vec![Literal::Atom(Atom::new("cost", vec![Argument::var("y")]))],
        )));
        let c = Clause::new(Atom::new("total", vec![total]), vec![]);
        let names: Vec<_> = c.head_atoms().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, vec!["cost"]);
        assert_eq!(c.to_string(), "total(sum y : { cost(y) }).");
    }
}
