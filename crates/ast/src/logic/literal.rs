//! Body literals.
//!
//! - Positive atoms: `edge(x, y)`
//! - Negated atoms: `!edge(x, y)`
//! - Constraints: `x < 5`, `n = count : { e(_) }`
//! - Boolean literals: `true`, `false`

use super::{Argument, Atom, ComparisonOperator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A binary constraint `lhs op rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    lhs: Argument,
    op: ComparisonOperator,
    rhs: Argument,
}

impl Constraint {
    #[must_use]
    pub fn new(lhs: Argument, op: ComparisonOperator, rhs: Argument) -> Self {
        Self { lhs, op, rhs }
    }

    #[must_use]
    pub fn lhs(&self) -> &Argument {
        &self.lhs
    }

    #[must_use]
    pub fn operator(&self) -> ComparisonOperator {
        self.op
    }

    #[must_use]
    pub fn rhs(&self) -> &Argument {
        &self.rhs
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// A literal in a clause body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// Positive atom.
    Atom(Atom),
    /// Negated atom (negation as failure).
    Negation(Atom),
    /// Binary constraint.
    Constraint(Constraint),
    /// Boolean literal.
    Bool(bool),
}

impl Literal {
    /// The atom of a positive or negated literal.
    #[must_use]
    pub fn atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) | Self::Negation(atom) => Some(atom),
            Self::Constraint(_) | Self::Bool(_) => None,
        }
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        matches!(self, Self::Negation(_))
    }

    /// Push every atom reachable from this literal with its negation flag:
    /// the literal's own atom first, then atoms nested in its terms.
    pub fn collect_atoms<'a>(&'a self, out: &mut Vec<(&'a Atom, bool)>) {
        match self {
            Self::Atom(atom) => {
                out.push((atom, false));
                atom.collect_nested_atoms(out);
            }
            Self::Negation(atom) => {
                out.push((atom, true));
                atom.collect_nested_atoms(out);
            }
            Self::Constraint(c) => {
                c.lhs.collect_atoms(out);
                c.rhs.collect_atoms(out);
            }
            Self::Bool(_) => {}
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(atom) => write!(f, "{atom}"),
            Self::Negation(atom) => write!(f, "!{atom}"),
            Self::Constraint(c) => write!(f, "{c}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Aggregation, AggregationOperator};
    use crate::ConstType;

    fn atom(name: &str) -> Atom {
        Atom::new(name, vec![Argument::var("x")])
    }

    #[test]
    fn atom_accessors() {
        let pos = Literal::Atom(atom("edge"));
        let neg = Literal::Negation(atom("blocked"));
        assert_eq!(pos.atom().map(|a| a.name().to_string()), Some("edge".into()));
        assert!(!pos.is_negated());
        assert!(neg.is_negated());
        assert!(Literal::Bool(true).atom().is_none());
    }

    #[test]
    fn display_golden() {
        assert_eq!(Literal::Negation(atom("b")).to_string(), "!b(x)");
        let c = Constraint::new(
            Argument::var("x"),
            ComparisonOperator::LessThan,
            Argument::Const(ConstType::Number(5)),
        );
        assert_eq!(Literal::Constraint(c).to_string(), "x < 5");
        assert_eq!(Literal::Bool(false).to_string(), "false");
    }

    #[test]
    fn constraint_aggregates_are_visited() {
        let count = Argument::Aggregate(Box::new(Aggregation::new(
            AggregationOperator::Count,
            None,
            vec![Literal::Atom(atom("e"))],
        )));
        let lit = Literal::Constraint(Constraint::new(
            Argument::var("n"),
            ComparisonOperator::Equal,
            count,
        ));
        let mut out = Vec::new();
        lit.collect_atoms(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0.name().to_string(), "e");
        assert!(!out[0].1);
    }

    #[test]
    fn json_shapes() {
        let l: Literal = serde_json::from_str(
            r#"{"constraint":{"lhs":{"var":"x"},"op":"!=","rhs":{"const":"a"}}}"#,
        )
        .unwrap();
        assert_eq!(l.to_string(), "x != \"a\"");
        let n: Literal = serde_json::from_str(r#"{"negation":{"name":"r"}}"#).unwrap();
        assert_eq!(n.to_string(), "!r()");
    }
}
