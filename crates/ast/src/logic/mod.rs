//! Logic components of Datalog programs.
//!
//! - [`clause`]: clauses (head + body)
//! - [`literal`]: body literals (atoms, negations, constraints, booleans)
//! - [`atom`]: atoms and the argument terms nested inside them
//! - [`aggregation`]: aggregates, which carry their own sub-body
//! - [`comparison`]: binary constraint operators
//!
//! # Example
//! ```rust
//! use ast::logic::{Argument, Atom, Clause, Literal};
//!
//! // reach(x, y) :- edge(x, y), !blocked(y).
//! let head = Atom::new("reach", vec![Argument::var("x"), Argument::var("y")]);
//! let body = vec![
//!     Literal::Atom(Atom::new("edge", vec![Argument::var("x"), Argument::var("y")])),
//!     Literal::Negation(Atom::new("blocked", vec![Argument::var("y")])),
//! ];
//! let clause = Clause::new(head, body);
//! assert_eq!(clause.to_string(), "reach(x, y) :- edge(x, y), !blocked(y).");
//! ```

pub mod aggregation;
pub mod atom;
pub mod clause;
pub mod comparison;
pub mod literal;

pub use aggregation::{Aggregation, AggregationOperator};
pub use atom::{Argument, Atom};
pub use clause::Clause;
pub use comparison::ComparisonOperator;
pub use literal::{Constraint, Literal};
