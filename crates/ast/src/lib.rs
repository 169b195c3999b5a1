//! Datalog program model.
//!
//! Structured, already-resolved representations of a Datalog program as handed
//! over by the front end: relation declarations, clauses, literals and the
//! terms nested inside them.
//!
//! The precedence analysis never owns these structures. It refers to relations
//! through [`RelationId`] handles and resolves atom names through a
//! [`RelationLookup`], normally the [`RelationDetailCache`].

pub mod declaration;
pub mod error;
pub mod logic;
pub mod lookup;
pub mod name;
pub mod primitive;
pub mod program;

// Re-export core types for convenient access
pub use declaration::{Attribute, Relation};
pub use error::AstError;
pub use logic::{
    Aggregation, AggregationOperator, Argument, Atom, Clause, ComparisonOperator, Constraint,
    Literal,
};
pub use lookup::{RelationDetailCache, RelationLookup};
pub use name::QualifiedName;
pub use primitive::{ConstType, DataType};
pub use program::{Program, RelationId};

pub type Result<T> = std::result::Result<T, AstError>;
