//! Declaration types for Datalog programs.
//!
//! - [`Attribute`]: a single column (name + [`DataType`](crate::primitive::DataType))
//! - [`Relation`]: a relation schema identified by its qualified name and arity
//!
//! # Example
//! ```rust
//! use ast::declaration::{Attribute, Relation};
//! use ast::primitive::DataType;
//!
//! let person = Relation::new(
//!     "person",
//!     vec![
//!         Attribute::new("name", DataType::Symbol),
//!         Attribute::new("age", DataType::Number),
//!     ],
//! );
//! assert_eq!(person.name().to_string(), "person");
//! assert_eq!(person.arity(), 2);
//! ```

pub mod relation;

pub use relation::{Attribute, Relation};
