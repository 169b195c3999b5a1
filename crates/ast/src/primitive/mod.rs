//! Primitive types for Datalog programs.
//!
//! - [`DataType`]: relation attribute types (`number`, `unsigned`, `float`, `symbol`)
//! - [`ConstType`]: literal constants (numbers, symbols)

pub mod const_type;
pub mod data_type;

pub use const_type::ConstType;
pub use data_type::DataType;
