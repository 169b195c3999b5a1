//! Precedence analysis and stratification for Datalog programs.
//!
//! This crate operates on a [`ast::Program`] and decides the order in which
//! its relations can be evaluated:
//!
//! - [`Graph`]: directed graph with insertion-ordered vertices and
//!   polarity-labelled edges.
//! - [`PrecedenceGraph`]: which relations each relation's definition reads.
//! - [`SccGraph`]: strongly connected components and their condensation.
//! - [`Stratifier`]: totally ordered strata, rejecting negation through
//!   recursion.
//! - [`render`]: dot/HTML diagnostics for graph viewers.
//!
//! # Example
//! ```rust,no_run
//! use ast::Program;
//! use stratifier::Stratifier;
//!
//! let program = Program::load("example/reach.json").expect("valid program");
//! match Stratifier::from_program(&program) {
//!     Ok(stratifier) => println!("{stratifier}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod error;
pub mod graph;
pub mod precedence_graph;
pub mod render;
pub mod scc;
pub mod stratifier;

#[cfg(test)]
mod test_utils;

pub use error::{RenderError, StratifyError};
pub use graph::{Graph, Polarity};
pub use precedence_graph::PrecedenceGraph;
pub use render::RenderFormat;
pub use scc::{Component, ComponentId, SccGraph};
pub use stratifier::{Stratifier, Stratum};
