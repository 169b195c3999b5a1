//! Datalog program representation.
//!
//! A program contains:
//! - Relation declarations, in source order
//! - Clauses, in source order
//!
//! The front end hands programs over as JSON (see [`Program::load`]); the
//! analysis only reads them.

use crate::{AstError, Clause, QualifiedName, Relation, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::{fmt, fs};
use tracing::{debug, info};

/// Identity handle of a declared relation.
///
/// Wraps the relation's position in [`Program::relations`], so comparing
/// handles compares declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationId(usize);

impl RelationId {
    #[must_use]
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Declaration index.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A complete Datalog program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    relations: Vec<Relation>,
    #[serde(default)]
    clauses: Vec<Clause>,
}

impl Program {
    /// Build a program without validation.
    #[must_use]
    pub fn new(relations: Vec<Relation>, clauses: Vec<Clause>) -> Self {
        Self { relations, clauses }
    }

    /// Deserialize and validate a program description.
    pub fn from_json_str(src: &str) -> Result<Self> {
        let program: Self = serde_json::from_str(src)?;
        program.validate()?;
        Ok(program)
    }

    /// Read, deserialize and validate a program description file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)?;
        let program = Self::from_json_str(&src)?;
        info!(
            "Loaded program {} (relations={}, clauses={})",
            path.display(),
            program.relations.len(),
            program.clauses.len()
        );
        Ok(program)
    }

    /// Reject duplicate declarations and clauses for undeclared relations.
    ///
    /// Unknown names in clause bodies are left alone; the precedence analysis
    /// tolerates them.
    pub fn validate(&self) -> Result<()> {
        let mut declared: HashSet<&QualifiedName> = HashSet::new();
        for relation in &self.relations {
            if !declared.insert(relation.name()) {
                return Err(AstError::DuplicateRelation(relation.name().clone()));
            }
        }
        for clause in &self.clauses {
            if !declared.contains(clause.head().name()) {
                return Err(AstError::UndeclaredHead {
                    name: clause.head().name().clone(),
                    clause: clause.to_string(),
                });
            }
        }
        debug!("Program validated ({} relations)", declared.len());
        Ok(())
    }

    /// Relation declarations in source order.
    #[must_use]
    #[inline]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Clauses in source order.
    #[must_use]
    #[inline]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Declaration behind a handle.
    #[must_use]
    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(id.index())
    }

    /// Handles of all declared relations, in declaration order.
    pub fn relation_ids(&self) -> impl Iterator<Item = RelationId> + '_ {
        (0..self.relations.len()).map(RelationId::new)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.relations.is_empty() {
            writeln!(f, "Relations")?;
            writeln!(f, "{}", "-".repeat(45))?;
            for relation in &self.relations {
                writeln!(f, "{relation}")?;
            }
            writeln!(f)?;
        }
        if !self.clauses.is_empty() {
            writeln!(f, "Clauses")?;
            writeln!(f, "{}", "-".repeat(45))?;
            for clause in &self.clauses {
                writeln!(f, "{clause}")?;
            }
        }
        Ok(())
    }
}
