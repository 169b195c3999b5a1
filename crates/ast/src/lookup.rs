//! Relation lookup: name → relation, relation → defining clauses.

use crate::{Clause, Program, QualifiedName, RelationId};
use std::collections::HashMap;

/// Name resolution and clause retrieval used by program analyses.
pub trait RelationLookup {
    /// Resolve a (qualified) name to a declared relation.
    fn relation(&self, name: &QualifiedName) -> Option<RelationId>;

    /// Clauses whose head is `id`, in source order. Unknown ids yield nothing.
    fn clauses(&self, id: RelationId) -> &[&Clause];
}

/// Precomputed lookup tables over a borrowed [`Program`].
#[derive(Debug, Clone)]
pub struct RelationDetailCache<'a> {
    program: &'a Program,
    name_to_id: HashMap<&'a QualifiedName, RelationId>,
    clauses: Vec<Vec<&'a Clause>>,
}

impl<'a> RelationDetailCache<'a> {
    #[must_use]
    pub fn new(program: &'a Program) -> Self {
        let name_to_id: HashMap<&QualifiedName, RelationId> = program
            .relation_ids()
            .zip(program.relations())
            .map(|(id, rel)| (rel.name(), id))
            .collect();

        let mut clauses: Vec<Vec<&Clause>> = vec![Vec::new(); program.relations().len()];
        for clause in program.clauses() {
            // `validate` rejects undeclared heads; unvalidated programs skip them.
            if let Some(id) = name_to_id.get(clause.head().name()) {
                clauses[id.index()].push(clause);
            }
        }

        Self {
            program,
            name_to_id,
            clauses,
        }
    }

    /// The program this cache indexes.
    #[must_use]
    pub fn program(&self) -> &'a Program {
        self.program
    }
}

impl RelationLookup for RelationDetailCache<'_> {
    fn relation(&self, name: &QualifiedName) -> Option<RelationId> {
        self.name_to_id.get(name).copied()
    }

    fn clauses(&self, id: RelationId) -> &[&Clause] {
        self.clauses
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
