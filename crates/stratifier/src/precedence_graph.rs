//! Precedence graph construction for Datalog programs.
//!
//! Edge `u -> v` means the definition of `v` depends on `u`: some clause for
//! `v` mentions `u` in its body, or inside an aggregate or other term embedded
//! in its head.

use crate::graph::{Graph, Polarity};
use ast::{Clause, Program, QualifiedName, RelationDetailCache, RelationId, RelationLookup};
use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// Relation-level dependency graph of a program.
///
/// Vertices are exactly the declared relations, including ones without
/// clauses. The program is borrowed, never copied.
#[derive(Debug, Clone)]
pub struct PrecedenceGraph<'a> {
    program: &'a Program,
    graph: Graph<RelationId>,
}

impl<'a> PrecedenceGraph<'a> {
    /// Build the graph using a fresh [`RelationDetailCache`].
    #[must_use]
    pub fn from_program(program: &'a Program) -> Self {
        let cache = RelationDetailCache::new(program);
        Self::build(program, &cache)
    }

    /// Build the graph resolving names and clauses through `lookup`.
    ///
    /// Relations and clauses are visited in declaration order. Atoms whose
    /// name does not resolve contribute no edge.
    #[must_use]
    pub fn build<L: RelationLookup + ?Sized>(program: &'a Program, lookup: &L) -> Self {
        let mut graph = Graph::new();

        for relation in program.relation_ids() {
            graph.insert_vertex(relation);
            for clause in lookup.clauses(relation) {
                Self::analyze_clause_dependencies(relation, clause, lookup, &mut graph);
            }
        }

        debug!(
            "Precedence graph built (vertices={}, edges={})",
            graph.vertex_count(),
            graph.edge_count()
        );
        Self { program, graph }
    }

    fn analyze_clause_dependencies<L: RelationLookup + ?Sized>(
        relation: RelationId,
        clause: &Clause,
        lookup: &L,
        graph: &mut Graph<RelationId>,
    ) {
        let body = clause
            .body_atoms()
            .into_iter()
            .map(|(atom, negated)| (atom, Polarity::from_negated(negated)));
        // Head-embedded references cannot be negated.
        let head = clause
            .head_atoms()
            .into_iter()
            .map(|atom| (atom, Polarity::Positive));

        for (atom, polarity) in body.chain(head) {
            match lookup.relation(atom.name()) {
                Some(dependency) => graph.insert_edge(dependency, relation, polarity),
                None => debug!("Skipping unresolved atom '{}' in `{}`", atom.name(), clause),
            }
        }
    }

    /// The analysed program.
    #[must_use]
    pub fn program(&self) -> &'a Program {
        self.program
    }

    /// Underlying graph over relation handles.
    #[must_use]
    pub fn graph(&self) -> &Graph<RelationId> {
        &self.graph
    }

    /// All relations in declaration order.
    #[must_use]
    pub fn vertices(&self) -> &[RelationId] {
        self.graph.vertices()
    }

    /// Relations whose definition depends directly on `relation`.
    pub fn successors(&self, relation: RelationId) -> impl Iterator<Item = RelationId> + '_ {
        self.graph.successors(relation)
    }

    /// Relations that `relation`'s definition depends on directly.
    pub fn predecessors(&self, relation: RelationId) -> impl Iterator<Item = RelationId> + '_ {
        self.graph.predecessors(relation)
    }

    /// All dependency edges `(dependency, dependent, polarity)`.
    pub fn edges(&self) -> impl Iterator<Item = (RelationId, RelationId, Polarity)> + '_ {
        self.graph.edges()
    }

    /// Number of relations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.vertex_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    #[must_use]
    pub fn polarity(&self, from: RelationId, to: RelationId) -> Option<Polarity> {
        self.graph.edge(from, to)
    }

    /// Qualified name of a vertex.
    #[must_use]
    pub fn relation_name(&self, relation: RelationId) -> Option<&'a QualifiedName> {
        self.program.relation(relation).map(|r| r.name())
    }

    /// Display name of a vertex, falling back to the handle.
    #[must_use]
    pub fn display_name(&self, relation: RelationId) -> String {
        self.relation_name(relation)
            .map_or_else(|| relation.to_string(), ToString::to_string)
    }
}

impl fmt::Display for PrecedenceGraph<'_> {
    /// One line per relation listing what it depends on; `!` marks negative edges.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nPrecedence Graph:")?;
        writeln!(f, "{}", "-".repeat(45))?;

        for &relation in self.vertices() {
            let deps = self
                .predecessors(relation)
                .map(|dep| {
                    let sign = match self.polarity(dep, relation) {
                        Some(Polarity::Negative) => "!",
                        _ => "",
                    };
                    format!("{sign}{}", self.display_name(dep))
                })
                .join(", ");
            writeln!(f, "{} <- [{}]", self.display_name(relation), deps)?;
        }
        Ok(())
    }
}
