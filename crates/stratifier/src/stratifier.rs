//! Stratification of Datalog programs.

use crate::error::StratifyError;
use crate::graph::Polarity;
use crate::precedence_graph::PrecedenceGraph;
use crate::scc::{ComponentId, SccGraph};
use ast::{Program, QualifiedName, RelationId};
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use tracing::{debug, info, warn};

/// One evaluation layer: a single strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stratum {
    component: ComponentId,
    relations: Vec<RelationId>,
    recursive: bool,
    // relations of earlier strata read by this one
    enter: Vec<RelationId>,
    // members read back inside the stratum (recursive strata only)
    iterative: Vec<RelationId>,
}

impl Stratum {
    /// Member relations in declaration order.
    #[must_use]
    pub fn relations(&self) -> &[RelationId] {
        &self.relations
    }

    /// Whether the stratum must be iterated to a fixpoint.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Component this stratum was built from.
    #[must_use]
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// Relations computed by earlier strata that this stratum reads.
    #[must_use]
    pub fn enter_relations(&self) -> &[RelationId] {
        &self.enter
    }

    /// Members that feed back into the stratum's own clauses.
    #[must_use]
    pub fn iterative_relations(&self) -> &[RelationId] {
        &self.iterative
    }
}

/// Stratify a program into a total order of components.
///
/// Every stratum holds exactly one SCC of the precedence graph. Strata are
/// ordered so that each one comes after every stratum it depends on; among
/// independent strata, the one holding the earliest-declared relation goes
/// first.
#[derive(Debug, Clone)]
pub struct Stratifier<'a> {
    precedence_graph: PrecedenceGraph<'a>,
    scc_graph: SccGraph,

    // strata in evaluation order
    strata: Vec<Stratum>,
    stratum_of: HashMap<RelationId, usize>,
}

impl<'a> Stratifier<'a> {
    /// Build the precedence graph of `program` and stratify it.
    pub fn from_program(program: &'a Program) -> Result<Self, StratifyError> {
        Self::from_precedence_graph(PrecedenceGraph::from_program(program))
    }

    /// Stratify an already built precedence graph.
    ///
    /// Algorithm outline:
    /// 1. Decompose the graph into SCCs (gives recursion flags and the condensation).
    /// 2. Reject any recursive component containing a negative edge.
    /// 3. Topologically sort the condensation, breaking ties by declaration order.
    /// 4. Record per-stratum enter and iterative relations.
    pub fn from_precedence_graph(
        precedence_graph: PrecedenceGraph<'a>,
    ) -> Result<Self, StratifyError> {
        let scc_graph = SccGraph::from_graph(precedence_graph.graph());

        Self::check_negation(&precedence_graph, &scc_graph)?;

        let order = Self::topological_order(&scc_graph);
        let mut strata = Vec::with_capacity(order.len());
        let mut stratum_of = HashMap::with_capacity(precedence_graph.vertices().len());
        for (idx, component_id) in order.into_iter().enumerate() {
            let component = scc_graph.component(component_id);
            for &relation in component.members() {
                stratum_of.insert(relation, idx);
            }
            strata.push(Stratum {
                component: component_id,
                relations: component.members().to_vec(),
                recursive: component.is_recursive(),
                enter: Vec::new(),
                iterative: Vec::new(),
            });
        }

        let mut instance = Self {
            precedence_graph,
            scc_graph,
            strata,
            stratum_of,
        };
        instance.build_recursive_metadata();

        info!(
            "Stratified {} relations into {} strata ({} recursive)",
            instance.stratum_of.len(),
            instance.strata.len(),
            instance.strata.iter().filter(|s| s.recursive).count()
        );
        Ok(instance)
    }

    /// Fail on the first (by declaration order) recursive component with a
    /// negative internal edge. The remaining offenders are logged at `warn`;
    /// the returned one is left to the caller.
    fn check_negation(
        graph: &PrecedenceGraph<'_>,
        scc_graph: &SccGraph,
    ) -> Result<(), StratifyError> {
        let mut offenders = Self::negation_offenders(graph, scc_graph).into_iter();
        let Some(first) = offenders.next() else {
            return Ok(());
        };
        for other in offenders {
            warn!("Also unstratifiable: {other}");
        }
        Err(first)
    }

    /// Every unsafe component as an error, in declaration order.
    fn negation_offenders(
        graph: &PrecedenceGraph<'_>,
        scc_graph: &SccGraph,
    ) -> Vec<StratifyError> {
        let name = |r: RelationId| -> QualifiedName {
            graph
                .relation_name(r)
                .cloned()
                .unwrap_or_else(|| QualifiedName::from(r.to_string()))
        };

        scc_graph
            .components()
            .iter()
            .filter(|c| c.is_recursive() && !c.internal_negative_edges().is_empty())
            .sorted_by_key(|c| c.min_declaration())
            .map(|c| StratifyError::NegationCycle {
                relations: c.members().iter().map(|&r| name(r)).collect(),
                edges: c
                    .internal_negative_edges()
                    .iter()
                    .map(|&(from, to)| (name(from), name(to)))
                    .collect(),
            })
            .collect()
    }

    /// Kahn's algorithm over the condensation; the ready set is ordered by
    /// each component's earliest-declared relation.
    fn topological_order(scc_graph: &SccGraph) -> Vec<ComponentId> {
        let condensation = scc_graph.condensation();
        let mut in_degree: HashMap<ComponentId, usize> = condensation
            .vertices()
            .iter()
            .map(|&c| (c, condensation.predecessors(c).count()))
            .collect();

        let key = |c: ComponentId| Reverse((scc_graph.component(c).min_declaration(), c));
        let mut ready: BinaryHeap<Reverse<(RelationId, ComponentId)>> = in_degree
            .iter()
            .filter(|&(_, &d)| d == 0)
            .map(|(&c, _)| key(c))
            .collect();

        let mut order = Vec::with_capacity(condensation.vertex_count());
        while let Some(Reverse((_, component))) = ready.pop() {
            order.push(component);
            for next in condensation.successors(component) {
                if let Some(d) = in_degree.get_mut(&next) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(key(next));
                    }
                }
            }
        }

        debug_assert_eq!(
            order.len(),
            condensation.vertex_count(),
            "condensation graph is cyclic"
        );
        order
    }

    fn build_recursive_metadata(&mut self) {
        let graph = &self.precedence_graph;
        for (idx, stratum) in self.strata.iter_mut().enumerate() {
            let mut enter = Vec::new();
            let mut iterative = Vec::new();
            for &relation in &stratum.relations {
                for dep in graph.predecessors(relation) {
                    match self.stratum_of.get(&dep) {
                        Some(&s) if s < idx => enter.push(dep),
                        Some(&s) if s == idx => iterative.push(dep),
                        _ => {}
                    }
                }
            }
            enter.sort_unstable();
            enter.dedup();
            iterative.sort_unstable();
            iterative.dedup();
            debug!(
                "Stratum #{} enter={:?} iterative={:?}",
                idx + 1,
                enter,
                iterative
            );
            stratum.enter = enter;
            stratum.iterative = iterative;
        }
    }

    /// Underlying precedence graph.
    #[must_use]
    pub fn precedence_graph(&self) -> &PrecedenceGraph<'a> {
        &self.precedence_graph
    }

    /// SCC decomposition of the precedence graph.
    #[must_use]
    pub fn scc_graph(&self) -> &SccGraph {
        &self.scc_graph
    }

    /// Strata in evaluation order.
    #[must_use]
    pub fn strata(&self) -> &[Stratum] {
        &self.strata
    }

    /// Stratum index of a relation.
    #[must_use]
    pub fn stratum_of(&self, relation: RelationId) -> Option<usize> {
        self.stratum_of.get(&relation).copied()
    }

    /// Bitmap indicating which strata are recursive (parallel with `strata`).
    #[must_use]
    pub fn is_recursive_stratum_bitmap(&self) -> Vec<bool> {
        self.strata.iter().map(Stratum::is_recursive).collect()
    }

    /// Whether the given stratum (by index) is recursive.
    #[must_use]
    pub fn is_recursive_stratum(&self, idx: usize) -> bool {
        self.strata.get(idx).is_some_and(Stratum::is_recursive)
    }

    /// Strata as relation names (helper for display/tests).
    #[must_use]
    pub fn stratum_names(&self) -> Vec<Vec<String>> {
        self.strata
            .iter()
            .map(|s| {
                s.relations
                    .iter()
                    .map(|&r| self.precedence_graph.display_name(r))
                    .collect()
            })
            .collect()
    }

    /// Whether any stratum depends negatively on an earlier one.
    #[must_use]
    pub fn has_negation(&self) -> bool {
        self.scc_graph
            .condensation()
            .edges()
            .any(|(_, _, p)| p == Polarity::Negative)
    }
}

impl fmt::Display for Stratifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nStratum:")?;
        writeln!(f, "{}", "-".repeat(45))?;

        let names = |rels: &[RelationId]| -> String {
            rels.iter()
                .map(|&r| self.precedence_graph.display_name(r))
                .join(", ")
        };

        for (idx, stratum) in self.strata.iter().enumerate() {
            writeln!(
                f,
                "#{} [{}] [{}]",
                idx + 1,
                if stratum.recursive {
                    "recursive"
                } else {
                    "non-recursive"
                },
                names(&stratum.relations)
            )?;
            writeln!(f, "  enter:     [{}]", names(&stratum.enter))?;
            if stratum.recursive {
                writeln!(f, "  iterative: [{}]", names(&stratum.iterative))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn chain_orders_dependencies_first() {
        // c :- b. b :- a.
        let p = program(
            &["c", "b", "a"],
            vec![clause("c", &[pos("b")]), clause("b", &[pos("a")])],
        );
        let s = Stratifier::from_program(&p).unwrap();
        assert_eq!(s.stratum_names(), vec![vec!["a"], vec!["b"], vec!["c"]]);
        assert_eq!(s.is_recursive_stratum_bitmap(), vec![false, false, false]);
    }

    #[test]
    fn independent_components_follow_declaration_order() {
        let p = program(&["x", "y", "z"], vec![]);
        let s = Stratifier::from_program(&p).unwrap();
        assert_eq!(s.stratum_names(), vec![vec!["x"], vec!["y"], vec!["z"]]);
    }

    #[test]
    fn stratified_negation_is_accepted() {
        // a :- b, !c. c :- b.
        let p = program(
            &["a", "b", "c"],
            vec![clause("a", &[pos("b"), neg("c")]), clause("c", &[pos("b")])],
        );
        let s = Stratifier::from_program(&p).unwrap();
        assert!(s.stratum_of(id(2)).unwrap() < s.stratum_of(id(0)).unwrap());
        assert!(s.has_negation());
    }

    #[test]
    fn negative_self_loop_is_rejected() {
        let p = program(&["a", "b"], vec![clause("a", &[pos("b"), neg("a")])]);
        let err = Stratifier::from_program(&p).unwrap_err();
        assert_eq!(names_of(err.relations()), vec!["a"]);
    }

    #[test]
    fn mixed_cycle_is_rejected() {
        // a :- b. b :- !a.
        let p = program(
            &["a", "b"],
            vec![clause("a", &[pos("b")]), clause("b", &[neg("a")])],
        );
        let err = Stratifier::from_program(&p).unwrap_err();
        assert_eq!(names_of(err.relations()), vec!["a", "b"]);
        let StratifyError::NegationCycle { edges, .. } = err;
        assert_eq!(
            edges,
            vec![(QualifiedName::from("a"), QualifiedName::from("b"))]
        );
    }

    #[test]
    fn first_offender_by_declaration_is_reported() {
        let p = program(
            &["p", "q", "r", "s"],
            vec![
                clause("r", &[neg("s")]),
                clause("s", &[pos("r")]),
                clause("p", &[neg("q")]),
                clause("q", &[pos("p")]),
            ],
        );
        let err = Stratifier::from_program(&p).unwrap_err();
        assert_eq!(names_of(err.relations()), vec!["p", "q"]);

        // The returned component is not repeated among the ones only logged.
        let g = PrecedenceGraph::from_program(&p);
        let scc = SccGraph::from_graph(g.graph());
        let offenders = Stratifier::negation_offenders(&g, &scc);
        let listed: Vec<_> = offenders.iter().map(|e| names_of(e.relations())).collect();
        assert_eq!(listed, vec![vec!["p", "q"], vec!["r", "s"]]);
        assert_eq!(offenders[0], err);
    }

    #[test]
    fn enter_and_iterative_relations() {
        // path :- edge. path :- path, edge. far :- path.
        let p = program(
            &["edge", "path", "far"],
            vec![
                clause("path", &[pos("edge")]),
                clause("path", &[pos("path"), pos("edge")]),
                clause("far", &[pos("path")]),
            ],
        );
        let s = Stratifier::from_program(&p).unwrap();
        let strata = s.strata();
        assert_eq!(strata.len(), 3);
        assert!(strata[1].is_recursive());
        assert_eq!(strata[1].enter_relations(), ids(&[0]).as_slice());
        assert_eq!(strata[1].iterative_relations(), ids(&[1]).as_slice());
        assert_eq!(strata[2].enter_relations(), ids(&[1]).as_slice());
        assert!(strata[2].iterative_relations().is_empty());
    }

    #[test]
    fn display_golden() {
        let p = program(
            &["a", "b"],
            vec![clause("a", &[pos("a"), pos("b")])],
        );
        let s = Stratifier::from_program(&p).unwrap();
        let out = s.to_string();
        assert!(out.contains("#1 [non-recursive] [b]"));
        assert!(out.contains("#2 [recursive] [a]"));
        assert!(out.contains("  enter:     [b]"));
        assert!(out.contains("  iterative: [a]"));
    }

    #[test]
    fn empty_program_has_no_strata() {
        let p = program(&[], vec![]);
        let s = Stratifier::from_program(&p).unwrap();
        assert!(s.strata().is_empty());
        assert!(!s.is_recursive_stratum(0));
    }
}
