//! Strongly connected components of the precedence graph.
//!
//! Tarjan's algorithm, started from vertices in insertion order and following
//! successors in insertion order. Components are numbered in completion
//! order, which places every component after all components it reaches.

use crate::graph::{Graph, Polarity};
use ast::RelationId;
use std::collections::HashMap;
use std::fmt;

/// Index of a component in [`SccGraph::components`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// One strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    // sorted by declaration order
    members: Vec<RelationId>,
    recursive: bool,
    // negative edges with both endpoints inside the component
    negative_edges: Vec<(RelationId, RelationId)>,
}

impl Component {
    /// Member relations in declaration order.
    #[must_use]
    pub fn members(&self) -> &[RelationId] {
        &self.members
    }

    /// More than one member, or a single member with a self-loop.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Lowest declaration index among the members.
    #[must_use]
    pub fn min_declaration(&self) -> RelationId {
        self.members[0]
    }

    /// Negative edges inside the component, in graph edge order.
    #[must_use]
    pub fn internal_negative_edges(&self) -> &[(RelationId, RelationId)] {
        &self.negative_edges
    }

    #[must_use]
    pub fn contains(&self, relation: RelationId) -> bool {
        self.members.binary_search(&relation).is_ok()
    }
}

/// Partition of the precedence graph into SCCs plus the condensation graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccGraph {
    component_of: HashMap<RelationId, ComponentId>,
    components: Vec<Component>,
    condensation: Graph<ComponentId>,
}

impl SccGraph {
    #[must_use]
    pub fn from_graph(graph: &Graph<RelationId>) -> Self {
        let raw = Tarjan::run(graph);

        let mut component_of = HashMap::with_capacity(graph.vertex_count());
        let mut components = Vec::with_capacity(raw.len());
        for (idx, positions) in raw.into_iter().enumerate() {
            let mut members: Vec<RelationId> =
                positions.into_iter().map(|p| graph.vertices()[p]).collect();
            members.sort_unstable();
            for &m in &members {
                component_of.insert(m, ComponentId(idx));
            }
            let recursive = members.len() > 1 || graph.has_self_loop(members[0]);
            components.push(Component {
                members,
                recursive,
                negative_edges: Vec::new(),
            });
        }

        let mut condensation = Graph::new();
        for idx in 0..components.len() {
            condensation.insert_vertex(ComponentId(idx));
        }
        for (from, to, polarity) in graph.edges() {
            let (cf, ct) = (component_of[&from], component_of[&to]);
            if cf == ct {
                if polarity == Polarity::Negative {
                    components[cf.0].negative_edges.push((from, to));
                }
            } else {
                // Successors complete first, so inter-component edges point to lower ids.
                debug_assert!(cf > ct, "condensation edge {cf} -> {ct} closes a cycle");
                condensation.insert_edge(cf, ct, polarity);
            }
        }

        Self {
            component_of,
            components,
            condensation,
        }
    }

    /// Component containing `relation`.
    #[must_use]
    pub fn component_of(&self, relation: RelationId) -> Option<ComponentId> {
        self.component_of.get(&relation).copied()
    }

    /// Components in completion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// Acyclic graph over components with aggregated polarity.
    #[must_use]
    pub fn condensation(&self) -> &Graph<ComponentId> {
        &self.condensation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Working state of one Tarjan run, over vertex positions.
struct Tarjan<'g> {
    graph: &'g Graph<RelationId>,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    components: Vec<Vec<usize>>,
}

impl<'g> Tarjan<'g> {
    fn run(graph: &'g Graph<RelationId>) -> Vec<Vec<usize>> {
        let n = graph.vertex_count();
        let mut state = Self {
            graph,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        };
        for &root in graph.vertices() {
            let Some(pos) = graph.position(root) else {
                continue;
            };
            if state.index[pos].is_none() {
                state.visit(pos);
            }
        }
        state.components
    }

    /// Depth-first search from `root`, driven by an explicit stack of
    /// `(vertex, next successor slot)` frames.
    fn visit(&mut self, root: usize) {
        let graph = self.graph;
        self.open(root);
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            if let Some(w) = graph.successor_position(v, frame.1) {
                frame.1 += 1;
                match self.index[w] {
                    None => {
                        self.open(w);
                        frames.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
            }
            if Some(self.lowlink[v]) == self.index[v] {
                let mut component = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }

    fn open(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{id, ids};
    use Polarity::*;

    fn graph(n: usize, edges: &[(usize, usize, Polarity)]) -> Graph<RelationId> {
        let mut g = Graph::new();
        for i in 0..n {
            g.insert_vertex(id(i));
        }
        for &(a, b, p) in edges {
            g.insert_edge(id(a), id(b), p);
        }
        g
    }

    #[test]
    fn components_partition_vertices() {
        let g = graph(
            5,
            &[(0, 1, Positive), (1, 0, Positive), (2, 3, Positive), (3, 4, Positive)],
        );
        let scc = SccGraph::from_graph(&g);
        let mut seen: Vec<RelationId> = scc
            .components()
            .iter()
            .flat_map(|c| c.members().iter().copied())
            .collect();
        seen.sort();
        assert_eq!(seen, ids(&[0, 1, 2, 3, 4]));
        assert_eq!(scc.len(), 4);
        assert_eq!(scc.component_of(id(0)), scc.component_of(id(1)));
    }

    #[test]
    fn acyclic_graph_has_singleton_components() {
        let g = graph(3, &[(0, 1, Positive), (1, 2, Negative)]);
        let scc = SccGraph::from_graph(&g);
        assert_eq!(scc.len(), 3);
        assert!(scc.components().iter().all(|c| !c.is_recursive()));
        assert_eq!(scc.condensation().edge_count(), 2);
    }

    #[test]
    fn self_loop_is_recursive_singleton() {
        let g = graph(2, &[(0, 0, Positive), (0, 1, Positive)]);
        let scc = SccGraph::from_graph(&g);
        let c0 = scc.component(scc.component_of(id(0)).unwrap());
        let c1 = scc.component(scc.component_of(id(1)).unwrap());
        assert_eq!(c0.members(), ids(&[0]).as_slice());
        assert!(c0.is_recursive());
        assert!(!c1.is_recursive());
    }

    #[test]
    fn internal_negative_edges_are_recorded() {
        let g = graph(3, &[(0, 1, Positive), (1, 2, Positive), (2, 0, Negative)]);
        let scc = SccGraph::from_graph(&g);
        assert_eq!(scc.len(), 1);
        let c = &scc.components()[0];
        assert_eq!(c.members(), ids(&[0, 1, 2]).as_slice());
        assert_eq!(c.internal_negative_edges(), [(id(2), id(0))]);
        assert!(scc.condensation().edge_count() == 0);
    }

    #[test]
    fn condensation_aggregates_polarity() {
        // {0,1} cycle, both feeding 2; one of the edges negative.
        let g = graph(
            3,
            &[(0, 1, Positive), (1, 0, Positive), (0, 2, Positive), (1, 2, Negative)],
        );
        let scc = SccGraph::from_graph(&g);
        let top = scc.component_of(id(0)).unwrap();
        let bottom = scc.component_of(id(2)).unwrap();
        assert_eq!(scc.condensation().edge(top, bottom), Some(Negative));
        assert_eq!(scc.condensation().edge_count(), 1);
    }

    #[test]
    fn condensation_edges_point_to_earlier_components() {
        let g = graph(
            6,
            &[
                (5, 4, Positive),
                (4, 3, Positive),
                (3, 4, Positive),
                (3, 0, Positive),
                (1, 2, Positive),
                (0, 2, Negative),
            ],
        );
        let scc = SccGraph::from_graph(&g);
        for (from, to, _) in scc.condensation().edges() {
            assert!(from > to);
        }
    }

    #[test]
    fn long_ring_is_one_component() {
        let n = 100_000;
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n, Positive)).collect();
        let scc = SccGraph::from_graph(&graph(n, &edges));
        assert_eq!(scc.len(), 1);
        assert!(scc.components()[0].is_recursive());
        assert_eq!(scc.components()[0].members().len(), n);
    }

    #[test]
    fn long_path_completes_deepest_first() {
        let n = 100_000;
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i, Positive)).collect();
        let scc = SccGraph::from_graph(&graph(n, &edges));
        assert_eq!(scc.len(), n);
        assert_eq!(scc.component_of(id(n - 1)), Some(ComponentId(0)));
        assert_eq!(scc.component_of(id(0)), Some(ComponentId(n - 1)));
    }

    #[test]
    fn completion_order_is_deterministic() {
        let g = graph(4, &[(0, 1, Positive), (2, 3, Positive), (3, 2, Positive)]);
        assert_eq!(SccGraph::from_graph(&g), SccGraph::from_graph(&g));
    }
}
