//! Directed graph with polarity-labelled edges.
//!
//! Vertices and per-vertex successor lists keep insertion order, so every
//! traversal over a graph is reproducible.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Sign of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// `Negative` if either side is negative.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self.is_negative() || other.is_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    #[must_use]
    #[inline]
    pub fn is_negative(self) -> bool {
        self == Self::Negative
    }

    #[must_use]
    pub fn from_negated(negated: bool) -> Self {
        if negated {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "+"),
            Self::Negative => write!(f, "-"),
        }
    }
}

/// Directed graph over copyable vertex handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V: Copy + Eq + Hash> {
    vertices: Vec<V>,
    position: HashMap<V, usize>,
    // per vertex: (target position, polarity), in insertion order
    successors: Vec<Vec<(usize, Polarity)>>,
    predecessors: Vec<Vec<usize>>,
    // (from, to) -> slot in `successors[from]`
    edge_slot: HashMap<(usize, usize), usize>,
}

impl<V: Copy + Eq + Hash> Default for Graph<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            position: HashMap::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            edge_slot: HashMap::new(),
        }
    }
}

impl<V: Copy + Eq + Hash> Graph<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `v` if absent. Returns its position.
    pub fn insert_vertex(&mut self, v: V) -> usize {
        if let Some(&pos) = self.position.get(&v) {
            return pos;
        }
        let pos = self.vertices.len();
        self.vertices.push(v);
        self.position.insert(v, pos);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        pos
    }

    /// Add `from -> to`, registering both endpoints. An existing edge keeps
    /// its slot and becomes negative if either occurrence is negative.
    pub fn insert_edge(&mut self, from: V, to: V, polarity: Polarity) {
        let src = self.insert_vertex(from);
        let dst = self.insert_vertex(to);
        match self.edge_slot.get(&(src, dst)) {
            Some(&slot) => {
                let entry = &mut self.successors[src][slot].1;
                *entry = entry.merge(polarity);
            }
            None => {
                self.edge_slot.insert((src, dst), self.successors[src].len());
                self.successors[src].push((dst, polarity));
                self.predecessors[dst].push(src);
            }
        }
    }

    /// All vertices in insertion order.
    #[must_use]
    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[must_use]
    pub fn contains(&self, v: V) -> bool {
        self.position.contains_key(&v)
    }

    /// Direct successors of `v` in edge insertion order; empty if `v` is unknown.
    pub fn successors(&self, v: V) -> impl Iterator<Item = V> + '_ {
        self.successor_edges(v).map(|(w, _)| w)
    }

    /// Direct successors of `v` with edge polarity.
    pub fn successor_edges(&self, v: V) -> impl Iterator<Item = (V, Polarity)> + '_ {
        self.position
            .get(&v)
            .into_iter()
            .flat_map(move |&pos| self.successors[pos].iter())
            .map(move |&(dst, p)| (self.vertices[dst], p))
    }

    /// Direct predecessors of `v` in edge insertion order; empty if `v` is unknown.
    pub fn predecessors(&self, v: V) -> impl Iterator<Item = V> + '_ {
        self.position
            .get(&v)
            .into_iter()
            .flat_map(move |&pos| self.predecessors[pos].iter())
            .map(move |&src| self.vertices[src])
    }

    /// Polarity of `from -> to`, if the edge exists.
    #[must_use]
    pub fn edge(&self, from: V, to: V) -> Option<Polarity> {
        let src = *self.position.get(&from)?;
        let dst = *self.position.get(&to)?;
        let slot = *self.edge_slot.get(&(src, dst))?;
        Some(self.successors[src][slot].1)
    }

    /// All edges, grouped by source in vertex order, then in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (V, V, Polarity)> + '_ {
        self.successors.iter().enumerate().flat_map(move |(src, out)| {
            out.iter()
                .map(move |&(dst, p)| (self.vertices[src], self.vertices[dst], p))
        })
    }

    #[must_use]
    pub fn has_self_loop(&self, v: V) -> bool {
        self.edge(v, v).is_some()
    }

    #[must_use]
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_slot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn position(&self, v: V) -> Option<usize> {
        self.position.get(&v).copied()
    }

    /// Target position of the `slot`-th outgoing edge of `pos`.
    pub(crate) fn successor_position(&self, pos: usize, slot: usize) -> Option<usize> {
        self.successors.get(pos)?.get(slot).map(|&(dst, _)| dst)
    }
}
