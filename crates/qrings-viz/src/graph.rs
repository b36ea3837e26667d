//! Directed coupling graph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use qrings_hal::CouplingMap;

/// Directed multigraph over qubit indices.
///
/// Nodes are the distinct qubits that appear in any pair, in order of
/// first appearance. Every pair becomes one edge, so symmetric and
/// duplicate pairs are all kept.
#[derive(Debug, Clone, Default)]
pub struct CouplingGraph {
    graph: DiGraph<u32, ()>,
    index: FxHashMap<u32, NodeIndex>,
}

impl CouplingGraph {
    /// Build the graph from a coupling map.
    pub fn from_coupling_map(map: &CouplingMap) -> Self {
        let mut graph = Self::default();
        for &(source, target) in map.edges() {
            graph.add_edge(source, target);
        }
        graph
    }

    fn node(&mut self, qubit: u32) -> NodeIndex {
        *self
            .index
            .entry(qubit)
            .or_insert_with(|| self.graph.add_node(qubit))
    }

    /// Add one directed edge, creating missing nodes.
    pub fn add_edge(&mut self, source: u32, target: u32) {
        let a = self.node(source);
        let b = self.node(target);
        self.graph.add_edge(a, b, ());
    }

    /// Number of distinct qubits.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Qubit indices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = u32> + '_ {
        self.graph.node_indices().map(|n| self.graph[n])
    }

    /// `(source, target)` qubit pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
