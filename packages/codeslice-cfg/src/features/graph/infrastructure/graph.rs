/*
 * Identity-keyed directed graph
 *
 * petgraph DiGraph plus a NodeId → NodeIndex map:
 * - O(1) node lookup by id
 * - O(1) duplicate-edge suppression through an edge-key set
 * - insertion-ordered node and edge iteration
 */

use crate::features::graph::domain::{EdgeKey, GraphEdge, GraphNode};
use crate::shared::models::NodeId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

/// Set of nodes plus set of edges, both deduplicated by identity
#[derive(Debug, Clone)]
pub struct Graph<N: GraphNode, E: GraphEdge> {
    graph: DiGraph<N, E>,
    node_map: FxHashMap<NodeId, NodeIndex>,
    edge_keys: FxHashSet<EdgeKey<E::Label>>,
}

impl<N: GraphNode, E: GraphEdge> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode, E: GraphEdge> Graph<N, E> {
    /// Create new empty graph
    pub fn new() -> Self {
        Graph {
            graph: DiGraph::new(),
            node_map: FxHashMap::default(),
            edge_keys: FxHashSet::default(),
        }
    }

    /// Add node; returns false when a node with the same id is present
    pub fn add_node(&mut self, node: N) -> bool {
        let id = node.id();
        if self.node_map.contains_key(&id) {
            return false;
        }
        let idx = self.graph.add_node(node);
        self.node_map.insert(id, idx);
        true
    }

    /// Add edge; returns false for duplicates and for missing endpoints
    pub fn add_edge(&mut self, edge: E) -> bool {
        let key = edge.key();
        if self.edge_keys.contains(&key) {
            return false;
        }
        let (Some(&from), Some(&to)) = (
            self.node_map.get(&key.source),
            self.node_map.get(&key.target),
        ) else {
            return false;
        };
        self.graph.add_edge(from, to, edge);
        self.edge_keys.insert(key);
        true
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    pub fn contains_edge(&self, edge: &E) -> bool {
        self.edge_keys.contains(&edge.key())
    }

    pub fn contains_edge_key(&self, source: NodeId, target: NodeId, label: E::Label) -> bool {
        self.edge_keys.contains(&EdgeKey::new(source, target, label))
    }

    /// Get node by id
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.node_map
            .get(&id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        let idx = *self.node_map.get(&id)?;
        self.graph.node_weight_mut(idx)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.graph.node_weights()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().map(|n| n.id())
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.graph.edge_weights()
    }

    /// Outgoing edges of a node; empty for unknown ids
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &E> + '_ {
        self.directed(id, Direction::Outgoing)
    }

    /// Incoming edges of a node; empty for unknown ids
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &E> + '_ {
        self.directed(id, Direction::Incoming)
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(id).map(|e| e.target())
    }

    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming(id).map(|e| e.source())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn directed(&self, id: NodeId, dir: Direction) -> impl Iterator<Item = &E> + '_ {
        self.node_map
            .get(&id)
            .into_iter()
            .flat_map(move |&idx| self.graph.edges_directed(idx, dir).map(|e| e.weight()))
    }
}

impl<N: GraphNode + Clone, E: GraphEdge + Clone> Graph<N, E> {
    /// Merge another graph's nodes and edges into this one
    ///
    /// Nodes and edges already present are skipped. Returns the number of
    /// edges actually added.
    pub fn append(&mut self, other: &Graph<N, E>) -> usize {
        for node in other.nodes() {
            self.add_node(node.clone());
        }
        other
            .edges()
            .filter(|edge| self.add_edge((*edge).clone()))
            .count()
    }
}
