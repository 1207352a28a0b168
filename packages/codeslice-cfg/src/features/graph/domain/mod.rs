//! Graph domain traits
//!
//! Nodes are equal iff their ids are equal. Edges are equal iff their
//! endpoints and label are equal, so two parallel edges with different labels
//! between the same pair of nodes are distinct.

use crate::shared::models::NodeId;
use std::fmt::Debug;
use std::hash::Hash;

/// A node with a session-unique identity
pub trait GraphNode {
    fn id(&self) -> NodeId;
}

/// A directed edge between two identified nodes
pub trait GraphEdge {
    /// Discriminates parallel edges between the same endpoints
    type Label: Copy + Eq + Hash + Debug;

    fn source(&self) -> NodeId;
    fn target(&self) -> NodeId;
    fn label(&self) -> Self::Label;

    fn key(&self) -> EdgeKey<Self::Label> {
        EdgeKey {
            source: self.source(),
            target: self.target(),
            label: self.label(),
        }
    }
}

/// Identity of an edge inside a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey<L> {
    pub source: NodeId,
    pub target: NodeId,
    pub label: L,
}

impl<L> EdgeKey<L> {
    pub fn new(source: NodeId, target: NodeId, label: L) -> Self {
        Self {
            source,
            target,
            label,
        }
    }
}
