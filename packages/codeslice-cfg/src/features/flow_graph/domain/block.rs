//! Basic blocks

use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};

/// Index of a block within its CFG
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Group of nodes entered only through its leader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    leader: NodeId,
    nodes: Vec<NodeId>,
}

impl BasicBlock {
    pub fn new(id: BlockId, leader: NodeId) -> Self {
        BasicBlock {
            id,
            leader,
            nodes: vec![leader],
        }
    }

    pub(crate) fn push(&mut self, node: NodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn leader(&self) -> NodeId {
        self.leader
    }

    pub fn is_leader(&self, node: NodeId) -> bool {
        self.leader == node
    }

    /// Members, leader first, then in flow order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
