//! Control flow edges

use super::kinds::FlowKind;
use crate::features::graph::GraphEdge;
use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Control flow edge
///
/// `loopback` names the loop header the edge closes back to; an edge with a
/// loopback is a back edge. Equality ignores it: endpoints and kind decide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlFlow {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: FlowKind,
    pub loopback: Option<NodeId>,
}

impl ControlFlow {
    pub fn new(source: NodeId, target: NodeId, kind: FlowKind) -> Self {
        ControlFlow {
            source,
            target,
            kind,
            loopback: None,
        }
    }

    pub fn fall_through(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, FlowKind::FallThrough)
    }

    pub fn true_flow(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, FlowKind::True)
    }

    pub fn false_flow(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, FlowKind::False)
    }

    /// Mark as the back edge closing the loop headed by `header`
    pub fn with_loopback(mut self, header: NodeId) -> Self {
        self.loopback = Some(header);
        self
    }

    pub fn is_loopback(&self) -> bool {
        self.loopback.is_some()
    }

    pub fn is_control(&self) -> bool {
        self.kind.is_control()
    }
}

impl PartialEq for ControlFlow {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target && self.kind == other.kind
    }
}

impl Eq for ControlFlow {}

impl Hash for ControlFlow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.kind.hash(state);
    }
}

impl GraphEdge for ControlFlow {
    type Label = FlowKind;

    fn source(&self) -> NodeId {
        self.source
    }

    fn target(&self) -> NodeId {
        self.target
    }

    fn label(&self) -> FlowKind {
        self.kind
    }
}
