//! Call Graph Domain Models

use crate::features::graph::{GraphEdge, GraphNode};
use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};

/// A method, identified by its entry node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallGraphNode {
    pub entry: NodeId,
    pub qualified_name: String,
}

impl GraphNode for CallGraphNode {
    fn id(&self) -> NodeId {
        self.entry
    }
}

/// Caller entry → callee entry, one edge per call site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller: NodeId,
    pub callee: NodeId,
    pub call_site: NodeId,
}

impl GraphEdge for CallEdge {
    type Label = NodeId;

    fn source(&self) -> NodeId {
        self.caller
    }

    fn target(&self) -> NodeId {
        self.callee
    }

    fn label(&self) -> NodeId {
        self.call_site
    }
}
