//! Flow Graph Ports
//!
//! `CommonCfg` is what the dependence-graph collaborator programs against:
//! method and class CFGs both expose their underlying `FlowGraph`.

use crate::features::flow_graph::domain::{CfgNode, FlowGraph};
use crate::shared::models::NodeId;

/// Per-declaration graph surface shared by `Cfg` and `ClassCfg`
pub trait CommonCfg {
    fn flow_graph(&self) -> &FlowGraph;

    fn qualified_name(&self) -> &str {
        self.flow_graph().qualified_name()
    }

    fn start_node(&self) -> Option<&CfgNode> {
        self.flow_graph().start_node()
    }

    fn end_node(&self) -> Option<&CfgNode> {
        self.flow_graph().end_node()
    }

    fn node(&self, id: NodeId) -> Option<&CfgNode> {
        self.flow_graph().node(id)
    }
}
