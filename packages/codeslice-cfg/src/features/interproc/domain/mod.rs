//! Interprocedural Domain Models

use crate::features::flow_graph::ControlFlow;
use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};

/// Linkage of one call site to one callee CFG
///
/// Edges cross two CFGs, so they live here rather than in either graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLink {
    /// Qualified name of the calling CFG
    pub caller: String,
    pub caller_entry: NodeId,
    pub call_site: NodeId,
    /// Qualified name of the callee CFG
    pub callee: String,
    pub callee_entry: NodeId,
    /// `MethodCall` edge from the call site to the callee start
    pub call_edge: ControlFlow,
    /// `Parameter` edges: actual-in → formal-in, formal-out → actual-out,
    /// return formal-out → return actual-out
    pub parameter_edges: Vec<ControlFlow>,
    /// (actual-ins, formal-ins) when the counts differ
    pub arity_mismatch: Option<(usize, usize)>,
}

impl CallLink {
    pub fn edges(&self) -> impl Iterator<Item = &ControlFlow> + '_ {
        std::iter::once(&self.call_edge).chain(self.parameter_edges.iter())
    }

    pub fn is_aligned(&self) -> bool {
        self.arity_mismatch.is_none()
    }
}

/// Call site whose callee has no cached CFG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedCall {
    pub caller: String,
    pub call_site: NodeId,
    pub callee: String,
}
