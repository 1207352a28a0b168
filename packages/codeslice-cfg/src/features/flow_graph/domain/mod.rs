mod block;
mod cfg;
mod edge;
mod flow_graph;
mod kinds;
mod node;

pub use block::{BasicBlock, BlockId};
pub use cfg::{Cfg, ClassCfg, ClassMember};
pub use edge::ControlFlow;
pub use flow_graph::{FlowGraph, FlowGraphDto};
pub use kinds::{CallKind, DeclKind, FlowKind, NodeKind, ParameterKind, StatementKind};
pub use node::{
    CfgEntry, CfgExit, CfgMethodCall, CfgNode, CfgParameter, CfgStatement, ClassEntry,
    EntryDetail, MethodEntry, NodeData, PdgNodeRef,
};
