//! Control flow graphs
//!
//! Node and edge taxonomy, per-declaration containers (`FlowGraph`, `Cfg`,
//! `ClassCfg`), construction through `CfgAssembler`, and the reachability,
//! post-dominance and basic-block queries dependence-graph builders rely on.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    BasicBlock, BlockId, CallKind, Cfg, CfgEntry, CfgExit, CfgMethodCall, CfgNode, CfgParameter,
    CfgStatement, ClassCfg, ClassEntry, ClassMember, ControlFlow, DeclKind, EntryDetail,
    FlowGraph, FlowGraphDto, FlowKind, MethodEntry, NodeData, NodeKind, ParameterKind,
    PdgNodeRef, StatementKind,
};
pub use infrastructure::{CfgAssembler, NodeSet, PostDominatorCache};
pub use ports::CommonCfg;
