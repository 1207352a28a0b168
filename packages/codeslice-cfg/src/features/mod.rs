//! Feature modules
//!
//! Dependency order: graph → def_use → flow_graph → store → interproc →
//! call_graph. Each feature re-exports its public types at its root.

pub mod call_graph;
pub mod def_use;
pub mod flow_graph;
pub mod graph;
pub mod interproc;
pub mod store;
