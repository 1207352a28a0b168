//! Call graph
//!
//! Method-level view derived from interprocedural call links.

pub mod domain;
pub mod infrastructure;

pub use domain::{CallEdge, CallGraphNode};
pub use infrastructure::CallGraph;
