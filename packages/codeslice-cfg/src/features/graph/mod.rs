//! Generic graph primitives
//!
//! Identity-keyed nodes and label-keyed edges over a petgraph backing store.
//! The flow graph and the call graph are both instances of [`Graph`].

pub mod domain;
pub mod infrastructure;

pub use domain::{EdgeKey, GraphEdge, GraphNode};
pub use infrastructure::Graph;
