//! Call Graph Infrastructure

mod call_graph;

pub use call_graph::CallGraph;
