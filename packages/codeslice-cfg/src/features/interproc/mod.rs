//! Interprocedural linkage
//!
//! Connects call sites to callee CFGs through call and parameter edges,
//! aligning actual and formal parameters by ordinal.

pub mod domain;
pub mod infrastructure;

pub use domain::{CallLink, UnresolvedCall};
pub use infrastructure::{link_call, InterproceduralGraph};
