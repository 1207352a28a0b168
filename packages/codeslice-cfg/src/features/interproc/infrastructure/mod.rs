//! Interprocedural Infrastructure

mod linkage;

pub use linkage::{link_call, InterproceduralGraph};
