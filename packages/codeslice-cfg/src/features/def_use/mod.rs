//! Def/Use reference model
//!
//! Per-statement defined and used references, consumed by the data
//! dependence computation downstream.

pub mod domain;

pub use domain::{
    DefUse, JFieldReference, JLocalReference, JMethodReference, JReference, ReferenceKind,
    ReferenceList,
};
