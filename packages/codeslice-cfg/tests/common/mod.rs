//! Common test utilities for codeslice-cfg
//!
//! This module provides a small declarative program model, a front end
//! that lowers it through `CfgAssembler`, a reference dependence builder
//! and backward slicer, and shared assertions.

#![allow(dead_code)]

mod fixtures;

// Re-export all utilities; each test binary uses a different subset
#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use slicer::*;
