//! CFG store
//!
//! Memoized, per-session construction of CFGs keyed by qualified name,
//! plus the coordinator concurrent callers share.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::BuildCoordinator;
pub use domain::{Declaration, DeclarationKind, Diagnostic, DiagnosticKind, StoredCfg};
pub use infrastructure::CfgStore;
pub use ports::{CachedCfgs, CfgBuilder};
