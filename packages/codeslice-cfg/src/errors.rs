//! Error types for codeslice-cfg
//!
//! Only build-time operations return these. Graph queries never fail; they
//! answer with `None` or an empty set instead.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for CFG construction
#[derive(Debug, Error)]
pub enum CfgError {
    /// A declaration, type or method could not be bound by the front end
    #[error("Resolution error: cannot resolve '{name}': {reason}")]
    Resolution { name: String, reason: String },

    /// A per-kind builder failed for one declaration
    #[error("Build error in '{qualified_name}': {message}")]
    Build {
        qualified_name: String,
        message: String,
    },

    /// A built CFG exceeds the configured node limit
    #[error("CFG '{qualified_name}' has {nodes} nodes, limit is {max}")]
    Limit {
        qualified_name: String,
        nodes: usize,
        max: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CfgError {
    /// Create a resolution error
    pub fn resolution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CfgError::Resolution {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a build error
    pub fn build(qualified_name: impl Into<String>, message: impl Into<String>) -> Self {
        CfgError::Build {
            qualified_name: qualified_name.into(),
            message: message.into(),
        }
    }

    /// True for failures caused by missing bindings rather than a broken builder
    pub fn is_resolution(&self) -> bool {
        matches!(self, CfgError::Resolution { .. })
    }
}

/// Result type alias for CFG construction
pub type Result<T> = std::result::Result<T, CfgError>;
