//! Configuration System
//!
//! A single versioned YAML document configures one analysis session.
//!
//! # Examples
//!
//! ```rust,ignore
//! use codeslice_cfg::config::{AnalysisConfig, ReachabilityConfig};
//!
//! let config = AnalysisConfig::default()
//!     .reachability(ReachabilityConfig::default().memoize_post_dominators(true));
//!
//! let config = AnalysisConfig::from_yaml("analysis.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;

// Re-exports
pub use analysis_config::{
    AnalysisConfig, LinkageConfig, ReachabilityConfig, StoreConfig, CONFIG_VERSION,
};
pub use error::{ConfigError, ConfigResult};
