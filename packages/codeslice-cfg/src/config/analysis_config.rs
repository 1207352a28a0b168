//! Analysis configuration
//!
//! One YAML document (schema version 1) with a section per consumer:
//!
//! ```yaml
//! version: 1
//! store:
//!   max_nodes_per_cfg: 50000
//!   compute_basic_blocks: true
//!   strict: false
//! reachability:
//!   memoize_post_dominators: true
//!   post_dominator_cache_capacity: 512
//! linkage:
//!   link_unresolved: false
//!   warn_on_arity_mismatch: true
//! ```
//!
//! Every section and field is optional; missing ones take their defaults.

use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Only schema version understood by this crate
pub const CONFIG_VERSION: u32 = 1;

/// Top-level configuration for one analysis session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub version: u32,
    pub store: StoreConfig,
    pub reachability: ReachabilityConfig,
    pub linkage: LinkageConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            store: StoreConfig::default(),
            reachability: ReachabilityConfig::default(),
            linkage: LinkageConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: vec![CONFIG_VERSION],
            });
        }
        self.store.validate()?;
        self.reachability.validate()?;
        Ok(())
    }

    /// Builder: Replace the store section
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Builder: Replace the reachability section
    pub fn reachability(mut self, reachability: ReachabilityConfig) -> Self {
        self.reachability = reachability;
        self
    }

    /// Builder: Replace the linkage section
    pub fn linkage(mut self, linkage: LinkageConfig) -> Self {
        self.linkage = linkage;
        self
    }
}

/// CFG store behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum nodes per built CFG (1..=1_000_000)
    pub max_nodes_per_cfg: usize,

    /// Partition method CFGs into basic blocks when the builder did not
    pub compute_basic_blocks: bool,

    /// Reject CFGs over the node limit instead of warning
    pub strict: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_nodes_per_cfg: 100_000,
            compute_basic_blocks: true,
            strict: false,
        }
    }
}

impl StoreConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_nodes_per_cfg == 0 || self.max_nodes_per_cfg > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "store.max_nodes_per_cfg",
                self.max_nodes_per_cfg,
                1,
                1_000_000,
                "A CFG holds at least its entry node",
            ));
        }
        Ok(())
    }

    /// Builder: Set max_nodes_per_cfg
    pub fn max_nodes_per_cfg(mut self, v: usize) -> Self {
        self.max_nodes_per_cfg = v;
        self
    }

    /// Builder: Set compute_basic_blocks
    pub fn compute_basic_blocks(mut self, v: bool) -> Self {
        self.compute_basic_blocks = v;
        self
    }

    /// Builder: Set strict
    pub fn strict(mut self, v: bool) -> Self {
        self.strict = v;
        self
    }
}

/// Reachability and dominance query behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachabilityConfig {
    /// Memoize post-dominator sets per anchor
    pub memoize_post_dominators: bool,

    /// LRU capacity of the post-dominator cache (1..=65_536)
    pub post_dominator_cache_capacity: usize,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            memoize_post_dominators: false,
            post_dominator_cache_capacity: 1024,
        }
    }
}

impl ReachabilityConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.post_dominator_cache_capacity == 0 || self.post_dominator_cache_capacity > 65_536 {
            return Err(ConfigError::range_with_hint(
                "reachability.post_dominator_cache_capacity",
                self.post_dominator_cache_capacity,
                1,
                65_536,
                "Disable memoize_post_dominators instead of using a zero capacity",
            ));
        }
        Ok(())
    }

    /// Builder: Set memoize_post_dominators
    pub fn memoize_post_dominators(mut self, v: bool) -> Self {
        self.memoize_post_dominators = v;
        self
    }

    /// Builder: Set post_dominator_cache_capacity
    pub fn post_dominator_cache_capacity(mut self, v: usize) -> Self {
        self.post_dominator_cache_capacity = v;
        self
    }
}

/// Interprocedural linkage behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkageConfig {
    /// Record call sites whose callee has no cached CFG instead of only counting them
    pub link_unresolved: bool,

    /// Log a warning when actual and formal arities differ
    pub warn_on_arity_mismatch: bool,
}

impl Default for LinkageConfig {
    fn default() -> Self {
        Self {
            link_unresolved: false,
            warn_on_arity_mismatch: true,
        }
    }
}

impl LinkageConfig {
    /// Builder: Set link_unresolved
    pub fn link_unresolved(mut self, v: bool) -> Self {
        self.link_unresolved = v;
        self
    }

    /// Builder: Set warn_on_arity_mismatch
    pub fn warn_on_arity_mismatch(mut self, v: bool) -> Self {
        self.warn_on_arity_mismatch = v;
        self
    }
}
