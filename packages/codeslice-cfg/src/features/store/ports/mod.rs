//! Store Ports
//!
//! `CfgBuilder` is the seam to the front end. The store calls exactly one
//! of its methods per uncached declaration and hands over the session's
//! id allocator, which the builder passes on to `CfgAssembler`.

use crate::errors::Result;
use crate::features::flow_graph::{Cfg, ClassCfg};
use crate::features::store::domain::{Declaration, StoredCfg};
use crate::shared::models::IdAllocator;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Per-kind CFG construction, implemented by the front end
///
/// Errors are reported per declaration: a `CfgError::Resolution` for
/// bindings the front end could not resolve, `CfgError::Build` for
/// anything else. The store never aborts a batch on either.
pub trait CfgBuilder {
    /// Class CFG with all its member CFGs added
    ///
    /// Members found in `cached` should be added as they are
    /// (`ClassCfg::add_shared_member`); the store swaps in cached CFGs for
    /// any member rebuilt anyway.
    fn build_class(
        &mut self,
        decl: &Declaration,
        ids: &mut IdAllocator,
        cached: &CachedCfgs<'_>,
    ) -> Result<ClassCfg>;

    fn build_method(&mut self, decl: &Declaration, ids: &mut IdAllocator) -> Result<Cfg>;

    fn build_field(&mut self, decl: &Declaration, ids: &mut IdAllocator) -> Result<Cfg>;
}

/// Read-only view of the CFGs a session already holds
#[derive(Debug, Clone, Copy)]
pub struct CachedCfgs<'a> {
    cache: &'a FxHashMap<String, StoredCfg>,
}

impl<'a> CachedCfgs<'a> {
    pub(crate) fn new(cache: &'a FxHashMap<String, StoredCfg>) -> Self {
        CachedCfgs { cache }
    }

    /// Cached method or field CFG
    pub fn method(&self, qualified_name: &str) -> Option<Arc<Cfg>> {
        self.cache
            .get(qualified_name)
            .and_then(StoredCfg::as_method)
            .cloned()
    }

    /// Cached class CFG
    pub fn class(&self, qualified_name: &str) -> Option<Arc<ClassCfg>> {
        self.cache
            .get(qualified_name)
            .and_then(StoredCfg::as_class)
            .cloned()
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.cache.contains_key(qualified_name)
    }
}
