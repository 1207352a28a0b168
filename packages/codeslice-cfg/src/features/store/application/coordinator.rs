//! Build Coordinator
//!
//! Serializes access to one `CfgStore` so several threads can request CFGs
//! from the same session without ever handing out the same node id twice.
//!
//! Thread Safety:
//! - Uses `parking_lot::Mutex`; every build holds the lock for its whole
//!   duration, so id allocation and the check-then-insert on the cache are
//!   one critical section
//! - Returned CFGs are `Arc`s and can be queried without the lock

use crate::errors::Result;
use crate::features::store::domain::{Declaration, Diagnostic, StoredCfg};
use crate::features::store::infrastructure::CfgStore;
use crate::features::store::ports::CfgBuilder;
use parking_lot::Mutex;

/// Shared entry point to one build session
#[derive(Debug, Default)]
pub struct BuildCoordinator {
    store: Mutex<CfgStore>,
}

impl BuildCoordinator {
    pub fn new(store: CfgStore) -> Self {
        BuildCoordinator {
            store: Mutex::new(store),
        }
    }

    /// See [`CfgStore::get_cfg`]
    pub fn get_cfg<B>(&self, decl: &Declaration, builder: &mut B) -> Option<StoredCfg>
    where
        B: CfgBuilder + ?Sized,
    {
        self.store.lock().get_cfg(decl, builder)
    }

    /// See [`CfgStore::try_get_cfg`]
    pub fn try_get_cfg<B>(&self, decl: &Declaration, builder: &mut B) -> Result<StoredCfg>
    where
        B: CfgBuilder + ?Sized,
    {
        self.store.lock().try_get_cfg(decl, builder)
    }

    /// Cached CFG without building
    pub fn get(&self, qualified_name: &str) -> Option<StoredCfg> {
        self.store.lock().get(qualified_name).cloned()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.store.lock().diagnostics().to_vec()
    }

    /// Run `f` against the store under the lock
    pub fn with_store<R>(&self, f: impl FnOnce(&CfgStore) -> R) -> R {
        f(&self.store.lock())
    }

    pub fn with_store_mut<R>(&self, f: impl FnOnce(&mut CfgStore) -> R) -> R {
        f(&mut self.store.lock())
    }

    pub fn reset_id(&self) {
        self.store.lock().reset_id();
    }

    pub fn destroy(&self) {
        self.store.lock().destroy();
    }

    pub fn into_inner(self) -> CfgStore {
        self.store.into_inner()
    }
}
