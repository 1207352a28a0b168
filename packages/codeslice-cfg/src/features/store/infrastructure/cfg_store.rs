/*
 * CfgStore - memoized CFG build session
 *
 * One store is one analysis session:
 * - owns the IdAllocator every builder call draws from
 * - caches at most one CFG per qualified name, class members included
 * - memoizes failures so a broken declaration is built once, not per request
 *
 * The store is not synchronized. Concurrent callers go through
 * `BuildCoordinator`.
 */

use crate::config::StoreConfig;
use crate::errors::{CfgError, Result};
use crate::features::flow_graph::{Cfg, ClassCfg, ClassMember};
use crate::features::store::domain::{
    Declaration, DeclarationKind, Diagnostic, DiagnosticKind, StoredCfg,
};
use crate::features::store::ports::{CachedCfgs, CfgBuilder};
use crate::shared::models::IdAllocator;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Build session: id allocator, CFG cache, failures and diagnostics
#[derive(Debug, Default)]
pub struct CfgStore {
    config: StoreConfig,
    ids: IdAllocator,
    cache: FxHashMap<String, StoredCfg>,
    failures: FxHashMap<String, Diagnostic>,
    diagnostics: Vec<Diagnostic>,
}

impl CfgStore {
    pub fn new(config: StoreConfig) -> Self {
        CfgStore {
            config,
            ..CfgStore::default()
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Cached CFG for `decl`, building it on first request
    ///
    /// A failed build is logged, recorded as a diagnostic and remembered;
    /// later requests for the same name return `None` without calling the
    /// builder again.
    pub fn get_cfg<B>(&mut self, decl: &Declaration, builder: &mut B) -> Option<StoredCfg>
    where
        B: CfgBuilder + ?Sized,
    {
        self.try_get_cfg(decl, builder).ok()
    }

    /// Like [`get_cfg`](Self::get_cfg), but surfaces the error
    ///
    /// A remembered failure is replayed as an error of the same category.
    pub fn try_get_cfg<B>(&mut self, decl: &Declaration, builder: &mut B) -> Result<StoredCfg>
    where
        B: CfgBuilder + ?Sized,
    {
        if let Some(cached) = self.cache.get(&decl.qualified_name) {
            debug!("CFG cache hit: {}", decl.qualified_name);
            return Ok(cached.clone());
        }
        if let Some(failure) = self.failures.get(&decl.qualified_name) {
            return Err(replay(failure));
        }

        match self.build(decl, builder) {
            Ok(stored) => {
                debug!(
                    "Built CFG for {} ({} nodes, {} edges)",
                    decl.qualified_name,
                    stored.flow_graph().node_count(),
                    stored.flow_graph().edge_count()
                );
                self.cache
                    .insert(decl.qualified_name.clone(), stored.clone());
                Ok(stored)
            }
            Err(e) => {
                self.record_failure(&decl.qualified_name, &e);
                Err(e)
            }
        }
    }

    fn build<B>(&mut self, decl: &Declaration, builder: &mut B) -> Result<StoredCfg>
    where
        B: CfgBuilder + ?Sized,
    {
        debug!("Building CFG for {}", decl);
        let stored = match decl.kind {
            DeclarationKind::Method => {
                let cfg = builder.build_method(decl, &mut self.ids)?;
                StoredCfg::Method(Arc::new(self.prepare_method(decl, cfg)?))
            }
            DeclarationKind::Field => {
                let cfg = builder.build_field(decl, &mut self.ids)?;
                StoredCfg::Method(Arc::new(self.prepare_method(decl, cfg)?))
            }
            DeclarationKind::Class => {
                let cached = CachedCfgs::new(&self.cache);
                let class = builder.build_class(decl, &mut self.ids, &cached)?;
                let class = Arc::new(self.prepare_class(decl, class)?);
                self.register_members(&class);
                StoredCfg::Class(class)
            }
        };
        Ok(stored)
    }

    fn prepare_method(&self, decl: &Declaration, mut cfg: Cfg) -> Result<Cfg> {
        check_name(decl, cfg.qualified_name())?;
        self.check_limit(decl, cfg.node_count())?;
        if self.config.compute_basic_blocks && !cfg.has_blocks() {
            cfg.compute_basic_blocks();
        }
        Ok(cfg)
    }

    fn prepare_class(&self, decl: &Declaration, mut class: ClassCfg) -> Result<ClassCfg> {
        check_name(decl, class.qualified_name())?;
        self.check_limit(decl, class.node_count())?;

        let cache = &self.cache;
        let adopted = class.adopt_members(&|name| cache.get(name).cloned().map(ClassMember::from));
        if adopted > 0 {
            debug!("{} reuses {} cached member CFGs", decl.qualified_name, adopted);
        }
        if self.config.compute_basic_blocks {
            class.compute_member_blocks();
        }
        Ok(class)
    }

    fn check_limit(&self, decl: &Declaration, nodes: usize) -> Result<()> {
        let max = self.config.max_nodes_per_cfg;
        if nodes <= max {
            return Ok(());
        }
        if self.config.strict {
            return Err(CfgError::Limit {
                qualified_name: decl.qualified_name.clone(),
                nodes,
                max,
            });
        }
        warn!(
            "CFG for {} has {} nodes, above the limit of {}",
            decl.qualified_name, nodes, max
        );
        Ok(())
    }

    /// Members, nested classes and their members become requestable under
    /// their own names
    ///
    /// Cached members were adopted by `prepare_class`, so a name already in
    /// the cache maps to the very CFG the class holds.
    fn register_members(&mut self, class: &ClassCfg) {
        for member in class.members() {
            let name = member.qualified_name().to_string();
            if !self.cache.contains_key(&name) {
                self.failures.remove(&name);
                self.cache.insert(name, StoredCfg::from(member.clone()));
            }
            if let ClassMember::Class(nested) = member {
                self.register_members(nested);
            }
        }
    }

    fn record_failure(&mut self, qualified_name: &str, error: &CfgError) {
        let (kind, message) = match error {
            CfgError::Resolution { reason, .. } => (DiagnosticKind::Resolution, reason.clone()),
            CfgError::Build { message, .. } => (DiagnosticKind::Build, message.clone()),
            CfgError::Limit { .. } => (DiagnosticKind::Limit, error.to_string()),
            CfgError::Config(e) => (DiagnosticKind::Build, e.to_string()),
        };
        warn!("Failed to build CFG for {}: {}", qualified_name, error);

        let diagnostic = Diagnostic {
            qualified_name: qualified_name.to_string(),
            kind,
            message,
        };
        self.failures
            .insert(qualified_name.to_string(), diagnostic.clone());
        self.diagnostics.push(diagnostic);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Cached CFG without building
    pub fn get(&self, qualified_name: &str) -> Option<&StoredCfg> {
        self.cache.get(qualified_name)
    }

    pub fn method_cfg(&self, qualified_name: &str) -> Option<&Arc<Cfg>> {
        self.get(qualified_name).and_then(StoredCfg::as_method)
    }

    pub fn class_cfg(&self, qualified_name: &str) -> Option<&Arc<ClassCfg>> {
        self.get(qualified_name).and_then(StoredCfg::as_class)
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.cache.contains_key(qualified_name)
    }

    /// Cached method and field CFGs, ordered by qualified name
    pub fn method_cfgs(&self) -> Vec<&Arc<Cfg>> {
        let mut cfgs: Vec<&Arc<Cfg>> = self.cache.values().filter_map(StoredCfg::as_method).collect();
        cfgs.sort_by(|a, b| a.qualified_name().cmp(b.qualified_name()));
        cfgs
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn failure(&self, qualified_name: &str) -> Option<&Diagnostic> {
        self.failures.get(qualified_name)
    }

    /// Every failure in the order it happened
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Allocator for builds that bypass the cache (e.g. synthetic CFGs)
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    // ═══════════════════════════════════════════════════════════════════
    // Teardown
    // ═══════════════════════════════════════════════════════════════════

    /// Restart id allocation at 1; drops every cached CFG with it so no
    /// two live graphs can share an id
    pub fn reset_id(&mut self) {
        debug!("Resetting ids, dropping {} cached CFGs", self.cache.len());
        self.cache.clear();
        self.ids.reset();
    }

    /// End the session: cache, failures, diagnostics and ids
    pub fn destroy(&mut self) {
        self.reset_id();
        self.failures.clear();
        self.diagnostics.clear();
    }
}

fn check_name(decl: &Declaration, built: &str) -> Result<()> {
    if built == decl.qualified_name {
        return Ok(());
    }
    Err(CfgError::build(
        &decl.qualified_name,
        format!("builder returned a CFG for '{built}'"),
    ))
}

fn replay(failure: &Diagnostic) -> CfgError {
    match failure.kind {
        DiagnosticKind::Resolution => CfgError::resolution(&failure.qualified_name, &failure.message),
        DiagnosticKind::Build | DiagnosticKind::Limit => {
            CfgError::build(&failure.qualified_name, &failure.message)
        }
    }
}
