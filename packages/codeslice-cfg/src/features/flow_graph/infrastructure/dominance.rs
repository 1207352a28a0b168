/*
 * Post-dominance over a FlowGraph
 *
 * `n` post-dominates `anchor` iff a forward walk from `anchor` (back edges
 * allowed) that stops at `n` meets `n` and never reaches the end node.
 * One walk per candidate: O(V·(V+E)) per anchor, recomputed per call.
 * `PostDominatorCache` memoizes whole sets per anchor when enabled.
 */

use super::reachability::{Direction, NodeSet};
use crate::config::ReachabilityConfig;
use crate::features::flow_graph::domain::FlowGraph;
use crate::shared::models::NodeId;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

impl FlowGraph {
    /// Post-dominators of `anchor`; never contains `anchor` or the end node
    pub fn post_dominator(&self, anchor: NodeId) -> NodeSet {
        if !self.contains(anchor) {
            return NodeSet::default();
        }
        self.node_ids()
            .filter(|&candidate| self.post_dominates(anchor, candidate))
            .collect()
    }

    /// True when every path from `anchor` to the end node passes `candidate`
    ///
    /// `candidate` must actually be reachable from `anchor`; the end node and
    /// `anchor` itself never qualify.
    pub fn post_dominates(&self, anchor: NodeId, candidate: NodeId) -> bool {
        let end = self.end();
        if candidate == anchor || candidate == end {
            return false;
        }
        let walk = self.walk(anchor, Direction::Forward, true, |n| n.id() == candidate);
        walk.stopped.contains(&candidate) && !walk.reached.contains(&end)
    }

    /// The post-dominator of `anchor` that all its other post-dominators
    /// post-dominate
    pub fn immediate_post_dominator(&self, anchor: NodeId) -> Option<NodeId> {
        let pdoms = self.post_dominator(anchor);
        self.node_ids()
            .filter(|id| pdoms.contains(id))
            .find(|&p| {
                pdoms
                    .iter()
                    .all(|&q| q == p || self.post_dominates(p, q))
            })
    }
}

/// LRU memo of post-dominator sets, keyed by (CFG name, anchor)
///
/// Owned by the caller; CFGs are immutable once built so entries never go
/// stale within a session.
pub struct PostDominatorCache {
    cache: Option<LruCache<(String, NodeId), Arc<NodeSet>>>,
    hits: u64,
    misses: u64,
}

impl PostDominatorCache {
    pub fn new(config: &ReachabilityConfig) -> Self {
        let cache = config.memoize_post_dominators.then(|| {
            let capacity =
                NonZeroUsize::new(config.post_dominator_cache_capacity).unwrap_or(NonZeroUsize::MIN);
            LruCache::new(capacity)
        });
        PostDominatorCache {
            cache,
            hits: 0,
            misses: 0,
        }
    }

    pub fn post_dominator(&mut self, flow: &FlowGraph, anchor: NodeId) -> Arc<NodeSet> {
        let Some(cache) = self.cache.as_mut() else {
            self.misses += 1;
            return Arc::new(flow.post_dominator(anchor));
        };

        let key = (flow.qualified_name().to_string(), anchor);
        if let Some(set) = cache.get(&key) {
            self.hits += 1;
            return Arc::clone(set);
        }

        self.misses += 1;
        let set = Arc::new(flow.post_dominator(anchor));
        cache.put(key, Arc::clone(&set));
        set
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
        self.hits = 0;
        self.misses = 0;
    }
}
