//! Reachability and post-dominance over lowered fixture methods

#[path = "../common/mod.rs"]
mod common;

use codeslice_cfg::config::ReachabilityConfig;
use codeslice_cfg::{CfgNode, NodeId, PostDominatorCache};
use common::*;
use pretty_assertions::assert_eq;

fn merge_of(cfg: &codeslice_cfg::Cfg) -> NodeId {
    cfg.nodes()
        .find(|n| n.is_merge())
        .map(CfgNode::id)
        .expect("if/else lowers to a merge node")
}

// ═══════════════════════════════════════════════════════════════════════════
// Branch / merge
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_branch_forward_reaches_both_arms() {
    let cfg = fixture_method("Branch.m()");
    let (guard, then_arm, else_arm, tail) = (node_at(&cfg, 7), node_at(&cfg, 8), node_at(&cfg, 10), node_at(&cfg, 12));
    let merge = merge_of(&cfg);

    let reached = cfg.forward_reachable_nodes(guard, false, |_| false);
    assert_eq!(
        sorted(&reached),
        sorted(&node_set(&[guard, then_arm, else_arm, merge, tail, cfg.end()]))
    );

    let stopped = cfg.forward_reachable_nodes(guard, false, |n| n.is_merge());
    assert_eq!(sorted(&stopped), sorted(&node_set(&[guard, then_arm, else_arm])));
}

#[test]
fn test_branch_backward_and_between() {
    let cfg = fixture_method("Branch.m()");
    let (guard, then_arm, else_arm, tail) = (node_at(&cfg, 7), node_at(&cfg, 8), node_at(&cfg, 10), node_at(&cfg, 12));
    let merge = merge_of(&cfg);

    let back = cfg.backward_reachable_between(tail, guard, false);
    assert_eq!(sorted(&back), sorted(&node_set(&[tail, merge, then_arm, else_arm, guard])));

    let on_path = cfg.reachable_nodes(guard, tail, false);
    assert_eq!(on_path, back);

    // the else arm is not on any path from the then arm
    assert!(!cfg.reachable_nodes(then_arm, tail, false).contains(&else_arm));
}

#[test]
fn test_branch_post_dominators() {
    let cfg = fixture_method("Branch.m()");
    let (guard, then_arm, tail) = (node_at(&cfg, 7), node_at(&cfg, 8), node_at(&cfg, 12));
    let merge = merge_of(&cfg);

    assert_eq!(sorted(&cfg.post_dominator(guard)), sorted(&node_set(&[merge, tail])));
    assert_eq!(cfg.immediate_post_dominator(guard), Some(merge));
    assert!(!cfg.post_dominates(guard, then_arm));
    assert!(cfg.post_dominates(then_arm, merge));
    assert!(!cfg.post_dominator(guard).contains(&cfg.end()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Loop
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_loop_back_edges_are_optional() {
    let cfg = fixture_method("Loop.sum(int)");
    let (header, body, incr, ret) = (node_at(&cfg, 7), node_at(&cfg, 8), node_at(&cfg, 9), node_at(&cfg, 11));
    let slot = cfg
        .method_entry()
        .and_then(|m| m.formal_out_for_return)
        .expect("int method has a return slot");

    assert!(cfg.is_loop(header));
    assert!(cfg.is_branch(header));

    let forward = cfg.forward_reachable_nodes(header, false, |_| false);
    assert_eq!(
        sorted(&forward),
        sorted(&node_set(&[header, body, incr, ret, slot, cfg.end()]))
    );

    let without = cfg.backward_reachable_nodes(header, false, |_| false);
    let with = cfg.backward_reachable_nodes(header, true, |_| false);
    assert!(!without.contains(&incr));
    assert!(with.contains(&incr) && with.contains(&body));
    assert_eq!(with.len(), without.len() + 2);
}

#[test]
fn test_loop_post_dominators_follow_back_edge() {
    let cfg = fixture_method("Loop.sum(int)");
    let (header, body, incr, ret) = (node_at(&cfg, 7), node_at(&cfg, 8), node_at(&cfg, 9), node_at(&cfg, 11));
    let slot = cfg
        .method_entry()
        .and_then(|m| m.formal_out_for_return)
        .expect("int method has a return slot");

    assert_eq!(
        sorted(&cfg.post_dominator(body)),
        sorted(&node_set(&[header, incr, ret, slot]))
    );
    assert_eq!(cfg.immediate_post_dominator(body), Some(incr));
    // the body is skipped when the guard is false on entry
    assert!(!cfg.post_dominates(header, body));
}

#[test]
fn test_constrained_reachable_nodes_in_loop() {
    let cfg = fixture_method("Loop.sum(int)");
    let (header, body, incr, ret) = (node_at(&cfg, 7), node_at(&cfg, 8), node_at(&cfg, 9), node_at(&cfg, 11));

    let constrained = cfg.constrained_reachable_nodes(header, ret);
    assert_eq!(sorted(&constrained), sorted(&node_set(&[header, body, incr, ret])));
}

#[test]
fn test_unknown_origin_yields_empty_set() {
    let cfg = fixture_method("Simple.m()");
    assert!(cfg.forward_reachable_nodes(NodeId::new(999), true, |_| false).is_empty());
    assert!(cfg.post_dominator(NodeId::new(999)).is_empty());
    assert_eq!(cfg.immediate_post_dominator(cfg.end()), None);
}

#[test]
fn test_post_dominator_cache_matches_direct_query() {
    let cfg = fixture_method("Loop.sum(int)");
    let config = ReachabilityConfig::default().memoize_post_dominators(true);
    let mut cache = PostDominatorCache::new(&config);
    assert!(cache.is_enabled());

    for id in cfg.node_ids() {
        let cached = cache.post_dominator(&cfg, id);
        assert_eq!(*cached, cfg.post_dominator(id), "post-dominators of {id}");
    }
    let again = cache.post_dominator(&cfg, node_at(&cfg, 8));
    assert_eq!(again.len(), 4);

    let (hits, misses) = cache.stats();
    assert_eq!(hits, 1);
    assert_eq!(misses, cfg.node_count() as u64);
}
