/*
 * Reachability over a FlowGraph
 *
 * Depth-first walks in either direction with:
 * - a stop predicate: matching nodes are not expanded and not reported
 * - loop-back control: with `loopback_ok == false`, back edges are never
 *   followed
 * - a track set so diamonds and non-back-edge cycles are visited once
 *
 * The origin of a walk is always reported and always expanded.
 */

use crate::features::flow_graph::domain::{CfgNode, ControlFlow, FlowGraph};
use crate::shared::models::NodeId;
use rustc_hash::FxHashSet;

/// Node set returned by every reachability query
pub type NodeSet = FxHashSet<NodeId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Outcome of one walk
#[derive(Debug, Default)]
pub(crate) struct Walk {
    /// Reported nodes (origin plus every expanded node)
    pub reached: NodeSet,
    /// Nodes the walk met but did not expand because of the stop predicate
    pub stopped: NodeSet,
}

impl FlowGraph {
    pub(crate) fn walk<F>(&self, from: NodeId, direction: Direction, loopback_ok: bool, stop: F) -> Walk
    where
        F: Fn(&CfgNode) -> bool,
    {
        let mut walk = Walk::default();
        if !self.contains(from) {
            return walk;
        }

        let mut track = NodeSet::default();
        let mut stack = vec![from];
        track.insert(from);
        walk.reached.insert(from);

        while let Some(current) = stack.pop() {
            let next_nodes: Vec<NodeId> = match direction {
                Direction::Forward => self
                    .outgoing_flows(current)
                    .filter(|e| loopback_ok || !e.is_loopback())
                    .map(|e: &ControlFlow| e.target)
                    .collect(),
                Direction::Backward => self
                    .incoming_flows(current)
                    .filter(|e| loopback_ok || !e.is_loopback())
                    .map(|e: &ControlFlow| e.source)
                    .collect(),
            };

            for next in next_nodes {
                if !track.insert(next) {
                    continue;
                }
                let Some(node) = self.node(next) else {
                    continue;
                };
                if stop(node) {
                    walk.stopped.insert(next);
                    continue;
                }
                walk.reached.insert(next);
                stack.push(next);
            }
        }

        walk
    }

    /// Nodes reachable from `from` along outgoing edges
    ///
    /// `from` is always included and expanded. Any other node matching `stop`
    /// is neither expanded nor included.
    pub fn forward_reachable_nodes<F>(&self, from: NodeId, loopback_ok: bool, stop: F) -> NodeSet
    where
        F: Fn(&CfgNode) -> bool,
    {
        self.walk(from, Direction::Forward, loopback_ok, stop).reached
    }

    /// Nodes reaching `from` along incoming edges
    pub fn backward_reachable_nodes<F>(&self, from: NodeId, loopback_ok: bool, stop: F) -> NodeSet
    where
        F: Fn(&CfgNode) -> bool,
    {
        self.walk(from, Direction::Backward, loopback_ok, stop).reached
    }

    /// Forward walk from `from` that stops at `to`; `to` is always included
    ///
    /// `from == to` yields the singleton `{from}`.
    pub fn forward_reachable_between(&self, from: NodeId, to: NodeId, loopback_ok: bool) -> NodeSet {
        self.range(from, to, Direction::Forward, loopback_ok)
    }

    /// Backward walk from `from` that stops at `to`; `to` is always included
    pub fn backward_reachable_between(&self, from: NodeId, to: NodeId, loopback_ok: bool) -> NodeSet {
        self.range(from, to, Direction::Backward, loopback_ok)
    }

    fn range(&self, from: NodeId, to: NodeId, direction: Direction, loopback_ok: bool) -> NodeSet {
        let mut set = NodeSet::default();
        if from == to {
            set.insert(from);
            return set;
        }
        set = self.walk(from, direction, loopback_ok, |n| n.id() == to).reached;
        set.insert(to);
        set
    }

    /// Nodes lying on some path from `from` to `to`
    pub fn reachable_nodes(&self, from: NodeId, to: NodeId, loopback_ok: bool) -> NodeSet {
        let forward = self.forward_reachable_between(from, to, loopback_ok);
        let backward = self.backward_reachable_between(to, from, loopback_ok);
        forward.intersection(&backward).copied().collect()
    }

    /// Nodes whose execution is constrained by reaching `from` and by
    /// reaching `to`
    ///
    /// `(fwd(from → end) ∩ bwd(to → from)) ∪ (fwd(from → to) ∩ bwd(to → start))`,
    /// all walks with back edges allowed.
    pub fn constrained_reachable_nodes(&self, from: NodeId, to: NodeId) -> NodeSet {
        let (start, end) = (self.start(), self.end());

        let fwd_to_end = self.forward_reachable_between(from, end, true);
        let bwd_to_from = self.backward_reachable_between(to, from, true);
        let fwd_to_to = self.forward_reachable_between(from, to, true);
        let bwd_to_start = self.backward_reachable_between(to, start, true);

        let mut set: NodeSet = fwd_to_end.intersection(&bwd_to_from).copied().collect();
        set.extend(fwd_to_to.intersection(&bwd_to_start).copied());
        set
    }
}
