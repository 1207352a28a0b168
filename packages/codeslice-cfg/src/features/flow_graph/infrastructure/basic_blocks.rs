//! Basic block partition of a method CFG
//!
//! Leaders:
//! - the start node
//! - every node without exactly one control predecessor
//! - every control successor of a branch
//! - every loop-back target and every exception-catch target
//!
//! A block grows from its leader along single-successor chains until it
//! meets another leader. Nodes left over (parameter nodes hanging off the
//! entry, unreachable fragments) become singleton blocks.

use crate::features::flow_graph::domain::{BasicBlock, BlockId, Cfg, CfgNode, FlowGraph, FlowKind};
use crate::shared::models::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};

impl Cfg {
    /// Partition the nodes into basic blocks, replacing any previous
    /// partition; returns the number of blocks
    pub fn compute_basic_blocks(&mut self) -> usize {
        let blocks = partition(self);

        let mut membership: FxHashMap<NodeId, BlockId> = FxHashMap::default();
        for block in &blocks {
            for &node in block.nodes() {
                membership.insert(node, block.id);
            }
        }

        let ids: Vec<NodeId> = self.node_ids().collect();
        let flow = self.flow_mut();
        for id in ids {
            if let Some(node) = flow.node_mut(id) {
                node.set_block(membership.get(&id).copied());
            }
        }

        let count = blocks.len();
        self.set_blocks(blocks);
        count
    }
}

fn leaders(flow: &FlowGraph) -> FxHashSet<NodeId> {
    let mut leaders = FxHashSet::default();
    leaders.insert(flow.start());

    for id in flow.node_ids() {
        if flow.control_predecessors(id).count() != 1 {
            leaders.insert(id);
        }
        if flow.is_branch(id) {
            leaders.extend(flow.control_successors(id));
        }
    }

    for edge in flow.edges() {
        if edge.is_loopback() || edge.kind == FlowKind::ExceptionCatch {
            leaders.insert(edge.target);
        }
    }
    if let Some(method) = flow.start_node().and_then(CfgNode::as_method_entry) {
        leaders.extend(method.exceptions.iter().copied());
    }
    leaders
}

fn partition(flow: &FlowGraph) -> Vec<BasicBlock> {
    let leaders = leaders(flow);
    let mut assigned: FxHashSet<NodeId> = FxHashSet::default();
    let mut blocks: Vec<BasicBlock> = Vec::new();

    // start first, then the remaining leaders in creation order
    let ordered = std::iter::once(flow.start())
        .chain(flow.node_ids().filter(|&id| id != flow.start() && leaders.contains(&id)));

    for leader in ordered {
        if !flow.contains(leader) || !assigned.insert(leader) {
            continue;
        }
        let mut block = BasicBlock::new(BlockId(blocks.len() as u32), leader);

        let mut current = leader;
        loop {
            let mut succs = flow.control_successors(current);
            let (Some(next), None) = (succs.next(), succs.next()) else {
                break;
            };
            if leaders.contains(&next) || !assigned.insert(next) {
                break;
            }
            block.push(next);
            current = next;
        }
        blocks.push(block);
    }

    for id in flow.node_ids() {
        if assigned.insert(id) {
            blocks.push(BasicBlock::new(BlockId(blocks.len() as u32), id));
        }
    }

    blocks
}
