/*
 * Call Graph
 *
 * Nodes are method entries; an edge per (caller, callee, call site), so a
 * method calling another twice has two parallel edges. `append` merges
 * another call graph, deduplicating nodes by entry id and edges by key.
 */

use crate::features::call_graph::domain::{CallEdge, CallGraphNode};
use crate::features::graph::Graph;
use crate::features::interproc::{CallLink, InterproceduralGraph};
use crate::shared::models::NodeId;
use rustc_hash::FxHashSet;

/// Method-level call graph
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: Graph<CallGraphNode, CallEdge>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_interprocedural(interproc: &InterproceduralGraph) -> Self {
        let mut graph = CallGraph::new();
        for link in interproc.links() {
            graph.add_link(link);
        }
        graph
    }

    /// Add the caller, the callee and the edge between them; false when
    /// the edge was already present
    pub fn add_link(&mut self, link: &CallLink) -> bool {
        self.graph.add_node(CallGraphNode {
            entry: link.caller_entry,
            qualified_name: link.caller.clone(),
        });
        self.graph.add_node(CallGraphNode {
            entry: link.callee_entry,
            qualified_name: link.callee.clone(),
        });
        self.graph.add_edge(CallEdge {
            caller: link.caller_entry,
            callee: link.callee_entry,
            call_site: link.call_site,
        })
    }

    /// Merge `other` into this graph; returns the number of new edges
    pub fn append(&mut self, other: &CallGraph) -> usize {
        self.graph.append(&other.graph)
    }

    pub fn node(&self, entry: NodeId) -> Option<&CallGraphNode> {
        self.graph.node(entry)
    }

    pub fn node_by_name(&self, qualified_name: &str) -> Option<&CallGraphNode> {
        self.graph
            .nodes()
            .find(|n| n.qualified_name == qualified_name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CallGraphNode> + '_ {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> + '_ {
        self.graph.edges()
    }

    /// Distinct direct callees of `entry`
    pub fn callees(&self, entry: NodeId) -> Vec<&CallGraphNode> {
        self.distinct(self.graph.successors(entry))
    }

    /// Distinct direct callers of `entry`
    pub fn callers(&self, entry: NodeId) -> Vec<&CallGraphNode> {
        self.distinct(self.graph.predecessors(entry))
    }

    fn distinct(&self, ids: impl Iterator<Item = NodeId>) -> Vec<&CallGraphNode> {
        let mut seen = FxHashSet::default();
        ids.filter(|id| seen.insert(*id))
            .filter_map(|id| self.graph.node(id))
            .collect()
    }

    /// Every method reachable through calls from `entry`
    ///
    /// `entry` itself is included only when it is (mutually) recursive.
    pub fn transitive_callees(&self, entry: NodeId) -> FxHashSet<NodeId> {
        let mut reached = FxHashSet::default();
        let mut stack: Vec<NodeId> = self.graph.successors(entry).collect();
        while let Some(current) = stack.pop() {
            if reached.insert(current) {
                stack.extend(self.graph.successors(current));
            }
        }
        reached
    }

    /// Methods nobody calls
    pub fn entry_points(&self) -> Vec<&CallGraphNode> {
        self.graph
            .nodes()
            .filter(|n| self.graph.predecessors(n.entry).next().is_none())
            .collect()
    }

    /// Methods that call nothing
    pub fn leaves(&self) -> Vec<&CallGraphNode> {
        self.graph
            .nodes()
            .filter(|n| self.graph.successors(n.entry).next().is_none())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}
