/*
 * FlowGraph - node and edge set of one declaration
 *
 * Shared container behind method CFGs and class CFGs. Holds exactly one
 * start (entry) node and one end (exit) node. Reachability and dominance
 * live in infrastructure/; this file holds storage and navigation.
 *
 * Queries never fail: unknown ids give None or empty results.
 */

use super::edge::ControlFlow;
use super::kinds::{FlowKind, StatementKind};
use super::node::{CfgEntry, CfgNode};
use crate::features::graph::Graph;
use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};

/// Common CFG container
#[derive(Debug, Clone)]
pub struct FlowGraph {
    qualified_name: String,
    start: NodeId,
    end: NodeId,
    graph: Graph<CfgNode, ControlFlow>,
}

/// Serializable DTO for FlowGraph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowGraphDto {
    pub qualified_name: String,
    pub start: NodeId,
    pub end: NodeId,
    pub nodes: Vec<CfgNode>,
    pub edges: Vec<ControlFlow>,
}

impl Serialize for FlowGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_dto().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlowGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let dto = FlowGraphDto::deserialize(deserializer)?;
        let mut flow = FlowGraph::empty(dto.qualified_name, dto.start, dto.end);
        for node in dto.nodes {
            flow.graph.add_node(node);
        }
        for edge in dto.edges {
            flow.graph.add_edge(edge);
        }
        Ok(flow)
    }
}

impl FlowGraph {
    /// Container with the given start and end ids and no nodes yet
    pub(crate) fn empty(qualified_name: String, start: NodeId, end: NodeId) -> Self {
        FlowGraph {
            qualified_name,
            start,
            end,
            graph: Graph::new(),
        }
    }

    pub fn to_dto(&self) -> FlowGraphDto {
        FlowGraphDto {
            qualified_name: self.qualified_name.clone(),
            start: self.start,
            end: self.end,
            nodes: self.graph.nodes().cloned().collect(),
            edges: self.graph.edges().cloned().collect(),
        }
    }

    /// Pretty JSON dump for diagnostics. PDG back-references are not included.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_dto())
    }

    pub(crate) fn add_node(&mut self, node: CfgNode) -> bool {
        self.graph.add_node(node)
    }

    pub(crate) fn add_edge(&mut self, edge: ControlFlow) -> bool {
        self.graph.add_edge(edge)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut CfgNode> {
        self.graph.node_mut(id)
    }

    pub(crate) fn graph(&self) -> &Graph<CfgNode, ControlFlow> {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut Graph<CfgNode, ControlFlow> {
        &mut self.graph
    }

    // ═══════════════════════════════════════════════════════════════════
    // Node/edge access
    // ═══════════════════════════════════════════════════════════════════

    /// Identity key: the start node's qualified name
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn start_node(&self) -> Option<&CfgNode> {
        self.graph.node(self.start)
    }

    pub fn end_node(&self) -> Option<&CfgNode> {
        self.graph.node(self.end)
    }

    pub fn entry(&self) -> Option<&CfgEntry> {
        self.start_node().and_then(CfgNode::as_entry)
    }

    pub fn node(&self, id: NodeId) -> Option<&CfgNode> {
        self.graph.node(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn contains_edge(&self, edge: &ControlFlow) -> bool {
        self.graph.contains_edge(edge)
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &CfgNode> + '_ {
        self.graph.nodes()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_ids()
    }

    pub fn edges(&self) -> impl Iterator<Item = &ControlFlow> + '_ {
        self.graph.edges()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Navigation
    // ═══════════════════════════════════════════════════════════════════

    pub fn outgoing_flows(&self, id: NodeId) -> impl Iterator<Item = &ControlFlow> + '_ {
        self.graph.outgoing(id)
    }

    pub fn incoming_flows(&self, id: NodeId) -> impl Iterator<Item = &ControlFlow> + '_ {
        self.graph.incoming(id)
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.successors(id)
    }

    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.predecessors(id)
    }

    /// Successors over intraprocedural control edges only
    pub fn control_successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing_flows(id)
            .filter(|e| e.is_control())
            .map(|e| e.target)
    }

    /// Predecessors over intraprocedural control edges only
    pub fn control_predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming_flows(id)
            .filter(|e| e.is_control())
            .map(|e| e.source)
    }

    pub fn flow_from(&self, id: NodeId, kind: FlowKind) -> Option<&ControlFlow> {
        self.outgoing_flows(id).find(|e| e.kind == kind)
    }

    pub fn true_flow_from(&self, id: NodeId) -> Option<&ControlFlow> {
        self.flow_from(id, FlowKind::True)
    }

    pub fn false_flow_from(&self, id: NodeId) -> Option<&ControlFlow> {
        self.flow_from(id, FlowKind::False)
    }

    pub fn true_successor(&self, id: NodeId) -> Option<&CfgNode> {
        self.true_flow_from(id).and_then(|e| self.node(e.target))
    }

    pub fn false_successor(&self, id: NodeId) -> Option<&CfgNode> {
        self.false_flow_from(id).and_then(|e| self.node(e.target))
    }

    /// More than one control successor
    pub fn is_branch(&self, id: NodeId) -> bool {
        self.control_successors(id).count() > 1
    }

    /// Loop statement, or target of a back edge
    pub fn is_loop(&self, id: NodeId) -> bool {
        let loop_statement = self
            .node(id)
            .and_then(CfgNode::as_statement)
            .map_or(false, |s| s.kind.is_loop());
        loop_statement || self.incoming_flows(id).any(|e| e.loopback == Some(id))
    }

    /// More than one control predecessor
    pub fn is_join(&self, id: NodeId) -> bool {
        self.control_predecessors(id).count() > 1
    }

    /// Some control predecessor is a branch
    pub fn is_next_to_branch(&self, id: NodeId) -> bool {
        self.control_predecessors(id).any(|p| self.is_branch(p))
    }

    pub fn has_try_statement(&self) -> bool {
        self.nodes()
            .any(|n| n.is_statement_kind(StatementKind::Try))
    }

    /// Call nodes in creation order
    pub fn call_nodes(&self) -> impl Iterator<Item = &CfgNode> + '_ {
        self.nodes().filter(|n| n.is_call())
    }

    /// Nodes whose source span contains (1-based line, 0-based column),
    /// narrowest span first
    pub fn nodes_at(&self, line: u32, column: u32) -> Vec<&CfgNode> {
        let mut hits: Vec<&CfgNode> = self
            .nodes()
            .filter(|n| n.span().map_or(false, |s| s.contains_position(line, column)))
            .collect();
        hits.sort_by_key(|n| {
            n.span()
                .map(|s| (s.line_count(), s.end_col.saturating_sub(s.start_col)))
        });
        hits
    }
}

impl PartialEq for FlowGraph {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for FlowGraph {}
