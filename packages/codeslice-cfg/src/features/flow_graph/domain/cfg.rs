//! Per-declaration CFG containers
//!
//! - [`Cfg`]: one method, constructor, initializer or field, plus its basic
//!   blocks.
//! - [`ClassCfg`]: one class-like declaration; its node and edge sets are
//!   the union of its members' plus the class entry and exit. Members are
//!   method/field CFGs or nested class CFGs.

use super::block::{BasicBlock, BlockId};
use super::edge::ControlFlow;
use super::flow_graph::FlowGraph;
use super::node::{CfgEntry, CfgNode, MethodEntry, NodeData, PdgNodeRef};
use crate::features::flow_graph::ports::CommonCfg;
use crate::shared::models::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

/// Method/field-level control flow graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cfg {
    flow: FlowGraph,
    blocks: Vec<BasicBlock>,
}

impl Cfg {
    pub fn new(flow: FlowGraph) -> Self {
        Cfg {
            flow,
            blocks: Vec::new(),
        }
    }

    pub(crate) fn flow_mut(&mut self) -> &mut FlowGraph {
        &mut self.flow
    }

    pub(crate) fn set_blocks(&mut self, blocks: Vec<BasicBlock>) {
        self.blocks = blocks;
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.0 as usize)
    }

    pub fn block_of(&self, node: NodeId) -> Option<&BasicBlock> {
        self.flow
            .node(node)
            .and_then(CfgNode::block)
            .and_then(|b| self.block(b))
    }

    /// Formal parameter shape; `None` for field CFGs
    pub fn method_entry(&self) -> Option<&MethodEntry> {
        self.flow.start_node().and_then(CfgNode::as_method_entry)
    }

    /// Link a node to its dependence-graph node; works on a shared CFG
    pub fn set_pdg_node(&self, node: NodeId, pdg: PdgNodeRef) -> bool {
        self.flow
            .node(node)
            .map_or(false, |n| n.set_pdg_node(pdg))
    }
}

impl Deref for Cfg {
    type Target = FlowGraph;

    fn deref(&self) -> &FlowGraph {
        &self.flow
    }
}

impl CommonCfg for Cfg {
    fn flow_graph(&self) -> &FlowGraph {
        &self.flow
    }
}

impl PartialEq for Cfg {
    fn eq(&self, other: &Self) -> bool {
        self.flow.qualified_name() == other.flow.qualified_name()
    }
}

impl Eq for Cfg {}

/// Member of a class CFG
#[derive(Debug, Clone)]
pub enum ClassMember {
    /// Method, constructor, initializer or field
    Method(Arc<Cfg>),
    /// Nested or inner class
    Class(Arc<ClassCfg>),
}

impl ClassMember {
    pub fn flow_graph(&self) -> &FlowGraph {
        match self {
            ClassMember::Method(cfg) => cfg.flow_graph(),
            ClassMember::Class(class) => class.flow_graph(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        self.flow_graph().qualified_name()
    }

    pub fn as_method(&self) -> Option<&Arc<Cfg>> {
        match self {
            ClassMember::Method(cfg) => Some(cfg),
            ClassMember::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassCfg>> {
        match self {
            ClassMember::Class(class) => Some(class),
            ClassMember::Method(_) => None,
        }
    }

    /// Same shared CFG, not merely the same name
    pub fn ptr_eq(&self, other: &ClassMember) -> bool {
        match (self, other) {
            (ClassMember::Method(a), ClassMember::Method(b)) => Arc::ptr_eq(a, b),
            (ClassMember::Class(a), ClassMember::Class(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Class-level control flow graph
///
/// `own` holds the class entry and exit. `flow` is derived from it: `own`
/// plus every member graph, the entry flowing into each member start and
/// each member end flowing into the exit. Whenever a member changes the
/// union is rebuilt from the members, so a node id answers the same in the
/// class as in the member it belongs to.
#[derive(Debug, Clone)]
pub struct ClassCfg {
    own: FlowGraph,
    flow: FlowGraph,
    members: BTreeMap<String, ClassMember>,
}

impl ClassCfg {
    pub fn new(flow: FlowGraph) -> Self {
        ClassCfg {
            own: flow.clone(),
            flow,
            members: BTreeMap::new(),
        }
    }

    /// Register a method or field CFG
    ///
    /// A member already registered under the same name is returned
    /// unchanged.
    pub fn add_member(&mut self, member: Cfg) -> Arc<Cfg> {
        self.add_shared_member(Arc::new(member))
    }

    /// Register a method or field CFG that is already shared, e.g. one a
    /// session has cached
    pub fn add_shared_member(&mut self, member: Arc<Cfg>) -> Arc<Cfg> {
        if let Some(existing) = self.member(member.qualified_name()) {
            return Arc::clone(existing);
        }
        self.register(ClassMember::Method(Arc::clone(&member)));
        member
    }

    /// Register a nested class CFG
    pub fn add_class_member(&mut self, class: ClassCfg) -> Arc<ClassCfg> {
        self.add_shared_class_member(Arc::new(class))
    }

    pub fn add_shared_class_member(&mut self, class: Arc<ClassCfg>) -> Arc<ClassCfg> {
        if let Some(existing) = self.nested_class(class.qualified_name()) {
            return Arc::clone(existing);
        }
        self.register(ClassMember::Class(Arc::clone(&class)));
        class
    }

    fn register(&mut self, member: ClassMember) {
        let name = member.qualified_name().to_string();
        if self.members.contains_key(&name) {
            return;
        }
        push_member_name(&mut self.own, &name);
        push_member_name(&mut self.flow, &name);
        link(&mut self.flow, member.flow_graph());
        self.members.insert(name, member);
    }

    /// Rebuild the union from `own` and the current members, in
    /// registration order
    pub(crate) fn relink(&mut self) {
        let mut flow = self.own.clone();
        for name in self.member_names() {
            if let Some(member) = self.members.get(name) {
                link(&mut flow, member.flow_graph());
            }
        }
        self.flow = flow;
    }

    /// Swap in the CFGs `lookup` already holds under a member's name
    ///
    /// Nested classes that `lookup` does not know are searched for members
    /// in turn. Returns the number of members replaced; the union is
    /// rebuilt when it is not zero.
    pub(crate) fn adopt_members(&mut self, lookup: &dyn Fn(&str) -> Option<ClassMember>) -> usize {
        let mut adopted = 0;
        for member in self.members.values_mut() {
            match lookup(member.qualified_name()) {
                Some(existing) if !existing.ptr_eq(member) => {
                    *member = existing;
                    adopted += 1;
                }
                Some(_) => {}
                None => {
                    if let ClassMember::Class(nested) = member {
                        if nested.would_adopt(lookup) {
                            adopted += Arc::make_mut(nested).adopt_members(lookup);
                        }
                    }
                }
            }
        }
        if adopted > 0 {
            self.relink();
        }
        adopted
    }

    fn would_adopt(&self, lookup: &dyn Fn(&str) -> Option<ClassMember>) -> bool {
        self.members.values().any(|member| match lookup(member.qualified_name()) {
            Some(existing) => !existing.ptr_eq(member),
            None => member
                .as_class()
                .map_or(false, |nested| nested.would_adopt(lookup)),
        })
    }

    /// Basic blocks for every member that has none, nested classes
    /// included; returns the number of CFGs partitioned
    ///
    /// The union is rebuilt afterwards so its copies carry the block ids.
    pub(crate) fn compute_member_blocks(&mut self) -> usize {
        let mut computed = 0;
        for member in self.members.values_mut() {
            match member {
                ClassMember::Method(cfg) => {
                    if !cfg.has_blocks() {
                        Arc::make_mut(cfg).compute_basic_blocks();
                        computed += 1;
                    }
                }
                ClassMember::Class(nested) => {
                    if nested.needs_blocks() {
                        computed += Arc::make_mut(nested).compute_member_blocks();
                    }
                }
            }
        }
        if computed > 0 {
            self.relink();
        }
        computed
    }

    fn needs_blocks(&self) -> bool {
        self.members.values().any(|member| match member {
            ClassMember::Method(cfg) => !cfg.has_blocks(),
            ClassMember::Class(nested) => nested.needs_blocks(),
        })
    }

    /// Direct method or field member
    pub fn member(&self, qualified_name: &str) -> Option<&Arc<Cfg>> {
        self.members
            .get(qualified_name)
            .and_then(ClassMember::as_method)
    }

    /// Direct nested class member
    pub fn nested_class(&self, qualified_name: &str) -> Option<&Arc<ClassCfg>> {
        self.members
            .get(qualified_name)
            .and_then(ClassMember::as_class)
    }

    /// Direct members ordered by qualified name
    pub fn members(&self) -> impl Iterator<Item = &ClassMember> + '_ {
        self.members.values()
    }

    /// Direct method and field members ordered by qualified name
    pub fn method_members(&self) -> impl Iterator<Item = &Arc<Cfg>> + '_ {
        self.members.values().filter_map(ClassMember::as_method)
    }

    /// Member names in registration order
    pub fn member_names(&self) -> &[String] {
        self.own
            .entry()
            .and_then(CfgEntry::as_class)
            .map(|class| class.members.as_slice())
            .unwrap_or(&[])
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Link a node to its dependence-graph node
    ///
    /// The link is shared with the member the node belongs to.
    pub fn set_pdg_node(&self, node: NodeId, pdg: PdgNodeRef) -> bool {
        self.flow
            .node(node)
            .map_or(false, |n| n.set_pdg_node(pdg))
    }
}

fn push_member_name(flow: &mut FlowGraph, name: &str) {
    let start = flow.start();
    if let Some(NodeData::Entry(entry)) = flow.node_mut(start).map(CfgNode::data_mut) {
        if let Some(class) = entry.as_class_mut() {
            class.members.push(name.to_string());
        }
    }
}

fn link(flow: &mut FlowGraph, member: &FlowGraph) {
    flow.graph_mut().append(member.graph());
    let (start, end) = (flow.start(), flow.end());
    flow.add_edge(ControlFlow::fall_through(start, member.start()));
    flow.add_edge(ControlFlow::fall_through(member.end(), end));
}

impl Deref for ClassCfg {
    type Target = FlowGraph;

    fn deref(&self) -> &FlowGraph {
        &self.flow
    }
}

impl CommonCfg for ClassCfg {
    fn flow_graph(&self) -> &FlowGraph {
        &self.flow
    }
}

impl PartialEq for ClassCfg {
    fn eq(&self, other: &Self) -> bool {
        self.flow.qualified_name() == other.flow.qualified_name()
    }
}

impl Eq for ClassCfg {}
