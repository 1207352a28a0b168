//! CFG nodes
//!
//! `NodeData` is the per-category payload; `NodeKind` is its flattened tag.
//! A node's identity is its [`NodeId`]: equality and hashing look at nothing
//! else.

use super::block::BlockId;
use super::kinds::{CallKind, DeclKind, NodeKind, ParameterKind, StatementKind};
use crate::features::def_use::{DefUse, JMethodReference};
use crate::features::graph::GraphNode;
use crate::shared::models::{NodeId, Span};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Index of a node in the dependence-graph collaborator's side table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PdgNodeRef(pub u32);

/// Formal parameter shape of a callable declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub return_type: String,
    pub formal_ins: Vec<NodeId>,
    pub formal_outs: Vec<NodeId>,
    pub formal_out_for_return: Option<NodeId>,
    /// Catch-target nodes, in declaration order
    pub exceptions: Vec<NodeId>,
}

impl MethodEntry {
    pub fn formal_in(&self, pos: usize) -> Option<NodeId> {
        self.formal_ins.get(pos).copied()
    }

    pub fn formal_out(&self, pos: usize) -> Option<NodeId> {
        self.formal_outs.get(pos).copied()
    }

    pub fn is_void(&self) -> bool {
        self.return_type == "void" || self.return_type.is_empty()
    }
}

/// Member list of a class-like declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Qualified names of member CFGs, in registration order
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryDetail {
    Method(MethodEntry),
    Field,
    Class(ClassEntry),
}

/// Entry node of a declaration
///
/// The qualified name is also the key of the owning CFG, so it doubles as
/// the back-reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgEntry {
    pub kind: DeclKind,
    pub name: String,
    pub signature: String,
    pub qualified_name: String,
    pub detail: EntryDetail,
}

impl CfgEntry {
    pub fn as_method(&self) -> Option<&MethodEntry> {
        match &self.detail {
            EntryDetail::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_method_mut(&mut self) -> Option<&mut MethodEntry> {
        match &mut self.detail {
            EntryDetail::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntry> {
        match &self.detail {
            EntryDetail::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassEntry> {
        match &mut self.detail {
            EntryDetail::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Owning CFG key
    pub fn owner(&self) -> &str {
        &self.qualified_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgExit {
    pub kind: DeclKind,
    pub qualified_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgStatement {
    pub kind: StatementKind,
    pub def_use: DefUse,
}

/// Call site
///
/// Actual parameters mirror the callee's formal shape by ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgMethodCall {
    pub kind: CallKind,
    pub callee: JMethodReference,
    pub receiver: Option<NodeId>,
    pub actual_ins: Vec<NodeId>,
    pub actual_outs: Vec<NodeId>,
    pub actual_out_for_return: Option<NodeId>,
    pub def_use: DefUse,
}

impl CfgMethodCall {
    pub fn actual_in(&self, pos: usize) -> Option<NodeId> {
        self.actual_ins.get(pos).copied()
    }

    pub fn actual_out(&self, pos: usize) -> Option<NodeId> {
        self.actual_outs.get(pos).copied()
    }

    pub fn callee_qualified_name(&self) -> &str {
        &self.callee.qualified_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgParameter {
    pub kind: ParameterKind,
    pub ordinal: usize,
    pub name: String,
    pub type_name: String,
    /// Carries the return value rather than a parameter
    pub for_return: bool,
    /// Method entry (formals) or call node (actuals)
    pub owner: NodeId,
    pub def_use: DefUse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeData {
    Entry(CfgEntry),
    Exit(CfgExit),
    Statement(CfgStatement),
    Call(CfgMethodCall),
    Parameter(CfgParameter),
    Merge,
    Dummy,
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Entry(e) => NodeKind::Entry(e.kind),
            NodeData::Exit(e) => NodeKind::Exit(e.kind),
            NodeData::Statement(s) => NodeKind::Statement(s.kind),
            NodeData::Call(c) => NodeKind::Call(c.kind),
            NodeData::Parameter(p) => NodeKind::Parameter(p.kind),
            NodeData::Merge => NodeKind::Merge,
            NodeData::Dummy => NodeKind::Dummy,
        }
    }
}

/// Control flow graph node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfgNode {
    id: NodeId,
    data: NodeData,
    span: Option<Span>,
    /// Source text of the construct, empty for synthetic nodes
    label: String,
    block: Option<BlockId>,
    /// Shared by every clone of the node, so a class CFG and the member it
    /// copied the node from see the same link
    #[serde(skip)]
    pdg: Arc<OnceCell<PdgNodeRef>>,
}

impl CfgNode {
    pub fn new(id: NodeId, data: NodeData) -> Self {
        CfgNode {
            id,
            data,
            span: None,
            label: String::new(),
            block: None,
            pdg: Arc::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub(crate) fn set_source(&mut self, span: Span, label: String) {
        self.span = Some(span);
        self.label = label;
    }

    pub(crate) fn set_block(&mut self, block: Option<BlockId>) {
        self.block = block;
    }

    pub fn pdg_node(&self) -> Option<PdgNodeRef> {
        self.pdg.get().copied()
    }

    /// Link this node to its dependence-graph node; only the first call
    /// takes effect
    pub fn set_pdg_node(&self, pdg: PdgNodeRef) -> bool {
        self.pdg.set(pdg).is_ok()
    }

    pub fn as_entry(&self) -> Option<&CfgEntry> {
        match &self.data {
            NodeData::Entry(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_method_entry(&self) -> Option<&MethodEntry> {
        self.as_entry().and_then(CfgEntry::as_method)
    }

    pub fn as_statement(&self) -> Option<&CfgStatement> {
        match &self.data {
            NodeData::Statement(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&CfgMethodCall> {
        match &self.data {
            NodeData::Call(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&CfgParameter> {
        match &self.data {
            NodeData::Parameter(p) => Some(p),
            _ => None,
        }
    }

    /// Def/use set of statement-level nodes (statements, calls, parameters)
    pub fn def_use(&self) -> Option<&DefUse> {
        match &self.data {
            NodeData::Statement(s) => Some(&s.def_use),
            NodeData::Call(c) => Some(&c.def_use),
            NodeData::Parameter(p) => Some(&p.def_use),
            _ => None,
        }
    }

    /// Qualified name of entry and exit nodes
    pub fn qualified_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Entry(e) => Some(&e.qualified_name),
            NodeData::Exit(e) => Some(&e.qualified_name),
            _ => None,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self.data, NodeData::Entry(_))
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.data, NodeData::Exit(_))
    }

    pub fn is_call(&self) -> bool {
        matches!(self.data, NodeData::Call(_))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.data, NodeData::Parameter(_))
    }

    pub fn is_statement_kind(&self, kind: StatementKind) -> bool {
        matches!(&self.data, NodeData::Statement(s) if s.kind == kind)
    }

    pub fn is_merge(&self) -> bool {
        matches!(self.data, NodeData::Merge)
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.data, NodeData::Dummy)
    }
}

impl PartialEq for CfgNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CfgNode {}

impl Hash for CfgNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl GraphNode for CfgNode {
    fn id(&self) -> NodeId {
        self.id
    }
}
