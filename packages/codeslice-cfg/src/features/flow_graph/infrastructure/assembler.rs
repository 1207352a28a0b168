/*
 * CfgAssembler - node and edge construction for one declaration
 *
 * The front end (a `CfgBuilder` implementation) walks a declaration and
 * drives an assembler. The assembler borrows the session's IdAllocator,
 * so every node it creates gets a fresh session-unique id, including
 * merge and dummy sentinels.
 *
 * Parameter and exception nodes are registered with their owner (method
 * entry or call node) as they are created. Edges are never inferred;
 * the caller wires control flow explicitly.
 */

use crate::errors::{CfgError, Result};
use crate::features::def_use::{DefUse, JMethodReference};
use crate::features::flow_graph::domain::{
    CallKind, Cfg, CfgEntry, CfgExit, CfgMethodCall, CfgNode, CfgParameter, CfgStatement,
    ClassCfg, ClassEntry, ControlFlow, DeclKind, EntryDetail, FlowGraph, FlowKind, MethodEntry,
    NodeData, ParameterKind, StatementKind,
};
use crate::shared::models::{IdAllocator, NodeId, Span};

/// Builds the FlowGraph of one method, field or class
pub struct CfgAssembler<'a> {
    ids: &'a mut IdAllocator,
    flow: FlowGraph,
}

impl<'a> CfgAssembler<'a> {
    /// Method, constructor or initializer
    pub fn method(
        ids: &'a mut IdAllocator,
        kind: DeclKind,
        name: &str,
        signature: &str,
        qualified_name: &str,
        return_type: &str,
    ) -> Self {
        let detail = EntryDetail::Method(MethodEntry {
            return_type: return_type.to_string(),
            ..MethodEntry::default()
        });
        Self::with_entry(ids, kind, name, signature, qualified_name, detail)
    }

    /// Field or enum constant
    pub fn field(ids: &'a mut IdAllocator, kind: DeclKind, name: &str, qualified_name: &str) -> Self {
        Self::with_entry(ids, kind, name, name, qualified_name, EntryDetail::Field)
    }

    /// Class, interface or enum
    pub fn class(ids: &'a mut IdAllocator, kind: DeclKind, name: &str, qualified_name: &str) -> Self {
        let detail = EntryDetail::Class(ClassEntry::default());
        Self::with_entry(ids, kind, name, name, qualified_name, detail)
    }

    fn with_entry(
        ids: &'a mut IdAllocator,
        kind: DeclKind,
        name: &str,
        signature: &str,
        qualified_name: &str,
        detail: EntryDetail,
    ) -> Self {
        let start = ids.allocate();
        let end = ids.allocate();
        let mut flow = FlowGraph::empty(qualified_name.to_string(), start, end);

        flow.add_node(CfgNode::new(
            start,
            NodeData::Entry(CfgEntry {
                kind,
                name: name.to_string(),
                signature: signature.to_string(),
                qualified_name: qualified_name.to_string(),
                detail,
            }),
        ));
        flow.add_node(CfgNode::new(
            end,
            NodeData::Exit(CfgExit {
                kind,
                qualified_name: qualified_name.to_string(),
            }),
        ));

        CfgAssembler { ids, flow }
    }

    pub fn start(&self) -> NodeId {
        self.flow.start()
    }

    pub fn end(&self) -> NodeId {
        self.flow.end()
    }

    pub fn qualified_name(&self) -> &str {
        self.flow.qualified_name()
    }

    /// Graph built so far
    pub fn flow_graph(&self) -> &FlowGraph {
        &self.flow
    }

    fn add(&mut self, data: NodeData) -> NodeId {
        let id = self.ids.allocate();
        self.flow.add_node(CfgNode::new(id, data));
        id
    }

    /// Attach source text and location to an existing node
    pub fn annotate(&mut self, id: NodeId, span: Span, label: impl Into<String>) -> bool {
        match self.flow.node_mut(id) {
            Some(node) => {
                node.set_source(span, label.into());
                true
            }
            None => false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Nodes
    // ═══════════════════════════════════════════════════════════════════

    pub fn statement(&mut self, kind: StatementKind, def_use: DefUse) -> NodeId {
        self.add(NodeData::Statement(CfgStatement { kind, def_use }))
    }

    pub fn call(&mut self, kind: CallKind, callee: JMethodReference, def_use: DefUse) -> NodeId {
        self.add(NodeData::Call(CfgMethodCall {
            kind,
            callee,
            receiver: None,
            actual_ins: Vec::new(),
            actual_outs: Vec::new(),
            actual_out_for_return: None,
            def_use,
        }))
    }

    pub fn merge(&mut self) -> NodeId {
        self.add(NodeData::Merge)
    }

    /// Placeholder node, e.g. the target of a `break` before its loop exit
    /// exists
    pub fn dummy(&mut self) -> NodeId {
        self.add(NodeData::Dummy)
    }

    /// Receiver of an instance call
    pub fn receiver(&mut self, call: NodeId, name: &str, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        self.call_data(call)?;
        let id = self.parameter(ParameterKind::Receiver, 0, name, type_name, false, call, def_use);
        self.call_data(call)?.receiver = Some(id);
        Ok(id)
    }

    /// Next actual-in of `call`; ordinals follow creation order
    pub fn actual_in(&mut self, call: NodeId, name: &str, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        let ordinal = self.call_data(call)?.actual_ins.len();
        let id = self.parameter(ParameterKind::ActualIn, ordinal, name, type_name, false, call, def_use);
        self.call_data(call)?.actual_ins.push(id);
        Ok(id)
    }

    pub fn actual_out(&mut self, call: NodeId, name: &str, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        let ordinal = self.call_data(call)?.actual_outs.len();
        let id = self.parameter(ParameterKind::ActualOut, ordinal, name, type_name, false, call, def_use);
        self.call_data(call)?.actual_outs.push(id);
        Ok(id)
    }

    pub fn actual_out_for_return(&mut self, call: NodeId, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        if self.call_data(call)?.actual_out_for_return.is_some() {
            return Err(CfgError::build(
                self.flow.qualified_name(),
                format!("call {call} already has a return actual-out"),
            ));
        }
        let id = self.parameter(ParameterKind::ActualOut, 0, "$ret", type_name, true, call, def_use);
        self.call_data(call)?.actual_out_for_return = Some(id);
        Ok(id)
    }

    /// Next formal-in of this method
    pub fn formal_in(&mut self, name: &str, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        let ordinal = self.method_entry()?.formal_ins.len();
        let owner = self.start();
        let id = self.parameter(ParameterKind::FormalIn, ordinal, name, type_name, false, owner, def_use);
        self.method_entry()?.formal_ins.push(id);
        Ok(id)
    }

    pub fn formal_out(&mut self, name: &str, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        let ordinal = self.method_entry()?.formal_outs.len();
        let owner = self.start();
        let id = self.parameter(ParameterKind::FormalOut, ordinal, name, type_name, false, owner, def_use);
        self.method_entry()?.formal_outs.push(id);
        Ok(id)
    }

    pub fn formal_out_for_return(&mut self, type_name: &str, def_use: DefUse) -> Result<NodeId> {
        if self.method_entry()?.formal_out_for_return.is_some() {
            return Err(CfgError::build(
                self.flow.qualified_name(),
                "method already has a return formal-out",
            ));
        }
        let owner = self.start();
        let id = self.parameter(ParameterKind::FormalOut, 0, "$ret", type_name, true, owner, def_use);
        self.method_entry()?.formal_out_for_return = Some(id);
        Ok(id)
    }

    /// Catch-target node, registered with the method entry
    pub fn exception_target(&mut self, def_use: DefUse) -> Result<NodeId> {
        self.method_entry()?;
        let id = self.statement(StatementKind::Catch, def_use);
        self.method_entry()?.exceptions.push(id);
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    fn parameter(
        &mut self,
        kind: ParameterKind,
        ordinal: usize,
        name: &str,
        type_name: &str,
        for_return: bool,
        owner: NodeId,
        def_use: DefUse,
    ) -> NodeId {
        self.add(NodeData::Parameter(CfgParameter {
            kind,
            ordinal,
            name: name.to_string(),
            type_name: type_name.to_string(),
            for_return,
            owner,
            def_use,
        }))
    }

    fn call_data(&mut self, call: NodeId) -> Result<&mut CfgMethodCall> {
        let qualified_name = self.flow.qualified_name().to_string();
        match self.flow.node_mut(call).map(CfgNode::data_mut) {
            Some(NodeData::Call(c)) => Ok(c),
            Some(_) => Err(CfgError::build(qualified_name, format!("{call} is not a call node"))),
            None => Err(CfgError::build(qualified_name, format!("unknown node {call}"))),
        }
    }

    fn method_entry(&mut self) -> Result<&mut MethodEntry> {
        let qualified_name = self.flow.qualified_name().to_string();
        let start = self.flow.start();
        self.flow
            .node_mut(start)
            .map(CfgNode::data_mut)
            .and_then(|data| match data {
                NodeData::Entry(entry) => entry.as_method_mut(),
                _ => None,
            })
            .ok_or_else(|| CfgError::build(qualified_name, "declaration has no parameters"))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Edges
    // ═══════════════════════════════════════════════════════════════════

    /// Add an edge; false when it already exists or an endpoint is unknown
    pub fn flow(&mut self, source: NodeId, target: NodeId, kind: FlowKind) -> bool {
        self.flow.add_edge(ControlFlow::new(source, target, kind))
    }

    pub fn fall_through(&mut self, source: NodeId, target: NodeId) -> bool {
        self.flow(source, target, FlowKind::FallThrough)
    }

    pub fn true_flow(&mut self, source: NodeId, target: NodeId) -> bool {
        self.flow(source, target, FlowKind::True)
    }

    pub fn false_flow(&mut self, source: NodeId, target: NodeId) -> bool {
        self.flow(source, target, FlowKind::False)
    }

    /// Back edge from `source` to the loop `header`
    pub fn loopback(&mut self, source: NodeId, header: NodeId, kind: FlowKind) -> bool {
        self.flow
            .add_edge(ControlFlow::new(source, header, kind).with_loopback(header))
    }

    /// Chain `nodes` with fall-through edges; returns the number added
    pub fn sequence(&mut self, nodes: &[NodeId]) -> usize {
        nodes
            .windows(2)
            .filter(|pair| self.fall_through(pair[0], pair[1]))
            .count()
    }

    pub fn finish(self) -> Cfg {
        Cfg::new(self.flow)
    }

    pub fn finish_class(self) -> ClassCfg {
        ClassCfg::new(self.flow)
    }
}
