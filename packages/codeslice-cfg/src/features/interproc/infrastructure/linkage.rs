/*
 * Interprocedural linkage
 *
 * For each call site with a cached callee CFG:
 * - one MethodCall edge: call node → callee start
 * - Parameter edges by ordinal: actual-in[i] → formal-in[i],
 *   formal-out[i] → actual-out[i], return formal-out → return actual-out
 *
 * Ordinals present on only one side are skipped, never an error. The
 * mismatch is recorded on the link so callers can judge varargs and
 * unresolved overloads themselves.
 */

use crate::config::LinkageConfig;
use crate::features::flow_graph::{ControlFlow, FlowGraph, FlowKind};
use crate::features::interproc::domain::{CallLink, UnresolvedCall};
use crate::features::store::CfgStore;
use crate::shared::models::NodeId;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Link one call site of `caller` to `callee`
///
/// `None` when `call_site` is not a call node of `caller` or `callee` is not
/// a method-like CFG.
pub fn link_call(caller: &FlowGraph, call_site: NodeId, callee: &FlowGraph) -> Option<CallLink> {
    let call = caller.node(call_site)?.as_call()?;
    let formals = callee.start_node()?.as_method_entry()?;

    let mut parameter_edges = Vec::new();
    for (pos, &actual) in call.actual_ins.iter().enumerate() {
        if let Some(formal) = formals.formal_in(pos) {
            parameter_edges.push(ControlFlow::new(actual, formal, FlowKind::Parameter));
        }
    }
    for (pos, &formal) in formals.formal_outs.iter().enumerate() {
        if let Some(actual) = call.actual_out(pos) {
            parameter_edges.push(ControlFlow::new(formal, actual, FlowKind::Parameter));
        }
    }
    if let (Some(formal), Some(actual)) = (formals.formal_out_for_return, call.actual_out_for_return) {
        parameter_edges.push(ControlFlow::new(formal, actual, FlowKind::Parameter));
    }

    let (actuals, formal_count) = (call.actual_ins.len(), formals.formal_ins.len());
    let arity_mismatch = (actuals != formal_count).then_some((actuals, formal_count));

    Some(CallLink {
        caller: caller.qualified_name().to_string(),
        caller_entry: caller.start(),
        call_site,
        callee: callee.qualified_name().to_string(),
        callee_entry: callee.start(),
        call_edge: ControlFlow::new(call_site, callee.start(), FlowKind::MethodCall),
        parameter_edges,
        arity_mismatch,
    })
}

/// All call links among the method CFGs of one store
#[derive(Debug, Clone, Default)]
pub struct InterproceduralGraph {
    links: Vec<CallLink>,
    unresolved: Vec<UnresolvedCall>,
    unresolved_count: usize,
    by_call_site: FxHashMap<NodeId, Vec<usize>>,
    by_callee_entry: FxHashMap<NodeId, Vec<usize>>,
}

impl InterproceduralGraph {
    /// Link every call node of every cached method CFG
    ///
    /// Callers are visited in qualified-name order, call nodes in creation
    /// order, so link order is stable across runs.
    pub fn build(store: &CfgStore, config: &LinkageConfig) -> Self {
        let mut graph = InterproceduralGraph::default();

        for caller in store.method_cfgs() {
            for node in caller.call_nodes() {
                let Some(call) = node.as_call() else {
                    continue;
                };
                let callee_name = call.callee_qualified_name();

                let Some(callee) = store.method_cfg(callee_name) else {
                    graph.unresolved_count += 1;
                    debug!(
                        "Unresolved callee {} at {} in {}",
                        callee_name,
                        node.id(),
                        caller.qualified_name()
                    );
                    if config.link_unresolved {
                        graph.unresolved.push(UnresolvedCall {
                            caller: caller.qualified_name().to_string(),
                            call_site: node.id(),
                            callee: callee_name.to_string(),
                        });
                    }
                    continue;
                };

                if let Some(link) = link_call(caller, node.id(), callee) {
                    if let Some((actuals, formals)) = link.arity_mismatch {
                        if config.warn_on_arity_mismatch {
                            warn!(
                                "Arity mismatch calling {} from {}: {} actuals, {} formals",
                                link.callee, link.caller, actuals, formals
                            );
                        } else {
                            debug!(
                                "Arity mismatch calling {} from {}: {} actuals, {} formals",
                                link.callee, link.caller, actuals, formals
                            );
                        }
                    }
                    graph.push(link);
                }
            }
        }

        debug!(
            "Interprocedural graph: {} links, {} unresolved call sites",
            graph.links.len(),
            graph.unresolved_count
        );
        graph
    }

    fn push(&mut self, link: CallLink) {
        let index = self.links.len();
        self.by_call_site
            .entry(link.call_site)
            .or_default()
            .push(index);
        self.by_callee_entry
            .entry(link.callee_entry)
            .or_default()
            .push(index);
        self.links.push(link);
    }

    pub fn links(&self) -> &[CallLink] {
        &self.links
    }

    /// Call and parameter edges of every link
    pub fn edges(&self) -> impl Iterator<Item = &ControlFlow> + '_ {
        self.links.iter().flat_map(CallLink::edges)
    }

    /// Links leaving `call_site`
    pub fn callees_of(&self, call_site: NodeId) -> impl Iterator<Item = &CallLink> + '_ {
        self.indexed(&self.by_call_site, call_site)
    }

    /// Links entering the callee whose start node is `entry`
    pub fn callers_of(&self, entry: NodeId) -> impl Iterator<Item = &CallLink> + '_ {
        self.indexed(&self.by_callee_entry, entry)
    }

    fn indexed<'a>(
        &'a self,
        index: &'a FxHashMap<NodeId, Vec<usize>>,
        key: NodeId,
    ) -> impl Iterator<Item = &'a CallLink> + 'a {
        index
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.links.get(i))
    }

    /// Recorded only when `link_unresolved` is set
    pub fn unresolved(&self) -> &[UnresolvedCall] {
        &self.unresolved
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved_count
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
