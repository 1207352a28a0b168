/*
 * Codeslice CFG - Control Flow Graph Engine for Program Slicing
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (NodeId, Span, Modifiers)
 * - features/    : Vertical slices (graph → def_use → flow_graph → interproc → store → call_graph)
 * - config/      : YAML-backed analysis configuration
 *
 * The engine builds nothing from source text itself. A front end drives
 * `CfgAssembler` through the `CfgBuilder` port, the `CfgStore` memoizes the
 * result per qualified name, and dependence-graph builders query the
 * reachability and dominance operations on `FlowGraph`.
 */

#![allow(clippy::upper_case_acronyms)] // CFG, PDG naming
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::AnalysisConfig;
pub use errors::{CfgError, Result};
pub use features::call_graph::{CallEdge, CallGraph, CallGraphNode};
pub use features::def_use::{DefUse, JFieldReference, JLocalReference, JMethodReference, JReference};
pub use features::flow_graph::{
    BasicBlock, BlockId, CallKind, Cfg, CfgAssembler, CfgNode, ClassCfg, ClassMember, CommonCfg,
    ControlFlow, DeclKind, FlowGraph, FlowKind, NodeData, NodeKind, NodeSet, ParameterKind,
    PdgNodeRef, PostDominatorCache, StatementKind,
};
pub use features::interproc::{link_call, CallLink, InterproceduralGraph, UnresolvedCall};
pub use features::store::{
    BuildCoordinator, CachedCfgs, CfgBuilder, CfgStore, Declaration, DeclarationKind, Diagnostic,
    DiagnosticKind, StoredCfg,
};
pub use shared::models::{IdAllocator, Modifiers, NodeId, Span};
