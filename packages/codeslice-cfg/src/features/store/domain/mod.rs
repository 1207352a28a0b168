//! Store Domain Models

use crate::features::flow_graph::{Cfg, ClassCfg, ClassMember, CommonCfg, FlowGraph};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Which per-kind builder a declaration goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// Class, interface or enum
    Class,
    /// Method, constructor or initializer
    Method,
    /// Field or enum constant
    Field,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Method => "method",
            DeclarationKind::Field => "field",
        }
    }
}

/// Handle to one front-end declaration
///
/// The qualified name is the cache key; the front end keeps whatever AST
/// or binding it needs on its side of the `CfgBuilder` port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub qualified_name: String,
}

impl Declaration {
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Declaration {
            kind: DeclarationKind::Class,
            qualified_name: qualified_name.into(),
        }
    }

    pub fn method(qualified_name: impl Into<String>) -> Self {
        Declaration {
            kind: DeclarationKind::Method,
            qualified_name: qualified_name.into(),
        }
    }

    pub fn field(qualified_name: impl Into<String>) -> Self {
        Declaration {
            kind: DeclarationKind::Field,
            qualified_name: qualified_name.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.qualified_name)
    }
}

/// A cached CFG, shared by reference
#[derive(Debug, Clone)]
pub enum StoredCfg {
    Method(Arc<Cfg>),
    Class(Arc<ClassCfg>),
}

impl StoredCfg {
    pub fn flow_graph(&self) -> &FlowGraph {
        match self {
            StoredCfg::Method(cfg) => cfg.flow_graph(),
            StoredCfg::Class(class) => class.flow_graph(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        self.flow_graph().qualified_name()
    }

    pub fn as_method(&self) -> Option<&Arc<Cfg>> {
        match self {
            StoredCfg::Method(cfg) => Some(cfg),
            StoredCfg::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassCfg>> {
        match self {
            StoredCfg::Class(class) => Some(class),
            StoredCfg::Method(_) => None,
        }
    }

    /// Same cached object, not merely the same name
    pub fn ptr_eq(&self, other: &StoredCfg) -> bool {
        match (self, other) {
            (StoredCfg::Method(a), StoredCfg::Method(b)) => Arc::ptr_eq(a, b),
            (StoredCfg::Class(a), StoredCfg::Class(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<ClassMember> for StoredCfg {
    fn from(member: ClassMember) -> Self {
        match member {
            ClassMember::Method(cfg) => StoredCfg::Method(cfg),
            ClassMember::Class(class) => StoredCfg::Class(class),
        }
    }
}

impl From<StoredCfg> for ClassMember {
    fn from(stored: StoredCfg) -> Self {
        match stored {
            StoredCfg::Method(cfg) => ClassMember::Method(cfg),
            StoredCfg::Class(class) => ClassMember::Class(class),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Resolution,
    Build,
    Limit,
}

/// Non-fatal record of a declaration that could not be built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub qualified_name: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.kind, self.qualified_name, self.message)
    }
}
