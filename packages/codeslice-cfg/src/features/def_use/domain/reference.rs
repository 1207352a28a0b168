//! Reference descriptors
//!
//! A reference names a field, a local variable (including parameters) or a
//! method as seen from one statement, with the binding information the front
//! end resolved for it.

use crate::shared::models::Modifiers;
use serde::{Deserialize, Serialize};

/// Field reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JFieldReference {
    pub name: String,
    pub qualified_name: String,
    pub type_name: String,
    pub declaring_class: String,
    pub modifiers: Modifiers,
}

impl JFieldReference {
    /// Qualified name is `declaring_class.name`
    pub fn new(declaring_class: &str, name: &str, type_name: &str) -> Self {
        JFieldReference {
            name: name.to_string(),
            qualified_name: format!("{}.{}", declaring_class, name),
            type_name: type_name.to_string(),
            declaring_class: declaring_class.to_string(),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Local variable or parameter reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JLocalReference {
    pub name: String,
    pub qualified_name: String,
    pub type_name: String,
    pub declaring_class: String,
    pub declaring_method: String,
    pub modifiers: Modifiers,
    pub is_parameter: bool,
}

impl JLocalReference {
    /// Qualified name is `declaring_method#name`; `declaring_method` is
    /// itself qualified with its class and signature.
    pub fn new(declaring_class: &str, declaring_method: &str, name: &str, type_name: &str) -> Self {
        JLocalReference {
            name: name.to_string(),
            qualified_name: format!("{}#{}", declaring_method, name),
            type_name: type_name.to_string(),
            declaring_class: declaring_class.to_string(),
            declaring_method: declaring_method.to_string(),
            modifiers: Modifiers::empty(),
            is_parameter: false,
        }
    }

    pub fn parameter(mut self) -> Self {
        self.is_parameter = true;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Method reference (call target)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JMethodReference {
    pub name: String,
    /// `declaring_class.name(param, ...)`
    pub qualified_name: String,
    pub return_type: String,
    pub declaring_class: String,
    pub parameter_types: Vec<String>,
    pub modifiers: Modifiers,
}

impl JMethodReference {
    pub fn new(
        declaring_class: &str,
        name: &str,
        parameter_types: &[&str],
        return_type: &str,
    ) -> Self {
        JMethodReference {
            name: name.to_string(),
            qualified_name: format!(
                "{}.{}({})",
                declaring_class,
                name,
                parameter_types.join(",")
            ),
            return_type: return_type.to_string(),
            declaring_class: declaring_class.to_string(),
            parameter_types: parameter_types.iter().map(|t| t.to_string()).collect(),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_void(&self) -> bool {
        self.return_type == "void"
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Reference kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    Field,
    Local,
    Method,
}

/// Any reference a statement can define or use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JReference {
    Field(JFieldReference),
    Local(JLocalReference),
    Method(JMethodReference),
}

impl JReference {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            JReference::Field(_) => ReferenceKind::Field,
            JReference::Local(_) => ReferenceKind::Local,
            JReference::Method(_) => ReferenceKind::Method,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            JReference::Field(r) => &r.name,
            JReference::Local(r) => &r.name,
            JReference::Method(r) => &r.name,
        }
    }

    pub fn qualified_name(&self) -> &str {
        match self {
            JReference::Field(r) => &r.qualified_name,
            JReference::Local(r) => &r.qualified_name,
            JReference::Method(r) => &r.qualified_name,
        }
    }

    /// Static type; the return type for methods
    pub fn type_name(&self) -> &str {
        match self {
            JReference::Field(r) => &r.type_name,
            JReference::Local(r) => &r.type_name,
            JReference::Method(r) => &r.return_type,
        }
    }

    pub fn declaring_class(&self) -> &str {
        match self {
            JReference::Field(r) => &r.declaring_class,
            JReference::Local(r) => &r.declaring_class,
            JReference::Method(r) => &r.declaring_class,
        }
    }

    /// Enclosing method of a local; `None` for fields and methods
    pub fn declaring_method(&self) -> Option<&str> {
        match self {
            JReference::Local(r) => Some(&r.declaring_method),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            JReference::Field(r) => r.modifiers,
            JReference::Local(r) => r.modifiers,
            JReference::Method(r) => r.modifiers,
        }
    }

    /// Fields and locals
    pub fn is_variable(&self) -> bool {
        !matches!(self, JReference::Method(_))
    }

    pub fn is_field(&self) -> bool {
        matches!(self, JReference::Field(_))
    }

    pub fn is_local(&self) -> bool {
        matches!(self, JReference::Local(_))
    }

    /// Same kind and qualified name
    pub fn same_target(&self, other: &JReference) -> bool {
        self.kind() == other.kind() && self.qualified_name() == other.qualified_name()
    }
}

impl From<JFieldReference> for JReference {
    fn from(r: JFieldReference) -> Self {
        JReference::Field(r)
    }
}

impl From<JLocalReference> for JReference {
    fn from(r: JLocalReference) -> Self {
        JReference::Local(r)
    }
}

impl From<JMethodReference> for JReference {
    fn from(r: JMethodReference) -> Self {
        JReference::Method(r)
    }
}
