//! Defined/used reference sets of one statement

use super::reference::JReference;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of references
///
/// Two references are duplicates when they have the same kind and qualified
/// name; the first one added wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceList(Vec<JReference>);

impl ReferenceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add unless already present; returns whether it was added
    pub fn add(&mut self, reference: JReference) -> bool {
        if self.0.iter().any(|r| r.same_target(&reference)) {
            return false;
        }
        self.0.push(reference);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JReference> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[JReference] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First variable reference with this simple name
    pub fn variable(&self, name: &str) -> Option<&JReference> {
        self.0.iter().find(|r| r.is_variable() && r.name() == name)
    }

    pub fn by_qualified_name(&self, qualified_name: &str) -> Option<&JReference> {
        self.0.iter().find(|r| r.qualified_name() == qualified_name)
    }
}

impl<'a> IntoIterator for &'a ReferenceList {
    type Item = &'a JReference;
    type IntoIter = std::slice::Iter<'a, JReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Def/use descriptor of a statement-level node
///
/// Method references appear on the use side: a call uses the method it
/// invokes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefUse {
    defs: ReferenceList,
    uses: ReferenceList,
}

impl DefUse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a definition
    pub fn def(mut self, reference: impl Into<JReference>) -> Self {
        self.add_def(reference.into());
        self
    }

    /// Builder: add a use
    pub fn using(mut self, reference: impl Into<JReference>) -> Self {
        self.add_use(reference.into());
        self
    }

    pub fn add_def(&mut self, reference: JReference) -> bool {
        self.defs.add(reference)
    }

    pub fn add_use(&mut self, reference: JReference) -> bool {
        self.uses.add(reference)
    }

    /// Fold another statement's references into this one, keeping order
    pub fn merge(&mut self, other: &DefUse) {
        for r in &other.defs {
            self.defs.add(r.clone());
        }
        for r in &other.uses {
            self.uses.add(r.clone());
        }
    }

    pub fn defs(&self) -> &ReferenceList {
        &self.defs
    }

    pub fn uses(&self) -> &ReferenceList {
        &self.uses
    }

    pub fn def_variables(&self) -> impl Iterator<Item = &JReference> + '_ {
        self.defs.iter().filter(|r| r.is_variable())
    }

    pub fn use_variables(&self) -> impl Iterator<Item = &JReference> + '_ {
        self.uses.iter().filter(|r| r.is_variable())
    }

    pub fn called_methods(&self) -> impl Iterator<Item = &JReference> + '_ {
        self.uses.iter().filter(|r| !r.is_variable())
    }

    pub fn def_fields(&self) -> impl Iterator<Item = &JReference> + '_ {
        self.defs.iter().filter(|r| r.is_field())
    }

    pub fn use_fields(&self) -> impl Iterator<Item = &JReference> + '_ {
        self.uses.iter().filter(|r| r.is_field())
    }

    pub fn def_variable(&self, name: &str) -> Option<&JReference> {
        self.defs.variable(name)
    }

    pub fn use_variable(&self, name: &str) -> Option<&JReference> {
        self.uses.variable(name)
    }

    pub fn defines(&self, name: &str) -> bool {
        self.def_variable(name).is_some()
    }

    pub fn uses_variable(&self, name: &str) -> bool {
        self.use_variable(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty() && self.uses.is_empty()
    }
}
