mod def_use;
mod reference;

pub use def_use::{DefUse, ReferenceList};
pub use reference::{JFieldReference, JLocalReference, JMethodReference, JReference, ReferenceKind};
