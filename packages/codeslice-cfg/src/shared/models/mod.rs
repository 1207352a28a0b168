//! Shared models

mod ids;
mod modifiers;
mod span;

pub use ids::{IdAllocator, NodeId};
pub use modifiers::Modifiers;
pub use span::{Location, Span};
