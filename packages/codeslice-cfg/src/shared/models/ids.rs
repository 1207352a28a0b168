//! Node identity
//!
//! Ids are handed out by an [`IdAllocator`] owned by one build session
//! (`CfgStore`). Two sessions never share an allocator, so ids stay unique
//! within a session without any global counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identity of a graph node, unique within one build session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw id. Intended for tests and deserialization; builders use
    /// [`IdAllocator::allocate`].
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source for one build session
///
/// The first id is 1. `reset` starts the sequence over and must only be
/// called together with dropping every graph built from this allocator.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// The id the next `allocate` call will return
    pub fn peek(&self) -> NodeId {
        NodeId(self.next)
    }

    /// Number of ids handed out since the last reset
    pub fn allocated(&self) -> usize {
        (self.next - 1) as usize
    }

    pub fn reset(&mut self) {
        self.next = 1;
    }
}
