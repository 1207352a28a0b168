//! Flow graph algorithms and construction

mod assembler;
mod basic_blocks;
mod dominance;
mod reachability;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::CfgAssembler;
pub use dominance::PostDominatorCache;
pub use reachability::NodeSet;
