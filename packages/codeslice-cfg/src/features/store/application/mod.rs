//! Store Application Layer
//!
//! Use cases over a shared build session.

mod coordinator;

pub use coordinator::BuildCoordinator;
