//! Store Infrastructure

mod cfg_store;

pub use cfg_store::CfgStore;
