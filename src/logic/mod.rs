//! Domain logic

pub mod agents;
pub mod analyst;
pub mod blocklist;
pub mod correlation;
pub mod persistence;
pub mod simulation;
pub mod store;
