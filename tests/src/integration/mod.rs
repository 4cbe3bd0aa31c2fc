//! Cross-subsystem resolution flows.

pub mod anchor_flow;
pub mod resolution_flow;
