//! Adapters (Driven Implementations)

pub mod in_memory;
pub mod quorum_gateway;
