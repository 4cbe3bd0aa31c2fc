//! Inbound (API) and outbound (SPI) port definitions.

pub mod inbound;
pub mod outbound;
