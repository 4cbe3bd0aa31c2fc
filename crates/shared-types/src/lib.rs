//! # Shared Types Crate
//!
//! Core value types shared across all Oracle-Mesh subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers and operator records used by
//!   more than one subsystem are defined here and nowhere else.
//! - **Plain data**: no I/O, no crypto, no error taxonomy. Each subsystem
//!   owns its own error enum.

pub mod entities;

pub use entities::*;
