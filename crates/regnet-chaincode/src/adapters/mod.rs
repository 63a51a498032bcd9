//! # Adapters Layer (Outer Hexagon)
//!
//! Implementations of the driven ports.

pub mod memory_ledger;

pub use memory_ledger::*;
