//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `UserRegistryApi`, `PropertyRegistryApi`, `PurchaseApi`
//! - **Driven Ports (Outbound)**: `KeyStore`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
