//! # Domain Layer (Inner Hexagon)
//!
//! Records, key derivation, value objects and settlement rules.
//! NO I/O, NO async.

pub mod entities;
pub mod invariants;
pub mod keys;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use keys::*;
pub use services::*;
pub use value_objects::*;
