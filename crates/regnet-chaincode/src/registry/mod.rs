//! # Registry Operations
//!
//! Business operations over a [`TxContext`](crate::context::TxContext).
//! Each function is a linear sequence of reads and checks that either
//! returns early with an error or stages its writes and returns the
//! resulting record. Nothing here commits; the service does.

pub mod properties;
pub mod purchase;
pub mod users;
