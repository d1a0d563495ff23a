//! Domain model for the users store.
//!
//! # Responsibility
//! - Define the data structures repositories persist and return.
//!
//! # Invariants
//! - Every persisted `User` carries a store-assigned id.

pub mod user;
