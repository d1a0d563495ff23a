//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for users.
//! - Isolate SQLite statements from service orchestration.
//!
//! # Invariants
//! - Repository APIs return errors instead of swallowing them.

pub mod user_repo;
