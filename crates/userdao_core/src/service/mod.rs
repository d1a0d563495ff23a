//! Caller-facing services.
//!
//! # Responsibility
//! - Wrap repository calls into use-case level APIs.

pub mod user_service;
