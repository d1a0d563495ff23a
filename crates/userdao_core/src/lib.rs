//! Core data access for the `users` table.
//! Every repository call is one transaction on an injected session provider.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{LogConfig, StoreConfig, StoreLocation};
pub use db::{DbError, DbResult, Session, SessionProvider, SqliteSessionFactory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{NewUser, User, UserId, UserValidationError, MAX_NAME_CHARS};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
