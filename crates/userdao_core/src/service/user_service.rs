//! User use-case service with the never-failing legacy contract.
//!
//! # Responsibility
//! - Expose table lifecycle and CRUD calls that never return errors.
//! - Delegate persistence and error logging to the repository.
//!
//! # Invariants
//! - Failures are already logged by the repository; this layer drops them.
//! - `get_all_users` returns an empty list on failure, never an absent value.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;

/// Legacy-style wrapper over a `UserRepository`.
///
/// Callers that must tell a failure from an empty result should go through
/// [`UserService::repository`] instead.
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_users_table(&self) {
        let _ = self.repo.create_table();
    }

    pub fn drop_users_table(&self) {
        let _ = self.repo.drop_table();
    }

    pub fn save_user(&self, first_name: &str, last_name: &str, age: u8) {
        let _ = self.repo.save(first_name, last_name, age);
    }

    pub fn remove_user_by_id(&self, id: UserId) {
        let _ = self.repo.remove_by_id(id);
    }

    pub fn get_all_users(&self) -> Vec<User> {
        self.repo.find_all().unwrap_or_default()
    }

    pub fn clean_users_table(&self) {
        let _ = self.repo.clear();
    }
}
