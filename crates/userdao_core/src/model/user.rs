//! User domain model.
//!
//! # Responsibility
//! - Define the record stored in the `users` table.
//! - Separate unsaved input (`NewUser`) from persisted rows (`User`).
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - First and last names are non-blank and at most `MAX_NAME_CHARS` long.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned auto-increment identifier.
pub type UserId = i64;

/// Longest accepted first/last name, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Validation failures for user input and persisted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyFirstName,
    EmptyLastName,
    FirstNameTooLong { len: usize, max: usize },
    LastNameTooLong { len: usize, max: usize },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name cannot be empty"),
            Self::EmptyLastName => write!(f, "last name cannot be empty"),
            Self::FirstNameTooLong { len, max } => {
                write!(f, "first name has {len} characters; at most {max} allowed")
            }
            Self::LastNameTooLong { len, max } => {
                write!(f, "last name has {len} characters; at most {max} allowed")
            }
        }
    }
}

impl Error for UserValidationError {}

/// A user that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
}

impl NewUser {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: u8) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }

    /// Attaches the store-assigned id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
        }
    }
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
}

impl User {
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_names(&self.first_name, &self.last_name)
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User {{ id: {}, name: {} {}, age: {} }}",
            self.id, self.first_name, self.last_name, self.age
        )
    }
}

fn validate_names(first_name: &str, last_name: &str) -> Result<(), UserValidationError> {
    if first_name.trim().is_empty() {
        return Err(UserValidationError::EmptyFirstName);
    }
    if last_name.trim().is_empty() {
        return Err(UserValidationError::EmptyLastName);
    }

    let len = first_name.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(UserValidationError::FirstNameTooLong {
            len,
            max: MAX_NAME_CHARS,
        });
    }
    let len = last_name.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(UserValidationError::LastNameTooLong {
            len,
            max: MAX_NAME_CHARS,
        });
    }

    Ok(())
}
