//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the `users` table lifecycle and its CRUD statements.
//! - Run every operation as one transaction on a session from the injected provider.
//!
//! # Invariants
//! - Write paths call `NewUser::validate()` before any session is opened.
//! - A failed operation rolls back its transaction and is returned as `Err`.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::{DbError, SessionProvider};
use crate::logging::sanitize_message;
use crate::model::user::{NewUser, User, UserId, UserValidationError};
use log::{debug, error, info, warn};
use rusqlite::{params, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const CREATE_USERS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age BETWEEN 0 AND 255)
);";

const DROP_USERS_TABLE_SQL: &str = "DROP TABLE IF EXISTS users;";

const USER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    age
FROM users";

const MAX_LOGGED_VALUE_CHARS: usize = 120;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by every user repository operation.
#[derive(Debug)]
pub enum RepoError {
    Validation(UserValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for the `users` table.
///
/// Each method is one independent transaction.
pub trait UserRepository {
    /// Creates the table if it does not exist yet.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the table if it exists.
    fn drop_table(&self) -> RepoResult<()>;
    /// Inserts one user and returns it with the store-assigned id.
    fn save(&self, first_name: &str, last_name: &str, age: u8) -> RepoResult<User>;
    /// Deletes the user with `id`. Returns `false` when no row matched.
    fn remove_by_id(&self, id: UserId) -> RepoResult<bool>;
    /// Returns every row in store order.
    fn find_all(&self) -> RepoResult<Vec<User>>;
    /// Deletes every row and keeps the table. Returns the deleted row count.
    fn clear(&self) -> RepoResult<usize>;
}

/// SQLite-backed user repository over an injected session provider.
#[derive(Debug)]
pub struct SqliteUserRepository<P> {
    provider: P,
}

impl<P: SessionProvider> SqliteUserRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs `work` inside one transaction on a fresh session.
    ///
    /// Commits when `work` succeeds; otherwise rolls back and logs `event`
    /// with `status=error`. The session is released on every path.
    fn in_transaction<T>(
        &self,
        event: &'static str,
        work: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let outcome = self.run_transaction(event, work);

        match &outcome {
            Ok(_) => debug!(
                "event={} module=repo status=ok duration_ms={}",
                event,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={} module=repo status=error duration_ms={} error={}",
                event,
                started_at.elapsed().as_millis(),
                sanitize_message(&err.to_string(), MAX_LOGGED_VALUE_CHARS)
            ),
        }
        outcome
    }

    fn run_transaction<T>(
        &self,
        event: &'static str,
        work: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut session = self.provider.open_session()?;
        let tx = session.transaction()?;

        match work(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                roll_back(tx, event);
                Err(err)
            }
        }
    }
}

impl<P: SessionProvider> UserRepository for SqliteUserRepository<P> {
    fn create_table(&self) -> RepoResult<()> {
        self.in_transaction("user_table_create", |tx| {
            tx.execute_batch(CREATE_USERS_TABLE_SQL)?;
            Ok(())
        })
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.in_transaction("user_table_drop", |tx| {
            tx.execute_batch(DROP_USERS_TABLE_SQL)?;
            Ok(())
        })
    }

    fn save(&self, first_name: &str, last_name: &str, age: u8) -> RepoResult<User> {
        let new_user = NewUser::new(first_name, last_name, age);
        if let Err(err) = new_user.validate() {
            warn!(
                "event=user_save module=repo status=error error_code=validation_failed error={err}"
            );
            return Err(err.into());
        }

        let id = self.in_transaction("user_save", |tx| {
            tx.execute(
                "INSERT INTO users (first_name, last_name, age) VALUES (?1, ?2, ?3);",
                params![new_user.first_name, new_user.last_name, new_user.age],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        info!(
            "event=user_save module=repo status=ok user_id={} first_name={}",
            id,
            sanitize_message(&new_user.first_name, MAX_LOGGED_VALUE_CHARS)
        );
        Ok(new_user.into_user(id))
    }

    fn remove_by_id(&self, id: UserId) -> RepoResult<bool> {
        let changed = self.in_transaction("user_remove", |tx| {
            Ok(tx.execute("DELETE FROM users WHERE id = ?1;", [id])?)
        })?;

        if changed == 0 {
            debug!("event=user_remove module=repo status=noop user_id={id}");
        }
        Ok(changed > 0)
    }

    fn find_all(&self) -> RepoResult<Vec<User>> {
        self.in_transaction("user_list", |tx| {
            let mut stmt = tx.prepare(&format!("{USER_SELECT_SQL};"))?;
            let mut rows = stmt.query([])?;
            let mut users = Vec::new();

            while let Some(row) = rows.next()? {
                users.push(parse_user_row(row)?);
            }

            Ok(users)
        })
    }

    fn clear(&self) -> RepoResult<usize> {
        self.in_transaction("user_clear", |tx| {
            Ok(tx.execute("DELETE FROM users;", [])?)
        })
    }
}

fn roll_back(tx: Transaction<'_>, event: &str) {
    match tx.rollback() {
        Ok(()) => warn!("event=tx_rollback module=repo status=ok op={event}"),
        Err(err) => {
            error!("event=tx_rollback module=repo status=error op={event} error={err}")
        }
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id: UserId = row.get("id")?;

    let raw_age: i64 = row.get("age")?;
    let age = u8::try_from(raw_age).map_err(|_| {
        RepoError::InvalidData(format!("invalid age `{raw_age}` in users.age for id {id}"))
    })?;

    let user = User {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        age,
    };
    user.validate()
        .map_err(|err| RepoError::InvalidData(format!("user {id}: {err}")))?;
    Ok(user)
}
