//! SQLite storage bootstrap and session provider.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the users store.
//! - Hand out scoped sessions to repositories through `SessionProvider`.
//!
//! # Invariants
//! - Every connection is bootstrapped (pragmas, busy timeout) before use.
//! - A `Session` releases its connection when dropped, on every exit path.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod session;

pub use open::open_connection;
pub use session::{Session, SessionProvider, SqliteSessionFactory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The provider could not hand out a session (for example a poisoned lock).
    SessionUnavailable(String),
    InvalidConfig(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SessionUnavailable(message) => write!(f, "session unavailable: {message}"),
            Self::InvalidConfig(message) => write!(f, "invalid store config: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SessionUnavailable(_) => None,
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
