//! Scoped sessions and the provider seam repositories depend on.
//!
//! # Responsibility
//! - Define `SessionProvider`, the injected collaborator that opens sessions.
//! - Provide the SQLite-backed `SqliteSessionFactory`.
//!
//! # Invariants
//! - In-memory stores share one connection; a session holds its lock until drop.
//! - File stores open one bootstrapped connection per session.

use super::open::open_connection;
use super::{DbError, DbResult};
use crate::config::{StoreConfig, StoreLocation};
use log::{debug, error};
use rusqlite::Connection;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard};

/// Opens sessions against a store.
pub trait SessionProvider {
    fn open_session(&self) -> DbResult<Session<'_>>;
}

impl<P: SessionProvider + ?Sized> SessionProvider for &P {
    fn open_session(&self) -> DbResult<Session<'_>> {
        (**self).open_session()
    }
}

impl<P: SessionProvider + ?Sized> SessionProvider for Arc<P> {
    fn open_session(&self) -> DbResult<Session<'_>> {
        (**self).open_session()
    }
}

/// Scoped connection handle. Dereferences to `rusqlite::Connection`.
pub struct Session<'p> {
    conn: SessionConn<'p>,
}

enum SessionConn<'p> {
    Owned(Connection),
    Shared(MutexGuard<'p, Connection>),
}

impl Session<'static> {
    /// Wraps a connection the session owns and closes on drop.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: SessionConn::Owned(conn),
        }
    }
}

impl<'p> Session<'p> {
    fn shared(guard: MutexGuard<'p, Connection>) -> Self {
        Self {
            conn: SessionConn::Shared(guard),
        }
    }

    fn kind(&self) -> &'static str {
        match self.conn {
            SessionConn::Owned(_) => "owned",
            SessionConn::Shared(_) => "shared",
        }
    }
}

impl Deref for Session<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match &self.conn {
            SessionConn::Owned(conn) => conn,
            SessionConn::Shared(guard) => &**guard,
        }
    }
}

impl DerefMut for Session<'_> {
    fn deref_mut(&mut self) -> &mut Connection {
        match &mut self.conn {
            SessionConn::Owned(conn) => conn,
            SessionConn::Shared(guard) => &mut **guard,
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        debug!("event=session_close module=db status=ok kind={}", self.kind());
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("kind", &self.kind()).finish()
    }
}

/// SQLite session provider built from a `StoreConfig`.
#[derive(Debug)]
pub struct SqliteSessionFactory {
    config: StoreConfig,
    shared: Option<Mutex<Connection>>,
}

impl SqliteSessionFactory {
    /// Builds a factory; in-memory stores open their shared connection here.
    ///
    /// # Errors
    /// - Returns `DbError::InvalidConfig` for an invalid config.
    /// - Returns `DbError::Sqlite` when the in-memory connection cannot open.
    pub fn new(config: StoreConfig) -> DbResult<Self> {
        config.validate()?;
        let shared = match config.location {
            StoreLocation::Memory => Some(Mutex::new(open_connection(&config)?)),
            StoreLocation::File(_) => None,
        };
        Ok(Self { config, shared })
    }

    pub fn in_memory() -> DbResult<Self> {
        Self::new(StoreConfig::in_memory())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl SessionProvider for SqliteSessionFactory {
    fn open_session(&self) -> DbResult<Session<'_>> {
        let session = match &self.shared {
            Some(shared) => shared.lock().map(Session::shared).map_err(|_| {
                DbError::SessionUnavailable("in-memory session lock poisoned".to_string())
            }),
            None => open_connection(&self.config).map(Session::from_connection),
        };

        match &session {
            Ok(session) => debug!(
                "event=session_open module=db status=ok kind={}",
                session.kind()
            ),
            Err(err) => error!(
                "event=session_open module=db status=error mode={} error={}",
                self.config.mode(),
                err
            ),
        }
        session
    }
}
