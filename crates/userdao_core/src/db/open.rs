//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from a `StoreConfig`.
//! - Configure connection pragmas required by repository behavior.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections honor the configured busy timeout.

use super::DbResult;
use crate::config::{StoreConfig, StoreLocation};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Opens and bootstraps one connection for the configured store.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - Returns `DbError::InvalidConfig` when the config does not validate.
/// - Returns `DbError::Sqlite` when opening or configuring the connection fails.
pub fn open_connection(config: &StoreConfig) -> DbResult<Connection> {
    config.validate()?;

    let started_at = Instant::now();
    let mode = config.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match &config.location {
        StoreLocation::Memory => Connection::open_in_memory(),
        StoreLocation::File(path) => Connection::open(path),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, config) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection, config: &StoreConfig) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(config.busy_timeout)?;
    Ok(())
}
