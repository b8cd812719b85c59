//! SQLite-backed durable key/value storage.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for durable storage.
//! - Configure connection pragmas and apply migrations before use.
//! - Implement `KvStorage` over the `kv_store` table.
//!
//! # Invariants
//! - Returned stores have `foreign_keys=ON` and migrations fully applied.
//! - Each `put` replaces the whole blob for a key in one statement.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{error, info};
use rusqlite::{Connection, OptionalExtension};

use crate::storage::kv::KvStorage;
use crate::storage::migrations::{apply_migrations, current_user_version, latest_version};
use crate::storage::{StorageError, StorageResult};

/// Durable storage over a single SQLite `kv_store` table.
pub struct SqliteKvStorage {
    conn: Connection,
}

impl SqliteKvStorage {
    /// Wraps an already-bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the connection was not opened through
    ///   `open_store`/`open_store_in_memory` (wrong `user_version` or missing
    ///   `kv_store` table).
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let actual_version = current_user_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            return Err(StorageError::MissingTable("kv_store"));
        }

        Ok(Self { conn })
    }
}

impl KvStorage for SqliteKvStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Opens a durable store file and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> StorageResult<SqliteKvStorage> {
    let started_at = Instant::now();
    info!("event=store_open module=storage status=start mode=file");
    finish_open(Connection::open(path), started_at, "file")
}

/// Opens an in-memory durable store and applies all pending migrations.
///
/// Used by tests and the CLI smoke probe.
pub fn open_store_in_memory() -> StorageResult<SqliteKvStorage> {
    let started_at = Instant::now();
    info!("event=store_open module=storage status=start mode=memory");
    finish_open(Connection::open_in_memory(), started_at, "memory")
}

fn finish_open(
    opened: Result<Connection, rusqlite::Error>,
    started_at: Instant,
    mode: &str,
) -> StorageResult<SqliteKvStorage> {
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=storage status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=store_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            SqliteKvStorage::try_new(conn)
        }
        Err(err) => {
            error!(
                "event=store_open module=storage status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{open_store_in_memory, SqliteKvStorage};
    use crate::storage::{KvStorage, StorageError};
    use rusqlite::Connection;

    #[test]
    fn put_get_remove_round_trip() {
        let mut store = open_store_in_memory().unwrap();
        assert_eq!(store.get("db").unwrap(), None);

        store.put("db", "{\"users\":[]}").unwrap();
        assert_eq!(store.get("db").unwrap().as_deref(), Some("{\"users\":[]}"));

        store.put("db", "{\"users\":[1]}").unwrap();
        assert_eq!(store.get("db").unwrap().as_deref(), Some("{\"users\":[1]}"));

        store.remove("db").unwrap();
        assert_eq!(store.get("db").unwrap(), None);
    }

    #[test]
    fn try_new_rejects_uninitialized_connection() {
        let conn = Connection::open_in_memory().unwrap();
        match SqliteKvStorage::try_new(conn) {
            Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version: 0,
            }) => assert!(expected_version > 0),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected uninitialized connection error"),
        }
    }
}
