//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Persist slots in the `storage_slots` table.
//! - Refuse connections that were not bootstrapped through `db::open_db*`.
//!
//! # Invariants
//! - `set_item` is a single upsert statement, so a slot is never half-written.
//! - Schema checks run once, at construction.

use crate::db::migrations::{current_user_version, latest_version};
use crate::storage::{SlotStorage, StorageError, StorageResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

const SLOTS_TABLE: &str = "storage_slots";
const REQUIRED_COLUMNS: &[&str] = &["key", "value", "updated_at"];

/// Slot storage over an owned, migrated SQLite connection.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is behind this build.
    /// - `MissingRequiredTable` when the slots table or its columns are absent.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns all slot keys in ascending order.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM storage_slots ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl SlotStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO storage_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=slot_write module=storage status=ok backend=sqlite bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM storage_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([SLOTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty()
        || !REQUIRED_COLUMNS
            .iter()
            .all(|required| columns.iter().any(|column| column == required))
    {
        return Err(StorageError::MissingRequiredTable(SLOTS_TABLE));
    }

    Ok(())
}
