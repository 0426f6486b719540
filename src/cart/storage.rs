//! Durable string key-value storage backed by SQLite.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Trait for durable key-value backends.
pub trait KeyValueStorage: Send + Sync {
  /// Get the value stored under `key`, if any.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<()>;

  /// Delete `key` entirely. Missing keys are not an error.
  fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-based storage implementation.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

/// Schema for the key-value table.
const STORAGE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

impl SqliteStorage {
  /// Open or create the storage database at `path`.
  pub fn open(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create storage directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open storage at {}: {}", path.display(), e))?;

    debug!(path = %path.display(), "opened storage");
    Self::with_connection(conn)
  }

  /// Open a private in-memory database.
  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory storage: {}", e))?;
    Self::with_connection(conn)
  }

  fn with_connection(conn: Connection) -> Result<Self> {
    conn
      .execute_batch(STORAGE_SCHEMA)
      .map_err(|e| eyre!("Failed to run storage migrations: {}", e))?;

    Ok(Self {
      conn: Mutex::new(conn),
    })
  }

  fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|e| eyre!("Lock poisoned: {}", e))
  }
}

impl KeyValueStorage for SqliteStorage {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let conn = self.conn()?;
    conn
      .query_row(
        "SELECT value FROM local_storage WHERE key = ?",
        params![key],
        |row| row.get(0),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read key {}: {}", key, e))
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let conn = self.conn()?;
    conn
      .execute(
        "INSERT OR REPLACE INTO local_storage (key, value, updated_at)
         VALUES (?, ?, datetime('now'))",
        params![key, value],
      )
      .map_err(|e| eyre!("Failed to write key {}: {}", key, e))?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    let conn = self.conn()?;
    conn
      .execute("DELETE FROM local_storage WHERE key = ?", params![key])
      .map_err(|e| eyre!("Failed to delete key {}: {}", key, e))?;
    Ok(())
  }
}

/// In-memory storage whose writes can be switched to fail
#[cfg(test)]
pub struct FlakyStorage {
  inner: SqliteStorage,
  fail: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl FlakyStorage {
  pub fn new() -> Self {
    Self {
      inner: SqliteStorage::open_in_memory().unwrap(),
      fail: std::sync::atomic::AtomicBool::new(false),
    }
  }

  pub fn fail_writes(&self, fail: bool) {
    self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
  }

  fn check(&self) -> Result<()> {
    if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
      return Err(eyre!("disk full"));
    }
    Ok(())
  }
}

#[cfg(test)]
impl KeyValueStorage for FlakyStorage {
  fn get(&self, key: &str) -> Result<Option<String>> {
    self.inner.get(key)
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.check()?;
    self.inner.set(key, value)
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.check()?;
    self.inner.remove(key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_missing_key() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.get("cart").unwrap(), None);
  }

  #[test]
  fn test_set_replaces_value() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("cart", "[1]").unwrap();
    storage.set("cart", "[1,2]").unwrap();
    assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[1,2]"));
  }

  #[test]
  fn test_remove_deletes_row() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("cart", "[]").unwrap();
    storage.remove("cart").unwrap();
    assert_eq!(storage.get("cart").unwrap(), None);

    // Removing again is fine
    storage.remove("cart").unwrap();
  }

  #[test]
  fn test_file_storage_survives_reopen() {
    let dir = std::env::temp_dir().join(format!("storefront-storage-{}", std::process::id()));
    let path = dir.join("nested").join("storage.db");

    {
      let storage = SqliteStorage::open(&path).unwrap();
      storage.set("cart", r#"[{"title":"Mug"}]"#).unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    assert_eq!(
      storage.get("cart").unwrap().as_deref(),
      Some(r#"[{"title":"Mug"}]"#)
    );

    drop(storage);
    let _ = std::fs::remove_dir_all(&dir);
  }
}
