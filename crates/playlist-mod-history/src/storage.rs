/// String-keyed storage backends for persisted playlist state.
///
/// `RedbStore` keeps records in a single redb table (`kv`: `&str` → `&str`).
/// `MemoryStore` is a process-local map for tests and throwaway sessions.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use redb::{Database, ReadableDatabase, TableDefinition};

/// Key-value table: storage key → JSON text.
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "playlist.redb";

/// Minimal string-keyed store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Inserts or overwrites the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Deletes `key`. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Persistent store backed by redb.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbStore {
    /// Opens or creates `playlist.redb` in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open_in(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Self::open(&data_dir.join(DB_FILE_NAME))
    }

    /// Opens or creates the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the table
    /// cannot be created.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path)
            .with_context(|| format!("Failed to open playlist database: {}", path.display()))?;

        // Ensure the table exists
        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(KV_TABLE)
                .context("Failed to create kv table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        tracing::debug!("Opened playlist database at {}", path.display());
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(KV_TABLE)
            .context("Failed to open kv table")?;

        match table.get(key).context("Failed to read value")? {
            Some(guard) => Ok(Some(guard.value().to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(KV_TABLE)
                .context("Failed to open kv table")?;
            table.insert(key, value).context("Failed to insert value")?;
        }
        write_txn.commit().context("Failed to commit value")?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(KV_TABLE)
                .context("Failed to open kv table")?;
            table.remove(key).context("Failed to remove value")?;
        }
        write_txn.commit().context("Failed to commit removal")?;
        Ok(())
    }
}

/// In-memory store; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
