//! SQLite settings store with in-memory cache.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;
use datagrid_lib::error::SettingsError;
use datagrid_lib::settings::{SettingValue, SettingsStore};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{StoreError, paths};

/// SQLite-backed settings storage with DashMap cache.
///
/// Each value is stored as text next to its type tag, so a width written
/// as an integer reads back as an integer.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    cache: DashMap<String, SettingValue>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            log::warn!("failed to create {}: {e}", parent.display());
        }
        Self::init(Connection::open(path)?)
    }

    /// Open the per-user database at [`paths::settings_db`].
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(paths::settings_db().ok_or(StoreError::NoDataDir)?)
    }

    /// A private database that disappears with the store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                ty TEXT NOT NULL,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            cache: DashMap::new(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn load(&self, key: &str) -> Result<Option<SettingValue>, StoreError> {
        let row: Option<(String, String)> = self
            .conn()?
            .query_row(
                "SELECT ty, value FROM settings WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        match row {
            Some((tag, value)) => SettingValue::parse_tagged(&tag, &value)
                .map(Some)
                .ok_or_else(|| StoreError::Corrupt {
                    key: key.to_string(),
                    tag,
                    value,
                }),
            None => Ok(None),
        }
    }

    fn store(&self, key: &str, value: &SettingValue) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT INTO settings (key, ty, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET ty = excluded.ty, value = excluded.value",
            params![key, value.type_tag(), value.to_string()],
        )?;
        Ok(())
    }

    fn prefixed(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        // substr instead of LIKE: keys contain '_', a LIKE wildcard.
        let mut stmt = conn.prepare(
            "SELECT key FROM settings WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let keys = stmt
            .query_map([prefix], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

impl SettingsStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<SettingValue>, SettingsError> {
        // Check cache first
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let result = self.load(key)?;
        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(result)
    }

    fn set(&self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        self.store(key, &value)?;
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.conn()?
            .execute("DELETE FROM settings WHERE key = ?1", [key])
            .map_err(StoreError::from)?;
        self.cache.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        Ok(self.prefixed(prefix)?)
    }
}
