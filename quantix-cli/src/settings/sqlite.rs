//! SQLite preferences store.
//!
//! The table is tiny, so every row is loaded into the cache when the database
//! is opened and reads never touch SQLite afterwards.

use std::path::Path;
use std::path::PathBuf;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL
)";

/// SQLite-backed preferences with a write-through DashMap cache.
pub struct SqliteBackend {
    path: PathBuf,
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the preferences database at `path`.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let client = async_sqlite::ClientBuilder::new()
            .path(&path)
            .open()
            .await?;

        let rows = client
            .conn(|conn| {
                conn.execute(SCHEMA, [])?;
                let mut stmt = conn.prepare("SELECT key, value FROM preferences")?;
                let rows = stmt.query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;

        log::debug!("Loaded {} stored preferences", rows.len());
        Ok(Self {
            path,
            client,
            cache: rows.into_iter().collect(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.cache.get(key).map(|value| value.clone()))
    }

    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let key_owned = key.to_string();
        let stored = value.clone();
        let updated_at = chrono::Utc::now().to_rfc3339();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE
                     SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![key_owned, stored, updated_at],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        log::debug!("Stored preference {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let key_owned = key.to_string();

        self.client
            .conn(move |conn| conn.execute("DELETE FROM preferences WHERE key = ?1", [&key_owned]))
            .await?;

        self.cache.remove(key);
        log::debug!("Deleted preference {}", key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let mut keys: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
