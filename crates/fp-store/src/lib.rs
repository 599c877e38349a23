//! Persistence for planner state.
//!
//! The web client kept each piece of state (user pantry items, race
//! profiles, plan history) as a JSON blob in its own cookie. This crate
//! keeps the same model: a [`StateStore`] is a key/value store of JSON
//! strings, and each state object round-trips through one well-known key.
//!
//! [`Database`] implements the store over a single-table SQLite file;
//! [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Well-known blob keys, matching the web client's cookie names.
pub mod keys {
    /// User-added pantry items (`Vec<FoodItem>`).
    pub const USER_PANTRY_ITEMS: &str = "user_pantry_items";
    /// Race profiles and selection (`ProfileSet`).
    pub const RACE_PROFILES: &str = "race_profiles";
    /// Saved race plans (`PlanHistory`).
    pub const RACE_PLAN_HISTORY: &str = "race_plan_history";
    /// Display unit preferences (`Settings`).
    pub const SETTINGS: &str = "settings";
}

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A state object failed to serialize.
    #[error("failed to encode state blob {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key/value store of JSON state blobs.
///
/// The injected persistence port: pure state objects are loaded from and
/// saved to the store by the application layer; domain logic never touches
/// it.
pub trait StateStore {
    /// Loads the raw blob for a key, `None` if absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Saves a blob, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes a blob. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Loads and decodes a state blob.
///
/// A corrupt blob is treated the same as an absent one: callers fall back
/// to defaults. The store never bricks the application over a bad blob.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            tracing::warn!(%key, %error, "discarding corrupt state blob");
            Ok(None)
        }
    }
}

/// Encodes and saves a state blob.
pub fn save_json<T: Serialize>(
    store: &mut dyn StateStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &raw)
}

/// SQLite-backed store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database, destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            -- State blobs: one JSON document per well-known key.
            -- updated_at: ISO 8601 UTC, for inspection only.
            CREATE TABLE IF NOT EXISTS blobs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl StateStore for Database {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            ",
            params![key, value, updated_at],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        name: String,
        count: u32,
    }

    #[test]
    fn database_round_trips_blobs() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(db.load("missing").unwrap().is_none());

        db.save(keys::SETTINGS, r#"{"a":1}"#).unwrap();
        assert_eq!(db.load(keys::SETTINGS).unwrap().as_deref(), Some(r#"{"a":1}"#));

        // Saving again replaces.
        db.save(keys::SETTINGS, r#"{"a":2}"#).unwrap();
        assert_eq!(db.load(keys::SETTINGS).unwrap().as_deref(), Some(r#"{"a":2}"#));

        db.remove(keys::SETTINGS).unwrap();
        assert!(db.load(keys::SETTINGS).unwrap().is_none());
        // Removing twice is fine.
        db.remove(keys::SETTINGS).unwrap();
    }

    #[test]
    fn typed_helpers_round_trip() {
        let mut store = MemoryStore::new();
        let blob = Blob {
            name: "gel".to_string(),
            count: 3,
        };
        save_json(&mut store, keys::USER_PANTRY_ITEMS, &blob).unwrap();
        let loaded: Blob = load_json(&store, keys::USER_PANTRY_ITEMS).unwrap().unwrap();
        assert_eq!(loaded, blob);
    }

    #[test]
    fn absent_blob_loads_as_none() {
        let store = MemoryStore::new();
        let loaded: Option<Blob> = load_json(&store, keys::RACE_PROFILES).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_blob_degrades_to_none() {
        let mut store = MemoryStore::new();
        store.save(keys::RACE_PROFILES, "definitely not json").unwrap();
        let loaded: Option<Blob> = load_json(&store, keys::RACE_PROFILES).unwrap();
        assert!(loaded.is_none());
    }
}
