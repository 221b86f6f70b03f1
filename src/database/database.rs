use log::{debug, error, info, warn};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tokio_rusqlite::Connection;

use crate::food::models::MealRecord;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),
    #[error("Database connection error: {0}")]
    Connection(String),
    #[error("Failed to encode cache data: {0}")]
    Encode(String),
    #[error("Failed to decode cache data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Whether a miss is written back. `ReadOnly` only ever reads existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    ReadWrite,
    ReadOnly,
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read-write" | "readwrite" | "rw" => Ok(CacheMode::ReadWrite),
            "read-only" | "readonly" | "ro" => Ok(CacheMode::ReadOnly),
            other => Err(format!("unknown cache mode: {}", other)),
        }
    }
}

/// Canonical identity of a search: both ingredient lists as JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey {
    pub included: String,
    pub excluded: String,
}

impl QueryKey {
    pub fn new(included: &[String], excluded: &[String]) -> Result<Self, CacheError> {
        Ok(Self {
            included: encode_list(included)?,
            excluded: encode_list(excluded)?,
        })
    }
}

// Keys are written as `["a", "b"]` with non-ASCII escaped, byte-for-byte what
// Python's json.dumps produces, so meals.db files filled by the older scripts keep matching.
struct KeyFormatter;

impl serde_json::ser::Formatter for KeyFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn encode_list(items: &[String]) -> Result<String, CacheError> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, KeyFormatter);
    items
        .serialize(&mut serializer)
        .map_err(|e| CacheError::Encode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| CacheError::Encode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct MealCache {
    path: PathBuf,
    mode: CacheMode,
}

impl MealCache {
    pub fn new<P: AsRef<Path>>(path: P, mode: CacheMode) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Every operation opens and closes its own connection
    async fn open(&self) -> Result<Connection, CacheError> {
        Connection::open(&self.path)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }

    pub async fn initialize(&self) -> Result<(), CacheError> {
        let conn = self.open().await?;
        conn.call(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS meals (
                    id INTEGER PRIMARY KEY,
                    included_ingredients TEXT,
                    excluded_ingredients TEXT,
                    meal_data TEXT
                );
                CREATE UNIQUE INDEX IF NOT EXISTS meals_query
                    ON meals (included_ingredients, excluded_ingredients);",
            )
        })
        .await?;

        info!("Meal cache initialized at {}", self.path.display());
        Ok(())
    }

    pub async fn try_lookup(&self, key: &QueryKey) -> Result<Option<Vec<MealRecord>>, CacheError> {
        let included = key.included.clone();
        let excluded = key.excluded.clone();

        let conn = self.open().await?;
        let row = conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT meal_data FROM meals WHERE included_ingredients = ?1 AND excluded_ingredients = ?2",
                )?;
                let mut rows = stmt.query([&included, &excluded])?;

                if let Some(row) = rows.next()? {
                    Ok(Some(row.get::<_, String>(0)?))
                } else {
                    Ok(None)
                }
            })
            .await?;

        match row {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    /// Cached meals for `key`. Misses and storage failures both come back as `None`.
    pub async fn lookup(&self, key: &QueryKey) -> Option<Vec<MealRecord>> {
        match self.try_lookup(key).await {
            Ok(Some(meals)) => {
                debug!("Cache hit for {} / {}", key.included, key.excluded);
                Some(meals)
            }
            Ok(None) => None,
            Err(e) => {
                error!("Database error: {}", e);
                None
            }
        }
    }

    pub async fn try_store(&self, key: &QueryKey, meals: &[MealRecord]) -> Result<(), CacheError> {
        let included = key.included.clone();
        let excluded = key.excluded.clone();
        let data = serde_json::to_string(meals).map_err(|e| CacheError::Encode(e.to_string()))?;

        let conn = self.open().await?;
        conn.call(move |conn| {
            let updated = conn.execute(
                "UPDATE meals SET meal_data = ?3 WHERE included_ingredients = ?1 AND excluded_ingredients = ?2",
                [&included, &excluded, &data],
            )?;
            if updated == 0 {
                conn.execute(
                    "INSERT INTO meals (included_ingredients, excluded_ingredients, meal_data) VALUES (?1, ?2, ?3)",
                    [&included, &excluded, &data],
                )?;
            }
            Ok(())
        })
        .await?;

        Ok(())
    }

    /// Writes `meals` under `key` unless the cache is read-only. Failures are logged.
    pub async fn store(&self, key: &QueryKey, meals: &[MealRecord]) {
        if self.mode == CacheMode::ReadOnly {
            debug!("Read-only cache, not storing {} meals", meals.len());
            return;
        }
        if meals.is_empty() {
            debug!("Nothing to cache for {} / {}", key.included, key.excluded);
            return;
        }

        match self.try_store(key, meals).await {
            Ok(()) => info!("Cached {} meals", meals.len()),
            Err(e) => warn!("Database error while caching meals: {}", e),
        }
    }
}
