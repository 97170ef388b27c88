//! JSON key/value file store.
//!
//! The file holds a single JSON object. The last known position lives under
//! [`POS_KEY`] as `{"latitude": .., "longitude": ..}` and the session token
//! under [`TOKEN_KEY`]. A missing file or key means "unknown".

use async_trait::async_trait;
use around_core::error::{AroundError, Result};
use around_core::models::{AuthCredential, GeoPosition};
use around_core::ports::LocationStore;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Storage key of the last known position
pub const POS_KEY: &str = "POS_KEY";

/// Storage key of the session token
pub const TOKEN_KEY: &str = "TOKEN_KEY";

/// File-backed key/value store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value, `None` if the file or key does not exist
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    /// Write a value, replacing any previous one
    pub async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await
    }

    /// Delete a key; deleting a missing key is not an error
    pub async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    pub async fn load_credential(&self) -> Result<Option<AuthCredential>> {
        match self.get(TOKEN_KEY).await? {
            Some(Value::String(token)) => Ok(Some(AuthCredential::new(token))),
            Some(other) => Err(AroundError::Serialization(format!(
                "{} must hold a string, found {}",
                TOKEN_KEY, other
            ))),
            None => Ok(None),
        }
    }

    pub async fn save_credential(&self, credential: &AuthCredential) -> Result<()> {
        self.set(TOKEN_KEY, Value::String(credential.token().to_string())).await
    }

    async fn read_entries(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(AroundError::Serialization(format!(
                "State file {} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), keys = entries.len(), "Wrote state file");
        Ok(())
    }
}

#[async_trait]
impl LocationStore for FileStore {
    async fn load_position(&self) -> Result<Option<GeoPosition>> {
        let Some(value) = self.get(POS_KEY).await? else {
            return Ok(None);
        };

        let stored: GeoPosition = serde_json::from_value(value)?;
        GeoPosition::new(stored.latitude, stored.longitude).map(Some)
    }

    async fn save_position(&self, position: GeoPosition) -> Result<()> {
        self.set(POS_KEY, serde_json::to_value(position)?).await
    }
}
