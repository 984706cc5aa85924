//! Preference store
//!
//! Small JSON-file-backed key-value store for singleton app preferences
//! (currently only the PIN). A missing file reads as an empty store.

use crate::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;

#[derive(Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read one preference value, or None if the key (or the whole file)
    /// does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.load().await?;
        Ok(values.get(key).cloned())
    }

    /// Persist one preference value, creating the file on first write.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, content).await?;

        tracing::debug!("Saved preference: {}", key);
        Ok(())
    }

    async fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        let values = serde_json::from_str(&content)?;
        Ok(values)
    }
}
