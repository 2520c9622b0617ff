//! Search history store
//!
//! The whole history lives in one JSON array on disk. Every append reads the
//! file, pushes one entry and rewrites it in full. Appends and reads inside
//! this process are serialized by a mutex; nothing protects against another
//! process writing the same file, and the rewrite is not atomic.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::Result;
use crate::models::{HistoryEntry, LocationResult};

pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a query and its result with the current timestamp.
    #[instrument(name = "append_history", level = "debug", skip(self, result))]
    pub async fn append(
        &self,
        location_query: &str,
        result: LocationResult,
    ) -> Result<HistoryEntry> {
        let _guard = self.lock.lock().await;

        let mut history = self.load().await?;
        let entry = HistoryEntry::now(location_query.to_string(), result);
        history.push(entry.clone());
        self.store(&history).await?;

        debug!("History now holds {} entries", history.len());
        Ok(entry)
    }

    /// All entries in insertion order; empty when the file does not exist.
    pub async fn read_all(&self) -> Result<Vec<HistoryEntry>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn load(&self) -> Result<Vec<HistoryEntry>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history file at {}", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, history: &[HistoryEntry]) -> Result<()> {
        let mut bytes = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        history.serialize(&mut serializer)?;

        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherLogError;
    use crate::weather::canned_forecast;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("search_history.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.read_all().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for query in ["test", "TEST", "Test"] {
            store.append(query, canned_forecast()).await.unwrap();
        }

        let history = store.read_all().await.unwrap();
        let queries: Vec<_> = history.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(queries, ["test", "TEST", "Test"]);
        assert!(history.iter().all(|e| e.data.forecast.len() == 7));
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append("test", canned_forecast()).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n    {\n        \"location\": \"test\""));

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["data"]["location"], "Test City");
        assert_eq!(value[0]["data"]["forecast"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.read_all().await.unwrap_err();
        assert!(matches!(err, WeatherLogError::Json { .. }));
        assert!(store.append("test", canned_forecast()).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.append(&format!("query-{i}"), canned_forecast()).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.read_all().await.unwrap().len(), 16);
    }
}
