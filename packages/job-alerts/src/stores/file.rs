//! JSON file ledger storage.
//!
//! Document shape is `{"seen": {"<identity key>": "<iso timestamp>"}}`,
//! pretty-printed with sorted keys.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::stores::ledger::DedupLedger;
use crate::traits::store::LedgerStore;

/// Ledger persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    path: PathBuf,
}

impl FileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl LedgerStore for FileLedgerStore {
    async fn load(&self) -> LedgerResult<DedupLedger> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger: no file, starting empty");
                return Ok(DedupLedger::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let ledger: DedupLedger =
            serde_json::from_slice(&bytes).map_err(|source| LedgerError::Corrupt {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!(path = %self.path.display(), entries = ledger.len(), "ledger: loaded");
        Ok(ledger)
    }

    async fn save(&self, ledger: &DedupLedger) -> LedgerResult<()> {
        let mut data = serde_json::to_vec_pretty(ledger).map_err(LedgerError::Serialize)?;
        data.push(b'\n');

        write_atomic(&self.path, &data)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), entries = ledger.len(), "ledger: saved");
        Ok(())
    }
}

/// Write `data` to `path` via a sibling temp file and rename.
///
/// Readers see either the previous content or the new content, never a
/// partial write.
pub async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = temp_path_for(path);
    let mut file = fs::File::create(&temp_path).await.map_err(|e| {
        warn!(temp_path = %temp_path.display(), error = %e, "write_atomic: create failed");
        e
    })?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&temp_path, path).await.map_err(|e| {
        warn!(from = %temp_path.display(), to = %path.display(), error = %e, "write_atomic: rename failed");
        e
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::new(dir.path().join("state.json"));

        let ledger = store.load().await.unwrap();
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = FileLedgerStore::new(dir.path().join("nested").join("state.json"));

        let mut ledger = DedupLedger::new();
        ledger.mark_seen("greenhouse:Acme:1:https://x/1", Utc::now());
        store.save(&ledger).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, ledger);
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_reads_legacy_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"seen": {"lever:Acme:abc:https://jobs.lever.co/acme/abc": "2024-05-01T12:00:00.000001+00:00"}}"#,
        )
        .unwrap();

        let ledger = FileLedgerStore::new(&path).load().await.unwrap();
        assert!(ledger.has_seen("lever:Acme:abc:https://jobs.lever.co/acme/abc"));
    }

    #[tokio::test]
    async fn test_empty_object_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{}").unwrap();

        let ledger = FileLedgerStore::new(&path).load().await.unwrap();
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = FileLedgerStore::new(&path).load().await;
        assert!(matches!(result, Err(LedgerError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_directory_in_place_of_file_is_io_error() {
        let dir = tempdir().unwrap();

        let result = FileLedgerStore::new(dir.path()).load().await;
        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }
}
