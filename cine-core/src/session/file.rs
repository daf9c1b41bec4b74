use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cine_config::SessionConfig;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use super::{SessionStore, StorageError};

type Entries = BTreeMap<String, String>;

/// Session store backed by a small JSON object on disk.
///
/// A missing file reads as empty. Writes go to a temporary file in the same
/// directory and are renamed into place, so a crash never leaves a torn
/// file behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: Arc<PathBuf>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self, StorageError> {
        config
            .store_path()
            .map(Self::new)
            .ok_or(StorageError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        let path = Arc::clone(&self.path);
        blocking(move || read_entries(&path)).await
    }

    async fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries) -> bool + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = Arc::clone(&self.path);
        blocking(move || {
            let mut entries = read_entries(&path)?;
            if apply(&mut entries) {
                write_entries(&path, &entries)?;
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (key, value) = (key.to_string(), value.to_string());
        debug!(path = %self.path.display(), %key, "writing session entry");
        self.update(move |entries| {
            entries.insert(key, value);
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = key.to_string();
        debug!(path = %self.path.display(), %key, "removing session entry");
        self.update(move |entries| entries.remove(&key).is_some())
            .await
    }
}

async fn blocking<T, F>(task: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|err| {
        StorageError::io(PathBuf::new(), std::io::Error::other(err))
    })?
}

fn read_entries(path: &Path) -> Result<Entries, StorageError> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Entries::new());
        }
        Err(err) => return Err(StorageError::io(path, err)),
    };
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Entries::new());
    }
    serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupted {
        path: path.to_path_buf(),
        source,
    })
}

fn write_entries(path: &Path, entries: &Entries) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|err| StorageError::io(dir, err))?;

    let mut tmp =
        NamedTempFile::new_in(dir).map_err(|err| StorageError::io(dir, err))?;
    let body = serde_json::to_vec_pretty(entries).map_err(|source| {
        StorageError::Corrupted {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tmp.write_all(&body)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|err| StorageError::io(tmp.path(), err))?;
    tmp.persist(path)
        .map_err(|err| StorageError::io(path, err.error))?;
    Ok(())
}
