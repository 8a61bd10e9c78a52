use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, error, info};

use crate::error_handling::types::StorageError;
use crate::storage::sink_trait::StorageSink;

const NAMESPACE_EXT: &str = "ns";

/// Filesystem-backed sink: one file per namespace under a base directory,
/// with the same byte budget accounting as the in-memory sink.
///
/// The size index is rebuilt from the directory at startup so a restarted
/// process sees the budget it actually occupies on disk.
pub struct FileSink {
    base_path: PathBuf,
    quota_bytes: usize,
    sizes: Mutex<HashMap<String, usize>>, // maps key to stored byte count
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(base_path: P, quota_bytes: usize) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            error!("Failed to create sink dir {}: {}", base_path.display(), e);
            StorageError::WriteFailed(e.to_string())
        })?;

        let mut sizes = HashMap::new();
        for entry in fs::read_dir(&base_path)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            let entry = entry.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(NAMESPACE_EXT) {
                continue;
            }
            if let (Some(stem), Ok(meta)) =
                (path.file_stem().and_then(|s| s.to_str()), entry.metadata())
            {
                sizes.insert(stem.to_string(), meta.len() as usize);
            }
        }
        info!(
            "FileSink initialized at {} ({} namespace(s), {} byte budget)",
            base_path.display(),
            sizes.len(),
            quota_bytes
        );

        Ok(Self {
            base_path,
            quota_bytes,
            sizes: Mutex::new(sizes),
        })
    }

    fn namespace_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", key, NAMESPACE_EXT))
    }
}

impl StorageSink for FileSink {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.namespace_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut buf = Vec::new();
        File::open(&path)
            .and_then(|mut f| f.read_to_end(&mut buf))
            .map_err(|e| {
                error!("Read failed {}: {}", path.display(), e);
                StorageError::ReadFailed(e.to_string())
            })?;
        debug!("Read {} byte(s) from {}", buf.len(), path.display());
        Ok(Some(buf))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut sizes = self
            .sizes
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let used: usize = sizes.values().sum();
        let replaced = sizes.get(key).copied().unwrap_or(0);
        if used - replaced + value.len() > self.quota_bytes {
            return Err(StorageError::QuotaExceeded);
        }

        let path = self.namespace_path(key);
        let mut f = File::create(&path).map_err(|e| {
            error!("Create failed {}: {}", path.display(), e);
            StorageError::WriteFailed(e.to_string())
        })?;
        f.write_all(value).map_err(|e| {
            error!("Write failed {}: {}", path.display(), e);
            StorageError::WriteFailed(e.to_string())
        })?;
        sizes.insert(key.to_string(), value.len());
        debug!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut sizes = self
            .sizes
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        let path = self.namespace_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                error!("Remove failed {}: {}", path.display(), e);
                StorageError::WriteFailed(e.to_string())
            })?;
            debug!("Removed namespace file {}", path.display());
        }
        sizes.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.namespace_path(key).exists())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let sizes = self
            .sizes
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(sizes.keys().cloned().collect())
    }
}
