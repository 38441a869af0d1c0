//! Delivery of finished documents

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::error::{VantageError, VantageResult};

/// Receives a finished document under its suggested filename
pub trait DocumentSink: Send + Sync {
    /// Deliver `bytes`, returning where they ended up
    fn deliver(&self, filename: &str, bytes: &[u8]) -> VantageResult<PathBuf>;
}

/// Writes documents into a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// On-disk name for a suggested filename
    ///
    /// Path separators are replaced so a location name can never escape the
    /// output directory.
    pub fn disk_name(filename: &str) -> String {
        filename.replace(['/', '\\'], "-")
    }
}

impl DocumentSink for FileSink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> VantageResult<PathBuf> {
        let path = self.dir.join(Self::disk_name(filename));
        write_atomic(&path, bytes)?;
        Ok(path)
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// Every write gets its own temp file, so concurrent deliveries of the same
/// name each land a complete file and the last rename wins.
fn write_atomic(path: &Path, bytes: &[u8]) -> VantageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            VantageError::Delivery(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!("{}.{}.tmp", file_name, Uuid::new_v4()));
    let file = File::create(&temp_path).map_err(|e| {
        VantageError::Delivery(format!("Failed to create {}: {}", temp_path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| VantageError::Delivery(format!("Failed to write {}: {}", temp_path.display(), e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| VantageError::Delivery(format!("Failed to sync {}: {}", temp_path.display(), e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        VantageError::Delivery(format!("Failed to move file into place at {}: {}", path.display(), e))
    })?;

    Ok(())
}

/// Keeps delivered documents in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filenames delivered so far, in order
    pub fn filenames(&self) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Bytes of the most recent delivery
    pub fn last_bytes(&self) -> Option<Vec<u8>> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|(_, bytes)| bytes.clone())
    }
}

impl DocumentSink for MemorySink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> VantageResult<PathBuf> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}
