//! File I/O helpers
//!
//! JSON reads that treat a missing file as empty, and writes that go through a
//! temp file and a rename so a crash never leaves a half-written store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SetAsideError;

/// Read JSON from a file, or `T::default()` when the file is missing
pub fn read_json<T, P>(path: P) -> Result<T, SetAsideError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file yet, starting empty");
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        SetAsideError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        SetAsideError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), "loaded");
    Ok(value)
}

/// Write JSON to `path` atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SetAsideError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SetAsideError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SetAsideError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SetAsideError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SetAsideError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SetAsideError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SetAsideError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "saved");
    Ok(())
}

/// Delete a data file; a file that is already gone is not an error
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<(), SetAsideError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SetAsideError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Shared access to a repository's in-memory map
pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, SetAsideError> {
    lock.read()
        .map_err(|e| SetAsideError::Storage(format!("Failed to acquire read lock: {}", e)))
}

/// Exclusive access to a repository's in-memory map
pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, SetAsideError> {
    lock.write()
        .map_err(|e| SetAsideError::Storage(format!("Failed to acquire write lock: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        name: String,
        cents: i64,
    }

    fn sample() -> Sample {
        Sample {
            name: "rent".to_string(),
            cents: 70000,
        }
    }

    #[test]
    fn test_read_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Sample::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();
        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("sample.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Sample, _>(&path).unwrap_err();
        assert!(matches!(err, SetAsideError::Storage(_)));
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.json");

        remove_if_exists(&path).unwrap();
        write_json_atomic(&path, &sample()).unwrap();
        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_lock_helpers() {
        let lock = RwLock::new(vec![1, 2]);
        write_lock(&lock).unwrap().push(3);
        assert_eq!(read_lock(&lock).unwrap().len(), 3);
    }
}
