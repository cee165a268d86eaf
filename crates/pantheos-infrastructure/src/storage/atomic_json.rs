//! Atomic JSON record files.
//!
//! A thin typed layer over one JSON file: whole-value load, atomic save
//! (tmp file + fsync + rename), locked read-modify-write, and removal,
//! with an advisory lock held across writes.

use pantheos_core::{CoreError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to one JSON-serialized record on disk.
///
/// Readers never observe partial writes: saves go through a temporary file
/// in the same directory followed by an atomic rename, with an explicit
/// fsync before the rename.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle for the record at `path`. The file itself is only
    /// created on the first save.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Returns the path this handle reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err(CoreError)`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes and saves the record atomically.
    ///
    /// Parent directories are created on demand. An advisory lock is held
    /// for the duration of the write so two writers cannot interleave.
    pub fn save(&self, data: &T) -> Result<()> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write_atomic(data)
    }

    /// Performs a read-modify-write under the exclusive lock.
    ///
    /// The closure receives the current record, or `default_value` when the
    /// file is missing or empty, and the modified value is written back
    /// atomically. The lock is held across the read and the write, so no
    /// other writer can slip in between.
    ///
    /// # Arguments
    ///
    /// * `default_value` - Value to modify when no record exists yet
    /// * `f` - Update function that modifies the data
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.write_atomic(&data)
    }

    fn write_atomic(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;

        // Flush to disk before the rename makes the new record visible.
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Deletes the record file. Succeeds when the file does not exist.
    pub fn remove(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| CoreError::io("Path has no parent directory"))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CoreError::io("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// An advisory lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| CoreError::lock(format!("Failed to acquire lock: {}", e)))?;
        }

        // Non-Unix platforms run without locking; acceptable for a
        // single-user local store.

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("record.json"));

        let record = TestRecord {
            name: "test".to_string(),
            count: 42,
        };

        file.save(&record).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("missing.json"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(path);

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(path);

        let err = file.load().unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/record.json");
        let file = AtomicJsonFile::<TestRecord>::new(path.clone());

        file.save(&TestRecord {
            name: "nested".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("record.json"));

        file.save(&TestRecord {
            name: "test".to_string(),
            count: 42,
        })
        .unwrap();

        assert!(!temp_dir.path().join(".record.json.tmp").exists());
        assert!(temp_dir.path().join("record.json").exists());
    }

    #[test]
    fn test_update_starts_from_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("record.json"));

        file.update(
            TestRecord {
                name: "fresh".to_string(),
                count: 0,
            },
            |record| {
                record.count += 1;
                Ok(())
            },
        )
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.name, "fresh");
        assert_eq!(loaded.count, 1);
    }

    #[test]
    fn test_update_modifies_existing_record() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("record.json"));

        file.save(&TestRecord {
            name: "stored".to_string(),
            count: 10,
        })
        .unwrap();

        file.update(
            TestRecord {
                name: "unused default".to_string(),
                count: 0,
            },
            |record| {
                record.count += 5;
                Ok(())
            },
        )
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.name, "stored");
        assert_eq!(loaded.count, 15);
    }

    #[test]
    fn test_update_closure_error_leaves_record_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("record.json"));

        let original = TestRecord {
            name: "stored".to_string(),
            count: 10,
        };
        file.save(&original).unwrap();

        let result = file.update(
            TestRecord {
                name: String::new(),
                count: 0,
            },
            |record| {
                record.count = 99;
                Err(CoreError::data_access("rejected"))
            },
        );

        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap(), original);
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<TestRecord>::new(temp_dir.path().join("record.json"));

        file.save(&TestRecord {
            name: "test".to_string(),
            count: 42,
        })
        .unwrap();
        file.remove().unwrap();

        assert!(file.load().unwrap().is_none());

        // Removing again is not an error
        file.remove().unwrap();
    }
}
