//! FileStorage - one file per key inside a profile directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// Directory-backed key-value store.
///
/// Each key maps to `<dir>/<key>.json`. Every write goes to its own uniquely
/// named temporary file in the same directory, which is then renamed over the
/// target. Handles sharing a directory never see half a value, and the last
/// rename wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys are ASCII alphanumerics, `_`, `-` and `.`, not starting with `.`.
    pub fn check_key(key: &str) -> Result<(), StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid key {:?}", key)));
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Self::check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path)
            .map_err(|e| StorageError::Io(e.error.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("profile")).unwrap();
        storage.set("mady_cart", "[1,2]").unwrap();

        let reopened = FileStorage::open(dir.path().join("profile")).unwrap();
        assert_eq!(reopened.get("mady_cart").unwrap().as_deref(), Some("[1,2]"));
        let entries: Vec<_> = fs::read_dir(reopened.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("mady_cart.json")]);
    }

    #[test]
    fn missing_key_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("absent").unwrap(), None);
        storage.remove("absent").unwrap();

        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn concurrent_handles_on_one_directory_last_writer_wins() {
        let dir = tempfile::tempdir().unwrap();
        let values: Vec<String> = ["a", "b"]
            .iter()
            .map(|tag| format!("[\"{}\"]", tag.repeat(200_000)))
            .collect();

        let writers: Vec<_> = values
            .iter()
            .cloned()
            .map(|value| {
                let storage = FileStorage::open(dir.path()).unwrap();
                thread::spawn(move || {
                    (0..100)
                        .filter(|_| storage.set("mady_cart", &value).is_err())
                        .count()
                })
            })
            .collect();

        let reader = FileStorage::open(dir.path()).unwrap();
        for _ in 0..100 {
            if let Some(seen) = reader.get("mady_cart").unwrap() {
                assert!(values.contains(&seen), "read a partial value");
            }
        }

        let failures: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();
        assert_eq!(failures, 0);

        let last = reader.get("mady_cart").unwrap().unwrap();
        assert!(values.contains(&last));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn check_key_rules() {
        assert!(FileStorage::check_key("mady_cart").is_ok());
        assert!(FileStorage::check_key("cart-v2.1").is_ok());
        for key in ["", "mady cart", ".hidden", "a/b"] {
            assert!(FileStorage::check_key(key).is_err(), "{:?}", key);
        }
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.get("").is_err());
    }
}
