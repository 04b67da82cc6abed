//! One JSON file per key under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{StateStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates the backend, creating `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl StateStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        // Write-then-rename so a crash mid-write leaves the previous record intact.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        assert_eq!(storage.get_item("cv-builder-storage").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested")).unwrap();
        storage.set_item("cv-builder-storage", r#"{"version":2}"#).unwrap();
        assert_eq!(
            storage.get_item("cv-builder-storage").unwrap().as_deref(),
            Some(r#"{"version":2}"#)
        );
        assert!(dir.path().join("nested/cv-builder-storage.json").exists());

        storage.set_item("cv-builder-storage", r#"{"version":3}"#).unwrap();
        assert_eq!(
            storage.get_item("cv-builder-storage").unwrap().as_deref(),
            Some(r#"{"version":3}"#)
        );
        assert!(!dir.path().join("nested/cv-builder-storage.json.tmp").exists());
    }

    #[test]
    fn test_key_is_sanitized_into_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.set_item("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
    }
}
