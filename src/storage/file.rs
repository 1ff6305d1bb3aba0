//! On-disk document storage

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{DocumentStorage, StorageError, validate_key};

/// One JSON document per key inside a directory.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the document, so a crash mid-write never leaves a half-written document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Directory holding the documents.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.base_path.join(format!("{}.json", validate_key(key)?)))
    }
}

impl DocumentStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.document_path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.document_path(key)?;

        let mut file = NamedTempFile::new_in(&self.base_path)?;
        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path)?;

        debug!(key, path = %path.display(), bytes = value.len(), "document written");

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.document_path(key)?) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_then_get_round_trips_document() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::open(dir.path())?;

        storage.set("cart", r#"[{"id":"p1"}]"#)?;

        assert_eq!(storage.get("cart")?, Some(r#"[{"id":"p1"}]"#.to_string()));
        assert!(dir.path().join("cart.json").exists());

        Ok(())
    }

    #[test]
    fn set_replaces_existing_document() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::open(dir.path())?;

        storage.set("cart", "[1]")?;
        storage.set("cart", "[]")?;

        assert_eq!(storage.get("cart")?, Some("[]".to_string()));

        Ok(())
    }

    #[test]
    fn missing_documents_read_as_none() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::open(dir.path())?;

        assert_eq!(storage.get("userData")?, None);
        storage.remove("userData")?;

        Ok(())
    }

    #[test]
    fn open_creates_nested_directories() -> TestResult {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");

        let storage = FileStorage::open(&nested)?;

        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());

        Ok(())
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::open(dir.path())?;

        assert!(matches!(
            storage.set("../escape", "{}"),
            Err(StorageError::InvalidKey(_))
        ));

        Ok(())
    }
}
