//! Document storage
//!
//! A small key/value store of whole documents. Every read returns the full
//! document for a key and every write replaces it, so the unit of
//! consistency is one document.

use std::io;

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that are not allowed
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// IO error reading or writing a document
    #[error("storage IO error: {0}")]
    Io(#[from] io::Error),

    /// Replacing a document with its new contents failed
    #[error("failed to replace document: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Key/value document store.
///
/// Implementations use interior mutability so several views can hold handles
/// to the same underlying documents.
pub trait DocumentStorage {
    /// Read the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the document stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: DocumentStorage + ?Sized> DocumentStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Check that a key is a non-empty run of ASCII letters, digits, `-` or `_`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<&str, StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

    if valid {
        Ok(key)
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_accepts_document_names() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("accessToken").is_ok());
        assert!(validate_key("user_data-2").is_ok());
    }

    #[test]
    fn validate_key_rejects_paths() {
        assert!(matches!(validate_key("../cart"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(matches!(validate_key("a/b"), Err(StorageError::InvalidKey(_))));
    }
}
