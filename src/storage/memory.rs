//! In-memory document storage

use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use super::{DocumentStorage, StorageError, validate_key};

/// Documents held in memory.
///
/// Clones share the same documents, like several pages of one browser
/// profile sharing local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Rc<RefCell<FxHashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.borrow().len()
    }

    /// Whether no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.documents.borrow().is_empty()
    }
}

impl DocumentStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = validate_key(key)?;

        Ok(self.documents.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = validate_key(key)?;

        self.documents
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = validate_key(key)?;

        self.documents.borrow_mut().remove(key);

        Ok(())
    }
}
