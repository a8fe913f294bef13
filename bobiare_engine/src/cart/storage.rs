//! Key-value storage for client-side state.
//!
//! Stores hold string values under string keys, with no expiry. [`MemoryStore`] is handy for tests and for
//! sessions that do not need to survive a restart. [`FileStore`] keeps one `<key>.json` file per key inside a
//! directory.
use std::{
    collections::HashMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there yet.
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KeyValueStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(path, value)?;
        Ok(())
    }
}
