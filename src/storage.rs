//! Persistence for the rollback log.
//!
//! The solver itself never touches storage. Callers hand a [`KeyValueStore`] to
//! [`load_archive`] / [`save_archive`]; tests use [`MemoryStore`], the binary uses a
//! [`FileStore`] under the platform data directory.

use crate::archive::RollbackLog;
use crate::error::SolverError;
use crate::{debug_log, info_log};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the rollback log is stored under.
pub const ARCHIVE_KEY: &str = "1a2b_gameHistory";

const APP_DIR: &str = "ab-solver";
const STORE_FILE: &str = "store.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Archive(#[from] SolverError),
}

/// A minimal string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Stores all keys in one JSON object file. Every write rewrites the file through a temporary
/// sibling so a crash never leaves it half-written.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

/// Default location of the store file, e.g. `~/.local/share/ab-solver/store.json`.
#[must_use]
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(STORE_FILE))
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug_log!("No store file at {}", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let data = serde_json::to_string_pretty(values).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        debug_log!("Wrote {} key(s) to {}", values.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

/// Loads the rollback log, or an empty one when nothing has been stored yet.
pub fn load_archive<S: KeyValueStore + ?Sized>(store: &S) -> Result<RollbackLog, StoreError> {
    match store.get(ARCHIVE_KEY)? {
        Some(data) => {
            let log = RollbackLog::deserialize(&data)?;
            info_log!("Loaded {} archived session(s)", log.len());
            Ok(log)
        }
        None => Ok(RollbackLog::new()),
    }
}

pub fn save_archive<S: KeyValueStore + ?Sized>(
    store: &mut S,
    log: &RollbackLog,
) -> Result<(), StoreError> {
    store.set(ARCHIVE_KEY, &log.serialize()?)
}

pub fn clear_archive<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(ARCHIVE_KEY)
}
