//! Persistence behind the saved-jobs tracker.
//!
//! The tracker only talks to a [`SavedStore`]. Two stores ship here: an
//! in-memory one and a JSON file on disk.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use fs2::FileExt;
use job_data::JobId;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Ids of the jobs a user has saved.
pub type SavedSet = HashSet<JobId>;

/// Durable storage for a [`SavedSet`].
pub trait SavedStore: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Read the stored set. A store that has never been written loads empty.
    fn load(&self) -> Result<SavedSet>;

    /// Replace the stored set with `saved`.
    fn save(&self, saved: &SavedSet) -> Result<()>;

    /// Exclusive write lock for a load-modify-save cycle.
    ///
    /// Stores shared between processes must block here until no other
    /// writer holds the lock. The default is a no-op, which is enough for
    /// stores that live in a single process.
    fn lock(&self) -> Result<StoreLock> {
        Ok(StoreLock::default())
    }
}

/// Held for the duration of a load-modify-save cycle. Dropping it releases
/// the lock.
#[derive(Debug, Default)]
pub struct StoreLock {
    file: Option<File>,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            if let Err(e) = FileExt::unlock(file) {
                debug!("Failed to release saved jobs lock: {}", e);
            }
        }
    }
}

/// Keeps the set in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<SavedSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `ids`
    pub fn with_ids(ids: impl IntoIterator<Item = JobId>) -> Self {
        Self {
            saved: Mutex::new(ids.into_iter().collect()),
        }
    }
}

impl SavedStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn load(&self) -> Result<SavedSet> {
        Ok(self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, saved: &SavedSet) -> Result<()> {
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = saved.clone();
        Ok(())
    }
}

/// Stores the set as a JSON array of ids, sorted ascending.
///
/// Writes go to a uniquely named temp file in the same directory that is
/// then renamed over the target, so a crash mid-write leaves the previous
/// file intact. [`lock`](SavedStore::lock) takes an advisory lock on a
/// sibling `.lock` file, which serializes writers across processes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Sibling lock file, e.g. `saved.json.lock`
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SavedStore for JsonFileStore {
    fn name(&self) -> &str {
        "JsonFileStore"
    }

    fn load(&self) -> Result<SavedSet> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved jobs file at {}", self.path.display());
                return Ok(SavedSet::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let ids: Vec<JobId> = serde_json::from_str(&text)?;
        Ok(ids.into_iter().collect())
    }

    fn save(&self, saved: &SavedSet) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut ids: Vec<JobId> = saved.iter().copied().collect();
        ids.sort_unstable();
        let json = serde_json::to_string_pretty(&ids)?;

        // A failed persist drops the temp file, which deletes it
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        temp.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        temp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!("Wrote {} saved jobs to {}", ids.len(), self.path.display());
        Ok(())
    }

    fn lock(&self) -> Result<StoreLock> {
        fs::create_dir_all(self.parent_dir()).map_err(|e| self.io_error(e))?;

        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| self.io_error(e))?;
        file.lock_exclusive().map_err(|e| self.io_error(e))?;

        debug!("Acquired saved jobs lock at {}", lock_path.display());
        Ok(StoreLock { file: Some(file) })
    }
}
