//! Where job snapshots come from.
//!
//! The board asks its provider for a fresh [`JobStore`] on every query, so a
//! provider decides how current the listings are. Snapshots are immutable and
//! shared behind an `Arc`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use job_data::JobStore;

/// Supplies the record collection a query runs against.
pub trait JobProvider: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &str;

    /// The current snapshot of job listings.
    fn snapshot(&self) -> Result<Arc<JobStore>>;
}

/// Hands out the same snapshot every time.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    store: Arc<JobStore>,
}

impl StaticProvider {
    pub fn new(store: JobStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl JobProvider for StaticProvider {
    fn name(&self) -> &str {
        "StaticProvider"
    }

    fn snapshot(&self) -> Result<Arc<JobStore>> {
        Ok(Arc::clone(&self.store))
    }
}

/// Re-reads one or more listing files on every snapshot, so edits show up
/// on the next query. Several files are parsed in parallel and concatenated
/// in the order given.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    paths: Vec<PathBuf>,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    pub fn with_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Paths joined for messages, e.g. `a.json, b.json`
    pub fn describe(&self) -> String {
        self.paths
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl JobProvider for JsonFileProvider {
    fn name(&self) -> &str {
        "JsonFileProvider"
    }

    fn snapshot(&self) -> Result<Arc<JobStore>> {
        let store = match self.paths.as_slice() {
            [path] => JobStore::load_from_file(path),
            paths => JobStore::load_from_files(paths),
        }
        .with_context(|| format!("Failed to load jobs from {}", self.describe()))?;
        Ok(Arc::new(store))
    }
}
