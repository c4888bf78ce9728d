//! JobStore: the immutable snapshot the query pipeline runs against.
//!
//! A store keeps records in their listing order (the order "relevance"
//! sorting preserves) and an id index for O(1) lookups. It is built once,
//! validated, and then shared behind an `Arc`.

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{JobId, JobRecord};

/// Immutable, validated collection of job records.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: Vec<JobRecord>,
    by_id: HashMap<JobId, usize>,
}

impl JobStore {
    /// Creates a new, empty JobStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, keeping their order.
    ///
    /// Fails with [`DataLoadError::DuplicateId`] if two records share an id.
    pub fn from_records(jobs: Vec<JobRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(jobs.len());
        for (position, job) in jobs.iter().enumerate() {
            if by_id.insert(job.id, position).is_some() {
                return Err(DataLoadError::DuplicateId { id: job.id });
            }
        }
        Ok(Self { jobs, by_id })
    }

    /// Load a single listing file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let jobs = parser::parse_jobs_file(path)?;
        info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Self::from_records(jobs)
    }

    /// Load several listing files in parallel and concatenate them in the
    /// order the paths were given.
    pub fn load_from_files(paths: &[PathBuf]) -> Result<Self> {
        let parsed: Vec<Result<Vec<JobRecord>>> = paths
            .par_iter()
            .map(|path| parser::parse_jobs_file(path))
            .collect();

        let mut jobs = Vec::new();
        for batch in parsed {
            jobs.extend(batch?);
        }
        info!("Loaded {} jobs from {} files", jobs.len(), paths.len());
        Self::from_records(jobs)
    }

    /// All records in listing order
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    /// Get a job by ID
    pub fn get(&self, id: JobId) -> Option<&JobRecord> {
        self.by_id.get(&id).map(|&position| &self.jobs[position])
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ExperienceLevel, JobType, LocationType};
    use std::fs;

    fn job(id: JobId, title: &str) -> JobRecord {
        JobRecord {
            id,
            title: title.to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            category: Category::Technology,
            experience_level: ExperienceLevel::Mid,
            job_type: JobType::FullTime,
            location_type: LocationType::Remote,
            location: "Remote".to_string(),
            posted_date: None,
            salary: None,
            skills: Vec::new(),
            url: None,
        }
    }

    #[test]
    fn test_from_records_keeps_order() {
        let store = JobStore::from_records(vec![job(7, "b"), job(3, "a")]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.jobs()[0].id, 7);
        assert_eq!(store.get(3).unwrap().title, "a");
        assert!(store.get(99).is_none());
        assert!(store.contains(7));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = JobStore::from_records(vec![job(1, "a"), job(1, "b")]).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateId { id: 1 }));
    }

    #[test]
    fn test_load_from_files_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        fs::write(&first, serde_json::to_string(&vec![job(1, "one")]).unwrap()).unwrap();
        fs::write(&second, serde_json::to_string(&vec![job(2, "two"), job(3, "three")]).unwrap())
            .unwrap();

        let store = JobStore::load_from_files(&[first, second]).unwrap();
        let ids: Vec<JobId> = store.jobs().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_store() {
        let store = JobStore::new();
        assert!(store.is_empty());
        assert!(store.get(1).is_none());
    }
}
