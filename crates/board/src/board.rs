//! # Job Board Orchestrator
//!
//! This module ties the pieces of a browsing session together:
//! 1. Fetch a snapshot from the job provider
//! 2. Run the session's query (search, filter, sort, paginate)
//! 3. Decorate each record on the page with its saved state
//!
//! The session and the saved-jobs tracker outlive individual snapshots, so
//! the listing can change between queries without losing the user's place
//! or their saved jobs.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;

use job_data::{JobId, JobRecord, JobStore};
use pipeline::{DEFAULT_PAGE_SIZE, QuerySession};
use saved_jobs::{SavedJobs, SavedStore};

use crate::provider::JobProvider;

/// Session policy for a [`JobBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Records per page; must be positive
    pub page_size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
        }
    }
}

/// A record as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct JobView {
    pub job: JobRecord,
    pub saved: bool,
}

/// One rendered page of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardPage {
    pub items: Vec<JobView>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    /// Size of the snapshot the page was cut from
    pub total_jobs: usize,
}

/// Saved jobs resolved against the current snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedListing {
    /// Saved records, in listing order
    pub jobs: Vec<JobRecord>,
    /// Saved ids with no record in the snapshot, ascending
    pub missing: Vec<JobId>,
}

/// Main orchestrator for a browsing session
pub struct JobBoard<P: JobProvider, S: SavedStore> {
    provider: P,
    session: QuerySession,
    saved: SavedJobs<S>,
}

impl<P: JobProvider, S: SavedStore> JobBoard<P, S> {
    /// Create a board with a fresh session.
    ///
    /// Fails if `config.page_size` is zero.
    pub fn new(provider: P, saved: SavedJobs<S>, config: BoardConfig) -> Result<Self> {
        let session = QuerySession::new(config.page_size).context("Invalid board configuration")?;
        info!(
            "Job board ready: provider={}, page_size={}, {} saved jobs",
            provider.name(),
            config.page_size,
            saved.len()
        );
        Ok(Self {
            provider,
            session,
            saved,
        })
    }

    pub fn session(&self) -> &QuerySession {
        &self.session
    }

    /// Mutable access for changing the query and navigating. Setters that
    /// change the query put the session back on page 1.
    pub fn session_mut(&mut self) -> &mut QuerySession {
        &mut self.session
    }

    pub fn saved_jobs(&self) -> &SavedJobs<S> {
        &self.saved
    }

    /// Run the session's query against a fresh snapshot.
    pub fn current_page(&mut self) -> Result<BoardPage> {
        let start_time = Instant::now();

        let snapshot = self.snapshot()?;
        let result = self.session.run(snapshot.jobs());

        let items: Vec<JobView> = result
            .items
            .iter()
            .map(|&job| JobView {
                job: job.clone(),
                saved: self.saved.is_saved(job.id),
            })
            .collect();

        info!(
            "Page {}/{}: {} of {} matches ({} jobs) in {:.2?}",
            result.page,
            result.total_pages,
            items.len(),
            result.total_matches,
            snapshot.len(),
            start_time.elapsed()
        );

        Ok(BoardPage {
            items,
            page: result.page,
            page_size: result.page_size,
            total_pages: result.total_pages,
            total_matches: result.total_matches,
            total_jobs: snapshot.len(),
        })
    }

    /// Look up a single record. `None` if the snapshot has no such id.
    pub fn job(&self, job_id: JobId) -> Result<Option<JobView>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.get(job_id).map(|job| JobView {
            job: job.clone(),
            saved: self.saved.is_saved(job_id),
        }))
    }

    /// Flip the saved state of a listed job. Returns `true` if it is saved
    /// afterwards.
    pub fn toggle_saved(&self, job_id: JobId) -> Result<bool> {
        let snapshot = self.snapshot()?;
        if !snapshot.contains(job_id) {
            bail!("Job {} not found", job_id);
        }

        let saved = self
            .saved
            .toggle(job_id)
            .with_context(|| format!("Failed to persist saved state for job {}", job_id))?;
        let now_saved = saved.contains(&job_id);
        info!(
            "Job {} {} ({} saved)",
            job_id,
            if now_saved { "saved" } else { "unsaved" },
            saved.len()
        );
        Ok(now_saved)
    }

    /// Saved jobs that still exist, plus the ids that no longer do.
    pub fn saved_listing(&self) -> Result<SavedListing> {
        let snapshot = self.snapshot()?;
        let saved = self.saved.saved();

        let jobs = snapshot
            .jobs()
            .iter()
            .filter(|job| saved.contains(&job.id))
            .cloned()
            .collect();
        let mut missing: Vec<JobId> = saved
            .iter()
            .copied()
            .filter(|&id| !snapshot.contains(id))
            .collect();
        missing.sort_unstable();

        Ok(SavedListing { jobs, missing })
    }

    fn snapshot(&self) -> Result<Arc<JobStore>> {
        self.provider
            .snapshot()
            .with_context(|| format!("Failed to fetch snapshot from {}", self.provider.name()))
    }
}
