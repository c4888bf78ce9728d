//! Free-text search stage.
//!
//! A query is split into whitespace-separated terms. A job matches when
//! every term appears, case-insensitively, in at least one of its
//! searchable fields (title, company, description, location). Terms are
//! matched independently, so "engineer remote" matches a remote role whose
//! title says engineer even though the phrase never appears verbatim.

use crate::traits::Filter;
use job_data::JobRecord;
use rayon::prelude::*;

/// Keeps jobs that contain every query term.
///
/// ## Algorithm
/// 1. Lower-case each searchable field of the job once
/// 2. Require every term to be a substring of at least one field
///
/// Evaluation runs on rayon's pool; `collect` keeps input order.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    terms: Vec<String>,
}

impl SearchFilter {
    /// Build a filter from raw query text.
    ///
    /// Returns `None` for empty or whitespace-only text, which means the
    /// search stage is the identity.
    pub fn parse(query_text: &str) -> Option<Self> {
        let terms: Vec<String> = query_text
            .split_whitespace()
            .map(|term| term.to_lowercase())
            .collect();
        if terms.is_empty() {
            None
        } else {
            Some(Self { terms })
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether a single job matches every term.
    pub fn matches(&self, job: &JobRecord) -> bool {
        let fields = job.searchable_fields().map(|field| field.to_lowercase());
        self.terms
            .iter()
            .all(|term| fields.iter().any(|field| field.contains(term.as_str())))
    }
}

impl Filter for SearchFilter {
    fn name(&self) -> &str {
        "SearchFilter"
    }

    fn apply<'a>(&self, jobs: Vec<&'a JobRecord>) -> Vec<&'a JobRecord> {
        jobs.into_par_iter()
            .filter(|job| self.matches(job))
            .collect()
    }
}
