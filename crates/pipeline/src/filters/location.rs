//! Free-text location filter.

use crate::traits::Filter;
use job_data::JobRecord;

/// Keeps jobs whose `location` contains the given text, ignoring case.
pub struct LocationFilter {
    needle: String,
}

impl LocationFilter {
    /// Returns `None` for blank input: no location constraint.
    ///
    /// Non-blank text is matched as given, so inner and surrounding spaces
    /// are part of the substring.
    pub fn new(location: &str) -> Option<Self> {
        if location.trim().is_empty() {
            None
        } else {
            Some(Self {
                needle: location.to_lowercase(),
            })
        }
    }
}

impl Filter for LocationFilter {
    fn name(&self) -> &str {
        "LocationFilter"
    }

    fn apply<'a>(&self, jobs: Vec<&'a JobRecord>) -> Vec<&'a JobRecord> {
        jobs.into_iter()
            .filter(|job| job.location.to_lowercase().contains(&self.needle))
            .collect()
    }
}
