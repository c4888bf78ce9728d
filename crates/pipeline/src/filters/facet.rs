//! Filter for one multi-valued facet.
//!
//! Within a facet the selected values are OR-ed: a job passes when its tag
//! is any of them. Chaining one FacetFilter per active facet gives AND
//! across facets.

use crate::traits::Filter;
use job_data::{Facet, JobRecord};
use std::collections::BTreeSet;

/// Keeps jobs whose tag for `facet` is in the selected set.
pub struct FacetFilter {
    facet: Facet,
    values: BTreeSet<String>,
    name: String,
}

impl FacetFilter {
    /// Create a new FacetFilter.
    ///
    /// # Arguments
    /// * `facet` - Which tag on the record to test
    /// * `values` - Selected catalog ids; callers never pass an empty set
    pub fn new(facet: Facet, values: BTreeSet<String>) -> Self {
        Self {
            facet,
            values,
            name: format!("FacetFilter({})", facet),
        }
    }
}

impl Filter for FacetFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, jobs: Vec<&'a JobRecord>) -> Vec<&'a JobRecord> {
        jobs.into_iter()
            .filter(|job| self.values.contains(job.tag(self.facet)))
            .collect()
    }
}
