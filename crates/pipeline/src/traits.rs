//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that lets the search stage and the
//! facet constraints be composed into one chain of narrowing steps.

use job_data::JobRecord;

/// A narrowing step over borrowed job records.
///
/// ## Design Note
/// - `Send + Sync` allows a built pipeline to be shared across threads
/// - Filters take ownership of the Vec and return the survivors
/// - Implementations must be stable: survivors keep their relative order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the records that pass this filter.
    fn apply<'a>(&self, jobs: Vec<&'a JobRecord>) -> Vec<&'a JobRecord>;
}
