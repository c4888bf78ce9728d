//! Saved-jobs tracking for the job board.
//!
//! [`SavedJobs`] answers "is this job saved?" for every record on a page and
//! flips that state on request. Persistence sits behind the [`SavedStore`]
//! trait: [`MemoryStore`] for tests and throwaway sessions, [`JsonFileStore`]
//! for a set that survives restarts.
//!
//! ## Example Usage
//! ```ignore
//! use saved_jobs::{JsonFileStore, SavedJobs};
//!
//! let tracker = SavedJobs::open(JsonFileStore::new(".job-board/saved.json"));
//! tracker.toggle(42)?;
//! assert!(tracker.is_saved(42));
//! ```

pub mod error;
pub mod store;
pub mod tracker;

// Re-export main types
pub use error::{Result, StoreError};
pub use store::{JsonFileStore, MemoryStore, SavedSet, SavedStore, StoreLock};
pub use tracker::SavedJobs;
