//! # Job Data Crate
//!
//! This crate owns the job record model and the record store the query
//! pipeline reads from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (JobRecord, Salary, tag enums, Facet)
//! - **catalog**: Static `{id, name}` tables for every facet
//! - **parser**: Parse listing JSON into records
//! - **index**: Build a validated, immutable [`JobStore`] snapshot
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use job_data::JobStore;
//! use std::path::Path;
//!
//! let store = JobStore::load_from_file(Path::new("data/jobs.json"))?;
//! let job = store.get(1).unwrap();
//! println!("{} at {}", job.title, job.company);
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{CatalogEntry, CatalogTag};
pub use error::{DataLoadError, Result};
pub use index::JobStore;
pub use types::{
    // Type aliases
    JobId,
    // Core types
    JobRecord,
    Salary,
    Facet,
    // Enums
    Category,
    ExperienceLevel,
    JobType,
    LocationType,
};
