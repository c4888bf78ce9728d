//! Query pipeline for the job board.
//!
//! This crate provides:
//! - Filter trait and implementations for search, facets and location
//! - FilterPipeline for composing filters
//! - The sort stage and the paginator
//! - `run_query`, the composed pipeline, and QuerySession for page state
//!
//! ## Architecture
//! A query runs in stages over a borrowed snapshot:
//! 1. Search keeps records containing every query term
//! 2. Filters keep records matching every active facet and the location
//! 3. Sort orders the survivors (stable)
//! 4. The paginator slices out the requested page
//!
//! ## Example Usage
//! ```ignore
//! use job_data::{Facet, JobStore};
//! use pipeline::{FilterSelection, SortKey, run_query};
//!
//! let selection = FilterSelection::new().with(Facet::Category, ["engineering"])?;
//! let page = run_query(store.jobs(), "rust", &selection, SortKey::Date, 1, 9)?;
//! for job in &page.items {
//!     println!("{}", job.title);
//! }
//! ```

pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod paginate;
pub mod query;
pub mod selection;
pub mod session;
pub mod sort;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use error::{QueryError, Result};
pub use filter_pipeline::FilterPipeline;
pub use paginate::{DEFAULT_PAGE_SIZE, paginate, total_pages};
pub use query::{QueryResult, filter, run_query, search};
pub use selection::FilterSelection;
pub use session::QuerySession;
pub use sort::{SortKey, sort};
pub use traits::Filter;
