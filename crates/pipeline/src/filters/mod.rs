//! Filter implementations for the query pipeline.
//!
//! This module contains the concrete stages that can be composed into a
//! FilterPipeline: free-text search, one filter per active facet, and the
//! free-text location constraint.

pub mod facet;
pub mod location;
pub mod search;

// Re-export for convenience
pub use facet::FacetFilter;
pub use location::LocationFilter;
pub use search::SearchFilter;
