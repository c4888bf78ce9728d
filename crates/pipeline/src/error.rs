//! Errors raised at the query boundary.
//!
//! Stages themselves never fail; everything here is a caller mistake that
//! is rejected before a query runs.

use job_data::Facet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown sort key '{0}' (expected relevance, date or salary)")]
    UnknownSortKey(String),

    #[error("Unknown facet '{0}'")]
    UnknownFacet(String),

    #[error("'{value}' is not a valid {facet} value")]
    UnknownTag { facet: Facet, value: String },

    #[error("Page size must be positive, got {0}")]
    InvalidPageSize(usize),
}

pub type Result<T> = std::result::Result<T, QueryError>;
