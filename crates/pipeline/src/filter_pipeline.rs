//! The FilterPipeline chains narrowing stages.
//!
//! This module provides the FilterPipeline struct that applies filters in
//! sequence using the builder pattern, plus the constructors that turn query
//! text and a [`FilterSelection`] into a ready-made chain.

use crate::filters::{FacetFilter, LocationFilter, SearchFilter};
use crate::selection::FilterSelection;
use crate::traits::Filter;
use job_data::JobRecord;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(FacetFilter::new(Facet::Category, categories))
///     .add_filter(LocationFilter::new("berlin").unwrap());
///
/// let filtered = pipeline.apply(jobs);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline for the search stage alone. Empty for blank text.
    pub fn for_search(query_text: &str) -> Self {
        let mut pipeline = Self::new();
        if let Some(search) = SearchFilter::parse(query_text) {
            pipeline = pipeline.add_filter(search);
        }
        pipeline
    }

    /// Pipeline for the filter stage: one FacetFilter per active facet, then
    /// the location constraint. Empty for an empty selection.
    pub fn for_selection(selection: &FilterSelection) -> Self {
        let mut pipeline = Self::new();
        for (facet, values) in selection.active_facets() {
            pipeline = pipeline.add_filter(FacetFilter::new(facet, values.clone()));
        }
        if let Some(location) = selection.location().and_then(LocationFilter::new) {
            pipeline = pipeline.add_filter(location);
        }
        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence.
    ///
    /// Each filter is stable, so the output keeps the relative order of
    /// `jobs`.
    pub fn apply<'a>(&self, jobs: Vec<&'a JobRecord>) -> Vec<&'a JobRecord> {
        let mut current = jobs;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
