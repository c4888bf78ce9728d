//! The composed query: search, filter, sort, paginate.
//!
//! Every function here is pure in its inputs. Callers re-run [`run_query`]
//! whenever the text, selection, sort key or page changes; nothing is cached
//! between calls.

use std::num::NonZeroUsize;
use std::time::Instant;

use job_data::JobRecord;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::paginate::paginate;
use crate::selection::FilterSelection;
use crate::sort::{SortKey, sort};

/// One page of results plus the figures a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    pub items: Vec<&'a JobRecord>,
    /// The page that was requested
    pub page: usize,
    pub page_size: usize,
    /// Always at least 1
    pub total_pages: usize,
    /// Records that survived search and filtering, across all pages
    pub total_matches: usize,
}

/// Search stage: records containing every term of `query_text`.
///
/// Blank text returns every record in input order.
pub fn search<'a>(all_jobs: &'a [JobRecord], query_text: &str) -> Vec<&'a JobRecord> {
    FilterPipeline::for_search(query_text).apply(all_jobs.iter().collect())
}

/// Filter stage: records satisfying every active constraint in `selection`.
///
/// An empty selection returns `jobs` unchanged.
pub fn filter<'a>(jobs: Vec<&'a JobRecord>, selection: &FilterSelection) -> Vec<&'a JobRecord> {
    FilterPipeline::for_selection(selection).apply(jobs)
}

/// Run the whole pipeline and return the requested page.
///
/// # Errors
/// [`QueryError::InvalidPageSize`] if `page_size` is zero. Out-of-range pages
/// are not errors; they produce an empty page.
pub fn run_query<'a>(
    all_jobs: &'a [JobRecord],
    query_text: &str,
    selection: &FilterSelection,
    sort_key: SortKey,
    page: usize,
    page_size: usize,
) -> Result<QueryResult<'a>> {
    let page_size = NonZeroUsize::new(page_size).ok_or(QueryError::InvalidPageSize(page_size))?;
    Ok(run_pipeline(all_jobs, query_text, selection, sort_key, page, page_size))
}

pub(crate) fn run_pipeline<'a>(
    all_jobs: &'a [JobRecord],
    query_text: &str,
    selection: &FilterSelection,
    sort_key: SortKey,
    page: usize,
    page_size: NonZeroUsize,
) -> QueryResult<'a> {
    let start = Instant::now();

    let matched = search(all_jobs, query_text);
    let filtered = filter(matched, selection);
    let ordered = sort(&filtered, sort_key);
    let (items, total_pages) = paginate(&ordered, page, page_size);

    debug!(
        "Query '{}' sort={} page={}/{}: {} of {} jobs matched in {:.2?}",
        query_text.trim(),
        sort_key,
        page,
        total_pages,
        ordered.len(),
        all_jobs.len(),
        start.elapsed()
    );

    QueryResult {
        items: items.to_vec(),
        page,
        page_size: page_size.get(),
        total_pages,
        total_matches: ordered.len(),
    }
}
