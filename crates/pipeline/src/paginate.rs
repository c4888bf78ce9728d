//! Paginator.
//!
//! Pages are 1-based. An empty result still has one (empty) page, and a
//! page past the end is an empty slice rather than an error.

use std::num::NonZeroUsize;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(9) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of pages needed for `len` items, never less than 1.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Slice out page `page_number` and report the page count.
///
/// Page 0 and pages beyond the last yield an empty slice.
pub fn paginate<T>(items: &[T], page_number: usize, page_size: NonZeroUsize) -> (&[T], usize) {
    let pages = total_pages(items.len(), page_size);
    if page_number == 0 {
        return (&[], pages);
    }

    let size = page_size.get();
    let start = (page_number - 1).saturating_mul(size);
    if start >= items.len() {
        return (&[], pages);
    }
    let end = start.saturating_add(size).min(items.len());
    (&items[start..end], pages)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}
