//! Static facet catalogs.
//!
//! Each catalog is a fixed list of `{id, name}` pairs that defines the
//! values a facet may take and how they are labelled in a picker. The
//! enums in [`crate::types`] index into these tables, so variant order
//! and table order must stay in lockstep.

use serde::Serialize;

/// One selectable value of a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
}

const fn entry(id: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { id, name }
}

pub static JOB_CATEGORIES: [CatalogEntry; 9] = [
    entry("technology", "Technology"),
    entry("design", "Design"),
    entry("marketing", "Marketing"),
    entry("sales", "Sales"),
    entry("finance", "Finance"),
    entry("healthcare", "Healthcare"),
    entry("education", "Education"),
    entry("engineering", "Engineering"),
    entry("customer-service", "Customer Service"),
];

pub static EXPERIENCE_LEVELS: [CatalogEntry; 4] = [
    entry("entry", "Entry Level"),
    entry("mid", "Mid Level"),
    entry("senior", "Senior Level"),
    entry("executive", "Executive"),
];

pub static JOB_TYPES: [CatalogEntry; 5] = [
    entry("full-time", "Full-time"),
    entry("part-time", "Part-time"),
    entry("contract", "Contract"),
    entry("internship", "Internship"),
    entry("freelance", "Freelance"),
];

pub static LOCATION_TYPES: [CatalogEntry; 3] = [
    entry("remote", "Remote"),
    entry("on-site", "On-site"),
    entry("hybrid", "Hybrid"),
];

pub fn job_categories() -> &'static [CatalogEntry] {
    &JOB_CATEGORIES
}

pub fn experience_levels() -> &'static [CatalogEntry] {
    &EXPERIENCE_LEVELS
}

pub fn job_types() -> &'static [CatalogEntry] {
    &JOB_TYPES
}

pub fn location_types() -> &'static [CatalogEntry] {
    &LOCATION_TYPES
}

/// A single-valued, catalog-backed tag on a job record.
///
/// Implementors are fieldless enums whose discriminants are positions in
/// their catalog table.
pub trait CatalogTag: Copy + Sized + 'static {
    /// Every variant, in catalog order.
    fn all() -> &'static [Self];

    /// The catalog entry describing this tag.
    fn entry(self) -> &'static CatalogEntry;

    fn id(self) -> &'static str {
        self.entry().id
    }

    fn name(self) -> &'static str {
        self.entry().name
    }
}
