//! Core domain types for job postings.
//!
//! This module defines the record shape the whole workspace passes around,
//! the catalog-backed tag enums, and the facets the filter stage knows
//! about.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{self, CatalogEntry, CatalogTag};
use crate::error::DataLoadError;
use crate::parser;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a job posting within a snapshot
pub type JobId = u32;

// =============================================================================
// Catalog-backed tags
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Technology,
    Design,
    Marketing,
    Sales,
    Finance,
    Healthcare,
    Education,
    Engineering,
    CustomerService,
}

impl CatalogTag for Category {
    fn all() -> &'static [Self] {
        use Category::*;
        &[
            Technology,
            Design,
            Marketing,
            Sales,
            Finance,
            Healthcare,
            Education,
            Engineering,
            CustomerService,
        ]
    }

    fn entry(self) -> &'static CatalogEntry {
        &catalog::JOB_CATEGORIES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    #[serde(alias = "entry-level")]
    Entry,
    #[serde(alias = "mid-level")]
    Mid,
    #[serde(alias = "senior-level")]
    Senior,
    Executive,
}

impl CatalogTag for ExperienceLevel {
    fn all() -> &'static [Self] {
        use ExperienceLevel::*;
        &[Entry, Mid, Senior, Executive]
    }

    fn entry(self) -> &'static CatalogEntry {
        &catalog::EXPERIENCE_LEVELS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl CatalogTag for JobType {
    fn all() -> &'static [Self] {
        use JobType::*;
        &[FullTime, PartTime, Contract, Internship, Freelance]
    }

    fn entry(self) -> &'static CatalogEntry {
        &catalog::JOB_TYPES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    Remote,
    #[serde(alias = "onsite")]
    OnSite,
    Hybrid,
}

impl CatalogTag for LocationType {
    fn all() -> &'static [Self] {
        use LocationType::*;
        &[Remote, OnSite, Hybrid]
    }

    fn entry(self) -> &'static CatalogEntry {
        &catalog::LOCATION_TYPES[self as usize]
    }
}

// =============================================================================
// Facets
// =============================================================================

/// A multi-valued filter dimension backed by one catalog.
///
/// Ordering follows the order facets are presented in a picker row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    Category,
    ExperienceLevel,
    JobType,
    LocationType,
}

impl Facet {
    pub const ALL: [Facet; 4] = [
        Facet::Category,
        Facet::ExperienceLevel,
        Facet::JobType,
        Facet::LocationType,
    ];

    /// Key used for this facet in selections and query strings
    pub fn key(self) -> &'static str {
        match self {
            Facet::Category => "category",
            Facet::ExperienceLevel => "experienceLevel",
            Facet::JobType => "jobType",
            Facet::LocationType => "locationType",
        }
    }

    /// Human-readable picker label
    pub fn label(self) -> &'static str {
        match self {
            Facet::Category => "Job Category",
            Facet::ExperienceLevel => "Experience Level",
            Facet::JobType => "Job Type",
            Facet::LocationType => "Work Type",
        }
    }

    pub fn catalog(self) -> &'static [CatalogEntry] {
        match self {
            Facet::Category => catalog::job_categories(),
            Facet::ExperienceLevel => catalog::experience_levels(),
            Facet::JobType => catalog::job_types(),
            Facet::LocationType => catalog::location_types(),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Facet {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DataLoadError::InvalidValue {
                field: "facet".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Salary
// =============================================================================

/// Annual salary, either a single figure or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Salary {
    pub min: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl Salary {
    pub fn fixed(amount: u32) -> Self {
        Self { min: amount, max: None }
    }

    pub fn range(min: u32, max: u32) -> Self {
        Self {
            min: min.min(max),
            max: Some(min.max(max)),
        }
    }

    /// Value used when ordering by salary: the lower bound.
    pub fn sort_value(&self) -> u32 {
        self.min
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max != self.min => write!(f, "${} - ${}", group(self.min), group(max)),
            _ => write!(f, "${}", group(self.min)),
        }
    }
}

fn group(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Job Record
// =============================================================================

/// A single job posting.
///
/// Records are immutable once loaded into a [`crate::JobStore`]; every
/// pipeline stage works on borrowed records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub experience_level: ExperienceLevel,
    pub job_type: JobType,
    pub location_type: LocationType,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "parser::deserialize_posted_date")]
    pub posted_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "parser::deserialize_salary")]
    pub salary: Option<Salary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl JobRecord {
    /// The catalog id this record carries for `facet`.
    pub fn tag(&self, facet: Facet) -> &'static str {
        match facet {
            Facet::Category => self.category.id(),
            Facet::ExperienceLevel => self.experience_level.id(),
            Facet::JobType => self.job_type.id(),
            Facet::LocationType => self.location_type.id(),
        }
    }

    /// Text fields the search stage matches query terms against.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [&self.title, &self.company, &self.description, &self.location]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_display() {
        assert_eq!(Salary::fixed(85_000).to_string(), "$85,000");
        assert_eq!(Salary::range(80_000, 100_000).to_string(), "$80,000 - $100,000");
        assert_eq!(Salary::fixed(950).to_string(), "$950");
    }

    #[test]
    fn test_salary_range_orders_bounds() {
        let salary = Salary::range(120_000, 90_000);
        assert_eq!(salary.min, 90_000);
        assert_eq!(salary.max, Some(120_000));
        assert_eq!(salary.sort_value(), 90_000);
    }

    #[test]
    fn test_facet_from_str() {
        assert_eq!("jobType".parse::<Facet>().unwrap(), Facet::JobType);
        assert_eq!("CATEGORY".parse::<Facet>().unwrap(), Facet::Category);
        assert!("location".parse::<Facet>().is_err());
    }
}
