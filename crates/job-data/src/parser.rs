//! Parser for job listing files.
//!
//! A listing file is JSON: either a bare array of job objects or an object
//! with a `jobs` array. Field-level leniency lives here too. Salaries and
//! posting dates show up in several shapes in real listing exports, and a
//! value we cannot make sense of is treated as absent instead of failing
//! the whole load.

use chrono::{DateTime, NaiveDate};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{DataLoadError, Result};
use crate::types::{JobRecord, Salary};

/// Read and parse a listing file.
pub fn parse_jobs_file(path: &Path) -> Result<Vec<JobRecord>> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    parse_jobs_str(&text, &path.display().to_string())
}

/// Parse listing JSON. `file` is only used for error messages.
pub fn parse_jobs_str(text: &str, file: &str) -> Result<Vec<JobRecord>> {
    let parse_error = |reason: String| DataLoadError::ParseError {
        file: file.to_string(),
        reason,
    };

    let document: Value = serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
    let list = match document {
        Value::Array(_) => document,
        Value::Object(mut map) => map
            .remove("jobs")
            .ok_or_else(|| parse_error("expected an array or an object with a `jobs` array".to_string()))?,
        _ => return Err(parse_error("expected an array or an object with a `jobs` array".to_string())),
    };

    serde_json::from_value(list).map_err(|e| parse_error(e.to_string()))
}

// =============================================================================
// Salary
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSalary {
    Amount(f64),
    Range { min: Option<f64>, max: Option<f64> },
    Text(String),
    Other(IgnoredAny),
}

pub(crate) fn deserialize_salary<'de, D>(deserializer: D) -> std::result::Result<Option<Salary>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawSalary>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawSalary::Amount(amount)) => to_amount(amount).map(Salary::fixed),
        Some(RawSalary::Range { min, max }) => {
            match (min.and_then(to_amount), max.and_then(to_amount)) {
                (Some(min), Some(max)) => Some(Salary::range(min, max)),
                (Some(amount), None) | (None, Some(amount)) => Some(Salary::fixed(amount)),
                (None, None) => None,
            }
        }
        Some(RawSalary::Text(text)) => parse_salary_text(&text),
        Some(RawSalary::Other(_)) | None => None,
    })
}

/// Parse a display salary string.
///
/// Example: "$80,000 - $100,000" -> 80000..100000
///          "$90k-$110k/yr"      -> 90000..110000
///          "Competitive"        -> None
pub fn parse_salary_text(text: &str) -> Option<Salary> {
    let cleaned: String = text
        .split('/')
        .next()?
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let mut bounds = cleaned.split('-').map(parse_amount);
    let min = bounds.next()??;
    match bounds.next() {
        None => Some(Salary::fixed(min)),
        Some(max) => {
            let max = max?;
            if bounds.next().is_some() {
                return None;
            }
            Some(Salary::range(min, max))
        }
    }
}

fn parse_amount(s: &str) -> Option<u32> {
    let (digits, scale) = match s.strip_suffix('k') {
        Some(digits) => (digits, 1_000.0),
        None => (s, 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    to_amount(value * scale)
}

fn to_amount(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value.round() as u32)
    } else {
        None
    }
}

// =============================================================================
// Posting date
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Epoch(i64),
    Other(IgnoredAny),
}

pub(crate) fn deserialize_posted_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDate>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDate::Text(text)) => parse_posted_date(&text),
        Some(RawDate::Epoch(secs)) => DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive()),
        Some(RawDate::Other(_)) | None => None,
    })
}

/// Parse a posting date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_posted_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}
