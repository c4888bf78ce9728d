//! Sort stage.
//!
//! Sorting is stable, so whatever order search and filtering produced
//! survives among ties. Records missing the sort field go after every record
//! that has it, in their incoming order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use job_data::JobRecord;

use crate::error::QueryError;

/// How the result list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Incoming order (listing order narrowed by search and filters)
    #[default]
    Relevance,
    /// Most recently posted first
    Date,
    /// Highest salary lower bound first
    Salary,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Relevance, SortKey::Date, SortKey::Salary];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Date => "date",
            SortKey::Salary => "salary",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "date" => Ok(SortKey::Date),
            "salary" => Ok(SortKey::Salary),
            _ => Err(QueryError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Return `jobs` ordered by `key`. The input slice is left untouched.
pub fn sort<'a>(jobs: &[&'a JobRecord], key: SortKey) -> Vec<&'a JobRecord> {
    let mut ordered = jobs.to_vec();
    match key {
        SortKey::Relevance => {}
        SortKey::Date => {
            ordered.sort_by(|a, b| descending_missing_last(a.posted_date, b.posted_date))
        }
        SortKey::Salary => ordered.sort_by(|a, b| {
            descending_missing_last(
                a.salary.map(|s| s.sort_value()),
                b.salary.map(|s| s.sort_value()),
            )
        }),
    }
    ordered
}

fn descending_missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dated, ids, job, paid};
    use job_data::Salary;

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("relevance".parse::<SortKey>().unwrap(), SortKey::Relevance);
        assert_eq!(" Date ".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!("SALARY".parse::<SortKey>().unwrap(), SortKey::Salary);
        assert_eq!(
            "newest".parse::<SortKey>().unwrap_err(),
            QueryError::UnknownSortKey("newest".to_string())
        );
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_relevance_keeps_order() {
        let (a, b, c) = (job(3), job(1), job(2));
        let sorted = sort(&[&a, &b, &c], SortKey::Relevance);
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn test_date_newest_first_missing_last() {
        let old = dated(1, 2024, 1, 1);
        let undated_a = job(2);
        let new = dated(3, 2024, 3, 1);
        let undated_b = job(4);
        let mid = dated(5, 2024, 2, 1);

        let input = [&old, &undated_a, &new, &undated_b, &mid];
        let sorted = sort(&input, SortKey::Date);

        assert_eq!(ids(&sorted), vec![3, 5, 1, 2, 4]);
        // Input untouched
        assert_eq!(ids(&input), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_date_ties_are_stable() {
        let first = dated(10, 2024, 5, 5);
        let second = dated(20, 2024, 5, 5);
        let third = dated(30, 2024, 5, 5);

        let sorted = sort(&[&second, &first, &third], SortKey::Date);
        assert_eq!(ids(&sorted), vec![20, 10, 30]);
    }

    #[test]
    fn test_salary_uses_lower_bound() {
        let range = paid(1, Some(Salary::range(90_000, 200_000)));
        let fixed = paid(2, Some(Salary::fixed(100_000)));
        let none = paid(3, None);
        let low = paid(4, Some(Salary::fixed(40_000)));

        let sorted = sort(&[&none, &range, &fixed, &low], SortKey::Salary);
        assert_eq!(ids(&sorted), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_salary_ties_and_missing_are_stable() {
        let a = paid(1, None);
        let b = paid(2, Some(Salary::fixed(50_000)));
        let c = paid(3, None);
        let d = paid(4, Some(Salary::range(50_000, 60_000)));

        let sorted = sort(&[&a, &b, &c, &d], SortKey::Salary);
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
    }
}
