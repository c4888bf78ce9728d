//! Record builders shared by the unit tests in this crate.

use chrono::NaiveDate;
use job_data::{Category, ExperienceLevel, JobId, JobRecord, JobType, LocationType, Salary};

pub(crate) fn job(id: JobId) -> JobRecord {
    JobRecord {
        id,
        title: format!("Job {}", id),
        company: "Acme".to_string(),
        description: String::new(),
        category: Category::Technology,
        experience_level: ExperienceLevel::Mid,
        job_type: JobType::FullTime,
        location_type: LocationType::Remote,
        location: "Remote".to_string(),
        posted_date: None,
        salary: None,
        skills: Vec::new(),
        url: None,
    }
}

pub(crate) fn dated(id: JobId, year: i32, month: u32, day: u32) -> JobRecord {
    JobRecord {
        posted_date: NaiveDate::from_ymd_opt(year, month, day),
        ..job(id)
    }
}

pub(crate) fn paid(id: JobId, salary: Option<Salary>) -> JobRecord {
    JobRecord { salary, ..job(id) }
}

pub(crate) fn ids(jobs: &[&JobRecord]) -> Vec<JobId> {
    jobs.iter().map(|job| job.id).collect()
}
