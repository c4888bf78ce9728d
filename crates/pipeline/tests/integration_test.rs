//! Integration tests for the pipeline.
//!
//! These tests drive search, filtering, sorting and pagination together
//! over a realistic listing snapshot.

use chrono::NaiveDate;
use job_data::{
    Category, ExperienceLevel, Facet, JobId, JobRecord, JobStore, JobType, LocationType, Salary,
};
use pipeline::{FilterSelection, QuerySession, SortKey, filter, paginate, run_query, search, sort};
use std::num::NonZeroUsize;

struct Posting {
    id: JobId,
    title: &'static str,
    company: &'static str,
    category: Category,
    level: ExperienceLevel,
    job_type: JobType,
    location_type: LocationType,
    location: &'static str,
    posted: Option<(i32, u32, u32)>,
    salary: Option<Salary>,
}

impl Posting {
    fn build(self) -> JobRecord {
        JobRecord {
            id: self.id,
            title: self.title.to_string(),
            company: self.company.to_string(),
            description: format!("{} role at {}", self.title, self.company),
            category: self.category,
            experience_level: self.level,
            job_type: self.job_type,
            location_type: self.location_type,
            location: self.location.to_string(),
            posted_date: self.posted.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            salary: self.salary,
            skills: Vec::new(),
            url: None,
        }
    }
}

fn create_test_store() -> JobStore {
    use Category::*;
    use ExperienceLevel::*;
    use JobType::*;
    use LocationType::*;

    let postings = vec![
        Posting { id: 1, title: "Senior Software Engineer", company: "TechCorp", category: Technology, level: Senior, job_type: FullTime, location_type: Remote, location: "Remote", posted: Some((2024, 3, 10)), salary: Some(Salary::range(150_000, 180_000)) },
        Posting { id: 2, title: "Sales Manager", company: "SalesHub", category: Sales, level: Mid, job_type: FullTime, location_type: OnSite, location: "Chicago, IL", posted: Some((2024, 3, 12)), salary: Some(Salary::fixed(95_000)) },
        Posting { id: 3, title: "Frontend Engineer", company: "PixelWorks", category: Technology, level: Mid, job_type: Contract, location_type: Hybrid, location: "San Francisco, CA", posted: Some((2024, 2, 1)), salary: None },
        Posting { id: 4, title: "Product Designer", company: "PixelWorks", category: Design, level: Mid, job_type: FullTime, location_type: Remote, location: "Remote - Europe", posted: None, salary: Some(Salary::range(90_000, 110_000)) },
        Posting { id: 5, title: "Mechanical Engineer", company: "BuildIt", category: Engineering, level: Entry, job_type: FullTime, location_type: OnSite, location: "Detroit, MI", posted: Some((2024, 3, 10)), salary: Some(Salary::fixed(75_000)) },
        Posting { id: 6, title: "Data Engineer", company: "Numerix", category: Technology, level: Senior, job_type: FullTime, location_type: Remote, location: "Remote", posted: Some((2024, 1, 20)), salary: Some(Salary::fixed(150_000)) },
        Posting { id: 7, title: "Marketing Intern", company: "BrandCo", category: Marketing, level: Entry, job_type: Internship, location_type: Hybrid, location: "New York, NY", posted: Some((2024, 3, 15)), salary: None },
    ];

    JobStore::from_records(postings.into_iter().map(Posting::build).collect()).unwrap()
}

fn ids(jobs: &[&JobRecord]) -> Vec<JobId> {
    jobs.iter().map(|job| job.id).collect()
}

#[test]
fn test_empty_selection_is_identity() {
    let store = create_test_store();
    let all: Vec<&JobRecord> = store.jobs().iter().collect();

    let filtered = filter(all.clone(), &FilterSelection::new());
    assert_eq!(ids(&filtered), ids(&all));
}

#[test]
fn test_facet_law_or_within_and_across() {
    let store = create_test_store();
    let selection = FilterSelection::new()
        .with(Facet::Category, ["technology", "design"])
        .unwrap()
        .with(Facet::LocationType, ["remote"])
        .unwrap()
        .with_location("REMOTE");

    let filtered = filter(store.jobs().iter().collect(), &selection);

    // Every survivor satisfies every active constraint...
    for job in &filtered {
        assert!(matches!(job.category, Category::Technology | Category::Design));
        assert_eq!(job.location_type, LocationType::Remote);
        assert!(job.location.to_lowercase().contains("remote"));
    }
    // ...and nothing that satisfies them all was dropped.
    assert_eq!(ids(&filtered), vec![1, 4, 6]);
}

#[test]
fn test_search_term_conjunction() {
    let store = create_test_store();

    let both = search(store.jobs(), "engineer remote");
    assert_eq!(ids(&both), vec![1, 6]);

    // Each term alone matches more
    assert_eq!(ids(&search(store.jobs(), "engineer")), vec![1, 3, 5, 6]);
    assert_eq!(ids(&search(store.jobs(), "remote")), vec![1, 4, 6]);
}

#[test]
fn test_search_then_filter_then_sort() {
    let store = create_test_store();
    let selection = FilterSelection::new()
        .with(Facet::ExperienceLevel, ["senior", "mid"])
        .unwrap();

    let result = run_query(store.jobs(), "engineer", &selection, SortKey::Salary, 1, 9).unwrap();

    // Engineers at senior/mid: 1 (150k lower bound), 6 (150k), 3 (no salary)
    assert_eq!(ids(&result.items), vec![1, 6, 3]);
    assert_eq!(result.total_matches, 3);
}

#[test]
fn test_date_sort_is_stable_under_ties() {
    let store = create_test_store();
    let all: Vec<&JobRecord> = store.jobs().iter().collect();

    let sorted = sort(&all, SortKey::Date);

    // 1 and 5 share 2024-03-10 and keep input order; undated 4 is last
    assert_eq!(ids(&sorted), vec![7, 2, 1, 5, 3, 6, 4]);
}

#[test]
fn test_pagination_totals() {
    let jobs: Vec<JobRecord> = (1..=20)
        .map(|id| {
            Posting {
                id,
                title: "Analyst",
                company: "Numerix",
                category: Category::Finance,
                level: ExperienceLevel::Mid,
                job_type: JobType::FullTime,
                location_type: LocationType::Remote,
                location: "Remote",
                posted: None,
                salary: None,
            }
            .build()
        })
        .collect();

    let page_three = run_query(&jobs, "", &FilterSelection::new(), SortKey::Relevance, 3, 9).unwrap();
    assert_eq!(page_three.total_pages, 3);
    assert_eq!(page_three.items.len(), 2);

    let page_four = run_query(&jobs, "", &FilterSelection::new(), SortKey::Relevance, 4, 9).unwrap();
    assert!(page_four.items.is_empty());
    assert_eq!(page_four.total_pages, 3);
}

#[test]
fn test_reset_on_change() {
    let store = create_test_store();
    let mut session = QuerySession::new(2).unwrap();
    session.run(store.jobs());
    assert_eq!(session.total_pages(), 4);

    session.go_to(3);
    session.set_query_text("engineer");
    assert_eq!(session.page(), 1);

    session.run(store.jobs());
    session.go_to(2);
    session.toggle_facet(Facet::Category, "technology").unwrap();
    assert_eq!(session.page(), 1);

    session.run(store.jobs());
    session.go_to(2);
    session.set_sort_key(SortKey::Date);
    assert_eq!(session.page(), 1);
}

#[test]
fn test_scenario_from_three_jobs() {
    let a = Posting { id: 1, title: "A", company: "X", category: Category::Engineering, level: ExperienceLevel::Mid, job_type: JobType::FullTime, location_type: LocationType::Remote, location: "", posted: Some((2024, 1, 1)), salary: None }.build();
    let b = Posting { id: 2, title: "B", company: "X", category: Category::Sales, level: ExperienceLevel::Mid, job_type: JobType::FullTime, location_type: LocationType::Remote, location: "", posted: Some((2024, 3, 1)), salary: None }.build();
    let c = Posting { id: 3, title: "C", company: "X", category: Category::Engineering, level: ExperienceLevel::Mid, job_type: JobType::FullTime, location_type: LocationType::Remote, location: "", posted: Some((2024, 2, 1)), salary: None }.build();

    let selection = FilterSelection::new()
        .with(Facet::Category, ["engineering"])
        .unwrap();
    let filtered = filter(vec![&a, &b, &c], &selection);
    assert_eq!(ids(&filtered), vec![1, 3]);

    let sorted = sort(&filtered, SortKey::Date);
    assert_eq!(ids(&sorted), vec![3, 1]);

    let (page, total_pages) = paginate(&sorted, 1, NonZeroUsize::new(9).unwrap());
    assert_eq!(ids(page), vec![3, 1]);
    assert_eq!(total_pages, 1);
}

#[test]
fn test_location_text_is_matched_verbatim() {
    let store = create_test_store();
    let all: Vec<&JobRecord> = store.jobs().iter().collect();

    let trailing_space = FilterSelection::new().with_location("york ");
    assert!(filter(all.clone(), &trailing_space).is_empty());

    let exact = FilterSelection::new().with_location("york,");
    assert_eq!(ids(&filter(all, &exact)), vec![7]);
}
