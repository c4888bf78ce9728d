use job_data::{CatalogTag, Facet, JobStore};
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/jobs.json");

    println!("Loading job listings from {}...\n", path.display());

    let start = Instant::now();
    let store = JobStore::load_from_file(path).expect("Failed to load job listings");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Jobs: {}", store.len());
    println!(
        "With salary: {}",
        store.jobs().iter().filter(|job| job.salary.is_some()).count()
    );
    println!(
        "With posting date: {}",
        store.jobs().iter().filter(|job| job.posted_date.is_some()).count()
    );

    for facet in Facet::ALL {
        println!("\n{}:", facet.label());
        for entry in facet.catalog() {
            let count = store
                .jobs()
                .iter()
                .filter(|job| job.tag(facet) == entry.id)
                .count();
            println!("  {:<24} {}", entry.name, count);
        }
    }

    if let Some(newest) = store.jobs().iter().max_by_key(|job| job.posted_date) {
        println!(
            "\nNewest listing: {} ({})",
            newest.title,
            newest.category.name()
        );
    }
}
