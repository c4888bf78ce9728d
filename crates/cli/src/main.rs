use anyhow::{anyhow, Result};
use board::{BoardConfig, BoardPage, JobBoard, JobProvider, JobView, JsonFileProvider};
use clap::{Parser, Subcommand};
use colored::Colorize;
use job_data::{CatalogTag, Facet, JobId, JobRecord, JobStore};
use pipeline::{run_query, FilterSelection, SortKey, DEFAULT_PAGE_SIZE};
use rand::seq::IndexedRandom;
use rand::Rng;
use saved_jobs::{JsonFileStore, SavedJobs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Job Board - browse, filter and save job listings
#[derive(Parser)]
#[command(name = "job-board")]
#[command(about = "Search, filter and sort job listings from the terminal", long_about = None)]
struct Cli {
    /// Job listings JSON file. Repeat to merge several files
    #[arg(short, long, default_value = "data/jobs.json")]
    jobs: Vec<PathBuf>,

    /// Path to the saved-jobs file
    #[arg(short, long, default_value = ".job-board/saved.json")]
    saved: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of jobs matching a query
    List {
        /// Free-text query; every word must appear somewhere in the listing
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category id (repeatable, e.g. technology)
        #[arg(long)]
        category: Vec<String>,

        /// Experience level id (repeatable, e.g. senior)
        #[arg(long)]
        experience: Vec<String>,

        /// Job type id (repeatable, e.g. full-time)
        #[arg(long)]
        job_type: Vec<String>,

        /// Work arrangement id (repeatable, e.g. remote)
        #[arg(long)]
        work_type: Vec<String>,

        /// Location substring (case-insensitive)
        #[arg(long)]
        location: Option<String>,

        /// Sort order: relevance, date or salary
        #[arg(long, default_value = "relevance")]
        sort: SortKey,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Jobs per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE.get())]
        page_size: usize,
    },

    /// Show every field of one job
    Show {
        /// Job ID to display
        #[arg(long)]
        id: JobId,
    },

    /// Save a job, or unsave it if already saved
    Save {
        /// Job ID to toggle
        #[arg(long)]
        id: JobId,
    },

    /// List saved jobs
    Saved,

    /// Print the filter catalogs
    Catalog,

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of queries to run
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent queries
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List {
            query,
            category,
            experience,
            job_type,
            work_type,
            location,
            sort,
            page,
            page_size,
        } => {
            let selection = FilterSelection::new()
                .with(Facet::Category, &category)?
                .with(Facet::ExperienceLevel, &experience)?
                .with(Facet::JobType, &job_type)?
                .with(Facet::LocationType, &work_type)?
                .with_location(location.as_deref().unwrap_or_default());
            let board = open_board(&cli.jobs, &cli.saved, page_size)?;
            handle_list(board, &query, selection, sort, page)?
        }
        Commands::Show { id } => {
            handle_show(open_board(&cli.jobs, &cli.saved, DEFAULT_PAGE_SIZE.get())?, id)?
        }
        Commands::Save { id } => {
            handle_save(open_board(&cli.jobs, &cli.saved, DEFAULT_PAGE_SIZE.get())?, id)?
        }
        Commands::Saved => {
            handle_saved(open_board(&cli.jobs, &cli.saved, DEFAULT_PAGE_SIZE.get())?)?
        }
        Commands::Catalog => handle_catalog(),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&cli.jobs, requests, concurrent).await?,
    }

    Ok(())
}

type Board = JobBoard<JsonFileProvider, JsonFileStore>;

fn open_board(jobs: &[PathBuf], saved: &Path, page_size: usize) -> Result<Board> {
    let tracker = SavedJobs::open(JsonFileStore::new(saved));
    JobBoard::new(
        JsonFileProvider::with_paths(jobs.iter().cloned()),
        tracker,
        BoardConfig { page_size },
    )
}

/// Handle the 'list' command
fn handle_list(
    mut board: Board,
    query: &str,
    selection: FilterSelection,
    sort: SortKey,
    page: usize,
) -> Result<()> {
    let session = board.session_mut();
    session.set_query_text(query);
    session.set_selection(selection);
    session.set_sort_key(sort);

    // The first run learns the page count, then we move to the requested page
    let mut result = board.current_page()?;
    if page != result.page {
        let landed = board.session_mut().go_to(page);
        if landed != page {
            println!(
                "{} Page {} is out of range, showing page {}",
                "!".yellow(),
                page,
                landed
            );
        }
        result = board.current_page()?;
    }

    print_page(&result, sort);
    Ok(())
}

/// Handle the 'show' command
fn handle_show(board: Board, id: JobId) -> Result<()> {
    let view = board
        .job(id)?
        .ok_or_else(|| anyhow!("Job {} not found", id))?;
    let job = &view.job;

    println!("{}", format!("{} at {}", job.title, job.company).bold().blue());
    if view.saved {
        println!("{}", "★ Saved".yellow());
    }
    println!("{}Category: {}", "• ".green(), job.category.name());
    println!("{}Experience: {}", "• ".green(), job.experience_level.name());
    println!("{}Job type: {}", "• ".green(), job.job_type.name());
    println!(
        "{}Location: {} ({})",
        "• ".green(),
        display_or_dash(&job.location),
        job.location_type.name()
    );
    println!("{}Salary: {}", "• ".cyan(), format_salary(job));
    println!(
        "{}Posted: {}",
        "• ".cyan(),
        job.posted_date
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if !job.skills.is_empty() {
        println!("{}Skills: {}", "• ".cyan(), job.skills.join(", "));
    }
    if let Some(url) = &job.url {
        println!("{}Apply: {}", "• ".cyan(), url.underline());
    }
    if !job.description.is_empty() {
        println!();
        println!("{}", job.description);
    }
    Ok(())
}

/// Handle the 'save' command
fn handle_save(board: Board, id: JobId) -> Result<()> {
    let now_saved = board.toggle_saved(id)?;
    if now_saved {
        println!("{} Saved job {}", "★".yellow(), id);
    } else {
        println!("{} Removed job {} from saved jobs", "☆".dimmed(), id);
    }
    println!("{} saved in total", board.saved_jobs().len());
    Ok(())
}

/// Handle the 'saved' command
fn handle_saved(board: Board) -> Result<()> {
    let listing = board.saved_listing()?;

    println!("{}", "Saved jobs:".bold().blue());
    if listing.jobs.is_empty() {
        println!("  (none)");
    }
    for job in &listing.jobs {
        print_job_line(job, true);
    }
    if !listing.missing.is_empty() {
        println!(
            "{} {} saved job(s) no longer listed: {:?}",
            "!".yellow(),
            listing.missing.len(),
            listing.missing
        );
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog() {
    for facet in Facet::ALL {
        println!("{} ({})", facet.label().bold().blue(), facet.key());
        for entry in facet.catalog() {
            println!("  {:<18} {}", entry.id.green(), entry.name);
        }
    }
    println!("{}", "Sort keys".bold().blue());
    for key in SortKey::ALL {
        println!("  {}", key.as_str().green());
    }
}

/// A randomly generated query for the benchmark
struct BenchQuery {
    text: String,
    selection: FilterSelection,
    sort: SortKey,
    page: usize,
}

/// Handle the 'benchmark' command
async fn handle_benchmark(jobs: &[PathBuf], requests: usize, concurrent: usize) -> Result<()> {
    let provider = JsonFileProvider::with_paths(jobs.iter().cloned());
    println!("Loading jobs from {}...", provider.describe());
    let start = Instant::now();
    let store = provider.snapshot()?;
    println!("{} Loaded {} jobs in {:?}", "✓".green(), store.len(), start.elapsed());

    let queries = generate_queries(&store, requests)?;
    info!(
        "Running {} queries with concurrency {}",
        queries.len(),
        concurrent
    );

    // Queries are CPU-bound, so they run on the blocking pool
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for query in queries {
        let store = Arc::clone(&store);
        let permit = Arc::clone(&permits).acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            run_query(
                store.jobs(),
                &query.text,
                &query.selection,
                query.sort,
                query.page,
                DEFAULT_PAGE_SIZE.get(),
            )?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = wall_clock.elapsed();

    if timings.is_empty() {
        println!("No queries were run");
        return Ok(());
    }

    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} queries/second", throughput);

    Ok(())
}

/// Random queries built from words that occur in the listings, so most of
/// them match something.
fn generate_queries(store: &JobStore, count: usize) -> Result<Vec<BenchQuery>> {
    let words: Vec<String> = store
        .jobs()
        .iter()
        .flat_map(|job| job.title.split_whitespace())
        .map(str::to_lowercase)
        .collect();

    let mut rng = rand::rng();
    let mut queries = Vec::with_capacity(count);
    for _ in 0..count {
        let text = if rng.random_bool(0.5) {
            words.choose(&mut rng).cloned().unwrap_or_default()
        } else {
            String::new()
        };

        let mut selection = FilterSelection::new();
        for facet in Facet::ALL {
            if rng.random_bool(0.3) {
                if let Some(entry) = facet.catalog().choose(&mut rng) {
                    selection.select(facet, entry.id)?;
                }
            }
        }

        queries.push(BenchQuery {
            text,
            selection,
            sort: *SortKey::ALL.choose(&mut rng).unwrap_or(&SortKey::Relevance),
            page: rng.random_range(1..=3),
        });
    }
    Ok(queries)
}

/// Helper function to format and print a page of jobs
fn print_page(page: &BoardPage, sort: SortKey) {
    println!(
        "{}",
        format!(
            "{} matching jobs (of {}), sorted by {}",
            page.total_matches, page.total_jobs, sort
        )
        .bold()
        .blue()
    );
    if page.items.is_empty() {
        println!("  No jobs on this page");
    }
    for JobView { job, saved } in &page.items {
        print_job_line(job, *saved);
    }
    println!(
        "{}",
        format!("Page {} of {}", page.page, page.total_pages).dimmed()
    );
}

fn print_job_line(job: &JobRecord, saved: bool) {
    let marker = if saved { "★".yellow() } else { " ".normal() };
    println!(
        "{} {}. {} at {} [{}, {}] {} - {}",
        marker,
        job.id.to_string().green(),
        job.title.bold(),
        job.company,
        job.location_type.name(),
        job.job_type.name(),
        display_or_dash(&job.location),
        format_salary(job)
    );
}

fn format_salary(job: &JobRecord) -> String {
    job.salary
        .map(|salary| salary.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn display_or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

