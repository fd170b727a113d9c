//! # bookscout
//!
//! A concurrent book-data aggregation pipeline that scrapes listings from
//! multiple independent catalog sources, normalizes them into a unified
//! record type, and emits CSV/JSON output plus a cross-source price
//! comparison.
//!
//! ## Sources
//!
//! - books.toscrape.com catalogue pages (HTML listing cards, prices, ratings)
//! - openlibrary.org search API (JSON, authors, ISBNs, ratings, no prices)
//! - gutenberg.org top-downloads list (HTML, free books, price 0.0)
//!
//! ## Usage
//!
//! ```sh
//! bookscout -c books_data.csv -j books_data.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a fan-out/collect pipeline:
//! 1. **Fan-out**: Every source task launches concurrently
//! 2. **Admission**: A counting semaphore caps in-flight fetches
//! 3. **Pacing**: A global rate limiter spaces outbound requests
//! 4. **Containment**: Each task reduces its own failures to zero records
//! 5. **Aggregation**: Records are tallied per source and grouped by
//!    normalized title for price comparison
//! 6. **Output**: One CSV file and one JSON file, plus a stdout summary

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod gate;
mod limiter;
mod models;
mod outputs;
mod scheduler;
mod scrapers;
mod transport;
mod utils;

use aggregator::summarize;
use cli::Cli;
use gate::AdmissionGate;
use limiter::RateLimiter;
use scheduler::{ScrapeContext, run_all};
use scrapers::SourceTask;
use transport::HttpTransport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("bookscout starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Build the task list ----
    let mut tasks = Vec::new();
    for page in 1..=args.listing_pages {
        tasks.push(SourceTask::ListingPage { page });
    }
    for query in &args.queries {
        tasks.push(SourceTask::SearchApi {
            query: query.clone(),
        });
    }
    tasks.push(SourceTask::CatalogTop);
    info!(task_count = tasks.len(), "Task list assembled");

    // ---- Shared infrastructure: one transport, one limiter, one gate ----
    let transport = match HttpTransport::new(
        Duration::from_secs(args.timeout_secs),
        args.max_concurrent,
    ) {
        Ok(transport) => transport,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return Err(e.into());
        }
    };
    let ctx = ScrapeContext {
        transport,
        limiter: RateLimiter::new(Duration::from_millis(args.min_interval_ms)),
        gate: AdmissionGate::new(args.max_concurrent),
    };
    info!(
        max_concurrent = args.max_concurrent,
        min_interval_ms = args.min_interval_ms,
        timeout_secs = args.timeout_secs,
        "Pipeline configured"
    );

    // ---- Run every task concurrently ----
    let books = run_all(tasks, &ctx).await;
    info!(count = books.len(), "Total books scraped");

    // ---- Write output files ----
    if let Err(e) = outputs::csv::write_books(&books, &args.csv_output).await {
        error!(path = %args.csv_output, error = %e, "Failed to write CSV output");
    }
    if let Err(e) = outputs::json::write_books(&books, &args.json_output).await {
        error!(path = %args.json_output, error = %e, "Failed to write JSON output");
    }

    // ---- Aggregate and print the run summary ----
    let summary = summarize(&books, args.min_sources);

    println!("\n=== Scrape Summary ===");
    println!("Total books collected: {}", books.len());
    println!("\nBooks per source:");
    for (source, count) in &summary.counts_by_source {
        println!("  {source}: {count}");
    }

    println!("\n=== Sample Price Comparisons ===");
    if summary.groups.is_empty() {
        println!("  (no title was priced at {} or more sources)", args.min_sources);
    }
    for group in summary.groups.iter().take(5) {
        println!("\n'{}':", group.title);
        for offer in &group.offers {
            println!("  {:.2} at {}", offer.price, offer.source);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
