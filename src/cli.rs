//! Command-line interface definitions for bookscout.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The defaults reproduce a standard run: three listing pages, two search
//! queries, the top-downloads catalog, five concurrent fetches paced 500ms
//! apart.

use clap::Parser;

/// Command-line arguments for the bookscout application.
///
/// # Examples
///
/// ```sh
/// # Standard run with default sources and output paths
/// bookscout
///
/// # Gentler on the remote sources, custom outputs
/// bookscout --max-concurrent 2 --min-interval-ms 1500 \
///     -c out/books.csv -j out/books.json
///
/// # Different search queries
/// bookscout --query "rust programming" --query "distributed systems"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output path for the CSV file
    #[arg(short = 'c', long, default_value = "books_data.csv")]
    pub csv_output: String,

    /// Output path for the JSON file
    #[arg(short = 'j', long, default_value = "books_data.json")]
    pub json_output: String,

    /// Maximum number of concurrently in-flight fetches
    #[arg(long, default_value_t = 5)]
    pub max_concurrent: usize,

    /// Minimum spacing between outbound requests, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub min_interval_ms: u64,

    /// Per-fetch timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Number of books.toscrape.com catalogue pages to scrape
    #[arg(long, default_value_t = 3)]
    pub listing_pages: u32,

    /// Open Library search query (repeatable)
    #[arg(
        long = "query",
        default_values_t = ["python programming".to_string(), "data science".to_string()]
    )]
    pub queries: Vec<String>,

    /// Minimum distinct sources a title must span to appear in the
    /// price-comparison output
    #[arg(long, default_value_t = 2)]
    pub min_sources: usize,
}
