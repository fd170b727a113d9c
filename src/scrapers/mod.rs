//! Source scrapers: one task variant per remote catalog.
//!
//! Each supported source is a variant of [`SourceTask`], a closed set rather
//! than an open trait object, so the full task list is visible in one place
//! and each variant's parser is a pure function that tests can feed fixture
//! payloads.
//!
//! # Supported Sources
//!
//! | Source | Variant | Method | Notes |
//! |--------|---------|--------|-------|
//! | books.toscrape.com | [`SourceTask::ListingPage`] | HTML scraping | One task per catalogue page |
//! | openlibrary.org | [`SourceTask::SearchApi`] | JSON search API | One task per query, no prices |
//! | gutenberg.org | [`SourceTask::CatalogTop`] | HTML scraping | Top-downloads list, price 0.0 |
//!
//! # Uniform run contract
//!
//! Every variant runs the same steps: acquire the admission gate, await a
//! rate-limiter turn, fetch through the shared transport, then hand the raw
//! payload to the variant-specific parser. A task never propagates an error
//! to the scheduler — fetch failures are logged and reduce to an empty
//! record list, and a malformed listing inside an otherwise valid payload is
//! skipped without dropping the payload's other listings. The gate permit is
//! an RAII guard, so the slot is released on every exit path.

pub mod books_toscrape;
pub mod gutenberg;
pub mod open_library;

use crate::models::Book;
use crate::scheduler::ScrapeContext;
use crate::transport::Fetch;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Error raised while extracting one listing from a payload.
///
/// Always contained within the parser that raised it: the offending listing
/// is logged and skipped, the rest of the payload is still processed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required field was missing or empty in one listing.
    #[error("listing is missing required field `{0}`")]
    MissingField(&'static str),
    /// A numeric field was present but unparsable.
    #[error("could not parse field `{field}` from {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    /// The payload as a whole was not in the expected format.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// One concurrent unit of work: fetch from a single remote source and parse.
#[derive(Debug, Clone)]
pub enum SourceTask {
    /// One catalogue page of books.toscrape.com.
    ListingPage { page: u32 },
    /// One Open Library full-text search query.
    SearchApi { query: String },
    /// The Project Gutenberg top-downloads list.
    CatalogTop,
}

impl SourceTask {
    /// Identifier of the remote source this task targets.
    pub fn source(&self) -> &'static str {
        match self {
            SourceTask::ListingPage { .. } => books_toscrape::SOURCE,
            SourceTask::SearchApi { .. } => open_library::SOURCE,
            SourceTask::CatalogTop => gutenberg::SOURCE,
        }
    }

    /// The URL this task fetches.
    pub fn url(&self) -> String {
        match self {
            SourceTask::ListingPage { page } => books_toscrape::page_url(*page),
            SourceTask::SearchApi { query } => open_library::search_url(query),
            SourceTask::CatalogTop => gutenberg::top_url(),
        }
    }

    /// Execute this task end to end, returning the records it produced.
    ///
    /// Never returns an error: all failure modes are contained here. A fetch
    /// failure or an unusable payload yields an empty list plus a logged
    /// diagnostic naming the source, URL, and error kind.
    #[instrument(level = "info", skip_all, fields(source = self.source()))]
    pub async fn run<F: Fetch>(&self, ctx: &ScrapeContext<F>) -> Vec<Book> {
        let url = self.url();

        // Holds the admission slot for the full fetch+parse; released on
        // every exit path when the permit drops.
        let _permit = ctx.gate.acquire().await;
        ctx.limiter.await_turn().await;

        let payload = match ctx.transport.fetch(&url).await {
            Ok(payload) => payload,
            Err(e) => {
                error!(source = self.source(), %url, error = %e, "Fetch failed; no records from this source");
                return Vec::new();
            }
        };

        let books = match self {
            SourceTask::ListingPage { .. } => books_toscrape::parse_listing(&payload, &url),
            SourceTask::SearchApi { .. } => open_library::parse_search(&payload),
            SourceTask::CatalogTop => gutenberg::parse_top(&payload, &url),
        };

        info!(source = self.source(), %url, count = books.len(), "Task complete");
        books
    }
}
