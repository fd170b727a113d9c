//! Data models for scraped book records.
//!
//! This module defines [`Book`], the normalized record type that every source
//! scraper produces. Whatever shape a source serves its listings in (HTML
//! product cards, JSON search results, plain catalog lists), its parser
//! reduces each listing to one `Book` so the rest of the pipeline — the
//! scheduler, the aggregator, and the CSV/JSON sinks — only ever deals with
//! a single type.
//!
//! # Invariants
//!
//! - `title` and `source` are never empty (parsers skip listings that would
//!   violate this rather than emit a partial record)
//! - `price` and `rating`, when present, are non-negative; `rating` is on a
//!   0–5 scale
//! - A `Book` is never mutated after its parser constructs it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized book listing scraped from one source.
///
/// Constructed exclusively inside a source parser from a single raw payload,
/// tagged with the `source` identifier and a `scraped_at` timestamp taken at
/// construction time. Fields that a source does not publish (prices on Open
/// Library, authors on listing pages) are `None` or a documented fallback
/// ("Unknown"), never fabricated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Book {
    /// Book title, as published by the source.
    pub title: String,
    /// Author name, or `"Unknown"` when the source does not list one.
    pub author: String,
    /// Listed price in the source's currency, absent when not listed.
    pub price: Option<f64>,
    /// Free-text availability status (e.g. "In stock", "Free Download").
    pub availability: String,
    /// Absolute URL of the listing.
    pub url: String,
    /// Identifier of the origin source, e.g. `"books.toscrape.com"`.
    pub source: String,
    /// Timestamp taken when the record was constructed.
    pub scraped_at: DateTime<Utc>,
    /// ISBN when the source publishes one.
    pub isbn: Option<String>,
    /// Reader rating on a 0–5 scale when the source publishes one.
    pub rating: Option<f64>,
}
