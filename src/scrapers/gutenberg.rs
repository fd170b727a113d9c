//! Project Gutenberg top-downloads scraper.
//!
//! Scrapes the [Project Gutenberg](https://www.gutenberg.org) top-100 page,
//! where the most-downloaded books are published as a plain ordered list of
//! `Title by Author` links. Every Gutenberg book is a free download, so
//! records from this source carry an explicit price of `0.0` — which lets
//! them participate in cross-source price comparison as the free option.

use crate::models::Book;
use crate::scrapers::ParseError;
use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Source identifier stamped on every record from this scraper.
pub const SOURCE: &str = "gutenberg.org";

/// Number of entries taken from the top list.
const TOP_LIMIT: usize = 20;

static LIST_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("ol").unwrap());
static ENTRY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li a").unwrap());

/// URL of the top-downloads page.
pub fn top_url() -> String {
    "https://www.gutenberg.org/browse/scores/top".to_string()
}

/// Parse the first ordered list on the top page into records.
///
/// Entries without an href or with an empty title are skipped; the rest of
/// the list is still processed.
pub fn parse_top(html: &str, base_url: &str) -> Vec<Book> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(%base_url, error = %e, "Unusable base URL for top page");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let Some(list) = document.select(&LIST_SELECTOR).next() else {
        warn!(source = SOURCE, "Top page has no ordered list; layout may have changed");
        return Vec::new();
    };

    let mut books = Vec::new();
    for entry in list.select(&ENTRY_SELECTOR).take(TOP_LIMIT) {
        match parse_entry(entry, &base) {
            Ok(book) => books.push(book),
            Err(e) => {
                warn!(source = SOURCE, error = %e, "Skipping malformed top-list entry");
            }
        }
    }

    debug!(source = SOURCE, count = books.len(), "Parsed top page");
    books
}

/// Extract one record from one `<li><a>` entry.
///
/// Link text is `"Title by Author (12345)"`; when no `" by "` separator is
/// present the whole text is the title and the author falls back to
/// `"Unknown"`.
fn parse_entry(entry: ElementRef<'_>, base: &Url) -> Result<Book, ParseError> {
    let text = entry.text().collect::<String>();
    let text = text.trim();

    let (title, author) = match text.split_once(" by ") {
        Some((title, author)) => (title.trim(), author.trim()),
        None => (text, "Unknown"),
    };
    if title.is_empty() {
        return Err(ParseError::MissingField("title"));
    }

    let href = entry
        .value()
        .attr("href")
        .ok_or(ParseError::MissingField("url"))?;
    let url = base
        .join(href)
        .map_err(|_| ParseError::MissingField("url"))?
        .to_string();

    Ok(Book {
        title: title.to_string(),
        author: author.to_string(),
        price: Some(0.0),
        availability: "Free Download".to_string(),
        url,
        source: SOURCE.to_string(),
        scraped_at: Utc::now(),
        isbn: None,
        rating: None,
    })
}
