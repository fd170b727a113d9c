//! Open Library search API scraper.
//!
//! Queries the [Open Library](https://openlibrary.org) `search.json`
//! endpoint and normalizes the returned documents. Open Library is a free
//! catalog, so records from this source never carry a price; they are the
//! main contributor of authors, ISBNs, and reader ratings.

use crate::models::Book;
use crate::scrapers::ParseError;
use crate::utils::truncate_for_log;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

/// Source identifier stamped on every record from this scraper.
pub const SOURCE: &str = "openlibrary.org";

/// Number of search documents normalized per query.
const RESULT_LIMIT: usize = 20;

/// Search endpoint URL for one query.
pub fn search_url(query: &str) -> String {
    format!(
        "https://openlibrary.org/search.json?q={}&limit={RESULT_LIMIT}",
        urlencoding::encode(query)
    )
}

/// Shape of the `search.json` response, limited to the fields we consume.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    isbn: Vec<String>,
    key: Option<String>,
    ratings_average: Option<f64>,
}

/// Parse one `search.json` payload into records.
///
/// An unparsable payload yields zero records with a logged diagnostic; a
/// document missing its required title is skipped without dropping the rest.
pub fn parse_search(json: &str) -> Vec<Book> {
    let response: SearchResponse = match serde_json::from_str(json) {
        Ok(response) => response,
        Err(e) => {
            let diag = ParseError::MalformedPayload(e.to_string());
            warn!(
                source = SOURCE,
                error = %diag,
                payload_preview = %truncate_for_log(json, 200),
                "Unusable search payload"
            );
            return Vec::new();
        }
    };

    let mut books = Vec::new();
    for doc in response.docs.into_iter().take(RESULT_LIMIT) {
        match normalize_doc(doc) {
            Ok(book) => books.push(book),
            Err(e) => {
                warn!(source = SOURCE, error = %e, "Skipping malformed search document");
            }
        }
    }

    debug!(source = SOURCE, count = books.len(), "Parsed search payload");
    books
}

/// Reduce one search document to a record.
fn normalize_doc(doc: SearchDoc) -> Result<Book, ParseError> {
    let title = doc
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingField("title"))?;

    let author = doc
        .author_name
        .into_iter()
        .next()
        .unwrap_or_else(|| "Unknown".to_string());

    let url = match doc.key.as_deref() {
        Some(key) => format!("https://openlibrary.org{key}"),
        None => "https://openlibrary.org".to_string(),
    };

    // The API occasionally reports out-of-scale averages; only a 0-5 value
    // is a usable rating.
    let rating = doc
        .ratings_average
        .filter(|r| (0.0..=5.0).contains(r));

    Ok(Book {
        title,
        author,
        price: None,
        availability: "Check Open Library".to_string(),
        url,
        source: SOURCE.to_string(),
        scraped_at: Utc::now(),
        isbn: doc.isbn.into_iter().next(),
        rating,
    })
}
