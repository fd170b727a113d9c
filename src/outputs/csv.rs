//! CSV output for the collected record set.
//!
//! Writes one row per record with a fixed column order:
//!
//! ```text
//! title,author,price,availability,url,source,isbn,rating,scraped_at
//! ```
//!
//! Absent optional fields render as empty cells. Fields containing commas,
//! quotes, or newlines are quoted with doubled inner quotes (RFC 4180), so
//! titles like `Moby Dick; Or, The Whale` survive the round trip.

use crate::models::Book;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

const HEADER: &str = "title,author,price,availability,url,source,isbn,rating,scraped_at";

/// Write the record set to a CSV file at `path`.
///
/// # Returns
///
/// `Ok(())` on success, or the underlying I/O error.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_books(books: &[Book], path: &str) -> Result<(), Box<dyn Error>> {
    let rendered = render(books);
    fs::write(path, rendered).await?;
    info!(count = books.len(), "Wrote CSV file");
    Ok(())
}

/// Render the record set as CSV text.
pub fn render(books: &[Book]) -> String {
    let mut out = String::with_capacity(books.len() * 128 + HEADER.len() + 1);
    out.push_str(HEADER);
    out.push('\n');

    for book in books {
        let row = [
            escape(&book.title),
            escape(&book.author),
            book.price.map(|p| p.to_string()).unwrap_or_default(),
            escape(&book.availability),
            escape(&book.url),
            escape(&book.source),
            book.isbn.as_deref().map(escape).unwrap_or_default(),
            book.rating.map(|r| r.to_string()).unwrap_or_default(),
            book.scraped_at.to_rfc3339(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
