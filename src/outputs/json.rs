//! JSON output for the collected record set.
//!
//! Serializes the full record sequence as a pretty-printed JSON array. Field
//! order follows the [`Book`] struct definition, so output is deterministic
//! for a fixed record sequence and carries exactly the same content as the
//! CSV sink.

use crate::models::Book;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write the record set to a JSON file at `path`.
///
/// # Returns
///
/// `Ok(())` on success, or a serialization / I/O error.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_books(books: &[Book], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(books)?;
    fs::write(path, json).await?;
    info!(count = books.len(), "Wrote JSON file");
    Ok(())
}
