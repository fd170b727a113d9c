//! Aggregation of the merged record set.
//!
//! The aggregator consumes everything the scheduler collected and derives
//! two views: a per-source record tally and the cross-source price
//! comparison groups. Both are recomputed from scratch on every run; neither
//! feeds back into scraping.
//!
//! # Grouping rules
//!
//! Titles are bucketed under their normalized form (trimmed, case-folded,
//! inner whitespace collapsed — see [`normalize_title`]). Only records with
//! a present price contribute an offer, offers keep first-seen order, and a
//! bucket only becomes a [`ComparisonGroup`] when offers span at least
//! `min_sources` distinct sources — a price seen at a single source carries
//! no comparison value. The threshold is a policy knob; 2 is the default.

use crate::models::Book;
use crate::utils::normalize_title;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// One priced sighting of a title at one source.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    /// Source the price was seen at.
    pub source: String,
    /// The listed price.
    pub price: f64,
}

/// All cross-source price observations for one normalized title.
#[derive(Debug, Clone)]
pub struct ComparisonGroup {
    /// The normalized title shared by every offer in the group.
    pub title: String,
    /// Priced sightings in first-seen order.
    pub offers: Vec<PriceObservation>,
}

/// Derived summary of one run's record set.
#[derive(Debug)]
pub struct ScrapeSummary {
    /// Record tally per source, covering every record (priced or not).
    pub counts_by_source: BTreeMap<String, usize>,
    /// Multi-source price comparison groups in first-seen title order.
    pub groups: Vec<ComparisonGroup>,
}

/// Summarize a record set: per-source counts plus comparison groups.
///
/// # Arguments
///
/// * `books` - The merged record set from one run
/// * `min_sources` - Minimum distinct sources a group must span to be kept
pub fn summarize(books: &[Book], min_sources: usize) -> ScrapeSummary {
    let mut counts_by_source: BTreeMap<String, usize> = BTreeMap::new();
    for book in books {
        *counts_by_source.entry(book.source.clone()).or_insert(0) += 1;
    }

    // Buckets keep first-seen order; the side map only locates them.
    let mut buckets: Vec<ComparisonGroup> = Vec::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();

    for book in books {
        let Some(price) = book.price else { continue };
        let key = normalize_title(&book.title);
        if key.is_empty() {
            continue;
        }

        let index = *bucket_index.entry(key.clone()).or_insert_with(|| {
            buckets.push(ComparisonGroup {
                title: key,
                offers: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[index].offers.push(PriceObservation {
            source: book.source.clone(),
            price,
        });
    }

    let groups: Vec<ComparisonGroup> = buckets
        .into_iter()
        .filter(|group| {
            group
                .offers
                .iter()
                .map(|offer| offer.source.as_str())
                .unique()
                .count()
                >= min_sources
        })
        .collect();

    debug!(
        records = books.len(),
        sources = counts_by_source.len(),
        groups = groups.len(),
        "Summarized record set"
    );

    ScrapeSummary {
        counts_by_source,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(title: &str, source: &str, price: Option<f64>) -> Book {
        Book {
            title: title.to_string(),
            author: "Unknown".to_string(),
            price,
            availability: "In stock".to_string(),
            url: format!("https://{source}/{}", title.replace(' ', "-")),
            source: source.to_string(),
            scraped_at: Utc::now(),
            isbn: None,
            rating: None,
        }
    }

    #[test]
    fn test_counts_sum_to_record_count() {
        let books = vec![
            book("A", "alpha.example", Some(1.0)),
            book("B", "alpha.example", None),
            book("C", "beta.example", Some(2.0)),
            book("D", "gamma.example", None),
        ];
        let summary = summarize(&books, 2);

        let total: usize = summary.counts_by_source.values().sum();
        assert_eq!(total, books.len());
        assert_eq!(summary.counts_by_source["alpha.example"], 2);
    }

    #[test]
    fn test_grouping_is_case_and_whitespace_insensitive() {
        let books = vec![
            book("Clean Code", "alpha.example", Some(30.0)),
            book("  clean code ", "beta.example", Some(25.0)),
        ];
        let summary = summarize(&books, 2);

        assert_eq!(summary.groups.len(), 1);
        let group = &summary.groups[0];
        assert_eq!(group.title, "clean code");
        assert_eq!(group.offers.len(), 2);
    }

    #[test]
    fn test_single_source_groups_are_excluded() {
        let books = vec![
            book("Lonely Title", "alpha.example", Some(10.0)),
            book("Shared Title", "alpha.example", Some(12.0)),
            book("Shared Title", "beta.example", Some(9.0)),
        ];
        let summary = summarize(&books, 2);

        assert_eq!(summary.groups.len(), 1);
        let group = &summary.groups[0];
        assert_eq!(group.title, "shared title");
        assert_eq!(
            group.offers,
            vec![
                PriceObservation {
                    source: "alpha.example".to_string(),
                    price: 12.0
                },
                PriceObservation {
                    source: "beta.example".to_string(),
                    price: 9.0
                },
            ]
        );
    }

    #[test]
    fn test_unpriced_records_do_not_form_offers() {
        let books = vec![
            book("Free Title", "alpha.example", None),
            book("Free Title", "beta.example", None),
        ];
        let summary = summarize(&books, 2);
        assert!(summary.groups.is_empty());
        // They still count towards the per-source tally.
        let total: usize = summary.counts_by_source.values().sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_offers_preserve_first_seen_order() {
        let books = vec![
            book("Title", "gamma.example", Some(3.0)),
            book("Title", "alpha.example", Some(1.0)),
            book("Title", "beta.example", Some(2.0)),
        ];
        let summary = summarize(&books, 2);
        let sources: Vec<&str> = summary.groups[0]
            .offers
            .iter()
            .map(|o| o.source.as_str())
            .collect();
        assert_eq!(sources, vec!["gamma.example", "alpha.example", "beta.example"]);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let books = vec![
            book("Title", "alpha.example", Some(1.0)),
            book("Title", "beta.example", Some(2.0)),
        ];
        assert_eq!(summarize(&books, 3).groups.len(), 0);
        assert_eq!(summarize(&books, 1).groups.len(), 1);
    }
}
