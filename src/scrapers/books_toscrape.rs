//! books.toscrape.com listing-page scraper.
//!
//! Scrapes one catalogue page of [books.toscrape.com](https://books.toscrape.com),
//! a site that publishes book listings as `article.product_pod` cards. Each
//! card carries the title and relative detail link on `h3 > a`, the price in
//! `p.price_color`, a word-encoded star rating, and an availability marker.
//!
//! The listing pages do not show authors, so every record from this source
//! carries `author = "Unknown"`.

use crate::models::Book;
use crate::scrapers::ParseError;
use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Source identifier stamped on every record from this scraper.
pub const SOURCE: &str = "books.toscrape.com";

static PRODUCT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.product_pod").unwrap());
static TITLE_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3 a").unwrap());
static PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p.price_color").unwrap());
static RATING_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p.star-rating").unwrap());
static AVAILABILITY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.instock.availability").unwrap());

/// URL of one catalogue page.
pub fn page_url(page: u32) -> String {
    format!("https://books.toscrape.com/catalogue/page-{page}.html")
}

/// Parse all product cards on one listing page.
///
/// Malformed cards are logged and skipped; every well-formed card on the
/// page still produces a record.
///
/// # Arguments
///
/// * `html` - Raw page payload
/// * `base_url` - The page URL, used to resolve relative listing links
pub fn parse_listing(html: &str, base_url: &str) -> Vec<Book> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(%base_url, error = %e, "Unusable base URL for listing page");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut books = Vec::new();

    for card in document.select(&PRODUCT_SELECTOR) {
        match parse_card(card, &base) {
            Ok(book) => books.push(book),
            Err(e) => {
                warn!(source = SOURCE, %base_url, error = %e, "Skipping malformed listing");
            }
        }
    }

    debug!(source = SOURCE, count = books.len(), "Parsed listing page");
    books
}

/// Extract one record from one `article.product_pod` card.
fn parse_card(card: ElementRef<'_>, base: &Url) -> Result<Book, ParseError> {
    let link = card
        .select(&TITLE_LINK_SELECTOR)
        .next()
        .ok_or(ParseError::MissingField("title"))?;

    let title = link
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingField("title"))?
        .to_string();

    let href = link
        .value()
        .attr("href")
        .ok_or(ParseError::MissingField("url"))?;
    let url = base
        .join(href)
        .map_err(|_| ParseError::MissingField("url"))?
        .to_string();

    // Price text looks like "£51.77", sometimes with a stray encoding
    // artifact ("Â£51.77") when the page charset is mishandled.
    let price = match card.select(&PRICE_SELECTOR).next() {
        Some(el) => {
            let raw = el.text().collect::<String>();
            let cleaned: String = raw
                .trim()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            let value = cleaned
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber {
                    field: "price",
                    value: raw.trim().to_string(),
                })?;
            Some(value)
        }
        None => None,
    };

    let rating = card
        .select(&RATING_SELECTOR)
        .next()
        .and_then(|el| el.value().classes().find_map(star_word_to_rating));

    let availability = if card.select(&AVAILABILITY_SELECTOR).next().is_some() {
        "In stock"
    } else {
        "Out of stock"
    };

    Ok(Book {
        title,
        author: "Unknown".to_string(),
        price,
        availability: availability.to_string(),
        url,
        source: SOURCE.to_string(),
        scraped_at: Utc::now(),
        isbn: None,
        rating,
    })
}

/// Map the site's word-encoded star classes ("One".."Five") to a numeric rating.
fn star_word_to_rating(class: &str) -> Option<f64> {
    match class {
        "One" => Some(1.0),
        "Two" => Some(2.0),
        "Three" => Some(3.0),
        "Four" => Some(4.0),
        "Five" => Some(5.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title_attr: &str, price: &str, rating: &str) -> String {
        format!(
            r#"<article class="product_pod">
                <p class="star-rating {rating}"></p>
                <h3><a href="catalogue/a-light-in-the-attic_1000/index.html" {title_attr}>A Light in the ...</a></h3>
                <div class="product_price">
                    <p class="price_color">{price}</p>
                    <p class="instock availability">In stock</p>
                </div>
            </article>"#
        )
    }

    #[test]
    fn test_parse_listing_extracts_fields() {
        let html = format!(
            "<html><body>{}</body></html>",
            card(r#"title="A Light in the Attic""#, "£51.77", "Three")
        );
        let books = parse_listing(&html, "https://books.toscrape.com/catalogue/page-1.html");

        assert_eq!(books.len(), 1);
        let book = &books[0];
        assert_eq!(book.title, "A Light in the Attic");
        assert_eq!(book.author, "Unknown");
        assert_eq!(book.price, Some(51.77));
        assert_eq!(book.rating, Some(3.0));
        assert_eq!(book.availability, "In stock");
        assert_eq!(book.source, SOURCE);
        assert!(
            book.url
                .starts_with("https://books.toscrape.com/catalogue/a-light-in-the-attic")
        );
    }

    #[test]
    fn test_parse_listing_handles_encoding_artifact_in_price() {
        let html = format!(
            "<html><body>{}</body></html>",
            card(r#"title="Soumission""#, "Â£50.10", "One")
        );
        let books = parse_listing(&html, &page_url(1));
        assert_eq!(books[0].price, Some(50.10));
    }

    #[test]
    fn test_malformed_listing_is_skipped_not_fatal() {
        // Five cards, one missing its required title attribute.
        let html = format!(
            "<html><body>{}{}{}{}{}</body></html>",
            card(r#"title="Book One""#, "£10.00", "One"),
            card(r#"title="Book Two""#, "£20.00", "Two"),
            card("", "£30.00", "Three"),
            card(r#"title="Book Four""#, "£40.00", "Four"),
            card(r#"title="Book Five""#, "£50.00", "Five"),
        );
        let books = parse_listing(&html, &page_url(1));

        assert_eq!(books.len(), 4);
        assert!(books.iter().all(|b| b.title != "A Light in the ..."));
    }

    #[test]
    fn test_unparsable_price_skips_only_that_listing() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            card(r#"title="Good Book""#, "£12.50", "Two"),
            card(r#"title="Bad Price""#, "free?!", "Two"),
        );
        let books = parse_listing(&html, &page_url(1));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Good Book");
    }

    #[test]
    fn test_empty_page_yields_no_books() {
        let books = parse_listing("<html><body></body></html>", &page_url(1));
        assert!(books.is_empty());
    }
}
