// src/listing/extract.rs
// =============================================================================
// This module pulls data out of a search results page.
//
// Two things are read from the markup:
// - The total result count, from the summary line ("1 - 100 of 1,234 Results")
// - The listing URLs, from the JSON schema blocks embedded in the listings
//   container: <script data-cmp="lstgSchema">{"url": "...", ...}</script>
//
// The site doesn't always report its last page accurately, so the absence of
// listings is the real end-of-results marker. extract_links() reports that as
// Ok(None) rather than an error.
//
// This all depends on the site's current markup. The selectors live in
// ExtractorConfig and the paginator only sees the ListingExtractor trait, so
// a markup change (or a JSON API) only touches this file.
// =============================================================================

use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::error::ScrapeError;

// The two questions the paginator asks of a page
pub trait ListingExtractor {
    // Total matching listings across all pages (read from the first page)
    fn extract_total_count(&self, markup: &str) -> Result<u64, ScrapeError>;

    // Listing URLs on this page, in page order
    //
    // Returns Ok(None) when the page has no listings left
    fn extract_links(&self, markup: &str) -> Result<Option<Vec<String>>, ScrapeError>;
}

// One listing's schema.org payload. Only `url` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRecord {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
}

// What to do with a schema block that doesn't decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the whole run
    #[default]
    Fail,
    /// Log a warning and drop the block
    Skip,
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub summary_selector: String,
    pub container_selector: String,
    pub listing_selector: String,
    pub malformed: MalformedPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            summary_selector: "div.results-text-container".to_string(),
            container_selector: r#"div[data-qaid="cntnr-listings-tier-listings"]"#.to_string(),
            listing_selector: r#"script[data-cmp="lstgSchema"]"#.to_string(),
            malformed: MalformedPolicy::Fail,
        }
    }
}

// Reads the embedded listing schema blocks with CSS selectors
pub struct SchemaExtractor {
    summary: Selector,
    container: Selector,
    listing: Selector,
    malformed: MalformedPolicy,
}

impl SchemaExtractor {
    // Parses the configured selectors once, up front
    pub fn new(config: &ExtractorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            summary: parse_selector(&config.summary_selector)?,
            container: parse_selector(&config.container_selector)?,
            listing: parse_selector(&config.listing_selector)?,
            malformed: config.malformed,
        })
    }
}

impl ListingExtractor for SchemaExtractor {
    fn extract_total_count(&self, markup: &str) -> Result<u64, ScrapeError> {
        let document = Html::parse_document(markup);

        let summary = document
            .select(&self.summary)
            .next()
            .ok_or(ScrapeError::MissingResultCount)?;

        let text: String = summary.text().collect();
        parse_result_count(&text)
    }

    fn extract_links(&self, markup: &str) -> Result<Option<Vec<String>>, ScrapeError> {
        let document = Html::parse_document(markup);

        let Some(container) = document.select(&self.container).next() else {
            debug!("No listings container on page");
            return Ok(None);
        };

        let blocks: Vec<String> = container
            .select(&self.listing)
            .map(|block| block.text().collect())
            .collect();

        if blocks.is_empty() {
            debug!("Listings container has no schema blocks");
            return Ok(None);
        }

        let mut urls = Vec::with_capacity(blocks.len());
        for (index, raw) in blocks.iter().enumerate() {
            match serde_json::from_str::<ListingRecord>(raw.trim()) {
                Ok(record) => {
                    trace!(url = %record.url, name = record.name.as_deref().unwrap_or(""), "Listing");
                    urls.push(record.url);
                }
                Err(source) => match self.malformed {
                    MalformedPolicy::Fail => {
                        return Err(ScrapeError::MalformedListing { index, source });
                    }
                    MalformedPolicy::Skip => {
                        warn!(index, error = %source, "Skipping malformed listing block");
                    }
                },
            }
        }

        Ok(Some(urls))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

// Reads the total from a summary line such as "1 - 100 of 1,234 Results"
//
// The count is the last word before "Results". Thousands separators (or any
// other non-digit characters) are dropped before parsing.
fn parse_result_count(text: &str) -> Result<u64, ScrapeError> {
    // ASCII lowercasing keeps byte offsets intact
    let head = match text.to_ascii_lowercase().find("results") {
        Some(pos) => &text[..pos],
        None => text,
    };

    let token = head.split_whitespace().last().unwrap_or("");
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();

    digits
        .parse::<u64>()
        .map_err(|_| ScrapeError::InvalidResultCount(text.trim().to_string()))
}
