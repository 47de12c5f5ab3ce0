// src/listing/mod.rs
// =============================================================================
// Everything about a single page of search results.
//
// Submodules:
// - query: the search parameters and page arithmetic
// - fetch: downloads a page over HTTP
// - extract: reads the result count and listing URLs out of a page
// =============================================================================

mod extract;
mod fetch;
mod query;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extract::{
    ExtractorConfig, ListingExtractor, ListingRecord, MalformedPolicy, SchemaExtractor,
};
pub use fetch::{FetcherConfig, HttpFetcher, PageFetcher, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use query::{total_pages, SearchQuery, SortBy, PAGE_SIZE};
