// src/error.rs
// =============================================================================
// Error types for fetching and extracting search result pages.
//
// Every variant here is fatal to a collection run: the paginator never retries
// and never returns partial results when one of these comes back. Running out
// of listings is NOT an error; the extractor reports that as `Ok(None)`.
//
// main.rs wraps these in anyhow for context, the rest of the crate returns
// ScrapeError directly so callers (and tests) can match on the kind of failure.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network-level failure: timeout, DNS, connection reset, body read error
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The results summary is missing, so the page count can't be inferred
    #[error("results summary not found on the first page")]
    MissingResultCount,

    #[error("could not read a result count from '{0}'")]
    InvalidResultCount(String),

    /// A listing schema block that isn't valid JSON or has no `url`
    #[error("listing block #{index} is malformed: {source}")]
    MalformedListing {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

impl ScrapeError {
    // True for the errors raised while talking to the server,
    // false for the ones raised while reading what it sent back
    pub fn is_transport(&self) -> bool {
        matches!(self, ScrapeError::Transport { .. } | ScrapeError::Status { .. })
    }
}
