// src/listing/fetch.rs
// =============================================================================
// This module downloads one page of search results.
//
// How it works:
// 1. Append the query's parameters (URL-encoded) to the base search endpoint
// 2. Send a GET with a browser-like User-Agent header
// 3. Hand back the raw HTML, or fail
//
// There is no retry here. A timeout, a connection error or a non-2xx status
// is returned as an error and the whole collection run stops.
//
// The fetcher sits behind the PageFetcher trait so the paginator can be
// driven by something other than the network (see the paginator tests).
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::query::SearchQuery;
use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://www.autotrader.com/cars-for-sale/searchresults.xhtml";

// A common desktop Chrome identity; requests without one are blocked quickly
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_5) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.116 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Anything that can turn a SearchQuery into page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<String, ScrapeError>;
}

// Everything the HTTP fetcher needs, passed in explicitly at construction
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Search endpoint, without query parameters
    pub base_url: String,
    /// Sent as the User-Agent header on every request
    pub user_agent: String,
    /// Upper bound for a single request, connect through body
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Fetches search pages over HTTP with reqwest
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    // Validates the base URL and builds the HTTP client
    //
    // The client is created once and reused for every page (connection pooling)
    pub fn new(config: FetcherConfig) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| ScrapeError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client, base_url })
    }

    // Full request URL for a query
    //
    // Example:
    //   https://www.autotrader.com/cars-for-sale/searchresults.xhtml?makeCodeList=BMW
    //     &zip=10001&searchRadius=100&sortBy=relevance&numRecords=100&firstRecord=200
    pub fn page_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        url
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, query: &SearchQuery) -> Result<String, ScrapeError> {
        let url = self.page_url(query);
        debug!(page = query.page_index(), %url, "Downloading");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScrapeError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - Traits can't easily return futures from their methods
//    - The macro rewrites `async fn` into a method returning a boxed future
//
// 2. Why map_err everywhere?
//    - reqwest::Error doesn't say which page failed
//    - Wrapping it in ScrapeError::Transport keeps the URL next to the cause
//
// 3. Why .get(url.clone())?
//    - get() takes the URL by value, and we still need it for error messages
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    const SEARCH_PATH: &str = "/cars-for-sale/searchresults.xhtml";

    fn fetcher_for(server: &MockServer) -> HttpFetcher {
        HttpFetcher::new(FetcherConfig {
            base_url: format!("{}{}", server.uri(), SEARCH_PATH),
            ..FetcherConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_page_url_encodes_parameters() {
        let fetcher = HttpFetcher::new(FetcherConfig::default()).unwrap();
        let mut query = SearchQuery::new("LAND ROVER", 10001, 75);
        query.set_page(2);

        let url = fetcher.page_url(&query);
        assert_eq!(url.path(), SEARCH_PATH);
        assert_eq!(
            url.query(),
            Some(
                "makeCodeList=LAND+ROVER&zip=10001&searchRadius=75\
                 &sortBy=relevance&numRecords=100&firstRecord=200"
            )
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpFetcher::new(FetcherConfig {
            base_url: "not a url".to_string(),
            ..FetcherConfig::default()
        });
        assert!(matches!(result, Err(ScrapeError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("makeCodeList", "BMW"))
            .and(query_param("zip", "94103"))
            .and(query_param("searchRadius", "100"))
            .and(query_param("sortBy", "relevance"))
            .and(query_param("numRecords", "100"))
            .and(query_param("firstRecord", "100"))
            .and(|req: &Request| {
                req.headers
                    .get("user-agent")
                    .is_some_and(|value| value == DEFAULT_USER_AGENT)
            })
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>page 1</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server);
        let mut query = SearchQuery::new("BMW", 94103, 100);
        query.set_page(1);

        let body = fetcher.fetch(&query).await.unwrap();
        assert_eq!(body, "<html>page 1</html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server);
        let err = fetcher
            .fetch(&SearchQuery::new("BMW", 94103, 100))
            .await
            .unwrap_err();

        match err {
            ScrapeError::Status { status, .. } => assert_eq!(status.as_u16(), 403),
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(FetcherConfig {
            base_url: format!("{}{}", server.uri(), SEARCH_PATH),
            timeout: Duration::from_millis(100),
            ..FetcherConfig::default()
        })
        .unwrap();

        let err = fetcher
            .fetch(&SearchQuery::new("BMW", 94103, 100))
            .await
            .unwrap_err();

        match err {
            ScrapeError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("expected a transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 1
        let fetcher = HttpFetcher::new(FetcherConfig {
            base_url: format!("http://127.0.0.1:1{}", SEARCH_PATH),
            ..FetcherConfig::default()
        })
        .unwrap();

        let err = fetcher
            .fetch(&SearchQuery::new("BMW", 94103, 100))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_paginator_over_http() {
        use crate::listing::fixtures::{exhausted_page, listing_urls, search_page};
        use crate::listing::{ExtractorConfig, SchemaExtractor};
        use crate::paginate::{NoDelay, Paginator};

        // 250 results reported, but the site runs dry after two pages
        let server = MockServer::start().await;
        let pages = [
            ("0", search_page(Some(250), &listing_urls(0, 100))),
            ("100", search_page(Some(250), &listing_urls(1, 100))),
            ("200", exhausted_page()),
        ];
        for (first_record, body) in pages {
            Mock::given(method("GET"))
                .and(path(SEARCH_PATH))
                .and(query_param("makeCodeList", "BMW"))
                .and(query_param("firstRecord", first_record))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let extractor = SchemaExtractor::new(&ExtractorConfig::default()).unwrap();
        let mut paginator = Paginator::new(fetcher_for(&server), extractor, NoDelay);

        let (links, stats) = paginator
            .collect_links_with_stats(SearchQuery::new("BMW", 10001, 100), None)
            .await
            .unwrap();

        let mut expected = listing_urls(0, 100);
        expected.extend(listing_urls(1, 100));
        assert_eq!(links.into_vec(), expected);
        assert!(stats.exhausted);
        assert_eq!(stats.pages_fetched, 3);

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 3);
    }
}
