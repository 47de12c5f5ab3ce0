// src/paginate/controller.rs
// =============================================================================
// The pagination loop: walks the search results page by page and collects
// every listing URL.
//
// How it works:
// 1. Fetch page 0, read the total result count, work out the page count
// 2. Collect page 0's links (no links at all means an empty result)
// 3. For pages 1..=page_count: wait, fetch, collect, and stop as soon as a
//    page has no listings
// 4. Return the de-duplicated links
//
// Page indices start at 0, so iterating up to and including page_count probes
// one page past the estimate. That extra request is intentional: the site's
// count is not reliable, and the empty page is what actually ends the run.
//
// Everything runs sequentially. Each request waits for the previous one plus
// a politeness delay; there is no concurrency here on purpose.
// =============================================================================

use tracing::{debug, info};

use super::delay::DelayPolicy;
use super::links::LinkSet;
use crate::error::ScrapeError;
use crate::listing::{total_pages, ListingExtractor, PageFetcher, SearchQuery};

// What happened during a run, for logging and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Result count reported on the first page
    pub total_results: u64,
    /// Pages implied by the reported count
    pub estimated_pages: u32,
    /// Requests actually made, the first page included
    pub pages_fetched: u32,
    /// Repeated URLs dropped along the way
    pub duplicates: usize,
    /// True when a page without listings ended the run
    pub exhausted: bool,
    /// True when the run stopped because of the limit
    pub hit_limit: bool,
}

pub struct Paginator<F, E, D> {
    fetcher: F,
    extractor: E,
    delay: D,
}

impl<F, E, D> Paginator<F, E, D>
where
    F: PageFetcher,
    E: ListingExtractor,
    D: DelayPolicy,
{
    pub fn new(fetcher: F, extractor: E, delay: D) -> Self {
        Self {
            fetcher,
            extractor,
            delay,
        }
    }

    // Collects the unique listing URLs for a search
    //
    // Parameters:
    //   query: the search; its page index is reset to 0 before starting
    //   limit: stop requesting pages once this many unique URLs are collected,
    //          and return at most this many
    //
    // Any fetch or parse failure aborts the run; partial results are dropped.
    pub async fn collect_links(
        &mut self,
        query: SearchQuery,
        limit: Option<usize>,
    ) -> Result<LinkSet, ScrapeError> {
        let (links, _) = self.collect_links_with_stats(query, limit).await?;
        Ok(links)
    }

    pub async fn collect_links_with_stats(
        &mut self,
        mut query: SearchQuery,
        limit: Option<usize>,
    ) -> Result<(LinkSet, CollectStats), ScrapeError> {
        let mut stats = CollectStats::default();
        let mut links = LinkSet::new();

        // A limit of zero is already met; don't touch the network at all
        if limit_reached(&links, limit) {
            stats.hit_limit = true;
            return Ok(finish(links, stats, limit));
        }

        query.set_page(0);
        let markup = self.fetcher.fetch(&query).await?;
        stats.pages_fetched = 1;

        stats.total_results = self.extractor.extract_total_count(&markup)?;
        stats.estimated_pages = total_pages(stats.total_results, query.page_size());
        info!(
            make = %query.make_code,
            zip = query.zip_code,
            total = stats.total_results,
            pages = stats.estimated_pages,
            "Search results"
        );

        match self.extractor.extract_links(&markup)? {
            Some(urls) => {
                let added = links.extend(urls);
                info!(page = 0, added, collected = links.len(), "Collected page");
            }
            None => {
                info!("No listings on the first page");
                stats.exhausted = true;
                return Ok(finish(links, stats, limit));
            }
        }

        for page in 1..=stats.estimated_pages {
            if limit_reached(&links, limit) {
                stats.hit_limit = true;
                break;
            }

            let delay = self.delay.next_delay();
            if !delay.is_zero() {
                debug!(?delay, "Waiting before next page");
                tokio::time::sleep(delay).await;
            }

            query.set_page(page);
            let markup = self.fetcher.fetch(&query).await?;
            stats.pages_fetched += 1;

            match self.extractor.extract_links(&markup)? {
                Some(urls) => {
                    let added = links.extend(urls);
                    info!(page, added, collected = links.len(), "Collected page");
                }
                None => {
                    info!(page, "No more listings");
                    stats.exhausted = true;
                    break;
                }
            }
        }

        if limit_reached(&links, limit) {
            stats.hit_limit = true;
        }

        Ok(finish(links, stats, limit))
    }
}

fn limit_reached(links: &LinkSet, limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| links.len() >= limit)
}

fn finish(
    mut links: LinkSet,
    mut stats: CollectStats,
    limit: Option<usize>,
) -> (LinkSet, CollectStats) {
    if let Some(limit) = limit {
        links.truncate(limit);
    }
    stats.duplicates = links.duplicates();
    info!(
        links = links.len(),
        pages = stats.pages_fetched,
        duplicates = stats.duplicates,
        "Finished collecting"
    );
    (links, stats)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why three type parameters on Paginator?
//    - F fetches pages, E reads them, D decides how long to wait
//    - Each one is a trait, so tests swap in a scripted fetcher and NoDelay
//    - Generics are resolved at compile time, so there's no runtime cost
//
// 2. What does `?` do inside the loop?
//    - Any fetch or extraction error returns from collect_links immediately
//    - The partially filled LinkSet is dropped along with it
//
// 3. Why `1..=stats.estimated_pages`?
//    - `..=` is an inclusive range, so the last value is included
//    - Pages start at 0, so this asks for one page more than the estimate
//
// 4. Why is the markup a String and not a parsed document?
//    - scraper's Html is not Send, and we hold the page across `.await`
//    - Parsing happens inside the extractor, which never awaits
// -----------------------------------------------------------------------------
