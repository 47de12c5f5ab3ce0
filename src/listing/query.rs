// src/listing/query.rs
// =============================================================================
// The search parameters sent with every page request.
//
// The site pages through results with an offset (`firstRecord`) and a window
// size (`numRecords`). We always ask for 100 listings per page, so page N
// starts at record 100 * N.
// =============================================================================

use clap::ValueEnum;

/// Listings requested per page; the largest window the site accepts
pub const PAGE_SIZE: u32 = 100;

// Sort orders understood by the search endpoint
//
// ValueEnum lets clap parse these straight from --sort-by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortBy {
    #[default]
    Relevance,
    DistanceAsc,
    PriceAsc,
    PriceDesc,
    YearDesc,
    MileageAsc,
}

impl SortBy {
    // The value the site expects in the `sortBy` parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::DistanceAsc => "distanceASC",
            SortBy::PriceAsc => "derivedpriceASC",
            SortBy::PriceDesc => "derivedpriceDESC",
            SortBy::YearDesc => "yearDESC",
            SortBy::MileageAsc => "mileageASC",
        }
    }
}

// One page worth of search parameters
//
// The paginator owns a single SearchQuery and moves it forward with
// set_page(), so the offset can only ever be derived from the page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub make_code: String,
    pub zip_code: u32,
    pub search_radius: u32,
    pub sort_by: SortBy,
    page_size: u32,
    page_index: u32,
}

impl SearchQuery {
    // Creates a query positioned on the first page (offset 0)
    pub fn new(make_code: impl Into<String>, zip_code: u32, search_radius: u32) -> Self {
        Self {
            make_code: make_code.into(),
            zip_code,
            search_radius,
            sort_by: SortBy::default(),
            page_size: PAGE_SIZE,
            page_index: 0,
        }
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn set_page(&mut self, page_index: u32) {
        self.page_index = page_index;
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // Offset of the first listing on this page
    pub fn first_record(&self) -> u64 {
        u64::from(self.page_size) * u64::from(self.page_index)
    }

    // Query string parameters, in the order the site's own links use
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("makeCodeList", self.make_code.clone()),
            // ZIP codes are five digits; leading zeros matter (02134)
            ("zip", format!("{:05}", self.zip_code)),
            ("searchRadius", self.search_radius.to_string()),
            ("sortBy", self.sort_by.as_param().to_string()),
            ("numRecords", self.page_size.to_string()),
            ("firstRecord", self.first_record().to_string()),
        ]
    }
}

// Number of pages needed to cover `total_results` listings
//
// Examples:
//   total_pages(0, 100)   = 0
//   total_pages(250, 100) = 3
//   total_pages(300, 100) = 3
pub fn total_pages(total_results: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_results.div_ceil(page_size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_starts_at_zero() {
        let query = SearchQuery::new("BMW", 10001, 50);
        assert_eq!(query.page_index(), 0);
        assert_eq!(query.first_record(), 0);
        assert_eq!(query.page_size(), 100);
    }

    #[test]
    fn test_offset_follows_page_index() {
        let mut query = SearchQuery::new("BMW", 10001, 50);
        for page in 0..25 {
            query.set_page(page);
            assert_eq!(query.first_record(), 100 * u64::from(page));
        }
    }

    #[test]
    fn test_query_pairs_order_and_values() {
        let mut query = SearchQuery::new("TOYOTA", 30301, 100);
        query.set_page(3);

        let pairs = query.query_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["makeCodeList", "zip", "searchRadius", "sortBy", "numRecords", "firstRecord"]
        );
        assert_eq!(pairs[0].1, "TOYOTA");
        assert_eq!(pairs[3].1, "relevance");
        assert_eq!(pairs[4].1, "100");
        assert_eq!(pairs[5].1, "300");
    }

    #[test]
    fn test_zip_keeps_leading_zeros() {
        let query = SearchQuery::new("AUDI", 2134, 50);
        assert_eq!(query.query_pairs()[1].1, "02134");
    }

    #[test]
    fn test_sort_param() {
        let query = SearchQuery::new("FORD", 60601, 25).with_sort(SortBy::PriceAsc);
        assert_eq!(query.query_pairs()[3].1, "derivedpriceASC");
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 100), 0);
        assert_eq!(total_pages(1, 100), 1);
        assert_eq!(total_pages(100, 100), 1);
        assert_eq!(total_pages(101, 100), 2);
        assert_eq!(total_pages(250, 100), 3);
        assert_eq!(total_pages(150, 100), 2);
        // a zero window is treated as one listing per page
        assert_eq!(total_pages(7, 0), 7);
    }
}
