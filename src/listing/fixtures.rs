// src/listing/fixtures.rs
// =============================================================================
// Test-only builders for search result markup, shaped like the real pages.
// =============================================================================

// A schema block the way the site embeds it
pub fn listing_block(url: &str) -> String {
    format!(
        r#"<script type="application/ld+json" data-cmp="lstgSchema">
            {{"@context": "http://schema.org", "@type": "Car", "name": "Used Vehicle", "url": "{url}"}}
        </script>"#
    )
}

// A results page; `total` controls whether the summary line is present
pub fn search_page(total: Option<u64>, urls: &[String]) -> String {
    let summary = total
        .map(|total| {
            format!(
                r#"<div class="results-text-container text-size-400">
                    <span>1 - 100 of {} Results</span>
                </div>"#,
                with_thousands(total)
            )
        })
        .unwrap_or_default();

    let blocks: String = urls.iter().map(|url| listing_block(url)).collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Cars for Sale</title></head><body>
            {summary}
            <div data-qaid="cntnr-listings-tier-listings">{blocks}</div>
        </body></html>"#
    )
}

// What the site serves past the last real page: chrome, but no listings
pub fn exhausted_page() -> String {
    r#"<!DOCTYPE html><html><body>
        <div class="results-text-container">0 Results</div>
        <p>No results match your search.</p>
    </body></html>"#
        .to_string()
}

// `count` distinct listing URLs, unique per page
pub fn listing_urls(page: u32, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "https://www.autotrader.com/cars-for-sale/vehicledetails.xhtml?listingId={}",
                u64::from(page) * 1000 + i as u64
            )
        })
        .collect()
}

// 1234567 -> "1,234,567"
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
