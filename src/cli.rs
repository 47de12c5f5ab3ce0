// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   autotrader-links BMW 10001
//   autotrader-links TOYOTA 94103 --search-radius 50 --limit 300 --json
//   autotrader-links --list-makes
//
// Every option ends up in an explicit config value (FetcherConfig,
// ExtractorConfig, RandomDelay) built in main.rs; nothing is global.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use autotrader_links::listing::{SortBy, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "autotrader-links",
    version,
    about = "Collect vehicle listing links from Autotrader search results",
    long_about = "autotrader-links pages through Autotrader's search results for one car make \
                  around a ZIP code and prints every listing URL it finds, one per line. \
                  Pages are requested one at a time with a random pause in between."
)]
pub struct Cli {
    /// Car make code, e.g. BMW or TOYOTA (see --list-makes)
    #[arg(required_unless_present = "list_makes")]
    pub car_code: Option<String>,

    /// ZIP code to search around
    #[arg(
        required_unless_present = "list_makes",
        value_parser = clap::value_parser!(u32).range(0..=99999)
    )]
    pub zip_code: Option<u32>,

    /// Search radius in miles around the ZIP code
    #[arg(long, default_value_t = 100)]
    pub search_radius: u32,

    /// Stop once this many unique listing links have been collected
    #[arg(long)]
    pub limit: Option<usize>,

    /// Result ordering requested from the site
    #[arg(long, value_enum, default_value_t = SortBy::Relevance)]
    pub sort_by: SortBy,

    /// Shortest pause between page requests, in seconds
    #[arg(long, default_value = "2", value_parser = parse_seconds)]
    pub min_delay: Duration,

    /// Longest pause between page requests, in seconds
    #[arg(long, default_value = "5", value_parser = parse_seconds)]
    pub max_delay: Duration,

    /// Per-request timeout, in seconds
    #[arg(long, default_value = "30", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[arg(long, env = "AUTOTRADER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Search endpoint to query
    #[arg(long, env = "AUTOTRADER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// JSON file of {"name", "code"} entries to use instead of the built-in make list
    #[arg(long)]
    pub makes_file: Option<PathBuf>,

    /// Drop listing blocks that fail to parse instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,

    /// Print a JSON array instead of one link per line
    #[arg(long)]
    pub json: bool,

    /// Print the known make codes and exit
    #[arg(long)]
    pub list_makes: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

// Accepts whole or fractional seconds: "2", "0.5"
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("'{value}' must be zero or more seconds"));
    }
    // from_secs_f64 panics on values too large for a Duration
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("'{value}': {e}"))
}

// Like parse_seconds, but a zero timeout would fail every request at once
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let timeout = parse_seconds(value)?;
    if timeout.is_zero() {
        return Err(format!("'{value}' must be more than zero seconds"));
    }
    Ok(timeout)
}
