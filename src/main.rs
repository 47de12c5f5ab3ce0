// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for the links)
// 3. Check the car code against the make list
// 4. Build the fetcher, extractor and delay policy from the options
// 5. Run the paginator and print the links
// 6. Exit with 0 on success, 1 on any error
// =============================================================================

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autotrader_links::listing::{
    ExtractorConfig, FetcherConfig, HttpFetcher, MalformedPolicy, SchemaExtractor, SearchQuery,
};
use autotrader_links::makes::{CarMake, MakeCatalog};
use autotrader_links::paginate::{LinkSet, Paginator, RandomDelay};
use autotrader_links::ScrapeError;
use cli::Cli;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if e.downcast_ref::<ScrapeError>().is_some_and(ScrapeError::is_transport) {
                eprintln!("Hint: the site may be throttling requests; try again later or pass --user-agent");
            }
            1
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise -v turns on progress logging
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "autotrader_links=info"
    } else {
        "autotrader_links=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let catalog = match &cli.makes_file {
        Some(path) => MakeCatalog::from_path(path)?,
        None => MakeCatalog::builtin()?,
    };

    if cli.list_makes {
        return print_makes(&catalog, cli.json);
    }

    // clap guarantees both are present unless --list-makes was given
    let (Some(car_code), Some(zip_code)) = (cli.car_code.as_deref(), cli.zip_code) else {
        bail!("a car code and a ZIP code are required");
    };

    let make = resolve_make(&catalog, car_code)?;
    check_delay_bounds(cli.min_delay, cli.max_delay)?;

    let fetcher = HttpFetcher::new(FetcherConfig {
        base_url: cli.base_url,
        user_agent: cli.user_agent,
        timeout: cli.timeout,
    })?;

    let extractor = SchemaExtractor::new(&ExtractorConfig {
        malformed: if cli.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Fail
        },
        ..ExtractorConfig::default()
    })?;

    let delay = RandomDelay::new(cli.min_delay, cli.max_delay);

    info!(
        make = %make.name,
        code = %make.code,
        zip = zip_code,
        radius = cli.search_radius,
        "Collecting listing links"
    );

    let query =
        SearchQuery::new(make.code.clone(), zip_code, cli.search_radius).with_sort(cli.sort_by);
    let mut paginator = Paginator::new(fetcher, extractor, delay);

    let (links, stats) = paginator
        .collect_links_with_stats(query, cli.limit)
        .await
        .with_context(|| format!("failed to collect {} listings near {:05}", make.name, zip_code))?;

    // Even the page past the estimate had listings, so there may be more
    if !stats.exhausted && !stats.hit_limit && stats.pages_fetched > stats.estimated_pages {
        warn!(
            pages = stats.pages_fetched,
            "Still finding listings on the last page requested; results may be incomplete"
        );
    }

    if links.is_empty() {
        warn!("No listings found");
    }

    print_links(&links, cli.json)
}

// Looks up a car code in the catalog, naming the valid codes on a miss
fn resolve_make<'a>(catalog: &'a MakeCatalog, car_code: &str) -> Result<&'a CarMake> {
    catalog.find_by_code(car_code).ok_or_else(|| {
        anyhow!(
            "unknown car code '{}' (valid codes: {})",
            car_code,
            catalog.codes().join(", ")
        )
    })
}

fn check_delay_bounds(min_delay: Duration, max_delay: Duration) -> Result<()> {
    if min_delay > max_delay {
        bail!(
            "--min-delay ({:?}) is longer than --max-delay ({:?})",
            min_delay,
            max_delay
        );
    }
    Ok(())
}

// Prints the links either one per line or as a JSON array
fn print_links(links: &LinkSet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(links.as_slice())?);
    } else {
        for link in links.iter() {
            println!("{}", link);
        }
    }
    Ok(())
}

// Prints the make list as "CODE<TAB>Name" lines, or as JSON
fn print_makes(catalog: &MakeCatalog, json: bool) -> Result<()> {
    if json {
        let makes: Vec<_> = catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&makes)?);
    } else {
        for make in catalog.iter() {
            println!("{}\t{}", make.code, make.name);
        }
    }
    Ok(())
}
