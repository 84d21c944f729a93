//! Sci-Worm main entry point
//!
//! This is the command-line interface for the Sci-Worm crawler and article scraper.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use sci_worm::config::{load_config_with_hash, Config};
use sci_worm::crawler::run_crawl;
use sci_worm::matcher::{find_citing_articles, match_in_catalogue};
use sci_worm::scrape::{CiteULikeQuery, CiteULikeSearch, ScholarSearch};
use sci_worm::Article;
use tracing_subscriber::EnvFilter;

/// Sci-Worm: a crawler and scraper for scientific article listings
///
/// By default Sci-Worm crawls breadth-first from the configured seeds and
/// reports the pages that mention any configured keyword. The search modes
/// scrape CiteULike or Google Scholar result listings instead.
#[derive(Parser, Debug)]
#[command(name = "sci-worm")]
#[command(version = "1.0.0")]
#[command(about = "A crawler and scraper for scientific article listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be done without fetching anything
    #[arg(long, conflicts_with_all = ["citeulike", "scholar", "citing"])]
    dry_run: bool,

    /// Search CiteULike instead of crawling
    #[arg(long, conflicts_with_all = ["scholar", "citing"])]
    citeulike: bool,

    /// Search Google Scholar for all of the given terms
    #[arg(long, value_name = "TERM", num_args = 1.., conflicts_with = "citing")]
    scholar: Option<Vec<String>>,

    /// Resolve the configured reference article on Scholar and list the articles citing it
    #[arg(long)]
    citing: bool,

    /// Look each citing article up in the CiteULike catalogue
    #[arg(long, requires = "citing")]
    catalogue: bool,

    /// CiteULike author filter (repeatable)
    #[arg(long = "author", value_name = "NAME", requires = "citeulike")]
    authors: Vec<String>,

    /// CiteULike tag filter (repeatable)
    #[arg(long = "tag", value_name = "TAG", requires = "citeulike")]
    tags: Vec<String>,

    /// CiteULike title filter
    #[arg(long, requires = "citeulike")]
    title: Option<String>,

    /// First publication year of the CiteULike search
    #[arg(long, requires = "citeulike")]
    year_start: Option<i32>,

    /// Last publication year of the CiteULike search
    #[arg(long, requires = "citeulike")]
    year_end: Option<i32>,

    /// CiteULike ISBN filter
    #[arg(long, requires = "citeulike")]
    isbn: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.citeulike {
        handle_citeulike(&config, &cli).await?;
    } else if let Some(terms) = &cli.scholar {
        handle_scholar(&config, terms).await?;
    } else if cli.citing {
        handle_citing(&config, cli.catalogue).await?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sci_worm=info,warn"),
            1 => EnvFilter::new("sci_worm=debug,info"),
            2 => EnvFilter::new("sci_worm=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sci-Worm Dry Run ===\n");

    println!("Crawler:");
    println!("  Visit limit: {}", config.crawler.visit_limit);
    println!("  Fetch timeout: {}s", config.crawler.timeout_secs);
    println!("  Keywords: {:?}", config.crawler.keywords);
    println!("  Seeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("    * {}", seed);
    }

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    for (name, value) in &config.http.headers {
        println!("  {}: {}", name, value);
    }

    println!("\nCiteULike:");
    println!("  Base URL: {}", config.citeulike.base_url);
    println!("  Page limit: {}", config.citeulike.page_limit);

    println!("\nScholar:");
    println!("  Base URL: {}", config.scholar.base_url);
    println!("  Results limit: {}", config.scholar.results_limit);
    println!("  Citing page stride: {}", config.scholar.page_stride);

    match &config.reference {
        Some(reference) => println!("\nReference: {}", reference.to_article()),
        None => println!("\nReference: none"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the default mode: breadth-first crawl from the configured seeds
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl from {} seeds (visit limit {})",
        config.crawler.seeds.len(),
        config.crawler.visit_limit
    );

    let report = run_crawl(config).await?;
    tracing::info!(
        "Crawl finished: {} ({} pages fetched)",
        report.stop_reason,
        report.pages_fetched
    );

    println!("Visited {} sites", report.visited.len());
    println!("URLs of interest ({}):", report.urls_of_interest.len());
    for url in &report.urls_of_interest {
        println!("  {}", url);
    }

    Ok(())
}

/// Handles the --citeulike mode
async fn handle_citeulike(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let defaults = CiteULikeQuery::default();
    let mut query = CiteULikeQuery::default()
        .with_authors(cli.authors.clone())
        .with_tags(cli.tags.clone())
        .with_years(
            cli.year_start.unwrap_or(defaults.year_start),
            cli.year_end.unwrap_or(defaults.year_end),
        );
    if let Some(title) = &cli.title {
        query = query.with_title(title.clone());
    }
    if let Some(isbn) = &cli.isbn {
        query = query.with_isbn(isbn.clone());
    }

    let search = CiteULikeSearch::new(&config.citeulike, &config.http)?;
    let articles = search.search(&query).await;
    print_articles(&articles);

    Ok(())
}

/// Handles the --scholar mode
async fn handle_scholar(config: &Config, terms: &[String]) -> anyhow::Result<()> {
    let engine = ScholarSearch::new(&config.scholar, &config.http)?;
    let articles = engine.search(terms).await?;
    print_articles(&articles);

    Ok(())
}

/// Handles the --citing mode, optionally pairing each citing article with
/// its CiteULike record
async fn handle_citing(config: &Config, catalogue: bool) -> anyhow::Result<()> {
    let Some(reference) = &config.reference else {
        bail!("--citing needs a [reference] section in the configuration");
    };

    let engine = ScholarSearch::new(&config.scholar, &config.http)?;
    let result = find_citing_articles(&engine, &reference.to_article()).await?;

    match &result.matched {
        Some(matched) => println!("Matched: {}", matched),
        None => {
            println!("No match found for: {}", reference.title);
            return Ok(());
        }
    }

    println!("Cited by {} articles:", result.citing.len());
    if !catalogue {
        print_articles(&result.citing);
        return Ok(());
    }

    let search = CiteULikeSearch::new(&config.citeulike, &config.http)?;
    let matches = match_in_catalogue(&search, result.citing).await;
    let found = matches.iter().filter(|m| m.record.is_some()).count();
    println!("Found {} of {} in CiteULike", found, matches.len());
    for pair in &matches {
        println!("  {}", pair.listed);
        match &pair.record {
            Some(record) => println!("    CiteULike {}: {}", record.external_id, record),
            None => println!("    not in CiteULike"),
        }
    }

    Ok(())
}

fn print_articles(articles: &[Article]) {
    println!("Found {} articles", articles.len());
    for article in articles {
        println!("  {}", article);
    }
}
