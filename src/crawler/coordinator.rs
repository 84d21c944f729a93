//! Crawler coordinator - main crawl loop
//!
//! This module drives the fetch → extract links → enqueue cycle over a
//! [`Frontier`]. Each step:
//!
//! 1. Stops if the queue is empty or the visited set reached the visit limit
//! 2. Takes the URL at the front of the queue
//! 3. Fetches it (failures become empty content)
//! 4. Records it as visited
//! 5. Bookmarks it for every configured keyword found in the content
//! 6. Enqueues every extracted link not yet visited
//! 7. Reports progress
//!
//! Exactly one fetch is in flight at a time.

use crate::config::{Config, CrawlerConfig, HttpConfig};
use crate::crawler::fetcher::{build_http_client, fetch_or_empty};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links_from;
use crate::state::{CrawlState, StopReason};
use crate::{ConfigError, WormError};
use reqwest::Client;
use std::time::Duration;

/// A keyword found on a visited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    pub keyword: String,
    pub url: String,
}

/// Outcome of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Visited URLs in visitation order (start URLs first)
    pub visited: Vec<String>,

    /// Bookmarked URLs, each recorded once
    pub urls_of_interest: Vec<String>,

    /// Every keyword notification, in the order it was emitted
    pub keyword_hits: Vec<KeywordHit>,

    /// Number of fetches performed
    pub pages_fetched: usize,

    /// The criterion that ended the crawl
    pub stop_reason: StopReason,
}

/// Breadth-first link-following crawler
pub struct Crawler {
    frontier: Frontier,
    client: Client,
    keywords: Vec<String>,
    state: CrawlState,
    stop_reason: Option<StopReason>,
    keyword_hits: Vec<KeywordHit>,
    pages_fetched: usize,
}

impl Crawler {
    /// Creates a crawler from configuration, building its own HTTP client
    ///
    /// The client uses the crawler's per-page timeout rather than the search timeout.
    pub fn new(crawler: &CrawlerConfig, http: &HttpConfig) -> Result<Self, WormError> {
        let client = build_http_client(http, Duration::from_secs(crawler.timeout_secs))?;
        Ok(Self::with_client(
            client,
            &crawler.seeds,
            crawler.keywords.clone(),
            crawler.visit_limit,
        ))
    }

    /// Creates a crawler around an existing HTTP client
    pub fn with_client(
        client: Client,
        seeds: &[String],
        keywords: Vec<String>,
        visit_limit: usize,
    ) -> Self {
        Self {
            frontier: Frontier::new(seeds, visit_limit),
            client,
            keywords,
            state: CrawlState::Running,
            stop_reason: None,
            keyword_hits: Vec::new(),
            pages_fetched: 0,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn keyword_hits(&self) -> &[KeywordHit] {
        &self.keyword_hits
    }

    /// Performs one transition of the crawl state machine
    ///
    /// Once `Done`, further calls are no-ops.
    pub async fn step(&mut self) -> CrawlState {
        if self.state.is_terminal() {
            return self.state;
        }

        if let Some(reason) = self.frontier.stop_reason() {
            return self.finish(reason);
        }

        let url = match self.frontier.next_url() {
            Some(url) => url,
            // Only already-fetched duplicates were left in the queue
            None => return self.finish(StopReason::FrontierExhausted),
        };

        tracing::debug!("Processing URL: {}", url);
        let content = fetch_or_empty(&self.client, &url).await;
        self.pages_fetched += 1;

        self.frontier.mark_visited(&url);

        self.record_keyword_hits(&url, &content);

        let links = extract_links_from(&content, &url);
        let enqueued = self.frontier.enqueue_links(links);
        tracing::trace!("Enqueued {} links from {}", enqueued, url);

        tracing::info!(
            "Searched {} sites, have {} on the stack",
            self.frontier.visited_count(),
            self.frontier.pending_count()
        );

        self.state
    }

    /// Runs the crawl until it is done and returns its report
    pub async fn run(mut self) -> CrawlReport {
        tracing::info!(
            "Starting crawl with {} start URLs",
            self.frontier.pending_count()
        );
        let start_time = std::time::Instant::now();

        while !self.step().await.is_terminal() {}

        let stop_reason = self.stop_reason.unwrap_or(StopReason::FrontierExhausted);
        tracing::info!(
            "Crawl completed ({}): {} pages fetched, {} of interest, in {:?}",
            stop_reason,
            self.pages_fetched,
            self.frontier.urls_of_interest().len(),
            start_time.elapsed()
        );

        let (visited, urls_of_interest) = self.frontier.into_parts();
        CrawlReport {
            visited,
            urls_of_interest,
            keyword_hits: self.keyword_hits,
            pages_fetched: self.pages_fetched,
            stop_reason,
        }
    }

    fn record_keyword_hits(&mut self, url: &str, content: &str) {
        for keyword in &self.keywords {
            if content.contains(keyword.as_str()) {
                self.frontier.bookmark(url);
                tracing::info!("{} {}", keyword, url);
                self.keyword_hits.push(KeywordHit {
                    keyword: keyword.clone(),
                    url: url.to_string(),
                });
            }
        }
    }

    fn finish(&mut self, reason: StopReason) -> CrawlState {
        tracing::debug!("Crawl stopping: {}", reason);
        self.state = CrawlState::Done;
        self.stop_reason = Some(reason);
        self.state
    }
}

/// Runs a complete crawl described by the configuration
///
/// # Errors
///
/// `WormError::Config` when no seed URL is configured.
///
/// # Example
///
/// ```no_run
/// use sci_worm::config::load_config;
/// use sci_worm::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = run_crawl(&config).await?;
/// for url in &report.urls_of_interest {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, WormError> {
    if config.crawler.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "crawling needs at least one [crawler] seed URL".to_string(),
        )
        .into());
    }

    let crawler = Crawler::new(&config.crawler, &config.http)?;
    Ok(crawler.run().await)
}
