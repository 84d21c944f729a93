//! Crawler module for web page fetching and link following
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with lenient failure handling
//! - HTML link extraction
//! - The visited/pending frontier
//! - The crawl loop itself

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, CrawlReport, Crawler, KeywordHit};
pub use fetcher::{build_http_client, fetch_or_empty, fetch_url, FetchResult};
pub use frontier::Frontier;
pub use parser::{extract_links, extract_links_from};
