//! State module for tracking crawl progress
//!
//! - `CrawlState`: whether the crawl loop is still running
//! - `StopReason`: which stopping criterion ended it

mod crawl_state;

pub use crawl_state::{CrawlState, StopReason};
