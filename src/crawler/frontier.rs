//! Crawl frontier: visited set, pending queue and bookmarked URLs
//!
//! The pending queue is strictly first-in first-out: new links go to the back,
//! the next URL comes from the front, which makes the crawl breadth-first.
//! Start URLs are placed in both the pending queue and the visited set, so
//! links back to a start URL are never re-enqueued.
//!
//! Membership is decided on the parsed form of a URL (`http://host` and
//! `http://host/` are the same page), while the visited history keeps each
//! URL as it was first seen.

use crate::state::StopReason;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Frontier state owned by a single crawler
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Visited URLs in the order they were first recorded
    visited: Vec<String>,

    /// Membership index over `visited`, keyed by `url_key`
    visited_index: HashSet<String>,

    /// Keys of the URLs that have actually been dequeued and fetched
    fetched: HashSet<String>,

    /// URLs waiting to be fetched
    pending: VecDeque<String>,

    /// Bookmarked URLs in the order they matched
    urls_of_interest: Vec<String>,

    /// Membership index over `urls_of_interest`
    interest_index: HashSet<String>,

    /// Maximum size of the visited set
    visit_limit: usize,
}

impl Frontier {
    /// Creates a frontier seeded with the start URLs
    ///
    /// Duplicated seeds are recorded once in the visited set; the pending
    /// queue keeps them as given and the duplicates are dropped on dequeue.
    pub fn new(seeds: &[String], visit_limit: usize) -> Self {
        let mut frontier = Self {
            visited: Vec::with_capacity(seeds.len()),
            visited_index: HashSet::with_capacity(seeds.len()),
            fetched: HashSet::new(),
            pending: seeds.iter().cloned().collect(),
            urls_of_interest: Vec::new(),
            interest_index: HashSet::new(),
            visit_limit,
        };

        for seed in seeds {
            frontier.record_visited(seed);
        }

        frontier
    }

    /// Returns the stopping criterion that currently applies, if any
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.pending.is_empty() {
            Some(StopReason::FrontierExhausted)
        } else if self.visited.len() >= self.visit_limit {
            Some(StopReason::VisitLimitReached)
        } else {
            None
        }
    }

    /// Takes the next URL that has not been fetched yet from the front of the queue
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.pending.pop_front() {
            if self.fetched.contains(&url_key(&url)) {
                tracing::trace!("Dropping already fetched {} from the queue", url);
                continue;
            }
            return Some(url);
        }
        None
    }

    /// Records a URL as fetched and visited (regardless of fetch success)
    pub fn mark_visited(&mut self, url: &str) {
        self.fetched.insert(url_key(url));
        self.record_visited(url);
    }

    /// Appends every link not yet in the visited set to the back of the queue
    ///
    /// Links already pending are not checked, so a URL may be queued several
    /// times before its first visit.
    ///
    /// Returns the number of links enqueued.
    pub fn enqueue_links<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.pending.len();
        for link in links {
            if !link.is_empty() && !self.is_visited(&link) {
                self.pending.push_back(link);
            }
        }
        self.pending.len() - before
    }

    /// Bookmarks a URL; returns true if it was not bookmarked before
    pub fn bookmark(&mut self, url: &str) -> bool {
        if self.interest_index.insert(url.to_string()) {
            self.urls_of_interest.push(url.to_string());
            true
        } else {
            false
        }
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn urls_of_interest(&self) -> &[String] {
        &self.urls_of_interest
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_index.contains(&url_key(url))
    }

    /// Consumes the frontier, returning the visited history and the bookmarks
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.visited, self.urls_of_interest)
    }

    fn record_visited(&mut self, url: &str) {
        if self.visited_index.insert(url_key(url)) {
            self.visited.push(url.to_string());
        }
    }
}

/// Comparison form of a URL; strings that do not parse compare verbatim
fn url_key(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_string(), |parsed| parsed.to_string())
}
