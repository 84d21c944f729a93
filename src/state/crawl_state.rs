//! Crawl state definitions
//!
//! A crawl is `Running` until its frontier is exhausted or the visit limit is
//! reached, at which point it becomes `Done` and stays there.
use std::fmt;

/// Represents the current state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Pages remain to be fetched
    Running,

    /// The crawl has stopped for good
    Done,
}

/// Why a crawl transitioned to [`CrawlState::Done`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// No URLs left in the pending queue
    FrontierExhausted,

    /// The visited set reached the configured visit limit
    VisitLimitReached,
}

impl CrawlState {
    /// Returns true if no further steps will be taken
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
            Self::VisitLimitReached => write!(f, "visit limit reached"),
        }
    }
}
