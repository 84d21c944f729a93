//! Result-page scraping for bibliographic search services
//!
//! - `citeulike`: line-oriented parser for CiteULike listings and its paginated search
//! - `scholar`: DOM parser for Google Scholar listings and its search engine
//! - `query`: URL construction for both services
//! - `patterns`: the named markers and regular expressions both parsers use

mod citeulike;
mod patterns;
mod query;
mod scholar;

pub use citeulike::{CiteULikeParser, CiteULikeSearch};
pub use patterns::{CiteULikePatterns, ScholarPatterns};
pub use query::{citing_page_url, scholar_search_url, CiteULikeQuery};
pub use scholar::{Byline, ScholarParser, ScholarSearch};
