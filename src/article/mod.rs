//! Article records shared by the parsers and the matcher
//!
//! An [`Article`] is produced once per parsed record and handed to the caller.
//! Records that come from Google Scholar additionally carry [`ScholarLinks`].

mod record;

pub use record::{Article, ScholarLinks, UNAVAILABLE, UNKNOWN_JOURNAL};
