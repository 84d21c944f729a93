//! Named extraction patterns for the supported result-page formats
//!
//! Patterns are compiled once per parser and never mutated afterwards.

use regex::Regex;

/// Line that opens a new CiteULike record
pub const RECORD_MARKER: &str = r#"<tr class="list {article_id:"#;

/// Line that carries the record title
pub const TITLE_MARKER: &str = r#"<a class="title""#;

/// Line that carries the DOI link together with journal, year, volume and issue
pub const DOI_MARKER: &str = "<a href='http://dx.doi.org";

/// Line that carries the author list
pub const AUTHOR_MARKER: &str = r#"<a class="author""#;

/// Line that carries the tag list
pub const TAG_MARKER: &str = r#"<span class="taglist">"#;

/// Heading whose following line is the abstract
pub const ABSTRACT_MARKER: &str = "<h3>Abstract</h3>";

/// Scholar result blocks containing this text are citation stubs, not articles
pub const CITATION_STUB: &str = "[CITATION]";

/// Anchor text of the citing-articles link
pub const CITED_BY: &str = "Cited by";

/// Anchor text of the related-articles link
pub const RELATED_ARTICLES: &str = "Related articles";

/// Delimiter between byline fields
pub const BYLINE_DELIMITER: &str = " - ";

/// Patterns for CiteULike's line-delimited result listing
#[derive(Debug, Clone)]
pub struct CiteULikePatterns {
    /// Any integer (the record id is the first one on the boundary line)
    pub integer: Regex,
    /// Title text between the bookmark span and the closing heading
    pub title: Regex,
    /// Italicised journal name
    pub journal: Regex,
    /// Four-digit year in parentheses, possibly preceded by day and month
    pub year: Regex,
    pub volume: Regex,
    pub issue: Regex,
    pub doi: Regex,
    /// Each author anchor's text
    pub author: Regex,
    /// Each tag anchor's text
    pub tag: Regex,
}

impl CiteULikePatterns {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            integer: Regex::new(r"\d+")?,
            title: Regex::new(r";</span>(.+)</a></h2>")?,
            journal: Regex::new(r"<i>([a-zA-Z\s\W\d]+?)</i>")?,
            year: Regex::new(r"\([0-9a-zA-Z\s]*?(\d{4})\)")?,
            volume: Regex::new(r"Vol\.\s(\d+)")?,
            issue: Regex::new(r"No\.\s(\d+)")?,
            doi: Regex::new(r">doi:(.+?)</a></div>")?,
            author: Regex::new(r">([a-zA-Z\s.-]+)</a>")?,
            tag: Regex::new(r">([a-zA-Z]+)</a>")?,
        })
    }
}

/// Patterns for Google Scholar result blocks
#[derive(Debug, Clone)]
pub struct ScholarPatterns {
    /// An integer preceded by whitespace (citation counts, byline years)
    pub spaced_integer: Regex,
    /// A four-digit number anywhere
    pub four_digits: Regex,
    /// Byline markup used by older result pages
    pub green_font: Regex,
}

impl ScholarPatterns {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            spaced_integer: Regex::new(r"\s+(\d+)\s*")?,
            four_digits: Regex::new(r"(\d{4})")?,
            green_font: Regex::new(r#"<font color="green">(.*)</font>"#)?,
        })
    }
}
