//! CiteULike result-listing parser and search
//!
//! The listing is parsed line by line. A record accumulator collects fields
//! until the next record marker, at which point the finished record is
//! flushed and a fresh accumulator is started. The first marker only starts
//! a record; the last record is flushed after the final line.
//!
//! Missing optional fields never abort a page: each falls back to its
//! sentinel and a warning naming the field and the offending line is logged.

use crate::article::{Article, UNKNOWN_JOURNAL};
use crate::config::{CiteULikeConfig, HttpConfig};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::scrape::patterns::{
    CiteULikePatterns, ABSTRACT_MARKER, AUTHOR_MARKER, DOI_MARKER, RECORD_MARKER, TAG_MARKER,
    TITLE_MARKER,
};
use crate::scrape::query::CiteULikeQuery;
use crate::WormError;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

/// Fields of the record currently being read
#[derive(Debug, Clone)]
struct RecordAccumulator {
    id: i64,
    title: String,
    authors: Vec<String>,
    year: i32,
    journal: String,
    doi: String,
    volume: i32,
    issue: i32,
    tags: Vec<String>,
    abstract_text: String,
}

impl RecordAccumulator {
    fn starting(id: i64) -> Self {
        Self {
            id,
            title: String::new(),
            authors: Vec::new(),
            year: 0,
            journal: UNKNOWN_JOURNAL.to_string(),
            doi: String::new(),
            volume: Article::UNKNOWN_NUMBER,
            issue: Article::UNKNOWN_NUMBER,
            tags: Vec::new(),
            abstract_text: String::new(),
        }
    }

    fn into_article(self) -> Article {
        Article::new(self.title, self.authors, self.year, self.journal)
            .with_doi(self.doi)
            .with_volume(self.volume)
            .with_issue(self.issue)
            .with_keywords(self.tags)
            .with_abstract(self.abstract_text)
            .with_external_id(self.id)
    }
}

/// Parser for CiteULike search-result pages
#[derive(Debug, Clone)]
pub struct CiteULikeParser {
    patterns: CiteULikePatterns,
}

impl CiteULikeParser {
    pub fn new() -> Result<Self, WormError> {
        Ok(Self {
            patterns: CiteULikePatterns::compile()?,
        })
    }

    /// Parses one result page into articles, one per record marker
    pub fn parse_page(&self, page: &str) -> Vec<Article> {
        let lines: Vec<&str> = page.lines().collect();
        let mut articles = Vec::new();
        let mut current: Option<RecordAccumulator> = None;

        for (i, line) in lines.iter().enumerate() {
            if line.starts_with(RECORD_MARKER) {
                let id = self.record_id(line);
                if let Some(finished) = current.replace(RecordAccumulator::starting(id)) {
                    articles.push(finished.into_article());
                }
            }

            // Fields seen before the first record marker belong to no record
            let Some(record) = current.as_mut() else {
                continue;
            };

            if line.contains(TITLE_MARKER) {
                match first_capture(&self.patterns.title, line) {
                    Some(title) => record.title = title.trim().to_string(),
                    None => warn_missing("title", line),
                }
            }

            if line.contains(DOI_MARKER) {
                self.read_publication_line(record, line);
            }

            if line.contains(AUTHOR_MARKER) {
                record.authors = all_captures(&self.patterns.author, line);
            }

            if line.contains(TAG_MARKER) {
                record.tags = all_captures(&self.patterns.tag, line);
            }

            if line.contains(ABSTRACT_MARKER) {
                match lines.get(i + 1) {
                    Some(next) => record.abstract_text = strip_paragraph(next),
                    None => warn_missing("abstract", line),
                }
            }
        }

        if let Some(last) = current {
            articles.push(last.into_article());
        }

        tracing::debug!("Parsed {} articles from result page", articles.len());
        articles
    }

    /// Reads journal, year, volume, issue and DOI from the DOI-link line
    fn read_publication_line(&self, record: &mut RecordAccumulator, line: &str) {
        record.journal = match first_capture(&self.patterns.journal, line) {
            Some(journal) => journal.to_string(),
            None => {
                warn_missing("journal title", line);
                UNKNOWN_JOURNAL.to_string()
            }
        };

        record.year = parse_number(&self.patterns.year, line, "year").unwrap_or(0);
        record.volume = parse_number(&self.patterns.volume, line, "volume")
            .unwrap_or(Article::UNKNOWN_NUMBER);
        record.issue = parse_number(&self.patterns.issue, line, "number")
            .unwrap_or(Article::UNKNOWN_NUMBER);

        record.doi = match first_capture(&self.patterns.doi, line) {
            Some(doi) => doi.trim().to_string(),
            None => {
                warn_missing("DOI", line);
                String::new()
            }
        };
    }

    fn record_id(&self, line: &str) -> i64 {
        match self
            .patterns
            .integer
            .find(line)
            .and_then(|m| m.as_str().parse().ok())
        {
            Some(id) => id,
            None => {
                warn_missing("article id", line);
                Article::NO_EXTERNAL_ID
            }
        }
    }
}

/// Searches the CiteULike catalogue page by page
pub struct CiteULikeSearch {
    client: Client,
    base_url: String,
    page_limit: u32,
    parser: CiteULikeParser,
}

impl CiteULikeSearch {
    pub fn new(config: &CiteULikeConfig, http: &HttpConfig) -> Result<Self, WormError> {
        let client = build_http_client(http, Duration::from_secs(http.timeout_secs))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            page_limit: config.page_limit,
            parser: CiteULikeParser::new()?,
        })
    }

    /// Fetches and parses up to `page_limit` result pages, concatenating the articles
    ///
    /// A page that cannot be fetched contributes no articles; the remaining
    /// pages are still requested.
    pub async fn search(&self, query: &CiteULikeQuery) -> Vec<Article> {
        let mut articles = Vec::new();

        for page in 1..=self.page_limit {
            let url = query.page_url(&self.base_url, page);
            tracing::debug!("Fetching CiteULike page {}: {}", page, url);

            match fetch_url(&self.client, &url).await {
                FetchResult::Success { body } => {
                    articles.extend(self.parser.parse_page(&body));
                }
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("CiteULike page {} returned HTTP {}", page, status_code);
                }
                FetchResult::NetworkError { source } => {
                    tracing::warn!("CiteULike page {} failed: {}", page, source);
                }
            }
        }

        tracing::info!("CiteULike search found {} articles", articles.len());
        articles
    }
}

fn first_capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn all_captures(re: &Regex, line: &str) -> Vec<String> {
    re.captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

fn parse_number(re: &Regex, line: &str, field: &str) -> Option<i32> {
    let parsed = first_capture(re, line).and_then(|n| n.parse().ok());
    if parsed.is_none() {
        warn_missing(field, line);
    }
    parsed
}

fn strip_paragraph(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix("<p>").unwrap_or(line);
    let line = line.strip_suffix("</p>").unwrap_or(line);
    line.trim().to_string()
}

fn warn_missing(field: &str, line: &str) {
    tracing::warn!("No {} for:\n\t{}", field, line);
}
