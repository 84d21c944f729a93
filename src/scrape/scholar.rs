//! Google Scholar result-page parser and search engine
//!
//! Each `div.gs_r` result block becomes one [`Article`] with [`ScholarLinks`]
//! attached, except blocks marked as bare citations, which are skipped.
//! A byline such as
//!
//! ```text
//! DF Easton, DT Bishop, D Ford - American journal of human genetics, 1995 - Elsevier
//! ```
//!
//! is split at the first and last `" - "`: authors before the first, journal
//! name up to the last comma, journal URL after the last.

use crate::article::{Article, ScholarLinks, UNAVAILABLE};
use crate::config::{HttpConfig, ScholarConfig};
use crate::crawler::{build_http_client, fetch_url};
use crate::scrape::patterns::{
    ScholarPatterns, BYLINE_DELIMITER, CITATION_STUB, CITED_BY, RELATED_ARTICLES,
};
use crate::scrape::query::scholar_search_url;
use crate::WormError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Fields recovered from a result's byline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Byline {
    pub authors: Vec<String>,
    pub journal: String,
    pub journal_url: String,
    /// `0` when no year could be found
    pub year: i32,
}

#[derive(Debug, Clone)]
struct ResultSelectors {
    record: Selector,
    anchor: Selector,
    span: Selector,
    byline: Selector,
    abstract_block: Selector,
}

impl ResultSelectors {
    fn compile() -> Result<Self, WormError> {
        Ok(Self {
            record: selector("div.gs_r")?,
            anchor: selector("a")?,
            span: selector("span")?,
            byline: selector("div.gs_a")?,
            abstract_block: selector("div.gs_rs")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, WormError> {
    Selector::parse(css).map_err(|e| WormError::Selector(format!("{}: {:?}", css, e)))
}

/// Parser for Google Scholar result pages
#[derive(Debug, Clone)]
pub struct ScholarParser {
    patterns: ScholarPatterns,
    selectors: ResultSelectors,
}

impl ScholarParser {
    pub fn new() -> Result<Self, WormError> {
        Ok(Self {
            patterns: ScholarPatterns::compile()?,
            selectors: ResultSelectors::compile()?,
        })
    }

    /// Parses a result page; `search_terms` become each article's keywords
    pub fn parse_page(&self, html: &str, search_terms: &[String]) -> Vec<Article> {
        let document = Html::parse_document(html);

        document
            .select(&self.selectors.record)
            .filter_map(|record| self.parse_record(record, search_terms))
            .collect()
    }

    fn parse_record(&self, record: ElementRef<'_>, search_terms: &[String]) -> Option<Article> {
        let record_text = element_text(record);
        if record_text.contains(CITATION_STUB) {
            tracing::debug!("Skipping citation stub");
            return None;
        }

        let anchors: Vec<ElementRef<'_>> = record.select(&self.selectors.anchor).collect();
        let Some(first) = anchors.first() else {
            tracing::debug!("Skipping result block without links");
            return None;
        };

        let mut links = ScholarLinks::default();

        // A first anchor with inline children is the full-text link, the title follows it
        let title = if first.select(&self.selectors.span).next().is_some() {
            links.full_text_url = href(first);
            match anchors.get(1) {
                Some(second) => {
                    links.public_url = href(second);
                    element_text(*second)
                }
                None => element_text(*first),
            }
        } else {
            links.public_url = href(first);
            element_text(*first)
        };

        for anchor in &anchors {
            let text = element_text(*anchor);
            if text.contains(CITED_BY) {
                links.citation_count = self
                    .patterns
                    .spaced_integer
                    .captures(&text)
                    .and_then(|c| c[1].parse().ok())
                    .unwrap_or(0);
                links.citing_articles_url = href(anchor);
            } else if text.contains(RELATED_ARTICLES) {
                links.related_articles_url = href(anchor);
            }
        }

        let byline_text = match record.select(&self.selectors.byline).next() {
            Some(block) => element_text(block),
            None => self
                .patterns
                .green_font
                .captures(&record.html())
                .map(|c| c[1].to_string())
                .unwrap_or_default(),
        };
        let byline = self.parse_byline(&byline_text);
        links.journal_url = byline.journal_url;

        let abstract_text = record
            .select(&self.selectors.abstract_block)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let mut article = Article::new(title.trim(), byline.authors, byline.year, byline.journal)
            .with_keywords(search_terms.to_vec())
            .with_abstract(abstract_text);
        article.attach_scholar_links(links);
        Some(article)
    }

    /// Splits a byline into authors, journal name, journal URL and year
    pub fn parse_byline(&self, byline: &str) -> Byline {
        let mut year: Option<i32> = self
            .patterns
            .spaced_integer
            .captures(byline)
            .and_then(|c| c[1].parse().ok());

        let (first, last) = match (byline.find(BYLINE_DELIMITER), byline.rfind(BYLINE_DELIMITER)) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Byline {
                    authors: split_authors(byline),
                    journal: String::new(),
                    journal_url: UNAVAILABLE.to_string(),
                    year: year.unwrap_or(0),
                }
            }
        };

        let journal_end = match byline.rfind(',') {
            Some(comma) if comma > first => comma,
            _ if last > first => last,
            _ => byline.len(),
        };
        let mut journal = byline[first..journal_end]
            .trim_start()
            .trim_start_matches('-')
            .trim()
            .to_string();

        let trailing = byline[last + BYLINE_DELIMITER.len()..].trim();
        let mut journal_url = trailing.to_string();

        // With a single delimiter the trailing segment is "journal, year", not a URL
        if first == last {
            if let Some(found) = self.patterns.four_digits.captures(trailing) {
                journal_url = UNAVAILABLE.to_string();
                journal = trailing
                    .rfind(',')
                    .map(|comma| trailing[..comma].trim().to_string())
                    .unwrap_or_default();
                if year.is_none() {
                    year = found[1].parse().ok();
                }
            }
        }

        Byline {
            authors: split_authors(&byline[..first]),
            journal,
            journal_url,
            year: year.unwrap_or(0),
        }
    }
}

/// Searches Google Scholar and follows its result listings
pub struct ScholarSearch {
    client: Client,
    base_url: String,
    results_limit: u32,
    page_stride: u32,
    parser: ScholarParser,
}

impl ScholarSearch {
    pub fn new(config: &ScholarConfig, http: &HttpConfig) -> Result<Self, WormError> {
        let client = build_http_client(http, Duration::from_secs(http.timeout_secs))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            results_limit: config.results_limit,
            page_stride: config.page_stride,
            parser: ScholarParser::new()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_stride(&self) -> u32 {
        self.page_stride
    }

    /// Searches for articles matching all of the terms
    ///
    /// # Errors
    ///
    /// `WormError::Connectivity` or `WormError::Timeout` when the results host
    /// cannot be reached or answers with a non-success status.
    pub async fn search(&self, terms: &[String]) -> Result<Vec<Article>, WormError> {
        let url = scholar_search_url(&self.base_url, terms, self.results_limit)?;
        self.articles_from_page(&url, terms).await
    }

    /// Fetches and parses any Scholar listing (search, citing or related articles)
    pub async fn articles_from_page(
        &self,
        url: &str,
        search_terms: &[String],
    ) -> Result<Vec<Article>, WormError> {
        tracing::debug!("Fetching Scholar page: {}", url);
        let body = fetch_url(&self.client, url).await.into_body(url)?;
        let articles = self.parser.parse_page(&body, search_terms);
        tracing::debug!("Scholar page yielded {} articles", articles.len());
        Ok(articles)
    }
}

fn split_authors(part: &str) -> Vec<String> {
    part.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn href(element: &ElementRef<'_>) -> String {
    element
        .value()
        .attr("href")
        .unwrap_or(UNAVAILABLE)
        .to_string()
}
