use crate::article::Article;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for Sci-Worm
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Only the default crawl mode needs seeds
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub citeulike: CiteULikeConfig,
    #[serde(default)]
    pub scholar: ScholarConfig,
    #[serde(default)]
    pub reference: Option<ReferenceConfig>,
}

/// Link-following crawl configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URLs the crawl starts from
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Literal strings whose presence bookmarks a page
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Maximum size of the visited set before the crawl stops
    #[serde(rename = "visit-limit", default = "default_visit_limit")]
    pub visit_limit: usize,

    /// Per-page fetch timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_crawl_timeout")]
    pub timeout_secs: u64,
}

/// Request identification shared by every fetch
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for search requests (seconds)
    #[serde(rename = "timeout-secs", default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// Extra fixed headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// CiteULike search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CiteULikeConfig {
    /// Scheme and host of the catalogue
    #[serde(rename = "base-url", default = "default_citeulike_url")]
    pub base_url: String,

    /// How many result pages a search walks through
    #[serde(rename = "page-limit", default = "default_page_limit")]
    pub page_limit: u32,
}

/// Google Scholar search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarConfig {
    /// Scheme and host of the search engine
    #[serde(rename = "base-url", default = "default_scholar_url")]
    pub base_url: String,

    /// Maximum number of results requested per search
    #[serde(rename = "results-limit", default = "default_results_limit")]
    pub results_limit: u32,

    /// Offset step between consecutive citing-article pages
    #[serde(rename = "page-stride", default = "default_page_stride")]
    pub page_stride: u32,
}

/// Reference article used to look up citing articles
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub journal: String,
    #[serde(default)]
    pub doi: String,
    #[serde(default = "default_unknown_number")]
    pub volume: i32,
    #[serde(default = "default_unknown_number")]
    pub issue: i32,
}

impl ReferenceConfig {
    pub fn to_article(&self) -> Article {
        Article::new(
            self.title.clone(),
            self.authors.clone(),
            self.year,
            self.journal.clone(),
        )
        .with_doi(self.doi.clone())
        .with_volume(self.volume)
        .with_issue(self.issue)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            keywords: Vec::new(),
            visit_limit: default_visit_limit(),
            timeout_secs: default_crawl_timeout(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_http_timeout(),
            headers: BTreeMap::new(),
        }
    }
}

impl Default for CiteULikeConfig {
    fn default() -> Self {
        Self {
            base_url: default_citeulike_url(),
            page_limit: default_page_limit(),
        }
    }
}

impl Default for ScholarConfig {
    fn default() -> Self {
        Self {
            base_url: default_scholar_url(),
            results_limit: default_results_limit(),
            page_stride: default_page_stride(),
        }
    }
}

fn default_visit_limit() -> usize {
    1000
}

fn default_crawl_timeout() -> u64 {
    1
}

fn default_user_agent() -> String {
    "Mozilla/4.0 (compatible; MSIE 5.5; Windows NT)".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_citeulike_url() -> String {
    "http://www.citeulike.org".to_string()
}

fn default_page_limit() -> u32 {
    2
}

fn default_scholar_url() -> String {
    "https://scholar.google.com".to_string()
}

fn default_results_limit() -> u32 {
    10
}

fn default_page_stride() -> u32 {
    20
}

fn default_unknown_number() -> i32 {
    Article::UNKNOWN_NUMBER
}
