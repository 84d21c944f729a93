//! Article record definitions
//!
//! Required fields are always populated (possibly with placeholders); optional
//! fields use the sentinels defined here.
use std::fmt;

/// Journal name used when a listing does not carry one
pub const UNKNOWN_JOURNAL: &str = "UNKNOWN JOURNAL";

/// Placeholder for Scholar links that a result block does not offer
pub const UNAVAILABLE: &str = "Unavailable";

/// Metadata about one scientific publication
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Title of the publication
    pub title: String,

    /// Author names in listing order; may contain initials
    pub authors: Vec<String>,

    /// Publication year, `0` when unknown
    pub year: i32,

    /// Journal the article was published in
    pub journal: String,

    /// Digital Object Identifier, empty when absent
    pub doi: String,

    /// Journal volume, [`Article::UNKNOWN_NUMBER`] when unknown
    pub volume: i32,

    /// Journal issue, [`Article::UNKNOWN_NUMBER`] when unknown
    pub issue: i32,

    /// Keywords or tags attached to the article
    pub keywords: Vec<String>,

    /// Abstract text, empty when unknown
    pub abstract_text: String,

    /// Catalogue identifier (CiteULike article id), [`Article::NO_EXTERNAL_ID`] when absent
    pub external_id: i64,

    scholar: Option<ScholarLinks>,
}

/// Attributes only present on records produced by the Scholar search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarLinks {
    /// Link to the full text (HTML/PDF)
    pub full_text_url: String,

    /// Link behind the result title
    pub public_url: String,

    /// Link to the listing of articles citing this one
    pub citing_articles_url: String,

    /// Link to the listing of related articles
    pub related_articles_url: String,

    /// Trailing byline segment, usually the publisher host
    pub journal_url: String,

    /// Number of times the publication is cited
    pub citation_count: u32,
}

impl Default for ScholarLinks {
    fn default() -> Self {
        Self {
            full_text_url: UNAVAILABLE.to_string(),
            public_url: UNAVAILABLE.to_string(),
            citing_articles_url: UNAVAILABLE.to_string(),
            related_articles_url: UNAVAILABLE.to_string(),
            journal_url: UNAVAILABLE.to_string(),
            citation_count: 0,
        }
    }
}

impl Article {
    /// Sentinel for an unknown volume or issue number
    pub const UNKNOWN_NUMBER: i32 = -1;

    /// Sentinel for a missing catalogue identifier
    pub const NO_EXTERNAL_ID: i64 = -1;

    /// Creates an article from the guaranteed fields; everything else takes its sentinel
    pub fn new(
        title: impl Into<String>,
        authors: Vec<String>,
        year: i32,
        journal: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors,
            year,
            journal: journal.into(),
            doi: String::new(),
            volume: Self::UNKNOWN_NUMBER,
            issue: Self::UNKNOWN_NUMBER,
            keywords: Vec::new(),
            abstract_text: String::new(),
            external_id: Self::NO_EXTERNAL_ID,
            scholar: None,
        }
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = doi.into();
        self
    }

    pub fn with_volume(mut self, volume: i32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_issue(mut self, issue: i32) -> Self {
        self.issue = issue;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    pub fn with_external_id(mut self, id: i64) -> Self {
        self.external_id = id;
        self
    }

    /// Attaches the Scholar extension attributes after construction
    pub fn attach_scholar_links(&mut self, links: ScholarLinks) {
        self.scholar = Some(links);
    }

    /// Scholar extension attributes, if this record came from a Scholar listing
    pub fn scholar_links(&self) -> Option<&ScholarLinks> {
        self.scholar.as_ref()
    }

    /// Citation count from the Scholar listing, `0` for other records
    pub fn citation_count(&self) -> u32 {
        self.scholar.as_ref().map_or(0, |s| s.citation_count)
    }

    /// All author names concatenated without separators
    pub fn joined_authors(&self) -> String {
        self.authors.concat()
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {} ({})", self.authors, self.title, self.year)
    }
}
