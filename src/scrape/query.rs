//! Search-query construction for the supported search services

use crate::WormError;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Filters for a CiteULike catalogue search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiteULikeQuery {
    /// Author surnames or full names
    pub authors: Vec<String>,
    /// Tags (keywords) the articles must carry
    pub tags: Vec<String>,
    pub year_start: i32,
    pub year_end: i32,
    /// Title filter; selects the title URL template when present
    pub title: Option<String>,
    pub isbn: String,
}

impl Default for CiteULikeQuery {
    fn default() -> Self {
        Self {
            authors: Vec::new(),
            tags: Vec::new(),
            year_start: 1800,
            year_end: 3000,
            title: None,
            isbn: "none".to_string(),
        }
    }
}

impl CiteULikeQuery {
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_years(mut self, start: i32, end: i32) -> Self {
        self.year_start = start;
        self.year_end = end;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = isbn.into();
        self
    }

    /// Builds the URL of one result page (pages are numbered from 1)
    ///
    /// Every tag and author becomes a quoted `tag:"..."` / `author:"..."` clause;
    /// the year range and ISBN clauses always close the query.
    pub fn page_url(&self, base_url: &str, page: u32) -> String {
        let mut url = format!(
            "{}/search/all/page/{}?q=",
            base_url.trim_end_matches('/'),
            page
        );

        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            url.push_str("title%3E");
            url.push_str(&encode(title));
            url.push('+');
        }

        for tag in self.tags.iter().filter(|t| !t.is_empty()) {
            url.push_str(&format!("tag%3A%22{}%22+", encode(tag)));
        }

        for author in self.authors.iter().filter(|a| !a.is_empty()) {
            url.push_str(&format!("author%3A%22{}%22+", encode(author)));
        }

        url.push_str(&format!(
            "year%3A%5B{}+TO+{}%5D+isbn%3A{}",
            self.year_start,
            self.year_end,
            encode(&self.isbn)
        ));

        url
    }
}

/// Builds a Google Scholar search URL: `{base}/scholar?q={terms joined by '+'}&num={limit}`
pub fn scholar_search_url(base_url: &str, terms: &[String], limit: u32) -> Result<String, WormError> {
    let endpoint = Url::parse(base_url)?.join("/scholar")?;
    let url = Url::parse_with_params(
        endpoint.as_str(),
        &[("q", terms.join("+")), ("num", limit.to_string())],
    )?;
    Ok(url.to_string())
}

/// Builds the URL of the citing-articles page starting at `offset`
///
/// `citing_url` is the (usually host-relative) href of a "Cited by" link.
pub fn citing_page_url(base_url: &str, citing_url: &str, offset: u32) -> Result<String, WormError> {
    let mut url = Url::parse(base_url)?.join(citing_url)?;
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "start")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair("start", &offset.to_string());

    Ok(url.to_string())
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
