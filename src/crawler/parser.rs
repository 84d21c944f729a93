//! Link extraction from fetched HTML
//!
//! Every `<a href="...">` with a non-empty href yields one absolute URL, in
//! document order. No deduplication or scheme filtering happens here: the
//! crawler decides what to enqueue.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all anchor links from an HTML document, resolved against `base_url`
///
/// # Arguments
///
/// * `html` - The HTML content (may be empty)
/// * `base_url` - The URL the content was fetched from
///
/// # Returns
///
/// One absolute URL string per anchor that has a resolvable, non-empty href.
///
/// # Example
///
/// ```
/// use sci_worm::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/index.html").unwrap();
/// assert_eq!(extract_links(html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, Some(base_url)))
        .collect()
}

/// Like [`extract_links`], but takes the base as a string
///
/// When the base is not a valid absolute URL, only hrefs that are already
/// absolute survive.
pub fn extract_links_from(html: &str, base_url: &str) -> Vec<String> {
    match Url::parse(base_url) {
        Ok(base) => extract_links(html, &base),
        Err(e) => {
            tracing::debug!("Base URL {} does not parse ({}), keeping absolute links only", base_url, e);
            let document = Html::parse_document(html);
            let Ok(a_selector) = Selector::parse("a[href]") else {
                return Vec::new();
            };
            document
                .select(&a_selector)
                .filter_map(|element| element.value().attr("href"))
                .filter_map(|href| resolve_link(href, None))
                .collect()
        }
    }
}

/// Resolves a link href to an absolute URL
///
/// An href that is already absolute is returned as written; relative hrefs
/// are joined onto the base. Returns None for empty hrefs and hrefs that
/// cannot be resolved.
fn resolve_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }

    base_url
        .and_then(|base| base.join(href).ok())
        .map(|url| url.to_string())
}
