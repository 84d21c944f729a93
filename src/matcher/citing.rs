//! Following "Cited by" listings for a matched article

use crate::article::{Article, UNAVAILABLE};
use crate::matcher::best_match::best_match;
use crate::scrape::{citing_page_url, ScholarSearch};
use crate::Result;

/// Outcome of looking up a reference article and the works citing it
#[derive(Debug, Clone, Default)]
pub struct CitingArticles {
    /// The search result chosen as the reference, if the search returned anything
    pub matched: Option<Article>,
    /// Articles listed on the matched record's citing pages, in page order
    pub citing: Vec<Article>,
}

/// Result offsets of the citing pages for an article cited `total` times
pub fn citing_offsets(total: u32, stride: u32) -> Vec<u32> {
    if stride == 0 {
        return Vec::new();
    }
    (0..total).step_by(stride as usize).collect()
}

/// Collects every article listed on the citing pages of `article`
///
/// Articles without Scholar links, or whose "Cited by" link is unavailable,
/// have no citing pages and yield an empty list.
pub async fn citing_articles(
    engine: &ScholarSearch,
    article: &Article,
    search_terms: &[String],
) -> Result<Vec<Article>> {
    let links = match article.scholar_links() {
        Some(links) if links.citing_articles_url != UNAVAILABLE => links,
        _ => {
            tracing::debug!("No citing articles link for: {}", article.title);
            return Ok(Vec::new());
        }
    };

    let mut citing = Vec::new();
    for offset in citing_offsets(links.citation_count, engine.page_stride()) {
        let url = citing_page_url(engine.base_url(), &links.citing_articles_url, offset)?;
        let page = engine.articles_from_page(&url, search_terms).await?;
        citing.extend(page);
    }

    tracing::info!(
        "Collected {} citing articles for: {} (cited by {})",
        citing.len(),
        article.title,
        links.citation_count
    );
    Ok(citing)
}

/// Searches Scholar by the reference's title, picks the best match and
/// collects the articles citing it
pub async fn find_citing_articles(
    engine: &ScholarSearch,
    reference: &Article,
) -> Result<CitingArticles> {
    let terms = vec![reference.title.clone()];
    let mut candidates = engine.search(&terms).await?;
    if candidates.is_empty() {
        tracing::warn!("No search results for: {}", reference.title);
        return Ok(CitingArticles::default());
    }

    let index = best_match(reference, &candidates);
    let matched = candidates.swap_remove(index);
    tracing::info!("Best match for reference: {}", matched);

    let citing = citing_articles(engine, &matched, &terms).await?;
    Ok(CitingArticles {
        matched: Some(matched),
        citing,
    })
}
