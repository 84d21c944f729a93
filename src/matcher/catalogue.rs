//! Pairing Scholar listings with CiteULike catalogue records

use crate::article::Article;
use crate::matcher::best_match::best_title_match;
use crate::scrape::{CiteULikeQuery, CiteULikeSearch};

/// A Scholar article and the catalogue record found for it, if any
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueMatch {
    pub listed: Article,
    pub record: Option<Article>,
}

/// Catalogue query for one listed article: its title, restricted to its year
///
/// Articles without a known year search the whole default year range.
pub fn catalogue_query(article: &Article) -> CiteULikeQuery {
    let query = CiteULikeQuery::default().with_title(article.title.clone());
    if article.year > 0 {
        query.with_years(article.year, article.year)
    } else {
        query
    }
}

/// Looks every article up in the CiteULike catalogue
///
/// Each lookup searches by title and year and keeps the candidate whose
/// title is most similar. Articles without a title are not looked up.
pub async fn match_in_catalogue(
    catalogue: &CiteULikeSearch,
    articles: Vec<Article>,
) -> Vec<CatalogueMatch> {
    let mut matches = Vec::with_capacity(articles.len());

    for listed in articles {
        if listed.title.trim().is_empty() {
            tracing::debug!("Not looking up an untitled article in the catalogue");
            matches.push(CatalogueMatch {
                listed,
                record: None,
            });
            continue;
        }

        let mut candidates = catalogue.search(&catalogue_query(&listed)).await;
        let record = best_title_match(&listed.title, &candidates)
            .map(|index| candidates.swap_remove(index));

        match &record {
            Some(found) => tracing::debug!(
                "Catalogue record {} for: {}",
                found.external_id,
                listed.title
            ),
            None => tracing::warn!("No catalogue record for: {}", listed.title),
        }

        matches.push(CatalogueMatch { listed, record });
    }

    matches
}
