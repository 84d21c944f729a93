//! Matching reference articles against search results

pub mod best_match;
pub mod catalogue;
pub mod citing;
pub mod similarity;

pub use best_match::{best_match, best_title_match};
pub use catalogue::{catalogue_query, match_in_catalogue, CatalogueMatch};
pub use citing::{citing_articles, citing_offsets, find_citing_articles, CitingArticles};
pub use similarity::similarity_ratio;
