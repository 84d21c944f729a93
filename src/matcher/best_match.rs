//! Selecting the record that best represents a reference article

use crate::article::Article;
use crate::matcher::similarity::similarity_ratio;

/// Picks the candidate that most likely is the reference article
///
/// Only candidates published in the reference's year are eligible. Walking
/// the eligible candidates in order, a candidate is selected when its author
/// similarity beats the best similarity seen so far *and* its citation count
/// beats the highest citation count seen so far among eligible candidates.
/// The two maxima are tracked independently of which candidate is selected,
/// so the selection can lag behind the most similar record.
///
/// Returns `0` when no candidate is eligible; callers cannot tell this apart
/// from a genuine match at index `0` and should treat it as unverified.
pub fn best_match(reference: &Article, candidates: &[Article]) -> usize {
    let reference_authors = reference.joined_authors();

    let mut selected = 0;
    let mut max_similarity = 0.0;
    let mut max_citations: Option<u32> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.year != reference.year {
            continue;
        }

        let similarity = similarity_ratio(&reference_authors, &candidate.joined_authors());
        let citations = candidate.citation_count();

        if similarity > max_similarity {
            max_similarity = similarity;
            if max_citations.map_or(true, |max| citations > max) {
                selected = index;
            }
        }

        max_citations = Some(max_citations.map_or(citations, |max| max.max(citations)));

        tracing::trace!(
            "Candidate {} ({}): similarity {:.3}, {} citations",
            index,
            candidate.title,
            similarity,
            citations
        );
    }

    selected
}

/// Picks the candidate whose title is most similar to `title`
///
/// Returns `None` only when there are no candidates.
pub fn best_title_match(title: &str, candidates: &[Article]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let similarity = similarity_ratio(title, &candidate.title);
        if best.map_or(true, |(_, max)| similarity > max) {
            best = Some((index, similarity));
        }
    }

    best.map(|(index, _)| index)
}
