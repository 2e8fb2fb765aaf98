//! Diversity-aware re-ranking via Maximal Marginal Relevance (MMR).

use crate::core::similarity::{jaccard_similarity, taste_profile};
use crate::models::MatchRecommendation;

/// Re-order scored candidates balancing relevance against novelty.
///
/// The highest-scoring candidate is taken unconditionally; each following
/// position picks the remaining candidate maximizing
/// `lambda * relevance + (1 - lambda) * diversity`, where diversity is the
/// minimum dissimilarity (1 - interests/style Jaccard) to any already-selected
/// candidate. Ties resolve to pool order, so the ordering is deterministic
/// for a fixed input order. O(n^2) in candidate count.
pub fn diversity_rerank(
    matches: Vec<MatchRecommendation>,
    lambda: f64,
) -> Vec<MatchRecommendation> {
    if matches.is_empty() {
        return vec![];
    }

    let mut remaining = matches;
    remaining.sort_by(|a, b| {
        b.score
            .overall
            .partial_cmp(&a.score.overall)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranked = Vec::with_capacity(remaining.len());
    ranked.push(remaining.remove(0));

    while !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;

        for (index, candidate) in remaining.iter().enumerate() {
            let relevance = candidate.score.overall;

            let diversity = ranked
                .iter()
                .map(|selected| 1.0 - taste_similarity(candidate, selected))
                .fold(f64::INFINITY, f64::min);

            let mmr = lambda * relevance + (1.0 - lambda) * diversity;
            if mmr > best_score {
                best_score = mmr;
                best_index = index;
            }
        }

        ranked.push(remaining.remove(best_index));
    }

    ranked
}

fn taste_similarity(a: &MatchRecommendation, b: &MatchRecommendation) -> f64 {
    jaccard_similarity(&taste_profile(&a.user), &taste_profile(&b.user))
}
