use rand::Rng;

use crate::core::filters::passes_filters;
use crate::core::ranking::diversity_rerank;
use crate::core::scoring::CompatibilityScorer;
use crate::models::{
    FindMatchesResult, MatchFilters, MatchRecommendation, UserHistory, UserProfile,
};

/// Relevance/diversity trade-off of the MMR re-ranking stage.
pub const DEFAULT_LAMBDA: f64 = 0.7;

/// Pure matching pipeline over pre-fetched data
///
/// # Pipeline Stages
/// 1. Hard candidate filtering
/// 2. Per-candidate compatibility scoring
/// 3. Diversity-aware (MMR) re-ranking
/// 4. Rank assignment and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    scorer: CompatibilityScorer,
    lambda: f64,
}

impl Matcher {
    pub fn new(scorer: CompatibilityScorer, lambda: f64) -> Self {
        Self { scorer, lambda }
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Run the full pipeline for one user over a candidate pool.
    ///
    /// Candidates equal to the user are skipped; exclusion of already-swiped
    /// targets happens upstream, where the pool is assembled.
    pub fn find_matches<R: Rng>(
        &self,
        user: &UserProfile,
        candidates: Vec<UserProfile>,
        history: &UserHistory,
        filters: &MatchFilters,
        limit: usize,
        rng: &mut R,
    ) -> FindMatchesResult {
        let total_candidates = candidates.len();

        let scored: Vec<MatchRecommendation> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != user.id)
            .filter(|candidate| passes_filters(user, candidate, filters))
            .map(|candidate| {
                let score = self.scorer.score(user, &candidate, history, rng);
                let category = score.category;
                MatchRecommendation {
                    user: candidate,
                    score,
                    rank: 0,
                    category,
                }
            })
            .collect();

        tracing::debug!(
            "{} of {} candidates passed filters",
            scored.len(),
            total_candidates
        );

        let mut ranked = diversity_rerank(scored, self.lambda);

        for (index, recommendation) in ranked.iter_mut().enumerate() {
            recommendation.rank = index + 1;
        }
        ranked.truncate(limit);

        FindMatchesResult {
            recommendations: ranked,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(CompatibilityScorer::default(), DEFAULT_LAMBDA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn candidate(id: &str, age: u8) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: format!("User {}", id),
            age: Some(age),
            location: "Berlin, Germany".to_string(),
            coordinates: Some(Coordinates {
                lat: 52.52,
                lng: 13.405,
            }),
            bio: "Out exploring whenever I can".to_string(),
            interests: vec!["hiking".to_string(), "food".to_string()],
            travel_style: vec!["backpacker".to_string()],
            next_destination: "Lisbon, Portugal".to_string(),
            travel_dates: None,
            bucket_list: vec![],
            verified: true,
            elo_rating: None,
        }
    }

    #[test]
    fn test_find_matches_excludes_self_and_filtered() {
        let matcher = Matcher::default();
        let user = candidate("me", 28);
        let pool = vec![
            candidate("me", 28), // self
            candidate("a", 27),
            candidate("b", 45), // outside age range
        ];
        let filters = MatchFilters {
            age_range: Some((21, 35)),
            ..Default::default()
        };

        let mut rng = SmallRng::seed_from_u64(7);
        let result =
            matcher.find_matches(&user, pool, &UserHistory::new("me"), &filters, 10, &mut rng);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].user.id, "a");
    }

    #[test]
    fn test_ranks_are_assigned_and_limit_respected() {
        let matcher = Matcher::default();
        let user = candidate("me", 28);
        let pool: Vec<UserProfile> = (0..8).map(|i| candidate(&format!("c{}", i), 25)).collect();

        let mut rng = SmallRng::seed_from_u64(7);
        let result = matcher.find_matches(
            &user,
            pool,
            &UserHistory::new("me"),
            &MatchFilters::default(),
            5,
            &mut rng,
        );

        assert_eq!(result.recommendations.len(), 5);
        let ranks: Vec<usize> = result.recommendations.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }
}
