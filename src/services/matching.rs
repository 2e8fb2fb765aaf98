use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use validator::Validate;

use crate::config::Settings;
use crate::core::{CompatibilityScorer, Matcher};
use crate::models::{
    CompatibilityScore, FindMatchesRequest, FindMatchesResult, LikeReceived, MatchView,
    RecordSwipeRequest, SwipeOutcome, UserHistory, UserProfile,
};
use crate::services::ledger::SwipeLedger;
use crate::services::queries::MatchQueries;
use crate::services::store::{MatchStore, StoreError};

/// Errors surfaced by the matching facade.
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Caller-facing surface of the matching engine.
///
/// Wires the pure pipeline (`Matcher`) to the persistence interface, the
/// swipe ledger and the query views. A missing requesting user is an error;
/// a failing store call propagates unchanged; sparse profile data never
/// fails (the scorer defaults it).
pub struct MatchingService {
    store: Arc<dyn MatchStore>,
    matcher: Matcher,
    ledger: SwipeLedger,
    queries: MatchQueries,
    /// Cap on the per-request recommendation count.
    max_limit: u16,
    /// Fixed RNG seed for reproducible ranking runs; entropy when unset.
    exploration_seed: Option<u64>,
}

/// Default cap on the per-request recommendation count.
const DEFAULT_MAX_LIMIT: u16 = 100;

impl MatchingService {
    pub fn new(store: Arc<dyn MatchStore>, matcher: Matcher, exploration_seed: Option<u64>) -> Self {
        Self {
            ledger: SwipeLedger::new(store.clone()),
            queries: MatchQueries::new(store.clone()),
            store,
            matcher,
            max_limit: DEFAULT_MAX_LIMIT,
            exploration_seed,
        }
    }

    /// Build a service with weights, lambda, exploration and limits taken
    /// from loaded configuration.
    pub fn from_settings(store: Arc<dyn MatchStore>, settings: &Settings) -> Self {
        let scorer = CompatibilityScorer::new(
            settings.scoring.components.clone().into(),
            settings.scoring.features.clone().into(),
            settings.scoring.exploration(),
        );
        let matcher = Matcher::new(scorer, settings.scoring.lambda);

        let mut service = Self::new(store, matcher, settings.matching.exploration_seed);
        service.max_limit = settings.matching.max_limit;
        service
    }

    /// Ranked, diversity-aware candidate recommendations for a user.
    pub async fn find_matches(
        &self,
        request: &FindMatchesRequest,
    ) -> Result<FindMatchesResult, MatchingError> {
        request
            .validate()
            .map_err(|e| MatchingError::Validation(e.to_string()))?;

        let user = self.require_profile(&request.user_id).await?;
        let history = self.build_history(&request.user_id).await?;
        let candidates = self.candidate_pool(&user, &history).await?;

        let limit = request.limit.min(self.max_limit) as usize;

        tracing::info!(
            "finding matches for {}: {} candidate(s), limit {}",
            request.user_id,
            candidates.len(),
            limit
        );

        let mut rng = self.rng();
        let result = self.matcher.find_matches(
            &user,
            candidates,
            &history,
            &request.filters,
            limit,
            &mut rng,
        );

        tracing::info!(
            "returning {} recommendation(s) for {} (from {} candidates)",
            result.recommendations.len(),
            request.user_id,
            result.total_candidates
        );

        Ok(result)
    }

    /// Record a swipe; returns whether it completed a mutual match.
    pub async fn record_swipe(
        &self,
        request: &RecordSwipeRequest,
    ) -> Result<SwipeOutcome, MatchingError> {
        request
            .validate()
            .map_err(|e| MatchingError::Validation(e.to_string()))?;

        let outcome = self
            .ledger
            .record_swipe(&request.user_id, &request.target_user_id, request.kind)
            .await?;

        Ok(outcome)
    }

    /// The user's matches, with their own unread counter projected out.
    pub async fn get_user_matches(&self, user_id: &str) -> Result<Vec<MatchView>, MatchingError> {
        Ok(self.queries.get_user_matches(user_id).await?)
    }

    /// Who liked the user, deduplicated and newest first.
    pub async fn get_likes_received(
        &self,
        user_id: &str,
    ) -> Result<Vec<LikeReceived>, MatchingError> {
        Ok(self.queries.get_likes_received(user_id).await?)
    }

    /// Compatibility score for one specific pair.
    pub async fn get_compatibility(
        &self,
        user_id: &str,
        target_user_id: &str,
    ) -> Result<CompatibilityScore, MatchingError> {
        let user = self.require_profile(user_id).await?;
        let target = self.require_profile(target_user_id).await?;
        let history = self.build_history(user_id).await?;

        let mut rng = self.rng();
        Ok(self.matcher.scorer().score(&user, &target, &history, &mut rng))
    }

    /// Run the duplicate-swipe reconciliation sweep.
    pub async fn cleanup_duplicate_swipes(&self) -> Result<u64, MatchingError> {
        Ok(self.ledger.cleanup_duplicate_swipes().await?)
    }

    async fn require_profile(&self, user_id: &str) -> Result<UserProfile, MatchingError> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| MatchingError::UserNotFound(user_id.to_string()))
    }

    /// Interaction history of a user: active swipes by kind plus matched ids.
    async fn build_history(&self, user_id: &str) -> Result<UserHistory, MatchingError> {
        let mut history = UserHistory::new(user_id);

        for swipe in self.store.swipes_by_source(user_id).await? {
            history.swipes.insert(swipe.target_user_id, swipe.kind);
        }
        for m in self.store.matches_for_user(user_id).await? {
            if let Some(other) = m.other_user(user_id) {
                history.matches.insert(other.to_string());
            }
        }

        Ok(history)
    }

    /// Candidate pool: everyone except the user, users already matched, and
    /// users the user disliked. Liked-but-unmatched users stay in the pool.
    async fn candidate_pool(
        &self,
        user: &UserProfile,
        history: &UserHistory,
    ) -> Result<Vec<UserProfile>, MatchingError> {
        let profiles = self.store.list_profiles().await?;

        let pool = profiles
            .into_iter()
            .filter(|p| p.id != user.id)
            .filter(|p| !history.matches.contains(&p.id))
            .filter(|p| {
                !history
                    .swipes
                    .get(&p.id)
                    .is_some_and(|kind| !kind.is_positive())
            })
            .collect();

        Ok(pool)
    }

    fn rng(&self) -> SmallRng {
        match self.exploration_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}
