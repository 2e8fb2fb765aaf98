use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{Match, SwipeKind, SwipeOutcome, SwipeRecord};
use crate::services::store::{MatchStore, StoreError};

/// Directed swipe ledger with mutual-match detection.
///
/// Maintains the invariant that at most one swipe record is active per
/// ordered (source, target) pair: a new swipe supersedes any prior ones
/// before being written. Match creation goes through the store's atomic
/// insert-if-absent primitive, so a retried or racing mutual-like completion
/// resolves to the already-existing match instead of a duplicate.
pub struct SwipeLedger {
    store: Arc<dyn MatchStore>,
}

impl SwipeLedger {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Record a swipe, superseding prior swipes on the same ordered pair,
    /// and create a match when it completes a mutual like.
    pub async fn record_swipe(
        &self,
        user_id: &str,
        target_user_id: &str,
        kind: SwipeKind,
    ) -> Result<SwipeOutcome, StoreError> {
        // Supersede any existing swipes for this ordered pair
        let prior: Vec<String> = self
            .store
            .swipes_by_source(user_id)
            .await?
            .into_iter()
            .filter(|s| s.target_user_id == target_user_id)
            .map(|s| s.id)
            .collect();

        if !prior.is_empty() {
            tracing::debug!(
                "superseding {} prior swipe(s) from {} to {}",
                prior.len(),
                user_id,
                target_user_id
            );
            self.store.delete_swipes(&prior).await?;
        }

        self.store
            .insert_swipe(SwipeRecord::new(user_id, target_user_id, kind))
            .await?;

        if !kind.is_positive() {
            return Ok(SwipeOutcome::no_match());
        }

        if !self.has_positive_swipe(target_user_id, user_id).await? {
            return Ok(SwipeOutcome::no_match());
        }

        // Mutual like: create the match unless one already exists
        let inserted = self
            .store
            .insert_match(Match::new(user_id, target_user_id))
            .await?;
        let m = inserted.into_match();

        tracing::info!("mutual like between {} and {}", user_id, target_user_id);

        Ok(SwipeOutcome::matched(m.id))
    }

    /// True when `source` has an active like or superlike toward `target`.
    async fn has_positive_swipe(&self, source: &str, target: &str) -> Result<bool, StoreError> {
        Ok(self
            .store
            .swipes_by_source(source)
            .await?
            .iter()
            .any(|s| s.target_user_id == target && s.kind.is_positive()))
    }

    /// Batch reconciliation of the one-active-swipe-per-pair invariant.
    ///
    /// Groups every swipe by ordered (source, target) pair and deletes all
    /// but the most recent record of each group. Needed as a periodic job
    /// because records can enter the store through paths that bypass
    /// `record_swipe`. Returns the number of removed records.
    pub async fn cleanup_duplicate_swipes(&self) -> Result<u64, StoreError> {
        let mut groups: HashMap<(String, String), Vec<SwipeRecord>> = HashMap::new();
        for swipe in self.store.all_swipes().await? {
            groups
                .entry((swipe.user_id.clone(), swipe.target_user_id.clone()))
                .or_default()
                .push(swipe);
        }

        let mut stale = Vec::new();
        for records in groups.into_values() {
            if records.len() < 2 {
                continue;
            }
            let newest = records
                .iter()
                .max_by_key(|r| r.created_at)
                .map(|r| r.id.clone());
            stale.extend(
                records
                    .into_iter()
                    .filter(|r| Some(&r.id) != newest.as_ref())
                    .map(|r| r.id),
            );
        }

        if stale.is_empty() {
            return Ok(0);
        }

        let removed = self.store.delete_swipes(&stale).await?;
        tracing::info!("removed {} duplicate swipe record(s)", removed);
        Ok(removed)
    }
}
