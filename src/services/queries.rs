use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::models::{LikeReceived, MatchView, SwipeRecord};
use crate::services::store::{MatchStore, StoreError};

/// Read-side views derived from the swipe and match logs.
pub struct MatchQueries {
    store: Arc<dyn MatchStore>,
}

impl MatchQueries {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// All matches containing the user, with the caller's own unread counter
    /// projected out of the per-user map.
    pub async fn get_user_matches(&self, user_id: &str) -> Result<Vec<MatchView>, StoreError> {
        let matches = self.store.matches_for_user(user_id).await?;

        let views = matches
            .into_iter()
            .filter_map(|m| {
                let other_user_id = m.other_user(user_id)?.to_string();
                let unread_count = m.unread_counts.get(user_id).copied().unwrap_or(0);
                Some(MatchView {
                    id: m.id,
                    users: m.users,
                    other_user_id,
                    status: m.status,
                    matched_at: m.matched_at,
                    last_message_at: m.last_message_at,
                    unread_count,
                })
            })
            .collect();

        Ok(views)
    }

    /// Active positive swipes targeting the user, newest first.
    ///
    /// Likers who already share a match with the user are excluded, and a
    /// liker appearing more than once is reduced to their most recent swipe.
    /// Likers whose profile no longer resolves are skipped.
    pub async fn get_likes_received(&self, user_id: &str) -> Result<Vec<LikeReceived>, StoreError> {
        let likes = self.store.swipes_by_target(user_id).await?;

        let matched: HashSet<String> = self
            .store
            .matches_for_user(user_id)
            .await?
            .iter()
            .filter_map(|m| m.other_user(user_id).map(str::to_string))
            .collect();

        // Most recent positive swipe per distinct liker
        let mut latest: HashMap<String, SwipeRecord> = HashMap::new();
        for swipe in likes {
            if !swipe.kind.is_positive() || matched.contains(&swipe.user_id) {
                continue;
            }
            match latest.get(&swipe.user_id) {
                Some(existing) if existing.created_at >= swipe.created_at => {}
                _ => {
                    latest.insert(swipe.user_id.clone(), swipe);
                }
            }
        }

        let mut received = Vec::with_capacity(latest.len());
        for swipe in latest.into_values() {
            match self.store.get_profile(&swipe.user_id).await? {
                Some(user) => received.push(LikeReceived {
                    user,
                    kind: swipe.kind,
                    created_at: swipe.created_at,
                }),
                None => {
                    tracing::debug!("skipping like from {}: profile not found", swipe.user_id);
                }
            }
        }

        received.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::debug!("{} unique like(s) received by {}", received.len(), user_id);

        Ok(received)
    }
}
