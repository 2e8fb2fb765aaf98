use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Match, SwipeRecord, UserProfile};
use crate::services::store::{MatchInsert, MatchStore, StoreError};

/// In-memory document store, used by tests and local development.
///
/// Each collection lives behind its own `RwLock`. Match insertion checks the
/// canonical pair key while holding the write lock, which makes it the atomic
/// insert-if-absent primitive the engine relies on.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
    swipes: RwLock<HashMap<String, SwipeRecord>>,
    matches: RwLock<HashMap<String, Match>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a profile. Not part of `MatchStore`: profile writes
    /// belong to the profile-management service, this exists for seeding
    /// test and development data.
    pub async fn upsert_profile(&self, profile: UserProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile);
    }

    /// Number of stored swipe records (test helper).
    pub async fn swipe_count(&self) -> usize {
        self.swipes.read().await.len()
    }

    /// Number of stored matches (test helper).
    pub async fn match_count(&self) -> usize {
        self.matches.read().await.len()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }

    async fn swipes_by_source(&self, user_id: &str) -> Result<Vec<SwipeRecord>, StoreError> {
        Ok(self
            .swipes
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn swipes_by_target(&self, user_id: &str) -> Result<Vec<SwipeRecord>, StoreError> {
        Ok(self
            .swipes
            .read()
            .await
            .values()
            .filter(|s| s.target_user_id == user_id)
            .cloned()
            .collect())
    }

    async fn all_swipes(&self) -> Result<Vec<SwipeRecord>, StoreError> {
        Ok(self.swipes.read().await.values().cloned().collect())
    }

    async fn insert_swipe(&self, record: SwipeRecord) -> Result<(), StoreError> {
        self.swipes.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn delete_swipes(&self, ids: &[String]) -> Result<u64, StoreError> {
        let mut swipes = self.swipes.write().await;
        let mut removed = 0;
        for id in ids {
            if swipes.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<Match>, StoreError> {
        Ok(self
            .matches
            .read()
            .await
            .values()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect())
    }

    async fn insert_match(&self, m: Match) -> Result<MatchInsert, StoreError> {
        let mut matches = self.matches.write().await;

        let key = Match::pair_key(&m.users[0], &m.users[1]);
        let existing = matches
            .values()
            .find(|candidate| Match::pair_key(&candidate.users[0], &candidate.users[1]) == key)
            .cloned();

        if let Some(existing) = existing {
            return Ok(MatchInsert::Existing(existing));
        }

        matches.insert(m.id.clone(), m.clone());
        Ok(MatchInsert::Created(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwipeKind;

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: format!("User {}", id),
            age: Some(30),
            location: String::new(),
            coordinates: None,
            bio: String::new(),
            interests: vec![],
            travel_style: vec![],
            next_destination: String::new(),
            travel_dates: None,
            bucket_list: vec![],
            verified: false,
            elo_rating: None,
        }
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let store = MemoryStore::new();
        store.upsert_profile(profile("alice")).await;

        let fetched = store.get_profile("alice").await.unwrap();
        assert_eq!(fetched.unwrap().id, "alice");
        assert!(store.get_profile("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_swipe_queries_by_direction() {
        let store = MemoryStore::new();
        store
            .insert_swipe(SwipeRecord::new("alice", "bob", SwipeKind::Like))
            .await
            .unwrap();
        store
            .insert_swipe(SwipeRecord::new("bob", "carol", SwipeKind::Dislike))
            .await
            .unwrap();

        assert_eq!(store.swipes_by_source("alice").await.unwrap().len(), 1);
        assert_eq!(store.swipes_by_target("carol").await.unwrap().len(), 1);
        assert!(store.swipes_by_target("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_match_is_idempotent_per_pair() {
        let store = MemoryStore::new();

        let first = store.insert_match(Match::new("alice", "bob")).await.unwrap();
        assert!(matches!(first, MatchInsert::Created(_)));

        // Reversed id order still hits the same unordered pair
        let second = store.insert_match(Match::new("bob", "alice")).await.unwrap();
        match second {
            MatchInsert::Existing(existing) => {
                assert_eq!(existing.id, first.into_match().id);
            }
            MatchInsert::Created(_) => panic!("duplicate pair must not create a second match"),
        }

        assert_eq!(store.match_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_swipes_reports_removed_count() {
        let store = MemoryStore::new();
        let a = SwipeRecord::new("alice", "bob", SwipeKind::Like);
        let b = SwipeRecord::new("alice", "carol", SwipeKind::Like);
        let ids = vec![a.id.clone(), b.id.clone(), "missing".to_string()];
        store.insert_swipe(a).await.unwrap();
        store.insert_swipe(b).await.unwrap();

        let removed = store.delete_swipes(&ids).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.swipe_count().await, 0);
    }
}
