use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Match, SwipeRecord, UserProfile};

/// Errors surfaced by a persistence backend.
///
/// This crate never retries or remaps them; they propagate to the caller
/// unchanged so the transport layer can decide what to do.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Result of an atomic match insertion.
#[derive(Debug, Clone)]
pub enum MatchInsert {
    /// No match existed for the pair; this one was written.
    Created(Match),
    /// A match for the unordered pair already existed; nothing was written.
    Existing(Match),
}

impl MatchInsert {
    pub fn into_match(self) -> Match {
        match self {
            MatchInsert::Created(m) | MatchInsert::Existing(m) => m,
        }
    }
}

/// Persistence interface the matching engine consumes.
///
/// Backed by a generic queryable document store in production; an in-memory
/// implementation ships for tests and local development. Profile writes are
/// deliberately absent: profiles belong to the profile-management service.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Fetch one profile by user id.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Fetch the full candidate profile pool.
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError>;

    /// All active swipes authored by a user.
    async fn swipes_by_source(&self, user_id: &str) -> Result<Vec<SwipeRecord>, StoreError>;

    /// All active swipes targeting a user.
    async fn swipes_by_target(&self, user_id: &str) -> Result<Vec<SwipeRecord>, StoreError>;

    /// Every active swipe, for the duplicate-reconciliation sweep.
    async fn all_swipes(&self) -> Result<Vec<SwipeRecord>, StoreError>;

    async fn insert_swipe(&self, record: SwipeRecord) -> Result<(), StoreError>;

    /// Batch-delete swipes by record id; returns how many were removed.
    async fn delete_swipes(&self, ids: &[String]) -> Result<u64, StoreError>;

    /// All matches whose participant set contains the user.
    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<Match>, StoreError>;

    /// Insert a match unless one already exists for the unordered pair.
    ///
    /// Implementations must make this atomic (uniqueness constraint on the
    /// canonical pair key, or a transactional read-modify-write) so
    /// concurrent mutual-like completions cannot double-insert.
    async fn insert_match(&self, m: Match) -> Result<MatchInsert, StoreError>;
}
