use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchRecommendation, MatchStatus, SwipeKind, UserProfile};

/// Result of a `find_matches` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResult {
    pub recommendations: Vec<MatchRecommendation>,
    /// Pool size before filtering, for observability.
    pub total_candidates: usize,
}

/// Outcome of recording a swipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeOutcome {
    pub matched: bool,
    pub match_id: Option<String>,
}

impl SwipeOutcome {
    pub fn no_match() -> Self {
        Self {
            matched: false,
            match_id: None,
        }
    }

    pub fn matched(match_id: String) -> Self {
        Self {
            matched: true,
            match_id: Some(match_id),
        }
    }
}

/// A match as seen by one of its participants: the caller's own unread
/// counter is projected out of the per-user map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: String,
    pub users: [String; 2],
    pub other_user_id: String,
    pub status: MatchStatus,
    pub matched_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
}

/// One entry of a "likes received" listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeReceived {
    pub user: UserProfile,
    pub kind: SwipeKind,
    pub created_at: DateTime<Utc>,
}
