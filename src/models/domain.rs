use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Baseline ELO-style rating for users without one.
pub const BASE_RATING: f64 = 1500.0;

/// Geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// User profile with matching attributes.
///
/// Owned and mutated by the external profile-management service; this crate
/// only reads it. Optional fields are absorbed by documented scoring defaults
/// and never cause an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub travel_style: Vec<String>,
    #[serde(default)]
    pub next_destination: String,
    #[serde(default)]
    pub travel_dates: Option<String>,
    #[serde(default)]
    pub bucket_list: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub elo_rating: Option<f64>,
}

impl UserProfile {
    /// ELO-style rating, defaulting to the baseline.
    pub fn rating(&self) -> f64 {
        self.elo_rating.unwrap_or(BASE_RATING)
    }

    /// True when the profile carries usable travel-date information.
    pub fn has_travel_dates(&self) -> bool {
        self.travel_dates
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// Kind of a directed swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeKind {
    Like,
    Dislike,
    Superlike,
}

impl SwipeKind {
    /// Likes and superlikes count toward mutual matching.
    pub fn is_positive(self) -> bool {
        matches!(self, SwipeKind::Like | SwipeKind::Superlike)
    }
}

/// Directed swipe edge. Never mutated; a re-swipe on the same ordered pair
/// supersedes (deletes) the prior record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRecord {
    pub id: String,
    pub user_id: String,
    pub target_user_id: String,
    pub kind: SwipeKind,
    pub created_at: DateTime<Utc>,
}

impl SwipeRecord {
    pub fn new(user_id: &str, target_user_id: &str, kind: SwipeKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            target_user_id: target_user_id.to_string(),
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Match status. `Accepted` is the only status this crate produces; the
/// others exist for records written by the wider app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Accepted,
    Pending,
    Declined,
    Blocked,
}

/// Mutual match between two users. At most one exists per unordered pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub users: [String; 2],
    pub status: MatchStatus,
    pub matched_at: DateTime<Utc>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_counts: HashMap<String, u32>,
}

impl Match {
    /// New accepted match with both unread counters at zero.
    pub fn new(user_a: &str, user_b: &str) -> Self {
        let mut unread_counts = HashMap::new();
        unread_counts.insert(user_a.to_string(), 0);
        unread_counts.insert(user_b.to_string(), 0);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            users: [user_a.to_string(), user_b.to_string()],
            status: MatchStatus::Accepted,
            matched_at: Utc::now(),
            last_message_at: None,
            unread_counts,
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u == user_id)
    }

    /// The participant that is not `user_id`, if `user_id` participates.
    pub fn other_user(&self, user_id: &str) -> Option<&str> {
        if !self.involves(user_id) {
            return None;
        }
        self.users.iter().find(|u| *u != user_id).map(String::as_str)
    }

    /// Canonical key for the unordered pair, used by stores to enforce
    /// match uniqueness.
    pub fn pair_key(user_a: &str, user_b: &str) -> String {
        if user_a <= user_b {
            format!("{}|{}", user_a, user_b)
        } else {
            format!("{}|{}", user_b, user_a)
        }
    }
}

/// Per-user interaction aggregate, derived from the swipe and match logs.
#[derive(Debug, Clone, Default)]
pub struct UserHistory {
    pub user_id: String,
    /// Target user id -> kind of the active swipe toward them.
    pub swipes: HashMap<String, SwipeKind>,
    /// User ids this user already matched with.
    pub matches: HashSet<String>,
}

impl UserHistory {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.swipes.is_empty()
    }

    /// Share of positive swipes among all swipes; `None` on an empty history
    /// (the cold-start case).
    pub fn like_ratio(&self) -> Option<f64> {
        if self.swipes.is_empty() {
            return None;
        }
        let liked = self.swipes.values().filter(|k| k.is_positive()).count();
        Some(liked as f64 / self.swipes.len() as f64)
    }
}

/// Display-scaled (x100) per-signal breakdown of a compatibility score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub content_based: u32,
    pub collaborative: u32,
    pub graph_similarity: u32,
    pub text_similarity: u32,
    pub temporal_relevance: u32,
    pub diversity_bonus: u32,
}

/// Coarse match-quality bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Perfect,
    Excellent,
    Good,
    Potential,
    Exploratory,
}

impl MatchCategory {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 0.9 {
            MatchCategory::Perfect
        } else if overall >= 0.8 {
            MatchCategory::Excellent
        } else if overall >= 0.7 {
            MatchCategory::Good
        } else if overall >= 0.6 {
            MatchCategory::Potential
        } else {
            MatchCategory::Exploratory
        }
    }
}

/// Derived compatibility result for one (user, candidate) pair. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityScore {
    pub overall: f64,
    pub confidence: f64,
    pub breakdown: ScoreBreakdown,
    /// Mean of both users' ELO-style ratings. No rating update happens here.
    pub rating: u32,
    pub reasons: Vec<String>,
    pub category: MatchCategory,
}

/// One entry of a ranked match result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecommendation {
    pub user: UserProfile,
    pub score: CompatibilityScore,
    pub rank: usize,
    pub category: MatchCategory,
}

/// Hard filters applied to the candidate pool before scoring.
///
/// Unset fields impose no constraint. Candidates missing the data a filter
/// needs (age, coordinates) are kept rather than excluded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFilters {
    #[serde(default)]
    pub age_range: Option<(u8, u8)>,
    #[serde(default)]
    pub max_distance_km: Option<f64>,
    #[serde(default)]
    pub verified_only: bool,
    #[serde(default)]
    pub travel_styles: Vec<String>,
    #[serde(default)]
    pub destinations: Vec<String>,
}

/// Weights combining the six compatibility signals. Sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ComponentWeights {
    pub content_based: f64,
    pub collaborative: f64,
    pub graph_similarity: f64,
    pub text_similarity: f64,
    pub temporal_relevance: f64,
    pub diversity_bonus: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            content_based: 0.35,
            collaborative: 0.25,
            graph_similarity: 0.15,
            text_similarity: 0.15,
            temporal_relevance: 0.05,
            diversity_bonus: 0.05,
        }
    }
}

/// Per-feature weights inside the content-based signal. Sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct FeatureWeights {
    pub destination: f64,
    pub travel_style: f64,
    pub interests: f64,
    pub location: f64,
    pub age: f64,
    pub personality: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            destination: 0.25,
            travel_style: 0.20,
            interests: 0.20,
            location: 0.15,
            age: 0.10,
            personality: 0.10,
        }
    }
}
