// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityScore, ComponentWeights, Coordinates, FeatureWeights, Match, MatchCategory,
    MatchFilters, MatchRecommendation, MatchStatus, ScoreBreakdown, SwipeKind, SwipeRecord,
    UserHistory, UserProfile, BASE_RATING,
};
pub use requests::{FindMatchesRequest, RecordSwipeRequest};
pub use responses::{FindMatchesResult, LikeReceived, MatchView, SwipeOutcome};
