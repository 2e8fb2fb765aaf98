use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{MatchFilters, SwipeKind};

/// Request for a ranked candidate list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    pub filters: MatchFilters,
}

fn default_limit() -> u16 {
    20
}

/// Request to record one directed swipe.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordSwipeRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub target_user_id: String,
    pub kind: SwipeKind,
}
