//! Wander Match - hybrid compatibility matching engine for the Wander travel app
//!
//! This library scores candidate travelers against a user with six independent
//! similarity signals, re-ranks the result with a diversity-aware (MMR)
//! strategy, and manages the swipe -> mutual-like -> match state transition
//! with deduplication and idempotency guarantees.
//!
//! Persistence, transport and UI are external collaborators: the engine talks
//! to storage only through the [`MatchStore`] trait and exposes its operations
//! through [`MatchingService`].

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, CompatibilityScorer, Matcher};
pub use crate::models::{
    CompatibilityScore, FindMatchesRequest, FindMatchesResult, Match, MatchCategory, MatchFilters,
    RecordSwipeRequest, SwipeKind, SwipeOutcome, SwipeRecord, UserProfile,
};
pub use crate::services::{MatchStore, MatchingError, MatchingService, MemoryStore};
