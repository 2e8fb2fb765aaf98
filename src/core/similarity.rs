//! Pure similarity primitives shared by scoring, filtering and ranking.

use std::collections::HashSet;

use crate::models::UserProfile;

/// Age assumed when a profile has none.
pub const DEFAULT_AGE: f64 = 25.0;

/// Standard deviation of the Gaussian age kernel, in years.
const AGE_SIGMA: f64 = 5.0;

/// Midpoint of the sigmoid distance decay, in kilometers.
const DISTANCE_MIDPOINT_KM: f64 = 50.0;

/// Scale of the sigmoid distance decay, in kilometers.
const DISTANCE_SCALE_KM: f64 = 20.0;

/// Keyword -> trait dictionary for bio-based personality extraction.
const TRAIT_KEYWORDS: &[(&str, &[&str])] = &[
    ("adventurous", &["adventure", "explore", "bold", "daring"]),
    ("social", &["social", "outgoing", "friendly", "people"]),
    ("creative", &["creative", "art", "music", "design"]),
    ("analytical", &["logical", "analytical", "technical", "data"]),
    ("empathetic", &["caring", "empathy", "kind", "compassion"]),
    ("ambitious", &["ambitious", "driven", "goal", "success"]),
];

/// Jaccard similarity between two string sets: |A ∩ B| / |A ∪ B|.
///
/// Returns 0.0 when both sets are empty.
pub fn jaccard_similarity<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();

    intersection as f64 / union as f64
}

/// Gaussian age similarity with sigma of 5 years; missing ages fall back to
/// the default of 25.
#[inline]
pub fn age_similarity(age_a: Option<u8>, age_b: Option<u8>) -> f64 {
    let a = age_a.map_or(DEFAULT_AGE, f64::from);
    let b = age_b.map_or(DEFAULT_AGE, f64::from);
    let diff = (a - b).abs();

    (-(diff * diff) / (2.0 * AGE_SIGMA * AGE_SIGMA)).exp()
}

/// Sigmoid decay of a distance in kilometers: ~1 when close, ~0.5 at the
/// 50 km midpoint, tending to 0 far away.
#[inline]
pub fn distance_decay(distance_km: f64) -> f64 {
    1.0 / (1.0 + ((distance_km - DISTANCE_MIDPOINT_KM) / DISTANCE_SCALE_KM).exp())
}

/// Lowercased word tokens of length > 2.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Personality traits detected in a free-text bio via keyword lookup.
pub fn extract_traits(bio: &str) -> Vec<&'static str> {
    let bio_lower = bio.to_lowercase();

    TRAIT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| bio_lower.contains(kw)))
        .map(|(trait_name, _)| *trait_name)
        .collect()
}

/// All searchable text of a profile pooled into one string.
pub fn profile_text(user: &UserProfile) -> String {
    [
        user.bio.as_str(),
        &user.interests.join(" "),
        &user.travel_style.join(" "),
        user.next_destination.as_str(),
        user.location.as_str(),
    ]
    .join(" ")
}

/// Interests and travel styles pooled for diversity comparisons.
pub fn taste_profile(user: &UserProfile) -> Vec<String> {
    user.interests
        .iter()
        .chain(user.travel_style.iter())
        .cloned()
        .collect()
}
