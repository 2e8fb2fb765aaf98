use rand::Rng;

use crate::core::distance::haversine_distance;
use crate::core::similarity::{
    age_similarity, distance_decay, extract_traits, jaccard_similarity, profile_text,
    taste_profile, tokenize,
};
use crate::models::{
    CompatibilityScore, ComponentWeights, FeatureWeights, MatchCategory, ScoreBreakdown,
    UserHistory, UserProfile,
};

/// Radius of the "same local area" bonus in the graph signal.
const LOCAL_AREA_KM: f64 = 50.0;

/// Exploration parameters for the stochastic diversity-bonus signal.
#[derive(Debug, Clone, Copy)]
pub struct ExplorationParams {
    /// Probability of an exploration roll.
    pub epsilon: f64,
    /// Minimum diversity for an exploration boost to apply.
    pub diversity_threshold: f64,
    /// Signal value when the boost applies.
    pub boost: f64,
}

impl Default for ExplorationParams {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            diversity_threshold: 0.6,
            boost: 0.8,
        }
    }
}

/// Raw values of the six signals, each in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct SignalValues {
    pub content_based: f64,
    pub collaborative: f64,
    pub graph_similarity: f64,
    pub text_similarity: f64,
    pub temporal_relevance: f64,
    pub diversity_bonus: f64,
}

/// Hybrid compatibility scorer.
///
/// Combines six independent signals into one weighted score with a
/// confidence estimate, a coarse combined rating and human-readable reasons.
/// Every optional profile field has a documented default, so scoring a
/// sparse pair never fails. The diversity-bonus signal is stochastic; the
/// caller supplies the random source so results can be made reproducible.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    components: ComponentWeights,
    features: FeatureWeights,
    exploration: ExplorationParams,
}

impl CompatibilityScorer {
    pub fn new(
        components: ComponentWeights,
        features: FeatureWeights,
        exploration: ExplorationParams,
    ) -> Self {
        Self {
            components,
            features,
            exploration,
        }
    }

    /// Score `candidate` against `user` given the user's interaction history.
    pub fn score<R: Rng>(
        &self,
        user: &UserProfile,
        candidate: &UserProfile,
        history: &UserHistory,
        rng: &mut R,
    ) -> CompatibilityScore {
        let signals = SignalValues {
            content_based: self.content_based_score(user, candidate),
            collaborative: self.collaborative_score(history),
            graph_similarity: self.graph_score(user, candidate),
            text_similarity: self.text_score(user, candidate),
            temporal_relevance: self.temporal_score(user, candidate),
            diversity_bonus: self.diversity_bonus(user, candidate, rng),
        };

        let overall = (signals.content_based * self.components.content_based
            + signals.collaborative * self.components.collaborative
            + signals.graph_similarity * self.components.graph_similarity
            + signals.text_similarity * self.components.text_similarity
            + signals.temporal_relevance * self.components.temporal_relevance
            + signals.diversity_bonus * self.components.diversity_bonus)
            .clamp(0.0, 1.0);

        let confidence = self.confidence(user, candidate, history);
        let rating = (user.rating() + candidate.rating()) / 2.0;
        let reasons = self.reasons(candidate, &signals);

        CompatibilityScore {
            overall,
            confidence,
            breakdown: ScoreBreakdown {
                content_based: display_scale(signals.content_based),
                collaborative: display_scale(signals.collaborative),
                graph_similarity: display_scale(signals.graph_similarity),
                text_similarity: display_scale(signals.text_similarity),
                temporal_relevance: display_scale(signals.temporal_relevance),
                diversity_bonus: display_scale(signals.diversity_bonus),
            },
            rating: rating.round() as u32,
            reasons,
            category: MatchCategory::from_score(overall),
        }
    }

    /// Content-based signal: weighted sum of per-feature similarities.
    pub fn content_based_score(&self, user: &UserProfile, candidate: &UserProfile) -> f64 {
        let destination = destination_similarity(&user.next_destination, &candidate.next_destination);
        let travel_style = jaccard_similarity(&user.travel_style, &candidate.travel_style);
        let interests = jaccard_similarity(&user.interests, &candidate.interests);
        let location = location_similarity(user, candidate);
        let age = age_similarity(user.age, candidate.age);
        let personality = personality_similarity(&user.bio, &candidate.bio);

        destination * self.features.destination
            + travel_style * self.features.travel_style
            + interests * self.features.interests
            + location * self.features.location
            + age * self.features.age
            + personality * self.features.personality
    }

    /// Collaborative signal: like-ratio proxy over the user's own swipe
    /// history, neutral 0.5 on cold start.
    pub fn collaborative_score(&self, history: &UserHistory) -> f64 {
        history.like_ratio().unwrap_or(0.5)
    }

    /// Graph signal: travel-community, local-area and style-cluster bonuses.
    pub fn graph_score(&self, user: &UserProfile, candidate: &UserProfile) -> f64 {
        let mut score = 0.0;

        if in_same_travel_community(&user.next_destination, &candidate.next_destination) {
            score += 0.3;
        }

        if let (Some(a), Some(b)) = (user.coordinates, candidate.coordinates) {
            if haversine_distance(a, b) < LOCAL_AREA_KM {
                score += 0.2;
            }
        }

        score += jaccard_similarity(&user.travel_style, &candidate.travel_style) * 0.5;

        score.min(1.0)
    }

    /// Text signal: Jaccard over pooled profile tokens, neutral 0.5 when
    /// either side has no extractable text.
    pub fn text_score(&self, user: &UserProfile, candidate: &UserProfile) -> f64 {
        let tokens_a = tokenize(&profile_text(user));
        let tokens_b = tokenize(&profile_text(candidate));

        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.5;
        }

        jaccard_similarity(&tokens_a, &tokens_b)
    }

    /// Temporal signal: base 0.5, travel-date alignment bonus, flat
    /// recent-activity bonus.
    pub fn temporal_score(&self, user: &UserProfile, candidate: &UserProfile) -> f64 {
        let mut score: f64 = 0.5;

        if user.has_travel_dates() && candidate.has_travel_dates() {
            score += 0.3;
        }

        // Both users assumed recently active
        score += 0.2;

        score.min(1.0)
    }

    /// Diversity bonus: epsilon-greedy exploration boost for sufficiently
    /// dissimilar candidates, neutral 0.5 otherwise.
    pub fn diversity_bonus<R: Rng>(
        &self,
        user: &UserProfile,
        candidate: &UserProfile,
        rng: &mut R,
    ) -> f64 {
        let diversity =
            1.0 - jaccard_similarity(&taste_profile(user), &taste_profile(candidate));

        let should_explore = rng.gen::<f64>() < self.exploration.epsilon;
        if should_explore && diversity > self.exploration.diversity_threshold {
            return self.exploration.boost;
        }

        0.5
    }

    /// Confidence in the score, from profile completeness, history volume
    /// and shared data dimensions.
    pub fn confidence(
        &self,
        user: &UserProfile,
        candidate: &UserProfile,
        history: &UserHistory,
    ) -> f64 {
        let mut confidence = 0.0;

        let completeness =
            (profile_completeness(user) + profile_completeness(candidate)) / 2.0;
        confidence += completeness * 0.4;

        if history.swipes.len() > 10 {
            confidence += 0.3;
        } else if !history.swipes.is_empty() {
            confidence += 0.1;
        }

        let shared = shared_data_dimensions(user, candidate);
        confidence += (shared as f64 / 10.0).min(0.3);

        confidence.min(1.0)
    }

    /// Human-readable reasons for the strongest signals (top three, each
    /// above 0.7), with a generic fallback.
    fn reasons(&self, candidate: &UserProfile, signals: &SignalValues) -> Vec<String> {
        let mut labeled = [
            (signals.content_based, Signal::ContentBased),
            (signals.collaborative, Signal::Collaborative),
            (signals.graph_similarity, Signal::GraphSimilarity),
            (signals.text_similarity, Signal::TextSimilarity),
            (signals.temporal_relevance, Signal::TemporalRelevance),
            (signals.diversity_bonus, Signal::DiversityBonus),
        ];
        labeled.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let reasons: Vec<String> = labeled
            .iter()
            .take(3)
            .filter(|(value, _)| *value > 0.7)
            .map(|(_, signal)| signal.reason(candidate))
            .collect();

        if reasons.is_empty() {
            return vec!["Compatible travel preferences".to_string()];
        }
        reasons
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::new(
            ComponentWeights::default(),
            FeatureWeights::default(),
            ExplorationParams::default(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    ContentBased,
    Collaborative,
    GraphSimilarity,
    TextSimilarity,
    TemporalRelevance,
    DiversityBonus,
}

impl Signal {
    fn reason(self, candidate: &UserProfile) -> String {
        match self {
            Signal::ContentBased => "Strong match on travel preferences and interests".to_string(),
            Signal::Collaborative => {
                format!("Users with similar taste also liked {}", candidate.name)
            }
            Signal::GraphSimilarity => "Part of the same travel community".to_string(),
            Signal::TextSimilarity => "Similar personality and travel style".to_string(),
            Signal::TemporalRelevance => "Planning trips around the same time".to_string(),
            Signal::DiversityBonus => "Offers a fresh perspective on travel".to_string(),
        }
    }
}

/// Scale a [0, 1] signal to a 0-100 display integer.
#[inline]
fn display_scale(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

/// Destination similarity: exact match 1.0, shared token 0.7, neutral 0.3
/// otherwise (avoids zero-starving sparse destination data).
pub fn destination_similarity(dest_a: &str, dest_b: &str) -> f64 {
    let a = dest_a.trim().to_lowercase();
    let b = dest_b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.3;
    }
    if a == b {
        return 1.0;
    }

    let tokens_a = tokenize(&a);
    let tokens_b = tokenize(&b);
    if tokens_a.iter().any(|t| tokens_b.contains(t)) {
        return 0.7;
    }

    0.3
}

/// Sigmoid distance decay over both users' coordinates, neutral 0.5 when
/// either side has none.
pub fn location_similarity(user: &UserProfile, candidate: &UserProfile) -> f64 {
    match (user.coordinates, candidate.coordinates) {
        (Some(a), Some(b)) => distance_decay(haversine_distance(a, b)),
        _ => 0.5,
    }
}

/// Jaccard over trait keywords extracted from both bios.
pub fn personality_similarity(bio_a: &str, bio_b: &str) -> f64 {
    let traits_a = extract_traits(bio_a);
    let traits_b = extract_traits(bio_b);
    jaccard_similarity(&traits_a, &traits_b)
}

/// Coarse travel community: first token of the next destination matches,
/// case-insensitive.
pub fn in_same_travel_community(dest_a: &str, dest_b: &str) -> bool {
    let first = |d: &str| {
        d.trim()
            .to_lowercase()
            .split_whitespace()
            .next()
            .map(str::to_string)
    };
    match (first(dest_a), first(dest_b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Profile completeness: 0.2 per present field among bio (> 20 chars),
/// interests (>= 3), travel styles (>= 2), coordinates, destination.
pub fn profile_completeness(user: &UserProfile) -> f64 {
    let mut score = 0.0;
    if user.bio.len() > 20 {
        score += 0.2;
    }
    if user.interests.len() >= 3 {
        score += 0.2;
    }
    if user.travel_style.len() >= 2 {
        score += 0.2;
    }
    if user.coordinates.is_some() {
        score += 0.2;
    }
    if !user.next_destination.is_empty() {
        score += 0.2;
    }
    score
}

/// Count of data dimensions populated on both sides.
fn shared_data_dimensions(user: &UserProfile, candidate: &UserProfile) -> usize {
    let mut count = 0;
    if !user.interests.is_empty() && !candidate.interests.is_empty() {
        count += 1;
    }
    if !user.travel_style.is_empty() && !candidate.travel_style.is_empty() {
        count += 1;
    }
    if user.coordinates.is_some() && candidate.coordinates.is_some() {
        count += 1;
    }
    if !user.next_destination.is_empty() && !candidate.next_destination.is_empty() {
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, SwipeKind};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn traveler(id: &str, destination: &str, interests: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: format!("User {}", id),
            age: Some(28),
            location: "Berlin, Germany".to_string(),
            coordinates: Some(Coordinates {
                lat: 52.52,
                lng: 13.405,
            }),
            bio: "Always ready for the next adventure, love to explore and meet people"
                .to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            travel_style: vec!["backpacker".to_string(), "foodie".to_string()],
            next_destination: destination.to_string(),
            travel_dates: Some("2026-09".to_string()),
            bucket_list: vec![],
            verified: true,
            elo_rating: None,
        }
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_score_within_bounds() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon, Portugal", &["hiking", "food", "museums"]);
        let b = traveler("b", "Lisbon, Portugal", &["food", "surfing"]);

        let score = scorer.score(&a, &b, &UserHistory::new("a"), &mut rng());

        assert!((0.0..=1.0).contains(&score.overall));
        assert!((0.0..=1.0).contains(&score.confidence));
        for component in [
            score.breakdown.content_based,
            score.breakdown.collaborative,
            score.breakdown.graph_similarity,
            score.breakdown.text_similarity,
            score.breakdown.temporal_relevance,
            score.breakdown.diversity_bonus,
        ] {
            assert!(component <= 100);
        }
    }

    #[test]
    fn test_score_reproducible_with_same_seed() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon", &["hiking"]);
        let b = traveler("b", "Tokyo", &["surfing"]);
        let history = UserHistory::new("a");

        let first = scorer.score(&a, &b, &history, &mut rng());
        let second = scorer.score(&a, &b, &history, &mut rng());

        assert_eq!(first.overall, second.overall);
        assert_eq!(first.breakdown.diversity_bonus, second.breakdown.diversity_bonus);
    }

    #[test]
    fn test_destination_similarity_tiers() {
        assert_eq!(destination_similarity("Lisbon, Portugal", "Lisbon, Portugal"), 1.0);
        assert_eq!(destination_similarity("Lisbon, Portugal", "Porto, Portugal"), 0.7);
        assert_eq!(destination_similarity("Lisbon, Portugal", "Tokyo, Japan"), 0.3);
        assert_eq!(destination_similarity("", "Tokyo, Japan"), 0.3);
    }

    #[test]
    fn test_collaborative_cold_start_is_neutral() {
        let scorer = CompatibilityScorer::default();
        assert_eq!(scorer.collaborative_score(&UserHistory::new("a")), 0.5);
    }

    #[test]
    fn test_collaborative_uses_like_ratio() {
        let scorer = CompatibilityScorer::default();
        let mut history = UserHistory::new("a");
        history.swipes.insert("b".to_string(), SwipeKind::Like);
        history.swipes.insert("c".to_string(), SwipeKind::Like);
        history.swipes.insert("d".to_string(), SwipeKind::Dislike);
        history.swipes.insert("e".to_string(), SwipeKind::Dislike);

        assert!((scorer.collaborative_score(&history) - 0.5).abs() < 1e-9);

        history.swipes.insert("f".to_string(), SwipeKind::Superlike);
        assert!((scorer.collaborative_score(&history) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_graph_score_community_and_proximity() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon coast", &["hiking"]);
        let b = traveler("b", "Lisbon city breaks", &["surfing"]);

        // Same community (+0.3), same local area (+0.2), identical styles (+0.5)
        let score = scorer.graph_score(&a, &b);
        assert!((score - 1.0).abs() < 1e-9);

        let mut far = traveler("c", "Tokyo", &["surfing"]);
        far.coordinates = Some(Coordinates {
            lat: 35.68,
            lng: 139.65,
        });
        far.travel_style = vec!["luxury".to_string()];
        assert_eq!(scorer.graph_score(&a, &far), 0.0);
    }

    #[test]
    fn test_text_score_neutral_without_text() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon", &["hiking"]);
        let mut blank = traveler("b", "", &[]);
        blank.bio = String::new();
        blank.travel_style = vec![];
        blank.location = String::new();

        assert_eq!(scorer.text_score(&a, &blank), 0.5);
    }

    #[test]
    fn test_temporal_score_with_and_without_dates() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon", &["hiking"]);
        let b = traveler("b", "Tokyo", &["surfing"]);
        assert!((scorer.temporal_score(&a, &b) - 1.0).abs() < 1e-9);

        let mut no_dates = b.clone();
        no_dates.travel_dates = None;
        assert!((scorer.temporal_score(&a, &no_dates) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_diversity_bonus_is_neutral_or_boost() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon", &["hiking", "museums"]);
        let mut b = traveler("b", "Tokyo", &["surfing", "diving"]);
        b.travel_style = vec!["luxury".to_string()];

        let mut r = rng();
        for _ in 0..100 {
            let bonus = scorer.diversity_bonus(&a, &b, &mut r);
            assert!(bonus == 0.5 || bonus == 0.8);
        }
    }

    #[test]
    fn test_similar_pair_never_gets_exploration_boost() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon", &["hiking", "food"]);
        let b = traveler("b", "Lisbon", &["hiking", "food"]);

        let mut r = rng();
        for _ in 0..100 {
            assert_eq!(scorer.diversity_bonus(&a, &b, &mut r), 0.5);
        }
    }

    #[test]
    fn test_confidence_grows_with_history() {
        let scorer = CompatibilityScorer::default();
        let a = traveler("a", "Lisbon", &["hiking", "food", "museums"]);
        let b = traveler("b", "Tokyo", &["surfing", "food", "art"]);

        let empty = UserHistory::new("a");
        let mut small = UserHistory::new("a");
        small.swipes.insert("x".to_string(), SwipeKind::Like);
        let mut large = UserHistory::new("a");
        for i in 0..12 {
            large.swipes.insert(format!("u{}", i), SwipeKind::Like);
        }

        let base = scorer.confidence(&a, &b, &empty);
        let with_small = scorer.confidence(&a, &b, &small);
        let with_large = scorer.confidence(&a, &b, &large);

        assert!(with_small > base);
        assert!(with_large > with_small);
        assert!(with_large <= 1.0);
    }

    #[test]
    fn test_reasons_fall_back_to_generic() {
        // Exploration off so the stochastic signal stays at its neutral 0.5
        let scorer = CompatibilityScorer::new(
            ComponentWeights::default(),
            FeatureWeights::default(),
            ExplorationParams {
                epsilon: 0.0,
                ..Default::default()
            },
        );
        let mut a = traveler("a", "", &[]);
        a.bio = String::new();
        a.travel_style = vec![];
        a.travel_dates = None;
        a.coordinates = None;
        a.location = String::new();
        let mut b = a.clone();
        b.id = "b".to_string();

        let score = scorer.score(&a, &b, &UserHistory::new("a"), &mut rng());
        assert_eq!(score.reasons, vec!["Compatible travel preferences".to_string()]);
    }

    #[test]
    fn test_rating_is_mean_of_elo() {
        let scorer = CompatibilityScorer::default();
        let mut a = traveler("a", "Lisbon", &["hiking"]);
        let mut b = traveler("b", "Tokyo", &["surfing"]);
        a.elo_rating = Some(1600.0);
        b.elo_rating = Some(1400.0);

        let score = scorer.score(&a, &b, &UserHistory::new("a"), &mut rng());
        assert_eq!(score.rating, 1500);
    }
}
