use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::scoring::ExplorationParams;
use crate::models::{ComponentWeights, FeatureWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    /// Fixed exploration seed; unset means a fresh entropy seed per call.
    #[serde(default)]
    pub exploration_seed: Option<u64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            exploration_seed: None,
        }
    }
}

fn default_limit() -> u16 {
    20
}
fn default_max_limit() -> u16 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub components: ComponentWeightsConfig,
    #[serde(default)]
    pub features: FeatureWeightsConfig,
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    #[serde(default = "default_epsilon")]
    pub exploration_epsilon: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            components: ComponentWeightsConfig::default(),
            features: FeatureWeightsConfig::default(),
            lambda: default_lambda(),
            exploration_epsilon: default_epsilon(),
        }
    }
}

fn default_lambda() -> f64 {
    0.7
}
fn default_epsilon() -> f64 {
    0.1
}

/// Weights of the six compatibility signals.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentWeightsConfig {
    #[serde(default = "default_content_based")]
    pub content_based: f64,
    #[serde(default = "default_collaborative")]
    pub collaborative: f64,
    #[serde(default = "default_graph_similarity")]
    pub graph_similarity: f64,
    #[serde(default = "default_text_similarity")]
    pub text_similarity: f64,
    #[serde(default = "default_temporal_relevance")]
    pub temporal_relevance: f64,
    #[serde(default = "default_diversity_bonus")]
    pub diversity_bonus: f64,
}

impl Default for ComponentWeightsConfig {
    fn default() -> Self {
        Self {
            content_based: default_content_based(),
            collaborative: default_collaborative(),
            graph_similarity: default_graph_similarity(),
            text_similarity: default_text_similarity(),
            temporal_relevance: default_temporal_relevance(),
            diversity_bonus: default_diversity_bonus(),
        }
    }
}

fn default_content_based() -> f64 {
    0.35
}
fn default_collaborative() -> f64 {
    0.25
}
fn default_graph_similarity() -> f64 {
    0.15
}
fn default_text_similarity() -> f64 {
    0.15
}
fn default_temporal_relevance() -> f64 {
    0.05
}
fn default_diversity_bonus() -> f64 {
    0.05
}

impl From<ComponentWeightsConfig> for ComponentWeights {
    fn from(c: ComponentWeightsConfig) -> Self {
        Self {
            content_based: c.content_based,
            collaborative: c.collaborative,
            graph_similarity: c.graph_similarity,
            text_similarity: c.text_similarity,
            temporal_relevance: c.temporal_relevance,
            diversity_bonus: c.diversity_bonus,
        }
    }
}

/// Per-feature weights inside the content-based signal.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureWeightsConfig {
    #[serde(default = "default_destination")]
    pub destination: f64,
    #[serde(default = "default_travel_style")]
    pub travel_style: f64,
    #[serde(default = "default_interests")]
    pub interests: f64,
    #[serde(default = "default_location")]
    pub location: f64,
    #[serde(default = "default_age")]
    pub age: f64,
    #[serde(default = "default_personality")]
    pub personality: f64,
}

impl Default for FeatureWeightsConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            travel_style: default_travel_style(),
            interests: default_interests(),
            location: default_location(),
            age: default_age(),
            personality: default_personality(),
        }
    }
}

fn default_destination() -> f64 {
    0.25
}
fn default_travel_style() -> f64 {
    0.20
}
fn default_interests() -> f64 {
    0.20
}
fn default_location() -> f64 {
    0.15
}
fn default_age() -> f64 {
    0.10
}
fn default_personality() -> f64 {
    0.10
}

impl From<FeatureWeightsConfig> for FeatureWeights {
    fn from(f: FeatureWeightsConfig) -> Self {
        Self {
            destination: f.destination,
            travel_style: f.travel_style,
            interests: f.interests,
            location: f.location,
            age: f.age,
            personality: f.personality,
        }
    }
}

impl ScoringSettings {
    /// Exploration parameters derived from this configuration.
    pub fn exploration(&self) -> ExplorationParams {
        ExplorationParams {
            epsilon: self.exploration_epsilon,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with WANDER_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. WANDER_MATCHING__DEFAULT_LIMIT -> matching.default_limit
            .add_source(
                Environment::with_prefix("WANDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("WANDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
