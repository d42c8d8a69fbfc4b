//! Qualification tuning knobs and request parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;
pub const DEFAULT_FEATURE_WEIGHT: f32 = 0.7;
pub const DEFAULT_RATING_WEIGHT: f32 = 0.3;
pub const DEFAULT_MAX_VOCABULARY: usize = 5_000;
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("similarity threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f32),
    #[error("{name} must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f32 },
    #[error("feature and rating weights must not both be zero")]
    ZeroTotalWeight,
    #[error("top_n must be at least 1")]
    InvalidTopN,
    #[error("vocabulary cap must be at least 1")]
    InvalidVocabularyCap,
}

/// Scoring parameters shared by every request unless the query overrides
/// them.
///
/// Weights are used as given rather than re-normalized, so a caller who
/// raises one without lowering the other shifts the rank scale upward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualificationConfig {
    pub similarity_threshold: f32,
    pub feature_weight: f32,
    pub rating_weight: f32,
    pub max_vocabulary_size: usize,
    pub top_n: usize,
}

impl Default for QualificationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            feature_weight: DEFAULT_FEATURE_WEIGHT,
            rating_weight: DEFAULT_RATING_WEIGHT,
            max_vocabulary_size: DEFAULT_MAX_VOCABULARY,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl QualificationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.similarity_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::InvalidThreshold(t));
        }
        for (name, value) in [
            ("feature_weight", self.feature_weight),
            ("rating_weight", self.rating_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if self.feature_weight + self.rating_weight <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        if self.max_vocabulary_size == 0 {
            return Err(ConfigError::InvalidVocabularyCap);
        }
        Ok(())
    }
}

/// One qualification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationQuery {
    /// Substring filter on vendor categories. `None`, blank or `"all"`
    /// keeps the whole corpus.
    #[serde(default)]
    pub software_category: Option<String>,
    /// Capability phrases the caller wants covered.
    pub capabilities: Vec<String>,
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f32,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Attach a per-vendor score breakdown and a methodology note.
    #[serde(default)]
    pub include_explanations: bool,
}

fn default_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl QualificationQuery {
    #[must_use]
    pub fn new(capabilities: Vec<String>) -> Self {
        Self {
            software_category: None,
            capabilities,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            include_explanations: false,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.software_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_explanations(mut self, include: bool) -> Self {
        self.include_explanations = include;
        self
    }
}
