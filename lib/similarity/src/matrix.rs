//! Capability-by-feature similarity scoring.

use vendorq_core::SparseVector;

/// One capability/feature pair whose score cleared the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureMatch {
    pub capability_idx: usize,
    pub feature_idx: usize,
    pub score: f32,
}

/// Dense row-major matrix of cosine scores, capabilities as rows and
/// flattened features as columns.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Vec<f32>,
    capability_count: usize,
    feature_count: usize,
}

impl SimilarityMatrix {
    /// Score every capability against every feature.
    ///
    /// Expects unit-length vectors as produced by the vectorizer, so the
    /// dot product is the cosine. Scores are clamped into [0, 1] to keep
    /// float drift out of downstream threshold checks.
    #[must_use]
    pub fn compute(capabilities: &[SparseVector], features: &[SparseVector]) -> Self {
        let mut scores = Vec::with_capacity(capabilities.len() * features.len());
        for cap in capabilities {
            for feat in features {
                scores.push(cap.dot(feat).clamp(0.0, 1.0));
            }
        }
        Self {
            scores,
            capability_count: capabilities.len(),
            feature_count: features.len(),
        }
    }

    #[inline]
    #[must_use]
    pub fn capability_count(&self) -> usize {
        self.capability_count
    }

    #[inline]
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Score for one capability/feature pair.
    #[inline]
    #[must_use]
    pub fn score(&self, capability_idx: usize, feature_idx: usize) -> f32 {
        self.scores[capability_idx * self.feature_count + feature_idx]
    }

    /// All pairs scoring at or above `threshold`, in (capability, feature)
    /// order.
    #[must_use]
    pub fn matches(&self, threshold: f32) -> Vec<FeatureMatch> {
        let mut matches = Vec::new();
        for cap in 0..self.capability_count {
            for feat in 0..self.feature_count {
                let score = self.score(cap, feat);
                if score >= threshold {
                    matches.push(FeatureMatch {
                        capability_idx: cap,
                        feature_idx: feat,
                        score,
                    });
                }
            }
        }
        matches
    }
}
