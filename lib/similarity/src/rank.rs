//! Vendor ranking over threshold-cleared feature matches.
//!
//! A vendor's similarity is the mean of its best score per matched
//! capability, so one feature matched by three capabilities counts three
//! times, and a capability matched by ten features counts once.

use crate::config::QualificationConfig;
use crate::matrix::FeatureMatch;
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use vendorq_core::{FlatFeature, VendorRecord};

/// One feature that cleared the threshold for some capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedFeature {
    pub capability: String,
    pub category: String,
    pub feature_name: String,
    pub description: String,
    pub similarity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

/// How one vendor's rank score was assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankExplanation {
    pub feature_weight: f32,
    pub rating_weight: f32,
    pub similarity_component: f32,
    pub rating_component: f32,
    pub final_score: f32,
    pub score_breakdown: String,
}

/// One qualified vendor with its scores and matched evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorResult {
    pub vendor_key: String,
    pub product_name: String,
    pub vendor: String,
    pub main_category: String,
    pub rating: f32,
    /// Mean of the best score per matched capability.
    pub similarity_score: f32,
    /// Best single feature score across all capabilities.
    pub max_similarity: f32,
    pub rank_score: f32,
    /// Capabilities this vendor covered, in query order.
    pub matched_capabilities: Vec<String>,
    /// Matched features, strongest first.
    pub matching_features: Vec<MatchedFeature>,
    pub total_matches: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<RankExplanation>,
}

/// Blends capability coverage with vendor rating into a rank score.
#[derive(Debug, Clone)]
pub struct VendorRanker {
    config: QualificationConfig,
}

impl VendorRanker {
    #[must_use]
    pub fn new(config: QualificationConfig) -> Self {
        Self { config }
    }

    /// Rank vendors by `feature_weight * similarity + rating_weight *
    /// rating / 5`, strongest first.
    ///
    /// Vendors without a single match are excluded. The sort is stable, so
    /// vendors with equal rank scores keep their corpus order.
    #[must_use]
    pub fn rank(
        &self,
        records: &[VendorRecord],
        features: &[FlatFeature],
        capabilities: &[String],
        matches: &[FeatureMatch],
    ) -> Vec<VendorResult> {
        let mut by_vendor: AHashMap<usize, Vec<FeatureMatch>> = AHashMap::new();
        for m in matches {
            let vendor_idx = features[m.feature_idx].vendor_idx;
            by_vendor.entry(vendor_idx).or_default().push(*m);
        }

        let mut grouped: Vec<(usize, Vec<FeatureMatch>)> = by_vendor.into_iter().collect();
        grouped.sort_by_key(|(vendor_idx, _)| *vendor_idx);

        let mut results = Vec::with_capacity(grouped.len());
        for (vendor_idx, vendor_matches) in grouped {
            let record = &records[vendor_idx];

            let mut best_per_capability: AHashMap<usize, f32> = AHashMap::new();
            let mut max_similarity: f32 = 0.0;
            for m in &vendor_matches {
                let best = best_per_capability.entry(m.capability_idx).or_insert(0.0);
                if m.score > *best {
                    *best = m.score;
                }
                max_similarity = max_similarity.max(m.score);
            }

            // Sum in capability order so the f32 mean is reproducible.
            let mut coverage_sum = 0.0f32;
            let mut matched_capabilities = Vec::with_capacity(best_per_capability.len());
            for (idx, capability) in capabilities.iter().enumerate() {
                if let Some(best) = best_per_capability.get(&idx) {
                    coverage_sum += best;
                    matched_capabilities.push(capability.clone());
                }
            }

            let similarity_score =
                (coverage_sum / best_per_capability.len() as f32).clamp(0.0, 1.0);
            let rank_score = self.config.feature_weight * similarity_score
                + self.config.rating_weight * normalized_rating(record.rating);

            let mut matching_features: Vec<MatchedFeature> = vendor_matches
                .iter()
                .map(|m| {
                    let feature = &features[m.feature_idx];
                    MatchedFeature {
                        capability: capabilities[m.capability_idx].clone(),
                        category: feature.category.clone(),
                        feature_name: feature.name.clone(),
                        description: feature.description.clone(),
                        similarity: m.score,
                        percent: feature.percent,
                        review_count: feature.review_count,
                    }
                })
                .collect();
            matching_features.sort_by(|a, b| {
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            results.push(VendorResult {
                vendor_key: record.vendor_key(),
                product_name: record.product_name.clone(),
                vendor: record.vendor.clone(),
                main_category: record.main_category.clone(),
                rating: record.rating,
                similarity_score,
                max_similarity,
                rank_score,
                total_matches: vendor_matches.len(),
                matched_capabilities,
                matching_features,
                explanation: None,
            });
        }

        results.sort_by_key(|r| Reverse(OrderedFloat(r.rank_score)));
        results
    }

    /// Attach a score breakdown to each result.
    pub fn add_explanations(&self, results: &mut [VendorResult]) {
        for result in results.iter_mut() {
            result.explanation = Some(self.explain(result));
        }
    }

    #[must_use]
    pub fn explain(&self, result: &VendorResult) -> RankExplanation {
        let similarity_component = self.config.feature_weight * result.similarity_score;
        let rating_component = self.config.rating_weight * normalized_rating(result.rating);
        RankExplanation {
            feature_weight: self.config.feature_weight,
            rating_weight: self.config.rating_weight,
            similarity_component,
            rating_component,
            final_score: result.rank_score,
            score_breakdown: format!(
                "{:.3} * {} + {:.3} * {} = {:.3}",
                result.similarity_score,
                self.config.feature_weight,
                normalized_rating(result.rating),
                self.config.rating_weight,
                result.rank_score
            ),
        }
    }
}

/// Map a 0..=5 rating onto [0, 1]. Missing or non-positive ratings
/// contribute nothing rather than erroring mid-ranking.
#[inline]
#[must_use]
pub fn normalized_rating(rating: f32) -> f32 {
    if rating > 0.0 {
        (rating / 5.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
