//! Qualification response assembly.

use crate::config::{QualificationConfig, QualificationQuery};
use crate::matrix::FeatureMatch;
use crate::rank::VendorResult;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use vendorq_core::FlatFeature;

/// The request as the engine resolved it, defaults filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEcho {
    pub software_category: Option<String>,
    pub capabilities: Vec<String>,
    pub similarity_threshold: f32,
    pub top_n: usize,
}

/// Ranked vendors plus truncation bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVendors {
    pub ranked_vendors: Vec<VendorResult>,
    /// Vendors that cleared the threshold, before truncation.
    pub total_qualified_vendors: usize,
    pub returned_vendors: usize,
}

/// Match counts for one capability across the candidate corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityMatches {
    pub capability: String,
    pub matched_features: usize,
    pub matched_vendors: usize,
    pub best_score: f32,
}

/// Corpus-level view of how the matching stage went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingAnalysis {
    pub candidate_vendors: usize,
    pub total_features: usize,
    pub total_matches: usize,
    pub per_capability: Vec<CapabilityMatches>,
}

impl MatchingAnalysis {
    #[must_use]
    pub fn compute(
        capabilities: &[String],
        features: &[FlatFeature],
        matches: &[FeatureMatch],
        candidate_vendors: usize,
    ) -> Self {
        let per_capability = capabilities
            .iter()
            .enumerate()
            .map(|(idx, capability)| {
                let mut matched_features = 0;
                let mut vendors: AHashSet<usize> = AHashSet::new();
                let mut best_score: f32 = 0.0;
                for m in matches.iter().filter(|m| m.capability_idx == idx) {
                    matched_features += 1;
                    vendors.insert(features[m.feature_idx].vendor_idx);
                    best_score = best_score.max(m.score);
                }
                CapabilityMatches {
                    capability: capability.clone(),
                    matched_features,
                    matched_vendors: vendors.len(),
                    best_score,
                }
            })
            .collect();

        Self {
            candidate_vendors,
            total_features: features.len(),
            total_matches: matches.len(),
            per_capability,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f32,
    pub max: f32,
}

/// Distribution of rank scores over the returned vendors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSummary {
    pub total_ranked: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_range: Option<ScoreRange>,
    pub avg_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_vendor: Option<String>,
    pub feature_weight: f32,
    pub rating_weight: f32,
}

impl RankingSummary {
    #[must_use]
    pub fn compute(results: &[VendorResult], config: &QualificationConfig) -> Self {
        let score_range = (!results.is_empty()).then(|| ScoreRange {
            // results are sorted, strongest first
            max: results[0].rank_score,
            min: results[results.len() - 1].rank_score,
        });
        let avg_score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.rank_score).sum::<f32>() / results.len() as f32
        };
        Self {
            total_ranked: results.len(),
            score_range,
            avg_score,
            top_vendor: results.first().map(|r| r.product_name.clone()),
            feature_weight: config.feature_weight,
            rating_weight: config.rating_weight,
        }
    }
}

/// Plain-language description of the scoring pipeline, attached when the
/// caller asks for explanations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Methodology {
    pub matching: String,
    pub ranking: String,
}

impl Methodology {
    #[must_use]
    pub fn describe(config: &QualificationConfig) -> Self {
        Self {
            matching: format!(
                "TF-IDF vectors over feature names and descriptions (unigrams and \
                 bigrams), cosine similarity, features matching a capability at or \
                 above {}",
                config.similarity_threshold
            ),
            ranking: format!(
                "rank score = {} * mean of best similarity per matched capability + \
                 {} * rating / 5, vendors without matches excluded",
                config.feature_weight, config.rating_weight
            ),
        }
    }
}

/// Full response for one qualification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationResponse {
    pub query: QueryEcho,
    pub results: RankedVendors,
    pub matching_analysis: MatchingAnalysis,
    pub ranking_summary: RankingSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methodology: Option<Methodology>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Truncate to `top_n`, compute the summary and wrap everything up.
#[must_use]
pub fn assemble(
    query: &QualificationQuery,
    config: &QualificationConfig,
    mut ranked: Vec<VendorResult>,
    matching_analysis: MatchingAnalysis,
) -> QualificationResponse {
    let total_qualified_vendors = ranked.len();
    ranked.truncate(config.top_n);
    let ranking_summary = RankingSummary::compute(&ranked, config);
    let message = ranked.is_empty().then(|| {
        "no vendors cleared the similarity threshold; consider lowering \
         similarity_threshold or widening the category filter"
            .to_string()
    });
    let methodology = query
        .include_explanations
        .then(|| Methodology::describe(config));

    QualificationResponse {
        query: QueryEcho {
            software_category: query.software_category.clone(),
            capabilities: query.capabilities.clone(),
            similarity_threshold: config.similarity_threshold,
            top_n: config.top_n,
        },
        results: RankedVendors {
            returned_vendors: ranked.len(),
            total_qualified_vendors,
            ranked_vendors: ranked,
        },
        matching_analysis,
        ranking_summary,
        methodology,
        message,
    }
}
