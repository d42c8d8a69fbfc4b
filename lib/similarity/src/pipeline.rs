//! End-to-end qualification pipeline.

use crate::config::{ConfigError, QualificationConfig, QualificationQuery};
use crate::matrix::SimilarityMatrix;
use crate::rank::VendorRanker;
use crate::response::{assemble, MatchingAnalysis, QualificationResponse};
use crate::vectorizer::{TfidfVectorizer, VectorizeError};
use std::borrow::Cow;
use thiserror::Error;
use tracing::{debug, info};
use vendorq_core::{Corpus, SparseVector};

#[derive(Debug, Error)]
pub enum QualifyError {
    #[error("no capabilities provided")]
    EmptyCapabilities,
    #[error("corpus contains no vendor records")]
    EmptyCorpus,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Vectorize(#[from] VectorizeError),
}

/// Stateless qualification engine.
///
/// Vocabulary and idf weights are fitted per request over the joint text
/// set of the query capabilities and the candidate features, so repeated
/// queries against the same corpus are deterministic and nothing has to be
/// re-fit when the corpus reloads.
#[derive(Debug, Clone)]
pub struct VendorQualifier {
    config: QualificationConfig,
}

impl VendorQualifier {
    pub fn new(config: QualificationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: QualificationConfig::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &QualificationConfig {
        &self.config
    }

    /// Qualify and rank vendors from `corpus` against `query`.
    ///
    /// A category filter that matches nothing is a valid outcome and
    /// produces an empty result set with an advisory message, not an
    /// error.
    pub fn qualify(
        &self,
        corpus: &Corpus,
        query: &QualificationQuery,
    ) -> Result<QualificationResponse, QualifyError> {
        let config = QualificationConfig {
            similarity_threshold: query.similarity_threshold,
            top_n: query.top_n,
            ..self.config
        };
        config.validate()?;

        if query.capabilities.iter().all(|c| c.trim().is_empty()) {
            return Err(QualifyError::EmptyCapabilities);
        }
        if corpus.is_empty() {
            return Err(QualifyError::EmptyCorpus);
        }

        let candidates: Cow<'_, Corpus> = match query.software_category.as_deref() {
            Some(filter) => Cow::Owned(corpus.filter_by_category(filter)),
            None => Cow::Borrowed(corpus),
        };

        let features = candidates.flatten();
        debug!(
            candidates = candidates.len(),
            features = features.len(),
            "flattened candidate corpus"
        );

        let mut texts: Vec<&str> = query.capabilities.iter().map(String::as_str).collect();
        texts.extend(features.iter().map(|f| f.combined_text.as_str()));
        let vectorizer = TfidfVectorizer::fit(&texts, config.max_vocabulary_size)?;
        debug!(vocabulary = vectorizer.vocabulary_len(), "fitted vectorizer");

        let capability_vectors: Vec<SparseVector> = query
            .capabilities
            .iter()
            .map(|c| vectorizer.transform(c))
            .collect();
        let feature_vectors: Vec<SparseVector> = features
            .iter()
            .map(|f| vectorizer.transform(&f.combined_text))
            .collect();

        let matrix = SimilarityMatrix::compute(&capability_vectors, &feature_vectors);
        let matches = matrix.matches(config.similarity_threshold);

        let ranker = VendorRanker::new(config);
        let mut ranked = ranker.rank(candidates.records(), &features, &query.capabilities, &matches);
        if query.include_explanations {
            ranker.add_explanations(&mut ranked);
        }

        info!(
            candidates = candidates.len(),
            matches = matches.len(),
            qualified = ranked.len(),
            "qualification complete"
        );

        let analysis =
            MatchingAnalysis::compute(&query.capabilities, &features, &matches, candidates.len());
        Ok(assemble(query, &config, ranked, analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendorq_core::{FeatureEntry, FeatureGroup, VendorRecord};

    fn corpus() -> Corpus {
        Corpus::new(vec![
            VendorRecord::new("Acme CRM", "Acme Software", 4.5)
                .with_category("CRM Software")
                .with_features(vec![FeatureGroup::new(
                    "CRM Features",
                    vec![
                        FeatureEntry::new(
                            "Lead Management",
                            "Capture, track and score incoming sales leads",
                        ),
                        FeatureEntry::new(
                            "Pipeline View",
                            "Visual deal pipeline with drag and drop stages",
                        ),
                    ],
                )]),
            VendorRecord::new("MailFlow", "Flow Inc", 4.2)
                .with_category("Email Marketing")
                .with_features(vec![FeatureGroup::new(
                    "Campaigns",
                    vec![FeatureEntry::new(
                        "Email Campaigns",
                        "Automated email campaign scheduling and sending",
                    )],
                )]),
        ])
    }

    fn query(capabilities: &[&str]) -> QualificationQuery {
        QualificationQuery::new(capabilities.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_capability_list_is_rejected() {
        let qualifier = VendorQualifier::with_defaults();
        let err = qualifier.qualify(&corpus(), &query(&[])).unwrap_err();
        assert!(matches!(err, QualifyError::EmptyCapabilities));

        let err = qualifier
            .qualify(&corpus(), &query(&["", "   "]))
            .unwrap_err();
        assert!(matches!(err, QualifyError::EmptyCapabilities));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let qualifier = VendorQualifier::with_defaults();
        let err = qualifier
            .qualify(&Corpus::default(), &query(&["lead management"]))
            .unwrap_err();
        assert!(matches!(err, QualifyError::EmptyCorpus));
    }

    #[test]
    fn test_out_of_range_query_threshold_is_rejected() {
        let qualifier = VendorQualifier::with_defaults();
        let bad = query(&["lead management"]).with_threshold(1.5);
        let err = qualifier.qualify(&corpus(), &bad).unwrap_err();
        assert!(matches!(
            err,
            QualifyError::Config(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_unmatched_category_filter_yields_empty_results() {
        let qualifier = VendorQualifier::with_defaults();
        let q = query(&["lead management"]).with_category("accounting");
        let response = qualifier.qualify(&corpus(), &q).unwrap();
        assert_eq!(response.matching_analysis.candidate_vendors, 0);
        assert!(response.results.ranked_vendors.is_empty());
        assert!(response.message.is_some());
    }

    #[test]
    fn test_qualifies_the_matching_vendor() {
        let qualifier = VendorQualifier::with_defaults();
        let q = query(&["lead management"]).with_threshold(0.2);
        let response = qualifier.qualify(&corpus(), &q).unwrap();

        assert_eq!(response.results.ranked_vendors.len(), 1);
        let top = &response.results.ranked_vendors[0];
        assert_eq!(top.product_name, "Acme CRM");
        assert!(top.similarity_score > 0.2 && top.similarity_score <= 1.0);
        assert!(top.rank_score > 0.0 && top.rank_score <= 1.0);
        assert_eq!(top.matched_capabilities, vec!["lead management"]);
    }

    #[test]
    fn test_high_threshold_filters_everything_out() {
        let qualifier = VendorQualifier::with_defaults();
        let q = query(&["lead management"]).with_threshold(0.95);
        let response = qualifier.qualify(&corpus(), &q).unwrap();
        assert!(response.results.ranked_vendors.is_empty());
        assert!(response.message.is_some());
    }

    #[test]
    fn test_explanations_attach_on_request() {
        let qualifier = VendorQualifier::with_defaults();
        let q = query(&["lead management"])
            .with_threshold(0.2)
            .with_explanations(true);
        let response = qualifier.qualify(&corpus(), &q).unwrap();
        assert!(response.methodology.is_some());
        assert!(response.results.ranked_vendors[0].explanation.is_some());
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        let qualifier = VendorQualifier::with_defaults();
        let q = query(&["lead management"]).with_threshold(0.2);
        let first = qualifier.qualify(&corpus(), &q).unwrap();
        let second = qualifier.qualify(&corpus(), &q).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
