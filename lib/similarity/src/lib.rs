//! # vendorq Similarity
//!
//! Capability-to-feature matching and vendor ranking.
//!
//! This crate provides the scoring half of vendorq: it turns capability
//! phrases and vendor feature texts into TF-IDF vectors, matches them by
//! cosine similarity, and blends capability coverage with ratings into a
//! ranked, explainable result set.
//!
//! ## Features
//!
//! - **Per-request vocabulary**: query and corpus are vectorized together, so no fitted state outlives a request
//! - **TF-IDF matching**: unigram and bigram terms, smoothed idf, L2-normalized vectors
//! - **Coverage ranking**: mean of the best score per matched capability, blended with vendor ratings
//! - **Explainability**: per-vendor score breakdown plus a methodology note on demand
//!
//! ## Example
//!
//! ```rust
//! use vendorq_core::{Corpus, FeatureEntry, FeatureGroup, VendorRecord};
//! use vendorq_similarity::{QualificationQuery, VendorQualifier};
//!
//! let corpus = Corpus::new(vec![
//!     VendorRecord::new("Acme CRM", "Acme Software", 4.5)
//!         .with_category("CRM Software")
//!         .with_features(vec![FeatureGroup::new(
//!             "CRM Features",
//!             vec![FeatureEntry::new(
//!                 "Lead Management",
//!                 "Track and score incoming sales leads",
//!             )],
//!         )]),
//! ]);
//!
//! let qualifier = VendorQualifier::with_defaults();
//! let query = QualificationQuery::new(vec!["lead management".to_string()])
//!     .with_threshold(0.3);
//! let response = qualifier.qualify(&corpus, &query).unwrap();
//!
//! assert_eq!(response.results.ranked_vendors.len(), 1);
//! assert_eq!(response.results.ranked_vendors[0].product_name, "Acme CRM");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │    Corpus    │────>│  Vectorizer  │────>│  Similarity  │
//! │ (flattened)  │     │   (TF-IDF)   │     │    Matrix    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//! ┌──────────────┐     ┌──────────────┐           │
//! │   Response   │<────│    Ranker    │<──────────┘
//! │ (assembled)  │     │ (sim+rating) │
//! └──────────────┘     └──────────────┘
//! ```

pub mod config;
pub mod matrix;
pub mod pipeline;
pub mod rank;
pub mod response;
pub mod vectorizer;

mod stopwords;

// Re-export main types for convenience
pub use config::{
    ConfigError, QualificationConfig, QualificationQuery, DEFAULT_FEATURE_WEIGHT,
    DEFAULT_MAX_VOCABULARY, DEFAULT_RATING_WEIGHT, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_N,
};
pub use matrix::{FeatureMatch, SimilarityMatrix};
pub use pipeline::{QualifyError, VendorQualifier};
pub use rank::{normalized_rating, MatchedFeature, RankExplanation, VendorRanker, VendorResult};
pub use response::{
    CapabilityMatches, MatchingAnalysis, Methodology, QualificationResponse, QueryEcho,
    RankedVendors, RankingSummary, ScoreRange,
};
pub use vectorizer::{TfidfVectorizer, VectorizeError};
