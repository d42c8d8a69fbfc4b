//! # vendorq
//!
//! Vendor qualification over a software feature catalog.
//!
//! vendorq ranks software vendors against a set of desired capabilities by
//! matching capability phrases to vendor feature texts with TF-IDF cosine
//! similarity, then blending capability coverage with vendor ratings into a
//! single rank score.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! vendorq --dataset ./data/vendors.json --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use vendorq::prelude::*;
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
//!
//! let response = qualifier.qualify(&corpus, &query).unwrap();
//! assert_eq!(response.results.ranked_vendors[0].product_name, "Acme CRM");
//! ```
//!
//! ## Crate Structure
//!
//! vendorq is composed of several crates:
//!
//! - **vendorq-core** - Vendor records, feature flattening, sparse vectors
//! - **vendorq-similarity** - TF-IDF vectorizer, similarity matrix, ranking
//! - **vendorq-storage** - Dataset loading and the reloadable corpus store
//! - **vendorq-api** - REST endpoints
//!
//! ## Features
//!
//! - **Lenient ingestion**: broken feature payloads degrade to warnings, never crashes
//! - **Per-request vectorization**: no fitted state to invalidate when the corpus changes
//! - **Blended ranking**: capability coverage and vendor rating in one score
//! - **Explainable results**: per-vendor score breakdowns and a methodology note on demand

// Re-export core types
pub use vendorq_core::{
    Corpus, FeatureEntry, FeatureGroup, FlatFeature, ParsedFeatures, SparseVector, VendorRecord,
};

// Re-export the qualification engine
pub use vendorq_similarity::{
    ConfigError, QualificationConfig, QualificationQuery, QualificationResponse, QualifyError,
    VendorQualifier, VendorResult,
};

// Re-export storage
pub use vendorq_storage::{load_corpus, CorpusStore, StorageError};

// Re-export API
pub use vendorq_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConfigError, Corpus, CorpusStore, FeatureEntry, FeatureGroup, QualificationConfig,
        QualificationQuery, QualificationResponse, QualifyError, RestApi, StorageError,
        VendorQualifier, VendorRecord, VendorResult,
    };
}
