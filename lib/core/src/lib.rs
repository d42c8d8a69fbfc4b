//! # vendorq Core
//!
//! Core data model for the vendorq qualification engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`VendorRecord`] - A vendor's catalog entry with nested feature groups
//! - [`ParsedFeatures`] - Tagged decode of a raw feature payload
//! - [`FlatFeature`] - A scoring-ready feature row
//! - [`Corpus`] - Immutable snapshot of the vendor dataset
//! - [`SparseVector`] - Sparse term-weight vector with cosine operations
//!
//! ## Example
//!
//! ```rust
//! use vendorq_core::{VendorRecord, FeatureGroup, FeatureEntry, flatten_vendor};
//!
//! let record = VendorRecord::new("Acme CRM", "Acme", 4.2)
//!     .with_category("CRM Software")
//!     .with_features(vec![FeatureGroup::new(
//!         "Sales",
//!         vec![FeatureEntry::new("Pipeline View", "Visual deal pipeline")],
//!     )]);
//!
//! let flat = flatten_vendor(0, &record);
//! assert_eq!(flat.len(), 1);
//! assert_eq!(flat[0].combined_text, "Pipeline View Visual deal pipeline");
//! ```

pub mod corpus;
pub mod flatten;
pub mod record;
pub mod vector;

pub use corpus::Corpus;
pub use flatten::{flatten_corpus, flatten_vendor, FlatFeature};
pub use record::{FeatureEntry, FeatureGroup, ParsedFeatures, VendorRecord};
pub use vector::SparseVector;
