//! # vendorq Storage
//!
//! Dataset loading plus the shared corpus store the serving layer reads
//! from. Datasets are JSON arrays of vendor rows; loading tolerates the
//! broken rows real exports contain, and the store supports reloading a
//! changed dataset without restarting.

pub mod loader;
pub mod store;

pub use loader::{load_corpus, Result, StorageError};
pub use store::CorpusStore;
