//! Shared corpus handle for the serving layer.

use crate::loader::{load_corpus, Result};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vendorq_core::Corpus;

/// In-memory corpus behind a read/write lock.
///
/// Readers take an `Arc` snapshot, so a reload never blocks or tears an
/// in-flight qualification.
#[derive(Debug)]
pub struct CorpusStore {
    corpus: RwLock<Arc<Corpus>>,
    dataset_path: PathBuf,
}

impl CorpusStore {
    /// Load the dataset at `path` and wrap it for shared access.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dataset_path = path.as_ref().to_path_buf();
        let corpus = load_corpus(&dataset_path)?;
        Ok(Self {
            corpus: RwLock::new(Arc::new(corpus)),
            dataset_path,
        })
    }

    /// Current corpus snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Corpus> {
        self.corpus.read().clone()
    }

    /// Re-read the dataset from disk and swap it in.
    ///
    /// Returns the fresh record count. When the load fails the previous
    /// corpus stays in place.
    pub fn reload(&self) -> Result<usize> {
        let fresh = load_corpus(&self.dataset_path)?;
        let len = fresh.len();
        *self.corpus.write() = Arc::new(fresh);
        info!(records = len, "corpus reloaded");
        Ok(len)
    }

    #[inline]
    #[must_use]
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}
