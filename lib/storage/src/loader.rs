//! JSON dataset loading.

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use vendorq_core::{Corpus, VendorRecord};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Load a vendor corpus from a JSON array file.
///
/// The load fails only when the file cannot be read or the top level is
/// not a JSON array. A row that does not decode to a vendor record is
/// logged and skipped, so one broken row cannot take the dataset down.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<VendorRecord>(row) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(index, %error, "skipping undecodable vendor row");
                skipped += 1;
            }
        }
    }

    info!(
        records = records.len(),
        skipped,
        path = %path.display(),
        "loaded vendor dataset"
    );
    Ok(Corpus::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_records_and_skips_broken_rows() {
        let file = write_dataset(
            r#"[
                {"product_name": "Acme CRM", "vendor": "Acme", "main_category": "CRM Software", "rating": 4.5},
                {"rating": 3.0},
                {"product_name": "MailFlow", "vendor": "Flow Inc", "rating": "4.2"}
            ]"#,
        );
        let corpus = load_corpus(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().product_name, "Acme CRM");
        assert!((corpus.get(1).unwrap().rating - 4.2).abs() < 1e-6);
    }

    #[test]
    fn test_string_embedded_features_decode() {
        let file = write_dataset(
            r#"[{
                "product_name": "Acme CRM",
                "vendor": "Acme",
                "rating": 4.5,
                "features": "[{\"category\": \"Core\", \"features\": [{\"name\": \"Leads\", \"description\": \"Lead tracking\"}]}]"
            }]"#,
        );
        let corpus = load_corpus(file.path()).unwrap();
        let flat = corpus.flatten();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].name, "Leads");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_corpus(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_non_array_root_is_a_parse_error() {
        let file = write_dataset(r#"{"product_name": "Acme CRM"}"#);
        let err = load_corpus(file.path()).unwrap_err();
        assert!(matches!(err, StorageError::Parse(_)));
    }

    #[test]
    fn test_empty_array_loads_an_empty_corpus() {
        let file = write_dataset("[]");
        let corpus = load_corpus(file.path()).unwrap();
        assert!(corpus.is_empty());
    }
}
