use crate::flatten::{flatten_corpus, FlatFeature};
use crate::record::VendorRecord;
use ahash::AHashMap;

/// Immutable snapshot of the vendor dataset.
///
/// Requests read a corpus without coordination; updates happen by swapping
/// in a freshly built snapshot. Record order is the dataset order and is
/// the tie-break order for ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<VendorRecord>,
}

impl Corpus {
    #[inline]
    #[must_use]
    pub fn new(records: Vec<VendorRecord>) -> Self {
        Self { records }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[VendorRecord] {
        &self.records
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&VendorRecord> {
        self.records.get(idx)
    }

    /// Records whose main category contains `filter`, case-insensitively.
    /// A blank filter or "all" selects the whole corpus.
    #[must_use]
    pub fn filter_by_category(&self, filter: &str) -> Corpus {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() || needle == "all" {
            return self.clone();
        }
        Corpus::new(
            self.records
                .iter()
                .filter(|r| r.main_category.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        )
    }

    /// Category names with the number of records in each, most populous first.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for record in &self.records {
            if record.main_category.is_empty() {
                continue;
            }
            *counts.entry(record.main_category.as_str()).or_insert(0) += 1;
        }
        let mut out: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, n)| (name.to_string(), n))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// The most frequent feature names across the corpus, at most `limit`.
    #[must_use]
    pub fn top_features(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for feature in self.flatten() {
            if feature.name.is_empty() {
                continue;
            }
            *counts.entry(feature.name).or_insert(0) += 1;
        }
        let mut out: Vec<(String, usize)> = counts.into_iter().collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out.truncate(limit);
        out
    }

    /// Flatten every record into scoring-ready feature rows.
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatFeature> {
        flatten_corpus(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FeatureEntry, FeatureGroup};

    fn sample_corpus() -> Corpus {
        Corpus::new(vec![
            VendorRecord::new("Acme CRM", "Acme", 4.2)
                .with_category("CRM Software")
                .with_features(vec![FeatureGroup::new(
                    "Sales",
                    vec![FeatureEntry::new("Pipeline View", "Visual deal pipeline")],
                )]),
            VendorRecord::new("MailFlow", "MailFlow Inc", 4.0)
                .with_category("Marketing Automation")
                .with_features(vec![FeatureGroup::new(
                    "Campaigns",
                    vec![
                        FeatureEntry::new("Campaigns", "Email campaigns"),
                        FeatureEntry::new("Pipeline View", "Deal board"),
                    ],
                )]),
            VendorRecord::new("SalesPro", "SalesPro LLC", 3.8).with_category("CRM Software"),
        ])
    }

    #[test]
    fn test_category_filter_is_substring_and_case_insensitive() {
        let corpus = sample_corpus();
        let crm = corpus.filter_by_category("crm");
        assert_eq!(crm.len(), 2);
        assert!(crm.records().iter().all(|r| r.main_category.contains("CRM")));

        let none = corpus.filter_by_category("accounting");
        assert!(none.is_empty());
    }

    #[test]
    fn test_blank_and_all_select_everything() {
        let corpus = sample_corpus();
        assert_eq!(corpus.filter_by_category("").len(), 3);
        assert_eq!(corpus.filter_by_category("  ").len(), 3);
        assert_eq!(corpus.filter_by_category("ALL").len(), 3);
    }

    #[test]
    fn test_category_counts_ordered_by_population() {
        let corpus = sample_corpus();
        let counts = corpus.category_counts();
        assert_eq!(counts[0], ("CRM Software".to_string(), 2));
        assert_eq!(counts[1], ("Marketing Automation".to_string(), 1));
    }

    #[test]
    fn test_top_features_counts_duplicates() {
        let corpus = sample_corpus();
        let top = corpus.top_features(10);
        assert_eq!(top[0], ("Pipeline View".to_string(), 2));

        let capped = corpus.top_features(1);
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn test_flatten_skips_featureless_records() {
        let corpus = sample_corpus();
        let flat = corpus.flatten();
        assert_eq!(flat.len(), 3);
        assert!(flat.iter().all(|f| f.vendor_idx < 2));
    }
}
