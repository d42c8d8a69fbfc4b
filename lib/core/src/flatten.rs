use crate::record::{ParsedFeatures, VendorRecord};
use tracing::warn;

/// One scoring-ready feature row produced from a vendor record.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFeature {
    /// Index of the owning record within the corpus being flattened.
    pub vendor_idx: usize,
    pub category: String,
    pub name: String,
    pub description: String,
    /// Name and description joined for vectorization.
    pub combined_text: String,
    pub percent: Option<f32>,
    pub review_count: Option<u32>,
}

/// Flatten one vendor's nested feature groups.
///
/// Malformed or absent payloads yield no rows, and a feature with neither
/// name nor description is skipped. Never fails.
pub fn flatten_vendor(vendor_idx: usize, record: &VendorRecord) -> Vec<FlatFeature> {
    let groups = match &record.features {
        ParsedFeatures::Parsed(groups) => groups,
        ParsedFeatures::Empty => return Vec::new(),
        ParsedFeatures::Malformed(reason) => {
            warn!(vendor = %record.vendor_key(), %reason, "dropping malformed feature payload");
            return Vec::new();
        }
    };

    let mut flat = Vec::new();
    for group in groups {
        for entry in &group.features {
            let name = entry.name.trim();
            let description = entry.description.trim();
            let combined_text = match (name.is_empty(), description.is_empty()) {
                (true, true) => continue,
                (false, true) => name.to_string(),
                (true, false) => description.to_string(),
                (false, false) => format!("{} {}", name, description),
            };
            flat.push(FlatFeature {
                vendor_idx,
                category: group.category.clone(),
                name: name.to_string(),
                description: description.to_string(),
                combined_text,
                percent: entry.percent,
                review_count: entry.review_count,
            });
        }
    }
    flat
}

/// Flatten an ordered set of vendor records into one feature list.
pub fn flatten_corpus(records: &[VendorRecord]) -> Vec<FlatFeature> {
    records
        .iter()
        .enumerate()
        .flat_map(|(idx, record)| flatten_vendor(idx, record))
        .collect()
}
