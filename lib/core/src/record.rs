use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single feature inside a category block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Share of reviewers confirming the feature, when the dataset carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f32>,
    /// Number of reviews backing the feature, when the dataset carries it.
    #[serde(default, alias = "review", skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

impl FeatureEntry {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            percent: None,
            review_count: None,
        }
    }
}

/// A named group of features, as vendors publish them per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureGroup {
    #[serde(default, alias = "Category")]
    pub category: String,
    #[serde(default, alias = "Features")]
    pub features: Vec<FeatureEntry>,
}

impl FeatureGroup {
    #[inline]
    #[must_use]
    pub fn new(category: impl Into<String>, features: Vec<FeatureEntry>) -> Self {
        Self {
            category: category.into(),
            features,
        }
    }
}

/// Outcome of decoding a vendor's raw feature payload.
///
/// Datasets deliver features as inline JSON arrays, as JSON text embedded in
/// a string column, or not at all. Decoding never fails: broken input becomes
/// [`ParsedFeatures::Malformed`] and flattens to nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParsedFeatures {
    /// Well-formed category groups.
    Parsed(Vec<FeatureGroup>),
    /// No feature data supplied.
    #[default]
    Empty,
    /// Payload present but undecodable; the reason is kept for logging.
    Malformed(String),
}

impl ParsedFeatures {
    /// Decode a raw feature payload.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => ParsedFeatures::Empty,
            Value::String(raw) if raw.trim().is_empty() => ParsedFeatures::Empty,
            Value::String(raw) => match serde_json::from_str::<Vec<FeatureGroup>>(raw) {
                Ok(groups) => Self::from_groups(groups),
                Err(e) => ParsedFeatures::Malformed(e.to_string()),
            },
            Value::Array(_) => match serde_json::from_value::<Vec<FeatureGroup>>(value.clone()) {
                Ok(groups) => Self::from_groups(groups),
                Err(e) => ParsedFeatures::Malformed(e.to_string()),
            },
            other => ParsedFeatures::Malformed(format!(
                "unsupported feature payload type: {}",
                json_type(other)
            )),
        }
    }

    /// Wrap decoded groups, collapsing an empty list to [`ParsedFeatures::Empty`].
    #[must_use]
    pub fn from_groups(groups: Vec<FeatureGroup>) -> Self {
        if groups.is_empty() {
            ParsedFeatures::Empty
        } else {
            ParsedFeatures::Parsed(groups)
        }
    }

    /// The decoded groups; empty for `Empty` and `Malformed` payloads.
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[FeatureGroup] {
        match self {
            ParsedFeatures::Parsed(groups) => groups,
            _ => &[],
        }
    }

    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParsedFeatures::Malformed(_))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One vendor's catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorRecord {
    pub product_name: String,
    #[serde(alias = "seller")]
    pub vendor: String,
    #[serde(default)]
    pub main_category: String,
    /// Quality rating in [0, 5]; zero when the dataset has none.
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f32,
    #[serde(
        default,
        alias = "Features",
        deserialize_with = "features_from_raw",
        serialize_with = "features_to_groups"
    )]
    pub features: ParsedFeatures,
}

impl VendorRecord {
    #[must_use]
    pub fn new(product_name: impl Into<String>, vendor: impl Into<String>, rating: f32) -> Self {
        Self {
            product_name: product_name.into(),
            vendor: vendor.into(),
            main_category: String::new(),
            rating,
            features: ParsedFeatures::Empty,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.main_category = category.into();
        self
    }

    #[must_use]
    pub fn with_features(mut self, groups: Vec<FeatureGroup>) -> Self {
        self.features = ParsedFeatures::from_groups(groups);
        self
    }

    /// Stable identity used for grouping and reporting.
    #[inline]
    #[must_use]
    pub fn vendor_key(&self) -> String {
        format!("{}_{}", self.product_name, self.vendor)
    }
}

// Ratings arrive as numbers or numeric strings; anything else counts as unrated.
fn lenient_rating<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0) as f32,
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn features_from_raw<'de, D>(deserializer: D) -> Result<ParsedFeatures, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(ParsedFeatures::from_value(&value))
}

fn features_to_groups<S>(features: &ParsedFeatures, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match features {
        ParsedFeatures::Parsed(groups) => groups.serialize(serializer),
        _ => serializer.serialize_none(),
    }
}
