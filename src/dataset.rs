//! YAML dataset definitions and loaders.
//!
//! Provides types and loaders for the two document kinds renorm operates
//! on: a packed dataset (records with a delimited multi-value field) and a
//! flat order relation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::decompose::FlatOrderRow;
use crate::record::{PackedRecord, RecordError};

/// A packed dataset: the delimiter plus the records it applies to.
///
/// Loaded from a `dataset:` YAML document:
///
/// ```yaml
/// dataset:
///   delimiter: ","
///   records:
///     - id: 101
///       label: "John Doe"
///       items: "Laptop,Mouse"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PackedDataset {
    /// Separator character for every record's `items` field
    pub delimiter: char,

    /// Records in document order
    pub records: Vec<PackedRecord<i64>>,
}

/// Raw YAML shape of a packed dataset, before delimiter validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPackedDataset {
    delimiter: String,
    #[serde(default)]
    records: Vec<PackedRecord<i64>>,
}

/// A flat order relation loaded from a `relation:` YAML document:
///
/// ```yaml
/// relation:
///   rows:
///     - order_id: 101
///       customer_name: "John Doe"
///       item: "Laptop"
///       quantity: 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRelation {
    /// Rows in document order
    #[serde(default)]
    pub rows: Vec<FlatOrderRow>,
}

/// A loaded YAML document of either kind.
///
/// The document kind is dispatched on the top-level key (`dataset` or
/// `relation`).
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Packed(PackedDataset),
    Flat(FlatRelation),
}

impl PackedDataset {
    /// Parse a packed dataset from YAML text.
    ///
    /// # Errors
    /// Returns error if the YAML is malformed, the `dataset` key is
    /// missing, or the delimiter is not exactly one character.
    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse YAML: {}", e))?;

        let dataset_yaml = yaml
            .get("dataset")
            .ok_or_else(|| "Dataset YAML missing 'dataset' field".to_string())?;

        let raw: RawPackedDataset = serde_yaml::from_value(dataset_yaml.clone())
            .map_err(|e| format!("Failed to parse dataset definition: {}", e))?;

        let delimiter = parse_delimiter(&raw.delimiter).map_err(|e| e.to_string())?;

        tracing::info!(records = raw.records.len(), %delimiter, "loaded packed dataset");

        Ok(Self {
            delimiter,
            records: raw.records,
        })
    }

    /// Load a packed dataset from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to dataset YAML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or fails [`Self::from_yaml_str`]
    /// validation.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read dataset file {}: {}", path.display(), e))?;

        Self::from_yaml_str(&contents)
    }
}

impl FlatRelation {
    /// Parse a flat relation from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse YAML: {}", e))?;

        let relation_yaml = yaml
            .get("relation")
            .ok_or_else(|| "Relation YAML missing 'relation' field".to_string())?;

        let relation: FlatRelation = serde_yaml::from_value(relation_yaml.clone())
            .map_err(|e| format!("Failed to parse relation definition: {}", e))?;

        tracing::info!(rows = relation.rows.len(), "loaded flat relation");

        Ok(relation)
    }

    /// Load a flat relation from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read relation file {}: {}", path.display(), e))?;

        Self::from_yaml_str(&contents)
    }
}

/// Load a YAML document of either kind, dispatching on the top-level key.
///
/// # Errors
/// Returns error if the file cannot be read, the document carries neither
/// a `dataset` nor a `relation` key, or the payload fails validation.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document, String> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?;

    let yaml: serde_yaml::Value = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse YAML: {}", e))?;

    if yaml.get("dataset").is_some() {
        PackedDataset::from_yaml_str(&contents).map(Document::Packed)
    } else if yaml.get("relation").is_some() {
        FlatRelation::from_yaml_str(&contents).map(Document::Flat)
    } else {
        Err(format!(
            "{}: expected a top-level 'dataset' or 'relation' field",
            path.display()
        ))
    }
}

/// Validate that a raw delimiter string is exactly one character.
///
/// The count is in characters, not bytes, so multi-byte delimiters like
/// `·` are accepted.
fn parse_delimiter(raw: &str) -> Result<char, RecordError> {
    let mut chars = raw.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(RecordError::InvalidDelimiter(raw.to_string())),
    }
}
