//! Catalog records handed to the validator.
//!
//! The LPTS catalog itself is read elsewhere; this module only defines the
//! record shape the validator consumes and loads records exported as JSON or
//! YAML, so a run can be driven from a file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// One content identifier of a catalog record, tagged with the catalog index
/// whose declared script applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentId {
    pub index: u8,
    pub id: String,
}

/// A catalog entry: stock number, declared script per index, content identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub stock_number: String,
    #[serde(default)]
    pub declared_scripts: BTreeMap<u8, String>,
    #[serde(default)]
    pub content_ids: Vec<ContentId>,
}

impl ValidationRecord {
    #[must_use]
    pub fn new(stock_number: impl Into<String>) -> Self {
        Self {
            stock_number: stock_number.into(),
            ..Self::default()
        }
    }

    /// Declare the script for a catalog index.
    #[must_use]
    pub fn with_script(mut self, index: u8, script: impl Into<String>) -> Self {
        self.declared_scripts.insert(index, script.into());
        self
    }

    /// Append a content identifier under a catalog index.
    #[must_use]
    pub fn with_content(mut self, index: u8, id: impl Into<String>) -> Self {
        self.content_ids.push(ContentId {
            index,
            id: id.into(),
        });
        self
    }

    /// The declared script for a catalog index, if the catalog has one.
    #[must_use]
    pub fn declared_script(&self, index: u8) -> Option<&str> {
        self.declared_scripts.get(&index).map(String::as_str)
    }
}

/// Parse records from JSON text (an array of records).
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of records.
pub fn parse_records_json(content: &str) -> anyhow::Result<Vec<ValidationRecord>> {
    serde_json::from_str(content).context("Invalid JSON records")
}

/// Parse records from YAML text (a sequence of records).
///
/// # Errors
///
/// Returns an error if the text is not a YAML sequence of records.
pub fn parse_records_yaml(content: &str) -> anyhow::Result<Vec<ValidationRecord>> {
    serde_saphyr::from_str(content).map_err(|e| anyhow::anyhow!("Invalid YAML records: {e}"))
}

/// Load records from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported extension,
/// or does not parse.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<ValidationRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file {}", path.display()))?;
    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_records_json(&content),
        Some("yaml" | "yml") => parse_records_yaml(&content),
        _ => bail!(
            "Unsupported records file {} (expected .json, .yaml or .yml)",
            path.display()
        ),
    }
    .with_context(|| format!("Failed to load records from {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "Loaded catalog records");
    Ok(records)
}
