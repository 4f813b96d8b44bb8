//! Configuration types for script validation.
//!
//! Split into core validation config (universal) and source-specific config
//! (how content is listed and read), so record validation against a content
//! database never sees storage concerns.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LocationError;

/// Scheme prefix that marks an object-store location.
pub const OBJECT_STORE_SCHEME: &str = "s3://";

/// Where fileset content lives.
///
/// Parsed once per run from a location string: anything starting with
/// [`OBJECT_STORE_SCHEME`] names a bucket, everything else is a local root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentLocation {
    /// A directory on local disk holding one subdirectory per fileset.
    Local { root: PathBuf },
    /// An object-store bucket holding one key prefix per fileset.
    ObjectStore { bucket: String },
}

impl FromStr for ContentLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(bucket) = s.strip_prefix(OBJECT_STORE_SCHEME) {
            if bucket.is_empty() {
                return Err(LocationError::MissingBucket(s.to_owned()));
            }
            return Ok(Self::ObjectStore {
                bucket: bucket.to_owned(),
            });
        }
        if s.is_empty() {
            return Err(LocationError::Empty);
        }
        Ok(Self::Local {
            root: PathBuf::from(s),
        })
    }
}

impl fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { root } => write!(f, "{}", root.display()),
            Self::ObjectStore { bucket } => write!(f, "{OBJECT_STORE_SCHEME}{bucket}"),
        }
    }
}

/// Core validation config, shared by every content source.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Rows requested from the content database per content identifier (default: 10).
    pub sample_rows: usize,
    /// Maximum number of text files read when checking a fileset (default: `10_000`).
    pub max_files: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sample_rows: 10,
            max_files: 10_000,
        }
    }
}

/// Source-specific listing options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SourceConfig {
    /// File names never treated as content, as glob patterns (default: `Thumbs.db`).
    /// Applied to local listings and object-store listings alike.
    pub ignore: Vec<String>,
    /// Page size bound for a single object-store listing request (default: 1000).
    pub max_keys: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            ignore: vec!["Thumbs.db".to_owned()],
            max_keys: 1000,
        }
    }
}
