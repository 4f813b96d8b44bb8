//! Error types for script validation.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A location string that selects neither source mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Content location is empty")]
    Empty,
    #[error("Object-store location '{0}' does not name a bucket")]
    MissingBucket(String),
}

/// The kind of source-level problem that left a fileset (or one of its files)
/// without content to check.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceIssueKind {
    /// The local fileset directory does not exist or is not a directory.
    InvalidDirectory,
    /// The object-store listing for the fileset prefix returned no keys.
    EmptyListing,
    /// The object store rejected or failed the listing request.
    StoreUnavailable,
    /// A listed content file could not be read or decoded.
    ReadFailed,
}

/// A soft, recorded failure: content that could not be listed or read.
///
/// These are distinct from script mismatches. A `SourceIssue` means there was
/// nothing to classify, not that the classified text disagreed with LPTS.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct SourceIssue {
    /// Local path or `bucket/prefix` the issue refers to.
    pub location: String,
    pub kind: SourceIssueKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl SourceIssue {
    #[must_use]
    pub fn new(location: impl Into<String>, kind: SourceIssueKind, message: String) -> Self {
        Self {
            location: location.into(),
            kind,
            message,
        }
    }

    /// Format the issue for the error log.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("ERROR: {}", self.message)
    }
}

/// Failures from an [`crate::ObjectStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectStoreError {
    #[error("No such bucket: {0}")]
    NoSuchBucket(String),
    #[error("No such key: {bucket}/{key}")]
    NoSuchKey { bucket: String, key: String },
    #[error("Object store request failed: {0}")]
    Backend(String),
}

/// A content file, object or database sample could not be read.
#[derive(Debug, Error)]
pub enum ContentReadError {
    #[error("Content not found: {0}")]
    NotFound(String),
    #[error("Content is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch {path}: {source}")]
    Store {
        path: String,
        #[source]
        source: ObjectStoreError,
    },
    #[error("Failed to query sample text for {content_id}: {message}")]
    Database { content_id: String, message: String },
}
