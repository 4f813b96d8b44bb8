//! Validation report types.

use serde::Serialize;

use script_detect::ScriptResult;

use crate::error::SourceIssue;

/// Append-only, ordered log of human-readable diagnostics.
///
/// The log is owned by the caller and passed into each check, so one run can
/// accumulate messages across many records and filesets. Nothing in this crate
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    messages: Vec<String>,
}

impl ErrorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Per-call tally of one record validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct RecordOutcome {
    /// Content identifiers whose sample was classified and compared.
    pub checked: usize,
    /// Content identifiers with no sample text.
    pub skipped: usize,
    /// Content identifiers whose sample could not be read.
    pub failed: usize,
    /// Checked identifiers whose script disagreed with the catalog.
    pub mismatched: usize,
}

impl RecordOutcome {
    /// Whether every checked identifier matched and none failed to read.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.failed == 0 && self.mismatched == 0
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: Self) {
        self.checked += other.checked;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.mismatched += other.mismatched;
    }
}

/// Script detected for one content file of a fileset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileScript {
    pub name: String,
    #[serde(flatten)]
    pub result: ScriptResult,
}

/// Result of checking the script of one fileset's files.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct FilesetReport {
    pub fileset: String,
    /// Where the content was read from.
    pub source: String,
    pub declared_script: Option<String>,
    /// Per-file classification, in listing order.
    pub files: Vec<FileScript>,
    /// Classification of all files' text taken together.
    pub result: ScriptResult,
    /// Whether `result` agrees with `declared_script`.
    pub matched: bool,
    /// Listing and read failures. Non-empty means coverage was incomplete.
    pub source_issues: Vec<SourceIssue>,
}

impl FilesetReport {
    /// Whether the fileset was fully read and its script matched.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.matched && self.source_issues.is_empty()
    }

    /// Number of files that were classified.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.files.len()
    }
}
