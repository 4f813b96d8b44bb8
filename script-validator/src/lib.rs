//! # script-validator
//!
//! Cross-validates the script of fileset text against the script declared in
//! the LPTS catalog.
//!
//! The crate separates the **detection engine** (`script-detect`, pure) from
//! **content access**: filesets are read through a [`ContentSource`] resolved
//! once from a [`ContentLocation`], and catalog records are checked against
//! sample text from a [`ContentDatabase`]. Every check appends its findings to
//! a caller-owned [`ErrorLog`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use script_validator::{
//!     ErrorLog, MemoryContentDatabase, RecordValidator, ValidationConfig, ValidationRecord,
//! };
//!
//! let mut db = MemoryContentDatabase::new();
//! db.insert("ENGESVN1ET", ["In the beginning was the Word"]);
//!
//! let record = ValidationRecord::new("B00001")
//!     .with_script(1, "Latin")
//!     .with_content(1, "ENGESVN1ET");
//!
//! let config = ValidationConfig::default();
//! let mut log = ErrorLog::new();
//! let outcome = RecordValidator::new(&db, &config).validate_record(&record, &mut log);
//! println!("Checked: {}", outcome.checked);
//! println!("Errors: {}", log.len());
//! ```

mod catalog;
mod config;
mod database;
mod error;
mod fileset;
pub mod output;
mod record;
mod report;
pub mod source;
pub mod text;

pub use catalog::{ContentId, ValidationRecord, load_records, parse_records_json, parse_records_yaml};
pub use config::{ContentLocation, OBJECT_STORE_SCHEME, SourceConfig, ValidationConfig};
pub use database::{ContentDatabase, MemoryContentDatabase, SqliteContentDatabase};
pub use error::{
    ContentReadError, LocationError, ObjectStoreError, SourceIssue, SourceIssueKind,
};
pub use fileset::check_fileset;
pub use record::RecordValidator;
pub use report::{ErrorLog, FileScript, FilesetReport, RecordOutcome};
pub use source::bucket::{MemoryObjectStore, ObjectStore};
pub use source::{ContentSource, HEADER_LINES, open_source};

/// Check one fileset at a location string such as `/data/filesets` or `s3://bucket`.
///
/// Convenience wrapper over [`open_source`] and [`check_fileset`].
///
/// # Errors
///
/// Returns an error if the location string selects neither source mode, if
/// an ignore pattern is invalid, or if an object-store location is given
/// without a store client.
pub fn check_fileset_at(
    location: &str,
    store: Option<&dyn ObjectStore>,
    fileset_path: &str,
    declared: Option<&str>,
    source_config: &SourceConfig,
    validation_config: &ValidationConfig,
    log: &mut ErrorLog,
) -> anyhow::Result<FilesetReport> {
    let location: ContentLocation = location.parse()?;
    let source = open_source(&location, store, source_config)?;
    Ok(check_fileset(
        source.as_ref(),
        fileset_path,
        declared,
        validation_config,
        log,
    ))
}
