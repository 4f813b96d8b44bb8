//! Record validation: compare the script of each content identifier's sample
//! text with the script the catalog declares for it.

use script_detect::{count_scripts, display_script, matches_declared, summarize};

use crate::catalog::{ContentId, ValidationRecord};
use crate::config::ValidationConfig;
use crate::database::ContentDatabase;
use crate::report::{ErrorLog, RecordOutcome};
use crate::text::flatten_plain;

/// Checks catalog records against sample text from a content database.
///
/// Holds no mutable state; diagnostics go to the [`ErrorLog`] passed in, so a
/// single validator can serve any number of records and logs.
pub struct RecordValidator<'a> {
    db: &'a dyn ContentDatabase,
    config: &'a ValidationConfig,
}

/// What happened to one content identifier.
enum IdOutcome {
    Skipped,
    Failed,
    Matched,
    Mismatched,
}

impl<'a> RecordValidator<'a> {
    #[must_use]
    pub fn new(db: &'a dyn ContentDatabase, config: &'a ValidationConfig) -> Self {
        Self { db, config }
    }

    /// Validate every content identifier of `record`, in catalog order.
    ///
    /// Mismatches and unreadable samples are appended to `log`. A failure for
    /// one identifier never stops the remaining identifiers from being checked.
    pub fn validate_record(&self, record: &ValidationRecord, log: &mut ErrorLog) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();
        for content in &record.content_ids {
            match self.check_content(record, content, log) {
                IdOutcome::Skipped => outcome.skipped += 1,
                IdOutcome::Failed => outcome.failed += 1,
                IdOutcome::Matched => outcome.checked += 1,
                IdOutcome::Mismatched => {
                    outcome.checked += 1;
                    outcome.mismatched += 1;
                }
            }
        }
        tracing::info!(
            stock_number = %record.stock_number,
            checked = outcome.checked,
            skipped = outcome.skipped,
            failed = outcome.failed,
            mismatched = outcome.mismatched,
            "Validated record scripts"
        );
        outcome
    }

    /// Validate several records into one log, returning the combined tally.
    pub fn validate_records<'r, I>(&self, records: I, log: &mut ErrorLog) -> RecordOutcome
    where
        I: IntoIterator<Item = &'r ValidationRecord>,
    {
        let mut total = RecordOutcome::default();
        for record in records {
            total.merge(self.validate_record(record, log));
        }
        total
    }

    fn check_content(
        &self,
        record: &ValidationRecord,
        content: &ContentId,
        log: &mut ErrorLog,
    ) -> IdOutcome {
        let sample = match self.db.sample_text(&content.id, self.config.sample_rows) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(content_id = %content.id, "Unable to read sample text: {e}");
                log.push(format!(
                    "ERROR: Unable to read content {} for stock number {}: {e}",
                    content.id, record.stock_number
                ));
                return IdOutcome::Failed;
            }
        };
        if sample.is_empty() {
            tracing::debug!(content_id = %content.id, "No sample text; skipping");
            return IdOutcome::Skipped;
        }

        let counts = count_scripts(flatten_plain(&sample));
        let result = summarize(&counts);
        let declared = record.declared_script(content.index);
        tracing::debug!(
            content_id = %content.id,
            scripts = %counts.summary(),
            confidence = result.confidence,
            "Classified sample text"
        );

        if matches_declared(result.script.as_deref(), declared) {
            return IdOutcome::Matched;
        }
        log.push(mismatch_message(
            &record.stock_number,
            &content.id,
            declared,
            result.script.as_deref(),
        ));
        IdOutcome::Mismatched
    }
}

fn mismatch_message(
    stock_number: &str,
    content_id: &str,
    declared: Option<&str>,
    detected: Option<&str>,
) -> String {
    format!(
        "ERROR: Stock number {stock_number}, content {content_id}: LPTS script is {}, but text script is {}",
        declared.unwrap_or_default(),
        display_script(detected)
    )
}
