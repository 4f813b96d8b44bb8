//! Shared output formatting for validation results.
//!
//! Provides JSON and plain-text formatters. Color/terminal formatting is
//! excluded here; that concern belongs to the CLI layer.

use std::io::Write;

use serde::Serialize;

use crate::report::{ErrorLog, FilesetReport, RecordOutcome};

/// Serialize any report as pretty JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<T: Serialize + ?Sized>(report: &T, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write the error log, one message per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_log(log: &ErrorLog, writer: &mut dyn Write) -> anyhow::Result<()> {
    for message in log.messages() {
        writeln!(writer, "{message}")?;
    }
    Ok(())
}

/// Format a `FilesetReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_fileset_human(report: &FilesetReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  FILESET SCRIPT CHECK: {}", report.fileset)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Source:          {}", report.source)?;
    writeln!(
        writer,
        "  Declared script: {}",
        report.declared_script.as_deref().unwrap_or("(none)")
    )?;
    writeln!(
        writer,
        "  Detected script: {} ({}%)",
        report.result.script.as_deref().unwrap_or("(none)"),
        report.result.confidence
    )?;
    writeln!(writer, "  Files checked:   {}", report.files_checked())?;
    writeln!(writer)?;

    if !report.files.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  FILES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for file in &report.files {
            writeln!(
                writer,
                "{:<40} {:<12} {:>3}%",
                file.name,
                file.result.script.as_deref().unwrap_or("-"),
                file.result.confidence
            )?;
        }
        writeln!(writer)?;
    }

    if !report.source_issues.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SOURCE ISSUES (content that could not be checked)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for issue in &report.source_issues {
            writeln!(writer, "{}: {}", issue.location, issue.message)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    Ok(())
}

/// Format a record validation summary as plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_records_human(
    records: usize,
    outcome: &RecordOutcome,
    log: &ErrorLog,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  LPTS SCRIPT VALIDATION")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Records:         {records}")?;
    writeln!(writer, "  Content checked: {}", outcome.checked)?;
    writeln!(writer, "  Without text:    {}", outcome.skipped)?;
    writeln!(writer, "  Unreadable:      {}", outcome.failed)?;
    writeln!(writer, "  Mismatched:      {}", outcome.mismatched)?;
    writeln!(writer)?;

    if !log.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  ERRORS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        write_log(log, writer)?;
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_log_one_line_per_message() {
        let mut log = ErrorLog::new();
        log.push("ERROR: one");
        log.push("ERROR: two");
        let mut buf = Vec::new();
        write_log(&log, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ERROR: one\nERROR: two\n");
    }

    #[test]
    fn test_write_json_error_log_is_array() {
        let mut log = ErrorLog::new();
        log.push("ERROR: one");
        let mut buf = Vec::new();
        write_json(&log, &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json, serde_json::json!(["ERROR: one"]));
    }

    #[test]
    fn test_write_records_human_lists_errors() {
        let mut log = ErrorLog::new();
        log.push("ERROR: Stock number B1, content X: mismatch");
        let outcome = RecordOutcome {
            checked: 1,
            skipped: 2,
            failed: 0,
            mismatched: 1,
        };
        let mut buf = Vec::new();
        write_records_human(1, &outcome, &log, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Without text:    2"));
        assert!(text.contains("ERROR: Stock number B1"));
    }
}
