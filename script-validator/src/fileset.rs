//! Fileset check: classify the text files of one fileset and compare the
//! combined result with the catalog's declared script.

use script_detect::{
    ScriptCounts, ScriptResult, count_scripts, display_script, matches_declared, summarize,
};

use crate::config::ValidationConfig;
use crate::error::{SourceIssue, SourceIssueKind};
use crate::report::{ErrorLog, FileScript, FilesetReport};
use crate::source::{ContentSource, content_format_for};
use crate::text::extract;

/// Check the script of a fileset's text content.
///
/// Files are listed through `source`, filtered to known text formats, and
/// read in listing order up to `config.max_files`. Each file is classified on
/// its own, and the per-file counts are merged in listing order into the
/// combined result that gets compared with `declared`.
///
/// Listing and read failures are recorded in the report and in `log`; they
/// never abort the check of the remaining files.
pub fn check_fileset(
    source: &dyn ContentSource,
    fileset_path: &str,
    declared: Option<&str>,
    config: &ValidationConfig,
    log: &mut ErrorLog,
) -> FilesetReport {
    let mut report = FilesetReport {
        fileset: fileset_path.to_owned(),
        source: source.describe(),
        declared_script: declared.map(str::to_owned),
        files: Vec::new(),
        result: ScriptResult::default(),
        matched: false,
        source_issues: Vec::new(),
    };

    let names = match source.list_content(fileset_path) {
        Ok(names) => names,
        Err(issue) => {
            tracing::warn!(fileset = fileset_path, "{}", issue.message);
            log.push(issue.format_human_readable());
            report.source_issues.push(issue);
            return report;
        }
    };

    let mut combined = ScriptCounts::default();
    let text_files = names
        .iter()
        .filter_map(|name| content_format_for(name).map(|format| (name.as_str(), format)))
        .take(config.max_files);
    for (name, format) in text_files {
        let lines = match source.read_content(fileset_path, name) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(fileset = fileset_path, file = name, "Unable to read content: {e}");
                let issue = SourceIssue::new(
                    format!("{fileset_path}/{name}"),
                    SourceIssueKind::ReadFailed,
                    format!("Unable to read {fileset_path}/{name}: {e}"),
                );
                log.push(issue.format_human_readable());
                report.source_issues.push(issue);
                continue;
            }
        };

        let counts = count_scripts(extract(format, &lines));
        let result = summarize(&counts);
        tracing::debug!(
            fileset = fileset_path,
            file = name,
            script = result.script.as_deref().unwrap_or("-"),
            confidence = result.confidence,
            "Classified content file"
        );
        report.files.push(FileScript {
            name: name.to_owned(),
            result,
        });
        combined.merge(&counts);
    }

    if report.files.is_empty() {
        tracing::info!(fileset = fileset_path, "No text content to check");
        report.matched = report.source_issues.is_empty();
        return report;
    }

    report.result = summarize(&combined);
    report.matched = matches_declared(report.result.script.as_deref(), declared);
    if !report.matched {
        log.push(format!(
            "ERROR: Fileset {fileset_path}: LPTS script is {}, but text script is {} ({}% of letters)",
            declared.unwrap_or_default(),
            display_script(report.result.script.as_deref()),
            report.result.confidence
        ));
    }
    tracing::info!(
        fileset = fileset_path,
        files = report.files.len(),
        script = report.result.script.as_deref().unwrap_or("-"),
        confidence = report.result.confidence,
        matched = report.matched,
        "Checked fileset script"
    );
    report
}
