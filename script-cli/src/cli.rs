use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use script_detect::{count_scripts, display_script, matches_declared, summarize};
use script_validator::source::{ContentFormat, content_format_for};
use script_validator::text::extract;
use script_validator::{
    ErrorLog, RecordOutcome, RecordValidator, SourceConfig, SqliteContentDatabase,
    ValidationConfig, check_fileset_at, load_records, output,
};

use crate::logging;

#[derive(Debug, Parser)]
#[command(name = "script-check")]
#[command(about = "Check that fileset text is written in the script LPTS declares", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify the text files of one fileset and compare with the declared script
    Fileset {
        /// Content root: a local directory or s3://<bucket>
        #[arg(long, env = "SCRIPT_CHECK_LOCATION")]
        location: String,

        /// Fileset path under the content root (e.g. ENGESV)
        fileset: String,

        /// Script declared by LPTS (e.g. "Thai Traditional")
        #[arg(long)]
        script: Option<String>,

        /// Additional file names to ignore (glob)
        #[arg(long = "ignore")]
        ignore: Vec<String>,

        /// Maximum number of text files to read
        #[arg(long)]
        max_files: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Validate catalog records against sample text in a SQLite content database
    Records {
        /// Records file (.json, .yaml or .yml)
        #[arg(long)]
        records: PathBuf,

        /// SQLite database holding a bible_verses table
        #[arg(long)]
        database: PathBuf,

        /// Rows sampled per content identifier
        #[arg(long)]
        sample_rows: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Report the dominant script of text files, or of stdin when no file is given
    Detect {
        files: Vec<PathBuf>,

        /// Treat input as tagged markup regardless of file extension
        #[arg(long)]
        markup: bool,

        /// Script to compare against
        #[arg(long)]
        script: Option<String>,
    },
}

#[derive(Serialize)]
struct RecordsSummary<'a> {
    records: usize,
    #[serde(flatten)]
    outcome: RecordOutcome,
    errors: &'a ErrorLog,
}

/// Parse arguments, install logging and run the selected command.
///
/// Returns `Ok(true)` when every check passed.
///
/// # Errors
///
/// Returns an error for fatal conditions: unusable location, unreadable
/// records file or database, unreadable input.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run a parsed command, writing its report to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<bool> {
    match &cli.command {
        Commands::Fileset {
            location,
            fileset,
            script,
            ignore,
            max_files,
            format,
        } => {
            let mut source_config = SourceConfig::default();
            source_config.ignore.extend(ignore.iter().cloned());
            let mut validation_config = ValidationConfig::default();
            if let Some(max_files) = max_files {
                validation_config.max_files = *max_files;
            }

            let mut log = ErrorLog::new();
            let report = check_fileset_at(
                location,
                None,
                fileset,
                script.as_deref(),
                &source_config,
                &validation_config,
                &mut log,
            )?;

            match format {
                OutputFormat::Json => output::write_json(&report, out)?,
                OutputFormat::Human => {
                    output::write_fileset_human(&report, out)?;
                    output::write_log(&log, out)?;
                    write_status(out, report.ok(), &format!("Fileset {fileset}"))?;
                }
            }
            Ok(report.ok())
        }
        Commands::Records {
            records,
            database,
            sample_rows,
            format,
        } => {
            let records = load_records(records)?;
            let db = SqliteContentDatabase::open(database)?;
            let mut config = ValidationConfig::default();
            if let Some(rows) = sample_rows {
                config.sample_rows = *rows;
            }

            let mut log = ErrorLog::new();
            let outcome = RecordValidator::new(&db, &config).validate_records(&records, &mut log);

            match format {
                OutputFormat::Json => output::write_json(
                    &RecordsSummary {
                        records: records.len(),
                        outcome,
                        errors: &log,
                    },
                    out,
                )?,
                OutputFormat::Human => {
                    output::write_records_human(records.len(), &outcome, &log, out)?;
                    write_status(out, log.is_empty(), &format!("{} record(s)", records.len()))?;
                }
            }
            Ok(log.is_empty())
        }
        Commands::Detect {
            files,
            markup,
            script,
        } => detect(files, *markup, script.as_deref(), out),
    }
}

fn detect(
    files: &[PathBuf],
    markup: bool,
    declared: Option<&str>,
    out: &mut dyn Write,
) -> Result<bool> {
    let mut text = Vec::new();
    if files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        let format = if markup {
            ContentFormat::Markup
        } else {
            ContentFormat::Plain
        };
        text.extend(extract(format, &input.lines().collect::<Vec<_>>()));
    }
    for path in files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let format = if markup {
            ContentFormat::Markup
        } else {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(content_format_for)
                .unwrap_or(ContentFormat::Plain)
        };
        text.extend(extract(format, &content.lines().collect::<Vec<_>>()));
    }

    let counts = count_scripts(text);
    let result = summarize(&counts);
    writeln!(
        out,
        "{} {}%",
        result.script.as_deref().unwrap_or("(none)"),
        result.confidence
    )?;
    if !counts.is_empty() {
        writeln!(out, "  {}", counts.summary())?;
    }

    let Some(declared) = declared else {
        return Ok(true);
    };
    let matched = matches_declared(result.script.as_deref(), Some(declared));
    write_status(
        out,
        matched,
        &format!(
            "Declared {declared}, detected {}",
            display_script(result.script.as_deref())
        ),
    )?;
    Ok(matched)
}

fn write_status(out: &mut dyn Write, ok: bool, subject: &str) -> Result<()> {
    if ok {
        writeln!(out, "{}", format!("\u{2713} {subject}: OK").green())?;
    } else {
        writeln!(out, "{}", format!("\u{2717} {subject}: FAILED").red())?;
    }
    Ok(())
}
