//! Content sources.
//!
//! A [`ContentLocation`] is resolved once into a [`ContentSource`]: either a
//! local directory tree ([`local::LocalSource`]) or an object-store bucket
//! ([`bucket::BucketSource`]). Both list the content files of a fileset and
//! read one file as lines with the metadata header removed.

pub mod bucket;
pub mod local;

use anyhow::bail;
use glob::Pattern;

use crate::config::{ContentLocation, SourceConfig};
use crate::error::{ContentReadError, SourceIssue};

use bucket::{BucketSource, ObjectStore};
use local::LocalSource;

/// Leading lines of every content file that hold catalog metadata, not text.
pub const HEADER_LINES: usize = 10;

/// Listing and reading capability shared by every content location kind.
pub trait ContentSource {
    /// List the content files of a fileset, relative to the fileset path.
    ///
    /// `Ok(vec![])` means the fileset exists but has nothing to check.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceIssue`] when the fileset cannot be listed at all.
    fn list_content(&self, fileset_path: &str) -> Result<Vec<String>, SourceIssue>;

    /// Read one content file as lines, discarding the first [`HEADER_LINES`].
    ///
    /// # Errors
    ///
    /// Returns [`ContentReadError::NotFound`] for a missing file or object, and
    /// [`ContentReadError::InvalidEncoding`] when the body is not UTF-8.
    fn read_content(&self, fileset_path: &str, name: &str)
    -> Result<Vec<String>, ContentReadError>;

    /// Human-readable description of where content comes from.
    fn describe(&self) -> String;
}

/// Content format for dispatching to the correct text extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// Tagged content (USX, XML, HTML): text lives between tags.
    Markup,
    /// Free prose with no tags.
    Plain,
}

/// Determine the content format from a file name's extension.
///
/// Returns `None` for non-text content (audio, video, images, archives).
#[must_use]
pub fn content_format_for(name: &str) -> Option<ContentFormat> {
    let (_, extension) = name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "usx" | "xml" | "html" | "htm" => Some(ContentFormat::Markup),
        "txt" => Some(ContentFormat::Plain),
        _ => None,
    }
}

/// Split decoded content into lines and drop the metadata header.
#[must_use]
pub fn discard_header(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(HEADER_LINES)
        .map(str::to_owned)
        .collect()
}

/// Resolve a location into the matching content source.
///
/// # Errors
///
/// Returns an error if an ignore pattern is not a valid glob, or if the
/// location names an object store but no store client was supplied.
pub fn open_source<'a>(
    location: &ContentLocation,
    store: Option<&'a dyn ObjectStore>,
    config: &SourceConfig,
) -> anyhow::Result<Box<dyn ContentSource + 'a>> {
    let ignore = compile_ignore(&config.ignore)?;
    match location {
        ContentLocation::Local { root } => Ok(Box::new(LocalSource::new(root.clone(), ignore))),
        ContentLocation::ObjectStore { bucket } => {
            let Some(store) = store else {
                bail!("Location {location} requires an object-store client, but none is configured");
            };
            Ok(Box::new(BucketSource::new(
                store,
                bucket.clone(),
                ignore,
                config.max_keys,
            )))
        }
    }
}

fn compile_ignore(patterns: &[String]) -> anyhow::Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| anyhow::anyhow!("Invalid ignore glob pattern '{p}': {e}"))
        })
        .collect()
}

/// Check if a file name matches any of the ignore patterns.
fn is_ignored(name: &str, ignore: &[Pattern]) -> bool {
    ignore.iter().any(|pattern| pattern.matches(name))
}
