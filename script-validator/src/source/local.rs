//! Local filesystem content source.
//!
//! Each fileset is a directory directly under the configured root. Only the
//! regular files at the top of that directory are content; subdirectories,
//! hidden files and ignored names are skipped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use super::{ContentSource, discard_header, is_ignored};
use crate::error::{ContentReadError, SourceIssue, SourceIssueKind};

/// Content stored as `root/<fileset>/<file>` on local disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
    ignore: Vec<Pattern>,
}

impl LocalSource {
    #[must_use]
    pub fn new(root: PathBuf, ignore: Vec<Pattern>) -> Self {
        Self { root, ignore }
    }

    fn fileset_dir(&self, fileset_path: &str) -> PathBuf {
        self.root.join(fileset_path)
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

impl ContentSource for LocalSource {
    fn list_content(&self, fileset_path: &str) -> Result<Vec<String>, SourceIssue> {
        let dir = self.fileset_dir(fileset_path);
        if !dir.is_dir() {
            return Err(SourceIssue::new(
                dir.display().to_string(),
                SourceIssueKind::InvalidDirectory,
                format!("Invalid pathname {}", dir.display()),
            ));
        }

        let mut names = Vec::new();
        for entry_result in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    tracing::warn!(dir = %dir.display(), "Skipping unreadable entry: {walk_err}");
                    continue;
                }
            };
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if is_hidden(name) || is_ignored(name, &self.ignore) || !entry.path().is_file() {
                continue;
            }
            names.push(name.to_owned());
        }

        tracing::debug!(dir = %dir.display(), files = names.len(), "Listed local fileset");
        Ok(names)
    }

    fn read_content(
        &self,
        fileset_path: &str,
        name: &str,
    ) -> Result<Vec<String>, ContentReadError> {
        let path = self.fileset_dir(fileset_path).join(name);
        let bytes = std::fs::read(&path).map_err(|e| io_error(&path, e))?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ContentReadError::InvalidEncoding(path.display().to_string()))?;
        Ok(discard_header(&content))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ContentReadError {
    if source.kind() == ErrorKind::NotFound {
        ContentReadError::NotFound(path.display().to_string())
    } else {
        ContentReadError::Io {
            path: path.to_owned(),
            source,
        }
    }
}
