//! Content database adapters.
//!
//! The record validator only needs a bounded sample of verse text per content
//! identifier. [`ContentDatabase`] is that seam; [`SqliteContentDatabase`]
//! reads a `bible_verses` table and [`MemoryContentDatabase`] serves fixtures.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags, params};

use crate::error::ContentReadError;

/// Source of sample verse text keyed by content identifier.
pub trait ContentDatabase {
    /// Return up to `limit` rows of text for `content_id`, in storage order.
    ///
    /// An empty vector means the identifier has no text content.
    ///
    /// # Errors
    ///
    /// Returns [`ContentReadError::Database`] if the query fails.
    fn sample_text(&self, content_id: &str, limit: usize) -> Result<Vec<String>, ContentReadError>;
}

/// Query used against the verse table; one text row per verse.
const SAMPLE_QUERY: &str =
    "SELECT verse_text FROM bible_verses WHERE fileset_id = ?1 ORDER BY rowid LIMIT ?2";

/// Verse text stored in a SQLite database.
pub struct SqliteContentDatabase {
    conn: Connection,
}

impl SqliteContentDatabase {
    /// Open an existing database file read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened as a SQLite database.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open content database {}", path.display()))?;
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl ContentDatabase for SqliteContentDatabase {
    fn sample_text(&self, content_id: &str, limit: usize) -> Result<Vec<String>, ContentReadError> {
        let db_error = |e: rusqlite::Error| ContentReadError::Database {
            content_id: content_id.to_owned(),
            message: e.to_string(),
        };
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare_cached(SAMPLE_QUERY).map_err(db_error)?;
        let rows = stmt
            .query_map(params![content_id, limit], |row| {
                row.get::<_, Option<String>>(0)
            })
            .map_err(db_error)?;

        let mut text = Vec::new();
        for row in rows {
            if let Some(line) = row.map_err(db_error)? {
                text.push(line);
            }
        }
        Ok(text)
    }
}

/// In-memory verse text, for fixtures and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentDatabase {
    rows: HashMap<String, Vec<String>>,
}

impl MemoryContentDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, content_id: &str, rows: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .entry(content_id.to_owned())
            .or_default()
            .extend(rows.into_iter().map(Into::into));
    }
}

impl ContentDatabase for MemoryContentDatabase {
    fn sample_text(&self, content_id: &str, limit: usize) -> Result<Vec<String>, ContentReadError> {
        Ok(self
            .rows
            .get(content_id)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sqlite_fixture() -> SqliteContentDatabase {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE bible_verses (
                fileset_id TEXT NOT NULL,
                book_id TEXT NOT NULL,
                chapter INTEGER NOT NULL,
                verse_start INTEGER NOT NULL,
                verse_text TEXT
            );",
        )
        .unwrap();
        for verse in 1..=15 {
            conn.execute(
                "INSERT INTO bible_verses VALUES ('ENGESV', 'GEN', 1, ?1, ?2)",
                params![verse, format!("verse {verse}")],
            )
            .unwrap();
        }
        conn.execute(
            "INSERT INTO bible_verses VALUES ('ENGKJV', 'GEN', 1, 1, NULL)",
            [],
        )
        .unwrap();
        SqliteContentDatabase::from_connection(conn)
    }

    #[test]
    fn test_sqlite_sample_is_bounded_and_ordered() {
        let db = sqlite_fixture();
        let rows = db.sample_text("ENGESV", 10).unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], "verse 1");
        assert_eq!(rows[9], "verse 10");
    }

    #[test]
    fn test_sqlite_unknown_id_is_empty() {
        let db = sqlite_fixture();
        assert!(db.sample_text("FRNLSG", 10).unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_null_text_is_skipped() {
        let db = sqlite_fixture();
        assert!(db.sample_text("ENGKJV", 10).unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_missing_table_is_error() {
        let db = SqliteContentDatabase::from_connection(Connection::open_in_memory().unwrap());
        let err = db.sample_text("ENGESV", 10).unwrap_err();
        assert!(matches!(err, ContentReadError::Database { .. }), "got: {err}");
        assert!(err.to_string().contains("ENGESV"));
    }

    #[test]
    fn test_sqlite_open_missing_file_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(SqliteContentDatabase::open(&tmp.path().join("absent.db")).is_err());
    }

    #[test]
    fn test_memory_database_limit() {
        let mut db = MemoryContentDatabase::new();
        db.insert("ENGESV", ["a", "b", "c"]);
        assert_eq!(db.sample_text("ENGESV", 2).unwrap(), vec!["a", "b"]);
        assert!(db.sample_text("ENGKJV", 2).unwrap().is_empty());
    }
}
