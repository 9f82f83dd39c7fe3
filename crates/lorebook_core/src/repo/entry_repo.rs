//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/resolve/save APIs over the `entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - At most one row per `title_key` (case-insensitive uniqueness).
//! - `save_entry` is a single-statement upsert, so one save is atomic and
//!   a re-save under different casing replaces the stored casing.
//! - Listing order is deterministic for a fixed store (`title_key ASC`);
//!   callers must not rely on any particular order beyond stability.

use crate::db::{migrations::latest_version, DbError};
use crate::model::entry::{title_key, Entry, EntryValidationError};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
///
/// Missing entries are not an error; read APIs return `Ok(None)` for them.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Storage(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Storage contract for the entry store.
///
/// The six boundary operations of the core are built from these primitives;
/// `save_entry` deliberately does not reject duplicates so that create and
/// edit flows share one write path.
pub trait EntryRepository {
    /// Returns every stored display title in stable listing order.
    fn list_titles(&self) -> RepoResult<Vec<String>>;
    /// Gets content by exact display title. `None` when absent.
    fn get_content(&self, title: &str) -> RepoResult<Option<String>>;
    /// Maps an arbitrary-case title to its canonical stored casing.
    fn resolve_title(&self, query: &str) -> RepoResult<Option<String>>;
    /// Creates or overwrites one entry as a single atomic write.
    fn save_entry(&self, entry: &Entry) -> RepoResult<()>;
    /// Returns the number of stored entries.
    fn count_entries(&self) -> RepoResult<u64>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository after checking the connection is migrated
    /// and the `entries` table has the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn list_titles(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title FROM entries ORDER BY title_key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut titles = Vec::new();
        while let Some(row) = rows.next()? {
            titles.push(row.get(0)?);
        }
        Ok(titles)
    }

    fn get_content(&self, title: &str) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT content FROM entries WHERE title = ?1;")?;
        let mut rows = stmt.query([title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn resolve_title(&self, query: &str) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title FROM entries WHERE title_key = ?1;")?;
        let mut rows = stmt.query([title_key(query)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn save_entry(&self, entry: &Entry) -> RepoResult<()> {
        entry.validate()?;

        // Upsert keyed on the case-insensitive index: an existing entry
        // keeps its row but takes the new casing and content.
        self.conn.execute(
            "INSERT INTO entries (title, title_key, content)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(title_key) DO UPDATE SET
                title = excluded.title,
                content = excluded.content;",
            params![entry.title, entry.title_key(), entry.content],
        )?;

        Ok(())
    }

    fn count_entries(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "entries")? {
        return Err(RepoError::MissingRequiredTable("entries"));
    }

    for column in ["title", "title_key", "content"] {
        if !table_has_column(conn, "entries", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "entries",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
