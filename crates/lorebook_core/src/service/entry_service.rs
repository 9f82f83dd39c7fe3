//! Entry use-case service.
//!
//! # Responsibility
//! - Provide the boundary operations consumed by presentation code:
//!   list, get, save, create, edit, search, random pick.
//! - Route case-insensitive lookups through title resolution.
//!
//! # Invariants
//! - `create_entry` rejects titles that already exist case-insensitively.
//! - `update_entry` saves under the canonical stored casing.
//! - Missing entries surface as `Ok(None)` on reads, not as errors.

use crate::model::entry::Entry;
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use crate::search::title_search::{search_titles, SearchOutcome};
use rand::seq::SliceRandom;

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    /// Submitted title is empty or whitespace-only.
    InvalidTitle(String),
    /// Creation attempted for a title that already exists; carries the
    /// canonical stored casing of the conflicting entry.
    TitleConflict(String),
    /// Edit attempted for a title with no stored entry.
    EntryNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl std::fmt::Display for EntryServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(title) => write!(f, "invalid entry title: `{title}`"),
            Self::TitleConflict(canonical) => {
                write!(f, "an entry titled `{canonical}` already exists")
            }
            Self::EntryNotFound(title) => write!(f, "entry not found: `{title}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EntryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case facade over an entry repository implementation.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored display title in stable listing order.
    pub fn list_entries(&self) -> RepoResult<Vec<String>> {
        self.repo.list_titles()
    }

    /// Maps an arbitrary-case title to its canonical stored casing.
    pub fn resolve_title(&self, query: &str) -> RepoResult<Option<String>> {
        self.repo.resolve_title(query)
    }

    /// Gets entry content, matching the title case-insensitively.
    ///
    /// Resolution runs first so `get_entry("python")` and
    /// `get_entry("Python")` address the same entry.
    pub fn get_entry(&self, title: &str) -> RepoResult<Option<String>> {
        let Some(canonical) = self.repo.resolve_title(title)? else {
            return Ok(None);
        };
        self.repo.get_content(&canonical)
    }

    /// Creates or overwrites one entry (last write wins).
    ///
    /// The shared primitive behind create and edit flows. The stored casing
    /// always follows the most recent submission.
    pub fn save_entry(&self, title: &str, content: &str) -> Result<Entry, EntryServiceError> {
        let entry = Entry::new(title, content);
        entry
            .validate()
            .map_err(|_| EntryServiceError::InvalidTitle(title.to_string()))?;
        self.repo.save_entry(&entry)?;
        Ok(entry)
    }

    /// Creates a new entry, failing when the title already exists
    /// case-insensitively.
    pub fn create_entry(&self, title: &str, content: &str) -> Result<Entry, EntryServiceError> {
        if let Some(canonical) = self.repo.resolve_title(title)? {
            return Err(EntryServiceError::TitleConflict(canonical));
        }
        self.save_entry(title, content)
    }

    /// Replaces the content of an existing entry.
    ///
    /// The entry keeps its canonical stored casing; only content changes.
    pub fn update_entry(&self, title: &str, content: &str) -> Result<Entry, EntryServiceError> {
        let Some(canonical) = self.repo.resolve_title(title)? else {
            return Err(EntryServiceError::EntryNotFound(title.to_string()));
        };
        self.save_entry(&canonical, content)
    }

    /// Searches stored titles for a case-insensitive substring match.
    pub fn search(&self, query: &str) -> RepoResult<SearchOutcome> {
        search_titles(&self.repo, query)
    }

    /// Picks one stored title uniformly at random.
    ///
    /// Returns `Ok(None)` on an empty store; that outcome is distinct from
    /// a storage failure. Calls are independent; no state is carried.
    pub fn pick_random(&self) -> RepoResult<Option<String>> {
        let titles = self.repo.list_titles()?;
        Ok(titles.choose(&mut rand::thread_rng()).cloned())
    }
}
