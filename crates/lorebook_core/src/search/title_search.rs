//! Case-insensitive substring search over entry titles.
//!
//! # Responsibility
//! - Filter the full title listing against a normalized query.
//! - Short-circuit to an exact hit when the query uniquely names one title.
//!
//! # Invariants
//! - Results preserve the repository's listing order.
//! - A blank query matches every title. This mirrors the reference
//!   behavior and is covered by tests; it is not an accident.

use crate::model::entry::title_key;
use crate::repo::entry_repo::{EntryRepository, RepoResult};

/// Outcome of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query case-insensitively equals exactly one stored title.
    /// Callers should navigate straight to this entry.
    ExactHit(String),
    /// Zero or more substring matches, in listing order.
    Results(Vec<String>),
}

impl SearchOutcome {
    /// Returns the matched titles regardless of outcome shape.
    pub fn titles(&self) -> Vec<String> {
        match self {
            Self::ExactHit(title) => vec![title.clone()],
            Self::Results(titles) => titles.clone(),
        }
    }
}

/// Searches stored titles for a case-insensitive substring match.
///
/// The query is trimmed and lowercased with the same folding rule the
/// store uses for uniqueness, so `search("python")` and `search(" PYTHON ")`
/// behave identically.
pub fn search_titles<R: EntryRepository>(repo: &R, raw_query: &str) -> RepoResult<SearchOutcome> {
    let normalized = title_key(raw_query);

    let matches: Vec<String> = repo
        .list_titles()?
        .into_iter()
        .filter(|title| title.to_lowercase().contains(&normalized))
        .collect();

    if matches.len() == 1 && matches[0].to_lowercase() == normalized {
        let title = matches.into_iter().next().unwrap_or_default();
        return Ok(SearchOutcome::ExactHit(title));
    }

    Ok(SearchOutcome::Results(matches))
}
