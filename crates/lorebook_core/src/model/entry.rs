//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical (title, content) record stored by the core.
//! - Provide title validation and case-insensitive key derivation.
//!
//! # Invariants
//! - `title` is non-empty and not whitespace-only after validation.
//! - `title_key()` is the only case-folding rule in the crate; repository
//!   and search layers must not invent their own.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for entry fields checked before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Title is empty or contains only whitespace.
    BlankTitle,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "entry title cannot be empty or whitespace-only"),
        }
    }
}

impl Error for EntryValidationError {}

/// One wiki page: a display title plus its text body.
///
/// The title is the user-visible identifier. Lookups are case-insensitive
/// via [`title_key`], but the casing submitted on the most recent save is
/// what gets stored and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display title, case preserved as submitted (after trimming).
    pub title: String,
    /// Raw text body. No size limit is enforced by the core.
    pub content: String,
}

impl Entry {
    /// Creates an entry, trimming surrounding whitespace from the title.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            content: content.into(),
        }
    }

    /// Checks invariants that must hold before any SQL mutation.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntryValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Returns the case-insensitive index key for this entry's title.
    pub fn title_key(&self) -> String {
        title_key(&self.title)
    }
}

/// Derives the canonical-form index key for a title or title query.
///
/// Trim plus Unicode lowercasing. Two titles address the same entry exactly
/// when their keys are equal.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}
