//! Core domain logic for LoreBook, a minimal encyclopedia store.
//! This crate is the single source of truth for entry invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{title_key, Entry, EntryValidationError};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use search::title_search::{search_titles, SearchOutcome};
pub use service::entry_service::{EntryService, EntryServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
