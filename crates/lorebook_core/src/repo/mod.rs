//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the entry store contract used by search and services.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Entry::validate()` before persistence.
//! - Absence of an entry is reported as `Ok(None)`, never as an error.

pub mod entry_repo;
