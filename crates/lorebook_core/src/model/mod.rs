//! Domain model for encyclopedia entries.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep title normalization rules in one place.
//!
//! # Invariants
//! - Every entry is identified by its display title; case-insensitive
//!   uniqueness is derived from `entry::title_key`.

pub mod entry;
