//! Title search entry points.
//!
//! # Responsibility
//! - Expose substring search over stored titles.
//! - Decide when a query is effectively an exact-title lookup.

pub mod title_search;
