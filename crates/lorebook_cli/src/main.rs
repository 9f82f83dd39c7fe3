//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lorebook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use lorebook_core::db::open_db_in_memory;
use lorebook_core::{EntryService, SqliteEntryRepository};

fn main() {
    println!("lorebook_core version={}", lorebook_core::core_version());

    // Exercise the full open -> repo -> service path against a throwaway
    // in-memory store so wiring failures show up immediately.
    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("lorebook_core db_open failed: {err}");
            std::process::exit(1);
        }
    };
    let repo = match SqliteEntryRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("lorebook_core repository init failed: {err}");
            std::process::exit(1);
        }
    };
    let service = EntryService::new(repo);

    match service.list_entries() {
        Ok(titles) => println!("lorebook_core smoke entries={}", titles.len()),
        Err(err) => {
            eprintln!("lorebook_core listing failed: {err}");
            std::process::exit(1);
        }
    }
}
