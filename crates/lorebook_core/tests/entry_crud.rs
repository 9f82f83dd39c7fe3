use lorebook_core::db::open_db_in_memory;
use lorebook_core::{
    Entry, EntryRepository, EntryService, EntryServiceError, RepoError, SqliteEntryRepository,
};
use rusqlite::Connection;

#[test]
fn save_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("Git", "intro text")).unwrap();

    let content = repo.get_content("Git").unwrap().unwrap();
    assert_eq!(content, "intro text");
    assert_eq!(repo.count_entries().unwrap(), 1);
}

#[test]
fn resolution_bridges_case_variants_to_one_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("Git", "intro text")).unwrap();

    assert_eq!(repo.resolve_title("git").unwrap().as_deref(), Some("Git"));
    assert_eq!(repo.resolve_title("GIT").unwrap().as_deref(), Some("Git"));
    assert_eq!(repo.resolve_title(" git ").unwrap().as_deref(), Some("Git"));
    assert_eq!(repo.resolve_title("gi").unwrap(), None);
}

#[test]
fn get_content_is_exact_match_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("Python", "snake language")).unwrap();

    assert!(repo.get_content("Python").unwrap().is_some());
    // Case-insensitive lookup is the resolution layer's job, not this
    // primitive's.
    assert!(repo.get_content("python").unwrap().is_none());
}

#[test]
fn overwrite_replaces_content_and_keeps_one_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("CSS", "first draft")).unwrap();
    repo.save_entry(&Entry::new("CSS", "second draft")).unwrap();

    assert_eq!(repo.count_entries().unwrap(), 1);
    assert_eq!(
        repo.get_content("CSS").unwrap().as_deref(),
        Some("second draft")
    );
}

#[test]
fn overwrite_under_different_casing_replaces_stored_casing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("Python", "original")).unwrap();
    repo.save_entry(&Entry::new("PYTHON", "rewritten")).unwrap();

    assert_eq!(repo.count_entries().unwrap(), 1);
    assert_eq!(repo.list_titles().unwrap(), vec!["PYTHON".to_string()]);
    assert_eq!(
        repo.resolve_title("python").unwrap().as_deref(),
        Some("PYTHON")
    );
    assert_eq!(repo.get_content("PYTHON").unwrap().as_deref(), Some("rewritten"));
}

// Concurrency policy is last-write-wins: saves to the same title are each
// atomic, and whichever runs later determines the stored state. There is no
// conflict token or history.
#[test]
fn sequential_saves_document_last_write_wins() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("HTML", "writer one")).unwrap();
    repo.save_entry(&Entry::new("html", "writer two")).unwrap();

    assert_eq!(repo.count_entries().unwrap(), 1);
    assert_eq!(repo.get_content("html").unwrap().as_deref(), Some("writer two"));
}

#[test]
fn listing_is_deterministic_for_a_fixed_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.save_entry(&Entry::new("Python", "p")).unwrap();
    repo.save_entry(&Entry::new("CSS", "c")).unwrap();
    repo.save_entry(&Entry::new("HTML", "h")).unwrap();

    let first = repo.list_titles().unwrap();
    let second = repo.list_titles().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn empty_store_reads_return_absent_not_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    assert!(repo.list_titles().unwrap().is_empty());
    assert_eq!(repo.get_content("Anything").unwrap(), None);
    assert_eq!(repo.resolve_title("Anything").unwrap(), None);
    assert_eq!(repo.count_entries().unwrap(), 0);
}

#[test]
fn blank_title_is_rejected_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let err = repo.save_entry(&Entry::new("   ", "body")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count_entries().unwrap(), 0);
}

#[test]
fn service_get_entry_routes_through_resolution() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = EntryService::new(repo);

    service.save_entry("Git", "intro text").unwrap();

    assert_eq!(
        service.get_entry("git").unwrap().as_deref(),
        Some("intro text")
    );
    assert_eq!(
        service.get_entry("GIT").unwrap().as_deref(),
        Some("intro text")
    );
    assert_eq!(service.get_entry("missing").unwrap(), None);
}

#[test]
fn service_create_entry_detects_case_insensitive_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = EntryService::new(repo);

    service.create_entry("Python", "snake language").unwrap();

    let err = service.create_entry("PYTHON", "duplicate").unwrap_err();
    match err {
        EntryServiceError::TitleConflict(canonical) => assert_eq!(canonical, "Python"),
        other => panic!("unexpected error: {other}"),
    }

    // The original content survives the rejected creation.
    assert_eq!(
        service.get_entry("python").unwrap().as_deref(),
        Some("snake language")
    );
}

#[test]
fn service_update_entry_keeps_canonical_casing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = EntryService::new(repo);

    service.create_entry("Git", "intro text").unwrap();

    let updated = service.update_entry("git", "revised text").unwrap();
    assert_eq!(updated.title, "Git");
    assert_eq!(service.list_entries().unwrap(), vec!["Git".to_string()]);
    assert_eq!(
        service.get_entry("Git").unwrap().as_deref(),
        Some("revised text")
    );
}

#[test]
fn service_update_entry_fails_for_missing_titles() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = EntryService::new(repo);

    let err = service.update_entry("Ghost", "body").unwrap_err();
    assert!(matches!(err, EntryServiceError::EntryNotFound(_)));
}

#[test]
fn service_rejects_blank_titles_on_save_and_create() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = EntryService::new(repo);

    let save_err = service.save_entry("   ", "body").unwrap_err();
    assert!(matches!(save_err, EntryServiceError::InvalidTitle(_)));

    let create_err = service.create_entry("", "body").unwrap_err();
    assert!(matches!(create_err, EntryServiceError::InvalidTitle(_)));

    assert!(service.list_entries().unwrap().is_empty());
}

#[test]
fn service_save_entry_trims_submitted_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let service = EntryService::new(repo);

    let saved = service.save_entry("  Git  ", "intro text").unwrap();
    assert_eq!(saved.title, "Git");
    assert_eq!(service.list_entries().unwrap(), vec!["Git".to_string()]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_entries_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        lorebook_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("entries"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE entries (
            title TEXT NOT NULL PRIMARY KEY,
            content TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        lorebook_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "entries",
            column: "title_key"
        })
    ));
}
