use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use vaultpick::error::ApiError;
use vaultpick::session::SessionOutcome;
use vaultpick::types::Selection;

use crate::support::{write_aged, CountingGit, Harness};

#[test]
fn candidates_are_offered_most_recent_first() {
    let harness = Harness::new(Selection::Path("new.md".to_string()));
    write_aged(harness.root(), "old.md", Duration::from_secs(2 * 3600));
    write_aged(harness.root(), "new.md", Duration::from_secs(30));

    let outcome = harness.session.run_interactive("").unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::Opened {
            path: "new.md".to_string(),
            created: false
        }
    );
    let shown = harness.shown.lock().clone();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].0, vec!["new.md", "old.md"]);
    assert_eq!(shown[0].1, "");
    assert_eq!(*harness.opened.lock(), vec![PathBuf::from("new.md")]);
}

#[test]
fn search_term_seeds_the_selector_query() {
    let harness = Harness::new(Selection::Cancelled);
    write_aged(harness.root(), "projects/alpha.md", Duration::from_secs(10));

    harness.session.run_interactive("alpha").unwrap();

    let shown = harness.shown.lock().clone();
    assert_eq!(shown[0].0, vec!["projects/alpha.md"]);
    assert_eq!(shown[0].1, "alpha");
}

#[test]
fn direct_path_skips_listing_and_fetch() {
    let harness = Harness::new(Selection::Cancelled);
    write_aged(harness.root(), "old.md", Duration::from_secs(3600));

    let outcome = harness.session.run_interactive("old.md").unwrap();
    harness.settle();

    assert_eq!(
        outcome,
        SessionOutcome::DirectOpen {
            path: "old.md".to_string(),
            created: false
        }
    );
    assert!(harness.shown.lock().is_empty());
    assert_eq!(harness.fetch_count(), 0);
    assert_eq!(*harness.opened.lock(), vec![PathBuf::from("old.md")]);
}

#[test]
fn direct_path_creates_missing_note_with_parents() {
    let harness = Harness::new(Selection::Cancelled);

    let outcome = harness
        .session
        .run_interactive("journal/2024/today.md")
        .unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::DirectOpen {
            path: "journal/2024/today.md".to_string(),
            created: true
        }
    );
    let created = harness.root().join("journal/2024/today.md");
    assert_eq!(fs::read_to_string(created).unwrap(), "");
}

#[test]
fn interactive_session_starts_background_fetch() {
    let harness = Harness::new(Selection::Cancelled);

    harness.session.run_interactive("").unwrap();
    harness.settle();

    assert_eq!(harness.fetch_count(), 1);
}

#[test]
fn cancelling_in_empty_vault_creates_nothing() {
    let harness = Harness::new(Selection::Cancelled);

    let outcome = harness.session.run_interactive("").unwrap();

    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert!(harness.opened.lock().is_empty());
    assert_eq!(fs::read_dir(harness.root()).unwrap().count(), 0);
    // The selector still ran so a first note could be typed in.
    assert_eq!(harness.shown.lock()[0].0, Vec::<String>::new());
}

#[test]
fn typed_name_without_match_is_created() {
    let harness = Harness::new(Selection::Path("c.md".to_string()));
    write_aged(harness.root(), "a.md", Duration::from_secs(20));
    write_aged(harness.root(), "b.md", Duration::from_secs(10));

    let outcome = harness.session.run_interactive("").unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::Opened {
            path: "c.md".to_string(),
            created: true
        }
    );
    assert!(harness.root().join("c.md").is_file());
    assert_eq!(*harness.opened.lock(), vec![PathBuf::from("c.md")]);
}

#[test]
fn selection_escaping_vault_is_rejected() {
    let harness = Harness::new(Selection::Path("../escape.md".to_string()));

    let err = harness.session.run_interactive("").unwrap_err();

    assert!(matches!(err, ApiError::MaterializationFailed { .. }));
    assert!(harness.opened.lock().is_empty());
}

#[test]
fn listing_skips_hidden_and_foreign_files() {
    let harness = Harness::new(Selection::Cancelled);
    write_aged(harness.root(), "keep.md", Duration::from_secs(5));
    write_aged(harness.root(), "image.png", Duration::from_secs(1));
    write_aged(harness.root(), ".obsidian/workspace.md", Duration::from_secs(1));
    write_aged(harness.root(), ".hidden.md", Duration::from_secs(1));

    let list = harness.session.list_files().unwrap();

    assert_eq!(list.display_paths(), vec!["keep.md"]);
}

#[test]
fn missing_vault_root_fails_listing() {
    let harness = Harness::new(Selection::Cancelled);
    let root = harness.root().to_path_buf();
    fs::remove_dir_all(&root).unwrap();

    let err = harness.session.run_interactive("").unwrap_err();

    assert!(matches!(err, ApiError::ListingFailed { .. }));
    assert!(harness.shown.lock().is_empty());
}

#[test]
fn diverged_vault_still_opens_selection() {
    let harness = Harness::with_git(
        Selection::Path("a.md".to_string()),
        CountingGit::diverged(3, 1),
    );
    write_aged(harness.root(), "a.md", Duration::from_secs(10));

    let outcome = harness.session.run_interactive("").unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::Opened {
            path: "a.md".to_string(),
            created: false
        }
    );
    // Both behind and ahead were counted for the advisory.
    assert_eq!(harness.count_queries(), 2);
    assert_eq!(*harness.opened.lock(), vec![PathBuf::from("a.md")]);
}

#[test]
fn status_check_failure_does_not_abort_session() {
    let harness = Harness::with_git(
        Selection::Path("a.md".to_string()),
        CountingGit::outside_repository(),
    );
    write_aged(harness.root(), "a.md", Duration::from_secs(10));

    let outcome = harness.session.run_interactive("").unwrap();

    assert_eq!(
        outcome,
        SessionOutcome::Opened {
            path: "a.md".to_string(),
            created: false
        }
    );
    assert_eq!(harness.count_queries(), 0);
    assert_eq!(*harness.opened.lock(), vec![PathBuf::from("a.md")]);
}

#[test]
fn direct_open_skips_divergence_check() {
    let harness = Harness::with_git(Selection::Cancelled, CountingGit::diverged(5, 0));

    harness.session.run_interactive("new.md").unwrap();

    assert_eq!(harness.count_queries(), 0);
}
