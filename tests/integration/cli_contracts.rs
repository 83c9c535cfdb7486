use std::time::Duration;

use clap::Parser;
use vaultpick::tooling::cli::{Action, Cli, CliContext, Mode};
use vaultpick::types::Selection;

use crate::support::{write_aged, Harness};

#[test]
fn flags_select_a_single_action() {
    let cli = Cli::try_parse_from(["vaultpick", "--list", "--json"]).unwrap();
    assert_eq!(cli.action(), Action::List { json: true });

    let cli = Cli::try_parse_from(["vaultpick", "-s"]).unwrap();
    assert_eq!(cli.action(), Action::Status);

    let cli = Cli::try_parse_from(["vaultpick", "--sync", "-d"]).unwrap();
    assert_eq!(cli.action(), Action::Sync);
    assert!(cli.debug);
}

#[test]
fn conflicting_entry_points_are_rejected() {
    assert!(Cli::try_parse_from(["vaultpick", "--list", "--status"]).is_err());
    assert!(Cli::try_parse_from(["vaultpick", "--status", "--sync"]).is_err());
    assert!(Cli::try_parse_from(["vaultpick", "--json"]).is_err());
}

#[test]
fn mode_accepts_each_kind() {
    for (arg, mode) in [
        ("tips", Mode::Tips),
        ("obsidian", Mode::Obsidian),
        ("auto", Mode::Auto),
    ] {
        let cli = Cli::try_parse_from(["vaultpick", "-m", arg]).unwrap();
        assert_eq!(cli.mode, mode);
    }
    assert!(Cli::try_parse_from(["vaultpick", "--mode", "notion"]).is_err());
}

#[test]
fn list_json_contract_has_path_and_timestamp() {
    let harness = Harness::new(Selection::Cancelled);
    write_aged(harness.root(), "old.md", Duration::from_secs(7200));
    write_aged(harness.root(), "new.md", Duration::from_secs(30));
    let context = CliContext::from_session(harness.session);

    let output = context.execute(&Action::List { json: true }).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["path"], "new.md");
    assert_eq!(entries[1]["path"], "old.md");
    let stamp = entries[0]["modified"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[test]
fn list_text_is_one_path_per_line() {
    let harness = Harness::new(Selection::Cancelled);
    write_aged(harness.root(), "b/second.md", Duration::from_secs(60));
    write_aged(harness.root(), "first.md", Duration::from_secs(1));
    let context = CliContext::from_session(harness.session);

    let output = context.execute(&Action::List { json: false }).unwrap();

    assert_eq!(output, "first.md\nb/second.md");
}
