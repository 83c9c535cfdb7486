//! Format listings and sync advisories for the terminal.

use crate::types::{RankedList, SyncStatus};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Advisory shown after a session when the vault has diverged from its
/// upstream. `None` when there is nothing to report.
pub fn format_sync_advisory(status: &SyncStatus) -> Option<String> {
    if !status.is_diverged() {
        return None;
    }
    let mut out = String::new();
    if status.behind > 0 {
        out.push_str(&format!(
            "{} Repository is {} commits behind origin\n",
            "!".yellow().bold(),
            status.behind
        ));
        out.push_str("   Run 'vaultpick --sync' to update\n");
    }
    if status.ahead > 0 {
        out.push_str(&format!(
            "{} Repository is {} commits ahead of origin\n",
            "^".cyan().bold(),
            status.ahead
        ));
    }
    Some(out)
}

/// Ranked list as plain text, one relative path per line.
pub fn format_listing_text(list: &RankedList) -> String {
    list.display_paths().join("\n")
}

#[derive(Debug, Serialize)]
struct ListingEntry {
    path: String,
    modified: String,
}

/// Ranked list as a JSON array of `{path, modified}` with RFC 3339 timestamps.
pub fn format_listing_json(list: &RankedList) -> Result<String, serde_json::Error> {
    let entries: Vec<ListingEntry> = list
        .entries()
        .iter()
        .map(|entry| ListingEntry {
            path: entry.display_path(),
            modified: DateTime::<Utc>::from(entry.modified).to_rfc3339(),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}
