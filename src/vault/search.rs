//! Deeper vault search, for callers that want more than the fixed candidate list.

use super::locator::is_valid_vault;
use crate::types::VAULT_MARKER_DIR;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// First direct child directory of `base` (in name order) that is a vault.
pub fn find_vault_in_directory(base: &Path) -> io::Result<Option<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(base)?
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    Ok(dirs.into_iter().find(|dir| is_valid_vault(dir)))
}

fn is_pruned(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name == VAULT_MARKER_DIR {
        return false;
    }
    name.starts_with('.') || name == "node_modules"
}

/// Walk `start` looking for a `.obsidian` directory and return its parent.
///
/// Hidden directories and `node_modules` are not descended into. Unreadable
/// entries are skipped.
pub fn search_for_marker(start: &Path) -> Option<PathBuf> {
    let walker = WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry during vault search");
                continue;
            }
        };
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() != VAULT_MARKER_DIR {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            if is_valid_vault(parent) {
                return Some(parent.to_path_buf());
            }
        }
    }
    None
}
