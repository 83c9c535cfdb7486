//! Recency ranking of vault notes
//!
//! Lists every note under a vault root, most recently modified first. Ranking is
//! a pure function of the filesystem at call time; nothing is persisted.

use crate::error::ApiError;
use crate::types::{CandidateFile, RankedList, NOTE_EXTENSION};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walks a vault and ranks its note files by modification time.
#[derive(Debug, Clone)]
pub struct FileRanker {
    extension: String,
}

impl Default for FileRanker {
    fn default() -> Self {
        Self::new(NOTE_EXTENSION)
    }
}

impl FileRanker {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// List notes under `root`, newest first, as paths relative to `root`.
    ///
    /// Hidden entries are skipped at every depth and hidden directories are not
    /// descended into. A root that cannot be read fails the call; any other
    /// unreadable entry is skipped.
    pub fn list(&self, root: &Path) -> Result<RankedList, ApiError> {
        fs::read_dir(root).map_err(|source| ApiError::ListingFailed {
            root: root.to_path_buf(),
            source,
        })?;

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        let mut collected = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        let source = err
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("directory loop at root"));
                        return Err(ApiError::ListingFailed {
                            root: root.to_path_buf(),
                            source,
                        });
                    }
                    warn!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            if !is_file(&entry) || !self.is_note(entry.path()) {
                continue;
            }
            if let Some(candidate) = candidate_for(root, &entry) {
                collected.push(candidate);
            }
        }

        debug!(root = %root.display(), count = collected.len(), "Listed notes");
        Ok(RankedList::from_unsorted(collected))
    }

    fn is_note(&self, path: &Path) -> bool {
        path.extension() == Some(OsStr::new(&self.extension))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().as_encoded_bytes().starts_with(b".")
}

// Symlinked notes count when they point at a regular file.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn candidate_for(root: &Path, entry: &DirEntry) -> Option<CandidateFile> {
    let modified = match entry.metadata() {
        Ok(meta) => meta.modified(),
        Err(err) => Err(std::io::Error::other(err)),
    };
    let modified = match modified {
        Ok(modified) => modified,
        Err(err) => {
            warn!(path = %entry.path().display(), error = %err, "Skipping note without metadata");
            return None;
        }
    };
    let path: PathBuf = entry.path().strip_prefix(root).ok()?.to_path_buf();
    Some(CandidateFile { path, modified })
}
