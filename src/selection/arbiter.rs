use super::fzf::FuzzySelector;
use crate::error::ApiError;
use crate::types::{Selection, NOTE_EXTENSION};
use tracing::debug;

/// True when `target` should be opened as-is rather than searched for: it ends
/// with the note extension or contains a path separator.
///
/// Deliberately shallow. A bare word such as `todo` is always treated as a
/// search term, even if `todo` happens to exist in the vault.
pub fn is_direct_path(target: &str) -> bool {
    if target.is_empty() {
        return false;
    }
    let has_extension = target
        .strip_suffix(NOTE_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.'));
    has_extension || target.contains('/') || target.contains(std::path::MAIN_SEPARATOR)
}

/// Reduces candidates plus an optional argument to a single [`Selection`].
pub struct SelectionArbiter {
    selector: Box<dyn FuzzySelector>,
}

impl SelectionArbiter {
    pub fn new(selector: Box<dyn FuzzySelector>) -> Self {
        Self { selector }
    }

    /// Resolve a selection.
    ///
    /// A path-like `direct_target` is returned without consulting `candidates`.
    /// Anything else seeds the fuzzy selector's query. Cancelling yields
    /// [`Selection::Cancelled`]; confirmed free text comes back verbatim.
    pub fn resolve(&self, candidates: &[String], direct_target: &str) -> Result<Selection, ApiError> {
        if is_direct_path(direct_target) {
            debug!(target = direct_target, "Direct path, skipping fuzzy selection");
            return Ok(Selection::Path(direct_target.to_string()));
        }
        let selection = self.selector.select_file(candidates, direct_target)?;
        debug!(?selection, "Fuzzy selection finished");
        Ok(selection)
    }
}
