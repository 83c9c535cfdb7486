//! Vault discovery
//!
//! Resolves the directory holding the user's notes. An explicit override is
//! authoritative; otherwise a short list of conventional locations under the
//! home directory is probed, and a default path is returned when none match.

pub mod locator;
pub mod search;

pub use locator::{is_valid_vault, VaultLocator};
pub use search::{find_vault_in_directory, search_for_marker};
