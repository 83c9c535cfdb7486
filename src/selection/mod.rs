//! Note selection
//!
//! Turns a ranked candidate list and an optional argument into a single chosen
//! path, either directly (the argument already looks like a path) or through an
//! interactive fuzzy selector.

pub mod arbiter;
pub mod fzf;

pub use arbiter::{is_direct_path, SelectionArbiter};
pub use fzf::{FuzzySelector, FzfSelector};
