//! Diff engine for Seam.
//!
//! Computes character-level edit scripts between two texts: shared
//! affixes are trimmed, large shared substrings split the problem, large
//! texts are first compared line by line, and the remainder is solved
//! exactly with Myers' bisection. Cleanup passes then normalize the
//! script and optionally trade minimality for readability.
//!
//! # Key Types
//!
//! - [`Differ`] / [`DiffConfig`] -- Configured diff entry point
//! - [`Edit`] / [`Operation`] -- Script units, re-exported from `seam-types`
//! - [`HalfMatch`] -- A split around one long common substring
//! - [`LineTable`] / [`LineEncoding`] -- Line-to-char encoding for line mode

mod bisect;
pub mod cleanup;
pub mod config;
pub mod differ;
mod engine;
pub mod error;
pub mod half_match;
pub mod lines;
pub mod span;

pub use cleanup::{cleanup_efficiency, cleanup_merge, cleanup_semantic, cleanup_semantic_lossless};
pub use config::{Deadline, DiffConfig};
pub use differ::Differ;
pub use error::{DiffError, DiffResult};
pub use half_match::{half_match, HalfMatch};
pub use lines::{LineEncoding, LineTable};
pub use seam_types::{Edit, Operation};
pub use span::{common_overlap, common_prefix, common_suffix};

/// Diff `left` against `right` with the default configuration.
pub fn diff(left: &str, right: &str) -> Vec<Edit> {
    Differ::new().diff(left, right)
}
