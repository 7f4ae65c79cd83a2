//! Post-processing passes over an edit script.
//!
//! Every pass edits the script in place through index-based splicing.
//!
//! - [`cleanup_merge`] -- structural normalization (always applied)
//! - [`cleanup_semantic`] -- trade minimality for human-readable chunks
//! - [`cleanup_semantic_lossless`] -- slide edits onto natural boundaries
//! - [`cleanup_efficiency`] -- trade minimality for fewer operations

mod efficiency;
mod merge;
mod semantic;

pub use efficiency::cleanup_efficiency;
pub use merge::cleanup_merge;
pub use semantic::{cleanup_semantic, cleanup_semantic_lossless};

use seam_types::{Edit, Operation};

/// Turn the equality at `index` into a deletion followed by an insertion
/// of the same text.
fn demote_equality(edits: &mut Vec<Edit>, index: usize) {
    let text = edits[index].text.clone();
    edits.insert(index, Edit::delete(text));
    edits[index + 1].operation = Operation::Insert;
}
