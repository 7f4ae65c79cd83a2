//! Helpers over whole edit scripts.
//!
//! An edit script is any `&[Edit]`. The helpers here reconstruct the two
//! texts a script describes, measure it, map positions through it, and
//! check the structural invariants every script produced by the diff
//! engine upholds.

use crate::edit::Edit;
use crate::error::{ScriptError, ScriptResult};
use crate::operation::Operation;

/// Rebuild the left text from the `Equal` and `Delete` edits.
pub fn source_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|e| e.operation.in_source())
        .map(|e| e.text.as_str())
        .collect()
}

/// Rebuild the right text from the `Equal` and `Insert` edits.
pub fn target_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|e| e.operation.in_target())
        .map(|e| e.text.as_str())
        .collect()
}

/// Levenshtein distance implied by the script, in chars.
///
/// Each run of changes between two equalities counts as the larger of
/// its deleted and inserted lengths, since a paired delete and insert is
/// one substitution.
pub fn levenshtein(edits: &[Edit]) -> usize {
    let mut distance = 0;
    let mut inserted = 0;
    let mut deleted = 0;
    for edit in edits {
        match edit.operation {
            Operation::Insert => inserted += edit.char_len(),
            Operation::Delete => deleted += edit.char_len(),
            Operation::Equal => {
                distance += inserted.max(deleted);
                inserted = 0;
                deleted = 0;
            }
        }
    }
    distance + inserted.max(deleted)
}

/// Translate a char location in the left text to the matching location in
/// the right text.
///
/// A location that falls inside a deletion maps to the point in the right
/// text where the deletion happened.
pub fn x_index(edits: &[Edit], loc: usize) -> usize {
    let mut source_chars = 0;
    let mut target_chars = 0;
    let mut last_source = 0;
    let mut last_target = 0;
    for edit in edits {
        let len = edit.char_len();
        if edit.operation.in_source() {
            source_chars += len;
        }
        if edit.operation.in_target() {
            target_chars += len;
        }
        if source_chars > loc {
            if edit.operation == Operation::Delete {
                return last_target;
            }
            break;
        }
        last_source = source_chars;
        last_target = target_chars;
    }
    last_target + (loc - last_source)
}

/// Check that no edit is empty and no two neighbours share an operation.
pub fn validate(edits: &[Edit]) -> ScriptResult<()> {
    for (index, edit) in edits.iter().enumerate() {
        if edit.is_empty() {
            return Err(ScriptError::EmptyEdit { index });
        }
        if index > 0 && edits[index - 1].operation == edit.operation {
            return Err(ScriptError::AdjacentOperations {
                index,
                operation: edit.operation,
            });
        }
    }
    Ok(())
}

/// Check that the script reproduces both texts, then [`validate`] it.
///
/// A script describing the wrong texts reports the mismatch before any
/// structural defect. Identical inputs are described by a single `Equal`
/// edit, which for two empty texts is the one place an empty edit is
/// allowed.
pub fn validate_against(edits: &[Edit], left: &str, right: &str) -> ScriptResult<()> {
    if source_text(edits) != left {
        return Err(ScriptError::SourceMismatch);
    }
    if target_text(edits) != right {
        return Err(ScriptError::TargetMismatch);
    }
    let identity = left.is_empty() && right.is_empty() && edits == [Edit::equal("")];
    if identity {
        return Ok(());
    }
    validate(edits)
}
