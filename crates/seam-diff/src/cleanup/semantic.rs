use seam_types::{Edit, Operation};
use tracing::debug;

use super::{cleanup_merge, demote_equality};
use crate::span::{common_overlap, common_suffix};

/// Reduce the number of edits by eliminating semantically trivial
/// equalities.
///
/// An equality no longer than the changes on both sides of it is folded
/// into those changes. Afterwards edits are slid onto natural boundaries
/// and overlaps between neighbouring deletions and insertions are pulled
/// out as equalities.
pub fn cleanup_semantic(edits: &mut Vec<Edit>) {
    let before = edits.len();
    let mut changes = false;
    // Indices of candidate equalities, innermost last.
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    // Chars changed before and after the last equality.
    let mut inserted_before = 0;
    let mut deleted_before = 0;
    let mut inserted_after = 0;
    let mut deleted_after = 0;

    while pointer < edits.len() {
        let edit = &edits[pointer];
        if edit.operation == Operation::Equal {
            equalities.push(pointer);
            inserted_before = inserted_after;
            deleted_before = deleted_after;
            inserted_after = 0;
            deleted_after = 0;
            last_equality = Some(pointer);
        } else {
            if edit.operation == Operation::Insert {
                inserted_after += edit.char_len();
            } else {
                deleted_after += edit.char_len();
            }
            if let Some(index) = last_equality.filter(|&i| !edits[i].is_empty()) {
                let len = edits[index].char_len();
                if len <= inserted_before.max(deleted_before)
                    && len <= inserted_after.max(deleted_after)
                {
                    demote_equality(edits, index);
                    equalities.pop();
                    // The equality before it needs to be reevaluated too.
                    equalities.pop();
                    inserted_before = 0;
                    deleted_before = 0;
                    inserted_after = 0;
                    deleted_after = 0;
                    last_equality = None;
                    changes = true;
                    pointer = equalities.last().map_or(0, |&i| i + 1);
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
    }
    cleanup_semantic_lossless(edits);
    extract_overlaps(edits);

    if changes {
        debug!(before, after = edits.len(), "semantic cleanup folded equalities");
    }
}

/// Find overlaps between deletions and insertions, e.g. `<del>abcxxx</del><ins>xxxdef</ins>`
/// becomes `<del>abc</del>xxx<ins>def</ins>` and `<del>xxxabc</del><ins>defxxx</ins>`
/// becomes `<ins>def</ins>xxx<del>abc</del>`. Only overlaps at least
/// half as long as one of the two edits are extracted.
fn extract_overlaps(edits: &mut Vec<Edit>) {
    let mut pointer = 1;
    while pointer < edits.len() {
        if edits[pointer - 1].operation == Operation::Delete
            && edits[pointer].operation == Operation::Insert
        {
            let deletion = edits[pointer - 1].text.clone();
            let insertion = edits[pointer].text.clone();
            let deletion_chars = deletion.chars().count();
            let insertion_chars = insertion.chars().count();
            let forward = common_overlap(&deletion, &insertion);
            let reverse = common_overlap(&insertion, &deletion);
            let forward_chars = insertion[..forward].chars().count();
            let reverse_chars = deletion[..reverse].chars().count();

            if forward_chars >= reverse_chars {
                if forward_chars * 2 >= deletion_chars || forward_chars * 2 >= insertion_chars {
                    edits.insert(pointer, Edit::equal(&insertion[..forward]));
                    edits[pointer - 1].text = deletion[..deletion.len() - forward].to_string();
                    edits[pointer + 1].text = insertion[forward..].to_string();
                    pointer += 1;
                }
            } else if reverse_chars * 2 >= deletion_chars || reverse_chars * 2 >= insertion_chars {
                edits.insert(pointer, Edit::equal(&deletion[..reverse]));
                edits[pointer - 1] = Edit::insert(&insertion[..insertion.len() - reverse]);
                edits[pointer + 1] = Edit::delete(&deletion[reverse..]);
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

/// Slide single edits surrounded by equalities sideways to align them
/// with word, sentence, or line boundaries.
///
/// For example `The c<ins>at c</ins>ame.` becomes `The <ins>cat </ins>came.`
pub fn cleanup_semantic_lossless(edits: &mut Vec<Edit>) {
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].operation != Operation::Equal
            || edits[pointer + 1].operation != Operation::Equal
        {
            pointer += 1;
            continue;
        }

        let mut equality1 = edits[pointer - 1].text.clone();
        let mut edit = edits[pointer].text.clone();
        let mut equality2 = edits[pointer + 1].text.clone();

        // Shift the edit as far left as possible first.
        let common = common_suffix(&equality1, &edit);
        if common != 0 {
            let shared = edit[edit.len() - common..].to_string();
            equality1.truncate(equality1.len() - common);
            edit = format!("{shared}{}", &edit[..edit.len() - common]);
            equality2.insert_str(0, &shared);
        }

        // Then step right one char at a time, keeping the best-scoring
        // position. Ties go to the later position.
        let mut best_equality1 = equality1.clone();
        let mut best_edit = edit.clone();
        let mut best_equality2 = equality2.clone();
        let mut best_score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
        while let Some(c) = edit.chars().next().filter(|&c| equality2.starts_with(c)) {
            let width = c.len_utf8();
            equality1.push(c);
            edit.drain(..width);
            edit.push(c);
            equality2.drain(..width);
            let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
            if score >= best_score {
                best_score = score;
                best_equality1.clone_from(&equality1);
                best_edit.clone_from(&edit);
                best_equality2.clone_from(&equality2);
            }
        }

        if edits[pointer - 1].text == best_equality1 {
            pointer += 1;
            continue;
        }

        let edit_index = if best_equality1.is_empty() {
            edits.remove(pointer - 1);
            pointer - 1
        } else {
            edits[pointer - 1].text = best_equality1;
            pointer
        };
        edits[edit_index].text = best_edit;
        pointer = if best_equality2.is_empty() {
            edits.remove(edit_index + 1);
            edit_index
        } else {
            edits[edit_index + 1].text = best_equality2;
            edit_index + 1
        };
    }
}

/// Score how natural the boundary between `one` and `two` is, from 6
/// (an edge of the text) down to 0 (the middle of a word).
fn boundary_score(one: &str, two: &str) -> u8 {
    let (Some(last), Some(first)) = (one.chars().next_back(), two.chars().next()) else {
        return 6;
    };

    let non_alphanumeric1 = !last.is_alphanumeric();
    let non_alphanumeric2 = !first.is_alphanumeric();
    let whitespace1 = non_alphanumeric1 && last.is_whitespace();
    let whitespace2 = non_alphanumeric2 && first.is_whitespace();
    let line_break1 = whitespace1 && is_line_break(last);
    let line_break2 = whitespace2 && is_line_break(first);
    let blank_line1 = line_break1 && ends_with_blank_line(one);
    let blank_line2 = line_break2 && starts_with_blank_line(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alphanumeric1 && !whitespace1 && whitespace2 {
        // End of a sentence.
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alphanumeric1 || non_alphanumeric2 {
        1
    } else {
        0
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn ends_with_blank_line(text: &str) -> bool {
    text.ends_with("\n\n") || text.ends_with("\n\r\n")
}

fn starts_with_blank_line(text: &str) -> bool {
    ["\n\n", "\n\r\n", "\r\n\n", "\r\n\r\n"]
        .iter()
        .any(|p| text.starts_with(p))
}
