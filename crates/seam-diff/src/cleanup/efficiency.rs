use seam_types::{Edit, Operation};
use tracing::debug;

use super::{cleanup_merge, demote_equality};

/// Reduce the number of edits by eliminating operationally trivial
/// equalities.
///
/// `edit_cost` is the cost of one extra edit operation measured in
/// characters. An equality shorter than that with changes of both kinds on
/// both sides is folded into them, as is one shorter than half of it with
/// three of the four kinds of change around it.
pub fn cleanup_efficiency(edits: &mut Vec<Edit>, edit_cost: usize) {
    let before = edits.len();
    let mut changes = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    // Kinds of change seen before and after the last equality.
    let mut insert_before = false;
    let mut delete_before = false;
    let mut insert_after = false;
    let mut delete_after = false;

    while pointer < edits.len() {
        let edit = &edits[pointer];
        if edit.operation == Operation::Equal {
            if edit.char_len() < edit_cost && (insert_after || delete_after) {
                equalities.push(pointer);
                insert_before = insert_after;
                delete_before = delete_after;
                last_equality = Some(pointer);
            } else {
                equalities.clear();
                last_equality = None;
            }
            insert_after = false;
            delete_after = false;
        } else {
            if edit.operation == Operation::Delete {
                delete_after = true;
            } else {
                insert_after = true;
            }

            if let Some(index) = last_equality.filter(|&i| !edits[i].is_empty()) {
                let surrounding = [insert_before, delete_before, insert_after, delete_after]
                    .iter()
                    .filter(|&&seen| seen)
                    .count();
                if surrounding == 4 || (edits[index].char_len() * 2 < edit_cost && surrounding == 3)
                {
                    demote_equality(edits, index);
                    equalities.pop();
                    last_equality = None;
                    changes = true;
                    if insert_before && delete_before {
                        // Nothing before this point can change again.
                        insert_after = true;
                        delete_after = true;
                        equalities.clear();
                    } else {
                        equalities.pop();
                        insert_after = false;
                        delete_after = false;
                        pointer = equalities.last().map_or(0, |&i| i + 1);
                        continue;
                    }
                }
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
        debug!(before, after = edits.len(), edit_cost, "efficiency cleanup folded equalities");
    }
}
