use seam_types::{Edit, Operation};

use crate::span::{common_prefix, common_suffix};

/// Normalize a script: drop empty edits, merge neighbours of the same
/// kind, factor text shared by a deletion and insertion into the
/// surrounding equalities, and shift single edits sideways when that
/// removes an equality.
///
/// Each run of changes ends up as at most one `Delete` followed by one
/// `Insert`. The pass repeats until nothing shifts, so it is idempotent.
pub fn cleanup_merge(edits: &mut Vec<Edit>) {
    loop {
        merge_runs(edits);
        if !shift_single_edits(edits) {
            break;
        }
    }
}

fn merge_runs(edits: &mut Vec<Edit>) {
    edits.retain(|e| !e.is_empty());
    // Sentinel so the final run is flushed like any other.
    edits.push(Edit::equal(""));

    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete = String::new();
    let mut text_insert = String::new();
    while pointer < edits.len() {
        match edits[pointer].operation {
            Operation::Insert => {
                count_insert += 1;
                text_insert.push_str(&edits[pointer].text);
                pointer += 1;
            }
            Operation::Delete => {
                count_delete += 1;
                text_delete.push_str(&edits[pointer].text);
                pointer += 1;
            }
            Operation::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let common = common_prefix(&text_insert, &text_delete);
                        if common != 0 {
                            let run_start = pointer - count_delete - count_insert;
                            if run_start > 0 && edits[run_start - 1].operation == Operation::Equal {
                                edits[run_start - 1].text.push_str(&text_insert[..common]);
                            } else {
                                edits.insert(0, Edit::equal(&text_insert[..common]));
                                pointer += 1;
                            }
                            text_insert.drain(..common);
                            text_delete.drain(..common);
                        }
                        let common = common_suffix(&text_insert, &text_delete);
                        if common != 0 {
                            let split = text_insert.len() - common;
                            edits[pointer].text.insert_str(0, &text_insert[split..]);
                            text_insert.truncate(split);
                            text_delete.truncate(text_delete.len() - common);
                        }
                    }

                    let run_start = pointer - count_delete - count_insert;
                    let mut merged = Vec::with_capacity(2);
                    if !text_delete.is_empty() {
                        merged.push(Edit::delete(std::mem::take(&mut text_delete)));
                    }
                    if !text_insert.is_empty() {
                        merged.push(Edit::insert(std::mem::take(&mut text_insert)));
                    }
                    let merged_len = merged.len();
                    edits.splice(run_start..pointer, merged);
                    // A run factored away entirely leaves two equalities
                    // side by side; revisit the second so they merge.
                    pointer = if merged_len == 0 {
                        run_start
                    } else {
                        run_start + merged_len + 1
                    };
                } else if pointer != 0 && edits[pointer - 1].operation == Operation::Equal {
                    let text = edits.remove(pointer).text;
                    edits[pointer - 1].text.push_str(&text);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }
    if edits.last().is_some_and(|e| e.is_empty()) {
        edits.pop();
    }
}

/// Shift single edits surrounded by equalities so that one equality is
/// absorbed, e.g. `A<ins>BA</ins>C` becomes `<ins>AB</ins>AC`.
fn shift_single_edits(edits: &mut Vec<Edit>) -> bool {
    let mut changed = false;
    let mut pointer = 1;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].operation == Operation::Equal
            && edits[pointer + 1].operation == Operation::Equal
        {
            let before = edits[pointer - 1].text.clone();
            let after = edits[pointer + 1].text.clone();
            let text = &edits[pointer].text;
            if text.ends_with(before.as_str()) {
                let shifted = format!("{before}{}", &text[..text.len() - before.len()]);
                edits[pointer].text = shifted;
                edits[pointer + 1].text = format!("{before}{after}");
                edits.remove(pointer - 1);
                changed = true;
            } else if text.starts_with(after.as_str()) {
                let shifted = format!("{}{after}", &text[after.len()..]);
                edits[pointer].text = shifted;
                edits[pointer - 1].text.push_str(&after);
                edits.remove(pointer + 1);
                changed = true;
            }
        }
        pointer += 1;
    }
    changed
}
