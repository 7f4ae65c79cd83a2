//! The work-stack diff engine.
//!
//! Every recursive step of the algorithm (affix trimming, half-match
//! splits, bisection halves, line-mode refinement) is a [`Task`] on an
//! explicit stack, so input structure never translates into call depth.
//! Tasks are pushed in reverse so they pop in output order.

use seam_types::{Edit, Operation};
use tracing::debug;

use crate::bisect::bisect;
use crate::cleanup::{cleanup_merge, cleanup_semantic};
use crate::config::{Deadline, DiffConfig};
use crate::half_match::half_match;
use crate::lines::LineEncoding;
use crate::span::{common_prefix, common_suffix};

/// A pending unit of work.
enum Task<'s> {
    /// Trim shared affixes, diff the middle, and normalize the result.
    Diff {
        left: &'s str,
        right: &'s str,
        line_mode: bool,
    },
    /// Diff two texts that share no prefix or suffix.
    Core {
        left: &'s str,
        right: &'s str,
        line_mode: bool,
    },
    /// Append a finished edit to the output.
    Emit(Edit),
    /// Merge-clean everything output since `start`.
    Merge { start: usize },
}

pub(crate) struct Engine<'c> {
    config: &'c DiffConfig,
    deadline: Deadline,
}

impl<'c> Engine<'c> {
    pub(crate) fn new(config: &'c DiffConfig, deadline: Deadline) -> Self {
        Self { config, deadline }
    }

    /// Diff `left` against `right`.
    ///
    /// Identical non-empty texts yield a single equality and identical
    /// empty texts yield an empty script.
    pub(crate) fn run<'s>(&self, left: &'s str, right: &'s str, line_mode: bool) -> Vec<Edit> {
        let mut output = Vec::new();
        let mut stack = vec![Task::Diff {
            left,
            right,
            line_mode,
        }];
        while let Some(task) = stack.pop() {
            match task {
                Task::Diff {
                    left,
                    right,
                    line_mode,
                } => trim_affixes(left, right, line_mode, output.len(), &mut stack),
                Task::Core {
                    left,
                    right,
                    line_mode,
                } => self.core(left, right, line_mode, &mut stack),
                Task::Emit(edit) => output.push(edit),
                Task::Merge { start } => {
                    let mut tail = output.split_off(start);
                    cleanup_merge(&mut tail);
                    output.append(&mut tail);
                }
            }
        }
        output
    }

    fn core<'s>(&self, left: &'s str, right: &'s str, line_mode: bool, stack: &mut Vec<Task<'s>>) {
        if left.is_empty() {
            if !right.is_empty() {
                stack.push(Task::Emit(Edit::insert(right)));
            }
            return;
        }
        if right.is_empty() {
            stack.push(Task::Emit(Edit::delete(left)));
            return;
        }

        let left_chars = left.chars().count();
        let right_chars = right.chars().count();
        let (long, short, operation) = if left_chars > right_chars {
            (left, right, Operation::Delete)
        } else {
            (right, left, Operation::Insert)
        };

        // The shorter text sits inside the longer one.
        if let Some(at) = long.find(short) {
            let before = &long[..at];
            let after = &long[at + short.len()..];
            if !after.is_empty() {
                stack.push(Task::Emit(Edit::new(operation, after)));
            }
            stack.push(Task::Emit(Edit::equal(short)));
            if !before.is_empty() {
                stack.push(Task::Emit(Edit::new(operation, before)));
            }
            return;
        }

        // A single char that is not contained shares nothing.
        if left_chars.min(right_chars) == 1 {
            replace(left, right, stack);
            return;
        }

        if self.deadline.expired() {
            debug!(left_chars, right_chars, "deadline passed, replacing text wholesale");
            replace(left, right, stack);
            return;
        }

        if let Some(hm) = half_match(left, right) {
            debug!(
                common = hm.common.len(),
                left_bytes = left.len(),
                right_bytes = right.len(),
                "split on half match"
            );
            stack.push(Task::Diff {
                left: hm.left_suffix,
                right: hm.right_suffix,
                line_mode,
            });
            stack.push(Task::Emit(Edit::equal(hm.common)));
            stack.push(Task::Diff {
                left: hm.left_prefix,
                right: hm.right_prefix,
                line_mode,
            });
            return;
        }

        let threshold = self.config.line_mode_threshold;
        if line_mode && left_chars > threshold && right_chars > threshold {
            let tasks = self.line_mode(left, right);
            stack.extend(tasks.into_iter().rev());
            return;
        }

        match bisect(left, right, &self.deadline) {
            Some((x, y)) => {
                stack.push(Task::Core {
                    left: &left[x..],
                    right: &right[y..],
                    line_mode,
                });
                stack.push(Task::Core {
                    left: &left[..x],
                    right: &right[..y],
                    line_mode,
                });
            }
            None => {
                if self.deadline.expired() {
                    debug!(left_chars, right_chars, "bisection cut short by deadline");
                } else {
                    debug!(left_chars, right_chars, "no common path, replacing text wholesale");
                }
                replace(left, right, stack);
            }
        }
    }

    /// Diff line by line, then return tasks that re-diff each replaced
    /// block char by char.
    fn line_mode<'s>(&self, left: &'s str, right: &'s str) -> Vec<Task<'s>> {
        let encoding = LineEncoding::new(left, right);
        debug!(
            left_lines = encoding.left.chars().count(),
            right_lines = encoding.right.chars().count(),
            distinct_lines = encoding.table.len() - 1,
            "diffing by line"
        );

        let mut coarse = self.run(&encoding.left, &encoding.right, false);
        for edit in &mut coarse {
            edit.text = encoding.table.expand(&edit.text);
        }
        // Drop line-level matches that are just noise, like blank lines.
        cleanup_semantic(&mut coarse);

        refine(coarse, left, right)
    }
}

fn trim_affixes<'s>(
    left: &'s str,
    right: &'s str,
    line_mode: bool,
    start: usize,
    stack: &mut Vec<Task<'s>>,
) {
    if left == right {
        if !left.is_empty() {
            stack.push(Task::Emit(Edit::equal(left)));
        }
        return;
    }

    let prefix = common_prefix(left, right);
    let head = &left[..prefix];
    let (left, right) = (&left[prefix..], &right[prefix..]);
    let suffix = common_suffix(left, right);
    let tail = &left[left.len() - suffix..];
    let (left, right) = (&left[..left.len() - suffix], &right[..right.len() - suffix]);

    stack.push(Task::Merge { start });
    if !tail.is_empty() {
        stack.push(Task::Emit(Edit::equal(tail)));
    }
    stack.push(Task::Core {
        left,
        right,
        line_mode,
    });
    if !head.is_empty() {
        stack.push(Task::Emit(Edit::equal(head)));
    }
}

fn replace<'s>(left: &'s str, right: &'s str, stack: &mut Vec<Task<'s>>) {
    stack.push(Task::Emit(Edit::insert(right)));
    stack.push(Task::Emit(Edit::delete(left)));
}

/// Changes accumulated since the last equality of a line-level script.
#[derive(Default)]
struct Replacement {
    edits: Vec<Edit>,
    deletes: usize,
    inserts: usize,
}

impl Replacement {
    fn push(&mut self, edit: Edit) {
        match edit.operation {
            Operation::Delete => self.deletes += 1,
            Operation::Insert => self.inserts += 1,
            Operation::Equal => {}
        }
        self.edits.push(edit);
    }

    /// A block with both deletions and insertions is re-diffed from the
    /// original text it covers; anything else is kept as is.
    fn flush<'s>(&mut self, left: &'s str, right: &'s str, tasks: &mut Vec<Task<'s>>) {
        if self.deletes > 0 && self.inserts > 0 {
            self.edits.clear();
            tasks.push(Task::Diff {
                left,
                right,
                line_mode: false,
            });
        } else {
            tasks.extend(self.edits.drain(..).map(Task::Emit));
        }
        self.deletes = 0;
        self.inserts = 0;
    }
}

/// Turn a line-level script over `left` and `right` into tasks, in output
/// order, that keep its equalities and re-diff its replacements.
fn refine<'s>(coarse: Vec<Edit>, left: &'s str, right: &'s str) -> Vec<Task<'s>> {
    let mut tasks = Vec::new();
    let mut pending = Replacement::default();
    let mut left_start = 0;
    let mut right_start = 0;
    let mut left_pos = 0;
    let mut right_pos = 0;

    for edit in coarse {
        match edit.operation {
            Operation::Equal => {
                pending.flush(
                    &left[left_start..left_pos],
                    &right[right_start..right_pos],
                    &mut tasks,
                );
                left_pos += edit.text.len();
                right_pos += edit.text.len();
                left_start = left_pos;
                right_start = right_pos;
                tasks.push(Task::Emit(edit));
            }
            Operation::Delete => {
                left_pos += edit.text.len();
                pending.push(edit);
            }
            Operation::Insert => {
                right_pos += edit.text.len();
                pending.push(edit);
            }
        }
    }
    pending.flush(
        &left[left_start..left_pos],
        &right[right_start..right_pos],
        &mut tasks,
    );

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(left: &str, right: &str, line_mode: bool) -> Vec<Edit> {
        let config = DiffConfig::default();
        Engine::new(&config, Deadline::never()).run(left, right, line_mode)
    }

    #[test]
    fn identical_empty_texts_produce_nothing() {
        assert_eq!(run("", "", true), vec![]);
        assert_eq!(run("abc", "abc", true), vec![Edit::equal("abc")]);
    }

    #[test]
    fn affixes_frame_the_core() {
        assert_eq!(
            run("1234abcdef", "1234xyz", true),
            vec![Edit::equal("1234"), Edit::delete("abcdef"), Edit::insert("xyz")]
        );
        assert_eq!(
            run("abcdef1234", "xyz1234", true),
            vec![Edit::delete("abcdef"), Edit::insert("xyz"), Edit::equal("1234")]
        );
    }

    #[test]
    fn empty_side_after_trimming() {
        assert_eq!(
            run("abcd", "ab", true),
            vec![Edit::equal("ab"), Edit::delete("cd")]
        );
        assert_eq!(
            run("ab", "xyab", true),
            vec![Edit::insert("xy"), Edit::equal("ab")]
        );
    }

    #[test]
    fn disjoint_texts_fall_back_to_replacement() {
        assert_eq!(
            run("abc", "xyz", false),
            vec![Edit::delete("abc"), Edit::insert("xyz")]
        );
    }

    #[test]
    fn refine_rediffs_only_mixed_blocks() {
        let left = "a\nb\nc\n";
        let right = "a\nx\nc\nd\n";
        let coarse = vec![
            Edit::equal("a\n"),
            Edit::delete("b\n"),
            Edit::insert("x\n"),
            Edit::equal("c\n"),
            Edit::insert("d\n"),
        ];
        let tasks = refine(coarse, left, right);
        assert_eq!(tasks.len(), 4);
        assert!(matches!(
            tasks[1],
            Task::Diff {
                left: "b\n",
                right: "x\n",
                line_mode: false
            }
        ));
        assert!(matches!(&tasks[3], Task::Emit(edit) if *edit == Edit::insert("d\n")));
    }

    #[test]
    fn line_mode_matches_char_mode_on_disjoint_lines() {
        let left = "1234567890\n".repeat(13);
        let right = "abcdefghij\n".repeat(13);
        assert_eq!(run(&left, &right, true), run(&left, &right, false));
    }

    #[test]
    fn line_mode_matches_char_mode_on_a_single_line() {
        let left = "1234567890".repeat(13);
        let right = "abcdefghij".repeat(13);
        assert_eq!(run(&left, &right, true), run(&left, &right, false));
    }

    #[test]
    fn line_mode_refines_replaced_lines() {
        let left = "1234567890\n".repeat(13);
        let right = format!(
            "{}abcdefghij\n",
            "abcdefghij\n1234567890\n1234567890\n1234567890\n".repeat(3)
        );
        let kept = "\n1234567890\n1234567890\n1234567890\n";
        assert_eq!(
            run(&left, &right, true),
            vec![
                Edit::delete("1234567890\n1234567890"),
                Edit::insert("abcdefghij"),
                Edit::equal(kept),
                Edit::delete("1234567890"),
                Edit::insert("abcdefghij"),
                Edit::equal(kept),
                Edit::insert("abcdefghij\n"),
                Edit::equal("1234567890\n1234567890\n1234567890\n"),
                Edit::delete("1234567890"),
                Edit::insert("abcdefghij"),
                Edit::equal("\n"),
            ]
        );
    }

    #[test]
    fn many_scattered_changes_round_trip() {
        let left: String = (0..2_000).map(|i| if i % 3 == 0 { 'a' } else { 'b' }).collect();
        let right: String = (0..2_000).map(|i| if i % 5 == 0 { 'a' } else { 'b' }).collect();
        let edits = run(&left, &right, false);
        assert_eq!(seam_types::validate_against(&edits, &left, &right), Ok(()));
    }
}
