//! Half-match detection.
//!
//! If the two texts share a substring at least half as long as the longer
//! text, the diff can be split around it into two smaller, independent
//! diffs. The result may not be minimal, but it is found quickly.

use crate::span::{byte_offset, common_prefix, common_suffix};

/// Both texts split around a long common substring.
///
/// `left_prefix + common + left_suffix` is the left text and
/// `right_prefix + common + right_suffix` is the right text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfMatch<'a> {
    /// Left text before the shared middle.
    pub left_prefix: &'a str,
    /// Left text after the shared middle.
    pub left_suffix: &'a str,
    /// Right text before the shared middle.
    pub right_prefix: &'a str,
    /// Right text after the shared middle.
    pub right_suffix: &'a str,
    /// The shared middle, at least half as long as the longer text.
    pub common: &'a str,
}

impl HalfMatch<'_> {
    /// Returns `true` if this match shares strictly more chars than `other`.
    pub fn better_than(&self, other: &Self) -> bool {
        self.common.chars().count() > other.common.chars().count()
    }

    fn swapped(self) -> Self {
        Self {
            left_prefix: self.right_prefix,
            left_suffix: self.right_suffix,
            right_prefix: self.left_prefix,
            right_suffix: self.left_suffix,
            common: self.common,
        }
    }
}

/// Find a common substring at least half the length of the longer text.
///
/// Texts where the longer one has fewer than four chars, or where the
/// shorter one is less than half the longer, never produce a match.
pub fn half_match<'a>(left: &'a str, right: &'a str) -> Option<HalfMatch<'a>> {
    let left_chars = left.chars().count();
    let right_chars = right.chars().count();
    let left_longer = left_chars > right_chars;
    let (long, short, long_chars, short_chars) = if left_longer {
        (left, right, left_chars, right_chars)
    } else {
        (right, left, right_chars, left_chars)
    };
    if long_chars < 4 || short_chars * 2 < long_chars {
        return None;
    }

    // Seeds start at the second and third quarters of the long text.
    let seed_chars = long_chars / 4;
    let second_quarter = seeded_match(long, short, long_chars, (long_chars + 3) / 4, seed_chars);
    let third_quarter = seeded_match(long, short, long_chars, (long_chars + 1) / 2, seed_chars);
    let best = match (second_quarter, third_quarter) {
        (Some(first), Some(second)) => {
            if second.better_than(&first) {
                second
            } else {
                first
            }
        }
        (first, second) => first.or(second)?,
    };

    Some(if left_longer { best } else { best.swapped() })
}

/// Grow every occurrence of the seed `long[seed_start..seed_start + seed_chars]`
/// in `short` into the largest surrounding common region and keep the
/// longest. The result is oriented with `long` on the left.
fn seeded_match<'a>(
    long: &'a str,
    short: &'a str,
    long_chars: usize,
    seed_start: usize,
    seed_chars: usize,
) -> Option<HalfMatch<'a>> {
    let start = byte_offset(long, seed_start);
    let end = start + byte_offset(&long[start..], seed_chars);
    let seed = &long[start..end];

    let mut best: Option<HalfMatch<'a>> = None;
    let mut best_chars = 0;
    let mut from = 0;
    while let Some(found) = short[from..].find(seed) {
        let at = from + found;
        let prefix = common_prefix(&long[start..], &short[at..]);
        let suffix = common_suffix(&long[..start], &short[..at]);
        let common = &short[at - suffix..at + prefix];
        let common_chars = common.chars().count();
        if common_chars > best_chars {
            best_chars = common_chars;
            best = Some(HalfMatch {
                left_prefix: &long[..start - suffix],
                left_suffix: &long[start + prefix..],
                right_prefix: &short[..at - suffix],
                right_suffix: &short[at + prefix..],
                common,
            });
        }
        from = at + short[at..].chars().next().map_or(1, char::len_utf8);
    }

    best.filter(|_| best_chars * 2 >= long_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split<'a>(hm: HalfMatch<'a>) -> [&'a str; 5] {
        [
            hm.left_prefix,
            hm.left_suffix,
            hm.right_prefix,
            hm.right_suffix,
            hm.common,
        ]
    }

    #[test]
    fn no_match() {
        assert_eq!(half_match("1234567890", "abcdef"), None);
        assert_eq!(half_match("12345", "23"), None);
        assert_eq!(half_match("abc", "abc"), None);
    }

    #[test]
    fn single_match() {
        let hm = half_match("1234567890", "a345678z").unwrap();
        assert_eq!(split(hm), ["12", "90", "a", "z", "345678"]);

        let hm = half_match("a345678z", "1234567890").unwrap();
        assert_eq!(split(hm), ["a", "z", "12", "90", "345678"]);

        let hm = half_match("abc56789z", "1234567890").unwrap();
        assert_eq!(split(hm), ["abc", "z", "1234", "0", "56789"]);

        let hm = half_match("a23456xyz", "1234567890").unwrap();
        assert_eq!(split(hm), ["a", "xyz", "1", "7890", "23456"]);
    }

    #[test]
    fn multiple_occurrences_keep_the_longest() {
        let hm = half_match("121231234123451234123121", "a1234123451234z").unwrap();
        assert_eq!(split(hm), ["12123", "123121", "a", "z", "1234123451234"]);

        let hm = half_match("x-=-=-=-=-=-=-=-=-=-=-=-=", "xx-=-=-=-=-=-=-=").unwrap();
        assert_eq!(split(hm), ["", "-=-=-=-=-=", "x", "", "x-=-=-=-=-=-=-="]);

        let hm = half_match("-=-=-=-=-=-=-=-=-=-=-=-=y", "-=-=-=-=-=-=-=yy").unwrap();
        assert_eq!(split(hm), ["-=-=-=-=-=", "", "", "y", "-=-=-=-=-=-=-=y"]);
    }

    #[test]
    fn non_optimal_match_is_accepted() {
        // The optimal diff would be -q+x=H-i+e=lloHe+Hu=llo-Hew+y.
        let hm = half_match("qHilloHelloHew", "xHelloHeHulloy").unwrap();
        assert_eq!(split(hm), ["qHillo", "w", "x", "Hulloy", "HelloHe"]);
    }

    #[test]
    fn equal_lengths_keep_the_second_quarter_seed() {
        let hm = half_match("abaa", "abba").unwrap();
        assert_eq!(split(hm), ["", "aa", "", "ba", "ab"]);
    }

    #[test]
    fn pieces_slice_multibyte_text() {
        let hm = half_match("héllo wörld!", "hello wörld?").unwrap();
        assert_eq!(split(hm), ["hé", "!", "he", "?", "llo wörld"]);
    }

    #[test]
    fn better_than_is_strict() {
        let a = HalfMatch {
            left_prefix: "",
            left_suffix: "",
            right_prefix: "",
            right_suffix: "",
            common: "abc",
        };
        let b = HalfMatch { common: "xyz", ..a };
        let c = HalfMatch { common: "wxyz", ..a };
        assert!(!a.better_than(&b));
        assert!(c.better_than(&a));
    }
}
