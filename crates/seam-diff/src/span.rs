//! Span comparison between two texts.
//!
//! All lengths are byte lengths that fall on `char` boundaries of both
//! inputs, so they can be used directly to slice either text.

/// Length of the longest common prefix of `a` and `b`.
pub fn common_prefix(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

/// Length of the longest common suffix of `a` and `b`.
pub fn common_suffix(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().rev().zip(b.chars().rev()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

/// Length of the longest suffix of `a` that is also a prefix of `b`.
pub fn common_overlap(a: &str, b: &str) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Only the last |b| bytes of `a` and the first |a| bytes of `b` can overlap.
    let a = if a.len() > b.len() {
        &a[ceil_boundary(a, a.len() - b.len())..]
    } else {
        a
    };
    let b = if b.len() > a.len() {
        &b[..floor_boundary(b, a.len())]
    } else {
        b
    };
    if a == b {
        return a.len();
    }

    // Grow the candidate by however far the next occurrence of the current
    // suffix of `a` sits inside `b`; accept only confirmed overlaps.
    let mut best = 0;
    let mut length = 1;
    while length <= a.len() {
        let start = floor_boundary(a, a.len() - length);
        let pattern = &a[start..];
        let Some(found) = b.find(pattern) else {
            break;
        };
        length = pattern.len() + found;
        if length > a.len() {
            break;
        }
        if found == 0 || a.as_bytes()[a.len() - length..] == b.as_bytes()[..length] {
            best = length;
            length += 1;
        }
    }
    best
}

/// Byte offset of the char index `chars` within `text`, clamped to its length.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix() {
        assert_eq!(common_prefix("abc", "xyz"), 0);
        assert_eq!(common_prefix("1234abcdef", "1234xyz"), 4);
        assert_eq!(common_prefix("1234", "1234xyz"), 4);
        assert_eq!(common_prefix("", "abc"), 0);
    }

    #[test]
    fn suffix() {
        assert_eq!(common_suffix("abc", "xyz"), 0);
        assert_eq!(common_suffix("abcdef1234", "xyz1234"), 4);
        assert_eq!(common_suffix("1234", "xyz1234"), 4);
        assert_eq!(common_suffix("abc", ""), 0);
    }

    #[test]
    fn prefix_and_suffix_stop_on_whole_chars() {
        // 'é' (c3 a9) and 'è' (c3 a8) share a leading byte but not a char.
        assert_eq!(common_prefix("aé", "aè"), 1);
        assert_eq!(common_suffix("éa", "èa"), 1);
        assert_eq!(common_prefix("héllo", "hélp"), 4);
        assert_eq!(common_suffix("naïve", "laïve"), 5);
    }

    #[test]
    fn overlap() {
        assert_eq!(common_overlap("", "abcd"), 0);
        assert_eq!(common_overlap("abc", "abcd"), 3);
        assert_eq!(common_overlap("123456", "abcd"), 0);
        assert_eq!(common_overlap("123456xxx", "xxxabcd"), 3);
        assert_eq!(common_overlap("abcd", "abc"), 0);
    }

    #[test]
    fn overlap_compares_chars_not_normalized_forms() {
        // The "fi" ligature is a single char distinct from "f" + "i".
        assert_eq!(common_overlap("fi", "\u{fb01}i"), 0);
    }

    #[test]
    fn overlap_with_multibyte_chars() {
        assert_eq!(common_overlap("xé", "éy"), 2);
        assert_eq!(common_overlap("abcé", "éabcd"), 2);
        assert_eq!(common_overlap("日本語", "本語です"), 6);
    }

    #[test]
    fn byte_offsets_from_char_indices() {
        assert_eq!(byte_offset("héllo", 0), 0);
        assert_eq!(byte_offset("héllo", 2), 3);
        assert_eq!(byte_offset("héllo", 9), 6);
    }
}
