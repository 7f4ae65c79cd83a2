//! Myers' O(ND) middle-snake search in linear space.
//!
//! Forward and reverse frontiers are expanded one edit at a time until
//! they overlap. The overlap is a point on some shortest edit path, so the
//! problem splits there into two independent halves.

use crate::config::Deadline;

/// Find the split point of a shortest edit path between `left` and `right`.
///
/// Returns byte offsets `(x, y)` such that diffing `left[..x]` against
/// `right[..y]` and `left[x..]` against `right[y..]` yields a minimal
/// script. Returns `None` when the search exhausts its budget or the
/// deadline passes, in which case the caller should treat the texts as
/// wholly replaced.
pub(crate) fn bisect(left: &str, right: &str, deadline: &Deadline) -> Option<(usize, usize)> {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    let n = a.len() as isize;
    let m = b.len() as isize;

    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let v_len = 2 * max_d + 1;
    let mut v1 = vec![-1isize; v_len as usize];
    let mut v2 = vec![-1isize; v_len as usize];
    v1[(offset + 1) as usize] = 0;
    v2[(offset + 1) as usize] = 0;

    // With an odd delta the forward path detects the overlap; with an even
    // delta the reverse path does.
    let delta = n - m;
    let front = delta % 2 != 0;

    // Diagonals that ran off the grid are trimmed from both ends.
    let mut k1_start = 0;
    let mut k1_end = 0;
    let mut k2_start = 0;
    let mut k2_end = 0;

    for d in 0..max_d {
        if deadline.expired() {
            break;
        }

        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;
            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if front {
                let k2_offset = offset + delta - k1;
                if (0..v_len).contains(&k2_offset) && v2[k2_offset as usize] != -1 {
                    let x2 = n - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return Some(to_bytes(&a, &b, x1, y1));
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;
            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let k1_offset = offset + delta - k2;
                if (0..v_len).contains(&k1_offset) && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = offset + x1 - k1_offset;
                    if x1 >= n - x2 {
                        return Some(to_bytes(&a, &b, x1, y1));
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}

/// Convert a split point in chars to byte offsets.
fn to_bytes(a: &[char], b: &[char], x: isize, y: isize) -> (usize, usize) {
    let width = |chars: &[char]| chars.iter().map(|c| c.len_utf8()).sum::<usize>();
    (width(&a[..x as usize]), width(&b[..y as usize]))
}
