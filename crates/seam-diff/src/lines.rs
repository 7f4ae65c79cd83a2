//! Line table and line encoding for line-mode diffs.
//!
//! Every distinct line is given a small integer id and each text is
//! rewritten as a string with one `char` per line, so a char diff of the
//! encoded strings is a line diff of the originals.

use std::collections::HashMap;

/// Maximum table size after encoding the left text.
pub const LEFT_LINE_CAP: usize = 40_000;
/// Maximum table size after encoding both texts.
pub const TOTAL_LINE_CAP: usize = 65_535;

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_SPAN: u32 = 0x800;

/// Bidirectional mapping between lines and ids.
///
/// Lines keep their trailing `\n`. Id 0 is reserved for the empty line so
/// no real line encodes as `'\0'`.
#[derive(Clone, Debug)]
pub struct LineTable<'a> {
    lines: Vec<&'a str>,
    ids: HashMap<&'a str, u32>,
}

impl Default for LineTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LineTable<'a> {
    /// A table holding only the reserved empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![""],
            ids: HashMap::new(),
        }
    }

    /// Number of entries, including the reserved empty line.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no line has been added yet.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1
    }

    /// The line registered under `id`.
    pub fn line(&self, id: u32) -> Option<&'a str> {
        self.lines.get(id as usize).copied()
    }

    /// Encode `text` as one char per line.
    ///
    /// Once the table holds `cap` entries, the rest of the text becomes a
    /// single final line.
    pub fn encode(&mut self, text: &'a str, cap: usize) -> String {
        let mut encoded = String::new();
        let mut rest = text;
        while !rest.is_empty() {
            let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
            let mut line = &rest[..end];
            let id = match self.ids.get(line) {
                Some(&id) => id,
                None => {
                    if self.lines.len() == cap {
                        line = rest;
                    }
                    self.intern(line)
                }
            };
            encoded.push(id_to_char(id));
            rest = &rest[line.len()..];
        }
        encoded
    }

    /// Replace every char of an encoded string with its line.
    ///
    /// Chars that do not name a line are dropped.
    pub fn expand(&self, encoded: &str) -> String {
        encoded
            .chars()
            .filter_map(|c| self.line(char_to_id(c)))
            .collect()
    }

    fn intern(&mut self, line: &'a str) -> u32 {
        if let Some(&id) = self.ids.get(line) {
            return id;
        }
        let id = self.lines.len() as u32;
        self.lines.push(line);
        self.ids.insert(line, id);
        id
    }
}

/// Both texts of a diff encoded against one shared [`LineTable`].
#[derive(Clone, Debug)]
pub struct LineEncoding<'a> {
    /// The left text with one char per line id.
    pub left: String,
    /// The right text with one char per line id.
    pub right: String,
    /// Lines indexed by id, shared by both encodings.
    pub table: LineTable<'a>,
}

impl<'a> LineEncoding<'a> {
    /// Encode `left` and then `right`, capping the table at
    /// [`LEFT_LINE_CAP`] and [`TOTAL_LINE_CAP`] entries respectively.
    pub fn new(left: &'a str, right: &'a str) -> Self {
        let mut table = LineTable::new();
        let left = table.encode(left, LEFT_LINE_CAP);
        let right = table.encode(right, TOTAL_LINE_CAP);
        Self { left, right, table }
    }
}

// Ids skip the surrogate block so every id maps to a valid `char`.
fn id_to_char(id: u32) -> char {
    let code = if id < SURROGATE_START {
        id
    } else {
        id + SURROGATE_SPAN
    };
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn char_to_id(c: char) -> u32 {
    let code = c as u32;
    if code < SURROGATE_START {
        code
    } else {
        code - SURROGATE_SPAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_lines_share_ids() {
        let encoding = LineEncoding::new("alpha\nbeta\nalpha\n", "beta\nalpha\nbeta\n");
        assert_eq!(encoding.left, "\u{1}\u{2}\u{1}");
        assert_eq!(encoding.right, "\u{2}\u{1}\u{2}");
        assert_eq!(encoding.table.len(), 3);
        assert_eq!(encoding.table.line(1), Some("alpha\n"));
        assert_eq!(encoding.table.line(2), Some("beta\n"));
    }

    #[test]
    fn last_line_without_newline_is_distinct() {
        let encoding = LineEncoding::new("a\nb", "a\nb\n");
        assert_eq!(encoding.left, "\u{1}\u{2}");
        assert_eq!(encoding.right, "\u{1}\u{3}");
        assert_eq!(encoding.table.line(2), Some("b"));
        assert_eq!(encoding.table.line(3), Some("b\n"));
    }

    #[test]
    fn empty_texts_encode_empty() {
        let encoding = LineEncoding::new("", "");
        assert!(encoding.left.is_empty());
        assert!(encoding.right.is_empty());
        assert!(encoding.table.is_empty());
    }

    #[test]
    fn expand_restores_text() {
        let left = "alpha\nbeta\n\ngamma";
        let right = "beta\ndelta\n";
        let encoding = LineEncoding::new(left, right);
        assert_eq!(encoding.table.expand(&encoding.left), left);
        assert_eq!(encoding.table.expand(&encoding.right), right);
    }

    #[test]
    fn ids_skip_the_surrogate_block() {
        assert_eq!(id_to_char(0xD7FF), '\u{D7FF}');
        assert_eq!(id_to_char(0xD800), '\u{E000}');
        assert_eq!(char_to_id('\u{E000}'), 0xD800);
        assert_eq!(char_to_id(id_to_char(65_534)), 65_534);
    }

    #[test]
    fn table_cap_folds_the_remainder_into_one_line() {
        let mut table = LineTable::new();
        let encoded = table.encode("a\nb\nc\nd\n", 3);
        // Ids 1 and 2 fill the table; everything after becomes id 3.
        assert_eq!(encoded.chars().count(), 3);
        assert_eq!(table.line(3), Some("c\nd\n"));
        assert_eq!(table.expand(&encoded), "a\nb\nc\nd\n");
    }

    #[test]
    fn large_inputs_round_trip_past_the_surrogate_block() {
        let left: String = (0..60_000).map(|i| format!("{i}\n")).collect();
        let right: String = (0..30_000).map(|i| format!("r{i}\n")).collect();
        let encoding = LineEncoding::new(&left, &right);
        assert_eq!(encoding.table.len(), TOTAL_LINE_CAP + 1);
        assert_eq!(encoding.left.chars().count(), LEFT_LINE_CAP);
        assert_eq!(encoding.table.expand(&encoding.left), left);
        assert_eq!(encoding.table.expand(&encoding.right), right);
    }
}
