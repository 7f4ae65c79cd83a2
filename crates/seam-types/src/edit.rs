use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// One run of text in an edit script, tagged with what happened to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edit {
    /// What happened to the text.
    pub operation: Operation,
    /// The text itself.
    pub text: String,
}

impl Edit {
    /// Create an edit with an explicit operation.
    pub fn new(operation: Operation, text: impl Into<String>) -> Self {
        Self {
            operation,
            text: text.into(),
        }
    }

    /// Text present only on the left side.
    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Operation::Delete, text)
    }

    /// Text present only on the right side.
    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Operation::Insert, text)
    }

    /// Text present on both sides.
    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Operation::Equal, text)
    }

    /// Length of the text in `char`s.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if the edit carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Edit {
    /// Writes every line of the text prefixed with the operation marker.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.operation.symbol();
        for line in self.text.split_inclusive('\n') {
            write!(f, "{symbol}{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_tag_operations() {
        assert_eq!(Edit::delete("a").operation, Operation::Delete);
        assert_eq!(Edit::insert("a").operation, Operation::Insert);
        assert_eq!(Edit::equal("a").operation, Operation::Equal);
    }

    #[test]
    fn char_len_counts_scalars_not_bytes() {
        let edit = Edit::insert("héllo");
        assert_eq!(edit.char_len(), 5);
        assert_eq!(edit.text.len(), 6);
    }

    #[test]
    fn display_prefixes_each_line() {
        let edit = Edit::delete("one\ntwo\n");
        assert_eq!(edit.to_string(), "-one\n-two\n");
        assert_eq!(Edit::equal("x").to_string(), " x");
    }

    #[test]
    fn serde_round_trip() {
        let edit = Edit::insert("abc");
        let json = serde_json::to_string(&edit).unwrap();
        assert_eq!(json, r#"{"operation":"insert","text":"abc"}"#);
        let back: Edit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edit);
    }
}
