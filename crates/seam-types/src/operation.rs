use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of change an [`Edit`](crate::Edit) describes.
///
/// `Delete` text exists only in the left (original) text, `Insert` text
/// only in the right (modified) text, and `Equal` text in both, in the
/// same relative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Text removed from the left side.
    Delete,
    /// Text added on the right side.
    Insert,
    /// Text shared by both sides.
    Equal,
}

impl Operation {
    /// Single-character marker used in unified-style output.
    pub fn symbol(&self) -> char {
        match self {
            Self::Delete => '-',
            Self::Insert => '+',
            Self::Equal => ' ',
        }
    }

    /// Returns `true` for `Delete` and `Insert`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Equal)
    }

    /// Returns `true` if text with this operation belongs to the left side.
    pub fn in_source(&self) -> bool {
        !matches!(self, Self::Insert)
    }

    /// Returns `true` if text with this operation belongs to the right side.
    pub fn in_target(&self) -> bool {
        !matches!(self, Self::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => write!(f, "Delete"),
            Self::Insert => write!(f, "Insert"),
            Self::Equal => write!(f, "Equal"),
        }
    }
}
