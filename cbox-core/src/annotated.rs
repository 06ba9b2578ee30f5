//! Annotated lines
//!
//! The structured view of a document region after matching it against a style.
//! Values are produced fresh by every discovery call and carry no identity.

use serde::{Deserialize, Serialize};

/// The structural role of a recognized box row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// First row of a box (a border row, or a content row when the top edge is skipped)
    Top,
    Middle,
    /// Last row of a box (a border row, or a content row when the bottom edge is skipped)
    Bottom,
    /// A one-row box with both edges skipped
    Single,
}

/// One physical line recognized as part of a box.
///
/// `text` is `None` on border rows: they carry nothing to restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLine {
    pub kind: RowKind,
    pub indentation: String,
    /// Start token, left edge or bottom-left token, whichever opened the row
    pub open: String,
    pub left_fill: String,
    pub text: Option<String>,
    pub right_fill: String,
    /// Top-right token, right edge or end token, whichever closed the row
    pub close: String,
}

impl CommentLine {
    pub fn is_border(&self) -> bool {
        self.text.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnnotatedLine {
    Comment(CommentLine),
    Plain { text: String },
}

impl AnnotatedLine {
    pub fn plain(text: impl Into<String>) -> Self {
        AnnotatedLine::Plain { text: text.into() }
    }

    pub fn as_comment(&self) -> Option<&CommentLine> {
        match self {
            AnnotatedLine::Comment(line) => Some(line),
            AnnotatedLine::Plain { .. } => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, AnnotatedLine::Plain { .. })
    }
}

/// A line range extended to cover a whole box, with every line annotated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSelection {
    /// Inclusive first and last line of the selection
    pub range: (usize, usize),
    pub lines: Vec<AnnotatedLine>,
}

impl AnnotatedSelection {
    /// True when at least one line was recognized as part of a box.
    pub fn contains_box(&self) -> bool {
        self.lines.iter().any(|line| !line.is_plain())
    }
}
