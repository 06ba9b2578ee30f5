//! Fluent assertion API for annotated selections
//!
//!     assert_selection(&selection)
//!         .range(0, 2)
//!         .line_count(3)
//!         .line(1, |line| {
//!             line.assert_comment().kind(RowKind::Middle).text("test");
//!         });

use crate::annotated::{AnnotatedLine, AnnotatedSelection, CommentLine, RowKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a selection
pub fn assert_selection(selection: &AnnotatedSelection) -> SelectionAssertion<'_> {
    SelectionAssertion { selection }
}

// ============================================================================
// Selection Assertions
// ============================================================================

pub struct SelectionAssertion<'a> {
    selection: &'a AnnotatedSelection,
}

impl<'a> SelectionAssertion<'a> {
    pub fn range(self, start: usize, end: usize) -> Self {
        assert_eq!(
            self.selection.range,
            (start, end),
            "Expected selection range {}..={}, found {:?}",
            start,
            end,
            self.selection.range
        );
        self
    }

    pub fn line_count(self, expected: usize) -> Self {
        let actual = self.selection.lines.len();
        assert_eq!(
            actual, expected,
            "Expected {} annotated lines, found {}",
            expected, actual
        );
        self
    }

    /// Run assertions on the line at `index` within the selection
    pub fn line<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(LineAssertion<'a>),
    {
        let line = self.selection.lines.get(index).unwrap_or_else(|| {
            panic!(
                "Line index {} out of bounds ({} lines)",
                index,
                self.selection.lines.len()
            )
        });
        check(LineAssertion {
            line,
            context: format!("lines[{}]", index),
        });
        self
    }

    /// Assert no line was recognized as part of a box
    pub fn all_plain(self) -> Self {
        if let Some(index) = self.selection.lines.iter().position(|l| !l.is_plain()) {
            panic!("Expected only plain lines, lines[{}] is a box row", index);
        }
        self
    }

    /// Assert the row kinds in order, `None` standing for a plain line
    pub fn kinds(self, expected: &[Option<RowKind>]) -> Self {
        let actual: Vec<Option<RowKind>> = self
            .selection
            .lines
            .iter()
            .map(|line| line.as_comment().map(|comment| comment.kind))
            .collect();
        assert_eq!(actual, expected, "Row kinds don't match");
        self
    }
}

// ============================================================================
// Line Assertions
// ============================================================================

pub struct LineAssertion<'a> {
    line: &'a AnnotatedLine,
    context: String,
}

impl<'a> LineAssertion<'a> {
    /// Assert this line is a box row and return row-specific assertions
    pub fn assert_comment(self) -> CommentAssertion<'a> {
        match self.line {
            AnnotatedLine::Comment(comment) => CommentAssertion {
                comment,
                context: self.context,
            },
            AnnotatedLine::Plain { text } => {
                panic!("{}: Expected a box row, found plain {:?}", self.context, text)
            }
        }
    }

    pub fn assert_plain(self, expected: &str) {
        match self.line {
            AnnotatedLine::Plain { text } => assert_eq!(
                text, expected,
                "{}: Expected plain text {:?}, found {:?}",
                self.context, expected, text
            ),
            AnnotatedLine::Comment(comment) => panic!(
                "{}: Expected a plain line, found {:?} row",
                self.context, comment.kind
            ),
        }
    }
}

pub struct CommentAssertion<'a> {
    comment: &'a CommentLine,
    context: String,
}

impl<'a> CommentAssertion<'a> {
    pub fn kind(self, expected: RowKind) -> Self {
        assert_eq!(
            self.comment.kind, expected,
            "{}: Expected {:?} row, found {:?}",
            self.context, expected, self.comment.kind
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.comment.text.as_deref(),
            Some(expected),
            "{}: Row text mismatch",
            self.context
        );
        self
    }

    /// Assert this is a border row
    pub fn no_text(self) -> Self {
        assert!(
            self.comment.text.is_none(),
            "{}: Expected a border row, found text {:?}",
            self.context,
            self.comment.text
        );
        self
    }

    pub fn open(self, expected: &str) -> Self {
        assert_eq!(self.comment.open, expected, "{}: Open token mismatch", self.context);
        self
    }

    pub fn close(self, expected: &str) -> Self {
        assert_eq!(self.comment.close, expected, "{}: Close token mismatch", self.context);
        self
    }

    pub fn indentation(self, expected: &str) -> Self {
        assert_eq!(
            self.comment.indentation, expected,
            "{}: Indentation mismatch",
            self.context
        );
        self
    }

    pub fn left_fill(self, expected: &str) -> Self {
        assert_eq!(self.comment.left_fill, expected, "{}: Left fill mismatch", self.context);
        self
    }

    pub fn right_fill(self, expected: &str) -> Self {
        assert_eq!(
            self.comment.right_fill, expected,
            "{}: Right fill mismatch",
            self.context
        );
        self
    }
}
