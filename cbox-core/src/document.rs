//! Whole-document operations
//!
//! [`TextDocument`] gives the line access discovery needs and splices results
//! back into the text. Line indices are zero-based and ranges inclusive.
//! The original line ending (LF or CRLF) and trailing newline are preserved.

use crate::annotated::AnnotatedSelection;
use crate::discovery::find_box;
use crate::error::BoxError;
use crate::reconstruct::{remove_styled_comment_box, update_styled_comment_box};
use crate::render::convert_to_comment_box;
use crate::style::BoxStyle;
use std::ops::RangeInclusive;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl TextDocument {
    pub fn new(text: &str) -> Self {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let body = if line_ending == "\r\n" {
            body.strip_suffix('\r').unwrap_or(body)
        } else {
            body
        };

        let lines = body
            .split('\n')
            .map(|line| {
                if line_ending == "\r\n" {
                    line.strip_suffix('\r').unwrap_or(line)
                } else {
                    line
                }
                .to_string()
            })
            .collect();

        Self {
            lines,
            line_ending,
            trailing_newline,
        }
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The selected lines joined with `\n`.
    pub fn text_of(&self, range: RangeInclusive<usize>) -> Result<String, BoxError> {
        let (start, end) = self.check(&range)?;
        Ok(self.lines[start..=end].join("\n"))
    }

    /// Replaces a line range with `replacement` and returns the new document text.
    pub fn replace_lines(
        &self,
        range: RangeInclusive<usize>,
        replacement: &str,
    ) -> Result<String, BoxError> {
        let (start, end) = self.check(&range)?;

        let mut lines: Vec<&str> = Vec::with_capacity(self.lines.len());
        lines.extend(self.lines[..start].iter().map(String::as_str));
        lines.extend(replacement.split('\n'));
        lines.extend(self.lines[end + 1..].iter().map(String::as_str));

        let mut text = lines.join(self.line_ending);
        if self.trailing_newline {
            text.push_str(self.line_ending);
        }
        Ok(text)
    }

    /// Finds the box overlapping the range.
    pub fn find_box(
        &self,
        range: RangeInclusive<usize>,
        style: &BoxStyle,
    ) -> Result<AnnotatedSelection, BoxError> {
        find_box(*range.start(), *range.end(), style, |index| self.line(index))
    }

    /// Draws a box around the selected lines.
    pub fn render_lines(
        &self,
        range: RangeInclusive<usize>,
        style: &BoxStyle,
    ) -> Result<String, BoxError> {
        style.validate()?;
        let boxed = convert_to_comment_box(&self.text_of(range.clone())?, style);
        self.replace_lines(range, &boxed)
    }

    /// Replaces the box overlapping the range by the text it wraps.
    pub fn strip_box(
        &self,
        range: RangeInclusive<usize>,
        style: &BoxStyle,
    ) -> Result<String, BoxError> {
        let selection = self.find_box(range, style)?;
        debug!(range = ?selection.range, "stripping box");
        let (start, end) = selection.range;
        self.replace_lines(start..=end, &remove_styled_comment_box(&selection.lines))
    }

    /// Re-renders the box overlapping the range.
    ///
    /// A range without a box is left untouched.
    pub fn refresh_box(
        &self,
        range: RangeInclusive<usize>,
        style: &BoxStyle,
    ) -> Result<String, BoxError> {
        let selection = self.find_box(range, style)?;
        let (start, end) = selection.range;
        if !selection.contains_box() {
            debug!(start, end, "no box to refresh");
            return self.replace_lines(start..=end, &self.text_of(start..=end)?);
        }
        self.replace_lines(
            start..=end,
            &update_styled_comment_box(&selection.lines, style),
        )
    }

    fn check(&self, range: &RangeInclusive<usize>) -> Result<(usize, usize), BoxError> {
        let (start, end) = (*range.start(), *range.end());
        if start > end {
            return Err(BoxError::InvalidRange { start, end });
        }
        if end >= self.lines.len() {
            return Err(BoxError::LineOutOfRange { line: end });
        }
        Ok((start, end))
    }
}
