//! Row matching
//!
//! Recognizes the rows a [`BoxStyle`] produces. Every row has the same shape:
//!
//!     [indentation][open][inner][close]
//!
//! Border rows require every char of `inner` to come from the edge token. Content
//! rows split `inner` into a fill prefix, the text, and a fill suffix.
//!
//! When a style skips its top or bottom border, the first or last content row
//! plays the part of the edge, so the edge pattern becomes a content pattern
//! opened by the start token or closed by the end token.
//!
//! Matching never fails loudly: a row that doesn't fit a pattern simply doesn't
//! match it.

use crate::annotated::{CommentLine, RowKind};
use crate::style::BoxStyle;
use crate::width::char_width;
use tracing::trace;

/// Whether the inner span of a row is a border run or content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inner {
    Border,
    Content,
}

/// One row shape: opening token, fill alphabet, closing token
#[derive(Debug, Clone)]
pub struct RowPattern {
    kind: RowKind,
    inner: Inner,
    open: String,
    close: String,
    fill: Vec<char>,
}

impl RowPattern {
    fn border(kind: RowKind, open: &str, fill: &str, close: &str) -> Self {
        Self::new(kind, Inner::Border, open, fill, close)
    }

    fn content(kind: RowKind, open: &str, fill: &str, close: &str) -> Self {
        Self::new(kind, Inner::Content, open, fill, close)
    }

    fn new(kind: RowKind, inner: Inner, open: &str, fill: &str, close: &str) -> Self {
        let mut alphabet: Vec<char> = fill.chars().collect();
        // Padding falls back to spaces when a wide token char overshoots
        if alphabet.iter().any(|&c| char_width(c) > 1) && !alphabet.contains(&' ') {
            alphabet.push(' ');
        }
        Self {
            kind,
            inner,
            open: open.to_string(),
            close: close.to_string(),
            fill: alphabet,
        }
    }

    fn is_fill(&self, c: char) -> bool {
        self.fill.contains(&c)
    }

    /// Splits a row into its indentation and the span between the tokens.
    ///
    /// The indentation is the longest run of leading spaces and tabs after which
    /// the opening token matches, so tokens that start with a space keep it.
    fn split<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let whitespace = line.len() - line.trim_start_matches([' ', '\t']).len();

        (0..=whitespace).rev().find_map(|offset| {
            let inner = line[offset..]
                .strip_prefix(self.open.as_str())?
                .strip_suffix(self.close.as_str())?;
            Some((&line[..offset], inner))
        })
    }

    /// Matches a row against the pattern.
    pub fn matches(&self, line: &str) -> Option<CommentLine> {
        let (indentation, inner) = self.split(line)?;

        match self.inner {
            Inner::Border => {
                if !inner.chars().all(|c| self.is_fill(c)) {
                    return None;
                }
                Some(CommentLine {
                    kind: self.kind,
                    indentation: indentation.to_string(),
                    open: self.open.clone(),
                    left_fill: inner.to_string(),
                    text: None,
                    right_fill: String::new(),
                    close: self.close.clone(),
                })
            }
            Inner::Content => {
                let left_len = inner
                    .char_indices()
                    .find(|&(_, c)| !self.is_fill(c))
                    .map_or(inner.len(), |(index, _)| index);
                let (left_fill, rest) = inner.split_at(left_len);

                let text_len = rest
                    .char_indices()
                    .rev()
                    .find(|&(_, c)| !self.is_fill(c))
                    .map_or(0, |(index, c)| index + c.len_utf8());
                let (text, right_fill) = rest.split_at(text_len);

                Some(CommentLine {
                    kind: self.kind,
                    indentation: indentation.to_string(),
                    open: self.open.clone(),
                    left_fill: left_fill.to_string(),
                    text: Some(text.to_string()),
                    right_fill: right_fill.to_string(),
                    close: self.close.clone(),
                })
            }
        }
    }
}

/// Every pattern a line was matched by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClass {
    pub top: Option<CommentLine>,
    pub middle: Option<CommentLine>,
    pub bottom: Option<CommentLine>,
    pub single: Option<CommentLine>,
}

impl LineClass {
    /// The line can start a box.
    pub fn opens(&self) -> bool {
        self.top.is_some() || self.single.is_some()
    }

    /// The line can end a box.
    pub fn closes(&self) -> bool {
        self.bottom.is_some() || self.single.is_some()
    }

    /// Matches both the top and the bottom pattern, as `########` does in hash styles.
    pub fn is_ambiguous(&self) -> bool {
        self.top.is_some() && self.bottom.is_some()
    }

    pub fn is_edge(&self) -> bool {
        self.opens() || self.closes()
    }
}

/// Row patterns for one style
#[derive(Debug, Clone)]
pub struct BoxMatcher {
    top: RowPattern,
    middle: RowPattern,
    bottom: RowPattern,
    single: Option<RowPattern>,
}

impl BoxMatcher {
    pub fn new(style: &BoxStyle) -> Self {
        // Only the line touching the box can be matched
        let start = last_line(&style.start_token);
        let end = first_line(&style.end_token);
        let fill = style.filling_token();

        let top = if style.skips_top_row() {
            RowPattern::content(RowKind::Top, start, fill, &style.right_edge_token)
        } else {
            RowPattern::border(
                RowKind::Top,
                start,
                &style.top_edge_token,
                &style.top_right_token,
            )
        };

        let bottom = if style.skips_bottom_row() {
            RowPattern::content(RowKind::Bottom, &style.left_edge_token, fill, end)
        } else {
            RowPattern::border(
                RowKind::Bottom,
                &style.bottom_left_token,
                &style.bottom_edge_token,
                end,
            )
        };

        let single = (style.skips_top_row() && style.skips_bottom_row())
            .then(|| RowPattern::content(RowKind::Single, start, fill, end));

        Self {
            top,
            middle: RowPattern::content(
                RowKind::Middle,
                &style.left_edge_token,
                fill,
                &style.right_edge_token,
            ),
            bottom,
            single,
        }
    }

    /// Matches a line against every row pattern.
    pub fn classify(&self, line: &str) -> LineClass {
        let class = LineClass {
            top: self.top.matches(line),
            middle: self.middle.matches(line),
            bottom: self.bottom.matches(line),
            single: self.single.as_ref().and_then(|pattern| pattern.matches(line)),
        };
        trace!(
            line,
            top = class.top.is_some(),
            middle = class.middle.is_some(),
            bottom = class.bottom.is_some(),
            single = class.single.is_some(),
            "classified line"
        );
        class
    }
}

fn last_line(token: &str) -> &str {
    token.rsplit('\n').next().unwrap_or(token)
}

fn first_line(token: &str) -> &str {
    token.split('\n').next().unwrap_or(token)
}
