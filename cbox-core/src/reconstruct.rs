//! Box reconstruction
//!
//! The inverse of rendering: annotated lines back to the text they were drawn
//! around, optionally re-rendered with a style.

use crate::annotated::AnnotatedLine;
use crate::render::convert_to_comment_box;
use crate::style::BoxStyle;
use crate::width::{display_width, spaces};

/// Recovers the plain text wrapped by the annotated box rows.
///
/// Border rows carry no text and are dropped. Fill around the text becomes
/// spaces of the same width, so column positions survive. Plain lines are kept
/// as they are.
pub fn remove_styled_comment_box(lines: &[AnnotatedLine]) -> String {
    lines
        .iter()
        .filter_map(|line| match line {
            AnnotatedLine::Plain { text } => Some(text.clone()),
            AnnotatedLine::Comment(comment) => comment.text.as_ref().map(|text| {
                format!(
                    "{}{}{}{}",
                    comment.indentation,
                    spaces(display_width(&comment.left_fill)),
                    text,
                    spaces(display_width(&comment.right_fill))
                )
            }),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips the box and renders its text again with `style`.
pub fn update_styled_comment_box(lines: &[AnnotatedLine], style: &BoxStyle) -> String {
    convert_to_comment_box(&remove_styled_comment_box(lines), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotated::{CommentLine, RowKind};

    fn row(kind: RowKind, left_fill: &str, text: Option<&str>, right_fill: &str) -> AnnotatedLine {
        AnnotatedLine::Comment(CommentLine {
            kind,
            indentation: "  ".to_string(),
            open: " * ".to_string(),
            left_fill: left_fill.to_string(),
            text: text.map(str::to_string),
            right_fill: right_fill.to_string(),
            close: " *".to_string(),
        })
    }

    #[test]
    fn test_strip_drops_border_rows() {
        let lines = vec![
            row(RowKind::Top, "*****", None, ""),
            row(RowKind::Middle, "", Some("test"), ""),
            row(RowKind::Bottom, "*****", None, ""),
        ];
        assert_eq!(remove_styled_comment_box(&lines), "  test");
    }

    #[test]
    fn test_strip_turns_fill_into_spaces() {
        let lines = vec![row(RowKind::Middle, "~-", Some("a b"), "-~-")];
        assert_eq!(remove_styled_comment_box(&lines), "    a b   ");
    }

    #[test]
    fn test_strip_counts_wide_fill_by_width() {
        let lines = vec![row(RowKind::Middle, "🐶", Some("x"), "")];
        assert_eq!(remove_styled_comment_box(&lines), "    x");
    }

    #[test]
    fn test_strip_keeps_plain_lines() {
        let lines = vec![
            AnnotatedLine::plain("fn main() {"),
            row(RowKind::Middle, "", Some("note"), ""),
            AnnotatedLine::plain("}"),
        ];
        assert_eq!(remove_styled_comment_box(&lines), "fn main() {\n  note\n}");
    }

    #[test]
    fn test_update_rerenders_with_new_style() {
        let lines = vec![
            row(RowKind::Top, "****", None, ""),
            row(RowKind::Middle, " ", Some("ab"), " "),
            row(RowKind::Bottom, "****", None, ""),
        ];
        let style = BoxStyle {
            filling_token: "-".to_string(),
            width: 9,
            ..BoxStyle::default()
        };
        assert_eq!(
            update_styled_comment_box(&lines, &style),
            "/********\n * -ab- *\n ********/"
        );
    }
}
