//! Box renderer
//!
//! The forward transform: prepared content lines plus a [`BoxStyle`] become the
//! text of a bordered box. See [`crate::style`] for the row layout.

use crate::lines::{indent_by, prepare_lines, PreparedLines};
use crate::style::BoxStyle;
use crate::width::{display_width, max_width, pad_right};
use tracing::trace;

/// Renders `text` as a comment box.
pub fn convert_to_comment_box(text: &str, style: &BoxStyle) -> String {
    let prepared = prepare_lines(text, style);
    layout_box(&prepared, style)
}

/// Width of the box for a set of prepared lines.
pub fn box_width(lines: &[String], style: &BoxStyle) -> usize {
    if style.width > 0 {
        style.width
    } else {
        max_width(lines) + style.edges_width()
    }
}

/// Draws the rows of the box around already prepared lines.
pub fn layout_box(prepared: &PreparedLines, style: &BoxStyle) -> String {
    let filling_token = style.filling_token();
    let edges_width = style.edges_width();
    let width = box_width(&prepared.lines, style);
    let content_width = width.saturating_sub(edges_width);
    let width_without_right_edge = width.saturating_sub(display_width(&style.right_edge_token));

    trace!(
        width,
        content_width,
        lines = prepared.lines.len(),
        "laying out comment box"
    );

    let lines: Vec<String> = prepared
        .lines
        .iter()
        .map(|line| style.text_alignment.pad(line, content_width, filling_token))
        .collect();

    let skip_first_row = style.skips_top_row();
    let skip_last_row = style.skips_bottom_row();
    let last_index = lines.len().saturating_sub(1);

    let mut rows = Vec::with_capacity(lines.len() + 2);

    if !skip_first_row {
        rows.push(format!(
            "{}{}",
            pad_right(
                &style.start_token,
                width_without_right_edge,
                &style.top_edge_token
            ),
            style.top_right_token
        ));
    }

    for (index, line) in lines.iter().enumerate() {
        let left = if index == 0 && skip_first_row {
            &style.start_token
        } else {
            &style.left_edge_token
        };
        let right = if index == last_index && skip_last_row {
            &style.end_token
        } else {
            &style.right_edge_token
        };
        rows.push(format!("{}{}{}", left, line, right));
    }

    if !skip_last_row {
        rows.push(format!(
            "{}{}",
            pad_right(
                &style.bottom_left_token,
                width_without_right_edge,
                &style.bottom_edge_token
            ),
            style.end_token
        ));
    }

    let result = rows.join("\n");

    if style.ignore_outer_indentation || prepared.indentation_level == 0 {
        return result;
    }

    let rows: Vec<&str> = result.split('\n').collect();
    indent_by(&rows, prepared.indentation_level).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextAlignment;

    fn style_a() -> BoxStyle {
        BoxStyle {
            text_alignment: TextAlignment::Left,
            ..BoxStyle::default()
        }
    }

    #[test]
    fn test_renders_single_line() {
        assert_eq!(
            convert_to_comment_box("test", &style_a()),
            "/********\n * test *\n ********/"
        );
    }

    #[test]
    fn test_renders_empty_comment_as_borders_only() {
        assert_eq!(convert_to_comment_box("", &style_a()), "/****\n ****/");
    }

    #[test]
    fn test_renders_multiple_lines() {
        assert_eq!(
            convert_to_comment_box("test\nwith multiple lines", &style_a()),
            "/***********************\n * test                *\n * with multiple lines *\n ***********************/"
        );
    }

    #[test]
    fn test_strips_surrounding_whitespace() {
        assert_eq!(
            convert_to_comment_box("with multiple lines\ntest", &style_a()),
            convert_to_comment_box(
                " \t with multiple lines \t \n \t \n \t test \t ",
                &style_a()
            )
        );
    }

    #[test]
    fn test_fixed_width_centered_with_filling_token() {
        let style = BoxStyle {
            start_token: "/*".to_string(),
            end_token: "*/".to_string(),
            top_right_token: "+".to_string(),
            bottom_left_token: " +".to_string(),
            top_edge_token: "=".to_string(),
            bottom_edge_token: "=".to_string(),
            left_edge_token: " |".to_string(),
            right_edge_token: "|".to_string(),
            filling_token: "~".to_string(),
            width: 50,
            remove_empty_lines: false,
            ..BoxStyle::default()
        };
        assert_eq!(
            convert_to_comment_box("test", &style),
            "/*===============================================+\n |~~~~~~~~~~~~~~~~~~~~~test~~~~~~~~~~~~~~~~~~~~~~|\n +===============================================*/"
        );
    }

    #[test]
    fn test_skipped_edges_move_start_and_end_tokens() {
        let style = BoxStyle {
            start_token: "/* ".to_string(),
            end_token: " */".to_string(),
            top_edge_token: String::new(),
            bottom_edge_token: String::new(),
            right_edge_token: String::new(),
            ..style_a()
        };
        assert_eq!(convert_to_comment_box("test", &style), "/* test */");
        assert_eq!(
            convert_to_comment_box("test\nwith multiple lines", &style),
            "/* test               \n * with multiple lines */"
        );
    }

    #[test]
    fn test_outer_indentation_is_reapplied() {
        let style = BoxStyle {
            ignore_outer_indentation: false,
            ..style_a()
        };
        assert_eq!(
            convert_to_comment_box("\treally\n\ttest\n\tmultiple lines", &style),
            "    /******************\n     * really         *\n     * test           *\n     * multiple lines *\n     ******************/"
        );
    }

    #[test]
    fn test_right_alignment() {
        let style = BoxStyle {
            text_alignment: TextAlignment::Right,
            ..BoxStyle::default()
        };
        assert_eq!(
            convert_to_comment_box("a\nlonger", &style),
            "/**********\n *      a *\n * longer *\n **********/"
        );
    }

    #[test]
    fn test_newlines_in_start_and_end_tokens() {
        let style = BoxStyle {
            start_token: "// Hello there!\n/*".to_string(),
            end_token: "**/\n// Yap, this is cool :)".to_string(),
            ..style_a()
        };
        assert_eq!(
            convert_to_comment_box("test\nwith multiple lines", &style),
            "// Hello there!\n/***********************\n * test                *\n * with multiple lines *\n ***********************/\n// Yap, this is cool :)"
        );
    }

    #[test]
    fn test_box_width_is_fixed_or_derived() {
        let lines = vec!["abc".to_string(), "🐶🐶".to_string()];
        assert_eq!(box_width(&lines, &BoxStyle::default()), 9);
        let fixed = BoxStyle {
            width: 30,
            ..BoxStyle::default()
        };
        assert_eq!(box_width(&lines, &fixed), 30);
    }
}
