//! Line preparation
//!
//! Turns raw selected text into the list of content lines the renderer lays out:
//!
//!     capitalize -> split -> drop blank lines -> trim right -> expand tabs
//!         -> dedent -> wrap -> inner indentation
//!
//! The common indentation removed by the dedent step is returned alongside the
//! lines, so the renderer can put it back in front of the finished box.

use crate::style::{BoxStyle, TextAlignment, WordWrap};
use crate::width::{
    char_width, convert_tabs_to_spaces, display_width, max_width, pad_right, reverse_codepoints,
};

/// Content lines ready for layout, plus the indentation taken off them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLines {
    pub lines: Vec<String>,
    pub indentation_level: usize,
}

/// Runs every preparation step for `text` under `style`.
pub fn prepare_lines(text: &str, style: &BoxStyle) -> PreparedLines {
    let text = if style.capitalize {
        text.to_uppercase()
    } else {
        text.to_string()
    };

    let lines: Vec<String> = text
        .split('\n')
        .filter(|line| !style.remove_empty_lines || line.chars().any(|c| !c.is_whitespace()))
        .map(|line| convert_tabs_to_spaces(line.trim_end(), style.tab_size))
        .collect();

    let indentation_level = find_indentation_level(&lines);
    let mut lines = dedent_by(&lines, indentation_level);

    if let Some(limit) = wrap_width(style, indentation_level) {
        lines = lines
            .iter()
            .flat_map(|line| wrap_line(line, limit))
            .collect();
    }

    let lines = lines
        .into_iter()
        .map(|line| handle_inner_indentation(&line, style))
        .collect();

    PreparedLines {
        lines,
        indentation_level,
    }
}

/// Column of the leftmost non-space char over all lines.
///
/// Lines made only of spaces don't constrain the level. If no line has a
/// non-space char, the level is the width of the longest line.
pub fn find_indentation_level<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| line.chars().any(|c| c != ' '))
        .map(|line| line.chars().take_while(|&c| c == ' ').count())
        .min()
        .unwrap_or_else(|| max_width(lines))
}

/// Removes up to `levels` leading spaces from every line.
pub fn dedent_by<S: AsRef<str>>(lines: &[S], levels: usize) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let leading = line.bytes().take(levels).take_while(|&b| b == b' ').count();
            line[leading..].to_string()
        })
        .collect()
}

/// Prefixes every line with `levels` spaces.
pub fn indent_by<S: AsRef<str>>(lines: &[S], levels: usize) -> Vec<String> {
    let indentation = " ".repeat(levels);
    lines
        .iter()
        .map(|line| format!("{}{}", indentation, line.as_ref()))
        .collect()
}

/// Columns available to content when wrapping is enabled and bounded.
fn wrap_width(style: &BoxStyle, indentation_level: usize) -> Option<usize> {
    if style.word_wrap == WordWrap::Off {
        return None;
    }

    let edges = style.edges_width();
    let available = if style.width > 0 {
        style.width.checked_sub(edges)
    } else if style.max_end_column > 0 {
        let outer = if style.ignore_outer_indentation {
            0
        } else {
            indentation_level
        };
        style.max_end_column.checked_sub(outer + edges)
    } else {
        None
    };

    available.filter(|&width| width > 0)
}

/// Greedily wraps a line at whitespace so each row fits in `limit` columns.
///
/// Continuation rows repeat the line's leading indentation. Words wider than the
/// room left after that indentation are split by char.
pub fn wrap_line(line: &str, limit: usize) -> Vec<String> {
    if limit == 0 || display_width(line) <= limit {
        return vec![line.to_string()];
    }

    let content = line.trim_start_matches(' ');
    let indent = &line[..line.len() - content.len()];
    let indent = if indent.len() >= limit { "" } else { indent };
    let room = limit - indent.len();

    let mut rows = Vec::new();
    let mut current = indent.to_string();
    let mut current_width = indent.len();
    let mut has_words = false;

    for word in content.split_whitespace() {
        let word_width = display_width(word);

        if has_words {
            if current_width + 1 + word_width <= limit {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }
            rows.push(std::mem::replace(&mut current, indent.to_string()));
            current_width = indent.len();
        }

        let mut pieces = split_to_width(word, room);
        let last = pieces.pop().unwrap_or_default();
        for piece in pieces {
            rows.push(format!("{}{}", indent, piece));
        }
        current_width += display_width(&last);
        current.push_str(&last);
        has_words = true;
    }

    rows.push(current);
    rows
}

/// Splits a word into chunks of at most `room` columns, at least one char each.
fn split_to_width(word: &str, room: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0;

    for c in word.chars() {
        let w = char_width(c);
        if !piece.is_empty() && width + w > room {
            pieces.push(std::mem::take(&mut piece));
            width = 0;
        }
        piece.push(c);
        width += w;
    }

    pieces.push(piece);
    pieces
}

/// Drops or re-renders the indentation left on a line after dedenting.
///
/// Kept indentation is drawn with the filling token, anchored at its right end
/// so its phase lines up with the padding on the right of the text.
fn handle_inner_indentation(line: &str, style: &BoxStyle) -> String {
    let content = line.trim_start();
    // Inner indentation doesn't make sense with centered or right-aligned text
    if style.ignore_inner_indentation || style.text_alignment != TextAlignment::Left {
        return content.to_string();
    }

    let indentation_width = display_width(&line[..line.len() - content.len()]);
    if indentation_width == 0 {
        return content.to_string();
    }

    format!(
        "{}{}",
        reverse_codepoints(&pad_right("", indentation_width, style.filling_token())),
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn left_style() -> BoxStyle {
        BoxStyle {
            text_alignment: TextAlignment::Left,
            ..BoxStyle::default()
        }
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&["", ""], 0)]
    #[case(&["  ", ""], 2)]
    #[case(&["", "  "], 2)]
    #[case(&["  text"], 2)]
    #[case(&["  text", "  text2"], 2)]
    #[case(&["  text", "    text2"], 2)]
    #[case(&["    text", "  text2"], 2)]
    #[case(&["    text", "  text2", "    text3"], 2)]
    #[case(&["", "  text", ""], 2)]
    fn test_find_indentation_level(#[case] lines: &[&str], #[case] expected: usize) {
        assert_eq!(find_indentation_level(lines), expected);
    }

    #[test]
    fn test_dedent_and_indent() {
        let lines = ["    a", "  b", ""];
        assert_eq!(dedent_by(&lines, 2), vec!["  a", "b", ""]);
        assert_eq!(indent_by(&["a", ""], 2), vec!["  a", "  "]);
    }

    #[test]
    fn test_prepare_strips_blank_lines_and_indentation() {
        let prepared = prepare_lines(" \t with multiple lines \t \n \t \n \t test \t ", &left_style());
        assert_eq!(prepared.lines, vec!["with multiple lines", "test"]);
    }

    #[test]
    fn test_prepare_removing_every_line_leaves_nothing() {
        let prepared = prepare_lines("\n  \n", &BoxStyle::default());
        assert!(prepared.lines.is_empty());
        assert_eq!(prepared.indentation_level, 0);
    }

    #[test]
    fn test_prepare_keeps_blank_lines_when_asked() {
        let style = BoxStyle {
            remove_empty_lines: false,
            ..left_style()
        };
        let prepared = prepare_lines("a\n\nb", &style);
        assert_eq!(prepared.lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_prepare_records_outer_indentation() {
        let prepared = prepare_lines("\treally\n\ttest", &left_style());
        assert_eq!(prepared.indentation_level, 4);
        assert_eq!(prepared.lines, vec!["really", "test"]);
    }

    #[test]
    fn test_prepare_capitalizes() {
        let style = BoxStyle {
            capitalize: true,
            ..BoxStyle::default()
        };
        assert_eq!(prepare_lines("Hello", &style).lines, vec!["HELLO"]);
    }

    #[test]
    fn test_inner_indentation_uses_filling_token() {
        let style = BoxStyle {
            ignore_inner_indentation: false,
            filling_token: "-+".to_string(),
            ..left_style()
        };
        let prepared = prepare_lines("a\n  b\n   c", &style);
        assert_eq!(prepared.lines, vec!["a", "+-b", "-+-c"]);
    }

    #[test]
    fn test_inner_indentation_dropped_for_centered_text() {
        let style = BoxStyle {
            ignore_inner_indentation: false,
            ..BoxStyle::default()
        };
        assert_eq!(prepare_lines("a\n   b", &style).lines, vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_line_breaks_at_whitespace() {
        assert_eq!(
            wrap_line("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_line_keeps_indentation_on_continuations() {
        assert_eq!(wrap_line("  aaa bbb ccc", 8), vec!["  aaa", "  bbb", "  ccc"]);
    }

    #[test]
    fn test_wrap_line_splits_long_words() {
        assert_eq!(wrap_line("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_line_short_lines_untouched() {
        assert_eq!(wrap_line("short", 10), vec!["short"]);
    }

    #[test]
    fn test_prepare_wraps_to_fixed_width() {
        let style = BoxStyle {
            width: 14,
            word_wrap: WordWrap::On,
            ..left_style()
        };
        // 14 columns minus " * " and " *" leaves 9
        let prepared = prepare_lines("one two three four", &style);
        assert_eq!(prepared.lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_prepare_wraps_to_max_end_column() {
        let style = BoxStyle {
            max_end_column: 16,
            word_wrap: WordWrap::On,
            ignore_outer_indentation: false,
            ..left_style()
        };
        // 16 columns minus 2 of indentation and 5 of edges leaves 9
        let prepared = prepare_lines("  one two three four", &style);
        assert_eq!(prepared.indentation_level, 2);
        assert_eq!(prepared.lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_prepare_does_not_wrap_when_off() {
        let style = BoxStyle {
            max_end_column: 10,
            ..left_style()
        };
        assert_eq!(
            prepare_lines("one two three four", &style).lines,
            vec!["one two three four"]
        );
    }
}
