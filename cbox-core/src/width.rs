//! Width and token primitives
//!
//! Every layout decision is made in terminal columns. A string's byte length and
//! char count are both wrong answers for `"🐶"` or `"あ"`, so all measuring goes
//! through [`display_width`], and all padding goes through [`pad_right`], which
//! cycles the chars of a (possibly multi-char, possibly wide) token.
//!
//! Padding never overshoots: when the next token char is wider than the room left
//! on the line, the remainder is filled with plain spaces.

use std::iter;
use unicode_width::UnicodeWidthChar;

/// Column width of a single char. Control chars count as zero.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Column width of a string, summed per char.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Widest string of a list, in columns.
pub fn max_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| display_width(line.as_ref()))
        .max()
        .unwrap_or(0)
}

/// Reverses a string char by char, so astral chars survive intact.
pub fn reverse_codepoints(s: &str) -> String {
    s.chars().rev().collect()
}

/// Width of the text after the last `\n`, or of the whole string if there is none.
pub fn width_of_last_line(s: &str) -> usize {
    match s.rfind('\n') {
        Some(pos) => display_width(&s[pos + 1..]),
        None => display_width(s),
    }
}

/// Extends the last line of `s` up to `target` columns with chars cycled from `token`.
///
/// A token with no visible width (empty, or only zero-width chars) pads with spaces.
pub fn pad_right(s: &str, target: usize, token: &str) -> String {
    let mut result = s.to_string();
    let mut current = width_of_last_line(s);
    if current >= target {
        return result;
    }

    let token = if display_width(token) == 0 { " " } else { token };
    let mut chars = token.chars().cycle();

    while current < target {
        let Some(c) = chars.next() else { break };
        let width = char_width(c);
        if current + width > target {
            result.extend(iter::repeat(' ').take(target - current));
            break;
        }
        result.push(c);
        current += width;
    }

    result
}

/// Pads `s` on both sides up to `target` columns.
///
/// The left side gets `floor(diff / 2)` columns and the right side the rest. Both
/// pads read from the outer edge inwards, so the char nearest each border is
/// always the token's first char regardless of the text length.
pub fn pad_to_center(s: &str, target: usize, token: &str) -> String {
    let width = display_width(s);
    if target <= width {
        return s.to_string();
    }

    let difference = target - width;
    let left = difference / 2;
    let right = difference - left;

    format!(
        "{}{}{}",
        pad_right("", left, token),
        s,
        reverse_codepoints(&pad_right("", right, token))
    )
}

/// Pads `s` on the left up to `target` columns (right alignment).
///
/// Mirrors [`pad_right`]: the token starts next to the text and its phase ends
/// at the border.
pub fn pad_left(s: &str, target: usize, token: &str) -> String {
    let width = display_width(s);
    if target <= width {
        return s.to_string();
    }

    format!(
        "{}{}",
        reverse_codepoints(&pad_right("", target - width, token)),
        s
    )
}

/// Expands tabs to the next multiple of `tab_width` columns.
///
/// Columns are counted in display width from the start of the line, so wide chars
/// before a tab shorten it. A `tab_width` of zero deletes tabs. The input must be
/// a single line.
pub fn convert_tabs_to_spaces(line: &str, tab_width: usize) -> String {
    if tab_width == 0 {
        return line.chars().filter(|&c| c != '\t').collect();
    }

    let mut result = String::with_capacity(line.len());
    let mut column = 0;

    for c in line.chars() {
        if c == '\t' {
            let width_left = tab_width - (column % tab_width);
            result.extend(iter::repeat(' ').take(width_left));
            column += width_left;
        } else {
            result.push(c);
            column += char_width(c);
        }
    }

    result
}

/// A run of `width` spaces.
pub fn spaces(width: usize) -> String {
    " ".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("abc", 3)]
    #[case("🐶", 2)]
    #[case("あい", 4)]
    #[case("e\u{301}", 1)]
    #[case("a\u{200B}b", 2)]
    fn test_display_width(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(display_width(input), expected);
    }

    #[test]
    fn test_max_width() {
        let empty: [&str; 0] = [];
        assert_eq!(max_width(&empty), 0);
        assert_eq!(max_width(&[""]), 0);
        assert_eq!(max_width(&["multiple", "lines"]), 8);
        assert_eq!(max_width(&["lines", "multiple"]), 8);
        assert_eq!(max_width(&["🐶🐶🐶", "abcde"]), 6);
    }

    #[rstest]
    #[case("", "")]
    #[case("abc", "cba")]
    #[case("🐶🐱", "🐱🐶")]
    #[case("あい", "いあ")]
    #[case("🐶❌🐭", "🐭❌🐶")]
    fn test_reverse_codepoints(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(reverse_codepoints(input), expected);
    }

    #[rstest]
    #[case("", 0)]
    #[case("***\n", 0)]
    #[case("\n*", 1)]
    #[case("\n***", 3)]
    #[case("*\n**\n***", 3)]
    #[case("****\n🐶", 2)]
    fn test_width_of_last_line(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(width_of_last_line(input), expected);
    }

    #[rstest]
    #[case("", 3, "*", "***")]
    #[case("-", 3, "*", "-**")]
    #[case("---", 3, "*", "---")]
    #[case("----", 3, "*", "----")]
    #[case("", 3, "*+", "*+*")]
    #[case("---\n--", 3, "*", "---\n--*")]
    #[case("🐶", 4, "*", "🐶**")]
    #[case("🐶", 4, "🐶", "🐶🐶")]
    #[case("*", 4, "🐶", "*🐶 ")]
    fn test_pad_right(
        #[case] input: &str,
        #[case] target: usize,
        #[case] token: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(pad_right(input, target, token), expected);
    }

    #[test]
    fn test_pad_right_zero_width_token_falls_back_to_spaces() {
        assert_eq!(pad_right("x", 4, ""), "x   ");
        assert_eq!(pad_right("x", 4, "\u{200B}"), "x   ");
    }

    #[rstest]
    #[case("", 2, "*", "**")]
    #[case("", 3, "*", "***")]
    #[case("-", 3, "*", "*-*")]
    #[case("---", 3, "*", "---")]
    #[case("--", 5, "*", "*--**")]
    #[case("", 3, "*+", "*+*")]
    #[case("O", 4, "*+", "*O+*")]
    #[case("", 4, "🐶", "🐶🐶")]
    #[case("--", 9, "🐶", "🐶 --🐶🐶")]
    fn test_pad_to_center(
        #[case] input: &str,
        #[case] target: usize,
        #[case] token: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(pad_to_center(input, target, token), expected);
    }

    #[rstest]
    #[case("", 3, "*", "***")]
    #[case("-", 3, "*", "**-")]
    #[case("---", 3, "*", "---")]
    #[case("O", 4, "*+", "*+*O")]
    #[case("ab", 5, "🐶", " 🐶ab")]
    fn test_pad_left(
        #[case] input: &str,
        #[case] target: usize,
        #[case] token: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(pad_left(input, target, token), expected);
    }

    #[rstest]
    #[case("", 1, "")]
    #[case("", 0, "")]
    #[case("\t", 1, " ")]
    #[case("abc\tabc", 1, "abc abc")]
    #[case("\t", 4, "    ")]
    #[case("abc\tabc", 4, "abc abc")]
    #[case("ab\tab", 4, "ab  ab")]
    #[case("🐶\t", 4, "🐶  ")]
    #[case("🐶🐶\t", 4, "🐶🐶    ")]
    #[case("a\tb\tc", 0, "abc")]
    fn test_convert_tabs_to_spaces(
        #[case] input: &str,
        #[case] tab_width: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(convert_tabs_to_spaces(input, tab_width), expected);
    }

    #[test]
    fn test_convert_many_tabs_with_spaces_between() {
        let line = " \t".repeat(5);
        assert_eq!(convert_tabs_to_spaces(&line, 8).len(), 8 * 5);
    }
}
