//! Box discovery
//!
//! Finds the full extent of a box around an arbitrary line range and annotates
//! every line of it. The range may cut through the box anywhere: when its first
//! edge row isn't an opening row the opening is searched for above the range,
//! and when the box is still open at the end of the range its closing row is
//! searched for below.
//!
//! Lines are classified once and cached, since the outward scans and the walk
//! look at the same lines.
//!
//! The walk is a two state machine:
//!
//!     Outside --top--> Inside --bottom--> Outside
//!     Outside --single--> Outside
//!     Inside  --top--> Inside      (rows since the previous top turn plain)
//!
//! Inside a box a row is tried as bottom, then middle, then top.
//!
//! Rows matching both the top and the bottom pattern (`########` in hash styles)
//! are resolved by the state while walking. Before the walk, such a row counts as
//! closing when the line above it is a middle row.
//!
//! Only the line of a multi-line start or end token that touches the box takes
//! part in matching. The other token lines join the selection afterwards, as
//! border rows, when the document repeats them next to the box.

use crate::annotated::{AnnotatedLine, AnnotatedSelection, CommentLine, RowKind};
use crate::error::BoxError;
use crate::matching::{BoxMatcher, LineClass};
use crate::style::BoxStyle;
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use tracing::{debug, trace};

/// Finds the box overlapping `start..=end` (zero-based, inclusive).
///
/// `get_line` returns the text of a document line, or `None` past the end of the
/// document. When no complete box is found every line comes back plain and the
/// range is returned unchanged.
pub fn find_box<F, L>(
    start: usize,
    end: usize,
    style: &BoxStyle,
    get_line: F,
) -> Result<AnnotatedSelection, BoxError>
where
    F: Fn(usize) -> Option<L>,
    L: AsRef<str>,
{
    if start > end {
        return Err(BoxError::InvalidRange { start, end });
    }
    style.validate()?;

    let mut scanner = Scanner::new(style, get_line);
    if scanner.line(end).is_none() {
        return Err(BoxError::LineOutOfRange { line: end });
    }

    let mut first = start;
    if scanner.needs_upward_scan(start, end) {
        if let Some(top) = scanner.scan_upward(start) {
            debug!(top, start, "box opens above the selection");
            first = top;
        }
    }

    let mut walk = Walk::new(first);
    scanner.walk(first..=end, &mut walk)?;

    if let State::Inside { opened_at } = walk.state {
        match scanner.scan_downward(end + 1) {
            Some(bottom) => {
                debug!(bottom, end, "box closes below the selection");
                scanner.walk(end + 1..=bottom, &mut walk)?;
            }
            None => {
                debug!(opened_at, "box never closes");
                walk.demote(opened_at - first);
                if opened_at < start {
                    walk.lines.drain(..start - first);
                    first = start;
                }
            }
        }
    }

    Ok(scanner.attach_token_lines(style, first, walk.lines))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Outside,
    Inside {
        opened_at: usize,
    },
}

/// A document line and the patterns it matched
#[derive(Debug)]
struct Classified {
    text: String,
    class: LineClass,
}

struct Scanner<F> {
    matcher: BoxMatcher,
    get_line: F,
    cache: HashMap<usize, Option<Classified>>,
}

impl<F, L> Scanner<F>
where
    F: Fn(usize) -> Option<L>,
    L: AsRef<str>,
{
    fn new(style: &BoxStyle, get_line: F) -> Self {
        Self {
            matcher: BoxMatcher::new(style),
            get_line,
            cache: HashMap::new(),
        }
    }

    fn line(&mut self, index: usize) -> Option<&Classified> {
        let matcher = &self.matcher;
        let get_line = &self.get_line;
        self.cache
            .entry(index)
            .or_insert_with(|| {
                get_line(index).map(|line| {
                    let text = line.as_ref().to_string();
                    let class = matcher.classify(&text);
                    Classified { text, class }
                })
            })
            .as_ref()
    }

    fn follows_middle(&mut self, index: usize) -> bool {
        index > 0
            && self
                .line(index - 1)
                .is_some_and(|previous| previous.class.middle.is_some())
    }

    /// Whether the box opening has to be searched for above the range.
    fn needs_upward_scan(&mut self, start: usize, end: usize) -> bool {
        for index in start..=end {
            let Some(classified) = self.line(index) else {
                break;
            };
            let class = &classified.class;
            let (ambiguous, opens, closes) = (class.is_ambiguous(), class.opens(), class.closes());

            if ambiguous {
                return self.follows_middle(index);
            }
            if opens {
                return false;
            }
            if closes {
                return true;
            }
        }
        true
    }

    /// Searches the lines above `start` for the row opening the box.
    fn scan_upward(&mut self, start: usize) -> Option<usize> {
        for index in (0..start).rev() {
            let class = &self.line(index)?.class;
            let (ambiguous, top, closes) = (class.is_ambiguous(), class.top.is_some(), class.closes());

            if ambiguous {
                if self.follows_middle(index) {
                    trace!(index, "upward scan hit the end of another box");
                    return None;
                }
                return Some(index);
            }
            if top {
                return Some(index);
            }
            if closes {
                trace!(index, "upward scan hit the end of another box");
                return None;
            }
        }
        trace!("upward scan reached the start of the document");
        None
    }

    /// Searches the lines from `from` on for the row closing the box.
    fn scan_downward(&mut self, from: usize) -> Option<usize> {
        for index in from.. {
            let class = &self.line(index)?.class;
            if class.bottom.is_some() {
                return Some(index);
            }
            if class.opens() {
                trace!(index, "downward scan hit the start of another box");
                return None;
            }
        }
        None
    }

    /// Whether the document lines ending just before `index` (or starting just
    /// after it, when `below`) are `token_lines` at the given indentation.
    fn has_token_lines(
        &mut self,
        index: usize,
        below: bool,
        indentation: &str,
        token_lines: &[&str],
    ) -> bool {
        let count = token_lines.len();
        if !below && index < count {
            return false;
        }
        let from = if below { index + 1 } else { index - count };
        token_lines.iter().enumerate().all(|(offset, token_line)| {
            self.line(from + offset).is_some_and(|classified| {
                classified
                    .text
                    .strip_prefix(indentation)
                    .is_some_and(|rest| rest == *token_line)
            })
        })
    }

    /// Extends the selection over the outer lines of multi-line start and end
    /// tokens, which only match as a whole next to a recognized box row.
    fn attach_token_lines(
        &mut self,
        style: &BoxStyle,
        first: usize,
        lines: Vec<AnnotatedLine>,
    ) -> AnnotatedSelection {
        let leading = leading_token_lines(&style.start_token);
        let trailing = trailing_token_lines(&style.end_token);
        let mut rows: BTreeMap<usize, AnnotatedLine> = (first..).zip(lines).collect();
        if leading.is_empty() && trailing.is_empty() {
            return selection_of(rows);
        }

        let edges: Vec<(usize, RowKind, String)> = rows
            .iter()
            .filter_map(|(&index, line)| {
                let comment = line.as_comment()?;
                Some((index, comment.kind, comment.indentation.clone()))
            })
            .collect();

        for (index, kind, indentation) in edges {
            let opens = matches!(kind, RowKind::Top | RowKind::Single);
            let closes = matches!(kind, RowKind::Bottom | RowKind::Single);

            if opens
                && !leading.is_empty()
                && self.has_token_lines(index, false, &indentation, &leading)
            {
                let from = index - leading.len();
                for (offset, token_line) in leading.iter().enumerate() {
                    attach(&mut rows, from + offset, RowKind::Top, &indentation, token_line);
                }
            }
            if closes
                && !trailing.is_empty()
                && self.has_token_lines(index, true, &indentation, &trailing)
            {
                for (offset, token_line) in trailing.iter().enumerate() {
                    attach(&mut rows, index + 1 + offset, RowKind::Bottom, &indentation, token_line);
                }
            }
        }

        selection_of(rows)
    }

    fn walk(&mut self, range: RangeInclusive<usize>, walk: &mut Walk) -> Result<(), BoxError> {
        for index in range {
            let classified = self
                .line(index)
                .ok_or(BoxError::LineOutOfRange { line: index })?;
            walk.step(index, classified);
        }
        Ok(())
    }
}

/// Lines of a start token above the one touching the box.
fn leading_token_lines(token: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = token.split('\n').collect();
    lines.pop();
    lines
}

/// Lines of an end token below the one touching the box.
fn trailing_token_lines(token: &str) -> Vec<&str> {
    token.split('\n').skip(1).collect()
}

/// Records a token line as a border row, unless a box row is already there.
fn attach(
    rows: &mut BTreeMap<usize, AnnotatedLine>,
    index: usize,
    kind: RowKind,
    indentation: &str,
    token_line: &str,
) {
    if rows.get(&index).is_some_and(|line| !line.is_plain()) {
        return;
    }
    trace!(index, "attached token line");
    rows.insert(
        index,
        AnnotatedLine::Comment(CommentLine {
            kind,
            indentation: indentation.to_string(),
            open: token_line.to_string(),
            left_fill: String::new(),
            text: None,
            right_fill: String::new(),
            close: String::new(),
        }),
    );
}

/// Contiguous rows keyed by document line.
fn selection_of(rows: BTreeMap<usize, AnnotatedLine>) -> AnnotatedSelection {
    let first = rows.keys().next().copied().unwrap_or_default();
    let last = rows.keys().next_back().copied().unwrap_or(first);
    AnnotatedSelection {
        range: (first, last),
        lines: rows.into_values().collect(),
    }
}

/// Lines annotated so far and the state after the last of them
#[derive(Debug)]
struct Walk {
    /// Document line of `lines[0]`
    first: usize,
    state: State,
    lines: Vec<AnnotatedLine>,
    raw: Vec<String>,
}

impl Walk {
    fn new(first: usize) -> Self {
        Self {
            first,
            state: State::Outside,
            lines: Vec::new(),
            raw: Vec::new(),
        }
    }

    fn step(&mut self, index: usize, classified: &Classified) {
        let class = &classified.class;
        let row = match self.state {
            State::Outside => {
                if let Some(single) = &class.single {
                    Some(single)
                } else if let Some(top) = &class.top {
                    self.state = State::Inside { opened_at: index };
                    Some(top)
                } else {
                    None
                }
            }
            State::Inside { opened_at } => {
                if let Some(bottom) = &class.bottom {
                    self.state = State::Outside;
                    Some(bottom)
                } else if let Some(middle) = &class.middle {
                    Some(middle)
                } else if let Some(top) = &class.top {
                    // A box that never closed is followed by a new one
                    trace!(opened_at, index, "box reopened before closing");
                    self.demote(opened_at - self.first);
                    self.state = State::Inside { opened_at: index };
                    Some(top)
                } else {
                    None
                }
            }
        };

        trace!(index, state = ?self.state, comment = row.is_some(), "walked line");

        self.lines.push(match row {
            Some(row) => AnnotatedLine::Comment(row.clone()),
            None => AnnotatedLine::plain(classified.text.as_str()),
        });
        self.raw.push(classified.text.clone());
    }

    /// Turns every line from `offset` on back into plain text.
    fn demote(&mut self, offset: usize) {
        for (line, raw) in self.lines.iter_mut().zip(&self.raw).skip(offset) {
            *line = AnnotatedLine::plain(raw.as_str());
        }
        self.state = State::Outside;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::convert_to_comment_box;
    use crate::style::TextAlignment;

    fn doc(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    fn find(lines: &[String], start: usize, end: usize, style: &BoxStyle) -> AnnotatedSelection {
        find_box(start, end, style, |i| lines.get(i)).unwrap()
    }

    fn kinds(selection: &AnnotatedSelection) -> Vec<Option<RowKind>> {
        selection
            .lines
            .iter()
            .map(|line| line.as_comment().map(|comment| comment.kind))
            .collect()
    }

    fn hash_style() -> BoxStyle {
        BoxStyle {
            start_token: "#".to_string(),
            top_edge_token: "#".to_string(),
            top_right_token: "##".to_string(),
            left_edge_token: "# ".to_string(),
            right_edge_token: " #".to_string(),
            bottom_left_token: "#".to_string(),
            bottom_edge_token: "#".to_string(),
            end_token: "##".to_string(),
            ..BoxStyle::default()
        }
    }

    #[test]
    fn test_every_sub_selection_finds_the_whole_box() {
        let style = BoxStyle::default();
        let lines = doc(&convert_to_comment_box("test", &style));
        assert_eq!(lines.len(), 3);

        for start in 0..3 {
            for end in start..3 {
                let selection = find(&lines, start, end, &style);
                assert_eq!(selection.range, (0, 2), "selection {}..={}", start, end);
                assert_eq!(
                    kinds(&selection),
                    vec![Some(RowKind::Top), Some(RowKind::Middle), Some(RowKind::Bottom)]
                );
            }
        }
    }

    #[test]
    fn test_box_between_code_lines() {
        let style = BoxStyle::default();
        let lines = doc(&format!(
            "let a = 1;\n{}\nlet b = 2;",
            convert_to_comment_box("test", &style)
        ));

        let selection = find(&lines, 2, 2, &style);
        assert_eq!(selection.range, (1, 3));

        let selection = find(&lines, 0, 4, &style);
        assert_eq!(selection.range, (0, 4));
        assert_eq!(
            kinds(&selection),
            vec![
                None,
                Some(RowKind::Top),
                Some(RowKind::Middle),
                Some(RowKind::Bottom),
                None
            ]
        );
    }

    #[test]
    fn test_no_box_leaves_lines_plain() {
        let lines = doc("fn main() {\n    run();\n}");
        let selection = find(&lines, 0, 2, &BoxStyle::default());
        assert_eq!(selection.range, (0, 2));
        assert!(!selection.contains_box());
        assert_eq!(selection.lines[1], AnnotatedLine::plain("    run();"));
    }

    #[test]
    fn test_unclosed_box_is_demoted() {
        let lines = doc("/********\n * test *\ncode");
        let selection = find(&lines, 1, 1, &BoxStyle::default());
        assert_eq!(selection.range, (1, 1));
        assert_eq!(selection.lines, vec![AnnotatedLine::plain(" * test *")]);

        let selection = find(&lines, 0, 2, &BoxStyle::default());
        assert_eq!(selection.range, (0, 2));
        assert!(!selection.contains_box());
    }

    #[test]
    fn test_upward_scan_stops_at_previous_box() {
        let style = BoxStyle::default();
        let lines = doc(&format!(
            "{}\n * stray *",
            convert_to_comment_box("test", &style)
        ));
        let selection = find(&lines, 3, 3, &style);
        assert_eq!(selection.range, (3, 3));
        assert!(!selection.contains_box());
    }

    #[test]
    fn test_hash_style_stacked_boxes() {
        let style = hash_style();
        let lines = doc(&format!(
            "{}\n{}",
            convert_to_comment_box("A", &style),
            convert_to_comment_box("B", &style)
        ));
        assert_eq!(lines, doc("#####\n# A #\n#####\n#####\n# B #\n#####"));

        assert_eq!(find(&lines, 2, 2, &style).range, (0, 2));
        assert_eq!(find(&lines, 3, 3, &style).range, (3, 5));
        assert_eq!(find(&lines, 1, 1, &style).range, (0, 2));
        assert_eq!(find(&lines, 4, 4, &style).range, (3, 5));
    }

    #[test]
    fn test_single_row_boxes() {
        let style = BoxStyle {
            start_token: "/* ".to_string(),
            end_token: " */".to_string(),
            top_edge_token: String::new(),
            bottom_edge_token: String::new(),
            right_edge_token: String::new(),
            text_alignment: TextAlignment::Left,
            ..BoxStyle::default()
        };
        let lines = doc("/* a */\n/* b */");
        let selection = find(&lines, 0, 1, &style);
        assert_eq!(selection.range, (0, 1));
        assert_eq!(kinds(&selection), vec![Some(RowKind::Single); 2]);
    }

    #[test]
    fn test_soft_edges_scan_upward() {
        let style = BoxStyle {
            start_token: "/* ".to_string(),
            end_token: " */".to_string(),
            top_edge_token: String::new(),
            bottom_edge_token: String::new(),
            right_edge_token: String::new(),
            text_alignment: TextAlignment::Left,
            ..BoxStyle::default()
        };
        let lines = doc(&convert_to_comment_box("test\nwith multiple lines", &style));
        let selection = find(&lines, 1, 1, &style);
        assert_eq!(selection.range, (0, 1));
        assert_eq!(kinds(&selection), vec![Some(RowKind::Top), Some(RowKind::Bottom)]);
    }

    #[test]
    fn test_new_top_while_inside_restarts_the_box() {
        let lines = doc("/********\nlet x = 1;\n/********\n * test *\n ********/");
        let selection = find(&lines, 0, 4, &BoxStyle::default());
        assert_eq!(selection.range, (0, 4));
        assert_eq!(
            kinds(&selection),
            vec![
                None,
                None,
                Some(RowKind::Top),
                Some(RowKind::Middle),
                Some(RowKind::Bottom)
            ]
        );
        assert_eq!(selection.lines[0], AnnotatedLine::plain("/********"));
    }

    #[test]
    fn test_multi_line_tokens_join_the_selection() {
        let style = BoxStyle {
            start_token: "// Hello there!\n/*".to_string(),
            end_token: "**/\n// bye".to_string(),
            ..BoxStyle::default()
        };
        let lines = doc(&convert_to_comment_box("test", &style));
        assert_eq!(lines.len(), 5);

        let selection = find(&lines, 2, 2, &style);
        assert_eq!(selection.range, (0, 4));
        assert_eq!(
            kinds(&selection),
            vec![
                Some(RowKind::Top),
                Some(RowKind::Top),
                Some(RowKind::Middle),
                Some(RowKind::Bottom),
                Some(RowKind::Bottom)
            ]
        );
        let banner = selection.lines[0].as_comment().unwrap();
        assert_eq!(banner.open, "// Hello there!");
        assert!(banner.is_border());
    }

    #[test]
    fn test_multi_line_tokens_must_match_exactly() {
        let style = BoxStyle {
            start_token: "// Hello there!\n/*".to_string(),
            ..BoxStyle::default()
        };
        let lines = doc("// something else\n/********\n * test *\n ********/");
        let selection = find(&lines, 2, 2, &style);
        assert_eq!(selection.range, (1, 3));
    }

    #[test]
    fn test_rejects_reversed_range() {
        let lines = doc("a\nb");
        assert_eq!(
            find_box(1, 0, &BoxStyle::default(), |i| lines.get(i)),
            Err(BoxError::InvalidRange { start: 1, end: 0 })
        );
    }

    #[test]
    fn test_rejects_range_past_document_end() {
        let lines = doc("a\nb");
        assert_eq!(
            find_box(0, 5, &BoxStyle::default(), |i| lines.get(i)),
            Err(BoxError::LineOutOfRange { line: 5 })
        );
    }

    #[test]
    fn test_rejects_invalid_style() {
        let lines = doc("a");
        let style = BoxStyle {
            left_edge_token: "|\n".to_string(),
            ..BoxStyle::default()
        };
        assert!(matches!(
            find_box(0, 0, &style, |i| lines.get(i)),
            Err(BoxError::InvalidStyle(_))
        ));
    }
}
