//! Box style
//!
//! A [`BoxStyle`] is the fully resolved description of one box. It is built once
//! per operation (usually by `cbox-config`) and only ever read afterwards.
//!
//! Box layout. `~` marks a token repeated until the row reaches the box width:
//!
//!     [start][~~~~~~~~~~~top_edge~~~~~~~~~~~][top_right]
//!     [left_edge][~filling~][line][~filling~][right_edge]     (once per line)
//!     [bottom_left][~~~~~~~~bottom_edge~~~~~~~~][end]
//!
//! An empty `top_edge_token` or `bottom_edge_token` skips that row; the start or
//! end token then borders the first or last content row instead.

use crate::error::BoxError;
use crate::width::{display_width, pad_left, pad_right, pad_to_center};
use serde::{Deserialize, Serialize};

/// How content is placed between the left and right edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlignment {
    /// Pads a content line to `width` columns according to the alignment.
    pub fn pad(self, line: &str, width: usize, token: &str) -> String {
        match self {
            TextAlignment::Left => pad_right(line, width, token),
            TextAlignment::Center => pad_to_center(line, width, token),
            TextAlignment::Right => pad_left(line, width, token),
        }
    }
}

/// Whether over-long content lines are wrapped to fit the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordWrap {
    #[default]
    Off,
    On,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    pub capitalize: bool,
    pub start_token: String,
    pub end_token: String,
    pub top_right_token: String,
    pub bottom_left_token: String,
    pub top_edge_token: String,
    pub bottom_edge_token: String,
    pub left_edge_token: String,
    pub right_edge_token: String,
    pub filling_token: String,
    /// Total row width; zero derives it from the content.
    pub width: usize,
    pub text_alignment: TextAlignment,
    pub remove_empty_lines: bool,
    pub ignore_outer_indentation: bool,
    pub ignore_inner_indentation: bool,
    pub tab_size: usize,
    /// Rightmost column a wrapped box may reach; zero means unlimited.
    pub max_end_column: usize,
    pub word_wrap: WordWrap,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            capitalize: false,
            start_token: "/*".to_string(),
            end_token: "**/".to_string(),
            top_right_token: "**".to_string(),
            bottom_left_token: " **".to_string(),
            top_edge_token: "*".to_string(),
            bottom_edge_token: "*".to_string(),
            left_edge_token: " * ".to_string(),
            right_edge_token: " *".to_string(),
            filling_token: " ".to_string(),
            width: 0,
            text_alignment: TextAlignment::Center,
            remove_empty_lines: true,
            ignore_outer_indentation: true,
            ignore_inner_indentation: true,
            tab_size: 4,
            max_end_column: 0,
            word_wrap: WordWrap::Off,
        }
    }
}

impl BoxStyle {
    /// The filling token actually used for padding.
    ///
    /// An empty or zero-width filling token falls back to a single space.
    pub fn filling_token(&self) -> &str {
        if display_width(&self.filling_token) == 0 {
            " "
        } else {
            &self.filling_token
        }
    }

    /// Combined width of the left and right edge tokens.
    pub fn edges_width(&self) -> usize {
        display_width(&self.left_edge_token) + display_width(&self.right_edge_token)
    }

    pub fn skips_top_row(&self) -> bool {
        self.top_edge_token.is_empty()
    }

    pub fn skips_bottom_row(&self) -> bool {
        self.bottom_edge_token.is_empty()
    }

    /// Checks the style against the renderer's preconditions.
    ///
    /// Only the start and end tokens may span several lines, and a fixed width
    /// must leave room for both edges.
    pub fn validate(&self) -> Result<(), BoxError> {
        let single_line_tokens = [
            ("top_right_token", &self.top_right_token),
            ("bottom_left_token", &self.bottom_left_token),
            ("top_edge_token", &self.top_edge_token),
            ("bottom_edge_token", &self.bottom_edge_token),
            ("left_edge_token", &self.left_edge_token),
            ("right_edge_token", &self.right_edge_token),
            ("filling_token", &self.filling_token),
        ];

        for (name, token) in single_line_tokens {
            if token.contains('\n') {
                return Err(BoxError::InvalidStyle(format!(
                    "{} must not contain a newline",
                    name
                )));
            }
        }

        if self.width != 0 && self.width < self.edges_width() {
            return Err(BoxError::InvalidStyle(format!(
                "box width {} is narrower than its edges ({} columns)",
                self.width,
                self.edges_width()
            )));
        }

        Ok(())
    }
}
