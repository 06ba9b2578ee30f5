//! Partial style layers
//!
//! A [`StyleConfig`] is one layer of a style: the defaults, a language preset or
//! a named style. Any field may be missing; layers are merged field by field
//! with the later layer winning, and the merged result is turned into a
//! [`BoxStyle`] once every field is known.

use crate::error::StyleError;
use cbox_core::{BoxStyle, TextAlignment, WordWrap};
use serde::Deserialize;

/// Parent style names, written as a single name or a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BasedOn {
    One(String),
    Many(Vec<String>),
}

impl BasedOn {
    pub fn names(&self) -> &[String] {
        match self {
            BasedOn::One(name) => std::slice::from_ref(name),
            BasedOn::Many(names) => names,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub capitalize: Option<bool>,
    pub start_token: Option<String>,
    pub end_token: Option<String>,
    pub top_right_token: Option<String>,
    pub bottom_left_token: Option<String>,
    pub top_edge_token: Option<String>,
    pub bottom_edge_token: Option<String>,
    pub left_edge_token: Option<String>,
    pub right_edge_token: Option<String>,
    pub filling_token: Option<String>,
    pub width: Option<usize>,
    pub max_end_column: Option<usize>,
    pub word_wrap: Option<WordWrap>,
    pub text_alignment: Option<TextAlignment>,
    pub remove_empty_lines: Option<bool>,
    pub ignore_outer_indentation: Option<bool>,
    pub ignore_inner_indentation: Option<bool>,
    pub tab_size: Option<usize>,
    /// Left out of style listings
    pub hidden: Option<bool>,
    pub based_on: Option<BasedOn>,
}

macro_rules! merge_fields {
    ($target:ident, $layer:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$layer.$field {
                $target.$field = Some(value.clone());
            }
        )+
    };
}

macro_rules! require_field {
    ($config:ident, $name:expr, $field:ident) => {
        $config
            .$field
            .clone()
            .ok_or_else(|| StyleError::MissingField {
                style: $name.to_string(),
                field: stringify!($field),
            })?
    };
}

impl StyleConfig {
    pub fn parents(&self) -> &[String] {
        match &self.based_on {
            Some(based_on) => based_on.names(),
            None => &[],
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Overwrites every field `layer` sets. `hidden` and `based_on` belong to a
    /// single style and are not merged.
    pub fn merge(&mut self, layer: &StyleConfig) {
        merge_fields!(
            self,
            layer,
            capitalize,
            start_token,
            end_token,
            top_right_token,
            bottom_left_token,
            top_edge_token,
            bottom_edge_token,
            left_edge_token,
            right_edge_token,
            filling_token,
            width,
            max_end_column,
            word_wrap,
            text_alignment,
            remove_empty_lines,
            ignore_outer_indentation,
            ignore_inner_indentation,
            tab_size,
        );
    }

    /// Builds the box style named `name` from a fully merged layer.
    pub fn to_box_style(&self, name: &str) -> Result<BoxStyle, StyleError> {
        let style = BoxStyle {
            capitalize: require_field!(self, name, capitalize),
            start_token: require_field!(self, name, start_token),
            end_token: require_field!(self, name, end_token),
            top_right_token: require_field!(self, name, top_right_token),
            bottom_left_token: require_field!(self, name, bottom_left_token),
            top_edge_token: require_field!(self, name, top_edge_token),
            bottom_edge_token: require_field!(self, name, bottom_edge_token),
            left_edge_token: require_field!(self, name, left_edge_token),
            right_edge_token: require_field!(self, name, right_edge_token),
            filling_token: require_field!(self, name, filling_token),
            width: require_field!(self, name, width),
            text_alignment: require_field!(self, name, text_alignment),
            remove_empty_lines: require_field!(self, name, remove_empty_lines),
            ignore_outer_indentation: require_field!(self, name, ignore_outer_indentation),
            ignore_inner_indentation: require_field!(self, name, ignore_inner_indentation),
            tab_size: require_field!(self, name, tab_size),
            max_end_column: require_field!(self, name, max_end_column),
            word_wrap: require_field!(self, name, word_wrap),
        };

        style.validate().map_err(|source| StyleError::InvalidStyle {
            style: name.to_string(),
            source,
        })?;
        Ok(style)
    }
}
