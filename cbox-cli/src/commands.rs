//! Subcommand handlers
//!
//! Every handler takes the input text and returns what goes to stdout. Line
//! numbers on the command line and in JSON output are 1-based.

use anyhow::{anyhow, bail, Context, Result};
use cbox_config::{Loader, StyleCatalog};
use cbox_core::{BoxError, BoxStyle, TextDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::debug;

static LINE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*(?::\s*(\d+)\s*)?$").unwrap());

/// Project file picked up from the working directory when present
const PROJECT_CONFIG: &str = ".cbox.toml";

/// Parses `START:END` or `LINE` into a zero-based inclusive range.
pub fn parse_line_range(spec: &str) -> Result<RangeInclusive<usize>> {
    let captures = LINE_RANGE
        .captures(spec)
        .ok_or_else(|| anyhow!("Invalid line range '{}', expected START:END", spec))?;

    let start: usize = captures[1].parse()?;
    let end: usize = match captures.get(2) {
        Some(end) => end.as_str().parse()?,
        None => start,
    };

    if start == 0 || end == 0 {
        bail!("Line numbers start at 1, got '{}'", spec);
    }
    if start > end {
        bail!("Line range '{}' ends before it starts", spec);
    }
    Ok(start - 1..=end - 1)
}

/// Guesses a language id from a file extension.
///
/// C-family sources get no id: the default style already draws `/* */` boxes.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let language = match extension.as_str() {
        "py" => "python",
        "sh" | "bash" | "zsh" => "shellscript",
        "rb" => "ruby",
        "pl" => "perl",
        "r" => "r",
        "toml" => "toml",
        "yml" | "yaml" => "yaml",
        "cmake" => "cmake",
        "jl" => "julia",
        "ps1" => "powershell",
        "bat" | "cmd" => "bat",
        "tex" => "latex",
        "bib" => "bibtex",
        "clj" => "clojure",
        "lisp" | "el" => "lisp",
        "ini" => "ini",
        "fs" | "fsx" => "fsharp",
        "html" | "htm" => "html",
        "md" => "markdown",
        "lua" => "lua",
        "sql" => "sql",
        "vb" => "vb",
        "ml" | "mli" => "ocaml",
        "re" => "reason",
        "f" | "for" => "fortran",
        "f90" | "f95" | "f03" => "fortran-modern",
        "hs" => "haskell",
        "asm" | "s" => "asm",
        _ => return None,
    };
    Some(language)
}

/// Loads the style catalog: embedded defaults, then `.cbox.toml` in the working
/// directory if present, then every `--config` file in order.
pub fn load_catalog(config_files: &[PathBuf]) -> Result<StyleCatalog> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    for file in config_files {
        loader = loader.with_file(file);
    }
    let config = loader.build().context("Failed to load configuration")?;
    Ok(config.into_catalog())
}

pub fn resolve_style(
    catalog: &StyleCatalog,
    name: &str,
    language: Option<&str>,
) -> Result<BoxStyle> {
    debug!(style = name, language, "resolving style");
    catalog
        .box_style(name, language)
        .with_context(|| format!("Failed to resolve style '{}'", name))
}

/// Reports document errors with the 1-based line numbers the user typed.
fn one_based(error: BoxError) -> anyhow::Error {
    match error {
        BoxError::LineOutOfRange { line } => {
            anyhow!("Line {} is outside the document", line + 1)
        }
        BoxError::InvalidRange { start, end } => {
            anyhow!("Invalid line range {}:{}", start + 1, end + 1)
        }
        other => other.into(),
    }
}

fn whole(document: &TextDocument) -> RangeInclusive<usize> {
    0..=document.line_count().saturating_sub(1)
}

pub fn handle_render(
    input: &str,
    lines: Option<RangeInclusive<usize>>,
    style: &BoxStyle,
) -> Result<String> {
    let document = TextDocument::new(input);
    let range = lines.unwrap_or_else(|| whole(&document));
    document.render_lines(range, style).map_err(one_based)
}

pub fn handle_strip(input: &str, lines: RangeInclusive<usize>, style: &BoxStyle) -> Result<String> {
    TextDocument::new(input)
        .strip_box(lines, style)
        .map_err(one_based)
}

pub fn handle_refresh(
    input: &str,
    lines: RangeInclusive<usize>,
    style: &BoxStyle,
) -> Result<String> {
    TextDocument::new(input)
        .refresh_box(lines, style)
        .map_err(one_based)
}

pub fn handle_find(input: &str, lines: RangeInclusive<usize>, style: &BoxStyle) -> Result<String> {
    let mut selection = TextDocument::new(input)
        .find_box(lines, style)
        .map_err(one_based)?;
    selection.range = (selection.range.0 + 1, selection.range.1 + 1);
    let mut json = serde_json::to_string_pretty(&selection)?;
    json.push('\n');
    Ok(json)
}

pub fn handle_list_styles(catalog: &StyleCatalog) -> String {
    catalog
        .style_names()
        .into_iter()
        .map(|name| name + "\n")
        .collect()
}
