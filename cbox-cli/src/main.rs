//! Command-line interface for cbox
//!
//! Usage:
//!   cbox render [PATH] [--lines START:END]     - Draw a box around the input or some lines
//!   cbox strip [PATH] --lines START:END        - Replace a box by the text inside it
//!   cbox refresh [PATH] --lines START:END      - Redraw a box with the current style
//!   cbox find [PATH] --lines START:END         - Print a box's rows as JSON
//!   cbox list-styles                           - List style names
//!
//! Global options: --style NAME, --language ID, --config FILE (repeatable),
//! --log-format text|json.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_one::<String>("log-format").map(String::as_str));

    match run(&matches) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(error) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                eprintln!("Error: {}", error);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<String> {
    let config_files: Vec<PathBuf> = matches
        .get_many::<String>("config")
        .map(|files| files.map(PathBuf::from).collect())
        .unwrap_or_default();
    let catalog = commands::load_catalog(&config_files)?;

    let (name, sub) = matches
        .subcommand()
        .context("A subcommand is required")?;

    if name == "list-styles" {
        return Ok(commands::handle_list_styles(&catalog));
    }

    let path = sub.get_one::<String>("path").filter(|path| *path != "-");
    let input = read_input(path.map(Path::new))?;

    let language = matches
        .get_one::<String>("language")
        .map(String::as_str)
        .or_else(|| path.and_then(|path| commands::language_for_path(Path::new(path))));
    let style_name = matches
        .get_one::<String>("style")
        .map(String::as_str)
        .unwrap_or(cbox_config::DEFAULT_STYLE);
    let style = commands::resolve_style(&catalog, style_name, language)?;

    let lines = sub
        .get_one::<String>("lines")
        .map(|spec| commands::parse_line_range(spec))
        .transpose()?;

    match (name, lines) {
        ("render", lines) => commands::handle_render(&input, lines, &style),
        ("strip", Some(lines)) => commands::handle_strip(&input, lines, &style),
        ("refresh", Some(lines)) => commands::handle_refresh(&input, lines, &style),
        ("find", Some(lines)) => commands::handle_find(&input, lines, &style),
        (name, None) => anyhow::bail!("'{}' needs --lines", name),
        (name, _) => anyhow::bail!("Unknown command '{}'", name),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read standard input")?;
            Ok(input)
        }
    }
}
