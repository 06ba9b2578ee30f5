// Shared with build.rs, which generates shell completions from it, so this file
// may only depend on clap.

use clap::{Arg, ArgAction, Command, ValueHint};

fn path_arg() -> Arg {
    Arg::new("path")
        .help("File to read; standard input when absent or '-'")
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn lines_arg(required: bool) -> Arg {
    Arg::new("lines")
        .long("lines")
        .short('l')
        .value_name("START:END")
        .help("Line range to work on, 1-based and inclusive (e.g. 3:7, or 5 for one line)")
        .required(required)
}

/// The `cbox` command line
pub fn build_cli() -> Command {
    Command::new("cbox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Draw, find and strip comment boxes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("style")
                .long("style")
                .short('s')
                .help("Style name from the configuration")
                .default_value("default")
                .global(true),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .help("Language id selecting token presets (guessed from the file extension otherwise)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults; repeat to add more")
                .action(ArgAction::Append)
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .help("Log output format on stderr")
                .value_parser(["text", "json"])
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Draw a box around the input or a range of its lines")
                .arg(path_arg())
                .arg(lines_arg(false)),
        )
        .subcommand(
            Command::new("strip")
                .about("Replace the box around a line range by the text inside it")
                .arg(path_arg())
                .arg(lines_arg(true)),
        )
        .subcommand(
            Command::new("refresh")
                .about("Redraw the box around a line range with the current style")
                .arg(path_arg())
                .arg(lines_arg(true)),
        )
        .subcommand(
            Command::new("find")
                .about("Print the box around a line range as JSON")
                .arg(path_arg())
                .arg(lines_arg(true)),
        )
        .subcommand(Command::new("list-styles").about("List the available style names"))
}
