//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query file, `-` for stdin (positional).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("File holding the query, `-` for stdin")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Visual query JSON file, stdin when absent (positional).
pub fn model_path_arg() -> Arg {
    Arg::new("model_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Visual query JSON, read from stdin when absent or `-`")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Parser execution fuel limit")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Include trivia tokens (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include whitespace and comments")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Label name (--label).
pub fn label_arg() -> Arg {
    Arg::new("label")
        .long("label")
        .value_name("NAME")
        .required(true)
        .help("Label to add")
}

/// Label value (--value).
pub fn value_arg() -> Arg {
    Arg::new("value")
        .long("value")
        .value_name("VALUE")
        .help("Label value")
}

/// Matcher operator (--op).
pub fn op_arg() -> Arg {
    Arg::new("op")
        .long("op")
        .value_name("OP")
        .default_value("=")
        .value_parser(["=", "!=", "=~", "!~"])
        .help("Matcher operator")
}

/// Modification to apply (--action).
pub fn action_arg() -> Arg {
    Arg::new("action")
        .long("action")
        .value_name("ACTION")
        .required(true)
        .value_parser([
            "add-filter",
            "add-filter-out",
            "add-rate",
            "add-sum",
            "add-histogram-quantile",
            "expand-rules",
        ])
        .help("Modification to apply")
}

/// Filter label name (--key).
pub fn key_arg() -> Arg {
    Arg::new("key")
        .long("key")
        .value_name("NAME")
        .help("Label name for add-filter and add-filter-out")
}

/// Recording rules file (--rules).
pub fn rules_arg() -> Arg {
    Arg::new("rules")
        .long("rules")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Rules API response, rule groups, or a name to expression map (JSON)")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log more (-v info, -vv debug); PROMVIZ_LOG sets a filter otherwise")
}
