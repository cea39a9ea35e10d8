//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("promviz")
        .about("Translate PromQL to and from a visual query builder model")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(parse_command())
        .subcommand(check_command())
        .subcommand(render_command())
        .subcommand(add_label_command())
        .subcommand(modify_command())
        .subcommand(cst_command())
}

fn with_query_args(cmd: Command) -> Command {
    cmd.arg(query_path_arg()).arg(query_text_arg())
}

/// Print the visual query of a PromQL query as JSON.
pub fn parse_command() -> Command {
    let cmd = Command::new("parse")
        .about("Print the visual query of a PromQL query as JSON")
        .override_usage(
            "\
  promviz parse <FILE>
  promviz parse -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  promviz parse -q 'sum(rate(x[5m]))'       # pretty JSON
  promviz parse query.promql --compact      # one line
  echo 'up' | promviz parse -              # from stdin"#,
        )
        .arg(compact_arg())
        .arg(fuel_arg());
    with_query_args(cmd)
}

/// Report what cannot be modelled.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report syntax errors and constructs the visual model cannot hold")
        .override_usage(
            "\
  promviz check <FILE>
  promviz check -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  promviz check -q '(up)'                   # parentheses are not modelled
  promviz check query.promql --color never"#,
        )
        .arg(color_arg());
    with_query_args(cmd)
}

/// Render visual query JSON back to PromQL.
pub fn render_command() -> Command {
    Command::new("render")
        .about("Render visual query JSON back to PromQL")
        .override_usage(
            "\
  promviz render <FILE>
  promviz render < query.json",
        )
        .after_help(
            r#"EXAMPLES:
  promviz parse -q 'rate(x[5m])' | promviz render"#,
        )
        .arg(model_path_arg())
}

/// Add a label filter to every selector.
pub fn add_label_command() -> Command {
    let cmd = Command::new("add-label")
        .about("Add a label filter to every selector, leaving the rest of the text as is")
        .override_usage(
            "\
  promviz add-label <FILE> --label <NAME> --value <VALUE> [--op <OP>]
  promviz add-label -q <TEXT> --label <NAME> --value <VALUE> [--op <OP>]",
        )
        .after_help(
            r#"EXAMPLES:
  promviz add-label -q 'a / b' --label job --value api
  promviz add-label -q 'up' --label pod --value 'web-.*' --op '=~'"#,
        )
        .arg(label_arg())
        .arg(value_arg().required(true))
        .arg(op_arg());
    with_query_args(cmd)
}

/// Apply a query modification.
pub fn modify_command() -> Command {
    let cmd = Command::new("modify")
        .about("Apply a query modification")
        .override_usage(
            "\
  promviz modify <FILE> --action <ACTION> [--key <NAME>] [--value <VALUE>] [--rules <FILE>]
  promviz modify -q <TEXT> --action <ACTION> ...",
        )
        .after_help(
            r#"EXAMPLES:
  promviz modify -q 'up' --action add-rate
  promviz modify -q 'up' --action add-filter-out --key job --value api
  promviz modify -q 'sum(job:up:sum)' --action expand-rules --rules rules.json"#,
        )
        .arg(action_arg())
        .arg(key_arg())
        .arg(value_arg())
        .arg(rules_arg());
    with_query_args(cmd)
}

/// Dump the concrete syntax tree.
pub fn cst_command() -> Command {
    let cmd = Command::new("cst")
        .about("Show the concrete syntax tree of a query")
        .override_usage(
            "\
  promviz cst <FILE>
  promviz cst -q <TEXT> [--raw] [--spans]",
        )
        .arg(raw_arg())
        .arg(spans_arg());
    with_query_args(cmd)
}
