use std::path::PathBuf;

use promviz_lib::visual::variables::Substituted;
use promviz_lib::{ParsingError, parse, parser};

use super::query_loader::load_query;
use super::{CliError, Result};

pub struct CheckArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub color: bool,
}

/// Silent on success; problems go to stderr.
pub fn run(args: CheckArgs) -> Result<()> {
    let input = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;
    let report = report(&input.name, &input.text, args.color)?;
    if report.problems == 0 {
        return Ok(());
    }
    eprint!("{}", report.text);
    Err(CliError::Invalid(report.problems))
}

pub(crate) struct Report {
    pub problems: usize,
    pub text: String,
}

pub(crate) fn report(name: &str, text: &str, color: bool) -> Result<Report> {
    let parsed = parse(text);
    let mut out = String::new();

    // Template variables are not PromQL; syntax diagnostics would flag every one of them.
    if !parsed.errors.is_empty() && !Substituted::new(text).has_variables() {
        let (_, diagnostics) = parser::parse(text)?;
        if !diagnostics.is_empty() {
            out.push_str(&diagnostics.printer(text).path(name).colored(color).render());
        }
    }

    for error in &parsed.errors {
        out.push_str(&describe(name, error));
        out.push('\n');
    }

    Ok(Report {
        problems: parsed.errors.len(),
        text: out,
    })
}

fn describe(name: &str, error: &ParsingError) -> String {
    let (Some(from), Some(to)) = (error.from, error.to) else {
        return format!("{name}: {}", error.text);
    };
    match &error.parent_type {
        Some(parent) => format!("{name}:{from}..{to}: not modelled: `{}` in {parent}", error.text),
        None => format!("{name}:{from}..{to}: {}", error.text),
    }
}
