//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::add_label::AddLabelArgs;
use crate::commands::check::CheckArgs;
use crate::commands::cst::CstArgs;
use crate::commands::modify::{ModifyAction, ModifyArgs};
use crate::commands::parse::ParseArgs;
use crate::commands::render::RenderArgs;

pub struct ParseParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub compact: bool,
    pub fuel: Option<u32>,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            compact: m.get_flag("compact"),
            fuel: m.get_one::<u32>("fuel").copied(),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            compact: p.compact,
            fuel: p.fuel,
        }
    }
}

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RenderParams {
    pub model_path: Option<PathBuf>,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            model_path: m.get_one::<PathBuf>("model_path").cloned(),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            model_path: p.model_path,
        }
    }
}

pub struct AddLabelParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub label: String,
    pub value: String,
    pub op: String,
}

impl AddLabelParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            label: m.get_one::<String>("label").cloned().unwrap_or_default(),
            value: m.get_one::<String>("value").cloned().unwrap_or_default(),
            op: m
                .get_one::<String>("op")
                .cloned()
                .unwrap_or_else(|| "=".to_string()),
        }
    }
}

impl From<AddLabelParams> for AddLabelArgs {
    fn from(p: AddLabelParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            label: p.label,
            value: p.value,
            op: p.op,
        }
    }
}

pub struct ModifyParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub action: ModifyAction,
    pub key: Option<String>,
    pub value: Option<String>,
    pub rules: Option<PathBuf>,
}

impl ModifyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            action: parse_action(m),
            key: m.get_one::<String>("key").cloned(),
            value: m.get_one::<String>("value").cloned(),
            rules: m.get_one::<PathBuf>("rules").cloned(),
        }
    }
}

impl From<ModifyParams> for ModifyArgs {
    fn from(p: ModifyParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            action: p.action,
            key: p.key,
            value: p.value,
            rules: p.rules,
        }
    }
}

pub struct CstParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

impl CstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<CstParams> for CstArgs {
    fn from(p: CstParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// `--action` is required and restricted by its value parser.
fn parse_action(m: &ArgMatches) -> ModifyAction {
    match m.get_one::<String>("action").map(|s| s.as_str()) {
        Some("add-filter-out") => ModifyAction::AddFilterOut,
        Some("add-rate") => ModifyAction::AddRate,
        Some("add-sum") => ModifyAction::AddSum,
        Some("add-histogram-quantile") => ModifyAction::AddHistogramQuantile,
        Some("expand-rules") => ModifyAction::ExpandRules,
        _ => ModifyAction::AddFilter,
    }
}
