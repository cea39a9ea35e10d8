use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use promviz_lib::modify::RuleGroup;
use promviz_lib::{QueryModification, extract_rule_mapping, modify_query};
use serde::Deserialize;
use tracing::info;

use super::query_loader::{load_json, load_query};
use super::{CliError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifyAction {
    AddFilter,
    AddFilterOut,
    AddRate,
    AddSum,
    AddHistogramQuantile,
    ExpandRules,
}

impl ModifyAction {
    fn name(self) -> &'static str {
        match self {
            Self::AddFilter => "add-filter",
            Self::AddFilterOut => "add-filter-out",
            Self::AddRate => "add-rate",
            Self::AddSum => "add-sum",
            Self::AddHistogramQuantile => "add-histogram-quantile",
            Self::ExpandRules => "expand-rules",
        }
    }
}

pub struct ModifyArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub action: ModifyAction,
    pub key: Option<String>,
    pub value: Option<String>,
    pub rules: Option<PathBuf>,
}

pub fn run(args: ModifyArgs) -> Result<()> {
    let input = load_query(args.query_path.as_deref(), args.query_text.as_deref())?;
    let modification = modification(&args, |path| load_json(Some(path)))?;
    println!("{}", modify_query(&input.text, &modification)?);
    Ok(())
}

/// Builds the modification, loading rules through `load_rules`.
pub(crate) fn modification(
    args: &ModifyArgs,
    load_rules: impl FnOnce(&Path) -> Result<RulesFile>,
) -> Result<QueryModification> {
    let action = args.action;
    let require = |value: &Option<String>, option| {
        value.clone().ok_or(CliError::MissingOption {
            action: action.name(),
            option,
        })
    };

    let modification = match action {
        ModifyAction::AddFilter => QueryModification::AddFilter {
            key: require(&args.key, "key")?,
            value: require(&args.value, "value")?,
        },
        ModifyAction::AddFilterOut => QueryModification::AddFilterOut {
            key: require(&args.key, "key")?,
            value: require(&args.value, "value")?,
        },
        ModifyAction::AddRate => QueryModification::AddRate,
        ModifyAction::AddSum => QueryModification::AddSum,
        ModifyAction::AddHistogramQuantile => QueryModification::AddHistogramQuantile,
        ModifyAction::ExpandRules => {
            let path = args.rules.as_deref().ok_or(CliError::MissingOption {
                action: action.name(),
                option: "rules",
            })?;
            let mapping = load_rules(path)?.into_mapping();
            info!(rules = mapping.len(), "loaded recording rules");
            QueryModification::ExpandRules(mapping)
        }
    };
    Ok(modification)
}

/// Accepted shapes of the `--rules` file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RulesFile {
    Mapping(IndexMap<String, String>),
    Groups(Vec<RuleGroup>),
    Response { data: RulesData },
}

#[derive(Debug, Deserialize)]
pub(crate) struct RulesData {
    groups: Vec<RuleGroup>,
}

impl RulesFile {
    pub(crate) fn into_mapping(self) -> IndexMap<String, String> {
        match self {
            Self::Mapping(mapping) => mapping,
            Self::Groups(groups) => extract_rule_mapping(&groups),
            Self::Response { data } => extract_rule_mapping(&data.groups),
        }
    }
}
