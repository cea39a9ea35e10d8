//! Text-level query edits built on the label splicer.
//!
//! These act on raw query text rather than on the visual model, so they work for queries
//! the model cannot express.

mod escape;
mod rules;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use escape::{prometheus_regular_escape, prometheus_special_regex_escape};
pub use rules::{Rule, RuleGroup, expand_recording_rules, extract_rule_mapping};

use crate::Result;
use crate::visual::add_label_filter;

/// An edit requested from outside the query editor, e.g. a click on a label in a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryModification {
    AddFilter { key: String, value: String },
    AddFilterOut { key: String, value: String },
    AddRate,
    AddSum,
    AddHistogramQuantile,
    ExpandRules(IndexMap<String, String>),
}

/// Applies one modification to `text`.
///
/// Filter modifications with an empty key or value leave the text unchanged.
pub fn modify_query(text: &str, modification: &QueryModification) -> Result<String> {
    debug!(?modification, "modifying query");
    let expr = match modification {
        QueryModification::AddFilter { key, value } => add_filter(text, key, value, "=")?,
        QueryModification::AddFilterOut { key, value } => add_filter(text, key, value, "!=")?,
        QueryModification::AddRate => format!("rate({text}[$__rate_interval])"),
        QueryModification::AddSum => format!("sum({}) by ($1)", text.trim()),
        QueryModification::AddHistogramQuantile => {
            format!("histogram_quantile(0.95, sum(rate({text}[$__rate_interval])) by (le))")
        }
        QueryModification::ExpandRules(mapping) => expand_recording_rules(text, mapping)?,
    };
    Ok(expr)
}

fn add_filter(text: &str, key: &str, value: &str, op: &str) -> Result<String> {
    if key.is_empty() || value.is_empty() {
        return Ok(text.to_string());
    }
    add_label_filter(text, key, value, op)
}

/// A dashboard-wide filter applied to every query of a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHocFilter {
    pub key: String,
    pub operator: String,
    pub value: String,
}

impl AdHocFilter {
    pub fn new(key: impl Into<String>, operator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    fn is_regex(&self) -> bool {
        matches!(self.operator.as_str(), "=~" | "!~")
    }
}

/// Adds every filter to every selector, in order. Regex values are escaped first.
pub fn apply_ad_hoc_filters(text: &str, filters: &[AdHocFilter]) -> Result<String> {
    filters.iter().try_fold(text.to_string(), |acc, filter| {
        let value = if filter.is_regex() {
            prometheus_regular_escape(&filter.value)
        } else {
            filter.value.clone()
        };
        add_label_filter(&acc, &filter.key, value, &filter.operator)
    })
}
