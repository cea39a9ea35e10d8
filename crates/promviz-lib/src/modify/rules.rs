//! Recording rules: collecting them from the rules API and inlining them into queries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::Result;
use crate::visual::{add_label_filter, selector_spans};

/// One group of the rules API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Rule {
    pub fn is_recording(&self) -> bool {
        self.kind == "recording"
    }
}

/// Rule name to expression for every recording rule. Later rules replace earlier ones.
pub fn extract_rule_mapping(groups: &[RuleGroup]) -> IndexMap<String, String> {
    let mut mapping = IndexMap::new();
    for rule in groups
        .iter()
        .flat_map(|g| &g.rules)
        .filter(|r| r.is_recording())
    {
        mapping.insert(rule.name.clone(), rule.query.clone());
    }
    mapping
}

/// Replaces every selector naming a recording rule with the rule's expression.
///
/// Label matchers of the replaced selector are added to each selector of the expression.
pub fn expand_recording_rules(text: &str, mapping: &IndexMap<String, String>) -> Result<String> {
    if mapping.is_empty() {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut prev = 0;
    let mut expanded = 0;
    for span in selector_spans(text) {
        let Some(expr) = mapping.get(&span.query.metric) else {
            continue;
        };
        trace!(rule = %span.query.metric, "expanding recording rule");

        let mut expr = expr.clone();
        for label in span.query.labels.iter().filter(|l| !l.label.is_empty()) {
            expr = add_label_filter(&expr, &label.label, label.value.as_str(), &label.op)?;
        }
        out.push_str(&text[prev..span.from]);
        out.push_str(&expr);
        prev = span.to;
        expanded += 1;
    }
    out.push_str(&text[prev..]);

    debug!(expanded, "recording rules expanded");
    Ok(out)
}
