//! Adds a label filter to every selector of a raw query, leaving all other bytes alone.

use tracing::{debug, warn};

use super::model::{LabelFilter, LabelValue, VisualQuery};
use super::render::render_labels;
use super::transform::parse;
use crate::{Error, Result};

/// A selector found in raw text, with its own visual query.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorSpan {
    pub from: usize,
    pub to: usize,
    pub query: VisualQuery,
}

/// Every selector of `text` in document order. Selectors nested inside another selector's
/// span are not reported separately.
pub fn selector_spans(text: &str) -> Vec<SelectorSpan> {
    let parse = match crate::parser::parse(text) {
        Ok((parse, _)) => parse,
        Err(err) => {
            warn!(%err, "cannot locate selectors");
            return Vec::new();
        }
    };

    parse
        .root()
        .selectors()
        .into_iter()
        .map(|selector| {
            let range = selector.as_cst().text_range();
            let (from, to) = (range.start().into(), range.end().into());
            SelectorSpan {
                from,
                to,
                query: parse_selector(&text[from..to]),
            }
        })
        .collect()
}

fn parse_selector(text: &str) -> VisualQuery {
    parse(text).query
}

/// Adds `label <op> value` to every selector in `text`.
///
/// Selectors that already filter on the same label and value are left as they are.
/// Fails only when `label` is empty.
pub fn add_label_filter(
    text: &str,
    label: &str,
    value: impl Into<LabelValue>,
    op: &str,
) -> Result<String> {
    if label.is_empty() {
        return Err(Error::MissingLabel);
    }

    let filter = LabelFilter::new(label, op, value.into().to_label_string());
    let spans = selector_spans(text);
    if spans.is_empty() {
        debug!("no selector to add a label to");
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len() + spans.len() * 16);
    let mut prev = 0;
    for mut span in spans {
        out.push_str(&text[prev..span.from]);
        if !label_exists(&span.query.labels, &filter) {
            span.query.labels.push(filter.clone());
        }
        out.push_str(&span.query.metric);
        out.push_str(&render_labels(&span.query.labels));
        prev = span.to;
    }
    out.push_str(&text[prev..]);

    Ok(out)
}

fn label_exists(labels: &[LabelFilter], filter: &LabelFilter) -> bool {
    labels
        .iter()
        .any(|l| l.label == filter.label && l.value == filter.value)
}
