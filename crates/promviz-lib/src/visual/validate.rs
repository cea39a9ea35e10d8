//! Policies for flagging unsupported shapes and dropping spurious errors.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::model::ParsingError;
use super::variables::PLACEHOLDER_MARKER;
use crate::parser::{SyntaxKind, SyntaxNode};

pub const AMBIGUOUS_QUERY: &str = "Query parsing is ambiguous.";

/// Dashboard macros resolved at query time, longest names first.
static MACROS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$__(interval_ms|interval|rate_interval|range_ms|range_s|range)\b")
        .expect("macro pattern is valid")
});

/// Replaces every interval or range macro with a literal of the same shape.
pub fn substitute_macros(text: &str) -> String {
    MACROS
        .replace_all(text, |caps: &Captures<'_>| {
            match caps.get(1).map_or("", |m| m.as_str()) {
                "interval_ms" | "range_ms" => "1000",
                "range_s" => "1",
                _ => "1s",
            }
        })
        .into_owned()
}

pub fn has_macros(text: &str) -> bool {
    MACROS.is_match(text)
}

/// An empty query carries no errors.
pub fn suppress_for_empty(is_empty: bool, errors: &mut Vec<ParsingError>) -> bool {
    if is_empty && !errors.is_empty() {
        errors.clear();
        return true;
    }
    false
}

/// A selector followed by `[$__interval]`-style brackets: the grammar rejects the
/// placeholder as a range, but it resolves to a duration at query time.
pub fn is_interval_variable_error(node: &SyntaxNode) -> bool {
    let follows_selector = node
        .prev_sibling()
        .is_some_and(|prev| prev.kind() == SyntaxKind::VectorSelector);
    if !follows_selector {
        return false;
    }
    let text = node.text().to_string();
    text.starts_with('[') && text.contains(PLACEHOLDER_MARKER)
}

/// A binary expression written directly as a function argument.
pub fn is_ambiguous_argument(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::BinaryExpr
        && node
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::FunctionCallBody)
}
