//! Dashboard template variables.
//!
//! `$name`, `[[name]]`, `[[name:fmt]]`, `${name}`, `${name.path}` and `${name:fmt}` are not
//! PromQL. Before parsing they are rewritten into identifiers the grammar accepts,
//! `__V_<kind>__<name>__V__` with an optional `__F__<fmt>__F__` suffix, and rewritten
//! back wherever text is read out of the tree. The `.path` of `${name.path}` is dropped.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\w+)|\[\[(\w+?)(?::(\w+))?\]\]|\$\{(\w+)(?:\.([^:^\}]+))?(?::([^\}]+))?\}")
        .expect("variable pattern is valid")
});

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__V_(\d)__(.+?)__V__(?:__F__(\w+)__F__)?").expect("placeholder pattern is valid")
});

/// Marker present in every placeholder.
pub const PLACEHOLDER_MARKER: &str = "__V_";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Replacement {
    substituted: Range<usize>,
    original: Range<usize>,
}

/// Text with variables replaced, plus the offset map back to the original.
#[derive(Debug, Clone)]
pub struct Substituted {
    text: String,
    replacements: Vec<Replacement>,
}

impl Substituted {
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut replacements = Vec::new();
        let mut last = 0;

        for caps in VARIABLE.captures_iter(original) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            text.push_str(&original[last..whole.start()]);
            let start = text.len();
            text.push_str(&placeholder(&caps));
            replacements.push(Replacement {
                substituted: start..text.len(),
                original: whole.range(),
            });
            last = whole.end();
        }
        text.push_str(&original[last..]);

        Self { text, replacements }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_variables(&self) -> bool {
        !self.replacements.is_empty()
    }

    /// Maps an offset in the substituted text to the caller's text.
    /// Offsets inside a placeholder map to the start of the variable.
    pub fn to_original(&self, offset: usize) -> usize {
        let (mut substituted, mut original) = (0, 0);
        for r in &self.replacements {
            if offset < r.substituted.start {
                break;
            }
            if offset < r.substituted.end {
                return r.original.start;
            }
            (substituted, original) = (r.substituted.end, r.original.end);
        }
        original + (offset - substituted)
    }
}

fn placeholder(caps: &Captures<'_>) -> String {
    let group = |i: usize| caps.get(i).map(|m| m.as_str());

    let (kind, name, format) = if let Some(name) = group(2) {
        ('1', name, group(3))
    } else if let Some(name) = group(4) {
        ('2', name, group(6))
    } else {
        ('0', group(1).unwrap_or_default(), None)
    };

    let mut out = format!("__V_{kind}__{name}__V__");
    if let Some(format) = format {
        out.push_str(&format!("__F__{format}__F__"));
    }
    out
}

/// Rewrites every template variable into its placeholder.
pub fn replace_variables(text: &str) -> String {
    Substituted::new(text).text
}

/// Restores the template variables hidden behind placeholders.
pub fn return_variables(text: &str) -> String {
    if !text.contains(PLACEHOLDER_MARKER) {
        return text.to_string();
    }

    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(2).map_or("", |m| m.as_str());
            let format = caps.get(3).map(|m| m.as_str());
            match (caps.get(1).map(|m| m.as_str()), format) {
                (Some("1"), Some(f)) => format!("[[{name}:{f}]]"),
                (Some("1"), None) => format!("[[{name}]]"),
                (Some("2"), Some(f)) => format!("${{{name}:{f}}}"),
                (Some("2"), None) => format!("${{{name}}}"),
                _ => format!("${name}"),
            }
        })
        .into_owned()
}
