//! The visual query model edited field by field in a query builder.

use serde::{Deserialize, Serialize};

/// One query: a selector plus the operations applied to it, outermost last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualQuery {
    pub metric: String,
    pub labels: Vec<LabelFilter>,
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binary_queries: Vec<BinaryQuery>,
}

impl VisualQuery {
    /// The sentinel produced by an empty input.
    pub fn is_empty(&self) -> bool {
        self.metric.is_empty() && self.labels.is_empty() && self.operations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFilter {
    pub label: String,
    pub op: String,
    pub value: String,
}

impl LabelFilter {
    pub fn new(label: impl Into<String>, op: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            op: op.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub params: Vec<OperationParam>,
}

impl Operation {
    pub fn new(id: impl Into<String>, params: Vec<OperationParam>) -> Self {
        Self {
            id: id.into(),
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationParam {
    Number(f64),
    String(String),
    Bool(bool),
}

impl From<f64> for OperationParam {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for OperationParam {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OperationParam {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for OperationParam {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorMatchType {
    On,
    Ignoring,
}

impl VectorMatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Ignoring => "ignoring",
        }
    }
}

/// Right-hand operand of a vector binary operation chained onto the parent query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryQuery {
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_matches_type: Option<VectorMatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_matches: Option<String>,
    pub query: VisualQuery,
}

/// A construct that could not be modelled. Offsets index the caller's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingError {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
}

impl ParsingError {
    /// An error not tied to a source span.
    pub fn spanless(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from: None,
            to: None,
            parent_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub query: VisualQuery,
    pub errors: Vec<ParsingError>,
}

/// Value handed to the label splicer.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelValue {
    Text(String),
    Number(f64),
}

impl LabelValue {
    pub fn to_label_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => format_number(*n),
        }
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for LabelValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for LabelValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// PromQL spelling of a number: `+Inf`, `-Inf`, `NaN`, integers without a fraction.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}
