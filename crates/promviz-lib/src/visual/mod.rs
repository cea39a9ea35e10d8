//! Visual query model: parse PromQL into it, render it back, splice labels into raw text.
//!
//! The model is what a query builder edits: a metric, its label filters, a list of
//! operations applied innermost first, and vector binary operations chained on the right.
//! Queries the model cannot express still produce a best-effort model plus a list of
//! [`ParsingError`]s pointing at the unsupported parts.

pub mod operations;
pub mod variables;

mod model;
mod render;
mod splice;
mod transform;
mod validate;

#[cfg(test)]
mod render_tests;
#[cfg(test)]
mod splice_tests;
#[cfg(test)]
mod transform_tests;

pub use model::{
    BinaryQuery, LabelFilter, LabelValue, Operation, OperationParam, ParsedQuery, ParsingError,
    VectorMatchType, VisualQuery, format_number,
};
pub use render::{render, render_labels};
pub use splice::{SelectorSpan, add_label_filter, selector_spans};
pub use transform::{TransformError, VisualParser, parse};
pub use validate::AMBIGUOUS_QUERY;
