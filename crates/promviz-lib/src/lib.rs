//! Promviz: translation between PromQL text and a visual query builder model.
//!
//! # Example
//!
//! ```
//! use promviz_lib::{add_label_filter, parse, render};
//!
//! let parsed = parse(r#"sum by(job) (rate(http_requests_total{code="500"}[5m]))"#);
//! assert!(parsed.errors.is_empty());
//! assert_eq!(parsed.query.metric, "http_requests_total");
//!
//! let text = render(&parsed.query);
//! assert_eq!(text, r#"sum by(job) (rate(http_requests_total{code="500"}[5m]))"#);
//!
//! let spliced = add_label_filter("up + down", "job", "api", "=").expect("label given");
//! assert_eq!(spliced, r#"up{job="api"} + down{job="api"}"#);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod modify;
pub mod parser;
pub mod visual;

/// Result type for passes that produce both output and diagnostics.
///
/// Fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter};
pub use modify::{
    AdHocFilter, QueryModification, apply_ad_hoc_filters, expand_recording_rules,
    extract_rule_mapping, modify_query,
};
pub use visual::{
    BinaryQuery, LabelFilter, LabelValue, Operation, OperationParam, ParsedQuery, ParsingError,
    VectorMatchType, VisualParser, VisualQuery, add_label_filter, parse, render,
};

/// Errors surfaced to callers of the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// The splicer was asked to add a filter without a label name.
    #[error("need label to add to query")]
    MissingLabel,
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;
