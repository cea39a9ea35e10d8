use super::{LabelFilter, add_label_filter, selector_spans};
use crate::Error;

#[test]
fn adds_to_a_bare_metric() {
    let out = add_label_filter("up", "job", "api", "=").unwrap();
    assert_eq!(out, r#"up{job="api"}"#);
}

#[test]
fn appends_after_existing_labels() {
    let out = add_label_filter(
        r#"go_goroutines{cluster="us-cluster"}"#,
        "pod",
        "pod-123",
        "=",
    )
    .unwrap();
    assert_eq!(out, r#"go_goroutines{cluster="us-cluster", pod="pod-123"}"#);
}

#[test]
fn every_selector_gets_the_filter() {
    let out = add_label_filter(
        "sum(rate(a[5m])) / on(job) sum(rate(b[5m]))",
        "env",
        "prod",
        "!=",
    )
    .unwrap();
    assert_eq!(
        out,
        r#"sum(rate(a{env!="prod"}[5m])) / on(job) sum(rate(b{env!="prod"}[5m]))"#
    );
}

#[test]
fn existing_filter_is_not_duplicated() {
    let once = add_label_filter("up", "job", "api", "=").unwrap();
    let twice = add_label_filter(&once, "job", "api", "=").unwrap();
    assert_eq!(twice, once);
}

#[test]
fn other_bytes_are_left_alone() {
    let text = "max_over_time(up[1h])   # peak\n  * 100";
    let out = add_label_filter(text, "job", "api", "=").unwrap();
    assert_eq!(out, "max_over_time(up{job=\"api\"}[1h])   # peak\n  * 100");
}

#[test]
fn broken_queries_are_spliced_best_effort() {
    let out = add_label_filter(r#"asdf-metric{bar="})"#, "x", "y", "=").unwrap();
    assert_eq!(out, r#"asdf{x="y"}-metric{bar="", x="y"}"})"#);
}

#[test]
fn template_variables_are_kept() {
    let out = add_label_filter("rate(x[$__rate_interval])", "job", "$job", "=~").unwrap();
    assert_eq!(out, r#"rate(x{job=~"$job"}[$__rate_interval])"#);
}

#[test]
fn numbers_use_promql_spelling() {
    let out = add_label_filter("up", "threshold", f64::INFINITY, "=").unwrap();
    assert_eq!(out, r#"up{threshold="+Inf"}"#);

    let out = add_label_filter("up", "le", 0.5, "=").unwrap();
    assert_eq!(out, r#"up{le="0.5"}"#);

    let out = add_label_filter("up", "code", 500_i64, "=").unwrap();
    assert_eq!(out, r#"up{code="500"}"#);
}

#[test]
fn empty_label_is_rejected() {
    let err = add_label_filter("up", "", "api", "=").unwrap_err();
    assert_eq!(err, Error::MissingLabel);
    assert_eq!(err.to_string(), "need label to add to query");
}

#[test]
fn text_without_selectors_is_unchanged() {
    assert_eq!(add_label_filter("1 + 2", "job", "api", "=").unwrap(), "1 + 2");
    assert_eq!(add_label_filter("", "job", "api", "=").unwrap(), "");
}

#[test]
fn spans_index_the_raw_text() {
    let text = r#"a + on(job) b{c="d"}"#;
    let spans = selector_spans(text);
    let found: Vec<_> = spans.iter().map(|s| &text[s.from..s.to]).collect();
    assert_eq!(found, ["a", r#"b{c="d"}"#]);
    assert_eq!(spans[1].query.metric, "b");
    assert_eq!(spans[1].query.labels, vec![LabelFilter::new("c", "=", "d")]);
}
