use serde_json::json;

use super::validate::{has_macros, substitute_macros};
use super::{
    AMBIGUOUS_QUERY, LabelFilter, Operation, OperationParam, ParsingError, VectorMatchType,
    VisualParser, VisualQuery, parse, render,
};

#[track_caller]
fn parse_clean(text: &str) -> VisualQuery {
    let parsed = parse(text);
    assert!(
        parsed.errors.is_empty(),
        "unexpected errors for {text}: {:?}",
        parsed.errors
    );
    parsed.query
}

fn op_ids(query: &VisualQuery) -> Vec<&str> {
    query.operations.iter().map(|op| op.id.as_str()).collect()
}

#[test]
fn empty_input() {
    let parsed = parse("");
    assert!(parsed.query.is_empty());
    assert!(parsed.errors.is_empty());

    let parsed = parse("   ");
    assert!(parsed.query.is_empty());
    assert!(parsed.errors.is_empty());
}

#[test]
fn selector_with_labels() {
    let query = parse_clean(r#"http_requests_total{job="api", code=~"5.."}"#);
    assert_eq!(query.metric, "http_requests_total");
    assert_eq!(
        query.labels,
        vec![
            LabelFilter::new("job", "=", "api"),
            LabelFilter::new("code", "=~", "5.."),
        ]
    );
    assert!(query.operations.is_empty());
}

#[test]
fn operations_are_innermost_first() {
    let query = parse_clean(r#"histogram_quantile(0.95, sum by(le) (rate(x_bucket[5m])))"#);
    assert_eq!(query.metric, "x_bucket");
    assert_eq!(
        query.operations,
        vec![
            Operation::new("rate", vec!["5m".into()]),
            Operation::new("__sum_by", vec!["le".into()]),
            Operation::new("histogram_quantile", vec![0.95.into()]),
        ]
    );
}

#[test]
fn trailing_grouping_clause() {
    let query = parse_clean("sum(rate(x[5m])) without (pod, instance)");
    assert_eq!(op_ids(&query), ["rate", "__sum_without"]);
    assert_eq!(
        query.operations[1].params,
        vec![
            OperationParam::String("pod".into()),
            OperationParam::String("instance".into()),
        ]
    );
}

#[test]
fn aggregation_params_precede_labels() {
    let query = parse_clean("topk by(job) (5, x)");
    assert_eq!(
        query.operations,
        vec![Operation::new("__topk_by", vec![5.0.into(), "job".into()])]
    );
}

#[test]
fn durations_and_negative_numbers_become_number_params() {
    let query = parse_clean("predict_linear(x[1h], 4h)");
    assert_eq!(
        query.operations,
        vec![Operation::new("predict_linear", vec!["1h".into(), 14400.0.into()])]
    );

    let query = parse_clean("clamp_min(x, -1)");
    assert_eq!(
        query.operations,
        vec![Operation::new("clamp_min", vec![(-1.0).into()])]
    );
}

#[test]
fn range_is_taken_from_the_last_bracket_group() {
    let query = parse_clean("max_over_time(rate(x[1m])[10m:1m])");
    assert_eq!(op_ids(&query), ["rate", "max_over_time"]);
    assert_eq!(query.operations[0].params, vec![OperationParam::from("1m")]);
    assert_eq!(query.operations[1].params, vec![OperationParam::from("10m:1m")]);
}

#[test]
fn scalar_chain_flattens_in_evaluation_order() {
    let text = "a + 1 - 1 / 1 * 1 % 1 ^ 1";
    let query = parse_clean(text);
    assert_eq!(query.metric, "a");
    assert_eq!(
        op_ids(&query),
        [
            "__addition",
            "__subtraction",
            "__divide_by",
            "__multiply_by",
            "__modulo",
            "__exponent",
        ]
    );
    assert_eq!(render(&query), text);
}

#[test]
fn long_scalar_chain_stays_a_single_query() {
    let text = "cluster_namespace_slug_dialer_name + 1 - 1 / 1 * 1 % 1 ^ 1";
    let query = parse_clean(text);
    assert_eq!(query.metric, "cluster_namespace_slug_dialer_name");
    assert!(query.binary_queries.is_empty());
    assert_eq!(
        op_ids(&query),
        [
            "__addition",
            "__subtraction",
            "__divide_by",
            "__multiply_by",
            "__modulo",
            "__exponent",
        ]
    );
}

#[test]
fn comparisons_record_the_bool_modifier() {
    let query = parse_clean("up > bool 1");
    assert_eq!(
        query.operations,
        vec![Operation::new("__greater_than", vec![1.0.into(), true.into()])]
    );

    let query = parse_clean("up == 0");
    assert_eq!(
        query.operations,
        vec![Operation::new("__equal_to", vec![0.0.into(), false.into()])]
    );
}

#[test]
fn vector_binary_queries() {
    let query = parse_clean("a / on(job, instance) b");
    assert_eq!(query.metric, "a");
    let [binary] = query.binary_queries.as_slice() else {
        panic!("expected one binary query: {query:?}");
    };
    assert_eq!(binary.operator, "/");
    assert_eq!(binary.vector_matches_type, Some(VectorMatchType::On));
    assert_eq!(binary.vector_matches.as_deref(), Some("job, instance"));
    assert_eq!(binary.query.metric, "b");

    let query = parse_clean("a > bool ignoring(pod) b");
    assert_eq!(query.binary_queries[0].operator, "> bool");
    assert_eq!(
        query.binary_queries[0].vector_matches_type,
        Some(VectorMatchType::Ignoring)
    );
}

#[test]
fn canonical_queries_round_trip() {
    for text in [
        "up",
        r#"up{job="api", code!="500"}"#,
        "rate(x[5m])",
        "sum by(job) (rate(x[5m]))",
        "topk(5, x)",
        "quantile_over_time(0.9, x[5m])",
        r#"label_replace(up, "dst", "$1", "src", "(.*)")"#,
        "clamp_max(up, 10)",
        "sum(a) / 2",
        "a / on(job) b",
        "a + rate(b[5m])",
        "histogram_quantile(0.95, sum by(le) (rate(x_bucket[5m])))",
    ] {
        let query = parse_clean(text);
        assert_eq!(render(&query), text);
        assert_eq!(parse_clean(&render(&query)), query);
    }
}

#[test]
fn binary_expression_as_argument_is_ambiguous() {
    let text = r#"topk(5, node_arp_entries / node_arp_entries{cluster="dev-eu-west-2"})"#;
    let parsed = parse(text);

    assert_eq!(
        parsed.errors,
        vec![ParsingError {
            text: AMBIGUOUS_QUERY.to_string(),
            from: Some(8),
            to: Some(68),
            parent_type: None,
        }]
    );

    // the walk still models what it can
    let query = parsed.query;
    assert_eq!(query.metric, "node_arp_entries");
    assert_eq!(op_ids(&query), ["topk"]);
    assert_eq!(query.binary_queries[0].query.metric, "node_arp_entries");
    assert_eq!(
        query.binary_queries[0].query.labels,
        vec![LabelFilter::new("cluster", "=", "dev-eu-west-2")]
    );
}

#[test]
fn binary_expression_outside_the_call_is_modelled() {
    let query =
        parse_clean(r#"topk(5, node_arp_entries) / node_arp_entries{cluster="dev-eu-west-2"}"#);

    assert_eq!(query.metric, "node_arp_entries");
    assert_eq!(
        query.operations,
        vec![Operation::new("topk", vec![5.0.into()])]
    );
    assert_eq!(query.binary_queries.len(), 1);
    assert_eq!(query.binary_queries[0].operator, "/");
    assert_eq!(
        query.binary_queries[0].query.labels,
        vec![LabelFilter::new("cluster", "=", "dev-eu-west-2")]
    );
}

#[test]
fn parentheses_are_reported() {
    let parsed = parse("(up)");
    assert_eq!(parsed.query.metric, "up");
    assert_eq!(
        parsed.errors,
        vec![ParsingError {
            text: "(up)".to_string(),
            from: Some(0),
            to: Some(4),
            parent_type: Some("Root".to_string()),
        }]
    );
}

#[test]
fn syntax_errors_point_at_source() {
    let parsed = parse("up{job=5}");
    assert_eq!(parsed.query.metric, "up");
    assert_eq!(parsed.query.labels, vec![LabelFilter::new("job", "=", "")]);

    let spans: Vec<_> = parsed
        .errors
        .iter()
        .map(|e| (e.text.as_str(), e.from, e.to, e.parent_type.as_deref()))
        .collect();
    assert_eq!(
        spans,
        [
            ("", Some(7), Some(7), Some("LabelMatcher")),
            ("5", Some(7), Some(8), Some("Root")),
            ("}", Some(8), Some(9), Some("Root")),
        ]
    );
}

#[test]
fn template_variables_are_returned() {
    let text = r#"rate(${metric}{job="$job"}[$__rate_interval])"#;
    let query = parse_clean(text);
    assert_eq!(query.metric, "${metric}");
    assert_eq!(query.labels, vec![LabelFilter::new("job", "=", "$job")]);
    assert_eq!(
        query.operations,
        vec![Operation::new("rate", vec!["$__rate_interval".into()])]
    );
    assert_eq!(render(&query), text);
}

#[test]
fn error_offsets_index_the_original_text() {
    let text = r#"up{job="$job"} + ($x)"#;
    let parsed = parse(text);
    assert_eq!(
        parsed.errors,
        vec![ParsingError {
            text: "($x)".to_string(),
            from: Some(17),
            to: Some(21),
            parent_type: Some("BinaryExpr".to_string()),
        }]
    );
}

#[test]
fn unresolved_macros_do_not_raise_errors() {
    let query = parse_clean("x offset $__interval");
    assert_eq!(query.metric, "x");

    let query = parse_clean("rate(x[$__interval])");
    assert_eq!(
        query.operations,
        vec![Operation::new("rate", vec!["$__interval".into()])]
    );
}

#[test]
fn real_errors_survive_macro_substitution() {
    let parsed = parse("(rate(x[$__interval]))");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].text, "(rate(x[$__interval]))");
}

#[test]
fn macro_names_are_case_sensitive() {
    assert_eq!(
        substitute_macros("rate(x[$__interval]) * $__range_ms"),
        "rate(x[1s]) * 1000"
    );
    assert!(!has_macros("x offset $__INTERVAL"));
    assert_eq!(substitute_macros("x offset $__Range"), "x offset $__Range");

    let parsed = parse("x offset $__INTERVAL");
    assert!(!parsed.errors.is_empty());
}

#[test]
fn parser_limits_are_reported() {
    let parsed = VisualParser::new()
        .with_recursion_limit(2)
        .parse("((((up))))");
    assert!(parsed.query.is_empty());
    assert_eq!(
        parsed.errors,
        vec![ParsingError::spanless("recursion limit exceeded")]
    );
}

#[test]
fn serializes_in_camel_case() {
    let query = parse_clean("a / on(job) rate(b[5m])");
    let value = serde_json::to_value(&query).expect("serializable");
    assert_eq!(
        value,
        json!({
            "metric": "a",
            "labels": [],
            "operations": [],
            "binaryQueries": [{
                "operator": "/",
                "vectorMatchesType": "on",
                "vectorMatches": "job",
                "query": {
                    "metric": "b",
                    "labels": [],
                    "operations": [{ "id": "rate", "params": ["5m"] }],
                },
            }],
        })
    );

    let error = &parse("(up)").errors[0];
    assert_eq!(
        serde_json::to_value(error).expect("serializable"),
        json!({ "text": "(up)", "from": 0, "to": 4, "parentType": "Root" })
    );

    let back: VisualQuery = serde_json::from_value(value).expect("deserializable");
    assert_eq!(back, query);
}
