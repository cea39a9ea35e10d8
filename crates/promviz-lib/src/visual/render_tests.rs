use super::{
    BinaryQuery, LabelFilter, Operation, OperationParam, VectorMatchType, VisualQuery,
    format_number, render, render_labels,
};

fn metric(name: &str) -> VisualQuery {
    VisualQuery {
        metric: name.to_string(),
        ..VisualQuery::default()
    }
}

fn with_ops(name: &str, operations: Vec<Operation>) -> VisualQuery {
    VisualQuery {
        operations,
        ..metric(name)
    }
}

fn op(id: &str, params: Vec<OperationParam>) -> Operation {
    Operation::new(id, params)
}

fn binary(operator: &str, query: VisualQuery) -> BinaryQuery {
    BinaryQuery {
        operator: operator.to_string(),
        vector_matches_type: None,
        vector_matches: None,
        query,
    }
}

#[test]
fn empty_query_renders_nothing() {
    assert_eq!(render(&VisualQuery::default()), "");
}

#[test]
fn labels() {
    let query = VisualQuery {
        labels: vec![
            LabelFilter::new("job", "=", "api"),
            LabelFilter::new("code", "!~", "5.."),
        ],
        ..metric("http_requests_total")
    };
    assert_eq!(render(&query), r#"http_requests_total{job="api", code!~"5.."}"#);
    assert_eq!(render_labels(&[]), "");
}

#[test]
fn range_functions() {
    let rate = with_ops("x", vec![op("rate", vec!["5m".into()])]);
    assert_eq!(render(&rate), "rate(x[5m])");

    let no_range = with_ops("x", vec![op("rate", vec![])]);
    assert_eq!(render(&no_range), "rate(x)");

    let quantile = with_ops(
        "x",
        vec![op("quantile_over_time", vec!["5m".into(), 0.9.into()])],
    );
    assert_eq!(render(&quantile), "quantile_over_time(0.9, x[5m])");

    let predict = with_ops(
        "x",
        vec![op("predict_linear", vec!["1h".into(), 3600.0.into()])],
    );
    assert_eq!(render(&predict), "predict_linear(x[1h], 3600)");
}

#[test]
fn aggregations() {
    let query = with_ops(
        "x",
        vec![
            op("rate", vec!["5m".into()]),
            op("__sum_by", vec!["job".into(), "instance".into()]),
        ],
    );
    assert_eq!(render(&query), "sum by(job, instance) (rate(x[5m]))");

    let without = with_ops("x", vec![op("__avg_without", vec!["pod".into()])]);
    assert_eq!(render(&without), "avg without(pod) (x)");

    let topk = with_ops("x", vec![op("__topk_by", vec![5.0.into(), "job".into()])]);
    assert_eq!(render(&topk), "topk by(job) (5, x)");

    let plain = with_ops("x", vec![op("topk", vec![5.0.into()])]);
    assert_eq!(render(&plain), "topk(5, x)");
}

#[test]
fn function_param_sides() {
    let left = with_ops("x", vec![op("histogram_quantile", vec![0.95.into()])]);
    assert_eq!(render(&left), "histogram_quantile(0.95, x)");

    let right = with_ops("x", vec![op("clamp_max", vec![10.0.into()])]);
    assert_eq!(render(&right), "clamp_max(x, 10)");

    let strings = with_ops(
        "up",
        vec![op(
            "label_replace",
            vec!["dst".into(), "$1".into(), "src".into(), "(.*)".into()],
        )],
    );
    assert_eq!(
        render(&strings),
        r#"label_replace(up, "dst", "$1", "src", "(.*)")"#
    );
}

#[test]
fn unknown_operation_renders_as_function() {
    let query = with_ops("x", vec![op("my_function", vec![])]);
    assert_eq!(render(&query), "my_function(x)");
}

#[test]
fn scalar_operations() {
    let query = with_ops(
        "x",
        vec![op("__multiply_by", vec![2.0.into()]), op("__addition", vec![1.0.into()])],
    );
    assert_eq!(render(&query), "x * 2 + 1");

    let bool_cmp = with_ops("x", vec![op("__greater_than", vec![5.0.into(), true.into()])]);
    assert_eq!(render(&bool_cmp), "x > bool 5");

    let filter_cmp = with_ops("x", vec![op("__greater_than", vec![5.0.into(), false.into()])]);
    assert_eq!(render(&filter_cmp), "x > 5");
}

#[test]
fn binary_queries() {
    let query = VisualQuery {
        binary_queries: vec![binary("/", metric("b"))],
        ..metric("a")
    };
    assert_eq!(render(&query), "a / b");

    let nested_ops = VisualQuery {
        binary_queries: vec![binary("/", with_ops("b", vec![op("rate", vec!["5m".into()])]))],
        ..metric("a")
    };
    assert_eq!(render(&nested_ops), "a / rate(b[5m])");
}

#[test]
fn scalar_operations_next_to_binary_queries_are_parenthesized() {
    let query = VisualQuery {
        binary_queries: vec![binary(
            "+",
            with_ops("b", vec![op("__multiply_by", vec![2.0.into()])]),
        )],
        ..with_ops("a", vec![op("__multiply_by", vec![2.0.into()])])
    };
    assert_eq!(render(&query), "(a * 2) + (b * 2)");
}

#[test]
fn vector_matching() {
    let mut on = binary("/", metric("b"));
    on.vector_matches_type = Some(VectorMatchType::On);
    on.vector_matches = Some("job, instance".to_string());
    let query = VisualQuery {
        binary_queries: vec![on],
        ..metric("a")
    };
    assert_eq!(render(&query), "a / on(job, instance) b");

    let mut ignoring = binary("> bool", metric("b"));
    ignoring.vector_matches_type = Some(VectorMatchType::Ignoring);
    ignoring.vector_matches = Some("pod".to_string());
    let query = VisualQuery {
        binary_queries: vec![ignoring],
        ..metric("a")
    };
    assert_eq!(render(&query), "a > bool ignoring(pod) b");

    let mut empty = binary("+", metric("b"));
    empty.vector_matches = Some(String::new());
    let query = VisualQuery {
        binary_queries: vec![empty],
        ..metric("a")
    };
    assert_eq!(render(&query), "a + b");
}

#[test]
fn number_spelling() {
    assert_eq!(format_number(1.0), "1");
    assert_eq!(format_number(0.25), "0.25");
    assert_eq!(format_number(-3.5), "-3.5");
    assert_eq!(format_number(f64::INFINITY), "+Inf");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Inf");
    assert_eq!(format_number(f64::NAN), "NaN");
}
