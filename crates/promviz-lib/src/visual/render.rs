//! Visual query back to PromQL text.

use super::model::{BinaryQuery, LabelFilter, Operation, OperationParam, VisualQuery, format_number};
use super::operations::{self, Grouping, RenderStyle};

/// Renders a query as PromQL. Total for any model, hand-built ones included.
pub fn render(query: &VisualQuery) -> String {
    render_query(query, false)
}

fn render_query(query: &VisualQuery, nested: bool) -> String {
    let has_scalar_ops = query
        .operations
        .iter()
        .any(|op| operations::is_binary_op(&op.id));
    let has_nesting = !query.binary_queries.is_empty();

    let mut out = format!("{}{}", query.metric, render_labels(&query.labels));
    for op in &query.operations {
        out = render_operation(op, out);
    }

    if !nested && has_scalar_ops && has_nesting {
        out = format!("({out})");
    }

    for binary in &query.binary_queries {
        render_binary_query(binary, &mut out);
    }

    if nested && (has_scalar_ops || has_nesting) {
        out = format!("({out})");
    }
    out
}

/// `{a="1", b!="2"}`, or nothing for an empty list.
pub fn render_labels(labels: &[LabelFilter]) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let matchers: Vec<String> = labels
        .iter()
        .map(|l| format!("{}{}\"{}\"", l.label, l.op, l.value))
        .collect();
    format!("{{{}}}", matchers.join(", "))
}

fn render_binary_query(binary: &BinaryQuery, out: &mut String) {
    out.push_str(&format!(" {} ", binary.operator));
    if let Some(matches) = binary.vector_matches.as_deref().filter(|m| !m.is_empty()) {
        let kind = binary.vector_matches_type.map_or("on", |t| t.as_str());
        out.push_str(&format!("{kind}({matches}) "));
    }
    out.push_str(&render_query(&binary.query, true));
}

fn render_operation(op: &Operation, inner: String) -> String {
    let params = &op.params;
    match operations::style_of(&op.id) {
        RenderStyle::FunctionLeft => {
            let args = params.iter().map(render_param).chain([inner]);
            call(&op.id, args)
        }
        RenderStyle::FunctionRight => {
            let args = [inner].into_iter().chain(params.iter().map(render_param));
            call(&op.id, args)
        }
        RenderStyle::Range { params_first } => {
            let (target, rest) = match params.split_first() {
                Some((OperationParam::String(range), rest)) => (format!("{inner}[{range}]"), rest),
                _ => (inner, params.as_slice()),
            };
            let rest = rest.iter().map(render_param);
            if params_first {
                call(&op.id, rest.chain([target]))
            } else {
                call(&op.id, [target].into_iter().chain(rest))
            }
        }
        RenderStyle::Aggregation(grouping) => {
            let name = aggregation_name(&op.id, grouping);
            aggregation(name, grouping, params, inner)
        }
        RenderStyle::AggregationWithParam(grouping) => {
            let name = aggregation_name(&op.id, grouping);
            let (positional, labels) = match params.split_first() {
                Some((first, rest)) => (Some(render_param(first)), rest),
                None => (None, params.as_slice()),
            };
            let body = match positional {
                Some(p) if inner.is_empty() => p,
                Some(p) => format!("{p}, {inner}"),
                None => inner,
            };
            aggregation(name, grouping, labels, body)
        }
        RenderStyle::BinaryScalar { sign, comparison } => {
            let bool_modifier =
                comparison && matches!(params.get(1), Some(OperationParam::Bool(true)));
            let value = params.first().map(render_param).unwrap_or_default();
            let modifier = if bool_modifier { "bool " } else { "" };
            format!("{inner} {sign} {modifier}{value}")
        }
    }
}

fn aggregation_name(id: &str, grouping: Grouping) -> &str {
    match grouping {
        Grouping::None => id,
        _ => operations::split_aggregation_id(id).map_or(id, |(name, _)| name),
    }
}

fn aggregation(name: &str, grouping: Grouping, labels: &[OperationParam], body: String) -> String {
    let Some(keyword) = grouping.keyword() else {
        return format!("{name}({body})");
    };
    let labels: Vec<String> = labels.iter().map(render_label_param).collect();
    format!("{name} {keyword}({}) ({body})", labels.join(", "))
}

fn call(id: &str, args: impl Iterator<Item = String>) -> String {
    let args: Vec<String> = args.filter(|a| !a.is_empty()).collect();
    format!("{id}({})", args.join(", "))
}

fn render_param(param: &OperationParam) -> String {
    match param {
        OperationParam::Number(n) => format_number(*n),
        OperationParam::String(s) => format!("\"{s}\""),
        OperationParam::Bool(b) => b.to_string(),
    }
}

fn render_label_param(param: &OperationParam) -> String {
    match param {
        OperationParam::String(s) => s.clone(),
        other => render_param(other),
    }
}
