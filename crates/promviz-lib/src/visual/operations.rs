//! Registry of the operations a visual query can carry.

use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::parser::is_aggregation_op;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    Aggregations,
    RangeFunctions,
    Functions,
    BinaryOps,
    Trigonometric,
    TimeFunctions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    None,
    By,
    Without,
}

impl Grouping {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::By => Some("by"),
            Self::Without => Some("without"),
        }
    }
}

/// How an operation wraps the expression it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStyle {
    /// `fn(params..., inner)`
    FunctionLeft,
    /// `fn(inner, params...)`
    FunctionRight,
    /// `fn(inner[range])`, or with extra params before or after the inner expression.
    Range { params_first: bool },
    /// `agg by(labels) (inner)`
    Aggregation(Grouping),
    /// `agg by(labels) (param, inner)`
    AggregationWithParam(Grouping),
    /// `inner <sign> [bool] param`
    BinaryScalar {
        sign: &'static str,
        comparison: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDef {
    pub id: String,
    pub category: OperationCategory,
    pub style: RenderStyle,
}

macro_rules! define_operations {
    ($registry:ident; $( $category:ident => $style:expr => [$($id:literal),* $(,)?] ),* $(,)?) => {
        $(
            $(
                $registry.insert(
                    $id.to_string(),
                    OperationDef {
                        id: $id.to_string(),
                        category: OperationCategory::$category,
                        style: $style,
                    },
                );
            )*
        )*
    };
}

const SIMPLE_AGGREGATIONS: &[&str] = &["sum", "avg", "count", "min", "max", "group", "stddev", "stdvar"];
const PARAM_AGGREGATIONS: &[&str] = &[
    "topk",
    "bottomk",
    "quantile",
    "count_values",
    "limitk",
    "limit_ratio",
];

/// Scalar binary operator ids, keyed by operator text.
const BINARY_SCALARS: &[(&str, &str, bool)] = &[
    ("+", "__addition", false),
    ("-", "__subtraction", false),
    ("*", "__multiply_by", false),
    ("/", "__divide_by", false),
    ("%", "__modulo", false),
    ("^", "__exponent", false),
    ("==", "__equal_to", true),
    ("!=", "__not_equal_to", true),
    (">", "__greater_than", true),
    ("<", "__less_than", true),
    (">=", "__greater_or_equal", true),
    ("<=", "__less_or_equal", true),
];

static REGISTRY: LazyLock<IndexMap<String, OperationDef>> = LazyLock::new(|| {
    let mut registry = IndexMap::new();

    for (names, with_param) in [(SIMPLE_AGGREGATIONS, false), (PARAM_AGGREGATIONS, true)] {
        for name in names {
            for grouping in [Grouping::None, Grouping::By, Grouping::Without] {
                let id = aggregation_id(name, grouping);
                let style = if with_param {
                    RenderStyle::AggregationWithParam(grouping)
                } else {
                    RenderStyle::Aggregation(grouping)
                };
                registry.insert(
                    id.clone(),
                    OperationDef {
                        id,
                        category: OperationCategory::Aggregations,
                        style,
                    },
                );
            }
        }
    }

    define_operations! { registry;
        RangeFunctions => RenderStyle::Range { params_first: false } => [
            "rate", "irate", "increase", "delta", "idelta", "changes", "resets", "deriv",
            "avg_over_time", "min_over_time", "max_over_time", "sum_over_time",
            "count_over_time", "last_over_time", "present_over_time", "absent_over_time",
            "stddev_over_time", "stdvar_over_time", "mad_over_time",
            "predict_linear", "double_exponential_smoothing", "holt_winters",
        ],
        RangeFunctions => RenderStyle::Range { params_first: true } => ["quantile_over_time"],
        Functions => RenderStyle::FunctionLeft => [
            "abs", "absent", "ceil", "exp", "floor", "ln", "log2", "log10", "sqrt", "sgn",
            "scalar", "vector", "sort", "sort_desc", "timestamp", "histogram_quantile",
            "histogram_fraction", "histogram_avg", "histogram_count", "histogram_sum",
            "histogram_stddev", "histogram_stdvar",
        ],
        Functions => RenderStyle::FunctionRight => [
            "clamp", "clamp_min", "clamp_max", "round", "label_replace", "label_join",
            "sort_by_label", "sort_by_label_desc",
        ],
        Trigonometric => RenderStyle::FunctionLeft => [
            "acos", "acosh", "asin", "asinh", "atan", "atanh", "cos", "cosh", "sin", "sinh",
            "tan", "tanh", "deg", "rad", "pi",
        ],
        TimeFunctions => RenderStyle::FunctionLeft => [
            "time", "day_of_month", "day_of_week", "day_of_year", "days_in_month", "hour",
            "minute", "month", "year",
        ],
    }

    for &(sign, id, comparison) in BINARY_SCALARS {
        registry.insert(
            id.to_string(),
            OperationDef {
                id: id.to_string(),
                category: OperationCategory::BinaryOps,
                style: RenderStyle::BinaryScalar { sign, comparison },
            },
        );
    }

    registry
});

/// `sum`, `__sum_by`, `__sum_without`.
pub fn aggregation_id(name: &str, grouping: Grouping) -> String {
    match grouping.keyword() {
        None => name.to_string(),
        Some(keyword) => format!("__{name}_{keyword}"),
    }
}

pub fn get(id: &str) -> Option<&'static OperationDef> {
    REGISTRY.get(id)
}

/// Render style for an id; unknown ids render as plain functions.
pub fn style_of(id: &str) -> RenderStyle {
    get(id).map_or(RenderStyle::FunctionLeft, |def| def.style)
}

pub fn is_binary_op(id: &str) -> bool {
    get(id).is_some_and(|def| def.category == OperationCategory::BinaryOps)
}

/// Functions whose call text carries a `[range]` that becomes the first param.
pub fn is_range_function(name: &str) -> bool {
    name.ends_with("_over_time")
        || get(name).is_some_and(|def| matches!(def.style, RenderStyle::Range { .. }))
}

/// Scalar op id and comparison flag for an operator token, if the operator has one.
pub fn binary_scalar(sign: &str) -> Option<(&'static str, bool)> {
    BINARY_SCALARS
        .iter()
        .find(|(s, _, _)| *s == sign)
        .map(|&(_, id, comparison)| (id, comparison))
}

/// Splits `__topk_by` into (`topk`, `By`).
pub fn split_aggregation_id(id: &str) -> Option<(&str, Grouping)> {
    let inner = id.strip_prefix("__")?;
    let (name, grouping) = if let Some(name) = inner.strip_suffix("_by") {
        (name, Grouping::By)
    } else {
        (inner.strip_suffix("_without")?, Grouping::Without)
    };
    is_aggregation_op(name).then_some((name, grouping))
}
