//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Accessors return `Option` because recovered trees may lack any part.

use super::cst::token_sets::MATCH_OPS;
use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(VectorSelector, VectorSelector);
ast_node!(LabelMatcher, LabelMatcher);
ast_node!(StringLiteral, StringLiteral);
ast_node!(NumberLiteral, NumberLiteral);
ast_node!(DurationLiteral, DurationLiteral);
ast_node!(FunctionCall, FunctionCall);
ast_node!(FunctionCallBody, FunctionCallBody);
ast_node!(AggregateExpr, AggregateExpr);
ast_node!(AggregateModifier, AggregateModifier);
ast_node!(GroupingLabels, GroupingLabels);
ast_node!(BinaryExpr, BinaryExpr);
ast_node!(MatchingModifier, MatchingModifier);
ast_node!(UnaryExpr, UnaryExpr);

fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| !t.kind().is_trivia())
}

fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children()
        .find(|n| n.kind() == kind)
        .and_then(|n| first_token(&n))
}

impl Root {
    /// Wraps the root of a parse; the parser always produces a `Root` node.
    pub(crate) fn from_root(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::Root);
        Self(node)
    }

    /// The first top-level expression.
    pub fn expr(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind().is_expr())
    }

    /// Every `VectorSelector` in document order, not descending into a selector once found.
    pub fn selectors(&self) -> Vec<VectorSelector> {
        let mut found = Vec::new();
        let mut preorder = self.0.preorder();
        while let Some(event) = preorder.next() {
            let rowan::WalkEvent::Enter(node) = event else {
                continue;
            };
            if let Some(selector) = VectorSelector::cast(node) {
                found.push(selector);
                preorder.skip_subtree();
            }
        }
        found
    }
}

impl VectorSelector {
    pub fn metric_name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Identifier)
    }

    pub fn matchers(&self) -> impl Iterator<Item = LabelMatcher> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::LabelMatchers)
            .flat_map(|n| n.children())
            .filter_map(LabelMatcher::cast)
    }
}

impl LabelMatcher {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::LabelName)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| MATCH_OPS.contains(t.kind()))
    }

    pub fn value(&self) -> Option<StringLiteral> {
        self.0.children().find_map(StringLiteral::cast)
    }

    /// Recovery node left by a missing operator or value.
    pub fn error(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::Error)
    }
}

impl StringLiteral {
    pub fn raw(&self) -> String {
        self.0.text().to_string()
    }

    /// Contents with one layer of matching quotes removed; escapes are kept verbatim.
    pub fn value(&self) -> String {
        unquote(&self.raw()).to_string()
    }
}

impl NumberLiteral {
    pub fn value(&self) -> Option<f64> {
        parse_number(&self.0.text().to_string())
    }
}

impl DurationLiteral {
    pub fn seconds(&self) -> Option<f64> {
        parse_duration_seconds(&self.0.text().to_string())
    }
}

impl FunctionCall {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::FunctionIdentifier)
    }

    pub fn body(&self) -> Option<FunctionCallBody> {
        self.0.children().find_map(FunctionCallBody::cast)
    }
}

impl FunctionCallBody {
    /// Argument nodes, recovery `Error` nodes included.
    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children()
    }
}

impl AggregateExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::AggregateOp)
    }

    pub fn modifier(&self) -> Option<AggregateModifier> {
        self.0.children().find_map(AggregateModifier::cast)
    }

    pub fn body(&self) -> Option<FunctionCallBody> {
        self.0.children().find_map(FunctionCallBody::cast)
    }
}

impl AggregateModifier {
    pub fn is_without(&self) -> bool {
        first_token(&self.0).is_some_and(|t| t.kind() == SyntaxKind::KwWithout)
    }

    pub fn labels(&self) -> Option<GroupingLabels> {
        self.0.children().find_map(GroupingLabels::cast)
    }
}

impl GroupingLabels {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::LabelName)
            .filter_map(|n| first_token(&n))
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<SyntaxNode> {
        self.0.children().next().filter(|n| n.kind().is_expr())
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    /// The operand after the operator; `None` when it was missing.
    pub fn rhs(&self) -> Option<SyntaxNode> {
        let op_end = self.op()?.text_range().end();
        self.0
            .children()
            .filter(|n| n.text_range().start() >= op_end)
            .find(|n| n.kind().is_expr())
    }

    pub fn has_bool_modifier(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::BoolModifier)
    }

    pub fn matching(&self) -> Option<MatchingModifier> {
        self.0.children().find_map(MatchingModifier::cast)
    }

    /// Recovery nodes between or after the operands.
    pub fn errors(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind() == SyntaxKind::Error)
    }
}

impl MatchingModifier {
    pub fn is_ignoring(&self) -> bool {
        first_token(&self.0).is_some_and(|t| t.kind() == SyntaxKind::KwIgnoring)
    }

    pub fn labels(&self) -> Option<GroupingLabels> {
        self.0.children().find_map(GroupingLabels::cast)
    }
}

impl UnaryExpr {
    pub fn is_negative(&self) -> bool {
        first_token(&self.0).is_some_and(|t| t.kind() == SyntaxKind::Minus)
    }

    pub fn operand(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

/// Value of a number literal, optionally behind unary signs (`-1`, `+Inf`).
pub fn number_value(node: &SyntaxNode) -> Option<f64> {
    if let Some(literal) = NumberLiteral::cast(node.clone()) {
        return literal.value();
    }
    let unary = UnaryExpr::cast(node.clone())?;
    let value = number_value(&unary.operand()?)?;
    Some(if unary.is_negative() { -value } else { value })
}

/// Strips one layer of matching `"`, `'` or `` ` `` quotes.
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last))
            if bytes.len() >= 2 && first == last && matches!(first, b'"' | b'\'' | b'`') =>
        {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}

/// Parses PromQL number syntax: decimal, float, exponent, hex, `Inf`, `NaN`.
pub fn parse_number(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    match lower.as_str() {
        "inf" | "+inf" => return Some(f64::INFINITY),
        "-inf" => return Some(f64::NEG_INFINITY),
        "nan" => return Some(f64::NAN),
        _ => {}
    }
    if let Some(hex) = lower.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }
    lower.parse::<f64>().ok()
}

/// Converts `1h30m`, `500ms` or a plain number of seconds to seconds.
pub fn parse_duration_seconds(text: &str) -> Option<f64> {
    if let Some(value) = parse_number(text) {
        return Some(value);
    }

    let mut total = 0.0;
    let mut rest = text;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit())?;
        if digits == 0 {
            return None;
        }
        let amount: f64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];
        let unit_len = if rest.starts_with("ms") { 2 } else { 1 };
        let factor = match &rest[..unit_len.min(rest.len())] {
            "ms" => 0.001,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3_600.0,
            "d" => 86_400.0,
            "w" => 604_800.0,
            "y" => 31_536_000.0,
            _ => return None,
        };
        total += amount * factor;
        rest = &rest[unit_len.min(rest.len())..];
    }
    Some(total)
}
