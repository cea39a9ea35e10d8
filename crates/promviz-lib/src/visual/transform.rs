//! CST to visual query.
//!
//! A depth-first walk dispatches on node kind. Selectors, matchers, calls, aggregations and
//! binary expressions are modelled; every other kind is transparent and only descended into.
//! Unsupported shapes become [`ParsingError`]s and the walk keeps going, so callers always
//! get a best-effort query.

use std::sync::LazyLock;

use regex::Regex;
use rowan::TextRange;
use tracing::{debug, trace, warn};

use super::model::{
    BinaryQuery, LabelFilter, Operation, OperationParam, ParsedQuery, ParsingError,
    VectorMatchType, VisualQuery,
};
use super::operations::{self, Grouping};
use super::validate::{self, AMBIGUOUS_QUERY};
use super::variables::{Substituted, return_variables};
use crate::parser::ast::{
    self, AggregateExpr, BinaryExpr, DurationLiteral, FunctionCall, FunctionCallBody,
    GroupingLabels, LabelMatcher, StringLiteral,
};
use crate::parser::lexer::lex;
use crate::parser::{DEFAULT_RECURSION_LIMIT, Parser, SyntaxKind, SyntaxNode, parse_with_parser};

/// Content of the last `[...]` group in a call.
static RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\][^\[\]]*$").expect("range pattern is valid"));

/// Internal faults that abort a walk. Surfaced as one spanless error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("missing {0}")]
    MissingChild(&'static str),

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("query nested too deeply")]
    TooDeep,
}

type Result<T> = std::result::Result<T, TransformError>;

/// Entry point with configurable parser limits.
#[derive(Debug, Clone, Copy)]
pub struct VisualParser {
    recursion_limit: u32,
    exec_fuel: Option<u32>,
}

impl Default for VisualParser {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            exec_fuel: None,
        }
    }
}

impl VisualParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Builds the visual query for `text`. Never fails; problems are listed in `errors`.
    pub fn parse(&self, text: &str) -> ParsedQuery {
        let (mut parsed, limited) = self.transform(text);
        if limited {
            return parsed;
        }

        if validate::suppress_for_empty(parsed.query.is_empty(), &mut parsed.errors) {
            debug!("empty query, errors dropped");
        }

        if !parsed.errors.is_empty() && validate::has_macros(text) {
            let resolved = validate::substitute_macros(text);
            if self.transform(&resolved).0.errors.is_empty() {
                debug!(
                    dropped = parsed.errors.len(),
                    "errors only caused by unresolved macros"
                );
                parsed.errors.clear();
            }
        }

        parsed
    }

    /// The flag is set when the parser hit a limit; such errors are never suppressed.
    fn transform(&self, text: &str) -> (ParsedQuery, bool) {
        let substituted = Substituted::new(text);
        let source = substituted.text();
        let parser = Parser::new(source, lex(source))
            .with_recursion_fuel(Some(self.recursion_limit))
            .with_exec_fuel(self.exec_fuel);

        let (parse, diagnostics) = match parse_with_parser(parser) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "query rejected by parser limits");
                let parsed = ParsedQuery {
                    query: VisualQuery::default(),
                    errors: vec![ParsingError::spanless(err.to_string())],
                };
                return (parsed, true);
            }
        };
        trace!(diagnostics = diagnostics.len(), "parsed query");

        let mut walker = Transformer {
            substituted: &substituted,
            errors: Vec::new(),
            depth: 0,
            max_depth: self.recursion_limit.saturating_mul(4),
        };
        let mut query = VisualQuery::default();
        if let Err(err) = walker.dispatch(&parse.syntax(), &mut query) {
            warn!(%err, "transform aborted");
            walker.errors.push(ParsingError::spanless(err.to_string()));
        }

        let parsed = ParsedQuery {
            query,
            errors: walker.errors,
        };
        (parsed, false)
    }
}

/// Parses with default limits.
pub fn parse(text: &str) -> ParsedQuery {
    VisualParser::default().parse(text)
}

struct Transformer<'a> {
    substituted: &'a Substituted,
    errors: Vec<ParsingError>,
    depth: u32,
    max_depth: u32,
}

impl Transformer<'_> {
    fn dispatch(&mut self, node: &SyntaxNode, query: &mut VisualQuery) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(TransformError::TooDeep);
        }
        self.depth += 1;
        let result = self.dispatch_kind(node, query);
        self.depth -= 1;
        result
    }

    fn dispatch_kind(&mut self, node: &SyntaxNode, query: &mut VisualQuery) -> Result<()> {
        match node.kind() {
            SyntaxKind::Identifier => {
                query.metric = self.read(node);
                Ok(())
            }
            SyntaxKind::LabelMatcher => {
                self.label_matcher(node, query);
                Ok(())
            }
            SyntaxKind::FunctionCall => self.function_call(node, query),
            SyntaxKind::AggregateExpr => self.aggregation(node, query),
            SyntaxKind::BinaryExpr => self.binary(node, query),
            SyntaxKind::ParenExpr => {
                self.error_at(node);
                self.descend(node, query)
            }
            SyntaxKind::Error => {
                self.error_node(node);
                Ok(())
            }
            _ => self.descend(node, query),
        }
    }

    fn descend(&mut self, node: &SyntaxNode, query: &mut VisualQuery) -> Result<()> {
        for child in node.children() {
            self.dispatch(&child, query)?;
        }
        Ok(())
    }

    fn label_matcher(&mut self, node: &SyntaxNode, query: &mut VisualQuery) {
        let Some(matcher) = LabelMatcher::cast(node.clone()) else {
            return;
        };
        let label = matcher
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let op = matcher
            .op()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let value = matcher
            .value()
            .map(|v| return_variables(&v.value()))
            .unwrap_or_default();
        query.labels.push(LabelFilter { label, op, value });

        if let Some(error) = matcher.error() {
            self.error_at(&error);
        }
    }

    fn function_call(&mut self, node: &SyntaxNode, query: &mut VisualQuery) -> Result<()> {
        let Some(call) = FunctionCall::cast(node.clone()) else {
            return Ok(());
        };
        let name = call
            .name()
            .ok_or(TransformError::MissingChild("function name"))?
            .text()
            .to_string();

        let mut params = Vec::new();
        let mut interval = None;
        if operations::is_range_function(&name) {
            let text = node.text().to_string();
            if let Some(range) = RANGE.captures(&text).and_then(|c| c.get(1)) {
                params.push(OperationParam::String(return_variables(range.as_str())));
                interval = Some(range.as_str().to_string());
            }
        }

        let body = call.body();
        let deferred = match &body {
            Some(body) => self.call_args(body, &mut params)?,
            None => Vec::new(),
        };
        trace!(function = %name, params = params.len(), "function call");
        query.operations.insert(0, Operation::new(name, params));

        // `rate([5m])`: the builder started with an operation and no metric yet.
        if let (Some(body), Some(interval)) = (&body, &interval)
            && body.as_cst().text() == format!("([{interval}])").as_str()
        {
            return Ok(());
        }

        self.dispatch_all(&deferred, query)
    }

    fn aggregation(&mut self, node: &SyntaxNode, query: &mut VisualQuery) -> Result<()> {
        let Some(agg) = AggregateExpr::cast(node.clone()) else {
            return Ok(());
        };
        let name = agg
            .op()
            .ok_or(TransformError::MissingChild("aggregation operator"))?
            .text()
            .to_string();

        let mut grouping = Grouping::None;
        let mut labels = Vec::new();
        if let Some(modifier) = agg.modifier() {
            grouping = if modifier.is_without() {
                Grouping::Without
            } else {
                Grouping::By
            };
            labels = label_names(modifier.labels());
            self.report_errors_in(modifier.as_cst());
        }

        let mut params = Vec::new();
        let deferred = match agg.body() {
            Some(body) => self.call_args(&body, &mut params)?,
            None => Vec::new(),
        };
        params.extend(labels.into_iter().map(OperationParam::String));

        let id = operations::aggregation_id(&name, grouping);
        query.operations.insert(0, Operation::new(id, params));

        for child in node.children().filter(|n| n.kind() == SyntaxKind::Error) {
            self.error_node(&child);
        }
        self.dispatch_all(&deferred, query)
    }

    /// Collects literal arguments into `params`; returns the argument nodes still to walk.
    fn call_args(
        &mut self,
        body: &FunctionCallBody,
        params: &mut Vec<OperationParam>,
    ) -> Result<Vec<SyntaxNode>> {
        let mut deferred = Vec::new();
        for arg in body.args() {
            match arg.kind() {
                SyntaxKind::NumberLiteral => params.push(OperationParam::Number(number(&arg)?)),
                SyntaxKind::UnaryExpr if ast::number_value(&arg).is_some() => {
                    params.push(OperationParam::Number(number(&arg)?));
                }
                SyntaxKind::DurationLiteral => {
                    let seconds = DurationLiteral::cast(arg.clone())
                        .and_then(|d| d.seconds())
                        .ok_or_else(|| TransformError::InvalidNumber(arg.text().to_string()))?;
                    params.push(OperationParam::Number(seconds));
                }
                SyntaxKind::StringLiteral => {
                    if let Some(literal) = StringLiteral::cast(arg.clone()) {
                        params.push(OperationParam::String(return_variables(&literal.value())));
                    }
                }
                _ => {
                    if validate::is_ambiguous_argument(&arg) {
                        self.push_error(AMBIGUOUS_QUERY.to_string(), arg.text_range(), None);
                    }
                    deferred.push(arg);
                }
            }
        }
        Ok(deferred)
    }

    fn dispatch_all(&mut self, nodes: &[SyntaxNode], query: &mut VisualQuery) -> Result<()> {
        for node in nodes {
            self.dispatch(node, query)?;
        }
        Ok(())
    }

    fn binary(&mut self, node: &SyntaxNode, query: &mut VisualQuery) -> Result<()> {
        let Some(expr) = BinaryExpr::cast(node.clone()) else {
            return Ok(());
        };
        let operator = expr
            .op()
            .ok_or(TransformError::MissingChild("binary operator"))?
            .text()
            .to_ascii_lowercase();
        let has_bool = expr.has_bool_modifier();

        if let Some(lhs) = expr.lhs()
            && ast::number_value(&lhs).is_none()
        {
            self.dispatch(&lhs, query)?;
        }

        if let Some(matching) = expr.matching() {
            self.report_errors_in(matching.as_cst());
        }
        for error in expr.errors() {
            self.error_node(&error);
        }

        let Some(rhs) = expr.rhs() else {
            return Ok(());
        };

        if ast::number_value(&rhs).is_some() {
            return self.push_scalar(node, &operator, &rhs, has_bool, query);
        }

        if rhs.kind() == SyntaxKind::BinaryExpr {
            // `a + 1 - 1` nests as `a + (1 - 1)`; the leading literal belongs to this operator.
            let leftmost = leftmost_operand(&rhs);
            if ast::number_value(&leftmost).is_some() {
                self.push_scalar(node, &operator, &leftmost, has_bool, query)?;
            }
            return self.dispatch(&rhs, query);
        }

        let mut binary = BinaryQuery {
            operator: if has_bool {
                format!("{operator} bool")
            } else {
                operator
            },
            vector_matches_type: None,
            vector_matches: None,
            query: VisualQuery::default(),
        };
        if let Some(matching) = expr.matching() {
            binary.vector_matches_type = Some(if matching.is_ignoring() {
                VectorMatchType::Ignoring
            } else {
                VectorMatchType::On
            });
            binary.vector_matches = Some(label_names(matching.labels()).join(", "));
        }
        query.binary_queries.push(binary);

        let nested = query
            .binary_queries
            .last_mut()
            .map(|b| &mut b.query)
            .ok_or(TransformError::MissingChild("binary query"))?;
        self.dispatch(&rhs, nested)
    }

    fn push_scalar(
        &mut self,
        node: &SyntaxNode,
        operator: &str,
        literal: &SyntaxNode,
        has_bool: bool,
        query: &mut VisualQuery,
    ) -> Result<()> {
        let Some((id, comparison)) = operations::binary_scalar(operator) else {
            self.error_at(node);
            return Ok(());
        };
        let mut params = vec![OperationParam::Number(number(literal)?)];
        if comparison {
            params.push(OperationParam::Bool(has_bool));
        }
        query.operations.push(Operation::new(id, params));
        Ok(())
    }

    fn error_node(&mut self, node: &SyntaxNode) {
        if validate::is_interval_variable_error(node) {
            trace!("interval variable in range position");
            return;
        }
        self.error_at(node);
    }

    fn report_errors_in(&mut self, node: &SyntaxNode) {
        let errors: Vec<SyntaxNode> = node
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::Error)
            .collect();
        for error in errors {
            self.error_at(&error);
        }
    }

    /// Error carrying the node's own text.
    fn error_at(&mut self, node: &SyntaxNode) {
        let parent_type = node.parent().map(|p| format!("{:?}", p.kind()));
        self.push_error(self.read(node), node.text_range(), parent_type);
    }

    fn push_error(&mut self, text: String, range: TextRange, parent_type: Option<String>) {
        let from = self.substituted.to_original(range.start().into());
        let to = self.substituted.to_original(range.end().into());
        self.errors.push(ParsingError {
            text,
            from: Some(from),
            to: Some(to),
            parent_type,
        });
    }

    fn read(&self, node: &SyntaxNode) -> String {
        return_variables(&node.text().to_string())
    }
}

fn number(node: &SyntaxNode) -> Result<f64> {
    ast::number_value(node).ok_or_else(|| TransformError::InvalidNumber(node.text().to_string()))
}

fn label_names(labels: Option<GroupingLabels>) -> Vec<String> {
    labels
        .map(|l| l.names().map(|t| t.text().to_string()).collect())
        .unwrap_or_default()
}

/// Follows left operands down a chain of binary expressions.
fn leftmost_operand(node: &SyntaxNode) -> SyntaxNode {
    let mut current = node.clone();
    while let Some(lhs) = BinaryExpr::cast(current.clone()).and_then(|b| b.lhs()) {
        current = lhs;
    }
    current
}
