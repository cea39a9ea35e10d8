use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{AGGREGATE_MODIFIERS, ARG_RECOVERY, EXPR_FIRST};

const AGGREGATION_OPS: &[&str] = &[
    "sum",
    "avg",
    "count",
    "min",
    "max",
    "group",
    "stddev",
    "stdvar",
    "topk",
    "bottomk",
    "quantile",
    "count_values",
    "limitk",
    "limit_ratio",
];

/// Whether `name` is an aggregation operator rather than a plain function.
pub fn is_aggregation_op(name: &str) -> bool {
    AGGREGATION_OPS.contains(&name)
}

impl Parser<'_> {
    /// `name(args...)`
    pub(super) fn parse_function_call(&mut self) {
        self.start_node(SyntaxKind::FunctionCall);
        self.assert_current(SyntaxKind::Ident);
        self.bump_as(SyntaxKind::FunctionIdentifier);
        self.parse_call_body();
        self.finish_node();
    }

    /// `op [by|without (labels)] (args...) [by|without (labels)]`
    pub(super) fn parse_aggregate_expr(&mut self) {
        self.start_node(SyntaxKind::AggregateExpr);
        self.bump_as(SyntaxKind::AggregateOp);

        let leading_modifier = self.currently_is_one_of(AGGREGATE_MODIFIERS);
        if leading_modifier {
            self.parse_aggregate_modifier();
        }

        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_call_body();
        } else {
            self.missing(
                DiagnosticKind::ExpectedCallBody,
                "aggregation needs a parenthesized body",
            );
        }

        if !leading_modifier && self.currently_is_one_of(AGGREGATE_MODIFIERS) {
            self.parse_aggregate_modifier();
        }

        self.finish_node();
    }

    fn parse_call_body(&mut self) {
        self.start_node(SyntaxKind::FunctionCallBody);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        while !self.currently_is(SyntaxKind::ParenClose) && !self.should_stop() {
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr();
            } else {
                self.error_recover(
                    DiagnosticKind::ExpectedExpression,
                    "function argument",
                    ARG_RECOVERY,
                );
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.expect_closing(SyntaxKind::ParenClose);
        self.finish_node();
    }
}
