use rowan::Checkpoint;

use super::calls::is_aggregation_op;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{DURATIONS, EXPR_FIRST, RANGE_RECOVERY, UNARY_OPS};

/// Operand of a unary sign: binds `^` but nothing looser.
const UNARY_OPERAND_BP: u8 = 11;

/// Left and right binding power of an infix operator.
/// `^` is the only right-associative operator (left > right).
fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    use SyntaxKind::*;
    let bp = match kind {
        KwOr => (1, 2),
        KwAnd | KwUnless => (3, 4),
        EqualEqual | NotEqual | Less | LessEqual | Greater | GreaterEqual => (5, 6),
        Plus | Minus => (7, 8),
        Star | Slash | Percent | KwAtan2 => (9, 10),
        Caret => (12, 11),
        _ => return None,
    };
    Some(bp)
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) {
        self.parse_binary_expr(0);
    }

    fn parse_binary_expr(&mut self, min_bp: u8) {
        if !self.enter_recursion() {
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_unary_expr();

        loop {
            let Some((left_bp, right_bp)) = infix_binding_power(self.current()) else {
                break;
            };
            if left_bp < min_bp || self.should_stop() {
                break;
            }

            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.bump(); // operator
            self.parse_binary_modifiers();
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_binary_expr(right_bp);
            } else {
                self.missing(
                    DiagnosticKind::ExpectedExpression,
                    "right operand of binary operator",
                );
            }
            self.finish_node();
        }

        self.exit_recursion();
    }

    fn parse_unary_expr(&mut self) {
        if !self.currently_is_one_of(UNARY_OPS) {
            self.parse_postfix_expr();
            return;
        }

        self.start_node(SyntaxKind::UnaryExpr);
        self.bump();
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_binary_expr(UNARY_OPERAND_BP);
        } else {
            self.missing(DiagnosticKind::ExpectedExpression, "operand of unary sign");
        }
        self.finish_node();
    }

    fn parse_postfix_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary_expr();

        loop {
            match self.current() {
                SyntaxKind::BracketOpen => {
                    if !self.parse_range_suffix(checkpoint) {
                        break;
                    }
                }
                SyntaxKind::KwOffset => self.parse_offset_modifier(checkpoint),
                SyntaxKind::At => self.parse_at_modifier(checkpoint),
                _ => break,
            }
        }
    }

    fn parse_primary_expr(&mut self) {
        match self.current() {
            SyntaxKind::Number => self.bump_as(SyntaxKind::NumberLiteral),
            SyntaxKind::Duration => self.bump_as(SyntaxKind::DurationLiteral),
            SyntaxKind::Str => self.bump_as(SyntaxKind::StringLiteral),
            SyntaxKind::ParenOpen => self.parse_paren_expr(),
            SyntaxKind::BraceOpen => self.parse_vector_selector(),
            SyntaxKind::Ident => {
                let is_call = self.next_is(SyntaxKind::ParenOpen);
                let is_grouped =
                    self.next_is(SyntaxKind::KwBy) || self.next_is(SyntaxKind::KwWithout);
                if is_aggregation_op(self.current_text()) && (is_call || is_grouped) {
                    self.parse_aggregate_expr();
                } else if is_call {
                    self.parse_function_call();
                } else {
                    self.parse_vector_selector();
                }
            }
            _ => self.error_and_bump_msg(
                DiagnosticKind::ExpectedExpression,
                "not the start of an expression",
            ),
        }
    }

    fn parse_paren_expr(&mut self) {
        self.start_node(SyntaxKind::ParenExpr);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        } else {
            self.missing(DiagnosticKind::ExpectedExpression, "inside parentheses");
        }
        self.expect_closing(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// `[5m]` → `MatrixSelector`, `[5m:1m]` / `[5m:]` → `SubqueryExpr`.
    ///
    /// Brackets that do not open with a duration become an `Error` sibling of the
    /// preceding expression instead of wrapping it; returns `false` in that case.
    fn parse_range_suffix(&mut self, checkpoint: Checkpoint) -> bool {
        if !DURATIONS.contains(self.peek_nth(1)) {
            self.parse_invalid_range();
            return false;
        }

        let kind = if self.peek_nth(2) == SyntaxKind::Colon {
            SyntaxKind::SubqueryExpr
        } else {
            SyntaxKind::MatrixSelector
        };

        self.start_node_at(checkpoint, kind);
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump();
        self.bump_as(SyntaxKind::DurationLiteral);
        if self.eat_token(SyntaxKind::Colon) && self.currently_is_one_of(DURATIONS) {
            self.bump_as(SyntaxKind::DurationLiteral);
        }
        self.expect_closing(SyntaxKind::BracketClose);
        self.finish_node();
        true
    }

    fn parse_invalid_range(&mut self) {
        self.start_node(SyntaxKind::Error);
        self.error_msg(
            DiagnosticKind::ExpectedDuration,
            "range selector needs a duration such as `5m`",
        );
        self.bump(); // '['
        while !self.currently_is_one_of(RANGE_RECOVERY) && !self.should_stop() {
            self.bump();
        }
        self.eat_token(SyntaxKind::BracketClose);
        self.finish_node();
    }

    fn parse_offset_modifier(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::OffsetExpr);
        self.bump(); // 'offset'
        self.eat_token(SyntaxKind::Minus);
        if self.currently_is_one_of(DURATIONS) {
            self.bump_as(SyntaxKind::DurationLiteral);
        } else {
            self.missing(DiagnosticKind::ExpectedDuration, "after `offset`");
        }
        self.finish_node();
    }

    /// `@ 1609746000`, `@ start()`, `@ end()`
    fn parse_at_modifier(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::AtModifier);
        self.bump(); // '@'
        if self.currently_is_one_of(UNARY_OPS) {
            self.bump();
        }
        match self.current() {
            SyntaxKind::Number => self.bump_as(SyntaxKind::NumberLiteral),
            SyntaxKind::Ident if self.next_is(SyntaxKind::ParenOpen) => {
                self.bump();
                self.push_delimiter(SyntaxKind::ParenOpen);
                self.bump();
                self.expect_closing(SyntaxKind::ParenClose);
            }
            _ => self.missing(
                DiagnosticKind::ExpectedTimestamp,
                "after `@`; use a unix timestamp, `start()` or `end()`",
            ),
        }
        self.finish_node();
    }
}
