//! Grammar productions for PromQL.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Binary operators use precedence climbing; `[range]`, `offset` and `@` modifiers
//! retroactively wrap the expression before them through checkpoints.

mod calls;
mod expressions;
mod modifiers;
mod selectors;

pub use calls::is_aggregation_op;

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{EXPR_FIRST, ROOT_RECOVERY};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        // Not `start_node`: leading trivia must land inside the root.
        self.builder.start_node(SyntaxKind::Root.into());

        let mut seen_expr = false;
        while !self.at_end() {
            if !self.currently_is_one_of(EXPR_FIRST) {
                self.error_recover(
                    DiagnosticKind::UnexpectedToken,
                    "not the start of an expression",
                    ROOT_RECOVERY,
                );
                continue;
            }

            if !seen_expr {
                self.parse_expr();
                seen_expr = true;
                continue;
            }

            // A query holds one expression; later ones are kept but flagged.
            let checkpoint = self.checkpoint();
            self.error_msg(
                DiagnosticKind::UnexpectedExpression,
                "a query holds a single expression",
            );
            self.parse_expr();
            self.start_node_at(checkpoint, SyntaxKind::Error);
            self.finish_node();
        }

        self.eat_trivia();
        self.finish_node();
    }
}
