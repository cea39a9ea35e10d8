//! Grouping clauses: `by`/`without` on aggregations, `bool`, `on`/`ignoring` and
//! `group_left`/`group_right` on binary operators.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{
    AGGREGATE_MODIFIERS, ARG_RECOVERY, GROUP_MODIFIERS, LABEL_NAMES, MATCHING_MODIFIERS,
};

impl Parser<'_> {
    pub(super) fn parse_aggregate_modifier(&mut self) {
        self.start_node(SyntaxKind::AggregateModifier);
        self.assert_current_in(AGGREGATE_MODIFIERS);
        self.bump();
        self.parse_grouping_labels();
        self.finish_node();
    }

    pub(super) fn parse_binary_modifiers(&mut self) {
        if self.currently_is(SyntaxKind::KwBool) {
            self.bump_as(SyntaxKind::BoolModifier);
        }

        if !self.currently_is_one_of(MATCHING_MODIFIERS) {
            return;
        }

        self.start_node(SyntaxKind::MatchingModifier);
        self.bump();
        self.parse_grouping_labels();
        if self.currently_is_one_of(GROUP_MODIFIERS) {
            self.start_node(SyntaxKind::GroupModifier);
            self.bump();
            if self.currently_is(SyntaxKind::ParenOpen) {
                self.parse_grouping_labels();
            }
            self.finish_node();
        }
        self.finish_node();
    }

    /// `(label, label, ...)`
    fn parse_grouping_labels(&mut self) {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.missing(
                DiagnosticKind::ExpectedLabelList,
                "expected `(` with label names",
            );
            return;
        }

        self.start_node(SyntaxKind::GroupingLabels);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        while !self.currently_is(SyntaxKind::ParenClose) && !self.should_stop() {
            if self.currently_is_one_of(LABEL_NAMES) {
                self.bump_as(SyntaxKind::LabelName);
            } else {
                self.error_recover(
                    DiagnosticKind::ExpectedLabelName,
                    "in grouping label list",
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
