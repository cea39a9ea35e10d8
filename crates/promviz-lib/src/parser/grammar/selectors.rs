use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{LABEL_NAMES, MATCH_OPS, MATCHER_RECOVERY};

impl Parser<'_> {
    /// `metric`, `metric{...}` or `{...}`
    pub(super) fn parse_vector_selector(&mut self) {
        self.start_node(SyntaxKind::VectorSelector);
        if self.currently_is(SyntaxKind::Ident) {
            self.bump_as(SyntaxKind::Identifier);
        }
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.parse_label_matchers();
        }
        self.finish_node();
    }

    fn parse_label_matchers(&mut self) {
        self.start_node(SyntaxKind::LabelMatchers);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump();

        while !self.currently_is(SyntaxKind::BraceClose) && !self.should_stop() {
            if self.currently_is_one_of(LABEL_NAMES) {
                self.parse_label_matcher();
            } else {
                self.error_recover(
                    DiagnosticKind::ExpectedLabelName,
                    "in label matcher list",
                    MATCHER_RECOVERY,
                );
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.expect_closing(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// `label <op> "value"`. A bad value is left in the token stream for the caller.
    fn parse_label_matcher(&mut self) {
        self.start_node(SyntaxKind::LabelMatcher);
        self.bump_as(SyntaxKind::LabelName);

        if self.currently_is_one_of(MATCH_OPS) {
            self.bump();
        } else {
            self.missing(
                DiagnosticKind::ExpectedMatchOperator,
                "use one of `=`, `!=`, `=~`, `!~`",
            );
        }

        if self.currently_is(SyntaxKind::Str) {
            self.bump_as(SyntaxKind::StringLiteral);
        } else {
            self.missing(
                DiagnosticKind::ExpectedLabelValue,
                "label value must be a quoted string",
            );
        }

        self.finish_node();
    }
}
