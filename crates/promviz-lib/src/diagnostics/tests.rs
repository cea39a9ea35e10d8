use rowan::TextRange;

use super::*;

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::ExpectedLabelValue,
            TextRange::new(0.into(), 5.into()),
        )
        .emit();

    assert_eq!(diagnostics.len(), 1);
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "expected label value");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::ExpectedLabelValue,
            TextRange::new(0.into(), 5.into()),
        )
        .message("label value must be a quoted string")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    insta::assert_snapshot!(diag.message(), @"expected label value: label value must be a quoted string");
}

#[test]
fn unsupported_construct_keeps_text_verbatim() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UnsupportedConstruct,
            TextRange::new(8.into(), 68.into()),
        )
        .message("Query parsing is ambiguous.")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "Query parsing is ambiguous.");
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UnclosedParen,
            TextRange::new(0.into(), 5.into()),
        )
        .message("primary")
        .related_to("related info", TextRange::new(6.into(), 10.into()))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
      | |
      | missing closing `)`; primary
    ");
}

#[test]
fn display_lists_related_ranges() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, TextRange::empty(9.into()))
        .related_to("label matchers opened here", TextRange::new(2.into(), 3.into()))
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    insta::assert_snapshot!(diag.to_string(), @"error at 9..9: missing closing `}` (related: label matchers opened here at 2..3)");
}

#[test]
fn extend_merges_collections() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::UnexpectedToken, TextRange::empty(0.into()))
        .emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::ExpectedDuration, TextRange::empty(1.into()))
        .emit();

    a.extend(b);
    assert_eq!(a.len(), 2);
    assert!(!a.is_empty());
}
