mod grammar_tests;

use super::{Parse, parse};

#[track_caller]
fn parse_ok(src: &str) -> (Parse, crate::Diagnostics) {
    parse(src).expect("parse within limits")
}

/// CST dump of input that must parse without diagnostics.
#[track_caller]
fn expect_valid_cst(src: &str) -> String {
    let (parse, diagnostics) = parse_ok(src);
    if !diagnostics.is_empty() {
        panic!(
            "Expected valid query, got error:\n{}",
            diagnostics.render(src)
        );
    }
    parse.printer().dump()
}

/// CST dump of input that must produce diagnostics.
#[track_caller]
fn expect_invalid_cst(src: &str) -> String {
    let (parse, diagnostics) = parse_ok(src);
    if diagnostics.is_empty() {
        panic!("Expected invalid query, got valid:\n{}", parse.printer().dump());
    }
    parse.printer().dump()
}

/// One line per diagnostic.
#[track_caller]
fn expect_diagnostics(src: &str) -> String {
    let (_, diagnostics) = parse_ok(src);
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
