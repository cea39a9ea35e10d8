use indoc::indoc;

use super::{expect_valid_cst, parse_ok};

#[test]
fn bare_metric() {
    insta::assert_snapshot!(expect_valid_cst("up"), @r#"
    Root
      VectorSelector
        Identifier
          Ident "up"
    "#);
}

#[test]
fn selector_with_matchers() {
    let res = expect_valid_cst(r#"http_requests_total{job="api", code=~"5.."}"#);

    insta::assert_snapshot!(res, @r#"
    Root
      VectorSelector
        Identifier
          Ident "http_requests_total"
        LabelMatchers
          BraceOpen "{"
          LabelMatcher
            LabelName
              Ident "job"
            Equals "="
            StringLiteral
              Str "\"api\""
          Comma ","
          LabelMatcher
            LabelName
              Ident "code"
            RegexMatch "=~"
            StringLiteral
              Str "\"5..\""
          BraceClose "}"
    "#);
}

#[test]
fn keyword_as_label_name() {
    insta::assert_snapshot!(expect_valid_cst(r#"{on="x"}"#), @r#"
    Root
      VectorSelector
        LabelMatchers
          BraceOpen "{"
          LabelMatcher
            LabelName
              KwOn "on"
            Equals "="
            StringLiteral
              Str "\"x\""
          BraceClose "}"
    "#);
}

#[test]
fn aggregation_with_leading_modifier() {
    let res = expect_valid_cst("sum by (job) (rate(x[5m]))");

    insta::assert_snapshot!(res, @r#"
    Root
      AggregateExpr
        AggregateOp
          Ident "sum"
        AggregateModifier
          KwBy "by"
          GroupingLabels
            ParenOpen "("
            LabelName
              Ident "job"
            ParenClose ")"
        FunctionCallBody
          ParenOpen "("
          FunctionCall
            FunctionIdentifier
              Ident "rate"
            FunctionCallBody
              ParenOpen "("
              MatrixSelector
                VectorSelector
                  Identifier
                    Ident "x"
                BracketOpen "["
                DurationLiteral
                  Duration "5m"
                BracketClose "]"
              ParenClose ")"
          ParenClose ")"
    "#);
}

#[test]
fn aggregation_with_trailing_modifier_and_param() {
    let res = expect_valid_cst("topk(5, x) without (pod)");

    insta::assert_snapshot!(res, @r#"
    Root
      AggregateExpr
        AggregateOp
          Ident "topk"
        FunctionCallBody
          ParenOpen "("
          NumberLiteral
            Number "5"
          Comma ","
          VectorSelector
            Identifier
              Ident "x"
          ParenClose ")"
        AggregateModifier
          KwWithout "without"
          GroupingLabels
            ParenOpen "("
            LabelName
              Ident "pod"
            ParenClose ")"
    "#);
}

#[test]
fn aggregation_name_without_call_is_a_metric() {
    insta::assert_snapshot!(expect_valid_cst("count"), @r#"
    Root
      VectorSelector
        Identifier
          Ident "count"
    "#);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    insta::assert_snapshot!(expect_valid_cst("a + b * c"), @r#"
    Root
      BinaryExpr
        VectorSelector
          Identifier
            Ident "a"
        Plus "+"
        BinaryExpr
          VectorSelector
            Identifier
              Ident "b"
          Star "*"
          VectorSelector
            Identifier
              Ident "c"
    "#);
}

#[test]
fn subtraction_is_left_associative() {
    insta::assert_snapshot!(expect_valid_cst("a - 1 - 2"), @r#"
    Root
      BinaryExpr
        BinaryExpr
          VectorSelector
            Identifier
              Ident "a"
          Minus "-"
          NumberLiteral
            Number "1"
        Minus "-"
        NumberLiteral
          Number "2"
    "#);
}

#[test]
fn power_is_right_associative() {
    insta::assert_snapshot!(expect_valid_cst("2 ^ 3 ^ 2"), @r#"
    Root
      BinaryExpr
        NumberLiteral
          Number "2"
        Caret "^"
        BinaryExpr
          NumberLiteral
            Number "3"
          Caret "^"
          NumberLiteral
            Number "2"
    "#);
}

#[test]
fn unary_minus_binds_looser_than_power() {
    insta::assert_snapshot!(expect_valid_cst("-a ^ 2"), @r#"
    Root
      UnaryExpr
        Minus "-"
        BinaryExpr
          VectorSelector
            Identifier
              Ident "a"
          Caret "^"
          NumberLiteral
            Number "2"
    "#);
}

#[test]
fn comparison_with_bool_and_matching() {
    let res = expect_valid_cst("a > bool ignoring(instance) b");

    insta::assert_snapshot!(res, @r#"
    Root
      BinaryExpr
        VectorSelector
          Identifier
            Ident "a"
        Greater ">"
        BoolModifier
          KwBool "bool"
        MatchingModifier
          KwIgnoring "ignoring"
          GroupingLabels
            ParenOpen "("
            LabelName
              Ident "instance"
            ParenClose ")"
        VectorSelector
          Identifier
            Ident "b"
    "#);
}

#[test]
fn group_left_with_labels() {
    let res = expect_valid_cst("a * on(job) group_left(team) b");

    insta::assert_snapshot!(res, @r#"
    Root
      BinaryExpr
        VectorSelector
          Identifier
            Ident "a"
        Star "*"
        MatchingModifier
          KwOn "on"
          GroupingLabels
            ParenOpen "("
            LabelName
              Ident "job"
            ParenClose ")"
          GroupModifier
            KwGroupLeft "group_left"
            GroupingLabels
              ParenOpen "("
              LabelName
                Ident "team"
              ParenClose ")"
        VectorSelector
          Identifier
            Ident "b"
    "#);
}

#[test]
fn subquery_with_offset() {
    insta::assert_snapshot!(expect_valid_cst("x[5m:1m] offset 1h"), @r#"
    Root
      OffsetExpr
        SubqueryExpr
          VectorSelector
            Identifier
              Ident "x"
          BracketOpen "["
          DurationLiteral
            Duration "5m"
          Colon ":"
          DurationLiteral
            Duration "1m"
          BracketClose "]"
        KwOffset "offset"
        DurationLiteral
          Duration "1h"
    "#);
}

#[test]
fn at_modifier_with_function() {
    insta::assert_snapshot!(expect_valid_cst("x @ end()"), @r#"
    Root
      AtModifier
        VectorSelector
          Identifier
            Ident "x"
        At "@"
        Ident "end"
        ParenOpen "("
        ParenClose ")"
    "#);
}

#[test]
fn parenthesized_expression() {
    insta::assert_snapshot!(expect_valid_cst("(a or b)"), @r#"
    Root
      ParenExpr
        ParenOpen "("
        BinaryExpr
          VectorSelector
            Identifier
              Ident "a"
          KwOr "or"
          VectorSelector
            Identifier
              Ident "b"
        ParenClose ")"
    "#);
}

#[test]
fn trivia_and_spans() {
    let input = indoc! {r#"
    up # all targets
    "#};

    let (parse, diagnostics) = parse_ok(input);
    assert!(diagnostics.is_empty());

    let res = parse.printer().with_trivia(true).with_spans(true).dump();
    insta::assert_snapshot!(res, @r##"
    Root [0..17]
      VectorSelector [0..2]
        Identifier [0..2]
          Ident [0..2] "up"
      Whitespace [2..3] " "
      LineComment [3..16] "# all targets"
      Whitespace [16..17] "\n"
    "##);
}

#[test]
fn selectors_are_found_in_document_order() {
    let (parse, _) = parse_ok(r#"sum(a{x="1"}) / on(job) b"#);

    let names: Vec<String> = parse
        .root()
        .selectors()
        .iter()
        .filter_map(|s| s.metric_name())
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(names, ["a", "b"]);
}
