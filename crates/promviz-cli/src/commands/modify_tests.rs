use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use promviz_lib::QueryModification;

use super::CliError;
use super::modify::{ModifyAction, ModifyArgs, RulesFile, modification};
use super::query_loader::parse_json;

fn args(action: ModifyAction) -> ModifyArgs {
    ModifyArgs {
        query_path: None,
        query_text: Some("up".to_string()),
        action,
        key: None,
        value: None,
        rules: None,
    }
}

fn no_rules(_: &Path) -> super::Result<RulesFile> {
    panic!("rules must not be loaded")
}

fn rules(json: &str) -> IndexMap<String, String> {
    parse_json::<RulesFile>("rules.json", json)
        .unwrap()
        .into_mapping()
}

#[test]
fn filter_needs_key_and_value() {
    let err = modification(&args(ModifyAction::AddFilter), no_rules).unwrap_err();
    assert_eq!(err.to_string(), "add-filter requires --key");

    let mut with_key = args(ModifyAction::AddFilterOut);
    with_key.key = Some("job".to_string());
    let err = modification(&with_key, no_rules).unwrap_err();
    assert_eq!(err.to_string(), "add-filter-out requires --value");

    with_key.value = Some("api".to_string());
    assert_eq!(
        modification(&with_key, no_rules).unwrap(),
        QueryModification::AddFilterOut {
            key: "job".to_string(),
            value: "api".to_string(),
        }
    );
}

#[test]
fn wrapping_actions_need_nothing() {
    assert_eq!(
        modification(&args(ModifyAction::AddRate), no_rules).unwrap(),
        QueryModification::AddRate
    );
    assert_eq!(
        modification(&args(ModifyAction::AddHistogramQuantile), no_rules).unwrap(),
        QueryModification::AddHistogramQuantile
    );
}

#[test]
fn expand_rules_reads_the_rules_file() {
    let err = modification(&args(ModifyAction::ExpandRules), no_rules).unwrap_err();
    assert!(matches!(err, CliError::MissingOption { option: "rules", .. }));

    let mut expand = args(ModifyAction::ExpandRules);
    expand.rules = Some(PathBuf::from("rules.json"));
    let modification = modification(&expand, |path| {
        assert_eq!(path, Path::new("rules.json"));
        parse_json("rules.json", r#"{ "ALERTS": "foo" }"#)
    })
    .unwrap();

    let expected: IndexMap<String, String> = [("ALERTS".to_string(), "foo".to_string())]
        .into_iter()
        .collect();
    assert_eq!(modification, QueryModification::ExpandRules(expected));
}

#[test]
fn rules_file_shapes() {
    let mapping = rules(r#"{ "a:sum": "sum(a)" }"#);
    assert_eq!(mapping["a:sum"], "sum(a)");

    let groups = rules(
        r#"[{ "name": "g", "rules": [{ "name": "a:sum", "query": "sum(a)", "type": "recording" }] }]"#,
    );
    assert_eq!(groups["a:sum"], "sum(a)");

    let response = rules(
        r#"{
          "status": "success",
          "data": {
            "groups": [{
              "name": "g",
              "file": "rules.yml",
              "rules": [
                { "name": "a:sum", "query": "sum(a)", "type": "recording" },
                { "name": "Down", "query": "up == 0", "type": "alerting" }
              ]
            }]
          }
        }"#,
    );
    assert_eq!(response.len(), 1);
    assert_eq!(response["a:sum"], "sum(a)");
}

#[test]
fn malformed_rules_file_names_the_file() {
    let err = parse_json::<RulesFile>("rules.json", "[1, 2]").unwrap_err();
    assert!(err.to_string().starts_with("invalid JSON in 'rules.json'"));
}
