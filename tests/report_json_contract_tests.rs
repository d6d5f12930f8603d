use canvas_rules::canvas::{CanvasComponent, ParameterDefinition};
use canvas_rules::core::ValueKind;
use canvas_rules::validation::{
    Operator, Rule, RuleContext, VALIDATION_REPORT_JSON_SCHEMA_V1, ValidationReport,
};

fn failed_report() -> ValidationReport {
    let mut target = CanvasComponent::new("Limits");
    target
        .define("max", ParameterDefinition::new(ValueKind::Int, 2))
        .define("min", ParameterDefinition::new(ValueKind::Int, 10));
    Rule::new(&RuleContext::default(), &target, "max")
        .expect("known attribute")
        .with_a("max")
        .with_b("min")
        .with_operator(Operator::IsGreater)
        .check(&target)
        .expect("configured rule")
}

#[test]
fn report_contract_v1_carries_schema_version() {
    let json = failed_report()
        .to_json_contract_v1_pretty()
        .expect("serialize contract");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(VALIDATION_REPORT_JSON_SCHEMA_V1)
    );
    assert_eq!(value["report"]["valid"], serde_json::json!(false));
    assert_eq!(
        value["report"]["failures"][0]["kind"],
        serde_json::json!("unsatisfied")
    );
}

#[test]
fn compat_parser_accepts_bare_and_versioned_payloads() {
    let report = failed_report();
    let bare = report.to_json_pretty().expect("serialize report");
    let versioned = report
        .to_json_contract_v1_pretty()
        .expect("serialize contract");

    assert_eq!(
        ValidationReport::from_json_compat_str(&bare).expect("bare payload"),
        report
    );
    assert_eq!(
        ValidationReport::from_json_compat_str(&versioned).expect("versioned payload"),
        report
    );
}

#[test]
fn compat_parser_rejects_unknown_schema_version() {
    let payload = r#"{"schema_version": 2, "report": {"valid": true, "failures": []}}"#;
    let err = ValidationReport::from_json_compat_str(payload).expect_err("unsupported version");
    assert!(format!("{err}").contains("schema version"));
}

#[test]
fn compat_parser_rejects_valid_flag_that_disagrees_with_failures() {
    let payload = r#"{
        "valid": true,
        "failures": [{
            "rule_name": "Limits_max_rule_#_0",
            "operands": ["2", "10"],
            "operator": "is-greater",
            "message": "2 must be greater than 10",
            "kind": "unsatisfied"
        }]
    }"#;
    let err = ValidationReport::from_json_compat_str(payload).expect_err("inconsistent report");
    assert!(format!("{err}").contains("carries 1 failures"), "{err}");

    let versioned = format!(r#"{{"schema_version": 1, "report": {payload}}}"#);
    assert!(ValidationReport::from_json_compat_str(&versioned).is_err());

    let empty_but_invalid = r#"{"valid": false, "failures": []}"#;
    assert!(ValidationReport::from_json_compat_str(empty_but_invalid).is_err());
}

#[test]
fn parsed_reports_keep_valid_in_step_with_failures() {
    let json = failed_report().to_json_pretty().expect("serialize report");
    let report = ValidationReport::from_json_compat_str(&json).expect("consistent report");
    assert_eq!(report.is_valid(), report.failures().is_empty());
    assert_eq!(ValidationReport::default(), ValidationReport::passed());
}
