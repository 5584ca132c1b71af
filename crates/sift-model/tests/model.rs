//! Tests for sift-model types.

use sift_model::{
    AgeRange, CompoundLogic, ConditionalGate, ExclusionRule, GlobalConfig, ModelError, Operator,
    StratificationRequest,
};

#[test]
fn rule_deserializes_with_defaults_and_aliases() {
    let json = r#"{
        "columns": "Hemo.OBSSV; Hemo.OBSSB",
        "primary": { "operator": "Not equal to", "operand": "empty" }
    }"#;
    let rule: ExclusionRule = serde_json::from_str(json).expect("deserialize rule");

    assert!(rule.enabled);
    assert_eq!(rule.columns.len(), 2);
    assert_eq!(rule.primary.operator, Operator::Neq);
    assert!(rule.compound.is_none());
    assert!(rule.gate.is_none());
}

#[test]
fn rule_with_compound_and_gate_round_trips() {
    let rule = ExclusionRule::on("TSH.TSH", Operator::Gt, "10")
        .unwrap()
        .with_compound(CompoundLogic::Or, Operator::Lt, "0,01")
        .with_gate(
            ConditionalGate::age(AgeRange::pair(Operator::Gte, "18", Operator::Lte, "65"))
                .with_category("F"),
        );

    let json = serde_json::to_string(&rule).expect("serialize rule");
    let round: ExclusionRule = serde_json::from_str(&json).expect("deserialize rule");
    assert_eq!(round, rule);
}

#[test]
fn unknown_operator_is_rejected_at_the_boundary() {
    let json = r#"{ "columns": "Idade", "primary": { "operator": "~", "operand": "75" } }"#;
    let err = serde_json::from_str::<ExclusionRule>(json).unwrap_err();
    assert!(err.to_string().contains("unknown operator '~'"));
}

#[test]
fn empty_column_spec_is_rejected_at_the_boundary() {
    let json = r#"{ "columns": " ; ", "primary": { "operator": ">", "operand": "75" } }"#;
    let err = serde_json::from_str::<ExclusionRule>(json).unwrap_err();
    assert!(err.to_string().contains(&ModelError::EmptyColumnSpec.to_string()));
}

#[test]
fn simple_rule_serializes_to_symbols() {
    let rule = ExclusionRule::on("Idade", Operator::Gt, "75").unwrap();
    insta::assert_json_snapshot!(rule, @r#"
    {
      "enabled": true,
      "columns": "Idade",
      "primary": {
        "operator": ">",
        "operand": "75"
      },
      "compound": null,
      "gate": null
    }
    "#);
}

#[test]
fn stratification_request_deserializes() {
    let json = r#"{
        "age_rules": [
            { "first": { "operator": ">=", "value": "0" }, "second": { "operator": "<", "value": "18" } },
            { "first": { "operator": ">", "value": "75" } }
        ],
        "category_rules": [ { "value": "Male" }, { "value": "Female" } ]
    }"#;
    let request: StratificationRequest = serde_json::from_str(json).expect("deserialize request");

    assert_eq!(request.age_rules.len(), 2);
    assert_eq!(request.age_rules[1].second, None);
    assert_eq!(request.planned_strata(), 4);
}

#[test]
fn global_config_deserializes() {
    let json = r#"{ "age_column": "Idade", "category_column": "Sexo" }"#;
    let config: GlobalConfig = serde_json::from_str(json).expect("deserialize config");
    assert_eq!(config, GlobalConfig::new("Idade", "Sexo"));
}
