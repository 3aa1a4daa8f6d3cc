#![cfg(feature = "serde")]

use pathrule::{
    field, CompareOp, FieldPredicate, NodeKind, OutputField, RuleBuilder, RuleDescriptor,
};
use serde_json::json;

fn sample() -> RuleDescriptor {
    RuleBuilder::new("TempRule", "CONTINUE", vec![OutputField::new("SCORE", 1.5)])
        .unwrap()
        .with_and_constraints(vec![field("TEMPERATURE").lt(90_i64)])
        .with_in_constraints(vec![("INPUT1", vec![1_i64, 2])])
        .with_if_break("TEMPERATURE", CompareOp::Gte, 90_i64)
        .build(NodeKind::NonLeaf)
        .unwrap()
}

#[test]
fn json_exposes_resolved_status() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["name"], "TempRule");
    assert_eq!(json["node_kind"], "NonLeaf");
    assert_eq!(json["status"]["default_then"], "DONE");
    assert_eq!(json["status"]["break_match"], "CONTINUE");
    assert_eq!(json["rhs"]["output_fields"][0]["name"], "SCORE");
}

#[test]
fn json_round_trip_preserves_descriptor() {
    let rule = sample();
    let text = serde_json::to_string(&rule).unwrap();
    let back: RuleDescriptor = serde_json::from_str(&text).unwrap();
    assert_eq!(back, rule);
}

fn leaf_json() -> serde_json::Value {
    let rule = RuleBuilder::new("OutlookRule", "DONE", vec![])
        .unwrap()
        .with_and_constraints(vec![field("OUTLOOK").eq("sunny")])
        .with_not_in_constraints(vec![("INPUT2", vec![3_i64])])
        .build(NodeKind::Leaf)
        .unwrap();
    serde_json::to_value(rule).unwrap()
}

fn decode(json: serde_json::Value) -> Result<RuleDescriptor, String> {
    serde_json::from_value(json).map_err(|e| e.to_string())
}

#[test]
fn unedited_leaf_json_decodes() {
    assert!(decode(leaf_json()).is_ok());
}

#[test]
fn contradicting_status_is_rejected() {
    let mut json = leaf_json();
    json["status"]["default_then"] = serde_json::Value::Null;
    json["status"]["break_match"] = json!("CONTINUE");
    let err = decode(json).unwrap_err();
    assert!(err.contains("invalid status"), "{err}");
}

#[test]
fn empty_name_is_rejected() {
    let mut json = leaf_json();
    json["name"] = json!("");
    let err = decode(json).unwrap_err();
    assert!(err.contains("name is not set"), "{err}");
}

#[test]
fn ordering_on_bool_is_rejected() {
    let mut json = leaf_json();
    json["and_constraints"]["predicates"][0] =
        json!({"field": "FLAG", "op": "Gt", "value": {"Bool": true}});
    let err = decode(json).unwrap_err();
    assert!(err.contains("boolean"), "{err}");
}

#[test]
fn empty_predicate_field_is_rejected() {
    let forged = json!({"field": "", "op": "Eq", "value": {"Int": 1}});
    let err = serde_json::from_value::<FieldPredicate>(forged).unwrap_err();
    assert!(err.to_string().contains("field name is empty"));
}

#[test]
fn group_in_wrong_slot_is_rejected() {
    let mut json = leaf_json();
    json["and_constraints"]["kind"] = json!("AnyOf");
    let err = decode(json).unwrap_err();
    assert!(err.contains("invalid AND constraint"), "{err}");
}

#[test]
fn membership_without_values_is_rejected() {
    let mut json = leaf_json();
    json["not_in_constraints"]["entries"][0]["values"] = json!([]);
    let err = decode(json).unwrap_err();
    assert!(err.contains("has no values"), "{err}");
}

#[test]
fn predicate_kind_in_membership_slot_is_rejected() {
    let mut json = leaf_json();
    json["not_in_constraints"]["kind"] = json!("AllOf");
    assert!(decode(json).is_err());
}
