use super::*;
use crate::{test_fixtures::PERSON_MODEL, value::Value};

#[test]
fn sorted_numeric_kinds_are_exactly_the_numeric_ones() {
    let numeric = [
        AttributeKind::Counter,
        AttributeKind::Date,
        AttributeKind::DateTime,
        AttributeKind::Float,
        AttributeKind::Int,
    ];
    for kind in numeric {
        assert!(kind.is_sorted_numeric(), "{kind:?} should be sorted-numeric");
    }

    assert!(!AttributeKind::Text.is_sorted_numeric());
    assert!(!AttributeKind::Bool.is_sorted_numeric());
}

#[test]
fn entity_model_lookups() {
    assert!(PERSON_MODEL.is_indexed("age"));
    assert!(PERSON_MODEL.is_indexed("city"));
    assert!(!PERSON_MODEL.is_indexed("nickname"));

    let age = PERSON_MODEL.attribute("age").expect("age attribute");
    assert_eq!(age.kind, AttributeKind::Int);
    assert!(PERSON_MODEL.attribute("missing").is_none());
}

#[test]
fn typecast_for_storage_renders_canonical_strings() {
    let text = AttributeModel::new("city", AttributeKind::Text);
    assert_eq!(text.typecast_for_storage(&Value::from("NYC")).unwrap(), "NYC");
    assert_eq!(text.typecast_for_storage(&Value::Int(7)).unwrap(), "7");

    let flag = AttributeModel::new("active", AttributeKind::Bool);
    assert_eq!(flag.typecast_for_storage(&Value::Bool(true)).unwrap(), "1");
    assert_eq!(flag.typecast_for_storage(&Value::Int(0)).unwrap(), "0");
    assert!(flag.typecast_for_storage(&Value::Int(2)).is_err());

    let int = AttributeModel::new("age", AttributeKind::Int);
    assert_eq!(int.typecast_for_storage(&Value::Int(30)).unwrap(), "30");
    assert_eq!(int.typecast_for_storage(&Value::from(" 42 ")).unwrap(), "42");
    assert!(int.typecast_for_storage(&Value::Float(1.5)).is_err());

    let float = AttributeModel::new("score", AttributeKind::Float);
    assert_eq!(float.typecast_for_storage(&Value::Float(2.5)).unwrap(), "2.5");
    assert_eq!(float.typecast_for_storage(&Value::Int(3)).unwrap(), "3");
    assert!(float.typecast_for_storage(&Value::Float(f64::NAN)).is_err());

    let born = AttributeModel::new("born", AttributeKind::DateTime);
    assert_eq!(
        born.typecast_for_storage(&Value::Timestamp(1_700_000_000))
            .unwrap(),
        "1700000000"
    );
}

#[test]
fn typecast_for_score_parses_storage_form() {
    let float = AttributeModel::new("score", AttributeKind::Float);
    let score = float.typecast_for_score(&Value::from("12.25")).unwrap();
    assert!((score - 12.25).abs() < f64::EPSILON);

    let date = AttributeModel::new("joined", AttributeKind::Date);
    let score = date.typecast_for_score(&Value::Date(19_000)).unwrap();
    assert!((score - 19_000.0).abs() < f64::EPSILON);
}

#[test]
fn typecast_error_names_attribute_and_value() {
    let int = AttributeModel::new("age", AttributeKind::Int);
    let err = int
        .typecast_for_storage(&Value::from("old"))
        .expect_err("text should not typecast to int");

    assert_eq!(err.attribute, "age");
    assert_eq!(err.value, Value::from("old"));
    let message = err.to_string();
    assert!(message.contains("'age'"), "message: {message}");
    assert!(message.contains("'old'"), "message: {message}");
}

#[test]
fn entity_id_conversions() {
    assert_eq!(EntityId::from(7_u64).as_str(), "7");
    assert_eq!(EntityId::from("abc").to_string(), "abc");
    assert_eq!(EntityId::new(String::from("x")).into_inner(), "x");
}
