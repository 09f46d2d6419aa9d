//! Additional tests to improve code coverage.

use recordkit::{
    equals, get_field, insert_field, match_all, match_any, not_equals, remove_field, test,
    to_mapping_mut, ContainsOptions, Dir, Key, Missing, Number, Operator, Path, Pick,
    RecordError, RecordShape, RenumberOptions, SortOptions, Value,
};
use serde_json::json;

// ============================================================================
// Value coverage
// ============================================================================

#[test]
fn value_is_checks() {
    assert!(Value::Null.is_null());
    assert!(Value::from(vec![1]).is_list());
    assert!(Value::from(json!({"a": 1})).is_map());
    assert!(Value::Int(1).is_int());
    assert!(!Value::Bool(true).is_int());
    assert!(Value::default().is_null());
}

#[test]
fn value_as_extractors() {
    assert_eq!(Value::from("hello").as_str(), Some("hello"));
    assert_eq!(Value::from("hello").as_i64(), None);
    assert_eq!(Value::Int(42).as_i64(), Some(42));
    assert_eq!(Value::Float(4.5).as_f64(), Some(4.5));
    assert_eq!(Value::Bool(false).as_bool(), Some(false));
    assert_eq!(Value::from(vec![1, 2]).as_list().map(<[Value]>::len), Some(2));
    assert!(Value::Null.as_map().is_none());

    assert_eq!(Value::Bool(true).as_number(), Some(Number::I64(1)));
    assert_eq!(Value::Float(2.5).as_number(), Some(Number::F64(2.5)));
    assert_eq!(Value::from("2").as_number(), None);
}

#[test]
fn value_conversions() {
    assert_eq!(Value::from(Some(3)), Value::Int(3));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(7usize), Value::Int(7));
    assert_eq!(Value::from(1.5f32), Value::Float(1.5));
    assert_eq!(Value::from(String::from("x")), Value::from("x"));
    assert_eq!(Value::from(["a", "b"]), Value::from(vec!["a", "b"]));
}

#[test]
fn value_type_names() {
    assert_eq!(Value::Null.type_name(), "NoneType");
    assert_eq!(Value::Bool(true).type_name(), "bool");
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::Float(1.0).type_name(), "float");
    assert_eq!(Value::from("s").type_name(), "str");
    assert_eq!(Value::from(vec![1]).type_name(), "list");
    assert_eq!(Value::from(json!({"a": 1})).type_name(), "dict");
}

#[test]
fn value_display_uses_text_form() {
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(Value::Float(3.0).to_string(), "3.0");
    assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::from(json!({"k": [1, "a"]})).to_string(), "{'k': [1, 'a']}");
}

#[test]
fn json_export_of_non_finite_float() {
    let json = serde_json::Value::from(&Value::Float(f64::NAN));
    assert_eq!(json, serde_json::Value::Null);
}

#[cfg(feature = "objectid")]
#[test]
fn object_id_forms() {
    let oid = bson::oid::ObjectId::parse_str("5f1b0e5e9d1b2c3a4d5e6f70").unwrap();
    let value = Value::from(oid);
    assert_eq!(value.type_name(), "ObjectId");
    assert_eq!(value.repr(), "ObjectId('5f1b0e5e9d1b2c3a4d5e6f70')");
    assert_eq!(value.to_text().as_deref(), Some("5f1b0e5e9d1b2c3a4d5e6f70"));
    assert_eq!(
        serde_json::Value::from(&value),
        json!("5f1b0e5e9d1b2c3a4d5e6f70")
    );
}

// ============================================================================
// Key and Path coverage
// ============================================================================

#[test]
fn key_accessors() {
    assert_eq!(Key::from("a").as_name(), Some("a"));
    assert_eq!(Key::from("a").as_index(), None);
    assert_eq!(Key::from(4).as_index(), Some(4));
    assert_eq!(Key::from(4).repr(), "4");
    assert_eq!(Key::from("a").repr(), "'a'");
    assert_eq!(Key::from("a").to_string(), "a");
}

#[test]
fn path_constructors() {
    let path = Path::from(["a", "b"]);
    assert_eq!(path.len(), 2);
    assert!(!path.is_empty());
    assert_eq!(path.keys()[1], Key::from("b"));
    assert_eq!(path.join(0usize).to_string(), "a.b.0");
    assert_eq!(Path::from(Key::from("x")), Path::key("x"));
    assert_eq!(Path::from(String::from("x")), Path::from("x"));
    assert_eq!(Path::from(vec!["x"]), Path::from(&Path::key("x")));
    assert!(Path::default().is_empty());
}

// ============================================================================
// Path mutation edge cases
// ============================================================================

#[test]
fn insert_field_rejections() {
    let mut list = Value::from(vec![1, 2]);
    let err = insert_field(&mut list, &Path::key(5usize), Value::Null).unwrap_err();
    assert_eq!(
        err,
        RecordError::rejected("sequence", 5, "index out of range")
    );

    insert_field(&mut list, &Path::key(1usize), Value::from("two")).unwrap();
    assert_eq!(get_field(&list, &Path::key(1usize)), Some(&Value::from("two")));

    let mut record = Value::from(json!({"a": 1}));
    assert!(insert_field(&mut record, &Path::default(), Value::Null).is_err());
}

#[test]
fn remove_field_on_nested_sequence() {
    let mut record = Value::from(json!({"rows": [{"id": 1}, {"id": 2}]}));
    let path = Path::new(vec![Key::from("rows"), Key::Index(0), Key::from("id")]);
    assert!(remove_field(&mut record, &path));
    assert_eq!(
        record,
        Value::from(json!({"rows": [{}, {"id": 2}]}))
    );
}

#[test]
fn mutable_mapping_of_native_map() {
    let mut record = Value::from(json!({}));
    to_mapping_mut(&mut record)
        .unwrap()
        .insert(Key::from("k"), Value::Int(1));
    assert_eq!(record, Value::from(json!({"k": 1})));
}

// ============================================================================
// Comparator coverage
// ============================================================================

#[test]
fn operator_display() {
    assert_eq!(Operator::Less.to_string(), "lt");
    assert_eq!(Operator::GreaterOrEqual.to_string(), "gte");
    assert_eq!(Operator::Noop.as_str(), "noop");
    assert!(Operator::Less.is_ordering());
    assert!(!Operator::Equal.is_ordering());
}

#[test]
fn containers_compare_by_string_form_across_types() {
    // list vs its text
    assert!(equals(&Value::from(vec![1, 2]), &Value::from("[1, 2]")));
    assert!(not_equals(&Value::from(vec![1, 2]), &Value::from("[2, 1]")));
    assert!(!test(&Value::from(json!({"a": 1})), Operator::Equal, &Value::from("{}")).unwrap());
}

#[test]
fn matchers_with_mixed_types() {
    assert!(match_any(&Value::from(vec![1, 2]), &Value::from(vec!["2"])));
    assert!(match_all(&Value::from(vec!["1", "2"]), &Value::from(vec![2, 1])));
}

// ============================================================================
// Options coverage
// ============================================================================

#[test]
fn option_defaults() {
    assert_eq!(Missing::default(), Missing::Exclude);
    assert_eq!(Pick::default(), Pick::First);
    assert_eq!(SortOptions::default().dir(), Dir::Asc);
    assert_eq!(SortOptions::new().reverse().dir(), Dir::Desc);
    assert!(SortOptions::new().none_greater().none_greater);

    let renumber = RenumberOptions::default();
    assert_eq!((renumber.start, renumber.increment, renumber.insert), (1, 1, false));
    assert!(RenumberOptions::new(0, 2).insert().insert);

    let contains = ContainsOptions::new().match_all().exclude().include_missing();
    assert!(contains.match_all && contains.exclude && contains.include_missing);
}

#[test]
fn shape_names() {
    assert_eq!(RecordShape::NearMapping.to_string(), "near-mapping");
    assert!(RecordShape::LegacyDocument.is_aliased());
    assert!(!RecordShape::Sequence.is_aliased());
}
