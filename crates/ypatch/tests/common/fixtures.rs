use proptest::prelude::*;
use serde_json::{json, Value};

/// Pairs of documents exercised by the workflow tests: (name, before, after).
pub fn document_pairs() -> Vec<(&'static str, Value, Value)> {
    vec![
        ("identical", json!({"a": 1}), json!({"a": 1})),
        ("scalar root", json!(1), json!("one")),
        ("add key", json!({"a": 1}), json!({"a": 1, "b": {"c": [1]}})),
        ("remove key", json!({"a": 1, "b": 2}), json!({"a": 1})),
        ("rename key", json!({"a": 1, "b": 2}), json!({"a": 1, "c": 3})),
        ("nested change", json!({"u": {"n": "x", "tags": ["p"]}}), json!({"u": {"n": "y", "tags": ["p", "q"]}})),
        ("list insert", json!([1, 2, 3]), json!([1, 99, 2, 3])),
        ("list delete", json!([1, 2, 3]), json!([1, 3])),
        ("list rotate", json!([1, 2, 3, 4]), json!([2, 3, 4, 1])),
        ("list of maps", json!([{"id": 1}, {"id": 2}]), json!([{"id": 2}, {"id": 3, "x": true}])),
        ("shape change", json!({"a": [1]}), json!({"a": {"0": 1}})),
        ("empty to full", json!([]), json!([null, false, "s", 1.5, [], {}])),
        ("full to empty", json!({"a": [1, 2], "b": {"c": null}}), json!({})),
        ("escaped keys", json!({"a/b": 1, "m~n": [0]}), json!({"a/b": 2, "m~n": [], "~/": true})),
    ]
}

/// Arbitrary JSON documents with small keys so generated pairs overlap.
pub fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z]{0,3}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}
