mod common;

use common::fixtures::document_pairs;
use common::{apply_collab, assert_all_ok, make_collab, ptr};
use serde_json::{json, Value};
use ypatch::json_patch::codec::json::{from_json_patch, to_json_patch};
use ypatch::{apply_json_patch, apply_patch, create_patch, create_patch_with, Op, PatchError};

#[test]
fn plain_diff_then_apply_reaches_target() {
    for (name, before, after) in document_pairs() {
        let patch = create_patch(&before, &after);
        let mut doc = before.clone();
        let results = apply_patch(&mut doc, &patch);
        assert_all_ok(&results);
        assert_eq!(doc, after, "case {name}: {patch:?}");
    }
}

#[test]
fn collab_diff_then_apply_reaches_target() {
    for (name, before, after) in document_pairs() {
        let tree = make_collab(&before);
        let patch = {
            let reader = tree.reader();
            create_patch(reader.root(), &after)
        };
        assert_all_ok(&apply_collab(&tree, &patch));
        assert!(
            ypatch_util::deep_equal(&tree.to_value(), &after),
            "case {name}: {:?}",
            tree.to_value()
        );
    }
}

#[test]
fn identical_inputs_give_an_empty_patch() {
    for (_, before, _) in document_pairs() {
        assert!(create_patch(&before, &before).is_empty());
        let tree = make_collab(&before);
        let reader = tree.reader();
        assert!(create_patch(reader.root(), &before).is_empty());
    }
}

#[test]
fn patch_survives_the_wire_format() {
    let before = json!({"list": [1, 2, 3], "m": {"a/b": "x"}});
    let after = json!({"list": [3, 1], "m": {"a/b": "y", "~": null}});
    let patch = create_patch(&before, &after);

    let wire = serde_json::to_string(&to_json_patch(&patch)).unwrap();
    let decoded: Value = serde_json::from_str(&wire).unwrap();
    assert_eq!(from_json_patch(&decoded).unwrap(), patch);

    let mut doc = before.clone();
    assert_all_ok(&apply_json_patch(&mut doc, &decoded));
    assert_eq!(doc, after);
}

#[test]
fn rfc6902_appendix_examples() {
    let mut doc = json!({"foo": "bar"});
    assert_all_ok(&apply_json_patch(
        &mut doc,
        &json!([{"op": "add", "path": "/baz", "value": "qux"}]),
    ));
    assert_eq!(doc, json!({"foo": "bar", "baz": "qux"}));

    let mut doc = json!({"foo": ["bar", "baz"]});
    assert_all_ok(&apply_json_patch(
        &mut doc,
        &json!([{"op": "add", "path": "/foo/1", "value": "qux"}]),
    ));
    assert_eq!(doc, json!({"foo": ["bar", "qux", "baz"]}));

    let mut doc = json!({"foo": {"bar": "baz", "waldo": "fred"}, "qux": {"corge": "grault"}});
    assert_all_ok(&apply_json_patch(
        &mut doc,
        &json!([{"op": "move", "from": "/foo/waldo", "path": "/qux/thud"}]),
    ));
    assert_eq!(
        doc,
        json!({"foo": {"bar": "baz"}, "qux": {"corge": "grault", "thud": "fred"}})
    );

    let mut doc = json!({"foo": ["all", "grass", "cows", "eat"]});
    assert_all_ok(&apply_json_patch(
        &mut doc,
        &json!([{"op": "move", "from": "/foo/1", "path": "/foo/3"}]),
    ));
    assert_eq!(doc, json!({"foo": ["all", "cows", "eat", "grass"]}));

    let mut doc = json!({"baz": "qux", "foo": "bar"});
    let results = apply_json_patch(
        &mut doc,
        &json!([
            {"op": "test", "path": "/baz", "value": "qux"},
            {"op": "test", "path": "/foo", "value": 1}
        ]),
    );
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(PatchError::Test { .. })));
}

#[test]
fn failures_do_not_stop_later_operations() {
    let ops = vec![
        Op::Remove { path: ptr("/missing") },
        Op::Add { path: ptr("/a"), value: json!(1) },
        Op::Replace { path: ptr("/b/c"), value: json!(2) },
        Op::Add { path: ptr("/l/-"), value: json!("end") },
    ];

    let mut doc = json!({"l": []});
    let results = apply_patch(&mut doc, &ops);
    assert!(matches!(results[0], Err(PatchError::Missing { .. })));
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(PatchError::Missing { .. })));
    assert!(results[3].is_ok());
    assert_eq!(doc, json!({"a": 1, "l": ["end"]}));

    let tree = make_collab(&json!({"l": []}));
    let collab_results = apply_collab(&tree, &ops);
    assert_eq!(collab_results, results);
    assert!(ypatch_util::deep_equal(&tree.to_value(), &doc));
}

#[test]
fn moving_into_own_child_is_rejected() {
    let mut doc = json!({"a": {"b": {}}});
    let results = apply_patch(&mut doc, &[Op::Move { from: ptr("/a"), path: ptr("/a/b/c") }]);
    assert!(matches!(results[0], Err(PatchError::InvalidOperation(_))));
    assert_eq!(doc, json!({"a": {"b": {}}}));
}

#[test]
fn hook_overrides_array_handling() {
    let before = json!({"tags": ["a", "b"], "n": 1});
    let after = json!({"tags": ["b", "c"], "n": 2});
    let patch = create_patch_with(&before, &after, |input: &&Value, output: &&Value, at| {
        (input.is_array() && output.is_array()).then(|| {
            vec![Op::Replace { path: at.clone(), value: (*output).clone() }]
        })
    });
    assert!(patch.contains(&Op::Replace { path: ptr("/tags"), value: json!(["b", "c"]) }));
    let mut doc = before.clone();
    assert_all_ok(&apply_patch(&mut doc, &patch));
    assert_eq!(doc, after);
}

#[test]
fn rename_key_is_remove_then_add() {
    let patch = create_patch(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 3}));
    assert_eq!(
        patch,
        vec![
            Op::Remove { path: ptr("/b") },
            Op::Add { path: ptr("/c"), value: json!(3) },
        ]
    );
}

#[test]
fn repeated_move_fails_on_both_trees() {
    let mv = Op::Move { from: ptr("/x"), path: ptr("/y") };

    let mut doc = json!({"x": 5});
    let results = apply_patch(&mut doc, &[mv.clone(), mv.clone()]);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(PatchError::Missing { .. })));
    assert_eq!(doc, json!({"y": 5}));

    let tree = make_collab(&json!({"x": 5}));
    let results = apply_collab(&tree, &[mv.clone(), mv]);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(PatchError::Missing { .. })));
    assert_eq!(tree.to_value(), json!({"y": 5}));
}

#[test]
fn add_past_the_end_grows_the_list() {
    let add = [Op::Add { path: ptr("/arr/3"), value: json!("v") }];

    let mut doc = json!({"arr": [1, 2]});
    assert_all_ok(&apply_patch(&mut doc, &add));
    assert_eq!(doc, json!({"arr": [1, 2, null, "v"]}));

    let tree = make_collab(&json!({"arr": [1, 2]}));
    assert_all_ok(&apply_collab(&tree, &add));
    assert_eq!(tree.to_value(), json!({"arr": [1, 2, null, "v"]}));
}

#[test]
fn failed_move_leaves_both_trees_untouched() {
    let cases = [
        (json!({"x": 5}), Op::Move { from: ptr("/x"), path: ptr("/nope/y") }),
        (json!({"x": 5, "l": []}), Op::Move { from: ptr("/x"), path: ptr("/l/first") }),
        (
            json!({"l": ["a", {"b": 2}]}),
            Op::Move { from: ptr("/l/0"), path: ptr("/l/1/x") },
        ),
    ];
    for (before, mv) in cases {
        let mut doc = before.clone();
        let results = apply_patch(&mut doc, std::slice::from_ref(&mv));
        assert!(matches!(results[0], Err(PatchError::Missing { .. })), "{mv:?}");
        assert_eq!(doc, before);

        let tree = make_collab(&before);
        let results = apply_collab(&tree, std::slice::from_ref(&mv));
        assert!(matches!(results[0], Err(PatchError::Missing { .. })), "{mv:?}");
        assert_eq!(tree.to_value(), before);
    }
}

#[test]
fn unsigned_beyond_i64_is_refused_by_collab_targets() {
    let add = [Op::Add { path: ptr("/n"), value: json!(u64::MAX) }];

    let mut doc = json!({});
    assert_all_ok(&apply_patch(&mut doc, &add));
    assert_eq!(doc, json!({"n": u64::MAX}));

    let tree = make_collab(&json!({}));
    let results = apply_collab(&tree, &add);
    assert!(matches!(results[0], Err(PatchError::InvalidOperation(_))));
    assert_eq!(tree.to_value(), json!({}));
}
