//! Snapshot `test` operations for optimistic concurrency.
//!
//! Before a patch computed against one version of a document is applied to
//! a copy that may have changed since, prepend the tests from
//! [`create_tests`]: each one pins the current value at a location the
//! patch is about to change, so a concurrent edit there makes the test fail
//! instead of being silently overwritten.
//!
//! The input is copied into a private collaborative document and every
//! value is read inside one read transaction, so all tests of one call
//! describe the same instant.

use std::iter;

use tracing::{debug, trace};
use ypatch_json_pointer::Pointer;

use crate::collab::CollabTree;
use crate::json_patch::types::Op;
use crate::pointer::evaluate;
use crate::tree::Node;

/// `test` operations that pin the values `patch` is about to touch in
/// `input`.
///
/// For every destructive operation the value at its `path` is captured,
/// followed by the value at its `from` for `move` and `copy`. Pointers that
/// do not resolve in `input` (such as the target of an `add` into a fresh
/// key, or an append with `-`) produce no test.
///
/// ```
/// use serde_json::json;
/// use ypatch::{create_patch, create_tests, Op, Pointer};
///
/// let input = json!({"a": 1, "b": 2});
/// let patch = create_patch(&input, &json!({"a": 1, "c": 3}));
/// let tests = create_tests(&input, &patch);
/// assert_eq!(
///     tests,
///     vec![Op::Test { path: Pointer::parse("/b").unwrap(), value: json!(2) }]
/// );
/// ```
pub fn create_tests<N: Node>(input: N, patch: &[Op]) -> Vec<Op> {
    let targets: Vec<&Pointer> = patch
        .iter()
        .filter(|op| op.is_destructive())
        .flat_map(|op| iter::once(op.path()).chain(op.from()))
        .collect();
    snapshot_tests(&input, &targets)
}

/// A single `test` operation pinning the current value at `path`, or
/// `None` if `path` does not resolve.
pub fn create_test<N: Node>(input: N, path: &Pointer) -> Option<Op> {
    snapshot_tests(&input, &[path]).pop()
}

/// Pin every resolvable pointer of `paths` against one point-in-time copy
/// of `input`.
///
/// Values holding integers a collaborative document cannot store exactly
/// are read from the plain copy instead, so a pinned value is never
/// rounded.
fn snapshot_tests<N: Node>(input: &N, paths: &[&Pointer]) -> Vec<Op> {
    let copy = input.to_value();
    match CollabTree::try_new(&copy) {
        Ok(snapshot) => {
            let reader = snapshot.reader();
            let tests = pin_all(&reader.root(), paths);
            tests
        }
        Err(error) => {
            debug!(%error, "snapshot read from the plain copy");
            pin_all(&&copy, paths)
        }
    }
}

fn pin_all<N: Node>(root: &N, paths: &[&Pointer]) -> Vec<Op> {
    paths
        .iter()
        .filter_map(|path| snapshot_test(root, path))
        .collect()
}

fn snapshot_test<N: Node>(root: &N, path: &Pointer) -> Option<Op> {
    match evaluate(root, path) {
        Some(node) => Some(Op::Test {
            path: path.clone(),
            value: node.to_value(),
        }),
        None => {
            trace!(path = %path, "no snapshot for unresolved pointer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn tests_cover_path_then_from() {
        let input = json!({"a": {"b": 1}, "c": [1, 2]});
        let patch = vec![
            Op::Move { from: ptr("/a/b"), path: ptr("/c/0") },
            Op::Copy { from: ptr("/c"), path: ptr("/a") },
        ];
        let tests = create_tests(&input, &patch);
        assert_eq!(
            tests,
            vec![
                Op::Test { path: ptr("/c/0"), value: json!(1) },
                Op::Test { path: ptr("/a/b"), value: json!(1) },
                Op::Test { path: ptr("/a"), value: json!({"b": 1}) },
                Op::Test { path: ptr("/c"), value: json!([1, 2]) },
            ]
        );
    }

    #[test]
    fn test_ops_in_patch_are_ignored() {
        let input = json!({"a": 1});
        let patch = vec![Op::Test { path: ptr("/a"), value: json!(1) }];
        assert!(create_tests(&input, &patch).is_empty());
    }

    #[test]
    fn unresolved_pointers_are_skipped() {
        let input = json!({"l": [1]});
        let patch = vec![
            Op::Add { path: ptr("/l/-"), value: json!(2) },
            Op::Add { path: ptr("/new"), value: json!(2) },
            Op::Move { from: ptr("/gone"), path: ptr("/l/0") },
        ];
        let tests = create_tests(&input, &patch);
        assert_eq!(tests, vec![Op::Test { path: ptr("/l/0"), value: json!(1) }]);
    }

    #[test]
    fn large_integers_are_pinned_exactly() {
        let just_above = (1_i64 << 53) + 1;
        let input = json!({"n": just_above, "u": u64::MAX});
        let patch = vec![
            Op::Replace { path: ptr("/n"), value: json!(0) },
            Op::Replace { path: ptr("/u"), value: json!(0) },
        ];
        let tests = create_tests(&input, &patch);
        assert_eq!(
            tests,
            vec![
                Op::Test { path: ptr("/n"), value: json!(just_above) },
                Op::Test { path: ptr("/u"), value: json!(u64::MAX) },
            ]
        );
        assert_eq!(
            create_test(&json!({"n": just_above}), &ptr("/n")),
            Some(Op::Test { path: ptr("/n"), value: json!(just_above) })
        );
    }

    #[test]
    fn root_pointer_snapshots_everything() {
        let input = json!({"a": [1, {"b": null}]});
        let test = create_test(&input, &Pointer::root()).unwrap();
        assert_eq!(test, Op::Test { path: Pointer::root(), value: input.clone() });
        assert!(create_test(&input, &ptr("/z")).is_none());
    }
}
