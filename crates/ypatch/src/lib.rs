//! ypatch: JSON Patch (RFC 6902) for plain and collaborative JSON trees.
//!
//! Computes patches between two trees, applies them, and generates `test`
//! operations that guard a patch against concurrent edits. Every operation
//! works on any [`Tree`]: a plain `serde_json::Value`, or a JSON value kept
//! in a Yrs document ([`collab::CollabTree`]).
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use ypatch::{apply_patch, create_patch, create_tests};
//!
//! let before = json!({"title": "draft", "tags": ["a"]});
//! let after = json!({"title": "final", "tags": ["a", "b"]});
//!
//! let patch = create_patch(&before, &after);
//! let mut guarded = create_tests(&before, &patch);
//! guarded.extend(patch);
//!
//! let mut doc = before.clone();
//! assert!(apply_patch(&mut doc, &guarded).iter().all(Result::is_ok));
//! assert_eq!(doc, after);
//! ```

pub mod collab;
pub mod json_patch;
pub mod json_patch_diff;
pub mod json_patch_test;
pub mod pointer;
pub mod tree;

pub use json_patch::{apply_json_patch, apply_op, apply_patch, Op, PatchError};
pub use json_patch_diff::{DiffHook, DiffOptions, Differ};
pub use json_patch_test::{create_test, create_tests};
pub use tree::{Node, NodeMut, SetMode, Shape, Tree};
pub use ypatch_json_pointer::{JsonPointerError, Pointer};

/// Operations that turn `input` into `output`.
///
/// Either side may be a plain value (`&serde_json::Value`) or a
/// collaborative node; applying the result to a copy of `input` yields a
/// tree equal to `output`.
pub fn create_patch<A: Node, B: Node>(input: A, output: B) -> Vec<Op> {
    Differ::new().diff(&input, &output)
}

/// [`create_patch`] with a per-node override.
///
/// `hook` is consulted for every node pair visited, the roots included.
/// Returning `Some(ops)` emits `ops` in place of the built-in comparison at
/// that position (`Some(vec![])` declares the pair equal); `None` falls
/// back to the built-in comparison.
///
/// ```
/// use serde_json::{json, Value};
/// use ypatch::{create_patch_with, Op, Pointer};
///
/// // Treat every string change as a whole-value replace of its parent.
/// let patch = create_patch_with(
///     &json!({"user": {"name": "a"}}),
///     &json!({"user": {"name": "b"}}),
///     |input: &&Value, output: &&Value, at: &Pointer| {
///         let changed = input.get("name").is_some() && input != output;
///         changed.then(|| {
///             vec![Op::Replace { path: at.clone(), value: (*output).clone() }]
///         })
///     },
/// );
/// assert_eq!(patch.len(), 1);
/// assert_eq!(patch[0].path().to_string(), "/user");
/// ```
pub fn create_patch_with<A, B, F>(input: A, output: B, hook: F) -> Vec<Op>
where
    A: Node,
    B: Node,
    F: Fn(&A, &B, &Pointer) -> Option<Vec<Op>>,
{
    Differ::<A, B>::new().with_hook(&hook).diff(&input, &output)
}
