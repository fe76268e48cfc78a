#![allow(dead_code)]

pub mod fixtures;

use serde_json::Value;
use tracing_subscriber::EnvFilter;
use ypatch::collab::CollabTree;
use ypatch::{apply_patch, Op, PatchError, Pointer};

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ypatch=info".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

pub fn ptr(s: &str) -> Pointer {
    Pointer::parse(s).unwrap()
}

/// Collaborative tree holding `value`.
pub fn make_collab(value: &Value) -> CollabTree {
    CollabTree::new(value)
}

/// Apply `ops` to a collaborative tree in one write transaction.
pub fn apply_collab(tree: &CollabTree, ops: &[Op]) -> Vec<Result<(), PatchError>> {
    let mut writer = tree.writer();
    apply_patch(&mut writer, ops)
}

pub fn assert_all_ok(results: &[Result<(), PatchError>]) {
    for (i, result) in results.iter().enumerate() {
        assert!(result.is_ok(), "operation {i} failed: {result:?}");
    }
}
