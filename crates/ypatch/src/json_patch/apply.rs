//! JSON Patch apply logic.
//!
//! Operations are applied one at a time, in order, directly to the target.
//! A failing operation leaves earlier changes in place and does not stop
//! later operations; every outcome is reported positionally.

use serde_json::Value;
use tracing::debug;
use ypatch_util::deep_equal;

use super::codec::json::from_json;
use super::types::{Op, PatchError};
use crate::pointer::{evaluate, get, is_settable, remove, set};
use crate::tree::{SetMode, Tree};

// ── Individual operation applicators ─────────────────────────────────────

/// Apply a single operation to `target`.
pub fn apply_op<T: Tree + ?Sized>(target: &mut T, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Add { path, value } => set(target, path, value.clone(), SetMode::Insert),
        Op::Remove { path } => remove(target, path).map(drop),
        Op::Replace { path, value } => {
            if evaluate(&target.root(), path).is_none() {
                return Err(PatchError::missing(path));
            }
            set(target, path, value.clone(), SetMode::Overwrite)
        }
        Op::Move { from, path } => {
            if from.is_strict_prefix_of(path) {
                return Err(PatchError::InvalidOperation(format!(
                    "cannot move {from} into its own descendant {path}"
                )));
            }
            if from == path {
                return match evaluate(&target.root(), from) {
                    Some(_) => Ok(()),
                    None => Err(PatchError::missing(from)),
                };
            }
            if !is_settable(&target.root(), path) {
                return Err(PatchError::missing(path));
            }
            let value = remove(target, from)?;
            match set(target, path, value.clone(), SetMode::Insert) {
                Ok(()) => Ok(()),
                Err(error) => {
                    // Removing `from` can shift the target out of reach;
                    // put the value back where it was.
                    set(target, from, value, SetMode::Insert)?;
                    Err(error)
                }
            }
        }
        Op::Copy { from, path } => {
            let value = get(&target.root(), from)?;
            set(target, path, value, SetMode::Insert)
        }
        Op::Test { path, value } => {
            let actual = get(&target.root(), path)?;
            if deep_equal(&actual, value) {
                Ok(())
            } else {
                Err(PatchError::Test {
                    path: path.to_string(),
                    expected: value.clone(),
                    actual,
                })
            }
        }
    }
}

/// Apply every operation in `ops` to `target`, returning one result per
/// operation.
pub fn apply_patch<T: Tree + ?Sized>(target: &mut T, ops: &[Op]) -> Vec<Result<(), PatchError>> {
    ops.iter()
        .map(|op| {
            let result = apply_op(target, op);
            if let Err(error) = &result {
                debug!(op = op.op_name(), path = %op.path(), %error, "patch operation failed");
            }
            result
        })
        .collect()
}

/// Decode and apply a patch in its JSON wire form.
///
/// Entries that fail to decode are reported in their position without
/// stopping the rest of the patch. A `patch` that is not an array yields a
/// single error.
pub fn apply_json_patch<T: Tree + ?Sized>(
    target: &mut T,
    patch: &Value,
) -> Vec<Result<(), PatchError>> {
    let Some(entries) = patch.as_array() else {
        return vec![Err(PatchError::InvalidOperation(
            "patch must be an array".to_string(),
        ))];
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let result = from_json(entry).and_then(|op| apply_op(target, &op));
            if let Err(error) = &result {
                debug!(index, %error, "patch entry failed");
            }
            result
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────
