//! Core types for the JSON Patch module.

use serde_json::Value;
use thiserror::Error;
use ypatch_json_pointer::{JsonPointerError, Pointer};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// The pointer does not resolve, or its parent is not a container.
    #[error("MISSING: {path:?}")]
    Missing { path: String },
    #[error("INVALID_OPERATION: {0}")]
    InvalidOperation(String),
    #[error("TEST: value at {path:?} is {actual}, expected {expected}")]
    Test {
        path: String,
        expected: Value,
        actual: Value,
    },
    #[error("INVALID_POINTER: {0}")]
    InvalidPointer(#[from] JsonPointerError),
}

impl PatchError {
    pub fn missing(path: &Pointer) -> Self {
        PatchError::Missing {
            path: path.to_string(),
        }
    }
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// An RFC 6902 JSON Patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Value },
}

impl Op {
    /// The wire name of the operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
        }
    }

    pub fn path(&self) -> &Pointer {
        match self {
            Op::Add { path, .. }
            | Op::Remove { path }
            | Op::Replace { path, .. }
            | Op::Move { path, .. }
            | Op::Copy { path, .. }
            | Op::Test { path, .. } => path,
        }
    }

    /// The source pointer of `move` and `copy`.
    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Every operation except `test` may change the document.
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Op::Test { .. })
    }
}
