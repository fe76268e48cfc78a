//! JSON codec for JSON Patch operations.
//!
//! Converts operations to and from `serde_json::Value` in the RFC 6902
//! format: `{"op": ..., "path": ..., "value"?: ..., "from"?: ...}`.

use serde_json::{json, Map, Value};
use ypatch_json_pointer::Pointer;

use crate::json_patch::types::{Op, PatchError};

// ── Path helpers ──────────────────────────────────────────────────────────

fn encode_path(path: &Pointer) -> Value {
    Value::String(path.to_string())
}

fn decode_path(obj: &Map<String, Value>, op: &str, key: &str) -> Result<Pointer, PatchError> {
    let text = obj
        .get(key)
        .ok_or_else(|| PatchError::InvalidOperation(format!("{op} requires '{key}'")))?
        .as_str()
        .ok_or_else(|| PatchError::InvalidOperation(format!("'{key}' must be a string")))?;
    Ok(Pointer::parse(text)?)
}

fn decode_value(obj: &Map<String, Value>, op: &str) -> Result<Value, PatchError> {
    obj.get("value")
        .cloned()
        .ok_or_else(|| PatchError::InvalidOperation(format!("{op} requires 'value'")))
}

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
        Op::Move { from, path } => json!({
            "op": "move",
            "from": encode_path(from),
            "path": encode_path(path)
        }),
        Op::Copy { from, path } => json!({
            "op": "copy",
            "from": encode_path(from),
            "path": encode_path(path)
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": encode_path(path),
            "value": value
        }),
    }
}

/// Deserialize one operation.
///
/// Unknown operation names and missing or mistyped members are
/// `InvalidOperation`; pointer text that does not parse is
/// `InvalidPointer`. Unrecognized members are ignored.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOperation("operation must be an object".into()))?;
    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOperation("missing 'op' field".into()))?;

    match op {
        "add" => Ok(Op::Add {
            path: decode_path(obj, op, "path")?,
            value: decode_value(obj, op)?,
        }),
        "remove" => Ok(Op::Remove {
            path: decode_path(obj, op, "path")?,
        }),
        "replace" => Ok(Op::Replace {
            path: decode_path(obj, op, "path")?,
            value: decode_value(obj, op)?,
        }),
        "move" => Ok(Op::Move {
            from: decode_path(obj, op, "from")?,
            path: decode_path(obj, op, "path")?,
        }),
        "copy" => Ok(Op::Copy {
            from: decode_path(obj, op, "from")?,
            path: decode_path(obj, op, "path")?,
        }),
        "test" => Ok(Op::Test {
            path: decode_path(obj, op, "path")?,
            value: decode_value(obj, op)?,
        }),
        other => Err(PatchError::InvalidOperation(format!("unknown op: {other}"))),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

/// Deserialize a JSON array into a list of operations, failing on the
/// first malformed entry.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOperation("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}
