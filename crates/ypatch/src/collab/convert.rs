//! Conversions between plain JSON values and Yrs content.
//!
//! Containers are materialized as shared Yrs types (`YMap`, `YArray`) so
//! they can be edited in place later; primitives become `Any` values.
//! Yrs stores numbers as `f64`, except integers outside the exactly
//! representable range, which are kept as `BigInt`.

use std::sync::Arc;

use serde_json::{Map, Number, Value};
use yrs::types::ToJson;
use yrs::{Any, ArrayPrelim, In, MapPrelim, Out, ReadTxn};

/// Integers up to this magnitude (2^53) are exact as `f64`.
const MAX_SAFE_INT: u64 = 1 << 53;
const MAX_SAFE_INTEGER: f64 = MAX_SAFE_INT as f64;

/// Build the Yrs prelim for `value`, ready to be inserted into a map or
/// array of a collaborative document.
pub fn to_prelim(value: &Value) -> In {
    match value {
        Value::Array(items) => In::Array(items.iter().map(to_prelim).collect::<ArrayPrelim>()),
        Value::Object(map) => In::Map(
            map.iter()
                .map(|(key, value)| (Arc::<str>::from(key.as_str()), to_prelim(value)))
                .collect::<MapPrelim>(),
        ),
        primitive => In::Any(to_any(primitive)),
    }
}

/// Convert a JSON value into an immutable Yrs `Any`.
pub fn to_any(value: &Value) -> Any {
    match value {
        Value::Null => Any::Null,
        Value::Bool(b) => Any::Bool(*b),
        Value::Number(n) => number_to_any(n),
        Value::String(s) => Any::String(Arc::from(s.as_str())),
        Value::Array(items) => Any::Array(items.iter().map(to_any).collect()),
        Value::Object(map) => Any::Map(Arc::new(
            map.iter().map(|(k, v)| (k.clone(), to_any(v))).collect(),
        )),
    }
}

fn number_to_any(n: &Number) -> Any {
    if let Some(i) = n.as_i64() {
        if i.unsigned_abs() > MAX_SAFE_INT {
            return Any::BigInt(i);
        }
        return Any::Number(i as f64);
    }
    Any::Number(n.as_f64().unwrap_or(f64::NAN))
}

/// Whether every number in `value` survives a trip through a Yrs document.
///
/// Yrs has no unsigned 64-bit integers, so integers above `i64::MAX` do
/// not.
pub fn is_representable(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_f64() || n.as_i64().is_some(),
        Value::Array(items) => items.iter().all(is_representable),
        Value::Object(map) => map.values().all(is_representable),
        _ => true,
    }
}

/// Convert a Yrs `Any` back into a plain JSON value.
///
/// Integral floats within the safe range come back as JSON integers.
/// Undefined and non-finite numbers become `null`; buffers become arrays
/// of byte values.
pub fn any_to_value(any: &Any) -> Value {
    match any {
        Any::Null | Any::Undefined => Value::Null,
        Any::Bool(b) => Value::Bool(*b),
        Any::Number(f) => float_to_value(*f),
        Any::BigInt(i) => Value::from(*i),
        Any::String(s) => Value::String(s.to_string()),
        Any::Buffer(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
        Any::Array(items) => Value::Array(items.iter().map(any_to_value).collect()),
        Any::Map(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(keys.len());
            for key in keys {
                out.insert(key.clone(), any_to_value(&map[key]));
            }
            Value::Object(out)
        }
    }
}

fn float_to_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// Copy any Yrs output, shared types included, into a plain JSON value.
pub fn out_to_value<T: ReadTxn>(out: &Out, txn: &T) -> Value {
    match out {
        Out::Any(any) => any_to_value(any),
        shared => any_to_value(&shared.to_json(txn)),
    }
}
