use serde_json::{Number, Value};

/// Compares two JSON numbers by numeric value.
///
/// `1` and `1.0` are equal. An integer equals a float only if the float is
/// integral and has exactly that value, so no comparison goes through a
/// lossy conversion.
///
/// ```
/// use serde_json::Number;
/// use ypatch_util::number_equal;
///
/// let one = Number::from(1);
/// let one_f = Number::from_f64(1.0).unwrap();
/// assert!(number_equal(&one, &one_f));
/// ```
pub fn number_equal(a: &Number, b: &Number) -> bool {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(i), None) => b.as_f64().is_some_and(|f| float_is_integer(f, i)),
        (None, Some(i)) => a.as_f64().is_some_and(|f| float_is_integer(f, i)),
        (None, None) => matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

// `as` saturates, and every saturated value lies outside the i64/u64 range.
fn float_is_integer(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}

/// Performs a deep equality check between two JSON values.
///
/// Primitives compare by value (numbers numerically), arrays element by
/// element, and objects key by key regardless of key order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use ypatch_util::json_equal::deep_equal;
///
/// let a = json!({"foo": [1, 2, 3]});
/// let b = json!({"foo": [1, 2, 3]});
/// let c = json!({"foo": [1, 2, 4]});
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => number_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        // Arrays
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        // Objects
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a.iter().all(|(key, val_a)| match obj_b.get(key) {
                Some(val_b) => deep_equal(val_a, val_b),
                None => false,
            })
        }

        // Different types are never equal
        _ => false,
    }
}
