//! Read and write capabilities over JSON-shaped trees.
//!
//! The diff, patch and snapshot code never names a concrete tree type. It
//! walks [`Node`] handles for reads and [`NodeMut`] handles for writes, both
//! obtained from a [`Tree`]. `serde_json::Value` implements all three here;
//! the Yrs-backed implementation lives in [`crate::collab`].

use serde_json::Value;
use ypatch_json_pointer::parse_index;
use ypatch_util::deep_equal;

use crate::json_patch::types::PatchError;

/// The kind of node behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// String, number, boolean or null.
    Primitive,
    List,
    Map,
}

/// How [`NodeMut::set`] treats an existing list slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Shift the element at the index and everything after it to the right.
    Insert,
    /// Overwrite the element at the index.
    Overwrite,
}

/// Read access to one node of a tree.
///
/// Handles are cheap to clone; child lookups return new handles.
pub trait Node: Clone {
    fn shape(&self) -> Shape;

    /// Child by reference token: a key for maps, a canonical decimal index
    /// for lists. Primitives have no children.
    fn get(&self, key: &str) -> Option<Self>;

    fn index(&self, index: usize) -> Option<Self> {
        self.get(&index.to_string())
    }

    /// Map keys, or the decimal indices of a list.
    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deep copy into a plain JSON value.
    fn to_value(&self) -> Value;

    fn is_container(&self) -> bool {
        self.shape() != Shape::Primitive
    }

    fn is_list(&self) -> bool {
        self.shape() == Shape::List
    }
}

/// Write access to one node of a tree.
///
/// A handle is consumed when descending so that a mutable borrow of the
/// whole tree can be narrowed to a child without aliasing.
pub trait NodeMut: Sized {
    fn shape(&self) -> Shape;

    fn into_child(self, key: &str) -> Option<Self>;

    fn len(&self) -> usize;

    /// Store `value` under `key`.
    ///
    /// On lists `-` appends, and an index past the end first pads the gap
    /// with nulls. Returns `false` if this node is not a container or `key`
    /// is not a usable list index.
    fn set(&mut self, key: &str, value: Value, mode: SetMode) -> bool;

    /// Remove the child under `key`, returning a plain copy of it.
    fn remove(&mut self, key: &str) -> Option<Value>;
}

/// A tree whose root can be read, written and replaced wholesale.
pub trait Tree {
    type Node<'a>: Node
    where
        Self: 'a;
    type NodeMut<'a>: NodeMut
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;

    fn root_mut(&mut self) -> Self::NodeMut<'_>;

    /// Swap in a new root value, returning the old one.
    fn replace_root(&mut self, value: Value) -> Value;

    /// Checked before `value` is written anywhere in the tree.
    fn check_value(&self, _value: &Value) -> Result<(), PatchError> {
        Ok(())
    }
}

/// Where a list write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Append `n` nulls, then push the value.
    Pad(usize),
    Insert(usize),
    Overwrite(usize),
}

/// Resolve a list reference token for writing. `-` means one past the end.
pub(crate) fn list_slot(key: &str, len: usize) -> Option<usize> {
    if key == "-" {
        Some(len)
    } else {
        parse_index(key)
    }
}

pub(crate) fn placement(index: usize, len: usize, mode: SetMode) -> Placement {
    if index >= len {
        return Placement::Pad(index - len);
    }
    match mode {
        SetMode::Insert => Placement::Insert(index),
        SetMode::Overwrite => Placement::Overwrite(index),
    }
}

/// Structural equality across two possibly different tree implementations.
///
/// Primitives compare with [`deep_equal`], so `1` and `1.0` are equal.
pub fn node_equal<A: Node, B: Node>(a: &A, b: &B) -> bool {
    match (a.shape(), b.shape()) {
        (Shape::Primitive, Shape::Primitive) => deep_equal(&a.to_value(), &b.to_value()),
        (Shape::List, Shape::List) => {
            a.len() == b.len()
                && (0..a.len()).all(|i| match (a.index(i), b.index(i)) {
                    (Some(x), Some(y)) => node_equal(&x, &y),
                    _ => false,
                })
        }
        (Shape::Map, Shape::Map) => {
            a.len() == b.len()
                && a.keys().iter().all(|key| match (a.get(key), b.get(key)) {
                    (Some(x), Some(y)) => node_equal(&x, &y),
                    _ => false,
                })
        }
        _ => false,
    }
}

// ── serde_json ────────────────────────────────────────────────────────────

impl<'a> Node for &'a Value {
    fn shape(&self) -> Shape {
        match *self {
            Value::Array(_) => Shape::List,
            Value::Object(_) => Shape::Map,
            _ => Shape::Primitive,
        }
    }

    fn get(&self, key: &str) -> Option<Self> {
        match *self {
            Value::Object(map) => map.get(key),
            Value::Array(items) => parse_index(key).and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn index(&self, index: usize) -> Option<Self> {
        match *self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    fn keys(&self) -> Vec<String> {
        match *self {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    fn len(&self) -> usize {
        match *self {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    fn to_value(&self) -> Value {
        (*self).clone()
    }
}

impl<'a> NodeMut for &'a mut Value {
    fn shape(&self) -> Shape {
        Node::shape(&&**self)
    }

    fn into_child(self, key: &str) -> Option<Self> {
        match self {
            Value::Object(map) => map.get_mut(key),
            Value::Array(items) => {
                let index = parse_index(key)?;
                items.get_mut(index)
            }
            _ => None,
        }
    }

    fn len(&self) -> usize {
        Node::len(&&**self)
    }

    fn set(&mut self, key: &str, value: Value, mode: SetMode) -> bool {
        match &mut **self {
            Value::Object(map) => {
                map.insert(key.to_string(), value);
                true
            }
            Value::Array(items) => {
                let Some(index) = list_slot(key, items.len()) else {
                    return false;
                };
                match placement(index, items.len(), mode) {
                    Placement::Pad(n) => {
                        items.extend(std::iter::repeat(Value::Null).take(n));
                        items.push(value);
                    }
                    Placement::Insert(i) => items.insert(i, value),
                    Placement::Overwrite(i) => items[i] = value,
                }
                true
            }
            _ => false,
        }
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        match &mut **self {
            Value::Object(map) => map.remove(key),
            Value::Array(items) => {
                let index = parse_index(key)?;
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        }
    }
}

impl Tree for Value {
    type Node<'a> = &'a Value;
    type NodeMut<'a> = &'a mut Value;

    fn root(&self) -> &Value {
        self
    }

    fn root_mut(&mut self) -> &mut Value {
        self
    }

    fn replace_root(&mut self, value: Value) -> Value {
        std::mem::replace(self, value)
    }
}
