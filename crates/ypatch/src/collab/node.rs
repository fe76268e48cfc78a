//! [`Node`] and [`NodeMut`] handles over Yrs content.

use serde_json::Value;
use yrs::{Any, Array, In, Map, Out, ReadTxn, TransactionMut};
use ypatch_json_pointer::parse_index;

use super::convert::{out_to_value, to_prelim};
use crate::tree::{list_slot, placement, Node, NodeMut, Placement, SetMode, Shape};

fn shape_of(out: &Out) -> Shape {
    match out {
        Out::YMap(_) | Out::Any(Any::Map(_)) => Shape::Map,
        Out::YArray(_) | Out::Any(Any::Array(_)) => Shape::List,
        _ => Shape::Primitive,
    }
}

fn len_of<T: ReadTxn>(txn: &T, out: &Out) -> usize {
    match out {
        Out::YMap(map) => map.len(txn) as usize,
        Out::YArray(array) => array.len(txn) as usize,
        Out::Any(Any::Map(map)) => map.len(),
        Out::Any(Any::Array(items)) => items.len(),
        _ => 0,
    }
}

fn child_of<T: ReadTxn>(txn: &T, out: &Out, key: &str) -> Option<Out> {
    match out {
        Out::YMap(map) => map.get(txn, key),
        Out::YArray(array) => {
            let index = u32::try_from(parse_index(key)?).ok()?;
            array.get(txn, index)
        }
        Out::Any(Any::Map(map)) => map.get(key).cloned().map(Out::Any),
        Out::Any(Any::Array(items)) => {
            let index = parse_index(key)?;
            items.get(index).cloned().map(Out::Any)
        }
        _ => None,
    }
}

/// Map keys in sorted order; Yrs maps have no stable iteration order.
fn keys_of<T: ReadTxn>(txn: &T, out: &Out) -> Vec<String> {
    let mut keys: Vec<String> = match out {
        Out::YMap(map) => map.keys(txn).map(str::to_string).collect(),
        Out::Any(Any::Map(map)) => map.keys().cloned().collect(),
        other => return (0..len_of(txn, other)).map(|i| i.to_string()).collect(),
    };
    keys.sort();
    keys
}

/// Read handle to a value inside a Yrs document, valid for the lifetime of
/// the transaction it borrows.
pub struct CollabNode<'t, T: ReadTxn> {
    txn: &'t T,
    out: Out,
}

impl<'t, T: ReadTxn> CollabNode<'t, T> {
    pub(crate) fn new(txn: &'t T, out: Out) -> Self {
        Self { txn, out }
    }

    /// The underlying Yrs output.
    pub fn out(&self) -> &Out {
        &self.out
    }
}

impl<T: ReadTxn> Clone for CollabNode<'_, T> {
    fn clone(&self) -> Self {
        Self {
            txn: self.txn,
            out: self.out.clone(),
        }
    }
}

impl<T: ReadTxn> std::fmt::Debug for CollabNode<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CollabNode").field(&self.to_value()).finish()
    }
}

impl<'t, T: ReadTxn> Node for CollabNode<'t, T> {
    fn shape(&self) -> Shape {
        shape_of(&self.out)
    }

    fn get(&self, key: &str) -> Option<Self> {
        child_of(self.txn, &self.out, key).map(|out| Self::new(self.txn, out))
    }

    fn keys(&self) -> Vec<String> {
        keys_of(self.txn, &self.out)
    }

    fn len(&self) -> usize {
        len_of(self.txn, &self.out)
    }

    fn to_value(&self) -> Value {
        out_to_value(&self.out, self.txn)
    }
}

/// Write handle to a value inside a Yrs document.
///
/// Only shared types (`YMap`, `YArray`) can be written; values stored as
/// plain `Any` content are immutable and reject writes.
pub struct CollabNodeMut<'t, 'doc> {
    txn: &'t mut TransactionMut<'doc>,
    out: Out,
}

impl<'t, 'doc> CollabNodeMut<'t, 'doc> {
    pub(crate) fn new(txn: &'t mut TransactionMut<'doc>, out: Out) -> Self {
        Self { txn, out }
    }
}

impl<'t, 'doc> NodeMut for CollabNodeMut<'t, 'doc> {
    fn shape(&self) -> Shape {
        shape_of(&self.out)
    }

    fn into_child(self, key: &str) -> Option<Self> {
        let out = child_of(&*self.txn, &self.out, key)?;
        Some(Self::new(self.txn, out))
    }

    fn len(&self) -> usize {
        len_of(&*self.txn, &self.out)
    }

    fn set(&mut self, key: &str, value: Value, mode: SetMode) -> bool {
        match &self.out {
            Out::YMap(map) => {
                map.insert(&mut *self.txn, key, to_prelim(&value));
                true
            }
            Out::YArray(array) => {
                let len = array.len(&*self.txn) as usize;
                let Some(index) = list_slot(key, len) else {
                    return false;
                };
                match placement(index, len, mode) {
                    Placement::Pad(n) => {
                        for _ in 0..n {
                            array.push_back(&mut *self.txn, In::Any(Any::Null));
                        }
                        array.push_back(&mut *self.txn, to_prelim(&value));
                    }
                    Placement::Insert(i) => {
                        let Ok(i) = u32::try_from(i) else {
                            return false;
                        };
                        array.insert(&mut *self.txn, i, to_prelim(&value));
                    }
                    Placement::Overwrite(i) => {
                        let Ok(i) = u32::try_from(i) else {
                            return false;
                        };
                        array.remove(&mut *self.txn, i);
                        array.insert(&mut *self.txn, i, to_prelim(&value));
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        match &self.out {
            Out::YMap(map) => {
                let old = map.get(&*self.txn, key)?;
                let value = out_to_value(&old, &*self.txn);
                map.remove(&mut *self.txn, key);
                Some(value)
            }
            Out::YArray(array) => {
                let index = u32::try_from(parse_index(key)?).ok()?;
                let old = array.get(&*self.txn, index)?;
                let value = out_to_value(&old, &*self.txn);
                array.remove(&mut *self.txn, index);
                Some(value)
            }
            _ => None,
        }
    }
}
