//! Pointer evaluation and mutation over any [`Tree`].
//!
//! These four operations behave identically for plain `serde_json::Value`
//! trees and for collaborative trees.

use serde_json::Value;
use ypatch_json_pointer::Pointer;

use crate::json_patch::types::PatchError;
use crate::tree::{list_slot, Node, NodeMut, SetMode, Shape, Tree};

/// Walk `ptr` from `node`. The empty pointer yields `node` itself.
pub fn evaluate<N: Node>(node: &N, ptr: &Pointer) -> Option<N> {
    walk(node, ptr.tokens())
}

fn walk<N: Node>(node: &N, tokens: &[String]) -> Option<N> {
    tokens
        .iter()
        .try_fold(node.clone(), |current, token| current.get(token))
}

/// Plain copy of the value at `ptr`.
pub fn get<N: Node>(node: &N, ptr: &Pointer) -> Result<Value, PatchError> {
    evaluate(node, ptr)
        .map(|found| found.to_value())
        .ok_or_else(|| PatchError::missing(ptr))
}

/// Whether `set` at `ptr` would find a place to write: the parent resolves
/// to a map, or to a list and the last token is `-` or a valid index.
pub fn is_settable<N: Node>(root: &N, ptr: &Pointer) -> bool {
    let Some((parents, last)) = ptr.split_last() else {
        return true;
    };
    match walk(root, parents).map(|parent| (parent.shape(), parent.len())) {
        Some((Shape::Map, _)) => true,
        Some((Shape::List, len)) => list_slot(last, len).is_some(),
        _ => false,
    }
}

fn resolve_mut<N: NodeMut>(root: N, tokens: &[String]) -> Option<N> {
    tokens.iter().try_fold(root, |node, token| node.into_child(token))
}

/// Store `value` at `ptr`.
///
/// The parent must already exist. For list parents `-` appends and an
/// index past the end pads the gap with nulls. The empty pointer replaces
/// the whole tree.
pub fn set<T: Tree + ?Sized>(
    tree: &mut T,
    ptr: &Pointer,
    value: Value,
    mode: SetMode,
) -> Result<(), PatchError> {
    tree.check_value(&value)?;
    let Some((parents, last)) = ptr.split_last() else {
        tree.replace_root(value);
        return Ok(());
    };
    let mut parent =
        resolve_mut(tree.root_mut(), parents).ok_or_else(|| PatchError::missing(ptr))?;
    if parent.set(last, value, mode) {
        Ok(())
    } else {
        Err(PatchError::missing(ptr))
    }
}

/// Remove and return the value at `ptr`.
pub fn remove<T: Tree + ?Sized>(tree: &mut T, ptr: &Pointer) -> Result<Value, PatchError> {
    let Some((parents, last)) = ptr.split_last() else {
        return Err(PatchError::InvalidOperation(
            "cannot remove the document root".to_string(),
        ));
    };
    let mut parent =
        resolve_mut(tree.root_mut(), parents).ok_or_else(|| PatchError::missing(ptr))?;
    parent.remove(last).ok_or_else(|| PatchError::missing(ptr))
}
