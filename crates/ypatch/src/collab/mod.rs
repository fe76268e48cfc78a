//! Collaborative (Yrs-backed) JSON trees.
//!
//! A [`CollabTree`] keeps one JSON value inside a `yrs::Doc`, stored under
//! [`CollabConfig::item_key`] of the top-level map [`CollabConfig::root_name`].
//! Reads go through a [`CollabReader`] (one read transaction, so every read
//! sees the same instant) and writes through a [`CollabWriter`] (one write
//! transaction, committed when the writer is dropped).
//!
//! Yrs allows one writer or any number of readers at a time. Opening a
//! writer while a reader of the same document is alive blocks inside Yrs;
//! use [`CollabTree::try_writer`] where both may overlap.
//!
//! Integers above `i64::MAX` have no exact Yrs form. Writing one through a
//! [`CollabWriter`] fails with `InvalidOperation`, and
//! [`CollabTree::try_new`] rejects values that contain one.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use ypatch::collab::CollabTree;
//! use ypatch::{apply_patch, create_patch};
//!
//! let tree = CollabTree::new(&json!({"a": 1}));
//! let patch = create_patch(&json!({"a": 1}), &json!({"a": 2, "b": [true]}));
//! {
//!     let mut writer = tree.writer();
//!     let results = apply_patch(&mut writer, &patch);
//!     assert!(results.iter().all(Result::is_ok));
//! }
//! assert_eq!(tree.to_value(), json!({"a": 2, "b": [true]}));
//! ```

mod convert;
mod node;

use std::sync::Arc;

use serde_json::Value;
use yrs::{Any, Doc, Map, MapRef, Out, Transact, Transaction, TransactionMut};

pub use convert::{any_to_value, is_representable, out_to_value, to_any, to_prelim};
pub use node::{CollabNode, CollabNodeMut};

use crate::json_patch::types::PatchError;
use crate::tree::{Node, Tree};

/// Where a [`CollabTree`] keeps its value inside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabConfig {
    /// Name of the top-level Yrs map.
    pub root_name: String,
    /// Key of the tree's value inside that map.
    pub item_key: String,
}

impl Default for CollabConfig {
    fn default() -> Self {
        Self {
            root_name: "root".to_string(),
            item_key: "item".to_string(),
        }
    }
}

/// A JSON value held in a Yrs document.
pub struct CollabTree {
    doc: Doc,
    root: MapRef,
    item_key: Arc<str>,
}

impl CollabTree {
    /// Create a fresh document holding `value` under the default layout.
    pub fn new(value: &Value) -> Self {
        Self::with_config(value, &CollabConfig::default())
    }

    /// Like [`new`](Self::new), but refuses values whose numbers a Yrs
    /// document cannot hold exactly.
    pub fn try_new(value: &Value) -> Result<Self, PatchError> {
        check_representable(value)?;
        Ok(Self::new(value))
    }

    /// Numbers above `i64::MAX` in `value` are stored as floats.
    pub fn with_config(value: &Value, config: &CollabConfig) -> Self {
        let tree = Self::from_doc(Doc::new(), config);
        {
            let mut writer = tree.writer();
            writer.replace_root(value.clone());
        }
        tree
    }

    /// Wrap an existing document. The value is read from, and written to,
    /// the location named by `config`; a missing value reads as `null`.
    pub fn from_doc(doc: Doc, config: &CollabConfig) -> Self {
        let root = doc.get_or_insert_map(config.root_name.as_str());
        Self {
            doc,
            root,
            item_key: Arc::from(config.item_key.as_str()),
        }
    }

    pub fn doc(&self) -> &Doc {
        &self.doc
    }

    /// Open a read transaction.
    ///
    /// Yrs allows one writer or many readers at a time, so a reader must be
    /// dropped before [`writer`](Self::writer) is called.
    pub fn reader(&self) -> CollabReader<'_> {
        CollabReader {
            txn: self.doc.transact(),
            root: self.root.clone(),
            item_key: self.item_key.clone(),
        }
    }

    /// Open a write transaction. Changes commit when the writer is dropped.
    pub fn writer(&self) -> CollabWriter<'_> {
        CollabWriter {
            txn: self.doc.transact_mut(),
            root: self.root.clone(),
            item_key: self.item_key.clone(),
        }
    }

    /// Open a read transaction, or `None` while a writer is alive.
    pub fn try_reader(&self) -> Option<CollabReader<'_>> {
        let txn = self.doc.try_transact().ok()?;
        Some(CollabReader {
            txn,
            root: self.root.clone(),
            item_key: self.item_key.clone(),
        })
    }

    /// Open a write transaction, or `None` while any reader or writer is
    /// alive.
    pub fn try_writer(&self) -> Option<CollabWriter<'_>> {
        let txn = self.doc.try_transact_mut().ok()?;
        Some(CollabWriter {
            txn,
            root: self.root.clone(),
            item_key: self.item_key.clone(),
        })
    }

    /// Plain copy of the current value.
    pub fn to_value(&self) -> Value {
        self.reader().to_value()
    }
}

impl std::fmt::Debug for CollabTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollabTree")
            .field("item_key", &self.item_key)
            .finish_non_exhaustive()
    }
}

fn check_representable(value: &Value) -> Result<(), PatchError> {
    if is_representable(value) {
        Ok(())
    } else {
        Err(PatchError::InvalidOperation(
            "integer above i64::MAX cannot be stored in a collaborative document".to_string(),
        ))
    }
}

fn item_of<T: yrs::ReadTxn>(root: &MapRef, txn: &T, key: &str) -> Out {
    root.get(txn, key).unwrap_or(Out::Any(Any::Null))
}

/// A point-in-time view of a [`CollabTree`].
pub struct CollabReader<'doc> {
    txn: Transaction<'doc>,
    root: MapRef,
    item_key: Arc<str>,
}

impl<'doc> CollabReader<'doc> {
    pub fn root(&self) -> CollabNode<'_, Transaction<'doc>> {
        CollabNode::new(&self.txn, item_of(&self.root, &self.txn, &self.item_key))
    }

    pub fn to_value(&self) -> Value {
        self.root().to_value()
    }
}

/// A write transaction over a [`CollabTree`], usable as a patch target.
pub struct CollabWriter<'doc> {
    txn: TransactionMut<'doc>,
    root: MapRef,
    item_key: Arc<str>,
}

impl<'doc> CollabWriter<'doc> {
    pub fn to_value(&self) -> Value {
        self.root().to_value()
    }

    fn item(&self) -> Out {
        item_of(&self.root, &self.txn, &self.item_key)
    }
}

impl<'doc> Tree for CollabWriter<'doc> {
    type Node<'a>
        = CollabNode<'a, TransactionMut<'doc>>
    where
        Self: 'a;
    type NodeMut<'a>
        = CollabNodeMut<'a, 'doc>
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_> {
        CollabNode::new(&self.txn, self.item())
    }

    fn root_mut(&mut self) -> Self::NodeMut<'_> {
        let out = self.item();
        CollabNodeMut::new(&mut self.txn, out)
    }

    fn replace_root(&mut self, value: Value) -> Value {
        let old = out_to_value(&self.item(), &self.txn);
        self.root
            .insert(&mut self.txn, self.item_key.clone(), to_prelim(&value));
        old
    }

    fn check_value(&self, value: &Value) -> Result<(), PatchError> {
        check_representable(value)
    }
}
