//! JSON Patch (RFC 6902).
//!
//! # Operations
//!
//! All standard RFC 6902 operations are supported:
//! `add`, `remove`, `replace`, `move`, `copy`, `test`.
//!
//! Patches apply to any [`Tree`](crate::tree::Tree), plain or
//! collaborative.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_json_patch, apply_op, apply_patch};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{Op, PatchError};
