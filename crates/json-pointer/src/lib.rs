//! JSON Pointer (RFC 6901) paths.
//!
//! A [`Pointer`] is a sequence of unescaped reference tokens. It parses from
//! and formats to the `/a/b~1c` text form and is the addressing type used by
//! the patch and snapshot machinery in `ypatch`.
//!
//! # Example
//!
//! ```
//! use ypatch_json_pointer::Pointer;
//!
//! let ptr: Pointer = "/foo/bar".parse().unwrap();
//! assert_eq!(ptr.tokens(), ["foo", "bar"]);
//! assert_eq!(ptr.child("a/b").to_string(), "/foo/bar/a~1b");
//! ```

use thiserror::Error;

pub mod types;
pub use types::{PathStep, Pointer};

pub mod util;
pub use util::{escape_component, is_valid_index, parse_index, unescape_component};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("POINTER_INVALID: {0:?}")]
    PointerInvalid(String),
    #[error("INVALID_ESCAPE: {0:?}")]
    InvalidEscape(String),
}
