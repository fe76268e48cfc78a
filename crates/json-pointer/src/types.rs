//! The [`Pointer`] value type.

use std::fmt;
use std::str::FromStr;

use crate::util::{escape_component, unescape_component};
use crate::JsonPointerError;

/// A step in a JSON Pointer path: an object key or a decimal array index.
pub type PathStep = String;

/// An RFC 6901 JSON Pointer: an ordered sequence of unescaped reference
/// tokens. The empty sequence refers to the whole document.
///
/// Tokens are stored unescaped; escaping happens only when the pointer is
/// formatted with [`Display`](fmt::Display).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer {
    tokens: Vec<PathStep>,
}

impl Pointer {
    /// The pointer to the document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(tokens: Vec<PathStep>) -> Self {
        Self { tokens }
    }

    /// Parse JSON Pointer text.
    ///
    /// # Example
    ///
    /// ```
    /// use ypatch_json_pointer::Pointer;
    ///
    /// let ptr = Pointer::parse("/a~0b/c~1d/1").unwrap();
    /// assert_eq!(ptr.tokens(), ["a~b", "c/d", "1"]);
    /// assert!(Pointer::parse("").unwrap().is_root());
    /// assert!(Pointer::parse("foo").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, JsonPointerError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = text.strip_prefix('/') else {
            return Err(JsonPointerError::PointerInvalid(text.to_string()));
        };
        let tokens = rest
            .split('/')
            .map(unescape_component)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[PathStep] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if this pointer refers to the document root.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: impl Into<PathStep>) {
        self.tokens.push(token.into());
    }

    /// A new pointer one level deeper, at `token`.
    pub fn child(&self, token: impl Into<PathStep>) -> Self {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend_from_slice(&self.tokens);
        tokens.push(token.into());
        Self { tokens }
    }

    /// The pointer to the containing node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.split_last().map(|(parent, _)| Self::new(parent.to_vec()))
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Split into the parent tokens and the final token.
    pub fn split_last(&self) -> Option<(&[PathStep], &str)> {
        self.tokens
            .split_last()
            .map(|(last, parent)| (parent, last.as_str()))
    }

    /// `true` if `prefix` is equal to this pointer or one of its ancestors.
    pub fn starts_with(&self, prefix: &Pointer) -> bool {
        self.tokens.starts_with(&prefix.tokens)
    }

    /// `true` if this pointer is a proper ancestor of `other`.
    ///
    /// ```
    /// use ypatch_json_pointer::Pointer;
    ///
    /// let parent = Pointer::parse("/foo").unwrap();
    /// let child = Pointer::parse("/foo/bar").unwrap();
    /// assert!(parent.is_strict_prefix_of(&child));
    /// assert!(!child.is_strict_prefix_of(&parent));
    /// assert!(!parent.is_strict_prefix_of(&parent));
    /// ```
    pub fn is_strict_prefix_of(&self, other: &Pointer) -> bool {
        self.tokens.len() < other.tokens.len() && other.starts_with(self)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_component(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = JsonPointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<PathStep>> for Pointer {
    fn from(tokens: Vec<PathStep>) -> Self {
        Self::new(tokens)
    }
}

impl<S: Into<PathStep>> FromIterator<S> for Pointer {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
