//! Reference token helpers.

use crate::JsonPointerError;

/// Unescapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
/// A `~` followed by anything else is rejected.
///
/// # Example
///
/// ```
/// use ypatch_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b").unwrap(), "a~b");
/// assert_eq!(unescape_component("c~1d").unwrap(), "c/d");
/// assert!(unescape_component("e~2f").is_err());
/// ```
pub fn unescape_component(component: &str) -> Result<String, JsonPointerError> {
    if !component.contains('~') {
        return Ok(component.to_string());
    }
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(JsonPointerError::InvalidEscape(component.to_string())),
        }
    }
    Ok(out)
}

/// Escapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use ypatch_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("no-escapes"), "no-escapes");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a string represents a valid non-negative integer array index.
///
/// Leading zeros are not allowed (except for `"0"` itself).
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Parse a reference token as an array index.
///
/// Returns `None` for the end-of-array token `-`, for tokens that are not
/// canonical decimal integers, and for values that overflow `usize`.
pub fn parse_index(token: &str) -> Option<usize> {
    if !is_valid_index(token) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo").unwrap(), "foo");
        assert_eq!(unescape_component("a~0b").unwrap(), "a~b");
        assert_eq!(unescape_component("c~1d").unwrap(), "c/d");
        assert_eq!(unescape_component("a~0b~1c").unwrap(), "a~b/c");
        assert_eq!(unescape_component("~0~0").unwrap(), "~~");
        assert_eq!(unescape_component("~1~1").unwrap(), "//");
        // ~01 is "~" followed by "1", not "/"
        assert_eq!(unescape_component("~01").unwrap(), "~1");
    }

    #[test]
    fn test_unescape_rejects_bad_escapes() {
        assert!(matches!(
            unescape_component("~"),
            Err(JsonPointerError::InvalidEscape(_))
        ));
        assert!(unescape_component("a~2").is_err());
        assert!(unescape_component("~a").is_err());
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("a~b"), "a~0b");
        assert_eq!(escape_component("c/d"), "c~1d");
        assert_eq!(escape_component("a~b/c"), "a~0b~1c");
        assert_eq!(escape_component("~1"), "~01");
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("-"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index("abc"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("01"));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("-"), None);
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("99999999999999999999999999"), None);
    }
}
