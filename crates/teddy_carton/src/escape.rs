//! Markup escaping for host tree serialization.

use std::borrow::Cow;

/// Escape a string placed in a text node. Quotes are left alone.
#[inline]
pub fn escape_text(value: &str) -> Cow<'_, str> {
    htmlize::escape_text(value)
}

/// Escape a string placed inside a double-quoted attribute value.
#[inline]
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    htmlize::escape_attribute(value)
}
