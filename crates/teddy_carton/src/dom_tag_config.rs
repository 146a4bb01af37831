//! DOM tag and prop-key configuration.

use phf::phf_set;

/// Elements that never carry children or a closing tag
pub static VOID_TAGS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr"
};

/// Prop keys assigned as host properties instead of string attributes
pub static DIRECT_PROPERTIES: phf::Set<&'static str> = phf_set! {
    "innerHTML", "className"
};

/// Prop key holding nested content
pub const CHILDREN_KEY: &str = "children";

/// Two-character prefix marking an event subscription prop
pub const EVENT_PREFIX: &str = "on";

/// Check if element is void (self-closing)
#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}

/// Check if a prop key is applied as a direct host property
#[inline]
pub fn is_direct_property(key: &str) -> bool {
    DIRECT_PROPERTIES.contains(key)
}

/// Check if a prop key subscribes to an event
#[inline]
pub fn is_event_key(key: &str) -> bool {
    key.starts_with(EVENT_PREFIX)
}

/// Event name for an event prop key: the suffix after the prefix, lower-cased.
///
/// Returns `None` for keys that are not event keys.
pub fn event_name(key: &str) -> Option<String> {
    key.strip_prefix(EVENT_PREFIX)
        .map(|suffix| suffix.to_ascii_lowercase())
}
