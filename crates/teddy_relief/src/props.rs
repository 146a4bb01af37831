//! Prop and state mappings.

use compact_str::{format_compact, CompactString, ToCompactString};
use smallvec::SmallVec;
use teddy_canvas::{Event, EventHandler};
use teddy_carton::CHILDREN_KEY;
use thiserror::Error;

use crate::node::Node;

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(CompactString),
    /// Event callback, bound when the key carries the event prefix
    Handler(EventHandler),
    /// Nested content, only meaningful under the `children` key
    Children(Vec<Node>),
}

/// A prop value that has no string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Prop '{key}' holds a {kind} value that cannot be coerced to an attribute")]
pub struct AttributeCoercionError {
    pub key: CompactString,
    pub kind: &'static str,
}

impl PropValue {
    /// Short name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "bool",
            PropValue::Int(_) => "int",
            PropValue::Float(_) => "float",
            PropValue::Str(_) => "string",
            PropValue::Handler(_) => "handler",
            PropValue::Children(_) => "children",
        }
    }

    /// String form used when the value is written as an attribute.
    pub fn coerce_attribute(&self, key: &str) -> Result<CompactString, AttributeCoercionError> {
        match self {
            PropValue::Str(s) => Ok(s.clone()),
            PropValue::Int(i) => Ok(i.to_compact_string()),
            PropValue::Float(f) => Ok(format_number(*f)),
            PropValue::Bool(b) => Ok(b.to_compact_string()),
            PropValue::Null | PropValue::Handler(_) | PropValue::Children(_) => {
                Err(AttributeCoercionError {
                    key: key.into(),
                    kind: self.kind(),
                })
            }
        }
    }

    /// The handler, if this value is one.
    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// The string, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The integer, if this value is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The boolean, if this value is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Format a float the way a script engine prints numbers.
///
/// Integral values drop the fraction, negative zero prints as `0`,
/// magnitudes outside `[1e-6, 1e21)` use exponent form with an explicit
/// sign (`1e+21`, `1.5e-7`) and non-finite values use words.
pub(crate) fn format_number(value: f64) -> CompactString {
    if value.is_nan() {
        CompactString::const_new("NaN")
    } else if value.is_infinite() {
        if value > 0.0 {
            CompactString::const_new("Infinity")
        } else {
            CompactString::const_new("-Infinity")
        }
    } else if value == 0.0 {
        CompactString::const_new("0")
    } else if !(1e-6..1e21).contains(&value.abs()) {
        let formatted = format_compact!("{:e}", value);
        if formatted.contains("e-") {
            formatted
        } else {
            formatted.replacen('e', "e+", 1).into()
        }
    } else if value.fract() == 0.0 {
        format_compact!("{:.0}", value)
    } else {
        value.to_compact_string()
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value.into())
    }
}

impl From<CompactString> for PropValue {
    fn from(value: CompactString) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value.into())
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Int(value.into())
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        PropValue::Handler(value)
    }
}

impl From<Vec<Node>> for PropValue {
    fn from(value: Vec<Node>) -> Self {
        PropValue::Children(value)
    }
}

/// An insertion-ordered prop mapping.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Iteration order is insertion order, which is also the order attributes
/// are written to the host element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: SmallVec<[(CompactString, PropValue); 4]>,
}

/// Component state shares the prop mapping shape.
pub type State = Props;

impl Props {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<CompactString>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style event handler insert, e.g. `.on("onClick", |e| ..)`.
    pub fn on(self, key: impl Into<CompactString>, handler: impl Fn(&Event) + 'static) -> Self {
        self.with(key, EventHandler::new(handler))
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<CompactString>, value: impl Into<PropValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// Look up an integer value.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(PropValue::as_int)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries, `children` included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nested content under the reserved `children` key.
    pub fn children(&self) -> &[Node] {
        match self.get(CHILDREN_KEY) {
            Some(PropValue::Children(children)) => children.as_slice(),
            _ => &[],
        }
    }

    /// Replace the nested content.
    pub fn set_children(&mut self, children: Vec<Node>) {
        self.insert(CHILDREN_KEY, PropValue::Children(children));
    }

    /// Take the nested content out, leaving none behind.
    pub fn take_children(&mut self) -> Vec<Node> {
        match self.remove(CHILDREN_KEY) {
            Some(PropValue::Children(children)) => children,
            _ => Vec::new(),
        }
    }
}

impl<K: Into<CompactString>> FromIterator<(K, PropValue)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, PropValue)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}
