//! Host node definitions.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::event::EventHandler;

/// Unique identifier for host nodes.
pub type HostId = u64;

/// A node in the host tree.
#[derive(Debug, Clone)]
pub struct HostNode {
    /// Unique node ID
    pub id: HostId,
    /// Node type and content
    pub kind: HostKind,
    /// Parent node, if attached
    pub parent: Option<HostId>,
    /// Child node IDs, in document order
    pub children: SmallVec<[HostId; 4]>,
}

impl HostNode {
    /// Create a new detached host node.
    pub fn new(id: HostId, kind: HostKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Tag name for elements.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            HostKind::Element(el) => Some(el.tag.as_str()),
            _ => None,
        }
    }

    /// Whether this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self.kind, HostKind::Element(_))
    }

    /// Text value for text nodes; `None` for everything else.
    pub fn node_value(&self) -> Option<&str> {
        match &self.kind {
            HostKind::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Host node variants.
#[derive(Debug, Clone)]
pub enum HostKind {
    /// A tagged element
    Element(ElementData),
    /// A text node
    Text(CompactString),
    /// Grouping container; its children move out when it is appended
    Fragment,
    /// Markup assigned through `innerHTML`, emitted verbatim
    Raw(CompactString),
}

/// A single `name="value"` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: CompactString,
    pub value: CompactString,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Element payload.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lower-case tag name
    pub tag: CompactString,
    /// Attributes in insertion order
    pub attributes: SmallVec<[Attribute; 4]>,
    /// Listeners keyed by event name
    pub listeners: FxHashMap<CompactString, SmallVec<[EventHandler; 1]>>,
}

impl ElementData {
    /// Create an element payload with no attributes.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}
