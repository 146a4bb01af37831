//! Virtual node descriptors.

use std::cell::Cell;
use std::rc::Rc;

use compact_str::{CompactString, ToCompactString};
use teddy_canvas::HostId;

use crate::component::ComponentType;
use crate::props::{format_number, Props};

/// A renderable description.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A primitive, rendered as a text node
    Text(CompactString),
    /// A host element description
    Element(Rc<VNode>),
    /// A component type paired with its props, awaiting instantiation
    Component(ComponentDescriptor),
    /// A sequence of siblings. Only valid when tagged with a leading
    /// [`Node::FragmentMarker`]
    Sequence(Vec<Node>),
    /// The sentinel that tags a sequence as a fragment
    FragmentMarker,
}

impl Node {
    /// Whether this node is a fragment: a sequence led by the marker.
    pub fn is_fragment(&self) -> bool {
        matches!(self, Node::Sequence(entries) if entries.first() == Some(&Node::FragmentMarker))
    }

    /// The element description, if any.
    pub fn as_element(&self) -> Option<&Rc<VNode>> {
        match self {
            Node::Element(vnode) => Some(vnode),
            _ => None,
        }
    }

    /// The text of a primitive node, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value.into())
    }
}

impl From<CompactString> for Node {
    fn from(value: CompactString) -> Self {
        Node::Text(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Text(value.to_compact_string())
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Text(value.to_compact_string())
    }
}

impl From<usize> for Node {
    fn from(value: usize) -> Self {
        Node::Text(value.to_compact_string())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Text(format_number(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Text(value.to_compact_string())
    }
}

impl From<VNode> for Node {
    fn from(value: VNode) -> Self {
        Node::Element(Rc::new(value))
    }
}

impl From<ComponentDescriptor> for Node {
    fn from(value: ComponentDescriptor) -> Self {
        Node::Component(value)
    }
}

/// An immutable description of one host element.
///
/// The only interior mutability is the back-reference to the host node
/// it was last materialized into.
#[derive(Debug)]
pub struct VNode {
    tag: CompactString,
    props: Props,
    dom: Cell<Option<HostId>>,
}

impl VNode {
    /// Create a new element description.
    pub fn new(tag: impl Into<CompactString>, props: Props) -> Self {
        Self {
            tag: tag.into(),
            props,
            dom: Cell::new(None),
        }
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Props, `children` included.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Nested content.
    pub fn children(&self) -> &[Node] {
        self.props.children()
    }

    /// Host node this description last materialized into.
    pub fn dom(&self) -> Option<HostId> {
        self.dom.get()
    }

    /// Record the host node this description materialized into.
    pub fn link(&self, host: HostId) {
        self.dom.set(Some(host));
    }
}

impl PartialEq for VNode {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.props == other.props
    }
}

/// A component type paired with its merged props-with-children.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    ty: ComponentType,
    props: Props,
}

impl ComponentDescriptor {
    /// Pair a component type with its props.
    pub fn new(ty: ComponentType, props: Props) -> Self {
        Self { ty, props }
    }

    /// The component type.
    pub fn ty(&self) -> ComponentType {
        self.ty
    }

    /// The merged props.
    pub fn props(&self) -> &Props {
        &self.props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_become_text() {
        assert_eq!(Node::from("hi"), Node::Text("hi".into()));
        assert_eq!(Node::from(7), Node::Text("7".into()));
        assert_eq!(Node::from(2.0), Node::Text("2".into()));
        assert_eq!(Node::from(false), Node::Text("false".into()));
    }

    #[test]
    fn test_is_fragment() {
        let tagged = Node::Sequence(vec![Node::FragmentMarker, Node::from("a")]);
        let bare = Node::Sequence(vec![Node::from("a")]);
        assert!(tagged.is_fragment());
        assert!(!bare.is_fragment());
        assert!(!Node::FragmentMarker.is_fragment());
    }

    #[test]
    fn test_vnode_link() {
        let vnode = VNode::new("div", Props::new());
        assert_eq!(vnode.dom(), None);
        vnode.link(4);
        assert_eq!(vnode.dom(), Some(4));
        // The back-reference does not take part in equality
        assert_eq!(vnode, VNode::new("div", Props::new()));
    }
}
