//! Node builder (hyperscript).

use std::rc::Rc;

use compact_str::CompactString;

use crate::component::{Component, ComponentType};
use crate::node::{ComponentDescriptor, Node, VNode};
use crate::props::Props;

/// What [`h`] is asked to build.
///
/// Decided when the node is built, so nothing downstream has to guess
/// whether a type is a tag, a function or a component.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// A host element tag name
    Tag(CompactString),
    /// A stateful component type
    Component(ComponentType),
    /// A plain function returning an already built node
    Function(fn(Props) -> Node),
}

impl From<&str> for NodeType {
    fn from(value: &str) -> Self {
        NodeType::Tag(value.into())
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        NodeType::Tag(value.into())
    }
}

impl From<ComponentType> for NodeType {
    fn from(value: ComponentType) -> Self {
        NodeType::Component(value)
    }
}

impl From<fn(Props) -> Node> for NodeType {
    fn from(value: fn(Props) -> Node) -> Self {
        NodeType::Function(value)
    }
}

/// Node type for component `C`.
pub fn component<C: Component>() -> NodeType {
    NodeType::Component(ComponentType::of::<C>())
}

/// Node type for a functional shorthand.
pub fn functional(f: fn(Props) -> Node) -> NodeType {
    NodeType::Function(f)
}

/// Build a node from a type, optional props and children.
///
/// Absent props become an empty mapping, then `children` is merged in
/// under the reserved key. The result is:
///
/// - a [`Node::Component`] descriptor for component types,
/// - whatever the function returns for functional types,
/// - a [`Node::Element`] otherwise.
///
/// Prop values are not validated here. A value that cannot be applied to
/// a host element is reported by the renderer.
///
/// ```
/// use teddy_relief::{h, Props};
///
/// let node = h("div", Some(Props::new().with("id", "x")), [h("h1", None, ["Hi".into()])]);
/// let div = node.as_element().unwrap();
/// assert_eq!(div.tag(), "div");
/// assert_eq!(div.children().len(), 1);
/// ```
pub fn h(
    ty: impl Into<NodeType>,
    props: Option<Props>,
    children: impl IntoIterator<Item = Node>,
) -> Node {
    let mut props = props.unwrap_or_default();
    props.set_children(children.into_iter().collect());

    match ty.into() {
        NodeType::Component(ty) => Node::Component(ComponentDescriptor::new(ty, props)),
        NodeType::Function(f) => f(props),
        NodeType::Tag(tag) => Node::Element(Rc::new(VNode::new(tag, props))),
    }
}

/// Group children without a wrapping element.
///
/// Takes the `children` out of `props` and returns them as a sequence led
/// by [`Node::FragmentMarker`]. Usable directly or through
/// `h(functional(fragment), None, ..)`.
pub fn fragment(mut props: Props) -> Node {
    let children = props.take_children();
    let mut entries = Vec::with_capacity(children.len() + 1);
    entries.push(Node::FragmentMarker);
    entries.extend(children);
    Node::Sequence(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Context;

    struct Counter;

    impl Component for Counter {
        fn create(_props: &Props) -> Self {
            Counter
        }

        fn render(&self, _cx: &Context<'_>) -> Node {
            h("p", None, ["0".into()])
        }
    }

    fn shout(props: Props) -> Node {
        let word = props.get_str("word").unwrap_or("").to_uppercase();
        h("strong", None, [word.into()])
    }

    #[test]
    fn test_tag_node() {
        let node = h("div", Some(Props::new().with("id", "x")), [h("h1", None, ["Hi".into()])]);
        let div = node.as_element().unwrap();
        assert_eq!(div.tag(), "div");
        assert_eq!(div.props().get_str("id"), Some("x"));

        let h1 = div.children()[0].as_element().unwrap();
        assert_eq!(h1.tag(), "h1");
        assert_eq!(h1.children(), &[Node::from("Hi")]);
    }

    #[test]
    fn test_absent_props_normalized() {
        let node = h("br", None, []);
        let br = node.as_element().unwrap();
        assert_eq!(br.props().len(), 1);
        assert!(br.children().is_empty());
    }

    #[test]
    fn test_component_descriptor() {
        let node = h(component::<Counter>(), Some(Props::new().with("start", 1)), ["x".into()]);
        let Node::Component(desc) = node else {
            panic!("expected a component descriptor");
        };
        assert_eq!(desc.ty(), ComponentType::of::<Counter>());
        assert_eq!(desc.props().get_int("start"), Some(1));
        assert_eq!(desc.props().children(), &[Node::from("x")]);
    }

    #[test]
    fn test_functional_shorthand() {
        let node = h(functional(shout), Some(Props::new().with("word", "hey")), []);
        let strong = node.as_element().unwrap();
        assert_eq!(strong.tag(), "strong");
        assert_eq!(strong.children(), &[Node::from("HEY")]);
    }

    #[test]
    fn test_fragment_is_tagged_sequence() {
        let a = h("a", None, []);
        let b = h("b", None, []);
        let node = h(functional(fragment), None, [a.clone(), b.clone()]);

        assert!(node.is_fragment());
        assert_eq!(node, Node::Sequence(vec![Node::FragmentMarker, a, b]));
    }
}
