//! Renderer state and subtree materialization.
//!
//! The renderer owns the host tree, the reconciliation side table and every
//! component instance. Materialization only ever creates host nodes; all
//! mutation of an already-live subtree goes through the diff engine.

use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use teddy_canvas::{HostId, HostTree};
use teddy_carton::{event_name, is_direct_property, is_event_key, CHILDREN_KEY};
use teddy_relief::{ComponentDescriptor, InstanceId, Node, PropValue, UpdateQueue, VNode};

use crate::diff::{DiffMode, Pass};
use crate::errors::{RenderError, RenderResult};
use crate::instance::ComponentInstance;
use crate::metadata::{Metadata, MetadataTable};
use crate::options::RendererOptions;

/// Result of materializing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// A plain host subtree
    Host(HostId),
    /// The output of a freshly created component instance
    Component { host: HostId, instance: InstanceId },
}

impl Materialized {
    /// Root host node of the materialized subtree.
    pub fn host(&self) -> HostId {
        match *self {
            Materialized::Host(host) | Materialized::Component { host, .. } => host,
        }
    }

    /// The created instance, for component descriptors.
    pub fn instance(&self) -> Option<InstanceId> {
        match *self {
            Materialized::Host(_) => None,
            Materialized::Component { instance, .. } => Some(instance),
        }
    }
}

/// Reconciles virtual nodes onto a host tree.
#[derive(Debug)]
pub struct Renderer {
    pub(crate) host: HostTree,
    pub(crate) metadata: MetadataTable,
    pub(crate) instances: FxHashMap<InstanceId, ComponentInstance>,
    pub(crate) queue: UpdateQueue,
    pub(crate) options: RendererOptions,
    pub(crate) pass: Pass,
    /// Nodes adopted by a wholesale replacement since the last flush ended
    pub(crate) replaced: FxHashSet<HostId>,
    next_instance: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_options(RendererOptions::default())
    }

    pub fn with_options(options: RendererOptions) -> Self {
        Self {
            host: HostTree::new(),
            metadata: MetadataTable::default(),
            instances: FxHashMap::default(),
            queue: UpdateQueue::new(),
            options,
            pass: Pass::default(),
            replaced: FxHashSet::default(),
            next_instance: 1,
        }
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// The host tree being rendered into.
    pub fn host(&self) -> &HostTree {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut HostTree {
        &mut self.host
    }

    /// Create a detached element to render into.
    pub fn create_container(&mut self, tag: &str) -> HostId {
        self.host.create_element(tag)
    }

    /// Look up a live component instance.
    pub fn instance(&self, id: InstanceId) -> Option<&ComponentInstance> {
        self.instances.get(&id)
    }

    /// All live component instances, in no particular order.
    pub fn instances(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.instances.values()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Root host node currently holding a component's output.
    pub fn dom_node(&self, id: InstanceId) -> Option<HostId> {
        self.instances.get(&id).and_then(|instance| instance.dom)
    }

    /// What was last placed into `host`, if anything.
    pub fn metadata(&self, host: HostId) -> Option<&Metadata> {
        self.metadata.get(host)
    }

    /// Render `node` into `target`.
    ///
    /// The first render into a target places the subtree and fires mount
    /// hooks; later renders diff against what is already there. Returns the
    /// placed root for placements and `target` for updates.
    pub fn render(&mut self, node: &Node, target: HostId) -> RenderResult<HostId> {
        if !self.host.contains(target) {
            return Err(RenderError::UnknownHostNode(target));
        }

        let mode = if self.metadata.contains(target) {
            DiffMode::Update
        } else {
            DiffMode::Placement { dirty: true }
        };
        tracing::debug!("render: {:?} into {}", mode, target);

        self.diff(target, node, mode)
    }

    /// Build a detached host subtree for `node`.
    ///
    /// With `dirty` set, components placed inside the subtree get their
    /// mount hooks; the root itself is never mounted here.
    pub fn materialize(
        &mut self,
        node: &Node,
        target: Option<HostId>,
        dirty: bool,
    ) -> RenderResult<Materialized> {
        self.begin_pass();
        let result = self.materialize_node(node, target, dirty);
        self.end_pass(result)
    }

    /// Remove everything rendered into `target`.
    ///
    /// Returns the number of host nodes removed. The next render into
    /// `target` is a placement again.
    pub fn unmount(&mut self, target: HostId) -> RenderResult<usize> {
        if !self.host.contains(target) {
            return Err(RenderError::UnknownHostNode(target));
        }

        let mut removed = Vec::new();
        for child in self.host.children(target).to_vec() {
            removed.extend(self.host.discard(child));
        }
        self.forget(&removed);
        self.metadata.forget(&[target]);

        tracing::debug!("unmount: removed {} nodes from {}", removed.len(), target);
        Ok(removed.len())
    }

    pub(crate) fn materialize_node(
        &mut self,
        node: &Node,
        target: Option<HostId>,
        dirty: bool,
    ) -> RenderResult<Materialized> {
        match node {
            Node::Text(text) => Ok(Materialized::Host(self.host.create_text(text))),
            Node::Sequence(entries) => self.materialize_fragment(entries, dirty),
            Node::FragmentMarker => Err(RenderError::invalid_node(
                "fragment marker outside of a fragment",
            )),
            Node::Component(descriptor) => self.materialize_component(descriptor, target, dirty),
            Node::Element(vnode) => self.materialize_element(vnode, dirty),
        }
    }

    fn materialize_fragment(&mut self, entries: &[Node], dirty: bool) -> RenderResult<Materialized> {
        let Some((Node::FragmentMarker, children)) = entries.split_first() else {
            return Err(RenderError::invalid_node(
                "sequence without a leading fragment marker",
            ));
        };

        let container = self.host.create_fragment();
        for child in children {
            if let Err(err) = self.place(child, container, dirty) {
                self.pass.errors.push(err);
            }
        }
        Ok(Materialized::Host(container))
    }

    fn materialize_component(
        &mut self,
        descriptor: &ComponentDescriptor,
        target: Option<HostId>,
        dirty: bool,
    ) -> RenderResult<Materialized> {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;

        let mut instance = ComponentInstance::new(id, descriptor.ty(), descriptor.props().clone());
        let rendered = instance.render(&self.queue);
        instance.base = target;
        self.instances.insert(id, instance);

        let output = match self.materialize_node(&rendered, None, dirty) {
            Ok(output) => output,
            Err(err) => {
                self.instances.remove(&id);
                return Err(err);
            }
        };

        let host = output.host();
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.node = Some(rendered);
            instance.dom = Some(host);
        }
        tracing::debug!(
            "materialize: instance {} of {} rendered to {}",
            id,
            descriptor.ty().name(),
            host
        );

        Ok(Materialized::Component { host, instance: id })
    }

    fn materialize_element(&mut self, vnode: &Rc<VNode>, dirty: bool) -> RenderResult<Materialized> {
        if vnode.tag().is_empty() {
            return Err(RenderError::invalid_node("element with an empty tag"));
        }

        let dom = self.host.create_element(vnode.tag());
        let props = vnode.props();

        for (key, value) in props.iter().filter(|(key, _)| is_event_key(key)) {
            let Some(event) = event_name(key) else {
                continue;
            };
            match value.as_handler() {
                Some(handler) => self.host.add_event_listener(dom, &event, handler.clone())?,
                None => tracing::warn!(
                    "materialize: ignoring {} value for event prop '{}'",
                    value.kind(),
                    key
                ),
            }
        }

        for (key, value) in props.iter().filter(|(key, _)| is_plain_attribute(key)) {
            self.host.set_attribute(dom, key, &coerce_or_empty(key, value))?;
        }

        for (key, value) in props.iter().filter(|(key, _)| is_direct_property(key)) {
            self.host.set_property(dom, key, &coerce_or_empty(key, value))?;
        }

        for child in vnode.children() {
            match child {
                Node::Text(text) => {
                    let text = self.host.create_text(text);
                    self.host.append_child(dom, text)?;
                }
                other => {
                    if let Err(err) = self.place(other, dom, dirty) {
                        self.pass.errors.push(err);
                    }
                }
            }
        }

        vnode.link(dom);
        Ok(Materialized::Host(dom))
    }

    /// Materialize `node` and append it under `target`.
    ///
    /// Records what was placed in the side table. When `dirty`, a placed
    /// component is told it will mount before the append and that it did
    /// mount after.
    pub(crate) fn place(&mut self, node: &Node, target: HostId, dirty: bool) -> RenderResult<HostId> {
        let materialized = self.materialize_node(node, Some(target), dirty)?;
        let host = materialized.host();
        let instance = materialized.instance();

        let metadata = match instance {
            Some(id) => Metadata::Component(id),
            None => Metadata::Node(node.clone()),
        };
        self.metadata.insert(target, metadata);

        if dirty {
            if let Some(id) = instance {
                self.with_instance(id, |instance, queue| instance.will_mount(queue, host));
            }
        }

        self.host.append_child(target, host)?;

        if dirty {
            if let Some(id) = instance {
                self.with_instance(id, |instance, queue| instance.did_mount(queue, host));
            }
        }

        tracing::trace!("place: {} under {} (dirty: {})", host, target, dirty);
        Ok(host)
    }

    pub(crate) fn with_instance(
        &mut self,
        id: InstanceId,
        f: impl FnOnce(&mut ComponentInstance, &UpdateQueue),
    ) {
        if let Some(instance) = self.instances.get_mut(&id) {
            f(instance, &self.queue);
        }
    }

    /// Drop side-table entries and instances tied to removed host nodes.
    pub(crate) fn forget(&mut self, removed: &[HostId]) {
        if removed.is_empty() {
            return;
        }
        self.metadata.forget(removed);

        let removed: FxHashSet<HostId> = removed.iter().copied().collect();
        self.instances.retain(|id, instance| {
            let alive = !instance.dom.is_some_and(|dom| removed.contains(&dom));
            if !alive {
                tracing::debug!("forget: dropping instance {}", id);
            }
            alive
        });
    }
}

fn is_plain_attribute(key: &str) -> bool {
    key != CHILDREN_KEY && !is_event_key(key) && !is_direct_property(key)
}

fn coerce_or_empty(key: &str, value: &PropValue) -> CompactString {
    value.coerce_attribute(key).unwrap_or_else(|err| {
        tracing::warn!("materialize: {}", err);
        CompactString::default()
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use teddy_relief::{component, fragment, h, Component, Context, Props};

    struct Label;

    impl Component for Label {
        fn create(_props: &Props) -> Self {
            Label
        }

        fn render(&self, cx: &Context<'_>) -> Node {
            let text = cx.props().get_str("text").unwrap_or("label");
            h("span", None, [text.into()])
        }
    }

    #[test]
    fn test_materialize_text() {
        let mut renderer = Renderer::new();
        let result = renderer.materialize(&"hello".into(), None, false).unwrap();
        assert_eq!(renderer.host().node_value(result.host()), Some("hello"));
        assert_eq!(result.instance(), None);
    }

    #[test]
    fn test_materialize_element_links_vnode() {
        let mut renderer = Renderer::new();
        let node = h("p", Some(Props::new().with("id", "intro")), ["text".into()]);
        let result = renderer.materialize(&node, None, false).unwrap();

        let vnode = node.as_element().unwrap();
        assert_eq!(vnode.dom(), Some(result.host()));
        assert_eq!(
            renderer.host().outer_html(result.host()),
            r#"<p id="intro">text</p>"#
        );
        // detached: nothing was placed into a target
        assert_eq!(renderer.host().parent(result.host()), None);
    }

    #[test]
    fn test_materialize_component() {
        let mut renderer = Renderer::new();
        let node = h(
            component::<Label>(),
            Some(Props::new().with("text", "name")),
            [],
        );
        let result = renderer.materialize(&node, None, true).unwrap();

        let id = result.instance().unwrap();
        let instance = renderer.instance(id).unwrap();
        assert_eq!(instance.dom(), Some(result.host()));
        assert_eq!(instance.base(), None);
        assert!(!instance.is_mounted());
        assert_eq!(
            renderer.host().outer_html(result.host()),
            "<span>name</span>"
        );
    }

    #[test]
    fn test_event_prop_without_handler_is_skipped() {
        let mut renderer = Renderer::new();
        let node = h("button", Some(Props::new().with("onClick", "nope")), []);
        let result = renderer.materialize(&node, None, false).unwrap();

        assert!(renderer.host().listeners(result.host(), "click").is_empty());
        assert_eq!(renderer.host().outer_html(result.host()), "<button></button>");
    }

    #[test]
    fn test_events_attributes_and_properties() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let seen = clicks.clone();

        let mut renderer = Renderer::new();
        let node = h(
            "div",
            Some(
                Props::new()
                    .with("id", "box")
                    .with("className", "wide")
                    .with("tabindex", 2)
                    .on("onClick", move |event| seen.borrow_mut().push(event.target)),
            ),
            [],
        );
        let dom = renderer.materialize(&node, None, false).unwrap().host();

        assert_eq!(
            renderer.host().outer_html(dom),
            r#"<div id="box" tabindex="2" class="wide"></div>"#
        );
        for handler in renderer.host().listeners(dom, "click") {
            handler.call(&teddy_canvas::Event::new("click", dom));
        }
        assert_eq!(*clicks.borrow(), vec![dom]);
    }

    #[test]
    fn test_uncoercible_attribute_becomes_empty() {
        let mut renderer = Renderer::new();
        let node = h("input", Some(Props::new().with("value", PropValue::Null)), []);
        let dom = renderer.materialize(&node, None, false).unwrap().host();
        assert_eq!(renderer.host().attribute(dom, "value"), Some(""));
    }

    #[test]
    fn test_inner_html_property() {
        let mut renderer = Renderer::new();
        let node = h(
            "div",
            Some(Props::new().with("innerHTML", "<b>raw</b>")),
            [],
        );
        let dom = renderer.materialize(&node, None, false).unwrap().host();
        assert_eq!(renderer.host().inner_html(dom), "<b>raw</b>");
    }

    #[test]
    fn test_fragment_children_flatten() {
        let mut renderer = Renderer::new();
        let node = fragment(Props::new().with(
            CHILDREN_KEY,
            vec![h("a", None, []), h("b", None, [])],
        ));
        let target = renderer.create_container("div");
        renderer.render(&node, target).unwrap();

        assert_eq!(renderer.host().inner_html(target), "<a></a><b></b>");
    }

    #[test]
    fn test_stray_fragment_marker() {
        let mut renderer = Renderer::new();
        let err = renderer
            .materialize(&Node::FragmentMarker, None, false)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidNode { .. }));
    }

    #[test]
    fn test_sequence_without_marker() {
        let mut renderer = Renderer::new();
        let node = Node::Sequence(vec!["a".into()]);
        let err = renderer.materialize(&node, None, false).unwrap_err();
        assert!(matches!(err, RenderError::InvalidNode { .. }));
    }

    #[test]
    fn test_invalid_child_does_not_stop_siblings() {
        let mut renderer = Renderer::new();
        let node = h(
            "ul",
            None,
            [
                h("li", None, ["one".into()]),
                Node::FragmentMarker,
                h("li", None, ["two".into()]),
            ],
        );
        let target = renderer.create_container("div");
        let err = renderer.render(&node, target).unwrap_err();

        assert!(matches!(err, RenderError::InvalidNode { .. }));
        assert_eq!(
            renderer.host().inner_html(target),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_unmount() {
        let mut renderer = Renderer::new();
        let target = renderer.create_container("div");
        let node = h(component::<Label>(), None, []);
        renderer.render(&node, target).unwrap();
        assert_eq!(renderer.instance_count(), 1);

        let removed = renderer.unmount(target).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(renderer.instance_count(), 0);
        assert_eq!(renderer.metadata(target), None);
        assert_eq!(renderer.host().inner_html(target), "");
    }

    #[test]
    fn test_unknown_target() {
        let mut renderer = Renderer::new();
        let err = renderer.render(&"x".into(), 999).unwrap_err();
        assert_eq!(err, RenderError::UnknownHostNode(999));
    }
}
