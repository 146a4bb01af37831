//! Component instances owned by a renderer.

use std::fmt;

use teddy_canvas::HostId;
use teddy_relief::{Component, ComponentType, Context, InstanceId, Node, Props, State, UpdateQueue};

/// A live component together with its render bookkeeping.
///
/// `base` is the host node the instance was placed into and `dom` is the
/// root host node of its last materialized output. Both are set once the
/// instance has been materialized; until then it cannot be re-rendered.
pub struct ComponentInstance {
    id: InstanceId,
    ty: ComponentType,
    props: Props,
    pub(crate) state: State,
    pub(crate) node: Option<Node>,
    pub(crate) base: Option<HostId>,
    pub(crate) dom: Option<HostId>,
    component: Box<dyn Component>,
}

impl ComponentInstance {
    pub(crate) fn new(id: InstanceId, ty: ComponentType, props: Props) -> Self {
        let (component, state) = ty.instantiate(&props);
        Self {
            id,
            ty,
            props,
            state,
            node: None,
            base: None,
            dom: None,
            component,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn ty(&self) -> ComponentType {
        self.ty
    }

    /// Props given at construction. Never changes afterwards.
    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Output of the most recent render.
    pub fn node(&self) -> Option<&Node> {
        self.node.as_ref()
    }

    pub fn base(&self) -> Option<HostId> {
        self.base
    }

    pub fn dom(&self) -> Option<HostId> {
        self.dom
    }

    /// Whether the instance can be re-rendered.
    pub fn is_mounted(&self) -> bool {
        self.base.is_some() && self.dom.is_some()
    }

    pub(crate) fn render(&self, queue: &UpdateQueue) -> Node {
        let cx = Context::new(self.id, &self.props, &self.state, queue);
        self.component.render(&cx)
    }

    pub(crate) fn will_mount(&mut self, queue: &UpdateQueue, host: HostId) {
        let cx = Context::new(self.id, &self.props, &self.state, queue);
        self.component.component_will_mount(&cx, host);
    }

    pub(crate) fn did_mount(&mut self, queue: &UpdateQueue, host: HostId) {
        let cx = Context::new(self.id, &self.props, &self.state, queue);
        self.component.component_did_mount(&cx, host);
    }

    pub(crate) fn did_update(&mut self, queue: &UpdateQueue, old: HostId, new: HostId) {
        let cx = Context::new(self.id, &self.props, &self.state, queue);
        self.component.component_did_update(&cx, old, new);
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("id", &self.id)
            .field("ty", &self.ty)
            .field("state", &self.state)
            .field("base", &self.base)
            .field("dom", &self.dom)
            .finish_non_exhaustive()
    }
}
