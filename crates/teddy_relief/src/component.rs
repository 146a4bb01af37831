//! The component contract.
//!
//! A component is built once from its props, renders a [`Node`] from its
//! props and state, and receives lifecycle callbacks from the renderer.
//! State never changes in place: [`Context::set_state`] queues a wholesale
//! replacement which the renderer applies, followed by a re-render.

use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use teddy_canvas::HostId;

use crate::node::Node;
use crate::props::{Props, State};

/// Identifies a component instance owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stateful UI unit.
///
/// ```
/// use teddy_relief::{h, Component, Context, Node, Props, State};
///
/// struct Greeter;
///
/// impl Component for Greeter {
///     fn create(_props: &Props) -> Self {
///         Greeter
///     }
///
///     fn render(&self, cx: &Context<'_>) -> Node {
///         let name = cx.props().get_str("name").unwrap_or("stranger");
///         h("h1", None, ["Hello, ".into(), name.into()])
///     }
/// }
/// ```
pub trait Component: 'static {
    /// Build the component from its props. The instance keeps the props
    /// verbatim; they are never mutated afterwards.
    fn create(props: &Props) -> Self
    where
        Self: Sized;

    /// State before the first `set_state`.
    fn initial_state(props: &Props) -> State
    where
        Self: Sized,
    {
        let _ = props;
        State::new()
    }

    /// Describe the current output. Must not touch the host tree.
    fn render(&self, cx: &Context<'_>) -> Node;

    /// Called right before the rendered root is attached during placement.
    fn component_will_mount(&mut self, cx: &Context<'_>, host: HostId) {
        let _ = (cx, host);
    }

    /// Called right after the rendered root is attached during placement.
    fn component_did_mount(&mut self, cx: &Context<'_>, host: HostId) {
        let _ = (cx, host);
    }

    /// Called after an update pass that changed the serialized markup.
    fn component_did_update(&mut self, cx: &Context<'_>, old: HostId, new: HostId) {
        let _ = (cx, old, new);
    }
}

/// The explicit component-type tag.
///
/// Carries everything the renderer needs to build an instance, so the
/// builder never has to inspect a value to learn whether it is a component.
#[derive(Clone, Copy)]
pub struct ComponentType {
    name: &'static str,
    type_id: TypeId,
    create: fn(&Props) -> Box<dyn Component>,
    initial_state: fn(&Props) -> State,
}

impl ComponentType {
    /// The tag for component `C`.
    pub fn of<C: Component>() -> Self {
        Self {
            name: type_name::<C>(),
            type_id: TypeId::of::<C>(),
            create: create_boxed::<C>,
            initial_state: C::initial_state,
        }
    }

    /// Rust type name of the component.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a fresh component and its initial state.
    pub fn instantiate(&self, props: &Props) -> (Box<dyn Component>, State) {
        ((self.create)(props), (self.initial_state)(props))
    }
}

fn create_boxed<C: Component>(props: &Props) -> Box<dyn Component> {
    Box::new(C::create(props))
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentType {}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentType").field(&self.name).finish()
    }
}

/// How a queued update produces the next state.
pub enum StateChange {
    /// Use this state as is.
    Replace(State),
    /// Compute the next state from the live one when the update is applied.
    Update(Box<dyn FnOnce(&State) -> State>),
}

impl StateChange {
    /// Resolve against the instance's current state.
    pub fn apply(self, current: &State) -> State {
        match self {
            StateChange::Replace(state) => state,
            StateChange::Update(updater) => updater(current),
        }
    }
}

impl fmt::Debug for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateChange::Replace(state) => f.debug_tuple("Replace").field(state).finish(),
            StateChange::Update(_) => f.write_str("Update(..)"),
        }
    }
}

/// A queued wholesale state replacement.
#[derive(Debug)]
pub struct PendingUpdate {
    pub instance: InstanceId,
    pub change: StateChange,
}

/// FIFO of state replacements waiting for the renderer.
///
/// Shared between the renderer and every [`StateSetter`] it hands out.
#[derive(Debug, Clone, Default)]
pub struct UpdateQueue(Rc<RefCell<VecDeque<PendingUpdate>>>);

impl UpdateQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a replacement.
    pub fn push(&self, instance: InstanceId, state: State) {
        self.push_change(instance, StateChange::Replace(state));
    }

    /// Queue an update computed from the state live at flush time.
    pub fn push_update<F>(&self, instance: InstanceId, updater: F)
    where
        F: FnOnce(&State) -> State + 'static,
    {
        self.push_change(instance, StateChange::Update(Box::new(updater)));
    }

    fn push_change(&self, instance: InstanceId, change: StateChange) {
        self.0
            .borrow_mut()
            .push_back(PendingUpdate { instance, change });
    }

    /// Take the oldest replacement.
    pub fn pop(&self) -> Option<PendingUpdate> {
        self.0.borrow_mut().pop_front()
    }

    /// Number of queued replacements.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drop everything queued.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A cloneable handle that replaces one instance's state.
///
/// Event handlers capture this to call `set_state` after render returns.
#[derive(Debug, Clone)]
pub struct StateSetter {
    instance: InstanceId,
    queue: UpdateQueue,
}

impl StateSetter {
    /// Bind a setter to an instance and queue.
    pub fn new(instance: InstanceId, queue: UpdateQueue) -> Self {
        Self { instance, queue }
    }

    /// The instance this setter targets.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Queue a wholesale replacement of the instance's state.
    ///
    /// This is not a merge: callers pass the full desired state.
    pub fn set(&self, state: State) {
        self.queue.push(self.instance, state);
    }

    /// Queue a replacement derived from the instance's state as it is when
    /// the update is applied, not when the handler was created.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&State) -> State + 'static,
    {
        self.queue.push_update(self.instance, updater);
    }
}

/// What a component sees while rendering or handling a lifecycle hook.
#[derive(Debug)]
pub struct Context<'a> {
    instance: InstanceId,
    props: &'a Props,
    state: &'a State,
    queue: &'a UpdateQueue,
}

impl<'a> Context<'a> {
    /// Build a context over an instance's props and state.
    pub fn new(
        instance: InstanceId,
        props: &'a Props,
        state: &'a State,
        queue: &'a UpdateQueue,
    ) -> Self {
        Self {
            instance,
            props,
            state,
            queue,
        }
    }

    /// The instance being rendered.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Props given at construction.
    pub fn props(&self) -> &'a Props {
        self.props
    }

    /// Current state.
    pub fn state(&self) -> &'a State {
        self.state
    }

    /// Queue a wholesale state replacement for this instance.
    pub fn set_state(&self, state: State) {
        self.queue.push(self.instance, state);
    }

    /// Queue a replacement computed from the live state at flush time.
    pub fn update_state<F>(&self, updater: F)
    where
        F: FnOnce(&State) -> State + 'static,
    {
        self.queue.push_update(self.instance, updater);
    }

    /// A handle for setting state later, e.g. from an event handler.
    pub fn setter(&self) -> StateSetter {
        StateSetter::new(self.instance, self.queue.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::h;

    struct Label;

    impl Component for Label {
        fn create(_props: &Props) -> Self {
            Label
        }

        fn initial_state(props: &Props) -> State {
            State::new().with("text", props.get_str("text").unwrap_or(""))
        }

        fn render(&self, cx: &Context<'_>) -> Node {
            let text = cx.state().get_str("text").unwrap_or("");
            h("span", None, [text.into()])
        }
    }

    struct Other;

    impl Component for Other {
        fn create(_props: &Props) -> Self {
            Other
        }

        fn render(&self, _cx: &Context<'_>) -> Node {
            Node::from("other")
        }
    }

    #[test]
    fn test_component_type_identity() {
        assert_eq!(ComponentType::of::<Label>(), ComponentType::of::<Label>());
        assert_ne!(ComponentType::of::<Label>(), ComponentType::of::<Other>());
        assert!(ComponentType::of::<Label>().name().ends_with("Label"));
    }

    #[test]
    fn test_instantiate_uses_initial_state() {
        let props = Props::new().with("text", "hello");
        let (component, state) = ComponentType::of::<Label>().instantiate(&props);
        let queue = UpdateQueue::new();
        let cx = Context::new(InstanceId(0), &props, &state, &queue);

        let node = component.render(&cx);
        let vnode = node.as_element().unwrap();
        assert_eq!(vnode.tag(), "span");
        assert_eq!(vnode.children(), &[Node::from("hello")]);
    }

    #[test]
    fn test_setter_queues_in_order() {
        let queue = UpdateQueue::new();
        let setter = StateSetter::new(InstanceId(3), queue.clone());
        setter.set(State::new().with("n", 1));
        setter.set(State::new().with("n", 2));

        assert_eq!(queue.len(), 2);
        let first = queue.pop().unwrap();
        assert_eq!(first.instance, InstanceId(3));
        assert_eq!(first.change.apply(&State::new()).get_int("n"), Some(1));
        let second = queue.pop().unwrap();
        assert_eq!(second.change.apply(&State::new()).get_int("n"), Some(2));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_updater_reads_state_when_applied() {
        let queue = UpdateQueue::new();
        let setter = StateSetter::new(InstanceId(1), queue.clone());
        setter.update(|state| {
            let n = state.get_int("n").unwrap_or_default();
            State::new().with("n", n + 1)
        });

        let pending = queue.pop().unwrap();
        assert_eq!(format!("{:?}", pending.change), "Update(..)");
        let next = pending.change.apply(&State::new().with("n", 41));
        assert_eq!(next.get_int("n"), Some(42));
    }
}
