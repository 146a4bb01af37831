//! Relief - The shape of a Teddy UI description.
//!
//! Everything a caller builds before anything touches the host tree:
//!
//! - [`Node`] / [`VNode`]: immutable virtual node descriptors
//! - [`Props`] / [`PropValue`]: ordered, permissive prop mappings
//! - [`h`] / [`fragment`]: the node builder
//! - [`Component`]: the stateful unit contract, its [`Context`] and [`StateSetter`]
//!
//! The builder performs no validation of prop values. Anything that cannot
//! be applied to a host element is reported later, when the renderer
//! materializes it.

mod builder;
mod component;
mod node;
mod props;

pub use builder::{component, fragment, functional, h, NodeType};
pub use component::{
    Component, ComponentType, Context, InstanceId, PendingUpdate, StateChange, StateSetter, UpdateQueue,
};
pub use node::{ComponentDescriptor, Node, VNode};
pub use props::{AttributeCoercionError, PropValue, Props, State};
