//! Canvas - The host UI tree.
//!
//! A live, mutable tree of host nodes that the renderer materializes
//! virtual nodes into and the diff engine patches in place.
//!
//! - **Nodes**: elements, text nodes, grouping containers and raw markup
//! - **Mutation**: append, replace, remove, attribute and property writes
//! - **Events**: per-element listener lists keyed by event name
//! - **Serialization**: `inner_html` / `outer_html` markup snapshots
//!
//! # Example
//!
//! ```
//! use teddy_canvas::HostTree;
//!
//! let mut tree = HostTree::new();
//! let div = tree.create_element("div");
//! let text = tree.create_text("Hello");
//! tree.set_attribute(div, "id", "x").unwrap();
//! tree.append_child(div, text).unwrap();
//! assert_eq!(tree.outer_html(div), r#"<div id="x">Hello</div>"#);
//! ```

mod error;
mod event;
mod node;
mod serialize;
mod tree;

pub use error::{HostError, HostResult};
pub use event::{Event, EventHandler};
pub use node::{Attribute, ElementData, HostId, HostKind, HostNode};
pub use tree::{HostTree, TreeWalker};
