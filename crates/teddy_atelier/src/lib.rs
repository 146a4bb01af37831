//! Atelier - The Teddy renderer.
//!
//! Synchronizes virtual node descriptions onto a [`HostTree`]:
//!
//! - **Placement**: first-time materialization of a subtree, with mount hooks
//! - **Update**: diff a freshly rendered subtree against the live one and
//!   patch attributes, text and trailing children in place
//! - **Components**: instance table, lifecycle hooks and the queued
//!   state-update loop
//!
//! # Example
//!
//! ```
//! use teddy_atelier::Renderer;
//! use teddy_relief::{h, Props};
//!
//! let mut renderer = Renderer::new();
//! let root = renderer.create_container("main");
//!
//! let app = h("div", Some(Props::new().with("id", "x")), [h("h1", None, ["Hi".into()])]);
//! renderer.render(&app, root).unwrap();
//! assert_eq!(renderer.host().inner_html(root), r#"<div id="x"><h1>Hi</h1></div>"#);
//!
//! let app = h("div", Some(Props::new().with("id", "x")), [h("h1", None, ["Bye".into()])]);
//! renderer.render(&app, root).unwrap();
//! assert_eq!(renderer.host().inner_html(root), r#"<div id="x"><h1>Bye</h1></div>"#);
//! ```

mod diff;
mod errors;
mod instance;
mod lifecycle;
mod metadata;
mod options;
mod renderer;

pub use diff::DiffMode;
pub use errors::{RenderError, RenderResult};
pub use instance::ComponentInstance;
pub use metadata::Metadata;
pub use options::RendererOptions;
pub use renderer::{Materialized, Renderer};

pub use teddy_canvas::{HostId, HostTree};
