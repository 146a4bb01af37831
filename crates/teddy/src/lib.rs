//! # Teddy
//!
//! A minimal virtual-tree UI library.
//!
//! Describe a UI as a tree of [`Node`](relief::Node)s, render it into a host
//! tree, and let later renders and component state changes patch the live
//! tree in place.
//!
//! ## Crates
//!
//! - [`carton`] - Shared utilities, tag tables and hashing
//! - [`canvas`] - The host tree rendered into
//! - [`relief`] - Nodes, props and the component contract
//! - [`atelier`] - The renderer and diff engine
//!
//! ## Example
//!
//! ```
//! use teddy::prelude::*;
//!
//! struct Hello;
//!
//! impl Component for Hello {
//!     fn create(_props: &Props) -> Self {
//!         Hello
//!     }
//!
//!     fn render(&self, cx: &Context<'_>) -> Node {
//!         let name = cx.props().get_str("name").unwrap_or("world");
//!         h("p", None, [format!("Hello, {name}!").into()])
//!     }
//! }
//!
//! let mut renderer = Renderer::new();
//! let root = renderer.create_container("main");
//! let app = h(component::<Hello>(), Some(Props::new().with("name", "Teddy")), []);
//! renderer.render(&app, root).unwrap();
//!
//! assert_eq!(renderer.host().inner_html(root), "<p>Hello, Teddy!</p>");
//! ```

/// Shared utilities, tag tables and hashing.
pub use teddy_carton as carton;

/// The host tree rendered into.
pub use teddy_canvas as canvas;

/// Nodes, props and the component contract.
pub use teddy_relief as relief;

/// The renderer and diff engine.
pub use teddy_atelier as atelier;

/// Everything needed to write and render components.
pub mod prelude {
    pub use teddy_atelier::{
        DiffMode, Metadata, RenderError, RenderResult, Renderer, RendererOptions,
    };
    pub use teddy_canvas::{Event, HostId, HostTree};
    pub use teddy_relief::{
        component, fragment, functional, h, Component, Context, InstanceId, Node, PropValue,
        Props, State, StateSetter,
    };
}

/// Environment variable holding the log filter, e.g. `TEDDY_LOG=teddy_atelier=trace`.
pub const LOG_ENV: &str = "TEDDY_LOG";

/// Install a stderr `tracing` subscriber filtered by [`LOG_ENV`].
///
/// Defaults to `warn` when the variable is unset or invalid. Calling this
/// more than once, or after another subscriber was installed, does nothing.
pub fn init_tracing() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            tracing::debug!("tracing initialized from {}", LOG_ENV);
        }
    });
}
