//! Renderer options.

use serde::{Deserialize, Serialize};

/// Renderer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererOptions {
    /// Upper bound on state updates processed by one flush
    pub max_update_passes: usize,

    /// Compare attributes as one concatenated string, so the same set in a
    /// different order counts as a change
    pub order_sensitive_attributes: bool,

    /// Skip wholesale replacement of a node that was itself adopted through
    /// a replacement earlier in the same flush
    pub same_kind_guard: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            max_update_passes: 100,
            order_sensitive_attributes: false,
            same_kind_guard: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RendererOptions::default();
        assert_eq!(opts.max_update_passes, 100);
        assert!(!opts.order_sensitive_attributes);
        assert!(opts.same_kind_guard);
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: RendererOptions =
            serde_json::from_str(r#"{ "orderSensitiveAttributes": true }"#).unwrap();
        assert!(opts.order_sensitive_attributes);
        assert_eq!(opts.max_update_passes, 100);
        assert!(opts.same_kind_guard);
    }
}
