//! Carton - The toolbox shared by every Teddy crate.
//!
//! Holds the small pieces the host tree, node model and renderer all lean on:
//!
//! - **Strings and collections**: `CompactString`, `SmallVec`, Fx hash maps
//! - **Markup escaping**: text and attribute escaping for serialization
//! - **DOM tag config**: void elements and reserved prop keys
//!
//! # Example
//!
//! ```
//! use teddy_carton::{escape_text, is_void_tag};
//!
//! assert!(is_void_tag("br"));
//! assert_eq!(escape_text("a < b"), "a &lt; b");
//! ```

pub mod dom_tag_config;
pub mod escape;

// Re-export compact_str::CompactString for convenience
pub use compact_str::{format_compact, CompactString, ToCompactString};

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_set, Set as PhfSet};

pub use dom_tag_config::*;
pub use escape::{escape_attribute, escape_text};
