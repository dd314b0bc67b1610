//! # Grasp Summary
//!
//! Structural type summaries and attribute gists of runtime values.
//!
//! ## Architecture
//!
//! ```text
//! Value
//!   │
//!   ├──> Summarizer::describe ──> TypeDescriptor
//!   │      ├─ "list of 3 int"              homogeneous scalars
//!   │      ├─ ["list of 2", <shared>]      identical element structure
//!   │      └─ ["list of", d1, .. dN, "........"]
//!   │
//!   └──> gist ──> { type name -> [attribute names] }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use grasp_object::{TypeRegistry, Value};
//! use grasp_summary::Summarizer;
//!
//! let registry = TypeRegistry::default();
//! let pairs = Value::list([Value::tuple([1, 2]), Value::tuple([3, 4])]);
//! let descriptor = Summarizer::new(&registry).describe(&pairs);
//! assert_eq!(descriptor.to_string(), "['list of 2', 'tuple of 2 int']");
//! assert_eq!(descriptor.len(), 2);
//! ```

mod config;
mod describe;
mod descriptor;
mod gist;

pub use config::SummaryConfig;
pub use describe::{Summarizer, DEFAULT_MAX_ELEMENTS};
pub use descriptor::{TypeDescriptor, TRUNCATION_MARKER};
pub use gist::{gist, gist_with, ERROR_TYPE_NAME, PRIVATE_PREFIX};

use grasp_object::{TypeRegistry, Value};
use once_cell::sync::Lazy;

static DEFAULT_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::default);

/// Describe `value` with the default registry
#[must_use]
pub fn describe(value: &Value, max_elements: usize) -> TypeDescriptor {
    Summarizer::new(&DEFAULT_REGISTRY)
        .with_max_elements(max_elements)
        .describe(value)
}
