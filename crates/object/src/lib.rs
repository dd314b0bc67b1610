//! # Grasp Object
//!
//! Runtime value model shared by the apropos search and the summarizers.
//!
//! ## Architecture
//!
//! ```text
//! Value (scalars, shared containers, Arc<dyn Object>)
//!     │
//!     ├──> TypeRegistry::classify
//!     │      └─ Custom | Keyed | Sequential | Instance | Opaque
//!     │
//!     └──> Children (lazy, forward-only)
//!            ├─ Keyed       → (value, Some(key),  "[key]")
//!            ├─ Sequential  → (value, None,       "[index]")
//!            ├─ Instance    → (value, Some(name), ".name")
//!            └─ Custom      → whatever the object yields
//! ```
//!
//! User types join the graph by implementing [`Object`] and opting into the
//! capability views ([`Mapping`], [`Sequence`], [`Introspectable`],
//! [`CustomTraversable`]) that describe how they decompose.

pub mod attributes;
mod children;
mod error;
mod key;
mod object;
mod registry;
mod text;
mod value;

pub use children::{Child, Children};
pub use error::{AttributeError, TextError};
pub use key::Key;
pub use object::{CustomTraversable, Instance, Introspectable, Mapping, Object, Sequence};
pub use registry::{has_custom_traversal, Capability, Category, Role, TypeMatcher, TypeRegistry};
pub use text::shape_tuple;
pub use value::{Entries, SharedDict, SharedList, Value};
