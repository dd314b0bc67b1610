//! # Grasp Apropos
//!
//! Recursive search through an object graph for nodes whose name, text or
//! documentation matches a needle.
//!
//! ## Architecture
//!
//! ```text
//! needle + root Value
//!     │
//!     ├──> PredicateKind::build (literal or compiled pattern)
//!     │
//!     └──> Walk (depth-first, pre-order)
//!            ├─ test node → push access path on match
//!            ├─ stop at max_depth / already-expanded identity
//!            └─ Children → recurse with path + "[key]" | "[i]" | ".name"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use grasp_apropos::{apropos_name, SearchOptions};
//! use grasp_object::Value;
//!
//! let haystack = Value::dict([
//!     ("foo", Value::dict([("foo", 1), ("bar", 2)])),
//!     ("b", Value::from(3)),
//! ]);
//! let paths = apropos_name("foo", &haystack, &SearchOptions::default()).unwrap();
//! assert_eq!(paths, vec!["arg[foo]", "arg[foo][foo]"]);
//! ```

mod engine;
mod error;
mod predicate;

pub use engine::{Apropos, SearchOptions, SearchReport, WalkStats, DEFAULT_ROOT_NAME};
pub use error::{AproposError, Result};
pub use predicate::{Candidate, Field, Literal, Pattern, Predicate, PredicateKind};

use grasp_object::{TypeRegistry, Value};
use once_cell::sync::Lazy;

static DEFAULT_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::default);

/// Search with the default registry and the predicate named in `options`
pub fn apropos(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    Apropos::new(&DEFAULT_REGISTRY).search(needle, haystack, options)
}

fn apropos_kind(
    kind: PredicateKind,
    needle: &str,
    haystack: &Value,
    options: &SearchOptions,
) -> Result<Vec<String>> {
    let options = options.clone().predicate(kind);
    apropos(needle, haystack, &options)
}

/// Nodes whose name contains `needle`
pub fn apropos_name(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    apropos_kind(PredicateKind::Name, needle, haystack, options)
}

/// Non-container nodes whose text contains `needle`
pub fn apropos_value(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    apropos_kind(PredicateKind::Value, needle, haystack, options)
}

/// Nodes whose documentation contains `needle`
pub fn apropos_doc(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    apropos_kind(PredicateKind::Doc, needle, haystack, options)
}

pub fn apropos_name_regex(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    apropos_kind(PredicateKind::NameRegex, needle, haystack, options)
}

pub fn apropos_value_regex(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    apropos_kind(PredicateKind::ValueRegex, needle, haystack, options)
}

pub fn apropos_doc_regex(needle: &str, haystack: &Value, options: &SearchOptions) -> Result<Vec<String>> {
    apropos_kind(PredicateKind::DocRegex, needle, haystack, options)
}
