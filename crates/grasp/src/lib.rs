//! # Grasp
//!
//! Explore live object graphs: find where a name, value or docstring lives
//! ([`Grasp::apropos`]), summarize the shape of nested data
//! ([`Grasp::describe`]) and list an object's attributes by type
//! ([`Grasp::gist`]).
//!
//! ## Architecture
//!
//! ```text
//! grasp.toml ──> GraspConfig ──> Grasp
//!                  │               ├─ TypeRegistry (defaults + [registry])
//!                  │               ├─ apropos  ──> grasp-apropos
//!                  │               ├─ describe ──> grasp-summary
//!                  │               └─ gist     ──> grasp-summary
//!                  └─ [search] / [summary] defaults
//! ```
//!
//! ## Example
//!
//! ```rust
//! use grasp::{Grasp, Instance, Value};
//!
//! let grasp = Grasp::default();
//! let config = Value::object(
//!     Instance::module("settings")
//!         .with_attr("timeout", 30)
//!         .with_attr("retry", Value::dict([("timeout", 5), ("count", 3)])),
//! );
//!
//! let paths = grasp.apropos("timeout", &config).unwrap();
//! assert_eq!(paths, vec!["settings.timeout", "settings.retry[timeout]"]);
//! assert_eq!(grasp.describe(&Value::list([1, 2, 3])).to_string(), "list of 3 int");
//! ```

mod config;

pub use config::{GraspConfig, RegistryConfig};

pub use grasp_apropos::{
    apropos, apropos_doc, apropos_doc_regex, apropos_name, apropos_name_regex, apropos_value,
    apropos_value_regex, AproposError, Candidate, Predicate, PredicateKind, SearchOptions,
    SearchReport, WalkStats,
};
pub use grasp_object::{
    Capability, Category, Child, CustomTraversable, Instance, Introspectable, Key, Mapping, Object,
    Role, Sequence, TypeMatcher, TypeRegistry, Value,
};
pub use grasp_summary::{describe, gist, SummaryConfig, TypeDescriptor};

use std::collections::BTreeMap;
use std::path::Path;

/// A configured session: one registry plus default search and summary settings
#[derive(Debug, Clone)]
pub struct Grasp {
    registry: TypeRegistry,
    config: GraspConfig,
}

impl Default for Grasp {
    fn default() -> Self {
        Self::new(GraspConfig::default())
    }
}

impl Grasp {
    pub fn new(config: GraspConfig) -> Self {
        let registry = config.registry.build();
        log::debug!(
            "grasp session: {} keyed, {} sequential, {} instance matchers",
            registry.matchers(Role::Keyed).len(),
            registry.matchers(Role::Sequential).len(),
            registry.matchers(Role::Instance).len()
        );
        Self { registry, config }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(GraspConfig::from_path(path)?))
    }

    #[must_use]
    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Register additional types after loading the configuration
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Search with the configured `[search]` options
    pub fn apropos(&self, needle: &str, haystack: &Value) -> grasp_apropos::Result<Vec<String>> {
        self.apropos_with(needle, haystack, &self.config.search)
    }

    pub fn apropos_with(
        &self,
        needle: &str,
        haystack: &Value,
        options: &SearchOptions,
    ) -> grasp_apropos::Result<Vec<String>> {
        grasp_apropos::Apropos::new(&self.registry).search(needle, haystack, options)
    }

    /// Search with a caller-supplied predicate and the configured options
    pub fn apropos_by(
        &self,
        needle: &str,
        haystack: &Value,
        predicate: &dyn Predicate,
    ) -> grasp_apropos::Result<Vec<String>> {
        grasp_apropos::Apropos::new(&self.registry).search_with(
            needle,
            haystack,
            predicate,
            &self.config.search,
        )
    }

    /// Search and keep the walk counters
    pub fn walk(
        &self,
        needle: &str,
        haystack: &Value,
        options: &SearchOptions,
    ) -> grasp_apropos::Result<SearchReport> {
        grasp_apropos::Apropos::new(&self.registry).walk(needle, haystack, options)
    }

    #[must_use]
    pub fn describe(&self, value: &Value) -> TypeDescriptor {
        self.config.summary.summarizer(&self.registry).describe(value)
    }

    #[must_use]
    pub fn gist(&self, value: &Value, verbose: bool) -> BTreeMap<String, Vec<String>> {
        self.config.summary.gist(value, verbose)
    }
}
