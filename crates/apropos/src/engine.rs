use crate::error::{AproposError, Result};
use crate::predicate::{Candidate, Predicate, PredicateKind};
use grasp_object::{Children, TypeRegistry, Value};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Root label used when neither the caller nor the root supplies a name
pub const DEFAULT_ROOT_NAME: &str = "arg";

/// Knobs for one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    /// First segment of every access path
    pub root_name: Option<String>,

    /// Built-in predicate used by [`Apropos::search`]
    pub predicate: PredicateKind,

    /// Depth at which decomposition stops (root is depth 0)
    pub max_depth: Option<usize>,

    /// Skip keys and attribute names starting with this prefix
    pub exclude: Option<String>,
}

impl SearchOptions {
    #[must_use]
    pub fn named(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = Some(root_name.into());
        self
    }

    #[must_use]
    pub const fn predicate(mut self, predicate: PredicateKind) -> Self {
        self.predicate = predicate;
        self
    }

    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn exclude(mut self, prefix: impl Into<String>) -> Self {
        self.exclude = Some(prefix.into());
        self
    }
}

/// Counters collected during one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes tested against the predicate
    pub visited: usize,
    /// Composites whose children were enumerated
    pub expanded: usize,
    /// Nodes whose text could not be compared
    pub text_failures: usize,
}

/// Matches in discovery order plus walk counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub paths: Vec<String>,
    pub stats: WalkStats,
}

/// Recursive search over an object graph.
///
/// Depth-first and pre-order: a node is tested before its children. Each
/// shared composite is expanded once per search, so cyclic graphs terminate.
#[derive(Debug, Clone, Copy)]
pub struct Apropos<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Apropos<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Access paths of every node matching `needle` under the configured predicate
    pub fn search(&self, needle: &str, root: &Value, options: &SearchOptions) -> Result<Vec<String>> {
        Ok(self.walk(needle, root, options)?.paths)
    }

    /// Like [`Apropos::search`], with a caller-supplied predicate
    pub fn search_with(
        &self,
        needle: &str,
        root: &Value,
        predicate: &dyn Predicate,
        options: &SearchOptions,
    ) -> Result<Vec<String>> {
        Ok(self.walk_with(needle, root, predicate, options)?.paths)
    }

    pub fn walk(&self, needle: &str, root: &Value, options: &SearchOptions) -> Result<SearchReport> {
        let predicate = options.predicate.build(needle)?;
        self.walk_with(needle, root, predicate.as_ref(), options)
    }

    pub fn walk_with(
        &self,
        needle: &str,
        root: &Value,
        predicate: &dyn Predicate,
        options: &SearchOptions,
    ) -> Result<SearchReport> {
        let root_name = root_name(root, options);
        let mut walk = Walk {
            needle,
            predicate,
            registry: self.registry,
            max_depth: options.max_depth,
            exclude: options.exclude.as_deref(),
            expanded: HashMap::new(),
            report: SearchReport::default(),
        };
        walk.visit(root, Some(root_name.as_str()), &root_name, 0)?;

        log::debug!(
            "apropos '{needle}' in {root_name}: {} matches, {} nodes, {} expanded",
            walk.report.paths.len(),
            walk.report.stats.visited,
            walk.report.stats.expanded
        );
        Ok(walk.report)
    }
}

fn root_name(root: &Value, options: &SearchOptions) -> String {
    options
        .root_name
        .clone()
        .or_else(|| root.declared_name().map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string())
}

struct Walk<'a> {
    needle: &'a str,
    predicate: &'a dyn Predicate,
    registry: &'a TypeRegistry,
    max_depth: Option<usize>,
    exclude: Option<&'a str>,
    /// Expanded composites by identity. Holding the value keeps its
    /// address from being reused by a child built on access.
    expanded: HashMap<usize, Value>,
    report: SearchReport,
}

impl Walk<'_> {
    fn visit(&mut self, value: &Value, name: Option<&str>, path: &str, depth: usize) -> Result<()> {
        self.report.stats.visited += 1;
        let category = self.registry.classify(value);

        let candidate = Candidate {
            name,
            value,
            category,
        };
        if self.matches(&candidate, path)? {
            self.report.paths.push(path.to_string());
        }

        if !category.is_composite() || self.max_depth.is_some_and(|max| depth >= max) {
            return Ok(());
        }
        // Record before descending so that a container reachable from
        // itself (or from a second parent) is expanded exactly once.
        if let Some(id) = value.identity() {
            match self.expanded.entry(id) {
                Entry::Occupied(_) => return Ok(()),
                Entry::Vacant(slot) => {
                    slot.insert(value.clone());
                }
            }
        }
        self.report.stats.expanded += 1;

        for child in Children::new(value, category, self.exclude) {
            let child_path = format!("{path}{}", child.access);
            self.visit(&child.value, child.name.as_deref(), &child_path, depth + 1)?;
        }
        Ok(())
    }

    fn matches(&mut self, candidate: &Candidate<'_>, path: &str) -> Result<bool> {
        match self.predicate.test(self.needle, candidate) {
            Ok(matched) => Ok(matched),
            Err(AproposError::Text(err)) => {
                self.report.stats.text_failures += 1;
                if self.report.stats.text_failures == 1 {
                    log::warn!("apropos: cannot compare text at {path} ({err}); treating as no match");
                }
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}
