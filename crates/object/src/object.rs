use crate::children::Child;
use crate::error::{AttributeError, TextError};
use crate::key::Key;
use crate::value::{Entries, Value};
use parking_lot::RwLock;

/// A user-defined runtime type.
///
/// Only the type name is required. Everything else is opt-in: a type that
/// wants to be decomposed returns one of the capability views below.
pub trait Object: Send + Sync {
    /// Runtime type name, used by the type registry and the summarizer
    fn type_name(&self) -> &str;

    /// Name the object declares for itself (e.g. a module name)
    fn declared_name(&self) -> Option<&str> {
        None
    }

    /// Documentation value; only textual docs are searched
    fn doc(&self) -> Option<Value> {
        None
    }

    /// Textual representation
    fn text(&self) -> Result<String, TextError> {
        Ok(format!("<{} object>", self.type_name()))
    }

    fn as_mapping(&self) -> Option<&dyn Mapping> {
        None
    }

    fn as_sequence(&self) -> Option<&dyn Sequence> {
        None
    }

    fn as_introspectable(&self) -> Option<&dyn Introspectable> {
        None
    }

    fn as_traversable(&self) -> Option<&dyn CustomTraversable> {
        None
    }
}

/// Containers accessed via `[key]`
pub trait Mapping {
    fn keys(&self) -> Vec<Key>;
    fn get(&self, key: &Key) -> Option<Value>;
}

/// Containers accessed via `[index]`
pub trait Sequence {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<Value>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values exposing a `name -> value` attribute mapping, accessed via `.name`
pub trait Introspectable {
    /// All attribute names; non-textual names are allowed and skipped by callers
    fn attribute_names(&self) -> Vec<Key>;

    fn attribute(&self, name: &str) -> Result<Value, AttributeError>;
}

/// Self-described traversal, taking precedence over every built-in category.
///
/// Implementations should honour `exclude` by skipping children whose name
/// starts with it.
pub trait CustomTraversable {
    fn children<'a>(&'a self, exclude: Option<&'a str>) -> Box<dyn Iterator<Item = Child> + 'a>;
}

/// Generic attribute-bearing instance: a class instance or a module namespace
#[derive(Debug)]
pub struct Instance {
    type_name: String,
    name: Option<String>,
    doc: Option<Value>,
    attrs: RwLock<Entries>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
            doc: None,
            attrs: RwLock::new(Entries::new()),
        }
    }

    /// Module-like namespace that declares `name` as its own name
    pub fn module(name: impl Into<String>) -> Self {
        Self::new("module").with_name(name)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<Value>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_attr(self, name: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute through a shared reference (used to build cycles)
    pub fn set_attr(&self, name: impl Into<Key>, value: impl Into<Value>) {
        self.attrs.write().insert(name.into(), value.into());
    }
}

impl Object for Instance {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn doc(&self) -> Option<Value> {
        self.doc.clone()
    }

    fn text(&self) -> Result<String, TextError> {
        Ok(match &self.name {
            Some(name) => format!("<{} '{}'>", self.type_name, name),
            None => format!("<{} object>", self.type_name),
        })
    }

    fn as_introspectable(&self) -> Option<&dyn Introspectable> {
        Some(self)
    }
}

impl Introspectable for Instance {
    fn attribute_names(&self) -> Vec<Key> {
        self.attrs.read().keys().cloned().collect()
    }

    fn attribute(&self, name: &str) -> Result<Value, AttributeError> {
        self.attrs
            .read()
            .get(&Key::from(name))
            .cloned()
            .ok_or_else(|| AttributeError::missing(name))
    }
}
