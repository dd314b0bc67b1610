use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Traversal-relevant classification of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Self-described children via [`crate::CustomTraversable`]
    Custom,
    /// Accessed via `[key]`
    Keyed,
    /// Accessed via `[index]`
    Sequential,
    /// Accessed via `.name`
    Instance,
    /// Leaf: no recognized decomposition
    Opaque,
}

impl Category {
    /// Whether values of this category may be decomposed into children
    #[must_use]
    pub const fn is_composite(self) -> bool {
        !matches!(self, Category::Opaque)
    }

    /// Keyed and sequential containers, whose text embeds their elements
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Category::Keyed | Category::Sequential)
    }
}

/// Capability a user object can expose instead of being registered by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Mapping,
    Sequence,
    Attributes,
}

/// One registry entry: a runtime type name, or any object with a capability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMatcher {
    Name(String),
    Capability(Capability),
}

impl TypeMatcher {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeMatcher::Name(name) => value.type_name() == name,
            TypeMatcher::Capability(capability) => value.as_object().is_some_and(|object| {
                match capability {
                    Capability::Mapping => object.as_mapping().is_some(),
                    Capability::Sequence => object.as_sequence().is_some(),
                    Capability::Attributes => object.as_introspectable().is_some(),
                }
            }),
        }
    }
}

/// Which registry list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Keyed,
    Sequential,
    Instance,
    /// Scalar element types eligible for the compact `"T of N E"` summary
    Simple,
    /// Container types the summarizer descends into
    Composite,
}

/// Open registry of runtime types per role.
///
/// Built once at startup (defaults plus whatever the embedding application
/// registers) and then only read. Classification is a pure function of the
/// registry contents and the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    keyed: Vec<TypeMatcher>,
    sequential: Vec<TypeMatcher>,
    instance: Vec<TypeMatcher>,
    simple: Vec<TypeMatcher>,
    composite: Vec<TypeMatcher>,
}

const DEFAULT_SIMPLE: &[&str] = &["bool", "complex", "float", "int", "str", "bytes", "NoneType"];
const DEFAULT_COMPOSITE: &[&str] = &["list", "tuple", "dict", "set", "frozenset", "ndarray"];

impl TypeRegistry {
    /// Registry with no entries at all
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            keyed: Vec::new(),
            sequential: Vec::new(),
            instance: Vec::new(),
            simple: Vec::new(),
            composite: Vec::new(),
        }
    }

    /// Add `matcher` to `role`; duplicates are ignored
    pub fn register(&mut self, role: Role, matcher: TypeMatcher) -> &mut Self {
        let list = self.list_mut(role);
        if !list.contains(&matcher) {
            list.push(matcher);
        }
        self
    }

    /// Builder form of [`TypeRegistry::register`]
    #[must_use]
    pub fn with(mut self, role: Role, matcher: TypeMatcher) -> Self {
        self.register(role, matcher);
        self
    }

    #[must_use]
    pub fn matchers(&self, role: Role) -> &[TypeMatcher] {
        match role {
            Role::Keyed => &self.keyed,
            Role::Sequential => &self.sequential,
            Role::Instance => &self.instance,
            Role::Simple => &self.simple,
            Role::Composite => &self.composite,
        }
    }

    fn list_mut(&mut self, role: Role) -> &mut Vec<TypeMatcher> {
        match role {
            Role::Keyed => &mut self.keyed,
            Role::Sequential => &mut self.sequential,
            Role::Instance => &mut self.instance,
            Role::Simple => &mut self.simple,
            Role::Composite => &mut self.composite,
        }
    }

    #[must_use]
    pub fn has_role(&self, role: Role, value: &Value) -> bool {
        self.matchers(role).iter().any(|m| m.matches(value))
    }

    /// Classify `value`. A custom traversal hook wins over every list.
    #[must_use]
    pub fn classify(&self, value: &Value) -> Category {
        if has_custom_traversal(value) {
            Category::Custom
        } else if self.has_role(Role::Keyed, value) {
            Category::Keyed
        } else if self.has_role(Role::Sequential, value) {
            Category::Sequential
        } else if self.has_role(Role::Instance, value) {
            Category::Instance
        } else {
            Category::Opaque
        }
    }

    #[must_use]
    pub fn is_simple(&self, value: &Value) -> bool {
        self.has_role(Role::Simple, value)
    }

    #[must_use]
    pub fn is_composite(&self, value: &Value) -> bool {
        self.has_role(Role::Composite, value)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(Role::Keyed, TypeMatcher::name("dict"))
            .register(Role::Keyed, TypeMatcher::Capability(Capability::Mapping))
            .register(Role::Sequential, TypeMatcher::name("list"))
            .register(Role::Sequential, TypeMatcher::name("tuple"))
            .register(Role::Sequential, TypeMatcher::Capability(Capability::Sequence))
            .register(Role::Instance, TypeMatcher::name("module"))
            .register(Role::Instance, TypeMatcher::Capability(Capability::Attributes));
        for name in DEFAULT_SIMPLE {
            registry.register(Role::Simple, TypeMatcher::name(*name));
        }
        for name in DEFAULT_COMPOSITE {
            registry.register(Role::Composite, TypeMatcher::name(*name));
        }
        registry
    }
}

/// Whether the value supplies its own traversal
#[must_use]
pub fn has_custom_traversal(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.as_traversable().is_some())
}
