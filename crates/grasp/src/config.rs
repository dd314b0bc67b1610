use anyhow::{anyhow, Context, Result};
use grasp_apropos::SearchOptions;
use grasp_object::{Role, TypeMatcher, TypeRegistry};
use grasp_summary::SummaryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extra runtime type names per registry role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Start from an empty registry instead of the built-in entries
    pub replace_defaults: bool,
    pub keyed: Vec<String>,
    pub sequential: Vec<String>,
    pub instance: Vec<String>,
    pub simple: Vec<String>,
    pub composite: Vec<String>,
}

impl RegistryConfig {
    fn roles(&self) -> [(Role, &'static str, &[String]); 5] {
        [
            (Role::Keyed, "registry.keyed", self.keyed.as_slice()),
            (Role::Sequential, "registry.sequential", self.sequential.as_slice()),
            (Role::Instance, "registry.instance", self.instance.as_slice()),
            (Role::Simple, "registry.simple", self.simple.as_slice()),
            (Role::Composite, "registry.composite", self.composite.as_slice()),
        ]
    }

    /// Registry with the configured names added to each role
    #[must_use]
    pub fn build(&self) -> TypeRegistry {
        let mut registry = if self.replace_defaults {
            TypeRegistry::empty()
        } else {
            TypeRegistry::default()
        };
        for (role, _, names) in self.roles() {
            for name in names {
                registry.register(role, TypeMatcher::name(name.trim()));
            }
        }
        registry
    }

    fn validate(&self) -> Result<()> {
        for (_, path, names) in self.roles() {
            validate_type_names(path, names)?;
        }
        Ok(())
    }
}

/// Whole configuration file.
///
/// ```toml
/// [registry]
/// sequential = ["deque"]
///
/// [search]
/// predicate = "name_regex"
/// max_depth = 4
/// exclude = "_"
///
/// [summary]
/// max_elements = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraspConfig {
    pub registry: RegistryConfig,
    pub search: SearchOptions,
    pub summary: SummaryConfig,
}

impl GraspConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid grasp configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        log::debug!("loaded grasp config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.registry.validate()?;
        if self.search.exclude.as_deref() == Some("") {
            return Err(anyhow!("search.exclude must not be empty"));
        }
        if self.summary.max_elements == 0 {
            return Err(anyhow!("summary.max_elements must be at least 1"));
        }
        if self.summary.private_prefix.is_empty() {
            return Err(anyhow!("summary.private_prefix must not be empty"));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize grasp configuration")
    }
}

fn validate_type_names(path: &str, names: &[String]) -> Result<()> {
    for (idx, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(anyhow!("{path}[{idx}] must not be empty"));
        }
    }
    Ok(())
}
