use crate::describe::{Summarizer, DEFAULT_MAX_ELEMENTS};
use crate::gist::{gist_with, PRIVATE_PREFIX};
use grasp_object::{TypeRegistry, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings shared by [`Summarizer`] and the gist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// Elements listed before a heterogeneous group is truncated
    pub max_elements: usize,

    /// Attribute names hidden from a non-verbose gist
    pub private_prefix: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
            private_prefix: PRIVATE_PREFIX.to_string(),
        }
    }
}

impl SummaryConfig {
    pub fn summarizer<'r>(&self, registry: &'r TypeRegistry) -> Summarizer<'r> {
        Summarizer::new(registry).with_max_elements(self.max_elements)
    }

    #[must_use]
    pub fn gist(&self, value: &Value, verbose: bool) -> BTreeMap<String, Vec<String>> {
        gist_with(value, verbose, &self.private_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_free_functions() {
        let config = SummaryConfig::default();
        assert_eq!(config.max_elements, 50);
        assert_eq!(config.private_prefix, "_");
        let registry = TypeRegistry::default();
        assert_eq!(config.summarizer(&registry).max_elements(), DEFAULT_MAX_ELEMENTS);
    }

    #[test]
    fn gist_uses_the_configured_prefix() {
        let config = SummaryConfig {
            private_prefix: "tmp".to_string(),
            ..SummaryConfig::default()
        };
        let value = Value::dict([("tmp_x", 1), ("_y", 2)]);
        assert_eq!(
            config.gist(&value, false).get("int"),
            Some(&vec!["_y".to_string()])
        );
    }
}
