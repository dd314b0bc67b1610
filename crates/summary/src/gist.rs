use grasp_object::{attributes, Value};
use std::collections::BTreeMap;

/// Names starting with this are hidden unless the gist is verbose
pub const PRIVATE_PREFIX: &str = "_";

/// Group for attributes whose fetch failed
pub const ERROR_TYPE_NAME: &str = "Exception";

/// Attribute names of `value` grouped by the type of their value.
///
/// Groups are ordered by type name; names keep their discovery order.
#[must_use]
pub fn gist(value: &Value, verbose: bool) -> BTreeMap<String, Vec<String>> {
    gist_with(value, verbose, PRIVATE_PREFIX)
}

/// [`gist`] with a caller-chosen private prefix
#[must_use]
pub fn gist_with(value: &Value, verbose: bool, private_prefix: &str) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let Some(names) = attributes::attribute_names(value) else {
        return groups;
    };

    for key in &names {
        let Some(name) = key.as_str() else {
            continue;
        };
        if !verbose && name.starts_with(private_prefix) {
            continue;
        }
        let type_name = match attributes::attribute(value, name) {
            Ok(attr) => attr.type_name().to_string(),
            Err(err) => {
                log::debug!("gist: '{name}' unavailable on {}: {err}", value.type_name());
                ERROR_TYPE_NAME.to_string()
            }
        };
        groups.entry(type_name).or_default().push(name.to_string());
    }
    groups
}
