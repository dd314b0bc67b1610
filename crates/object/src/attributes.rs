//! Reflective attribute access shared by the enumerator and the gist.
//!
//! Dicts expose their keys, introspectable objects their attributes;
//! nothing else has attributes.

use crate::error::AttributeError;
use crate::key::Key;
use crate::value::Value;

/// Attribute names of `value` in discovery order, or `None` if it has no
/// attribute view at all
#[must_use]
pub fn attribute_names(value: &Value) -> Option<Vec<Key>> {
    match value {
        Value::Dict(dict) => Some(dict.read().keys().cloned().collect()),
        Value::Object(object) => object
            .as_introspectable()
            .map(|inspect| inspect.attribute_names()),
        _ => None,
    }
}

/// Fetch one attribute
pub fn attribute(value: &Value, name: &str) -> Result<Value, AttributeError> {
    match value {
        Value::Dict(dict) => dict
            .read()
            .get(&Key::from(name))
            .cloned()
            .ok_or_else(|| AttributeError::missing(name)),
        Value::Object(object) => match object.as_introspectable() {
            Some(inspect) => inspect.attribute(name),
            None => Err(AttributeError::missing(name)),
        },
        _ => Err(AttributeError::missing(name)),
    }
}

/// Fetch one attribute, replacing a failure by an exception sentinel
#[must_use]
pub fn attribute_or_sentinel(value: &Value, name: &str) -> Value {
    attribute(value, name).unwrap_or_else(|err| {
        log::debug!("attribute '{name}' of {} unavailable: {err}", value.type_name());
        Value::exception(err.to_string())
    })
}
