use crate::descriptor::TypeDescriptor;
use grasp_object::{shape_tuple, Key, TypeRegistry, Value};

/// Elements listed before a heterogeneous group is truncated
pub const DEFAULT_MAX_ELEMENTS: usize = 50;

/// Recursive structural summary of composite values.
///
/// Homogeneous scalar containers collapse to `"list of 3 int"`; containers
/// whose elements all describe the same way collapse one level to
/// `["list of 2", <shared>]`; anything else lists its elements, cut after
/// `max_elements`.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer<'r> {
    registry: &'r TypeRegistry,
    max_elements: usize,
}

impl<'r> Summarizer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }

    #[must_use]
    pub const fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }

    #[must_use]
    pub const fn max_elements(&self) -> usize {
        self.max_elements
    }

    #[must_use]
    pub fn describe(&self, value: &Value) -> TypeDescriptor {
        self.describe_in(value, &mut Vec::new())
    }

    fn describe_in(&self, value: &Value, ancestors: &mut Vec<usize>) -> TypeDescriptor {
        if !self.registry.is_composite(value) {
            return TypeDescriptor::scalar(value.type_name());
        }
        let Some(id) = value.identity() else {
            return self.describe_composite(value, ancestors);
        };
        if ancestors.contains(&id) {
            return TypeDescriptor::scalar(format!("<recursive {}>", value.type_name()));
        }
        ancestors.push(id);
        let descriptor = self.describe_composite(value, ancestors);
        ancestors.pop();
        descriptor
    }

    fn describe_composite(&self, value: &Value, ancestors: &mut Vec<usize>) -> TypeDescriptor {
        let container = value.type_name();
        let items = contents(value);
        let shape = shape(value, items.len());
        let Some(first) = items.first() else {
            return TypeDescriptor::scalar(format!("{container} of {shape}"));
        };

        let element = first.type_name();
        if self.registry.is_simple(first) && items.iter().all(|item| item.type_name() == element) {
            return TypeDescriptor::scalar(format!("{container} of {shape} {element}"));
        }

        let mut descriptors: Vec<TypeDescriptor> = Vec::new();
        let mut uniform = true;
        for item in &items {
            let descriptor = self.describe_in(item, ancestors);
            uniform &= descriptors.first().map_or(true, |head| *head == descriptor);
            // Past the cut, mixed elements are never shown.
            if !uniform && descriptors.len() >= self.max_elements {
                break;
            }
            descriptors.push(descriptor);
        }

        if uniform {
            descriptors.truncate(1);
            return TypeDescriptor::group(format!("{container} of {shape}"), descriptors);
        }
        if items.len() > self.max_elements {
            descriptors.truncate(self.max_elements);
            descriptors.push(TypeDescriptor::Truncated);
        }
        TypeDescriptor::group(format!("{container} of"), descriptors)
    }
}

/// Element values in summary order; mapping values are ordered by key
fn contents(value: &Value) -> Vec<Value> {
    match value {
        Value::List(list) => list.read().clone(),
        Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => items.to_vec(),
        Value::Dict(dict) => {
            let mut entries: Vec<(Key, Value)> = dict
                .read()
                .iter()
                .map(|(key, item)| (key.clone(), item.clone()))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries.into_iter().map(|(_, item)| item).collect()
        }
        Value::Array(array) => array.iter().cloned().collect(),
        Value::Object(object) => {
            if let Some(sequence) = object.as_sequence() {
                (0..sequence.len()).filter_map(|i| sequence.get(i)).collect()
            } else if let Some(mapping) = object.as_mapping() {
                let mut keys = mapping.keys();
                keys.sort();
                keys.iter().filter_map(|key| mapping.get(key)).collect()
            } else {
                log::debug!("no element view on '{}'; describing it as empty", object.type_name());
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

fn shape(value: &Value, count: usize) -> String {
    match value {
        Value::Array(array) => shape_tuple(array.shape()),
        _ => count.to_string(),
    }
}
