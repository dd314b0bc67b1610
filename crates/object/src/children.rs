use crate::attributes;
use crate::key::Key;
use crate::registry::Category;
use crate::value::Value;

/// One decomposed child: the value, its name (if it has one) and the suffix
/// that reaches it from its parent (`[key]`, `[index]` or `.name`)
#[derive(Debug, Clone)]
pub struct Child {
    pub value: Value,
    pub name: Option<String>,
    pub access: String,
}

impl Child {
    pub fn keyed(value: Value, key: &str) -> Self {
        Self {
            value,
            name: Some(key.to_string()),
            access: format!("[{key}]"),
        }
    }

    pub fn positional(value: Value, index: usize) -> Self {
        Self {
            value,
            name: None,
            access: format!("[{index}]"),
        }
    }

    pub fn attribute(value: Value, name: &str) -> Self {
        Self {
            value,
            name: Some(name.to_string()),
            access: format!(".{name}"),
        }
    }
}

/// Forward-only, finite enumeration of a composite's children.
///
/// Keys and attribute names are captured when the enumerator is built;
/// child values are read one at a time as the iterator advances.
pub struct Children<'a> {
    state: State<'a>,
}

enum State<'a> {
    Empty,
    Keyed {
        source: &'a Value,
        keys: std::vec::IntoIter<Key>,
        exclude: Option<&'a str>,
    },
    Sequential {
        source: &'a Value,
        index: usize,
    },
    Attributes {
        source: &'a Value,
        names: std::vec::IntoIter<Key>,
        exclude: Option<&'a str>,
    },
    Custom(Box<dyn Iterator<Item = Child> + 'a>),
}

impl<'a> Children<'a> {
    /// Enumerate `value` as a member of `category`.
    ///
    /// A value lacking the access the category needs (e.g. a type registered
    /// as keyed without a mapping view) yields nothing and logs a warning.
    pub fn new(value: &'a Value, category: Category, exclude: Option<&'a str>) -> Self {
        let state = match category {
            Category::Custom => match value.as_object().and_then(|o| o.as_traversable()) {
                Some(hook) => State::Custom(hook.children(exclude)),
                None => stymied(value),
            },
            Category::Keyed => match mapping_keys(value) {
                Some(keys) => State::Keyed {
                    source: value,
                    keys: keys.into_iter(),
                    exclude,
                },
                None => stymied(value),
            },
            Category::Sequential => {
                if is_sequence(value) {
                    State::Sequential {
                        source: value,
                        index: 0,
                    }
                } else {
                    stymied(value)
                }
            }
            Category::Instance => match attributes::attribute_names(value) {
                Some(names) => State::Attributes {
                    source: value,
                    names: names.into_iter(),
                    exclude,
                },
                None => stymied(value),
            },
            Category::Opaque => stymied(value),
        };
        Self { state }
    }

    pub fn empty() -> Self {
        Self { state: State::Empty }
    }
}

impl Iterator for Children<'_> {
    type Item = Child;

    fn next(&mut self) -> Option<Child> {
        match &mut self.state {
            State::Empty => None,
            State::Custom(inner) => inner.next(),
            State::Keyed {
                source,
                keys,
                exclude,
            } => loop {
                let key = keys.next()?;
                let Some(name) = visible(&key, *exclude) else {
                    continue;
                };
                // A key removed since the snapshot is simply skipped.
                if let Some(value) = mapping_get(source, &key) {
                    return Some(Child::keyed(value, name));
                }
            },
            State::Sequential { source, index } => {
                let value = sequence_get(source, *index)?;
                *index += 1;
                Some(Child::positional(value, *index - 1))
            }
            State::Attributes {
                source,
                names,
                exclude,
            } => loop {
                let key = names.next()?;
                let Some(name) = visible(&key, *exclude) else {
                    continue;
                };
                let value = attributes::attribute_or_sentinel(source, name);
                return Some(Child::attribute(value, name));
            },
        }
    }
}

fn stymied(value: &Value) -> State<'static> {
    log::warn!(
        "don't know how to decompose a value of type '{}'; treating it as a leaf",
        value.type_name()
    );
    State::Empty
}

fn visible<'k>(key: &'k Key, exclude: Option<&str>) -> Option<&'k str> {
    let name = key.as_str()?;
    match exclude {
        Some(prefix) if name.starts_with(prefix) => None,
        _ => Some(name),
    }
}

fn mapping_keys(value: &Value) -> Option<Vec<Key>> {
    match value {
        Value::Dict(dict) => Some(dict.read().keys().cloned().collect()),
        Value::Object(object) => object.as_mapping().map(|map| map.keys()),
        _ => None,
    }
}

fn mapping_get(value: &Value, key: &Key) -> Option<Value> {
    match value {
        Value::Dict(dict) => dict.read().get(key).cloned(),
        Value::Object(object) => object.as_mapping().and_then(|map| map.get(key)),
        _ => None,
    }
}

fn is_sequence(value: &Value) -> bool {
    match value {
        Value::List(_)
        | Value::Tuple(_)
        | Value::Set(_)
        | Value::FrozenSet(_)
        | Value::Array(_) => true,
        Value::Object(object) => object.as_sequence().is_some(),
        _ => false,
    }
}

fn sequence_get(value: &Value, index: usize) -> Option<Value> {
    match value {
        Value::List(list) => list.read().get(index).cloned(),
        Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => {
            items.get(index).cloned()
        }
        Value::Array(array) => match array.as_slice() {
            Some(flat) => flat.get(index).cloned(),
            None => array.iter().nth(index).cloned(),
        },
        Value::Object(object) => object.as_sequence().and_then(|seq| seq.get(index)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttributeError;
    use crate::object::{Instance, Introspectable, Object, Sequence};
    use pretty_assertions::assert_eq;

    fn names(children: Children<'_>) -> Vec<(Option<String>, String)> {
        children.map(|c| (c.name, c.access)).collect()
    }

    #[test]
    fn list_children_are_positional() {
        let list = Value::list([1, 2]);
        let children: Vec<Child> = Children::new(&list, Category::Sequential, Some("_")).collect();
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0].value, Value::Int(1)));
        assert_eq!(children[0].name, None);
        assert_eq!(children[0].access, "[0]");
        assert_eq!(children[1].access, "[1]");
    }

    #[test]
    fn dict_children_skip_excluded_and_non_textual_keys() {
        let dict = Value::dict([("a", 1), ("_b", 2)]);
        dict.insert(7, 3);
        dict.insert(Key::None, 4);

        assert_eq!(
            names(Children::new(&dict, Category::Keyed, None)),
            vec![
                (Some("a".to_string()), "[a]".to_string()),
                (Some("_b".to_string()), "[_b]".to_string()),
            ]
        );
        assert_eq!(
            names(Children::new(&dict, Category::Keyed, Some("_"))),
            vec![(Some("a".to_string()), "[a]".to_string())]
        );
    }

    #[test]
    fn fully_excluded_source_ends_cleanly() {
        let dict = Value::dict([("_a", 1), ("_b", 2)]);
        let mut children = Children::new(&dict, Category::Keyed, Some("_"));
        assert!(children.next().is_none());
        assert!(children.next().is_none());
    }

    #[test]
    fn instance_children_use_dot_access() {
        let inst = Value::object(
            Instance::new("Composite")
                .with_attr("a", 1)
                .with_attr("__doc__", ())
                .with_attr(2, "not textual"),
        );
        assert_eq!(
            names(Children::new(&inst, Category::Instance, None)),
            vec![
                (Some("a".to_string()), ".a".to_string()),
                (Some("__doc__".to_string()), ".__doc__".to_string()),
            ]
        );
        assert_eq!(
            names(Children::new(&inst, Category::Instance, Some("_"))),
            vec![(Some("a".to_string()), ".a".to_string())]
        );
    }

    struct Flaky;

    impl Object for Flaky {
        fn type_name(&self) -> &str {
            "Flaky"
        }

        fn as_introspectable(&self) -> Option<&dyn Introspectable> {
            Some(self)
        }
    }

    impl Introspectable for Flaky {
        fn attribute_names(&self) -> Vec<Key> {
            vec![Key::from("broken"), Key::from("fine")]
        }

        fn attribute(&self, name: &str) -> Result<Value, AttributeError> {
            match name {
                "fine" => Ok(Value::from(1)),
                other => Err(AttributeError::failed(other, "property raised")),
            }
        }
    }

    #[test]
    fn failing_attribute_does_not_stop_enumeration() {
        let flaky = Value::object(Flaky);
        let children: Vec<Child> = Children::new(&flaky, Category::Instance, None).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].value.type_name(), "Exception");
        assert!(matches!(children[1].value, Value::Int(1)));
    }

    struct Countdown(usize);

    impl Object for Countdown {
        fn type_name(&self) -> &str {
            "Countdown"
        }

        fn as_sequence(&self) -> Option<&dyn Sequence> {
            Some(self)
        }
    }

    impl Sequence for Countdown {
        fn len(&self) -> usize {
            self.0
        }

        fn get(&self, index: usize) -> Option<Value> {
            (index < self.0).then(|| Value::from((self.0 - index) as i64))
        }
    }

    #[test]
    fn object_sequences_enumerate_through_their_view() {
        let countdown = Value::object(Countdown(3));
        let values: Vec<String> = Children::new(&countdown, Category::Sequential, None)
            .map(|c| c.value.text().unwrap())
            .collect();
        assert_eq!(values, vec!["3", "2", "1"]);
    }

    #[test]
    fn registered_category_without_capability_yields_nothing() {
        let plain = Value::object(Instance::new("Point"));
        assert_eq!(Children::new(&plain, Category::Keyed, None).count(), 0);
        assert_eq!(Children::new(&Value::from(1), Category::Opaque, None).count(), 0);
    }

    #[test]
    fn arrays_enumerate_flat() {
        let grid = Value::array(&[2, 2], (1..=4).map(Value::from).collect()).unwrap();
        let access: Vec<String> = Children::new(&grid, Category::Sequential, None)
            .map(|c| c.access)
            .collect();
        assert_eq!(access, vec!["[0]", "[1]", "[2]", "[3]"]);
    }
}
