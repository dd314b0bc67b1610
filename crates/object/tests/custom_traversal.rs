use grasp_object::{Category, Child, Children, CustomTraversable, Object, TypeRegistry, Value};

/// Registry-like container that only reveals its entries through a hook
struct Plugins {
    entries: Vec<(String, Value)>,
}

impl Object for Plugins {
    fn type_name(&self) -> &str {
        "Plugins"
    }

    fn as_traversable(&self) -> Option<&dyn CustomTraversable> {
        Some(self)
    }
}

impl CustomTraversable for Plugins {
    fn children<'a>(&'a self, exclude: Option<&'a str>) -> Box<dyn Iterator<Item = Child> + 'a> {
        Box::new(
            self.entries
                .iter()
                .filter(move |(name, _)| exclude.map_or(true, |prefix| !name.starts_with(prefix)))
                .map(|(name, value)| Child {
                    value: value.clone(),
                    name: Some(name.clone()),
                    access: format!(".get('{name}')"),
                }),
        )
    }
}

fn plugins() -> Value {
    Value::object(Plugins {
        entries: vec![
            ("lint".to_string(), Value::from(1)),
            ("_internal".to_string(), Value::from(2)),
        ],
    })
}

#[test]
fn hook_is_classified_as_custom() {
    assert_eq!(TypeRegistry::default().classify(&plugins()), Category::Custom);
}

#[test]
fn hook_receives_the_exclusion_prefix() {
    let value = plugins();
    let all: Vec<String> = Children::new(&value, Category::Custom, None)
        .map(|c| c.access)
        .collect();
    assert_eq!(all, vec![".get('lint')", ".get('_internal')"]);

    let public: Vec<String> = Children::new(&value, Category::Custom, Some("_"))
        .map(|c| c.access)
        .collect();
    assert_eq!(public, vec![".get('lint')"]);
}
