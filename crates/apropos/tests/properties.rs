use grasp_apropos::{Apropos, SearchOptions};
use grasp_object::{TypeRegistry, Value};
use proptest::prelude::*;
use std::collections::HashSet;

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("foo"),
        Just("_foo"),
        Just("bar"),
        Just("foobar"),
        Just("b"),
    ]
    .prop_map(String::from)
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        "[a-z_]{0,6}".prop_map(|s| Value::str(s)),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| Value::list(items)),
            prop::collection::vec((key(), inner), 0..4).prop_map(|entries| Value::dict(entries)),
        ]
    })
}

/// Point the root back at itself so every walk meets a cycle
fn close_loop(root: &Value) {
    if !root.insert("loop", root.clone()) {
        root.push(root.clone());
    }
}

fn search(root: &Value, options: &SearchOptions) -> Vec<String> {
    Apropos::new(&TypeRegistry::default())
        .search("foo", root, options)
        .expect("search")
}

proptest! {
    #[test]
    fn deeper_bounds_only_add_paths(root in tree(), cyclic in any::<bool>(), k in 0usize..5) {
        if cyclic {
            close_loop(&root);
        }
        let shallow: HashSet<String> = search(&root, &SearchOptions::default().max_depth(k)).into_iter().collect();
        let deeper: HashSet<String> = search(&root, &SearchOptions::default().max_depth(k + 1)).into_iter().collect();
        prop_assert!(shallow.is_subset(&deeper), "{shallow:?} not within {deeper:?}");
    }

    #[test]
    fn cycles_terminate_and_expand_once(root in tree()) {
        close_loop(&root);
        let report = Apropos::new(&TypeRegistry::default())
            .walk("foo", &root, &SearchOptions::default())
            .expect("walk");
        let unique: HashSet<&String> = report.paths.iter().collect();
        prop_assert_eq!(unique.len(), report.paths.len());
        prop_assert!(report.stats.expanded <= report.stats.visited);
        for path in &report.paths {
            prop_assert!(!path.starts_with("arg[loop]["), "root re-expanded: {}", path);
        }
    }

    #[test]
    fn exclusion_prunes_every_private_segment(root in tree()) {
        let paths = search(&root, &SearchOptions::default().exclude("_"));
        for path in paths {
            prop_assert!(!path.contains("[_"), "excluded segment in {}", path);
        }
    }

    #[test]
    fn unbounded_equals_sufficiently_deep(root in tree()) {
        prop_assert_eq!(
            search(&root, &SearchOptions::default()),
            search(&root, &SearchOptions::default().max_depth(16))
        );
    }
}
