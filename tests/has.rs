use nestpath::{HasOptions, Mapping, Value, has, has_own};
use serde_json::json;

fn inherited() -> HasOptions {
    HasOptions::default()
}

fn nested_object() -> Value {
    let root = Value::from(json!({"b": {"c": {"d": {"e": 1, "f": null}}}}));
    let base = Mapping::new();
    base.insert("h", true.into());
    let d = root.lookup("b").and_then(|b| b.lookup("c")).and_then(|c| c.lookup("d")).unwrap();
    d.as_mapping().unwrap().insert("g", Mapping::with_base(&base).into());
    root
}

fn nested_array() -> Value {
    json!([{"b": [{"c": 1}, {"d": 2}]}]).into()
}

#[test]
fn primitives_have_nothing() {
    for primitive in [Value::from(0), 1.into(), true.into(), false.into(), "".into(), Value::Null] {
        assert!(!has(&primitive, None::<&str>, inherited()));
        assert!(!has(&primitive, "b.c", inherited()));
    }
}

#[test]
fn no_path_is_false() {
    assert!(!has(&nested_object(), None::<&str>, inherited()));
    assert!(!has(&nested_object(), "", inherited()));
}

#[test]
fn resolving_paths_are_true() {
    let root = nested_object();
    for path in ["b", "b.c", "b.c.d", "b.c.d.e"] {
        assert!(has(&root, path, inherited()), "{path} should resolve");
    }
}

#[test]
fn present_null_counts() {
    assert!(has(&nested_object(), "b.c.d.f", inherited()));
    assert!(has_own(&nested_object(), "b.c.d.f"));
}

#[test]
fn dead_ends_are_false() {
    let root = nested_object();
    for path in ["x", "b.x", "b.c.x", "b.c.d.x", "b.x.d.e"] {
        assert!(!has(&root, path, inherited()), "{path} should not resolve");
    }
}

#[test]
fn stepping_into_a_primitive_is_false() {
    assert!(!has(&nested_object(), "b.c.d.e.h", inherited()));
}

#[test]
fn inherited_versus_own() {
    let root = nested_object();
    assert!(has(&root, "b.c.d.g.h", inherited()));
    assert!(!has(&root, "b.c.d.g.h", HasOptions { own: true }));
    assert!(!has_own(&root, "b.c.d.g.h"));
    assert!(has(&root, "b.toString", inherited()));
    assert!(!has_own(&root, "b.toString"));
}

#[test]
fn has_own_is_has_with_own_forced() {
    let root = nested_object();
    for path in ["b", "b.c.d.g.h", "b.toString", "x", "b.c.d.f"] {
        assert_eq!(has_own(&root, path), has(&root, path, HasOptions { own: true }), "{path}");
    }
}

#[test]
fn sequences_by_index() {
    let root = nested_array();
    assert!(has(&root, 0usize, inherited()));
    assert!(has(&root, "0", inherited()));
    assert!(has(&root, "0.b", inherited()));
    assert!(has(&root, "0.b.0", inherited()));
    assert!(has(&root, "0.b.1", inherited()));
    assert!(!has(&root, 1usize, inherited()));
    assert!(!has(&root, "0.x", inherited()));
    assert!(!has(&root, "1.b", inherited()));
}

#[test]
fn wildcard_needs_every_element() {
    let root = nested_array();
    assert!(has(&root, "0.b.+", inherited()));
    assert!(!has(&root, "0.b.+.c", inherited()), "second element has no c");
    let both = Value::from(json!([{"c": 1}, {"c": null}]));
    assert!(has(&both, "+.c", inherited()));
    assert!(!has(&Value::from(json!({"a": []})), "a.+.c", inherited()), "empty fan-out");
    assert!(!has(&both, "0.+", inherited()), "wildcard over a mapping");
}

#[test]
fn sequences_inherit_nothing() {
    let root = nested_array();
    assert!(has(&root, "length", inherited()));
    assert!(has_own(&root, "length"));
    for key in ["toString", "constructor", "__proto__"] {
        assert!(!has(&root, key, inherited()), "{key}");
    }
    assert!(has(&root, "0.toString", inherited()), "the element is a plain mapping");
}
