use nestpath::{IsInOptions, Mapping, Value, is_in};
use serde_json::json;

fn anywhere() -> IsInOptions {
    IsInOptions::default()
}

fn resolving() -> IsInOptions {
    IsInOptions { valid_path: true }
}

fn nested_object() -> (Value, Value, Value, Value) {
    let root = Value::from(json!({"b": {"c": {"d": 1}}}));
    let b = root.lookup("b").unwrap();
    let c = b.lookup("c").unwrap();
    let d = c.lookup("d").unwrap();
    (root, b, c, d)
}

#[test]
fn nothing_to_search() {
    assert!(!is_in(&Value::Null, None::<&str>, None, anywhere()));
    assert!(!is_in(&Mapping::new().into(), None::<&str>, None, anywhere()));
    assert!(!is_in(&Value::from(1), "a", Some(&Value::from(1)), anywhere()));
}

#[test]
fn absent_needle_matches_a_dead_end() {
    let empty = Value::from(Mapping::new());
    assert!(is_in(&empty, "a.b", None, anywhere()));
    assert!(!is_in(&empty, "a.b", None, resolving()));
}

#[test]
fn other_falsy_needles_do_not_match_absence() {
    let empty = Value::from(Mapping::new());
    for needle in [Value::from(0), Value::Null, f64::NAN.into(), "".into()] {
        assert!(!is_in(&empty, "a.b", Some(&needle), anywhere()), "{needle:?}");
    }
}

#[test]
fn finds_every_container_along_a_valid_path() {
    let (root, b, c, d) = nested_object();
    for needle in [&root, &b, &c, &d] {
        assert!(is_in(&root, "b.c.d", Some(needle), anywhere()));
        assert!(is_in(&root, "b.c.d", Some(needle), resolving()));
    }
}

#[test]
fn containers_match_by_identity() {
    let (root, ..) = nested_object();
    let lookalike = Value::from(json!({"d": 1}));
    assert!(!is_in(&root, "b.c.d", Some(&lookalike), anywhere()));
}

#[test]
fn values_past_the_dead_end_are_not_found() {
    let (root, b, c, d) = nested_object();
    assert!(!is_in(&root, "x.c", Some(&b), anywhere()));
    assert!(!is_in(&root, "b.x.d", Some(&c), anywhere()));
    assert!(!is_in(&root, "b.c.x", Some(&d), anywhere()));
}

#[test]
fn values_before_the_dead_end_are_found_unless_the_path_must_resolve() {
    let (root, b, c, d) = nested_object();
    let cases = [("x.c.d", &root), ("b.x.d", &b), ("b.c.x", &c), ("b.c.d.x", &d)];
    for (path, needle) in cases {
        assert!(is_in(&root, path, Some(needle), anywhere()), "{path}");
        assert!(!is_in(&root, path, Some(needle), resolving()), "{path}");
    }
}

#[test]
fn sequences() {
    let root = Value::from(json!([{"c": {"d": 1}}]));
    let first = root.lookup("0").unwrap();
    let c = first.lookup("c").unwrap();
    let d = c.lookup("d").unwrap();
    assert!(is_in(&root, "0.b.c", None, anywhere()));
    assert!(is_in(&root, "0", Some(&first), resolving()));
    assert!(is_in(&root, 0usize, Some(&first), resolving()));
    assert!(is_in(&root, "0.c", Some(&c), resolving()));
    assert!(is_in(&root, "0.c.d", Some(&d), resolving()));
    for (path, needle) in [("0.x.d", &first), ("0.c.x", &c), ("0.c.d.x", &d), ("x", &root)] {
        assert!(is_in(&root, path, Some(needle), anywhere()), "{path}");
        assert!(!is_in(&root, path, Some(needle), resolving()), "{path}");
    }
}

#[test]
fn wildcards_search_every_element() {
    let root = Value::from(json!([{"a": 1}, {"a": 2}, {"b": 3}]));
    let two = Value::from(2);
    assert!(is_in(&root, "+.a", Some(&two), anywhere()));
    assert!(!is_in(&root, "+.a", Some(&two), resolving()), "third element lacks a");
    assert!(!is_in(&root, "0.+", Some(&two), anywhere()), "wildcard over a mapping");
}

#[test]
fn the_root_is_found_before_a_leading_wildcard() {
    let root = Value::from(json!([{"a": 1}]));
    assert!(is_in(&root, "+.a", Some(&root), anywhere()));
    assert!(is_in(&root, "+.a", Some(&root), resolving()));
    assert!(is_in(&root, "0.a", Some(&root), anywhere()));

    let empty = Value::from(json!([]));
    assert!(is_in(&empty, "+", Some(&empty), anywhere()));
    assert!(!is_in(&empty, "+", Some(&empty), resolving()), "nothing resolves");
}

#[test]
fn sequences_between_wildcards_are_found() {
    let root = Value::from(json!([[{"a": 1}], [{"a": 2}]]));
    let inner = root.lookup("1").unwrap();
    assert!(is_in(&root, "+.+.a", Some(&inner), anywhere()));
    assert!(is_in(&root, "+.+.a", Some(&inner), resolving()));
    let stranger = Value::from(json!([{"a": 2}]));
    assert!(!is_in(&root, "+.+.a", Some(&stranger), anywhere()));
}
