use super::util::json_to_value;
use crate::{assert as catalog, CountCmp, Error, Value};

#[test]
fn exists_passes_on_present_values_including_null() {
    let tree = json_to_value(r#"{"status":"ok","gone":null}"#);

    catalog::exists(&tree, "status").unwrap();
    catalog::exists(&tree, "gone").unwrap();

    assert!(matches!(
        catalog::exists(&tree, "missing"),
        Err(Error::MissingProperty(_))
    ));
}

#[test]
fn equals_compares_loosely() {
    let tree = json_to_value(r#"{"status":"ok","count":"3","total":3}"#);

    catalog::equals(&tree, "status", &Value::String("ok".to_owned())).unwrap();
    catalog::equals(&tree, "count", &Value::Number(3.0)).unwrap();
    catalog::equals(&tree, "total", &Value::String("3".to_owned())).unwrap();

    let err = catalog::equals(&tree, "status", &Value::String("bad".to_owned())).unwrap_err();
    assert!(matches!(err, Error::Assertion(_)));
}

#[test]
fn equals_distinguishes_missing_from_mismatch() {
    let tree = json_to_value(r#"{"status":"ok"}"#);

    assert!(matches!(
        catalog::equals(&tree, "missing", &Value::Null),
        Err(Error::MissingProperty(_))
    ));
    assert!(matches!(
        catalog::equals(&tree, "status", &Value::String("bad".to_owned())),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn matches_is_unanchored() {
    let tree = json_to_value(r#"{"title":"hello world"}"#);

    catalog::matches(&tree, "title", "lo wo").unwrap();
    catalog::matches(&tree, "title", "^hello").unwrap();

    assert!(matches!(
        catalog::matches(&tree, "title", "^world"),
        Err(Error::Assertion(_))
    ));
    assert!(matches!(
        catalog::matches(&tree, "title", "(unclosed"),
        Err(Error::Pattern(_))
    ));
}

#[test]
fn contains_checks_stringified_substring() {
    let tree = json_to_value(r#"{"title":"hello world","count":1234}"#);

    catalog::contains(&tree, "title", "lo wo").unwrap();
    catalog::contains(&tree, "count", "23").unwrap();

    assert!(matches!(
        catalog::contains(&tree, "title", "mars"),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn has_type_applies_wanted_kind_coercion() {
    let tree = json_to_value(r#"{"count":"42","name":"bob","empty":"","tags":["a"]}"#);

    catalog::has_type(&tree, "count", "int").unwrap();
    catalog::has_type(&tree, "count", "string").unwrap();
    catalog::has_type(&tree, "empty", "NULL").unwrap();
    catalog::has_type(&tree, "tags", "array").unwrap();
    catalog::has_type(&tree, "name", "int|string").unwrap();

    assert!(matches!(
        catalog::has_type(&tree, "name", "int"),
        Err(Error::Assertion(_))
    ));
    assert!(matches!(
        catalog::has_type(&tree, "missing", "int"),
        Err(Error::MissingProperty(_))
    ));
}

#[test]
fn all_have_type_is_vacuous_on_zero_matches() {
    let tree = json_to_value(r#"{"items":{"x":{"t":"int"},"y":{"t":"string"},"z":{"t":"int"}}}"#);

    catalog::all_have_type(&tree, "items/.*/t", "int|string").unwrap();
    // No matching properties at all: success, nothing to test.
    catalog::all_have_type(&tree, "nothing/.*", "int").unwrap();

    assert!(matches!(
        catalog::all_have_type(&tree, "items/.*", "string"),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn at_least_have_type_counts_matching_values() {
    let tree = json_to_value(r#"{"items":{"x":{"t":42},"y":{"t":"foo"},"z":{"t":"7"}}}"#);

    // 42 is a number, "7" coerces into one, "foo" does not.
    catalog::at_least_have_type(&tree, "items/.*/t", 2, "int").unwrap();

    let err = catalog::at_least_have_type(&tree, "items/.*/t", 3, "int").unwrap_err();
    assert!(matches!(err, Error::Assertion(_)));
}

#[test]
fn at_least_have_type_distinguishes_no_candidates_from_failing_ones() {
    let tree = json_to_value(r#"{"items":{"x":{"t":"foo"}}}"#);

    assert!(matches!(
        catalog::at_least_have_type(&tree, "nothing/.*", 1, "int"),
        Err(Error::MissingProperty(_))
    ));
    assert!(matches!(
        catalog::at_least_have_type(&tree, "items/.*/t", 1, "int"),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn at_least_exist_counts_candidates() {
    let tree = json_to_value(r#"{"a1":1,"a2":2,"b1":3}"#);

    catalog::at_least_exist(&tree, "a.*", 2).unwrap();

    assert!(matches!(
        catalog::at_least_exist(&tree, "a.*", 3),
        Err(Error::Assertion(_))
    ));
    assert!(matches!(
        catalog::at_least_exist(&tree, "c.*", 1),
        Err(Error::MissingProperty(_))
    ));
}

#[test]
fn has_children_compares_the_singular_value() {
    let tree = json_to_value(r#"{"status":"ok","items":[1,2,3],"gone":null}"#);

    catalog::has_children(&tree, "items", 3, CountCmp::Exact).unwrap();
    catalog::has_children(&tree, "items", 2, CountCmp::AtLeast).unwrap();
    catalog::has_children(&tree, "items", 4, CountCmp::LessThan).unwrap();
    // Root has three children.
    catalog::has_children(&tree, "", 3, CountCmp::Exact).unwrap();
    // Scalars count as a single-element collection, null as empty.
    catalog::has_children(&tree, "status", 1, CountCmp::Exact).unwrap();
    catalog::has_children(&tree, "gone", 0, CountCmp::Exact).unwrap();

    assert!(matches!(
        catalog::has_children(&tree, "items", 2, CountCmp::Exact),
        Err(Error::Assertion(_))
    ));
    assert!(matches!(
        catalog::has_children(&tree, "missing", 1, CountCmp::Exact),
        Err(Error::MissingProperty(_))
    ));
}

#[test]
fn at_least_have_children_only_counts_composites() {
    let tree = json_to_value(
        r#"{"rows":{"a":[1,2],"b":[1,2],"c":[1,2,3],"d":"scalar"}}"#,
    );

    catalog::at_least_have_children(&tree, "rows/.*", 2, 2, CountCmp::Exact).unwrap();
    catalog::at_least_have_children(&tree, "rows/.*", 3, 2, CountCmp::AtLeast).unwrap();

    // "d" is a scalar; it never counts, even though child_count would be 1.
    assert!(matches!(
        catalog::at_least_have_children(&tree, "rows/.*", 3, 2, CountCmp::Exact),
        Err(Error::Assertion(_))
    ));
    assert!(matches!(
        catalog::at_least_have_children(&tree, "none/.*", 1, 1, CountCmp::Exact),
        Err(Error::MissingProperty(_))
    ));
}

#[test]
fn children_all_named_skips_non_composites() {
    let tree = json_to_value(
        r#"{"nodes":{"n1":{"field_a":1,"field_b":2},"n2":{"field_c":3},"n3":"scalar","n4":{}}}"#,
    );

    catalog::children_all_named(&tree, "nodes/.*", "field_.").unwrap();

    let tree = json_to_value(r#"{"nodes":{"n1":{"field_a":1,"other":2}}}"#);
    assert!(matches!(
        catalog::children_all_named(&tree, "nodes/.*", "field_."),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn foreach_child_exists_requires_the_literal_key() {
    let tree = json_to_value(r#"{"nodes":{"n1":{"id":1},"n2":{"id":2}}}"#);

    catalog::foreach_child_exists(&tree, "nodes/.*", "id").unwrap();

    let tree = json_to_value(r#"{"nodes":{"n1":{"id":1},"n2":{"uuid":2}}}"#);
    assert!(matches!(
        catalog::foreach_child_exists(&tree, "nodes/.*", "id"),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn foreach_child_has_type_checks_every_matching_child() {
    let tree = json_to_value(r#"{"nodes":{"n1":{"id":1},"n2":{"id":"7"}}}"#);

    catalog::foreach_child_has_type(&tree, "nodes/.*", "id", "int").unwrap();

    let tree = json_to_value(r#"{"nodes":{"n1":{"id":1},"n2":{"id":"x"}}}"#);
    assert!(matches!(
        catalog::foreach_child_has_type(&tree, "nodes/.*", "id", "int"),
        Err(Error::Assertion(_))
    ));

    // A candidate with no matching child is an error, unlike children_all_named.
    let tree = json_to_value(r#"{"nodes":{"n1":{"id":1},"n2":{"uuid":2}}}"#);
    assert!(matches!(
        catalog::foreach_child_has_type(&tree, "nodes/.*", "id", "int"),
        Err(Error::Assertion(_))
    ));
}

#[test]
fn deep_equals_compares_structure_recursively() {
    let tree = json_to_value(r#"{"payload":{"a":[1,2,{"b":3}],"c":"x"}}"#);

    catalog::deep_equals(
        &tree,
        "payload",
        &json_to_value(r#"{"c":"x","a":[1,2,{"b":3}]}"#),
    )
    .unwrap();

    assert!(matches!(
        catalog::deep_equals(
            &tree,
            "payload",
            &json_to_value(r#"{"c":"x","a":[1,2,{"b":4}]}"#),
        ),
        Err(Error::Assertion(_))
    ));
    assert!(matches!(
        catalog::deep_equals(&tree, "missing", &Value::Null),
        Err(Error::MissingProperty(_))
    ));
}

#[test]
fn assertions_are_idempotent() {
    let tree = json_to_value(r#"{"count":"3"}"#);

    for _ in 0..2 {
        catalog::equals(&tree, "count", &Value::Number(3.0)).unwrap();
        assert!(catalog::equals(&tree, "count", &Value::Number(4.0)).is_err());
    }
}
