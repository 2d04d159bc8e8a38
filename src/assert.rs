//! Assertion catalog over resolved property values.
//!
//! Every assertion is a pure predicate over the response tree; a failing
//! predicate raises a typed [`Error`] whose message carries the path
//! expression, the actual value and the expected value or count, so failures
//! stay debuggable without re-running the scenario.

use crate::{value::matches_type_spec, Error, MatchMode, PropertyPath, Value};
use regex::Regex;

/// Comparison applied to a child count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCmp {
    Exact,
    AtLeast,
    LessThan,
}

impl CountCmp {
    fn satisfied(&self, count: usize, wanted: usize) -> bool {
        match self {
            CountCmp::Exact => count == wanted,
            CountCmp::AtLeast => count >= wanted,
            CountCmp::LessThan => count < wanted,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            CountCmp::Exact => "exactly",
            CountCmp::AtLeast => "at least",
            CountCmp::LessThan => "less than",
        }
    }
}

fn require_one<'a>(tree: &'a Value, path: &PropertyPath) -> Result<&'a Value, Error> {
    path.resolve_one(tree)
        .ok_or_else(|| Error::MissingProperty(path.expr().to_owned()))
}

fn compile(path: &str) -> Result<PropertyPath, Error> {
    PropertyPath::parse(path, MatchMode::Regex)
}

/// Checks a single value against a pipe-delimited wanted-type set.
fn check_type(value: &Value, type_spec: &str, path: &str) -> Result<(), Error> {
    if matches_type_spec(value, type_spec)? {
        Ok(())
    } else {
        Err(Error::Assertion(format!(
            "wrong property type found for {path}: \"{}\" for value \"{value}\", wanted: \"{type_spec}\"",
            value.kind()
        )))
    }
}

/// The path must resolve to a value.
pub fn exists(tree: &Value, path: &str) -> Result<(), Error> {
    if compile(path)?.exists(tree) {
        Ok(())
    } else {
        Err(Error::MissingProperty(format!(
            "property {path} does not exist"
        )))
    }
}

/// The resolved value must loosely equal the expected value.
///
/// A missing property is an error distinct from a mismatch.
pub fn equals(tree: &Value, path: &str, expected: &Value) -> Result<(), Error> {
    let actual = require_one(tree, &compile(path)?)?;
    if actual.loose_eq(expected) {
        Ok(())
    } else {
        Err(Error::Assertion(format!(
            "wrong value found for {path}: {actual}, wanted: {expected}"
        )))
    }
}

/// The resolved value, stringified, must satisfy the unanchored pattern.
pub fn matches(tree: &Value, path: &str, pattern: &str) -> Result<(), Error> {
    let actual = require_one(tree, &compile(path)?)?;
    let regex = Regex::new(pattern)?;
    if regex.is_match(&actual.to_string()) {
        Ok(())
    } else {
        Err(Error::Assertion(format!(
            "wrong value found for {path}: {actual}, wanted match: {pattern}"
        )))
    }
}

/// The resolved value, stringified, must contain the expected substring.
pub fn contains(tree: &Value, path: &str, needle: &str) -> Result<(), Error> {
    let actual = require_one(tree, &compile(path)?)?;
    if actual.to_string().contains(needle) {
        Ok(())
    } else {
        Err(Error::Assertion(format!(
            "missing value ({needle}) inside {path}: {actual}"
        )))
    }
}

/// The resolved value's wanted-kind-directed classification must be a member
/// of the pipe-delimited type set.
pub fn has_type(tree: &Value, path: &str, type_spec: &str) -> Result<(), Error> {
    let actual = require_one(tree, &compile(path)?)?;
    check_type(actual, type_spec, path)
}

/// Every plural-resolved value must satisfy the type set.
///
/// Zero matches is vacuously true; only found properties are tested.
pub fn all_have_type(tree: &Value, path: &str, type_spec: &str) -> Result<(), Error> {
    for value in compile(path)?.resolve_all(tree) {
        check_type(value, type_spec, path)?;
    }
    Ok(())
}

/// At least `required` plural-resolved values must satisfy the type set.
///
/// Zero candidates is an error, distinct from candidates failing the check.
pub fn at_least_have_type(
    tree: &Value,
    path: &str,
    required: usize,
    type_spec: &str,
) -> Result<(), Error> {
    let values = compile(path)?.resolve_all(tree);
    if values.is_empty() {
        return Err(Error::MissingProperty(path.to_owned()));
    }

    let mut amount = 0;
    for value in &values {
        if matches_type_spec(value, type_spec)? {
            amount += 1;
        }
    }

    if amount < required {
        Err(Error::Assertion(format!(
            "wrong amount of property types found for {path}: {amount}, wanted: {required}"
        )))
    } else {
        Ok(())
    }
}

/// At least `required` values must be reachable through the path.
pub fn at_least_exist(tree: &Value, path: &str, required: usize) -> Result<(), Error> {
    let values = compile(path)?.resolve_all(tree);
    if values.is_empty() {
        return Err(Error::MissingProperty(path.to_owned()));
    }

    if values.len() < required {
        Err(Error::Assertion(format!(
            "wrong amount of property instances found for {path}: {}, wanted: {required}",
            values.len()
        )))
    } else {
        Ok(())
    }
}

/// The singular resolved value's own child count must satisfy the comparison.
pub fn has_children(tree: &Value, path: &str, wanted: usize, cmp: CountCmp) -> Result<(), Error> {
    let actual = require_one(tree, &compile(path)?)?;
    let count = actual.child_count();
    if cmp.satisfied(count, wanted) {
        Ok(())
    } else {
        Err(Error::Assertion(format!(
            "wrong number of children found for {path}: {count}, wanted: {} {wanted}",
            cmp.describe()
        )))
    }
}

/// At least `required` plural-resolved composites must have a child count
/// satisfying the comparison. Scalar candidates are never counted.
pub fn at_least_have_children(
    tree: &Value,
    path: &str,
    required: usize,
    children: usize,
    cmp: CountCmp,
) -> Result<(), Error> {
    let values = compile(path)?.resolve_all(tree);
    if values.is_empty() {
        return Err(Error::MissingProperty(path.to_owned()));
    }

    let amount = values
        .iter()
        .filter(|value| value.is_composite() && cmp.satisfied(value.child_count(), children))
        .count();

    if amount < required {
        Err(Error::Assertion(format!(
            "wrong amount of properties found for {path}: {amount}, \
             wanted: {required} each with {} {children} children",
            cmp.describe()
        )))
    } else {
        Ok(())
    }
}

/// Every child key of every plural-resolved composite must match the anchored
/// name pattern. Empty or non-composite matches are skipped, not failed.
pub fn children_all_named(tree: &Value, path: &str, name: &str) -> Result<(), Error> {
    let pattern = Regex::new(&format!("^{name}$"))?;

    for value in compile(path)?.resolve_all(tree) {
        for (key, _) in value.entries() {
            if !pattern.is_match(&key) {
                return Err(Error::Assertion(format!(
                    "child name \"{key}\" under {path} does not match pattern \"{}\"",
                    pattern.as_str()
                )));
            }
        }
    }
    Ok(())
}

/// Every plural-resolved value must contain a child with the literal name.
pub fn foreach_child_exists(tree: &Value, path: &str, child: &str) -> Result<(), Error> {
    for value in compile(path)?.resolve_all(tree) {
        if value.get_child(child).is_none() {
            return Err(Error::Assertion(format!(
                "child {child} does not exist on {path}"
            )));
        }
    }
    Ok(())
}

/// Every plural-resolved value must contain a child matching the anchored
/// name pattern, and every such child must satisfy the type set.
pub fn foreach_child_has_type(
    tree: &Value,
    path: &str,
    child: &str,
    type_spec: &str,
) -> Result<(), Error> {
    let pattern = Regex::new(&format!("^{child}$"))?;

    for value in compile(path)?.resolve_all(tree) {
        let mut found = false;
        for (key, child_value) in value.entries() {
            if pattern.is_match(&key) {
                check_type(child_value, type_spec, path)?;
                found = true;
            }
        }
        if !found {
            return Err(Error::Assertion(format!(
                "child {child} does not exist on {path}"
            )));
        }
    }
    Ok(())
}

/// The singular resolved value must be deeply, structurally equal to the
/// expected value: same nested mappings and sequences, same scalars, with
/// map key order irrelevant.
pub fn deep_equals(tree: &Value, path: &str, expected: &Value) -> Result<(), Error> {
    let actual = require_one(tree, &compile(path)?)?;
    if actual.deep_eq(expected) {
        Ok(())
    } else {
        Err(Error::Assertion(format!(
            "recursive keys or values do not match for {path}: {actual}, wanted: {expected}"
        )))
    }
}
