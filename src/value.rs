use crate::Error;
use std::fmt::{self, Display};

/// A decoded response tree.
///
/// Maps are kept as ordered association lists so that "first match" path
/// resolution follows the source document's own key order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// Integer and floating payload numbers collapse into one kind.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Map(Vec<(String, Value)>),
}

/// Semantic kind of a [`Value`], as reported by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Map,
}

impl Kind {
    /// Parses a single wanted-kind name as it appears in a type assertion.
    pub fn from_name(name: &str) -> Result<Kind, Error> {
        match name {
            "int" | "integer" | "number" | "float" => Ok(Kind::Number),
            "string" => Ok(Kind::String),
            "array" => Ok(Kind::Array),
            "map" | "object" => Ok(Kind::Map),
            "bool" | "boolean" => Ok(Kind::Boolean),
            "NULL" | "null" => Ok(Kind::Null),
            _ => Err(Error::Assertion(format!("unknown type name: \"{name}\""))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "NULL",
            Kind::Boolean => "boolean",
            Kind::Number => "int",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Intrinsic kind of this value, without any coercion.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Wanted-kind-directed classification.
    ///
    /// The payload is text-based JSON, so integers may arrive as
    /// numeric-looking strings. Coercion is applied here, at assertion time:
    /// a numeric string satisfies a wanted `Number`, an empty string counts
    /// as `Null` (and therefore no longer as a string), and a wanted `Array`
    /// accepts either composite. The numeric conversion is one-directional;
    /// a number never qualifies as a string.
    pub fn is_of_kind(&self, wanted: Kind) -> bool {
        match (self, wanted) {
            (Value::String(s), Kind::Number) => numeric(s).is_some(),
            (Value::String(s), _) if s.is_empty() => wanted == Kind::Null,
            (Value::Map(_), Kind::Array) => true,
            _ => self.kind() == wanted,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Map(_))
    }

    /// Child entries in source order. Array elements are keyed by their
    /// stringified index so map and array traversal read identically.
    pub fn entries(&self) -> Vec<(String, &Value)> {
        match self {
            Value::Map(m) => m.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(a) => a
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Looks up a direct child by exact key, no regex involved.
    pub fn get_child(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.iter().find_map(|(k, v)| (k == name).then_some(v)),
            Value::Array(a) => name.parse::<usize>().ok().and_then(|i| a.get(i)),
            _ => None,
        }
    }

    /// Number of direct children, with array-cast semantics: a scalar counts
    /// as a single-element collection, null as an empty one.
    pub fn child_count(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Array(a) => a.len(),
            Value::Map(m) => m.len(),
            _ => 1,
        }
    }

    /// Loose, type-coercing equality used by the `equals` assertion.
    ///
    /// Numbers and numeric strings compare equal in both directions; two
    /// numeric strings compare numerically, not byte-wise, so `"3"` equals
    /// `"3.0"`. Composites fall back to deep structural equality.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
                numeric(s).map(|p| p == *n).unwrap_or(false)
            }
            (Value::String(s1), Value::String(s2)) => match (numeric(s1), numeric(s2)) {
                (Some(n1), Some(n2)) => n1 == n2,
                _ => s1 == s2,
            },
            (Value::Number(n1), Value::Number(n2)) => n1 == n2,
            (a, b) if a.is_composite() || b.is_composite() => a.deep_eq(b),
            (a, b) => a == b,
        }
    }

    /// Recursive structural equality.
    ///
    /// Map key order is irrelevant; array element order is significant.
    /// No coercion is applied at any depth.
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a1), Value::Array(a2)) => {
                a1.len() == a2.len() && a1.iter().zip(a2).all(|(v1, v2)| v1.deep_eq(v2))
            }
            (Value::Map(m1), Value::Map(m2)) => {
                m1.len() == m2.len()
                    && m1.iter().all(|(key, v1)| {
                        m2.iter()
                            .find_map(|(k, v)| (k == key).then_some(v))
                            .map(|v2| v1.deep_eq(v2))
                            .unwrap_or(false)
                    })
            }
            (a, b) => a == b,
        }
    }
}

/// Tests a value against a pipe-delimited set of wanted-kind names.
pub fn matches_type_spec(value: &Value, spec: &str) -> Result<bool, Error> {
    for name in spec.split('|') {
        if value.is_of_kind(Kind::from_name(name)?) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Numeric-literal check for coercion; `None` when the string is not a number.
fn numeric(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => f.write_str(s),
            Value::Array(a) => {
                f.write_str("[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, v)?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{k}\":")?;
                    write_quoted(f, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

// Nested strings are quoted so composite diagnostics read as JSON.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => write!(f, "\"{s}\""),
        Value::Null => f.write_str("null"),
        other => write!(f, "{other}"),
    }
}
