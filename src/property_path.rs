use crate::{Error, Value};
use regex::Regex;

/// How path segments are matched against sibling keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Each segment is the body of an anchored regular expression.
    Regex,
    /// Each segment is quoted before compiling, for exact matches on keys
    /// containing regex metacharacters.
    Literal,
}

/// Represents a compiled property path expression.
///
/// A path is a `/`-delimited string whose segments select into nested
/// structure; each segment is matched anchored (`^segment$`) against the
/// sibling keys of the current node. Once constructed, this structure can be
/// used efficiently multiple times against different response trees.
#[derive(Debug)]
pub struct PropertyPath {
    expr: String,
    segments: Vec<Regex>,
}

impl PropertyPath {
    /// Compiles a path expression.
    ///
    /// An empty expression denotes the tree root.
    /// # Return
    /// A new `PropertyPath` instance or an error if a segment is not a valid
    /// regular expression.
    pub fn parse(expr: &str, mode: MatchMode) -> Result<Self, Error> {
        let segments = if expr.is_empty() {
            Vec::new()
        } else {
            expr.split('/')
                .map(|segment| {
                    let body = match mode {
                        MatchMode::Regex => segment.to_owned(),
                        MatchMode::Literal => regex::escape(segment),
                    };
                    Regex::new(&format!("^{body}$")).map_err(Error::from)
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            expr: expr.to_owned(),
            segments,
        })
    }

    /// The original path expression, for diagnostics.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Singular resolution: follows, at each level, the first sibling key in
    /// source order matching the segment.
    /// # Return
    /// The value at the last node visited, or `None` the moment a level has
    /// no matching key. Descending into a scalar behaves identically to a
    /// missing key.
    pub fn resolve_one<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut cursor = root;

        for (level, segment) in self.segments.iter().enumerate() {
            match match_first(cursor, segment) {
                Some(child) => cursor = child,
                None => {
                    log::debug!(
                        "`{}`: no key matching `{}` at level {level}",
                        self.expr,
                        segment.as_str()
                    );
                    return None;
                }
            }
        }

        Some(cursor)
    }

    /// Whether the path resolves to a value.
    ///
    /// Shares the singular descent, so `exists` is false exactly when
    /// [`resolve_one`](Self::resolve_one) yields nothing.
    pub fn exists(&self, root: &Value) -> bool {
        self.resolve_one(root).is_some()
    }

    /// Plural resolution: fans out into every sibling key matching each
    /// segment, depth-first, preserving per-branch source order.
    /// # Return
    /// All reachable values. Zero matches yield an empty vector, never an
    /// error; non-composite cursors contribute nothing.
    pub fn resolve_all<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut results = Vec::new();
        if self.segments.is_empty() {
            results.push(root);
        } else {
            collect(root, &self.segments, &mut results);
        }
        results
    }
}

fn match_first<'a>(cursor: &'a Value, pattern: &Regex) -> Option<&'a Value> {
    match cursor {
        Value::Map(m) => m
            .iter()
            .find_map(|(key, child)| pattern.is_match(key).then_some(child)),
        Value::Array(a) => a
            .iter()
            .enumerate()
            .find_map(|(index, child)| pattern.is_match(&index.to_string()).then_some(child)),
        _ => None,
    }
}

fn collect<'a>(cursor: &'a Value, segments: &[Regex], results: &mut Vec<&'a Value>) {
    let Some((pattern, rest)) = segments.split_first() else {
        return;
    };

    match cursor {
        Value::Map(m) => {
            for (key, child) in m {
                if pattern.is_match(key) {
                    if rest.is_empty() {
                        results.push(child);
                    } else {
                        collect(child, rest, results);
                    }
                }
            }
        }
        Value::Array(a) => {
            for (index, child) in a.iter().enumerate() {
                if pattern.is_match(&index.to_string()) {
                    if rest.is_empty() {
                        results.push(child);
                    } else {
                        collect(child, rest, results);
                    }
                }
            }
        }
        _ => (),
    }
}
