use crate::Value;

/// Hierarchical view over the scenario runner's configuration parameters.
///
/// Loaded once per scenario; lookups are `/`-delimited and each segment is
/// matched by exact key, never by regex.
#[derive(Debug)]
pub struct ConfigStore {
    parameters: Value,
}

impl ConfigStore {
    pub fn new(parameters: Value) -> Self {
        Self { parameters }
    }

    /// An empty store, for scenarios that take no parameters.
    pub fn empty() -> Self {
        Self {
            parameters: Value::Map(Vec::new()),
        }
    }

    /// Resolves a `/`-delimited parameter path.
    /// # Return
    /// The configured value, or `None` if any segment is absent.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut cursor = &self.parameters;

        for segment in path.split('/') {
            cursor = cursor.get_child(segment)?;
        }

        Some(cursor)
    }
}
