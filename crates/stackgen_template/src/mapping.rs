//! Static two-level lookup tables.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Value;

/// A named two-level lookup table: outer key, inner key, scalar value.
///
/// Mappings hold static data (region and architecture tables and the like);
/// they are immutable once added and consulted at provisioning time through
/// find-in-map references.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: IndexMap<String, IndexMap<String, Value>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one `(outer, inner) -> value` cell, creating the outer row if absent.
    pub fn set(
        &mut self,
        top_key: impl Into<String>,
        second_key: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.entries
            .entry(top_key.into())
            .or_default()
            .insert(second_key.into(), value.into());
        self
    }

    pub fn get(&self, top_key: &str, second_key: &str) -> Option<&Value> {
        self.entries.get(top_key).and_then(|row| row.get(second_key))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_shape() {
        let mut mapping = Mapping::new();
        mapping.set("us-east-1", "HVM64", "ami-1");
        mapping.set("us-east-1", "PV64", "ami-2");
        mapping.set("eu-west-1", "HVM64", "ami-3");

        assert_eq!(
            serde_json::to_value(&mapping).unwrap(),
            json!({
                "us-east-1": {"HVM64": "ami-1", "PV64": "ami-2"},
                "eu-west-1": {"HVM64": "ami-3"}
            })
        );
    }

    #[test]
    fn test_mapping_lookup() {
        let mut mapping = Mapping::new();
        mapping.set("t1.micro", "Arch", "PV64");
        assert_eq!(mapping.get("t1.micro", "Arch"), Some(&Value::from("PV64")));
        assert_eq!(mapping.get("t1.micro", "Other"), None);
    }
}
