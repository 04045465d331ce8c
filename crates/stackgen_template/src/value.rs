//! Property values and intrinsic references.
//!
//! Every property in the document is one closed [`Value`] union: scalars,
//! lists, nested maps, and the intrinsic-function variants that stand in for
//! values the provisioning engine resolves later. Serialization is a single
//! recursive walk over this type; intrinsics are emitted as the engine's
//! single-key marker objects (`{"Ref": ...}`, `{"Fn::GetAtt": [...]}`, ...).

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::template::LogicalId;

/// Pseudo parameters predefined by the provisioning engine.
///
/// These resolve to properties of the stack being provisioned and are valid
/// reference targets without ever being added to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoParam {
    StackId,
    StackName,
    Region,
}

impl PseudoParam {
    pub fn as_str(&self) -> &'static str {
        match self {
            PseudoParam::StackId => "AWS::StackId",
            PseudoParam::StackName => "AWS::StackName",
            PseudoParam::Region => "AWS::Region",
        }
    }

    /// Whether `name` is one of the engine-defined pseudo parameters.
    pub fn is_pseudo(name: &str) -> bool {
        matches!(name, "AWS::StackId" | "AWS::StackName" | "AWS::Region")
    }

    /// Build a reference to this pseudo parameter.
    pub fn reference(self) -> Value {
        Value::Ref(self.as_str().to_string())
    }
}

impl std::fmt::Display for PseudoParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property value: scalar, list, map, or unresolved intrinsic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    /// Direct reference to a logical name or pseudo parameter.
    Ref(String),
    /// Attribute lookup on a resource, resolved at provisioning time.
    GetAtt { target: String, attribute: String },
    /// Two-level mapping lookup; the keys may themselves be intrinsics.
    FindInMap {
        map: String,
        top_key: Box<Value>,
        second_key: Box<Value>,
    },
    /// Concatenation of literals and references with a delimiter.
    Join { delimiter: String, parts: Vec<Value> },
    /// Base64 encoding applied by the provisioning engine.
    Base64(Box<Value>),
}

impl Value {
    /// Reference to a document entry by logical name.
    pub fn reference(target: impl Into<String>) -> Self {
        Value::Ref(target.into())
    }

    /// Attribute lookup on a resource.
    pub fn get_att(target: impl Into<String>, attribute: impl Into<String>) -> Self {
        Value::GetAtt {
            target: target.into(),
            attribute: attribute.into(),
        }
    }

    /// Two-level lookup into a named mapping.
    pub fn find_in_map(
        map: impl Into<String>,
        top_key: impl Into<Value>,
        second_key: impl Into<Value>,
    ) -> Self {
        Value::FindInMap {
            map: map.into(),
            top_key: Box::new(top_key.into()),
            second_key: Box::new(second_key.into()),
        }
    }

    /// Join a list of parts with a delimiter.
    pub fn join(delimiter: impl Into<String>, parts: Vec<Value>) -> Self {
        Value::Join {
            delimiter: delimiter.into(),
            parts,
        }
    }

    /// Defer base64 encoding of a value to the provisioning engine.
    pub fn base64(value: impl Into<Value>) -> Self {
        Value::Base64(Box::new(value.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Value::List(items) = self {
            Some(items)
        } else {
            None
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<&LogicalId> for Value {
    fn from(id: &LogicalId) -> Self {
        Value::Ref(id.as_str().to_string())
    }
}

impl From<PseudoParam> for Value {
    fn from(p: PseudoParam) -> Self {
        p.reference()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Ref(target) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", target)?;
                map.end()
            }
            Value::GetAtt { target, attribute } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[target.as_str(), attribute.as_str()])?;
                map.end()
            }
            Value::FindInMap {
                map: map_name,
                top_key,
                second_key,
            } => {
                let args = (
                    Value::String(map_name.clone()),
                    top_key.as_ref(),
                    second_key.as_ref(),
                );
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::FindInMap", &args)?;
                map.end()
            }
            Value::Join { delimiter, parts } => {
                let args = (Value::String(delimiter.clone()), parts);
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &args)?;
                map.end()
            }
            Value::Base64(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Base64", value.as_ref())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_marker_shape() {
        let value = Value::reference("VPC");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"Ref": "VPC"}));
    }

    #[test]
    fn test_get_att_marker_shape() {
        let value = Value::get_att("WebServerInstance", "PublicIp");
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::GetAtt": ["WebServerInstance", "PublicIp"]})
        );
    }

    #[test]
    fn test_find_in_map_with_nested_ref() {
        let value = Value::find_in_map(
            "Region2AMI",
            PseudoParam::Region.reference(),
            Value::from("HVM64"),
        );
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::FindInMap": ["Region2AMI", {"Ref": "AWS::Region"}, "HVM64"]})
        );
    }

    #[test]
    fn test_join_marker_shape() {
        let value = Value::join("-", vec![Value::from("IP"), Value::reference("Address")]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::Join": ["-", ["IP", {"Ref": "Address"}]]})
        );
    }

    #[test]
    fn test_base64_wraps_join() {
        let value = Value::base64(Value::join("", vec![Value::from("#!/bin/bash\n")]));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::Base64": {"Fn::Join": ["", ["#!/bin/bash\n"]]}})
        );
    }

    #[test]
    fn test_pseudo_param_names() {
        assert_eq!(PseudoParam::StackId.as_str(), "AWS::StackId");
        assert_eq!(PseudoParam::Region.as_str(), "AWS::Region");
        assert_eq!(PseudoParam::StackName.as_str(), "AWS::StackName");
        assert!(PseudoParam::is_pseudo("AWS::Region"));
        assert!(!PseudoParam::is_pseudo("VPC"));
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let mut entries = IndexMap::new();
        entries.insert("Zeta".to_string(), Value::from(1));
        entries.insert("Alpha".to_string(), Value::from(2));
        let serialized = serde_json::to_string(&Value::Map(entries)).unwrap();
        assert!(serialized.find("Zeta").unwrap() < serialized.find("Alpha").unwrap());
    }
}
