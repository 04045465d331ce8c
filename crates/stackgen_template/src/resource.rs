//! Declarative infrastructure resources.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// One declarative piece of infrastructure: a type tag plus a property bag.
///
/// Properties hold [`Value`]s, so a resource may point at other entries
/// through intrinsic references without holding live links to them. A
/// resource may also declare explicit ordering dependencies on other
/// resources through `DependsOn`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    logical_id: String,
    resource_type: String,
    properties: IndexMap<String, Value>,
    depends_on: Vec<String>,
}

impl Resource {
    /// Create a resource with the given logical name and type tag.
    pub fn new(logical_id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            resource_type: resource_type.into(),
            properties: IndexMap::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Declare that this resource must be provisioned after `target`.
    pub fn with_depends_on(mut self, target: impl Into<String>) -> Self {
        self.depends_on.push(target.into());
        self
    }

    /// Append a `{Key, Value}` pair to the `Tags` list property.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut tag = IndexMap::new();
        tag.insert("Key".to_string(), Value::String(key.into()));
        tag.insert("Value".to_string(), value.into());

        match self.properties.entry("Tags".to_string()).or_insert_with(|| Value::List(Vec::new())) {
            Value::List(tags) => tags.push(Value::Map(tag)),
            other => *other = Value::List(vec![Value::Map(tag)]),
        }
        self
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries = 1;
        if !self.properties.is_empty() {
            entries += 1;
        }
        if !self.depends_on.is_empty() {
            entries += 1;
        }

        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("Type", &self.resource_type)?;
        if !self.properties.is_empty() {
            map.serialize_entry("Properties", &self.properties)?;
        }
        // A single dependency is emitted as a bare string, several as a list.
        match self.depends_on.as_slice() {
            [] => {}
            [single] => map.serialize_entry("DependsOn", single)?,
            many => map.serialize_entry("DependsOn", many)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_shape() {
        let resource = Resource::new("VPC", "AWS::EC2::VPC")
            .with_property("CidrBlock", "10.0.0.0/16");
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"Type": "AWS::EC2::VPC", "Properties": {"CidrBlock": "10.0.0.0/16"}})
        );
    }

    #[test]
    fn test_single_depends_on_is_a_bare_string() {
        let resource = Resource::new("Route", "AWS::EC2::Route").with_depends_on("AttachGateway");
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"Type": "AWS::EC2::Route", "DependsOn": "AttachGateway"})
        );
    }

    #[test]
    fn test_multiple_depends_on_is_a_list() {
        let resource = Resource::new("Box", "Compute::Instance")
            .with_depends_on("First")
            .with_depends_on("Second");
        assert_eq!(
            serde_json::to_value(&resource).unwrap()["DependsOn"],
            json!(["First", "Second"])
        );
    }

    #[test]
    fn test_tags_accumulate_in_order() {
        let resource = Resource::new("VPC", "AWS::EC2::VPC")
            .with_tag("Application", Value::reference("AWS::StackId"))
            .with_tag("Name", "primary");
        assert_eq!(
            serde_json::to_value(&resource).unwrap()["Properties"]["Tags"],
            json!([
                {"Key": "Application", "Value": {"Ref": "AWS::StackId"}},
                {"Key": "Name", "Value": "primary"}
            ])
        );
    }
}
