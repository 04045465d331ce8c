//! Exported output values.

use serde::Serialize;

use crate::value::Value;

/// A named, described export value computed through the same value model
/// as resource properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(skip)]
    logical_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    value: Value,
}

impl Output {
    pub fn new(logical_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            logical_id: logical_id.into(),
            description: None,
            value: value.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_shape() {
        let output = Output::new(
            "URL",
            Value::join("-", vec![Value::from("IP"), Value::get_att("Box", "PublicIp")]),
        )
        .with_description("Control instance IP");

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "Description": "Control instance IP",
                "Value": {"Fn::Join": ["-", ["IP", {"Fn::GetAtt": ["Box", "PublicIp"]}]]}
            })
        );
    }
}
