//! External input parameters.

use serde::Serialize;

/// A named external input with a declared type and optional constraints.
///
/// Parameters are immutable once added to a template; the constraint fields
/// are carried opaquely for the provisioning engine to enforce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(skip)]
    logical_id: String,
    #[serde(rename = "Type")]
    param_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    allowed_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint_description: Option<String>,
}

impl Parameter {
    /// Create a parameter with the given logical name and declared type.
    pub fn new(logical_id: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            param_type: param_type.into(),
            description: None,
            default: None,
            allowed_values: Vec::new(),
            allowed_pattern: None,
            min_length: None,
            max_length: None,
            constraint_description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict the parameter to an enumerated set of values.
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the parameter to values matching a regular expression.
    pub fn with_allowed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_pattern = Some(pattern.into());
        self
    }

    /// Bound the length of the parameter value.
    pub fn with_length_bounds(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min_length = Some(min.into());
        self.max_length = Some(max.into());
        self
    }

    pub fn with_constraint_description(mut self, text: impl Into<String>) -> Self {
        self.constraint_description = Some(text.into());
        self
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn param_type(&self) -> &str {
        &self.param_type
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_parameter_shape() {
        let param = Parameter::new("KeyName", "AWS::EC2::KeyPair::KeyName");
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({"Type": "AWS::EC2::KeyPair::KeyName"})
        );
    }

    #[test]
    fn test_constrained_parameter_shape() {
        let param = Parameter::new("SSHLocation", "String")
            .with_description("Allowed SSH source range")
            .with_default("0.0.0.0/0")
            .with_length_bounds("9", "18")
            .with_allowed_pattern(r"(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})")
            .with_constraint_description("must be a valid IP CIDR range of the form x.x.x.x/x.");

        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["Default"], "0.0.0.0/0");
        assert_eq!(value["MinLength"], "9");
        assert_eq!(value["MaxLength"], "18");
        assert!(value.get("AllowedValues").is_none());
    }
}
