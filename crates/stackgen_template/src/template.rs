//! The template document and its builder operations.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::mapping::Mapping;
use crate::output::Output;
use crate::parameter::Parameter;
use crate::resource::Resource;
use crate::value::{PseudoParam, Value};

/// Handle to an entry added to a template.
///
/// Returned by the `add_*` operations so later entries can build references
/// to earlier ones without stringly-typed repetition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a direct reference to this entry.
    pub fn reference(&self) -> Value {
        Value::Ref(self.0.clone())
    }

    /// Build an attribute lookup on this entry.
    pub fn get_att(&self, attribute: impl Into<String>) -> Value {
        Value::get_att(self.0.clone(), attribute)
    }
}

impl std::fmt::Display for LogicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The root document: format version, description, and the four
/// insertion-ordered entry sections.
///
/// Logical names are unique across the whole document; re-adding a name
/// fails with [`TemplateError::DuplicateName`] rather than overwriting.
/// The template is built once, serialized, and discarded; it owns its
/// entries exclusively and entries point at each other only by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    version: Option<String>,
    description: Option<String>,
    parameters: IndexMap<String, Parameter>,
    mappings: IndexMap<String, Mapping>,
    resources: IndexMap<String, Resource>,
    outputs: IndexMap<String, Output>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template format version. Last write wins.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    /// Set the template description. Last write wins.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Add a parameter, returning a handle for building references to it.
    pub fn add_parameter(&mut self, parameter: Parameter) -> TemplateResult<LogicalId> {
        let name = parameter.logical_id().to_string();
        self.claim_name(&name)?;
        debug!("Adding parameter {}", name);
        self.parameters.insert(name.clone(), parameter);
        Ok(LogicalId(name))
    }

    /// Add a named mapping table.
    pub fn add_mapping(&mut self, name: impl Into<String>, mapping: Mapping) -> TemplateResult<LogicalId> {
        let name = name.into();
        self.claim_name(&name)?;
        debug!("Adding mapping {}", name);
        self.mappings.insert(name.clone(), mapping);
        Ok(LogicalId(name))
    }

    /// Add a resource, returning a handle for building references to it.
    pub fn add_resource(&mut self, resource: impl Into<Resource>) -> TemplateResult<LogicalId> {
        let resource = resource.into();
        let name = resource.logical_id().to_string();
        self.claim_name(&name)?;
        debug!("Adding resource {} ({})", name, resource.resource_type());
        self.resources.insert(name.clone(), resource);
        Ok(LogicalId(name))
    }

    /// Add an output value.
    pub fn add_output(&mut self, output: Output) -> TemplateResult<LogicalId> {
        let name = output.logical_id().to_string();
        self.claim_name(&name)?;
        debug!("Adding output {}", name);
        self.outputs.insert(name.clone(), output);
        Ok(LogicalId(name))
    }

    /// Add several outputs at once.
    pub fn add_outputs(
        &mut self,
        outputs: impl IntoIterator<Item = Output>,
    ) -> TemplateResult<Vec<LogicalId>> {
        outputs.into_iter().map(|o| self.add_output(o)).collect()
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn mapping_names(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Check that every reference stored in the document points at an entry
    /// that exists (or at a pseudo parameter).
    ///
    /// References are never resolved here; this only verifies that the
    /// provisioning engine will find a target for each one. Attribute names
    /// in get-att lookups are not checked, attribute schemas belong to the
    /// engine.
    pub fn validate_references(&self) -> TemplateResult<()> {
        for resource in self.resources.values() {
            for target in resource.depends_on() {
                if !self.resources.contains_key(target) {
                    return Err(TemplateError::UnresolvedReference {
                        referrer: resource.logical_id().to_string(),
                        target: target.clone(),
                    });
                }
            }
            for value in resource.properties().values() {
                self.check_value(resource.logical_id(), value)?;
            }
        }
        for output in self.outputs.values() {
            self.check_value(output.logical_id(), output.value())?;
        }
        Ok(())
    }

    fn check_value(&self, referrer: &str, value: &Value) -> TemplateResult<()> {
        match value {
            Value::String(_) | Value::Int(_) | Value::Bool(_) => Ok(()),
            Value::List(items) => {
                for item in items {
                    self.check_value(referrer, item)?;
                }
                Ok(())
            }
            Value::Map(entries) => {
                for entry in entries.values() {
                    self.check_value(referrer, entry)?;
                }
                Ok(())
            }
            Value::Ref(target) => {
                let resolvable = PseudoParam::is_pseudo(target)
                    || self.parameters.contains_key(target)
                    || self.resources.contains_key(target);
                if resolvable {
                    Ok(())
                } else {
                    Err(TemplateError::UnresolvedReference {
                        referrer: referrer.to_string(),
                        target: target.clone(),
                    })
                }
            }
            Value::GetAtt { target, .. } => {
                if self.resources.contains_key(target) {
                    Ok(())
                } else {
                    Err(TemplateError::UnresolvedReference {
                        referrer: referrer.to_string(),
                        target: target.clone(),
                    })
                }
            }
            Value::FindInMap {
                map,
                top_key,
                second_key,
            } => {
                if !self.mappings.contains_key(map) {
                    return Err(TemplateError::UnresolvedReference {
                        referrer: referrer.to_string(),
                        target: map.clone(),
                    });
                }
                self.check_value(referrer, top_key)?;
                self.check_value(referrer, second_key)
            }
            Value::Join { parts, .. } => {
                for part in parts {
                    self.check_value(referrer, part)?;
                }
                Ok(())
            }
            Value::Base64(inner) => self.check_value(referrer, inner),
        }
    }

    /// Serialize the document to a structured JSON value.
    ///
    /// Pure and idempotent; entries appear in insertion order and empty
    /// sections are omitted.
    pub fn serialize(&self) -> TemplateResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> TemplateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact single-line JSON.
    pub fn to_json_compact(&self) -> TemplateResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn claim_name(&self, name: &str) -> TemplateResult<()> {
        let taken = self.parameters.contains_key(name)
            || self.mappings.contains_key(name)
            || self.resources.contains_key(name)
            || self.outputs.contains_key(name);
        if taken {
            Err(TemplateError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(version) = &self.version {
            map.serialize_entry("AWSTemplateFormatVersion", version)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        if !self.parameters.is_empty() {
            map.serialize_entry("Parameters", &self.parameters)?;
        }
        if !self.mappings.is_empty() {
            map.serialize_entry("Mappings", &self.mappings)?;
        }
        if !self.resources.is_empty() {
            map.serialize_entry("Resources", &self.resources)?;
        }
        if !self.outputs.is_empty() {
            map.serialize_entry("Outputs", &self.outputs)?;
        }
        map.end()
    }
}
