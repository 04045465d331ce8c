//! Typed constructors for IAM resource kinds and policy documents.
//!
//! Policy documents are plain data lowered into the template's value model;
//! no policy semantics are interpreted here.

use indexmap::IndexMap;

use stackgen_template::{Resource, Value};

/// Effect of a policy statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
        }
    }
}

/// Format a `service:action` pair. A wildcard service stands alone.
pub fn action(service: &str, name: &str) -> String {
    if service == "*" {
        "*".to_string()
    } else {
        format!("{service}:{name}")
    }
}

/// One statement of a policy document.
#[derive(Debug, Clone)]
pub struct Statement {
    effect: Effect,
    actions: Vec<String>,
    resources: Vec<String>,
    principal: Option<(String, Value)>,
}

impl Statement {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            actions: Vec::new(),
            resources: Vec::new(),
            principal: None,
        }
    }

    pub fn allow() -> Self {
        Self::new(Effect::Allow)
    }

    pub fn deny() -> Self {
        Self::new(Effect::Deny)
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Set the principal, e.g. `("Service", "ec2.amazonaws.com")`.
    pub fn with_principal(mut self, kind: impl Into<String>, value: impl Into<Value>) -> Self {
        self.principal = Some((kind.into(), value.into()));
        self
    }

    fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        map.insert(
            "Effect".to_string(),
            Value::from(self.effect.as_str()),
        );
        map.insert(
            "Action".to_string(),
            Value::List(self.actions.iter().map(|a| Value::from(a.clone())).collect()),
        );
        if !self.resources.is_empty() {
            map.insert(
                "Resource".to_string(),
                Value::List(self.resources.iter().map(|r| Value::from(r.clone())).collect()),
            );
        }
        if let Some((kind, value)) = &self.principal {
            let mut principal = IndexMap::new();
            principal.insert(kind.clone(), value.clone());
            map.insert("Principal".to_string(), Value::Map(principal));
        }
        Value::Map(map)
    }
}

/// An identity policy document: optional version and id plus statements.
#[derive(Debug, Clone, Default)]
pub struct PolicyDocument {
    version: Option<String>,
    id: Option<String>,
    statements: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        if let Some(id) = &self.id {
            map.insert("Id".to_string(), Value::from(id.clone()));
        }
        if let Some(version) = &self.version {
            map.insert("Version".to_string(), Value::from(version.clone()));
        }
        map.insert(
            "Statement".to_string(),
            Value::List(self.statements.iter().map(Statement::to_value).collect()),
        );
        Value::Map(map)
    }
}

/// A named inline policy attached to a role.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    policy_name: String,
    policy_document: PolicyDocument,
}

impl RolePolicy {
    pub fn new(policy_name: impl Into<String>, policy_document: PolicyDocument) -> Self {
        Self {
            policy_name: policy_name.into(),
            policy_document,
        }
    }

    fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        map.insert(
            "PolicyName".to_string(),
            Value::from(self.policy_name.clone()),
        );
        map.insert(
            "PolicyDocument".to_string(),
            self.policy_document.to_value(),
        );
        Value::Map(map)
    }
}

/// An IAM role with an assume-role trust document and inline policies.
#[derive(Debug, Clone)]
pub struct Role {
    logical_id: String,
    assume_role_policy_document: PolicyDocument,
    policies: Vec<RolePolicy>,
}

impl Role {
    pub fn new(logical_id: impl Into<String>, assume_role_policy_document: PolicyDocument) -> Self {
        Self {
            logical_id: logical_id.into(),
            assume_role_policy_document,
            policies: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: RolePolicy) -> Self {
        self.policies.push(policy);
        self
    }
}

impl From<Role> for Resource {
    fn from(role: Role) -> Self {
        let mut resource = Resource::new(role.logical_id, "AWS::IAM::Role").with_property(
            "AssumeRolePolicyDocument",
            role.assume_role_policy_document.to_value(),
        );
        if !role.policies.is_empty() {
            let policies: Vec<Value> = role.policies.iter().map(RolePolicy::to_value).collect();
            resource = resource.with_property("Policies", policies);
        }
        resource
    }
}

/// An instance profile wrapping one or more roles.
#[derive(Debug, Clone)]
pub struct InstanceProfile {
    logical_id: String,
    roles: Vec<Value>,
}

impl InstanceProfile {
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<Value>) -> Self {
        self.roles.push(role.into());
        self
    }
}

impl From<InstanceProfile> for Resource {
    fn from(profile: InstanceProfile) -> Self {
        Resource::new(profile.logical_id, "AWS::IAM::InstanceProfile")
            .with_property("Roles", profile.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_formatting() {
        assert_eq!(action("sts", "AssumeRole"), "sts:AssumeRole");
        assert_eq!(action("*", ""), "*");
    }

    #[test]
    fn test_assume_role_statement_shape() {
        let doc = PolicyDocument::new().with_statement(
            Statement::allow()
                .with_action(action("sts", "AssumeRole"))
                .with_principal("Service", "ec2.amazonaws.com"),
        );

        assert_eq!(
            serde_json::to_value(doc.to_value()).unwrap(),
            json!({
                "Statement": [{
                    "Effect": "Allow",
                    "Action": ["sts:AssumeRole"],
                    "Principal": {"Service": "ec2.amazonaws.com"}
                }]
            })
        );
    }

    #[test]
    fn test_role_with_inline_policy() {
        let admin = PolicyDocument::new()
            .with_id("admin_role")
            .with_version("2012-10-17")
            .with_statement(Statement::allow().with_action("*").with_resource("*"));

        let resource: Resource = Role::new("CFNRole", PolicyDocument::new())
            .with_policy(RolePolicy::new("admin_role", admin))
            .into();

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["Type"], "AWS::IAM::Role");
        assert_eq!(
            value["Properties"]["Policies"][0]["PolicyName"],
            "admin_role"
        );
        assert_eq!(
            value["Properties"]["Policies"][0]["PolicyDocument"]["Version"],
            "2012-10-17"
        );
    }

    #[test]
    fn test_instance_profile_shape() {
        let resource: Resource = InstanceProfile::new("CFNInstanceProfile")
            .with_role(Value::reference("CFNRole"))
            .into();

        assert_eq!(
            serde_json::to_value(&resource).unwrap()["Properties"]["Roles"],
            json!([{"Ref": "CFNRole"}])
        );
    }
}
