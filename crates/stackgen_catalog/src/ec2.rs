//! Typed constructors for EC2 resource kinds.
//!
//! Each constructor is a small builder that lowers into a plain
//! [`Resource`] with the engine's type tag and property names. Enumerated
//! fields are validated here, at construction time; everything else is
//! carried opaquely for the provisioning engine to check.

use indexmap::IndexMap;

use stackgen_template::{Resource, Value};

use crate::error::{CatalogError, CatalogResult};

/// Action taken by a network ACL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleAction {
    Allow,
    Deny,
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAction::Allow => "allow",
            RuleAction::Deny => "deny",
        }
    }

    pub fn parse(s: &str) -> CatalogResult<Self> {
        match s {
            "allow" => Ok(RuleAction::Allow),
            "deny" => Ok(RuleAction::Deny),
            other => Err(CatalogError::invalid_field(
                "NetworkAclEntry",
                "RuleAction",
                format!("expected allow or deny, got {other}"),
            )),
        }
    }
}

impl std::fmt::Display for RuleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// IP protocol of a security group rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpProtocol {
    Tcp,
    Udp,
    Icmp,
    Icmpv6,
    /// Any protocol, emitted as `-1`.
    All,
}

impl IpProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpProtocol::Tcp => "tcp",
            IpProtocol::Udp => "udp",
            IpProtocol::Icmp => "icmp",
            IpProtocol::Icmpv6 => "icmpv6",
            IpProtocol::All => "-1",
        }
    }

    pub fn parse(s: &str) -> CatalogResult<Self> {
        match s {
            "tcp" => Ok(IpProtocol::Tcp),
            "udp" => Ok(IpProtocol::Udp),
            "icmp" => Ok(IpProtocol::Icmp),
            "icmpv6" => Ok(IpProtocol::Icmpv6),
            "-1" => Ok(IpProtocol::All),
            other => Err(CatalogError::invalid_field(
                "SecurityGroupRule",
                "IpProtocol",
                format!("unknown protocol {other}"),
            )),
        }
    }
}

impl std::fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Address domain of an elastic IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EipDomain {
    Vpc,
    Standard,
}

impl EipDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            EipDomain::Vpc => "vpc",
            EipDomain::Standard => "standard",
        }
    }

    pub fn parse(s: &str) -> CatalogResult<Self> {
        match s {
            "vpc" => Ok(EipDomain::Vpc),
            "standard" => Ok(EipDomain::Standard),
            other => Err(CatalogError::invalid_field(
                "Eip",
                "Domain",
                format!("expected vpc or standard, got {other}"),
            )),
        }
    }
}

/// A virtual private cloud.
#[derive(Debug, Clone)]
pub struct Vpc {
    logical_id: String,
    cidr_block: String,
    tags: Vec<(String, Value)>,
}

impl Vpc {
    pub fn new(logical_id: impl Into<String>, cidr_block: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            cidr_block: cidr_block.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl From<Vpc> for Resource {
    fn from(vpc: Vpc) -> Self {
        let mut resource = Resource::new(vpc.logical_id, "AWS::EC2::VPC")
            .with_property("CidrBlock", vpc.cidr_block);
        for (key, value) in vpc.tags {
            resource = resource.with_tag(key, value);
        }
        resource
    }
}

/// A subnet inside a VPC.
#[derive(Debug, Clone)]
pub struct Subnet {
    logical_id: String,
    cidr_block: String,
    vpc_id: Value,
    tags: Vec<(String, Value)>,
}

impl Subnet {
    pub fn new(
        logical_id: impl Into<String>,
        cidr_block: impl Into<String>,
        vpc_id: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            cidr_block: cidr_block.into(),
            vpc_id: vpc_id.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl From<Subnet> for Resource {
    fn from(subnet: Subnet) -> Self {
        let mut resource = Resource::new(subnet.logical_id, "AWS::EC2::Subnet")
            .with_property("CidrBlock", subnet.cidr_block)
            .with_property("VpcId", subnet.vpc_id);
        for (key, value) in subnet.tags {
            resource = resource.with_tag(key, value);
        }
        resource
    }
}

/// An internet gateway.
#[derive(Debug, Clone)]
pub struct InternetGateway {
    logical_id: String,
    tags: Vec<(String, Value)>,
}

impl InternetGateway {
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl From<InternetGateway> for Resource {
    fn from(gateway: InternetGateway) -> Self {
        let mut resource = Resource::new(gateway.logical_id, "AWS::EC2::InternetGateway");
        for (key, value) in gateway.tags {
            resource = resource.with_tag(key, value);
        }
        resource
    }
}

/// Attachment of an internet gateway to a VPC.
#[derive(Debug, Clone)]
pub struct VpcGatewayAttachment {
    logical_id: String,
    vpc_id: Value,
    internet_gateway_id: Value,
}

impl VpcGatewayAttachment {
    pub fn new(
        logical_id: impl Into<String>,
        vpc_id: impl Into<Value>,
        internet_gateway_id: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            vpc_id: vpc_id.into(),
            internet_gateway_id: internet_gateway_id.into(),
        }
    }
}

impl From<VpcGatewayAttachment> for Resource {
    fn from(attachment: VpcGatewayAttachment) -> Self {
        Resource::new(attachment.logical_id, "AWS::EC2::VPCGatewayAttachment")
            .with_property("VpcId", attachment.vpc_id)
            .with_property("InternetGatewayId", attachment.internet_gateway_id)
    }
}

/// A route table inside a VPC.
#[derive(Debug, Clone)]
pub struct RouteTable {
    logical_id: String,
    vpc_id: Value,
    tags: Vec<(String, Value)>,
}

impl RouteTable {
    pub fn new(logical_id: impl Into<String>, vpc_id: impl Into<Value>) -> Self {
        Self {
            logical_id: logical_id.into(),
            vpc_id: vpc_id.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl From<RouteTable> for Resource {
    fn from(table: RouteTable) -> Self {
        let mut resource = Resource::new(table.logical_id, "AWS::EC2::RouteTable")
            .with_property("VpcId", table.vpc_id);
        for (key, value) in table.tags {
            resource = resource.with_tag(key, value);
        }
        resource
    }
}

/// A route entry pointing a destination range at a gateway.
#[derive(Debug, Clone)]
pub struct Route {
    logical_id: String,
    route_table_id: Value,
    destination_cidr_block: String,
    gateway_id: Value,
    depends_on: Vec<String>,
}

impl Route {
    pub fn new(
        logical_id: impl Into<String>,
        route_table_id: impl Into<Value>,
        destination_cidr_block: impl Into<String>,
        gateway_id: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            route_table_id: route_table_id.into(),
            destination_cidr_block: destination_cidr_block.into(),
            gateway_id: gateway_id.into(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_depends_on(mut self, target: impl Into<String>) -> Self {
        self.depends_on.push(target.into());
        self
    }
}

impl From<Route> for Resource {
    fn from(route: Route) -> Self {
        let mut resource = Resource::new(route.logical_id, "AWS::EC2::Route")
            .with_property("DestinationCidrBlock", route.destination_cidr_block)
            .with_property("GatewayId", route.gateway_id)
            .with_property("RouteTableId", route.route_table_id);
        for target in route.depends_on {
            resource = resource.with_depends_on(target);
        }
        resource
    }
}

/// Association of a subnet with a route table.
#[derive(Debug, Clone)]
pub struct SubnetRouteTableAssociation {
    logical_id: String,
    subnet_id: Value,
    route_table_id: Value,
}

impl SubnetRouteTableAssociation {
    pub fn new(
        logical_id: impl Into<String>,
        subnet_id: impl Into<Value>,
        route_table_id: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            subnet_id: subnet_id.into(),
            route_table_id: route_table_id.into(),
        }
    }
}

impl From<SubnetRouteTableAssociation> for Resource {
    fn from(assoc: SubnetRouteTableAssociation) -> Self {
        Resource::new(assoc.logical_id, "AWS::EC2::SubnetRouteTableAssociation")
            .with_property("SubnetId", assoc.subnet_id)
            .with_property("RouteTableId", assoc.route_table_id)
    }
}

/// A network ACL attached to a VPC.
#[derive(Debug, Clone)]
pub struct NetworkAcl {
    logical_id: String,
    vpc_id: Value,
    tags: Vec<(String, Value)>,
}

impl NetworkAcl {
    pub fn new(logical_id: impl Into<String>, vpc_id: impl Into<Value>) -> Self {
        Self {
            logical_id: logical_id.into(),
            vpc_id: vpc_id.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl From<NetworkAcl> for Resource {
    fn from(acl: NetworkAcl) -> Self {
        let mut resource = Resource::new(acl.logical_id, "AWS::EC2::NetworkAcl")
            .with_property("VpcId", acl.vpc_id);
        for (key, value) in acl.tags {
            resource = resource.with_tag(key, value);
        }
        resource
    }
}

/// Inclusive port range of a network ACL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub from: i64,
    pub to: i64,
}

impl PortRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Single-port range.
    pub fn single(port: i64) -> Self {
        Self::new(port, port)
    }

    fn to_value(self) -> Value {
        let mut map = IndexMap::new();
        map.insert("From".to_string(), Value::Int(self.from));
        map.insert("To".to_string(), Value::Int(self.to));
        Value::Map(map)
    }
}

/// One numbered allow/deny rule in a network ACL.
#[derive(Debug, Clone)]
pub struct NetworkAclEntry {
    logical_id: String,
    network_acl_id: Value,
    rule_number: i64,
    protocol: i64,
    port_range: PortRange,
    egress: bool,
    rule_action: RuleAction,
    cidr_block: String,
}

impl NetworkAclEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        logical_id: impl Into<String>,
        network_acl_id: impl Into<Value>,
        rule_number: i64,
        protocol: i64,
        port_range: PortRange,
        egress: bool,
        rule_action: RuleAction,
        cidr_block: impl Into<String>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            network_acl_id: network_acl_id.into(),
            rule_number,
            protocol,
            port_range,
            egress,
            rule_action,
            cidr_block: cidr_block.into(),
        }
    }
}

impl From<NetworkAclEntry> for Resource {
    fn from(entry: NetworkAclEntry) -> Self {
        Resource::new(entry.logical_id, "AWS::EC2::NetworkAclEntry")
            .with_property("NetworkAclId", entry.network_acl_id)
            .with_property("RuleNumber", entry.rule_number)
            .with_property("Protocol", entry.protocol)
            .with_property("PortRange", entry.port_range.to_value())
            .with_property("Egress", entry.egress)
            .with_property("RuleAction", entry.rule_action.as_str())
            .with_property("CidrBlock", entry.cidr_block)
    }
}

/// Association of a subnet with a network ACL.
#[derive(Debug, Clone)]
pub struct SubnetNetworkAclAssociation {
    logical_id: String,
    subnet_id: Value,
    network_acl_id: Value,
}

impl SubnetNetworkAclAssociation {
    pub fn new(
        logical_id: impl Into<String>,
        subnet_id: impl Into<Value>,
        network_acl_id: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            subnet_id: subnet_id.into(),
            network_acl_id: network_acl_id.into(),
        }
    }
}

impl From<SubnetNetworkAclAssociation> for Resource {
    fn from(assoc: SubnetNetworkAclAssociation) -> Self {
        Resource::new(assoc.logical_id, "AWS::EC2::SubnetNetworkAclAssociation")
            .with_property("SubnetId", assoc.subnet_id)
            .with_property("NetworkAclId", assoc.network_acl_id)
    }
}

/// One ingress or egress rule of a security group.
#[derive(Debug, Clone)]
pub struct SecurityGroupRule {
    ip_protocol: IpProtocol,
    from_port: i64,
    to_port: i64,
    cidr_ip: Value,
}

impl SecurityGroupRule {
    pub fn new(
        ip_protocol: IpProtocol,
        from_port: i64,
        to_port: i64,
        cidr_ip: impl Into<Value>,
    ) -> Self {
        Self {
            ip_protocol,
            from_port,
            to_port,
            cidr_ip: cidr_ip.into(),
        }
    }

    fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        map.insert(
            "IpProtocol".to_string(),
            Value::from(self.ip_protocol.as_str()),
        );
        map.insert("FromPort".to_string(), Value::Int(self.from_port));
        map.insert("ToPort".to_string(), Value::Int(self.to_port));
        map.insert("CidrIp".to_string(), self.cidr_ip.clone());
        Value::Map(map)
    }
}

/// A security group with ordered ingress rules.
#[derive(Debug, Clone)]
pub struct SecurityGroup {
    logical_id: String,
    group_description: String,
    vpc_id: Value,
    ingress: Vec<SecurityGroupRule>,
}

impl SecurityGroup {
    pub fn new(
        logical_id: impl Into<String>,
        group_description: impl Into<String>,
        vpc_id: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            group_description: group_description.into(),
            vpc_id: vpc_id.into(),
            ingress: Vec::new(),
        }
    }

    /// Append an ingress rule. Rule order is preserved in the output.
    pub fn with_ingress(mut self, rule: SecurityGroupRule) -> Self {
        self.ingress.push(rule);
        self
    }
}

impl From<SecurityGroup> for Resource {
    fn from(group: SecurityGroup) -> Self {
        let rules: Vec<Value> = group.ingress.iter().map(SecurityGroupRule::to_value).collect();
        Resource::new(group.logical_id, "AWS::EC2::SecurityGroup")
            .with_property("GroupDescription", group.group_description)
            .with_property("SecurityGroupIngress", rules)
            .with_property("VpcId", group.vpc_id)
    }
}

/// A network interface attached to an instance at launch.
#[derive(Debug, Clone)]
pub struct NetworkInterface {
    device_index: i64,
    subnet_id: Value,
    group_set: Vec<Value>,
    associate_public_ip_address: bool,
    delete_on_termination: bool,
}

impl NetworkInterface {
    pub fn new(device_index: i64, subnet_id: impl Into<Value>) -> Self {
        Self {
            device_index,
            subnet_id: subnet_id.into(),
            group_set: Vec::new(),
            associate_public_ip_address: false,
            delete_on_termination: true,
        }
    }

    pub fn with_group(mut self, group: impl Into<Value>) -> Self {
        self.group_set.push(group.into());
        self
    }

    pub fn with_public_ip(mut self, associate: bool) -> Self {
        self.associate_public_ip_address = associate;
        self
    }

    pub fn with_delete_on_termination(mut self, delete: bool) -> Self {
        self.delete_on_termination = delete;
        self
    }

    fn to_value(&self) -> Value {
        let mut map = IndexMap::new();
        if !self.group_set.is_empty() {
            map.insert("GroupSet".to_string(), Value::List(self.group_set.clone()));
        }
        map.insert(
            "AssociatePublicIpAddress".to_string(),
            Value::Bool(self.associate_public_ip_address),
        );
        // The engine types DeviceIndex as a string.
        map.insert(
            "DeviceIndex".to_string(),
            Value::String(self.device_index.to_string()),
        );
        map.insert(
            "DeleteOnTermination".to_string(),
            Value::Bool(self.delete_on_termination),
        );
        map.insert("SubnetId".to_string(), self.subnet_id.clone());
        Value::Map(map)
    }
}

/// A compute instance.
#[derive(Debug, Clone)]
pub struct Instance {
    logical_id: String,
    image_id: Value,
    instance_type: Value,
    key_name: Option<Value>,
    iam_instance_profile: Option<Value>,
    network_interfaces: Vec<NetworkInterface>,
    user_data: Option<Value>,
    tags: Vec<(String, Value)>,
}

impl Instance {
    pub fn new(
        logical_id: impl Into<String>,
        image_id: impl Into<Value>,
        instance_type: impl Into<Value>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            image_id: image_id.into(),
            instance_type: instance_type.into(),
            key_name: None,
            iam_instance_profile: None,
            network_interfaces: Vec::new(),
            user_data: None,
            tags: Vec::new(),
        }
    }

    pub fn with_key_name(mut self, key_name: impl Into<Value>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    pub fn with_iam_instance_profile(mut self, profile: impl Into<Value>) -> Self {
        self.iam_instance_profile = Some(profile.into());
        self
    }

    pub fn with_network_interface(mut self, interface: NetworkInterface) -> Self {
        self.network_interfaces.push(interface);
        self
    }

    /// Attach the boot-time provisioning payload, carried uninterpreted.
    pub fn with_user_data(mut self, user_data: impl Into<Value>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }
}

impl From<Instance> for Resource {
    fn from(instance: Instance) -> Self {
        let mut resource = Resource::new(instance.logical_id, "AWS::EC2::Instance");
        if let Some(profile) = instance.iam_instance_profile {
            resource = resource.with_property("IamInstanceProfile", profile);
        }
        resource = resource
            .with_property("ImageId", instance.image_id)
            .with_property("InstanceType", instance.instance_type);
        if let Some(key_name) = instance.key_name {
            resource = resource.with_property("KeyName", key_name);
        }
        if !instance.network_interfaces.is_empty() {
            let interfaces: Vec<Value> = instance
                .network_interfaces
                .iter()
                .map(NetworkInterface::to_value)
                .collect();
            resource = resource.with_property("NetworkInterfaces", interfaces);
        }
        if let Some(user_data) = instance.user_data {
            resource = resource.with_property("UserData", user_data);
        }
        for (key, value) in instance.tags {
            resource = resource.with_tag(key, value);
        }
        resource
    }
}

/// An elastic IP address.
#[derive(Debug, Clone)]
pub struct Eip {
    logical_id: String,
    domain: Option<EipDomain>,
    instance_id: Option<Value>,
    depends_on: Vec<String>,
}

impl Eip {
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            domain: None,
            instance_id: None,
            depends_on: Vec::new(),
        }
    }

    pub fn with_domain(mut self, domain: EipDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_instance(mut self, instance_id: impl Into<Value>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    pub fn with_depends_on(mut self, target: impl Into<String>) -> Self {
        self.depends_on.push(target.into());
        self
    }
}

impl From<Eip> for Resource {
    fn from(eip: Eip) -> Self {
        let mut resource = Resource::new(eip.logical_id, "AWS::EC2::EIP");
        if let Some(domain) = eip.domain {
            resource = resource.with_property("Domain", domain.as_str());
        }
        if let Some(instance_id) = eip.instance_id {
            resource = resource.with_property("InstanceId", instance_id);
        }
        for target in eip.depends_on {
            resource = resource.with_depends_on(target);
        }
        resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_action_parse() {
        assert_eq!(RuleAction::parse("allow").unwrap(), RuleAction::Allow);
        assert_eq!(RuleAction::parse("deny").unwrap(), RuleAction::Deny);
        assert!(matches!(
            RuleAction::parse("permit"),
            Err(CatalogError::InvalidField { field, .. }) if field == "RuleAction"
        ));
    }

    #[test]
    fn test_ip_protocol_parse() {
        assert_eq!(IpProtocol::parse("tcp").unwrap(), IpProtocol::Tcp);
        assert_eq!(IpProtocol::parse("-1").unwrap(), IpProtocol::All);
        assert!(IpProtocol::parse("gre").is_err());
    }

    #[test]
    fn test_vpc_lowering() {
        let resource: Resource = Vpc::new("VPC", "10.0.0.0/16")
            .with_tag("Application", Value::reference("AWS::StackId"))
            .into();
        assert_eq!(resource.resource_type(), "AWS::EC2::VPC");
        assert_eq!(
            serde_json::to_value(&resource).unwrap()["Properties"]["CidrBlock"],
            "10.0.0.0/16"
        );
    }

    #[test]
    fn test_network_acl_entry_lowering() {
        let resource: Resource = NetworkAclEntry::new(
            "InboundSSH",
            Value::reference("NetworkAcl"),
            101,
            6,
            PortRange::single(22),
            false,
            RuleAction::Allow,
            "0.0.0.0/0",
        )
        .into();

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["Properties"]["RuleNumber"], 101);
        assert_eq!(value["Properties"]["PortRange"], json!({"From": 22, "To": 22}));
        assert_eq!(value["Properties"]["Egress"], false);
        assert_eq!(value["Properties"]["RuleAction"], "allow");
    }

    #[test]
    fn test_security_group_rule_order_preserved() {
        let resource: Resource = SecurityGroup::new("Group", "SSH and HTTP", Value::reference("VPC"))
            .with_ingress(SecurityGroupRule::new(IpProtocol::Tcp, 22, 22, "0.0.0.0/0"))
            .with_ingress(SecurityGroupRule::new(IpProtocol::Tcp, 80, 80, "0.0.0.0/0"))
            .into();

        let value = serde_json::to_value(&resource).unwrap();
        let rules = value["Properties"]["SecurityGroupIngress"].as_array().unwrap();
        assert_eq!(rules[0]["FromPort"], 22);
        assert_eq!(rules[1]["FromPort"], 80);
    }

    #[test]
    fn test_instance_lowering() {
        let resource: Resource = Instance::new(
            "Box",
            Value::find_in_map("Region2AMI", "us-east-1", "HVM64"),
            Value::reference("InstanceType"),
        )
        .with_key_name(Value::reference("KeyName"))
        .with_network_interface(
            NetworkInterface::new(0, Value::reference("Subnet"))
                .with_group(Value::reference("Group"))
                .with_public_ip(true),
        )
        .into();

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["Type"], "AWS::EC2::Instance");
        let nic = &value["Properties"]["NetworkInterfaces"][0];
        assert_eq!(nic["DeviceIndex"], "0");
        assert_eq!(nic["AssociatePublicIpAddress"], true);
        assert_eq!(nic["SubnetId"], json!({"Ref": "Subnet"}));
    }

    #[test]
    fn test_eip_depends_on() {
        let resource: Resource = Eip::new("IPAddress")
            .with_domain(EipDomain::Vpc)
            .with_instance(Value::reference("Box"))
            .with_depends_on("AttachGateway")
            .into();

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["Properties"]["Domain"], "vpc");
        assert_eq!(value["DependsOn"], "AttachGateway");
    }
}
