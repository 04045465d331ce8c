//! Integration tests for the resource catalog against the template builder.

use serde_json::json;

use stackgen_catalog::{
    iam, Eip, EipDomain, Instance, InternetGateway, IpProtocol, NetworkAcl, NetworkAclEntry,
    NetworkInterface, PolicyDocument, PortRange, Role, RolePolicy, Route, RouteTable, RuleAction,
    SecurityGroup, SecurityGroupRule, Statement, Subnet, SubnetNetworkAclAssociation,
    SubnetRouteTableAssociation, Vpc, VpcGatewayAttachment,
};
use stackgen_template::{PseudoParam, Template, Value};

/// A network assembled from catalog constructors produces a fully
/// resolvable template.
#[test]
fn test_network_assembly_resolves() {
    let mut t = Template::new();
    let stack_id = PseudoParam::StackId.reference();

    let vpc = t
        .add_resource(Vpc::new("VPC", "10.0.0.0/16").with_tag("Application", stack_id.clone()))
        .unwrap();
    let subnet = t
        .add_resource(Subnet::new("Subnet", "10.0.0.0/24", vpc.reference()))
        .unwrap();
    let gateway = t.add_resource(InternetGateway::new("InternetGateway")).unwrap();
    let attachment = t
        .add_resource(VpcGatewayAttachment::new(
            "AttachGateway",
            vpc.reference(),
            gateway.reference(),
        ))
        .unwrap();
    let route_table = t
        .add_resource(RouteTable::new("RouteTable", vpc.reference()))
        .unwrap();
    t.add_resource(
        Route::new("Route", route_table.reference(), "0.0.0.0/0", gateway.reference())
            .with_depends_on(attachment.as_str()),
    )
    .unwrap();
    t.add_resource(SubnetRouteTableAssociation::new(
        "SubnetRouteTableAssociation",
        subnet.reference(),
        route_table.reference(),
    ))
    .unwrap();

    let acl = t
        .add_resource(NetworkAcl::new("NetworkAcl", vpc.reference()))
        .unwrap();
    t.add_resource(NetworkAclEntry::new(
        "InboundSSH",
        acl.reference(),
        101,
        6,
        PortRange::single(22),
        false,
        RuleAction::Allow,
        "0.0.0.0/0",
    ))
    .unwrap();
    t.add_resource(SubnetNetworkAclAssociation::new(
        "SubnetNetworkAclAssociation",
        subnet.reference(),
        acl.reference(),
    ))
    .unwrap();

    t.validate_references().unwrap();

    let doc = t.serialize().unwrap();
    assert_eq!(doc["Resources"]["Route"]["DependsOn"], "AttachGateway");
    assert_eq!(
        doc["Resources"]["Subnet"]["Properties"]["VpcId"],
        json!({"Ref": "VPC"})
    );
}

/// An instance wired to a role through an instance profile.
#[test]
fn test_identity_and_compute_assembly() {
    let mut t = Template::new();

    let trust = PolicyDocument::new().with_statement(
        Statement::allow()
            .with_action(iam::action("sts", "AssumeRole"))
            .with_principal("Service", "ec2.amazonaws.com"),
    );
    let admin = PolicyDocument::new()
        .with_id("admin_role")
        .with_version("2012-10-17")
        .with_statement(Statement::allow().with_action("*").with_resource("*"));

    let role = t
        .add_resource(Role::new("CFNRole", trust).with_policy(RolePolicy::new("admin_role", admin)))
        .unwrap();
    let profile = t
        .add_resource(stackgen_catalog::InstanceProfile::new("CFNInstanceProfile").with_role(role.reference()))
        .unwrap();

    let vpc = t.add_resource(Vpc::new("VPC", "10.0.0.0/16")).unwrap();
    let subnet = t
        .add_resource(Subnet::new("Subnet", "10.0.0.0/24", vpc.reference()))
        .unwrap();
    let group = t
        .add_resource(
            SecurityGroup::new("InstanceSecurityGroup", "Enable SSH access", vpc.reference())
                .with_ingress(SecurityGroupRule::new(IpProtocol::Tcp, 22, 22, "0.0.0.0/0")),
        )
        .unwrap();

    let instance = t
        .add_resource(
            Instance::new("WebServerInstance", "ami-1", "m1.small")
                .with_iam_instance_profile(profile.reference())
                .with_network_interface(
                    NetworkInterface::new(0, subnet.reference())
                        .with_group(group.reference())
                        .with_public_ip(true),
                ),
        )
        .unwrap();
    t.add_resource(
        Eip::new("IPAddress")
            .with_domain(EipDomain::Vpc)
            .with_instance(instance.reference()),
    )
    .unwrap();

    t.validate_references().unwrap();

    let doc = t.serialize().unwrap();
    assert_eq!(
        doc["Resources"]["CFNInstanceProfile"]["Properties"]["Roles"],
        json!([{"Ref": "CFNRole"}])
    );
    assert_eq!(
        doc["Resources"]["WebServerInstance"]["Properties"]["IamInstanceProfile"],
        json!({"Ref": "CFNInstanceProfile"})
    );
    assert_eq!(doc["Resources"]["IPAddress"]["Properties"]["Domain"], "vpc");
}

/// Disallowed enumerated values fail at construction time.
#[test]
fn test_invalid_enumerated_values() {
    assert!(RuleAction::parse("reject").is_err());
    assert!(IpProtocol::parse("sctp").is_err());
    assert!(EipDomain::parse("classic").is_err());
}
