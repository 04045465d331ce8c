//! # stackgen_catalog
//!
//! The resource catalog: typed constructors for the infrastructure kinds a
//! stack template declares, each lowering into a plain
//! [`stackgen_template::Resource`].
//!
//! The catalog is deliberately shallow. A constructor pins the type tag and
//! property names of its kind and validates the fields that are enumerated
//! (rule actions, IP protocols, address domains); everything else is carried
//! opaquely for the provisioning engine to check.

pub mod ec2;
pub mod error;
pub mod iam;

pub use ec2::{
    Eip, EipDomain, Instance, InternetGateway, IpProtocol, NetworkAcl, NetworkAclEntry,
    NetworkInterface, PortRange, Route, RouteTable, RuleAction, SecurityGroup, SecurityGroupRule,
    Subnet, SubnetNetworkAclAssociation, SubnetRouteTableAssociation, Vpc, VpcGatewayAttachment,
};
pub use error::{CatalogError, CatalogResult};
pub use iam::{Effect, InstanceProfile, PolicyDocument, Role, RolePolicy, Statement};
