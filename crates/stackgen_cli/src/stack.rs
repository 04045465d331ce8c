//! Assembly of the VPC single-instance stack template.
//!
//! One VPC with a public subnet, a routed and ACL-guarded network path, an
//! IAM role exposed through an instance profile, a web server instance that
//! bootstraps a throwaway kops cluster on first boot, and an elastic IP on
//! top. The boot script is carried as an uninterpreted payload; nothing in
//! it is parsed or validated here.

use tracing::info;

use stackgen_catalog::{
    iam, Eip, EipDomain, Instance, InstanceProfile, InternetGateway, IpProtocol, NetworkAcl,
    NetworkAclEntry, NetworkInterface, PolicyDocument, PortRange, Role, RolePolicy, Route,
    RouteTable, RuleAction, SecurityGroup, SecurityGroupRule, Statement, Subnet,
    SubnetNetworkAclAssociation, SubnetRouteTableAssociation, Vpc, VpcGatewayAttachment,
};
use stackgen_template::{
    Mapping, Output, Parameter, PseudoParam, Template, TemplateResult, Value,
};

const DESCRIPTION: &str = "AWS CloudFormation Sample Template VPC_Single_Instance_In_Subnet: \
Sample template showing how to create a VPC and add an EC2 instance with an Elastic IP address \
and a security group. **WARNING** This template creates an Amazon EC2 instance. You will be \
billed for the AWS resources used if you create a stack from this template.";

/// Instance types offered by the `InstanceType` parameter.
const ALLOWED_INSTANCE_TYPES: &[&str] = &[
    "t1.micro",
    "t2.micro",
    "t2.small",
    "t2.medium",
    "m1.small",
    "m1.medium",
    "m1.large",
    "m1.xlarge",
    "m2.xlarge",
    "m2.2xlarge",
    "m2.4xlarge",
    "m3.medium",
    "m3.large",
    "m3.xlarge",
    "m3.2xlarge",
    "c1.medium",
    "c1.xlarge",
    "c3.large",
    "c3.xlarge",
    "c3.2xlarge",
    "c3.4xlarge",
    "c3.8xlarge",
    "g2.2xlarge",
    "r3.large",
    "r3.xlarge",
    "r3.2xlarge",
    "r3.4xlarge",
    "r3.8xlarge",
    "i2.xlarge",
    "i2.2xlarge",
    "i2.4xlarge",
    "i2.8xlarge",
    "hi1.4xlarge",
    "hs1.8xlarge",
    "cr1.8xlarge",
    "cc2.8xlarge",
    "cg1.4xlarge",
];

/// Architecture tag per instance type, for the AMI lookup. The allowed list
/// above carries one more type (cg1.4xlarge) than this table; the template
/// emits the mapping without it.
const INSTANCE_TYPE_ARCH: &[(&str, &str)] = &[
    ("t1.micro", "PV64"),
    ("t2.micro", "HVM64"),
    ("t2.small", "HVM64"),
    ("t2.medium", "HVM64"),
    ("m1.small", "PV64"),
    ("m1.medium", "PV64"),
    ("m1.large", "PV64"),
    ("m1.xlarge", "PV64"),
    ("m2.xlarge", "PV64"),
    ("m2.2xlarge", "PV64"),
    ("m2.4xlarge", "PV64"),
    ("m3.medium", "HVM64"),
    ("m3.large", "HVM64"),
    ("m3.xlarge", "HVM64"),
    ("m3.2xlarge", "HVM64"),
    ("c1.medium", "PV64"),
    ("c1.xlarge", "PV64"),
    ("c3.large", "HVM64"),
    ("c3.xlarge", "HVM64"),
    ("c3.2xlarge", "HVM64"),
    ("c3.4xlarge", "HVM64"),
    ("c3.8xlarge", "HVM64"),
    ("g2.2xlarge", "HVMG2"),
    ("r3.large", "HVM64"),
    ("r3.xlarge", "HVM64"),
    ("r3.2xlarge", "HVM64"),
    ("r3.4xlarge", "HVM64"),
    ("r3.8xlarge", "HVM64"),
    ("i2.xlarge", "HVM64"),
    ("i2.2xlarge", "HVM64"),
    ("i2.4xlarge", "HVM64"),
    ("i2.8xlarge", "HVM64"),
    ("hi1.4xlarge", "HVM64"),
    ("hs1.8xlarge", "HVM64"),
    ("cr1.8xlarge", "HVM64"),
    ("cc2.8xlarge", "HVM64"),
];

/// AMI ids per region and architecture: (region, PV64, HVM64, HVMG2).
const REGION_ARCH_AMI: &[(&str, &str, &str, &str)] = &[
    ("us-east-1", "ami-50842d38", "ami-08842d60", "ami-3a329952"),
    ("us-west-2", "ami-af86c69f", "ami-8786c6b7", "ami-47296a77"),
    ("us-west-1", "ami-c7a8a182", "ami-cfa8a18a", "ami-331b1376"),
    ("eu-west-1", "ami-aa8f28dd", "ami-748e2903", "ami-00913777"),
    ("ap-southeast-1", "ami-20e1c572", "ami-d6e1c584", "ami-fabe9aa8"),
    ("ap-northeast-1", "ami-21072820", "ami-35072834", "ami-5dd1ff5c"),
    ("ap-southeast-2", "ami-8b4724b1", "ami-fd4724c7", "ami-e98ae9d3"),
    ("sa-east-1", "ami-9d6cc680", "ami-956cc688", "NOT_SUPPORTED"),
    ("cn-north-1", "ami-a857c591", "ami-ac57c595", "NOT_SUPPORTED"),
    ("eu-central-1", "ami-a03503bd", "ami-b43503a9", "ami-b03503ad"),
];

/// Boot-time provisioning payload, passed through verbatim. Joined with an
/// empty delimiter and base64-encoded by the provisioning engine.
const USER_DATA_LINES: &[&str] = &[
    "#!/bin/bash\n",
    "clusterid=$(date +%s)\n",
    "echo testcluster${clusterid}.k8s.local > /tmp/clustername\n",
    "curl -LO https://dl.k8s.io/release/v1.18.0/bin/linux/amd64/kubectl\n",
    "sudo install -o root -g root -m 0755 kubectl /usr/local/bin/kubectl\n",
    "curl -LO https://github.com/kubernetes/kops/releases/download/v1.18.0/kops-linux-amd64\n",
    "curl -LO https://dl.k8s.io/release/v1.18.0/bin/linux/amd64/kubectl\n",
    "chmod +x kops-linux-amd64\n",
    "sudo mv kops-linux-amd64 /usr/local/bin/kops\n",
    "aws s3 mb s3://testcluster${clusterid}.k8s.local\n",
    "export KOPS_STATE_STORE=s3://testcluster${clusterid}.k8s.local\n",
    "ssh-keygen -b 2048 -t rsa -f /tmp/sshkey -q -N \"\"\n",
    "/usr/local/bin/kops create cluster --zones=us-east-1c testcluster${clusterid}.k8s.local || true\n",
    "/usr/local/bin/kops create secret --name testcluster${clusterid}.k8s.local sshpublickey admin -i /tmp/sshkey.pub\n",
    "/usr/local/bin/kops update cluster testcluster${clusterid}.k8s.local --yes\n",
    "/usr/local/bin/kops validate cluster  --wait 10m\n",
    "/usr/local/bin/kubectl create deployment helloworld --image=gcr.io/google-samples/node-hello:1.0\n",
    "/usr/local/bin/kubectl expose deployment helloworld --type=LoadBalancer --name=helloworld --port 8080\n",
    "/usr/local/bin/kubectl get services helloworld\n",
    "sleep 10\n",
    "address=$(/usr/local/bin/kubectl get services helloworld | grep elb | awk '{ print $4 }')\n",
    "echo $address:8080 > /tmp/serviceaddress\n",
    "echo export KOPS_STATE_STORE=s3://testcluster${clusterid}.k8s.local >> /home/ec2-user/.bash_profile\n",
    "echo kops export kubecfg --name testcluster${clusterid}.k8s.local >> /home/ec2-user/.bash_profile\n",
];

/// Build the complete stack template.
pub fn build_stack() -> TemplateResult<Template> {
    let mut t = Template::new();
    t.set_version("2010-09-09");
    t.set_description(DESCRIPTION);

    let keyname = t.add_parameter(
        Parameter::new("KeyName", "AWS::EC2::KeyPair::KeyName")
            .with_constraint_description("must be the name of an existing EC2 KeyPair.")
            .with_description(
                "Name of an existing EC2 KeyPair to enable SSH access to the instance",
            ),
    )?;

    let ssh_location = t.add_parameter(
        Parameter::new("SSHLocation", "String")
            .with_description(" The IP address range that can be used to SSH to the EC2 instances")
            .with_length_bounds("9", "18")
            .with_default("0.0.0.0/0")
            .with_allowed_pattern(r"(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})")
            .with_constraint_description("must be a valid IP CIDR range of the form x.x.x.x/x."),
    )?;

    let instance_type = t.add_parameter(
        Parameter::new("InstanceType", "String")
            .with_description("WebServer EC2 instance type")
            .with_default("m1.small")
            .with_allowed_values(ALLOWED_INSTANCE_TYPES.iter().copied())
            .with_constraint_description("must be a valid EC2 instance type."),
    )?;

    let mut type_to_arch = Mapping::new();
    for (name, arch) in INSTANCE_TYPE_ARCH {
        type_to_arch.set(*name, "Arch", *arch);
    }
    t.add_mapping("AWSInstanceType2Arch", type_to_arch)?;

    let mut region_to_ami = Mapping::new();
    for (region, pv64, hvm64, hvmg2) in REGION_ARCH_AMI {
        region_to_ami.set(*region, "PV64", *pv64);
        region_to_ami.set(*region, "HVM64", *hvm64);
        region_to_ami.set(*region, "HVMG2", *hvmg2);
    }
    t.add_mapping("AWSRegionArch2AMI", region_to_ami)?;

    let stack_id = PseudoParam::StackId.reference();

    let role = t.add_resource(
        Role::new(
            "CFNRole",
            PolicyDocument::new().with_statement(
                Statement::allow()
                    .with_action(iam::action("sts", "AssumeRole"))
                    .with_principal("Service", "ec2.amazonaws.com"),
            ),
        )
        .with_policy(RolePolicy::new(
            "admin_role",
            PolicyDocument::new()
                .with_id("admin_role")
                .with_version("2012-10-17")
                .with_statement(Statement::allow().with_action("*").with_resource("*")),
        )),
    )?;

    let instance_profile = t.add_resource(
        InstanceProfile::new("CFNInstanceProfile").with_role(role.reference()),
    )?;

    let vpc = t.add_resource(
        Vpc::new("VPC", "10.0.0.0/16").with_tag("Application", stack_id.clone()),
    )?;

    let subnet = t.add_resource(
        Subnet::new("Subnet", "10.0.0.0/24", vpc.reference())
            .with_tag("Application", stack_id.clone()),
    )?;

    let gateway = t.add_resource(
        InternetGateway::new("InternetGateway").with_tag("Application", stack_id.clone()),
    )?;

    let attachment = t.add_resource(VpcGatewayAttachment::new(
        "AttachGateway",
        vpc.reference(),
        gateway.reference(),
    ))?;

    let route_table = t.add_resource(
        RouteTable::new("RouteTable", vpc.reference()).with_tag("Application", stack_id.clone()),
    )?;

    t.add_resource(
        Route::new(
            "Route",
            route_table.reference(),
            "0.0.0.0/0",
            gateway.reference(),
        )
        .with_depends_on(attachment.as_str()),
    )?;

    t.add_resource(SubnetRouteTableAssociation::new(
        "SubnetRouteTableAssociation",
        subnet.reference(),
        route_table.reference(),
    ))?;

    let acl = t.add_resource(
        NetworkAcl::new("NetworkAcl", vpc.reference()).with_tag("Application", stack_id.clone()),
    )?;

    // Inbound: HTTP, SSH, and ephemeral response ports. Outbound: HTTP,
    // HTTPS, and ephemeral response ports. Rule order matters downstream.
    let acl_rules: &[(&str, i64, PortRange, bool)] = &[
        ("InboundHTTPNetworkAclEntry", 100, PortRange::single(80), false),
        ("InboundSSHNetworkAclEntry", 101, PortRange::single(22), false),
        (
            "InboundResponsePortsNetworkAclEntry",
            102,
            PortRange::new(1024, 65535),
            false,
        ),
        ("OutBoundHTTPNetworkAclEntry", 100, PortRange::single(80), true),
        ("OutBoundHTTPSNetworkAclEntry", 101, PortRange::single(443), true),
        (
            "OutBoundResponsePortsNetworkAclEntry",
            102,
            PortRange::new(1024, 65535),
            true,
        ),
    ];
    for (name, rule_number, port_range, egress) in acl_rules {
        t.add_resource(NetworkAclEntry::new(
            *name,
            acl.reference(),
            *rule_number,
            6,
            *port_range,
            *egress,
            RuleAction::Allow,
            "0.0.0.0/0",
        ))?;
    }

    t.add_resource(SubnetNetworkAclAssociation::new(
        "SubnetNetworkAclAssociation",
        subnet.reference(),
        acl.reference(),
    ))?;

    let security_group = t.add_resource(
        SecurityGroup::new(
            "InstanceSecurityGroup",
            "Enable SSH access via port 22",
            vpc.reference(),
        )
        .with_ingress(SecurityGroupRule::new(
            IpProtocol::Tcp,
            22,
            22,
            ssh_location.reference(),
        ))
        .with_ingress(SecurityGroupRule::new(
            IpProtocol::Tcp,
            80,
            80,
            ssh_location.reference(),
        )),
    )?;

    let image_id = Value::find_in_map(
        "AWSRegionArch2AMI",
        PseudoParam::Region.reference(),
        Value::find_in_map("AWSInstanceType2Arch", instance_type.reference(), "Arch"),
    );
    let user_data = Value::base64(Value::join(
        "",
        USER_DATA_LINES.iter().map(|line| Value::from(*line)).collect(),
    ));

    let instance = t.add_resource(
        Instance::new("WebServerInstance", image_id, instance_type.reference())
            .with_iam_instance_profile(instance_profile.reference())
            .with_key_name(keyname.reference())
            .with_network_interface(
                NetworkInterface::new(0, subnet.reference())
                    .with_group(security_group.reference())
                    .with_public_ip(true)
                    .with_delete_on_termination(true),
            )
            .with_user_data(user_data)
            .with_tag("Application", stack_id),
    )?;

    t.add_resource(
        Eip::new("IPAddress")
            .with_domain(EipDomain::Vpc)
            .with_instance(instance.reference())
            .with_depends_on(attachment.as_str()),
    )?;

    t.add_outputs([Output::new(
        "URL",
        Value::join("-", vec![Value::from("IP"), instance.get_att("PublicIp")]),
    )
    .with_description("Control instance IP")])?;

    info!(
        "Assembled stack template with {} resources",
        t.resource_names().count()
    );
    Ok(t)
}
