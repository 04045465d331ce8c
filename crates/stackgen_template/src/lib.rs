//! # stackgen_template
//!
//! Declarative infrastructure template builder for stackgen.
//!
//! A [`Template`] accumulates named parameters, mappings, resources, and
//! outputs, preserves the symbolic references between them, and serializes
//! the whole document into the provisioning engine's JSON schema. Nothing is
//! resolved or provisioned here; the builder's only job is to assemble the
//! document faithfully and hand it to the downstream engine.
//!
//! ## Example
//!
//! ```rust
//! use stackgen_template::{Parameter, Resource, Template};
//!
//! let mut t = Template::new();
//! t.set_version("2010-09-09");
//!
//! let key = t.add_parameter(Parameter::new("KeyName", "AWS::EC2::KeyPair::KeyName"))?;
//! t.add_resource(
//!     Resource::new("Box", "AWS::EC2::Instance")
//!         .with_property("KeyName", key.reference()),
//! )?;
//!
//! println!("{}", t.to_json()?);
//! # Ok::<(), stackgen_template::TemplateError>(())
//! ```

pub mod error;
pub mod mapping;
pub mod output;
pub mod parameter;
pub mod resource;
pub mod template;
pub mod value;

pub use error::{TemplateError, TemplateResult};
pub use mapping::Mapping;
pub use output::Output;
pub use parameter::Parameter;
pub use resource::Resource;
pub use template::{LogicalId, Template};
pub use value::{PseudoParam, Value};
