//! Configuration management module
//!
//! Holds the tiered Sentry configuration model, the merge rules between
//! tiers, JSON schema validation of raw host input, and decoding of
//! validated input onto documented defaults.

pub mod decode;
pub mod model;
pub mod schema;

pub use decode::{as_mapping, decode_onto};
pub use model::{
    BaseConfig, ComponentConfig, GlobalConfig, SiteComponentConfig, SiteConfig, extend,
};
pub use schema::{SchemaCache, ValidationSchema, ValidationTarget, validate};
