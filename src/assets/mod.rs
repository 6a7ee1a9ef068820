//! Static asset abstraction for schema documents and templates
//!
//! The plugin ships its schemas and templates inside the binary. Reads go
//! through the `AssetSource` trait so tests can swap in an in-memory bundle,
//! e.g. to exercise a packaging defect where a template is missing.

use std::io;

pub mod embedded;
pub mod mock;

pub use embedded::EmbeddedAssets;
pub use mock::MockAssets;

/// Schema document for the global tier
pub const GLOBAL_CONFIG_SCHEMA: &str = "schemas/global-config.schema.json";

/// Schema document for the site tier
pub const SITE_CONFIG_SCHEMA: &str = "schemas/site-config.schema.json";

/// Schema document for the site-component tier
pub const SITE_COMPONENT_CONFIG_SCHEMA: &str = "schemas/site-component-config.schema.json";

/// Template for the `provider "sentry"` block
pub const PROVIDER_TEMPLATE: &str = "templates/provider.tf.tera";

/// Template for per-component resources
pub const RESOURCES_TEMPLATE: &str = "templates/resources.tf.tera";

/// Read-only access to bundled assets
///
/// # Implementations
/// - `EmbeddedAssets`: Production implementation backed by `include_str!`
/// - `MockAssets`: Test implementation using in-memory storage
pub trait AssetSource: Send + Sync {
    /// Read an asset as a string
    fn read_to_string(&self, name: &str) -> io::Result<String>;

    /// Check if an asset exists
    fn exists(&self, name: &str) -> bool;
}
