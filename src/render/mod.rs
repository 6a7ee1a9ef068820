//! Terraform rendering of resolved Sentry configuration
//!
//! Produces the provider requirement, the `provider "sentry"` block, and the
//! per-component variables and resources. Whether anything is rendered at
//! all is decided by the plugin; these functions only fill text.

pub mod quote;
pub mod template;
pub mod version;

pub use quote::{deploy_command, hcl_string};
pub use template::fill;
pub use version::version_constraint;

use crate::assets::{AssetSource, PROVIDER_TEMPLATE, RESOURCES_TEMPLATE};
use crate::config::{BaseConfig, GlobalConfig, SiteComponentConfig};
use crate::error::PluginResult;
use serde::Serialize;
use tracing::debug;

/// Output of rendering one component within one site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedComponent {
    /// Variable assignments passed into the component module
    pub variables: String,

    /// Resource declarations, empty when the integration is disabled
    pub resources: String,
}

#[derive(Serialize)]
struct ProviderContext<'src> {
    token: &'src str,
    base_url: &'src str,
}

#[derive(Serialize)]
struct ResourcesContext<'src> {
    component_name: &'src str,
    key_name: String,
    deployment_resource: String,
    component_version: &'src str,
    organization: &'src str,
    token: &'src str,
    base_url: &'src str,
    config: &'src BaseConfig,
    deploy_command: Option<String>,
}

/// Everything the component resources template needs
#[derive(Debug, Clone, Copy)]
pub struct ComponentResources<'src> {
    pub site: &'src str,
    pub component: &'src str,
    pub component_version: &'src str,
    pub environment: &'src str,
    pub global: &'src GlobalConfig,
    pub config: &'src SiteComponentConfig,
    pub default_base_url: &'src str,
}

/// Render the `required_providers` entry for the Sentry provider
#[must_use]
#[inline]
pub fn render_provider_declaration(source: &str, version: &str) -> String {
    format!(
        "sentry = {{\n  source = \"{source}\"\n  version = \"{}\"\n}}",
        version_constraint(version)
    )
}

/// Render the `provider "sentry"` block from the global config
///
/// # Errors
///
/// Returns an error if:
/// - The provider template is missing or fails to render
#[inline]
pub fn render_provider_block(
    assets: &dyn AssetSource,
    global: &GlobalConfig,
    default_base_url: &str,
) -> PluginResult<String> {
    let context = ProviderContext {
        token: &global.auth_token,
        base_url: base_url_or_default(global, default_base_url),
    };
    fill(assets, PROVIDER_TEMPLATE, &context)
}

/// Render the `sentry_dsn` variable for a component
///
/// Without an auth token the resolved DSN is embedded literally. With one,
/// the variable references the `sentry_key` resource managed for the
/// component.
#[must_use]
#[inline]
pub fn render_component_variables(component: &str, dsn: &str, auth_token: &str) -> String {
    if auth_token.is_empty() {
        format!("sentry_dsn = {}", hcl_string(dsn))
    } else {
        format!("sentry_dsn = sentry_key.{component}.dsn_secret")
    }
}

/// Render the Sentry resources for one component
///
/// Requires an auth token: without one the provider cannot manage keys and
/// nothing is rendered. Deployment tracking also needs a resolved project,
/// since `sentry-cli` cannot record a deploy without one.
///
/// # Errors
///
/// Returns an error if:
/// - The resources template is missing or fails to render
/// - The deploy command cannot be shell quoted
#[inline]
pub fn render_component_resources(
    assets: &dyn AssetSource,
    resources: &ComponentResources<'_>,
) -> PluginResult<String> {
    let global = resources.global;
    if global.auth_token.is_empty() {
        return Ok(String::new());
    }

    let config = &resources.config.base;
    let command = if !config.track_deployments.unwrap_or(false) {
        None
    } else if config.project.is_empty() {
        debug!(
            site = resources.site,
            component = resources.component,
            "no sentry project resolved, skipping deployment tracking"
        );
        None
    } else {
        Some(deploy_command(
            &global.organization,
            &config.project,
            resources.component_version,
            resources.environment,
        )?)
    };

    let context = ResourcesContext {
        component_name: resources.component,
        key_name: format!("{}_{}", resources.site, resources.component),
        deployment_resource: format!("sentry_deployment_{}", resources.component),
        component_version: resources.component_version,
        organization: &global.organization,
        token: &global.auth_token,
        base_url: base_url_or_default(global, resources.default_base_url),
        config,
        deploy_command: command,
    };
    fill(assets, RESOURCES_TEMPLATE, &context)
}

fn base_url_or_default<'src>(global: &'src GlobalConfig, default_base_url: &'src str) -> &'src str {
    if global.base_url.is_empty() {
        default_base_url
    } else {
        &global.base_url
    }
}
