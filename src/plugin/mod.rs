//! Host-facing Sentry plugin
//!
//! `SentryPlugin` is the single handler the host talks to. It owns the
//! configuration store and exposes the operations the host invokes, one
//! call at a time: configure, schema discovery, the four `set_*` calls and
//! the three renders.

pub mod once;
pub mod options;
pub mod resolve;
pub mod state;

pub use once::FireOnce;
pub use options::{EnablePolicy, PluginOptions};
pub use state::PluginState;

use crate::assets::{AssetSource, EmbeddedAssets};
use crate::config::{
    ComponentConfig, GlobalConfig, SchemaCache, SiteComponentConfig, SiteConfig,
    ValidationSchema, ValidationTarget, as_mapping, decode_onto,
};
use crate::error::{PluginError, PluginResult, Tier};
use crate::render::{
    ComponentResources, RenderedComponent, render_component_resources,
    render_component_variables, render_provider_block, render_provider_declaration,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Sentry integration plugin
pub struct SentryPlugin {
    options: PluginOptions,
    environment: String,
    state: PluginState,
    assets: Box<dyn AssetSource>,
    schemas: SchemaCache,
    disabled_warning: FireOnce,
}

impl Default for SentryPlugin {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SentryPlugin {
    /// Identifier the plugin registers under with the host
    pub const IDENTIFIER: &'static str = "sentry";

    /// Create a plugin with default options and the embedded asset bundle
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::with_options(PluginOptions::default())
    }

    /// Create a plugin with explicit options
    #[must_use]
    #[inline]
    pub fn with_options(options: PluginOptions) -> Self {
        Self {
            options,
            environment: String::new(),
            state: PluginState::new(),
            assets: Box::new(EmbeddedAssets::new()),
            schemas: SchemaCache::new(),
            disabled_warning: FireOnce::new(),
        }
    }

    /// Replace the asset source (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_assets<A: AssetSource + 'static>(mut self, assets: A) -> Self {
        self.assets = Box::new(assets);
        self.schemas.clear();
        self
    }

    /// Set the environment name and, when non-empty, the provider version
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` matches the host's operation signature.
    #[inline]
    pub fn configure(&mut self, environment: &str, provider_version: &str) -> PluginResult<()> {
        environment.clone_into(&mut self.environment);
        if !provider_version.is_empty() {
            provider_version.clone_into(&mut self.options.provider_version);
        }
        info!(
            environment,
            provider_version = %self.options.provider_version,
            "configured sentry plugin"
        );
        Ok(())
    }

    /// Whether the integration should emit any Terraform at all
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        let global = self.state.global();
        match self.options.enable_policy {
            EnablePolicy::AuthToken => !global.auth_token.is_empty(),
            EnablePolicy::AuthTokenOrDsn => {
                !global.auth_token.is_empty() || !global.base.dsn.is_empty()
            }
        }
    }

    /// Schema documents for the global, site and site component tiers
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A bundled schema document is missing or not valid JSON
    #[inline]
    pub fn get_validation_schema(&self) -> PluginResult<ValidationSchema> {
        debug!("loading validation schema");
        ValidationSchema::load(self.assets.as_ref())
    }

    /// Validate and store the global config, replacing any previous one
    ///
    /// Keys missing from `data` take their documented default.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` does not match the global schema; nothing is stored
    #[inline]
    pub fn set_global_config(&mut self, data: &Value) -> PluginResult<()> {
        debug!("set global config");
        self.schemas
            .validate(self.assets.as_ref(), &ValidationTarget::global(), data)?;

        let config = decode_onto(Tier::Global, &GlobalConfig::default(), &as_mapping(data))?;
        self.state.replace_global(config);
        Ok(())
    }

    /// Validate and store a site config
    ///
    /// The site entry is replaced wholesale: component overrides set earlier
    /// for this site are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` does not match the site schema; nothing is stored
    #[inline]
    pub fn set_site_config(&mut self, site: &str, data: &Value) -> PluginResult<()> {
        debug!(site, "set site config");
        self.schemas
            .validate(self.assets.as_ref(), &ValidationTarget::site(site), data)?;

        let config = decode_onto(Tier::Site, &SiteConfig::default(), &as_mapping(data))?;
        if self
            .state
            .site(site)
            .is_some_and(|existing| !existing.components.is_empty())
        {
            debug!(site, "site config replaced, dropping component overrides");
        }
        self.state.replace_site(site, config);
        Ok(())
    }

    /// Validate and store a component override within a site
    ///
    /// Creates the site when it is not known yet and leaves other components
    /// of the site untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` does not match the site component schema; nothing is stored
    #[inline]
    pub fn set_site_component_config(
        &mut self,
        site: &str,
        component: &str,
        data: &Value,
    ) -> PluginResult<()> {
        debug!(site, component, "set site component config");
        self.schemas.validate(
            self.assets.as_ref(),
            &ValidationTarget::site_component(site, component),
            data,
        )?;

        let config = decode_onto(
            Tier::SiteComponent,
            &SiteComponentConfig::default(),
            &as_mapping(data),
        )?;
        self.state.upsert_site_component(site, component, config);
        Ok(())
    }

    /// Register a component and its version
    ///
    /// No schema applies here. The host supplied `version` always wins over
    /// anything in `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` cannot be decoded
    #[inline]
    pub fn set_component_config(
        &mut self,
        component: &str,
        version: &str,
        data: &Value,
    ) -> PluginResult<()> {
        debug!(component, version, "set component config");
        let seed = ComponentConfig::new(version);
        let mut config = decode_onto(Tier::Component, &seed, &as_mapping(data))?;
        config.version = seed.version;
        self.state.replace_component(component, config);
        Ok(())
    }

    /// Render the `required_providers` entry
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` matches the host's operation signature.
    #[inline]
    pub fn render_providers(&self, site: &str) -> PluginResult<String> {
        if !self.check_enabled() {
            return Ok(String::new());
        }
        debug!(site, "render providers");
        Ok(render_provider_declaration(
            &self.options.provider_source,
            &self.options.provider_version,
        ))
    }

    /// Render the `provider "sentry"` block for a site
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider template is missing or fails to render
    #[inline]
    pub fn render_resources(&self, site: &str) -> PluginResult<String> {
        if !self.check_enabled() {
            return Ok(String::new());
        }
        debug!(site, "render resources");
        render_provider_block(
            self.assets.as_ref(),
            self.state.global(),
            &self.options.default_base_url,
        )
    }

    /// Render the variables and resources for a component within a site
    ///
    /// Variables are rendered even when the integration is disabled, so the
    /// component still receives its literal DSN.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Resources are rendered for a component that was never registered
    /// - The resources template is missing or fails to render
    #[inline]
    pub fn render_component(&self, site: &str, component: &str) -> PluginResult<RenderedComponent> {
        debug!(site, component, "render component");
        let config = self.state.resolve_site_component_config(site, component);
        let global = self.state.global();

        let mut rendered = RenderedComponent {
            variables: render_component_variables(component, &config.base.dsn, &global.auth_token),
            resources: String::new(),
        };

        if self.check_enabled() && !global.auth_token.is_empty() {
            let component_config = self.component_config(component)?;
            rendered.resources = render_component_resources(
                self.assets.as_ref(),
                &ComponentResources {
                    site,
                    component,
                    component_version: &component_config.version,
                    environment: &self.environment,
                    global,
                    config: &config,
                    default_base_url: &self.options.default_base_url,
                },
            )?;
        }

        Ok(rendered)
    }

    /// Effective config for a site
    #[must_use]
    #[inline]
    pub fn site_config(&self, site: &str) -> SiteConfig {
        self.state.resolve_site_config(site)
    }

    /// Effective config for a component within a site
    #[must_use]
    #[inline]
    pub fn site_component_config(&self, site: &str, component: &str) -> SiteComponentConfig {
        self.state.resolve_site_component_config(site, component)
    }

    /// Registered config for a component
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The component was never registered (`PluginError::UnknownComponent`)
    #[inline]
    pub fn component_config(&self, component: &str) -> PluginResult<&ComponentConfig> {
        self.state
            .component(component)
            .ok_or_else(|| PluginError::unknown_component(component))
    }

    /// Stored global config
    #[must_use]
    #[inline]
    pub const fn global_config(&self) -> &GlobalConfig {
        self.state.global()
    }

    /// Stored (unresolved) site config
    #[must_use]
    #[inline]
    pub fn stored_site_config(&self, site: &str) -> Option<&SiteConfig> {
        self.state.site(site)
    }

    /// The configuration store
    #[must_use]
    #[inline]
    pub const fn state(&self) -> &PluginState {
        &self.state
    }

    /// Active options
    #[must_use]
    #[inline]
    pub const fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Environment name set by `configure`
    #[must_use]
    #[inline]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Whether the "disabled" warning has been emitted
    #[must_use]
    #[inline]
    pub fn disabled_warning_emitted(&self) -> bool {
        self.disabled_warning.has_fired()
    }

    fn check_enabled(&self) -> bool {
        let enabled = self.is_enabled();
        if !enabled && self.disabled_warning.fire() {
            warn!("sentry plugin is disabled: no credentials configured, skipping sentry resources");
        }
        enabled
    }
}
