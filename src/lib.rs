//! `sentry-composer-plugin` - Sentry integration for infrastructure composition
//!
//! This library is the provider-specific half of a composition plugin. The
//! host runtime hands it layered Sentry configuration (global, per site and
//! per component within a site), and asks it to render Terraform: the
//! provider requirement, the `provider "sentry"` block, and a `sentry_key`
//! (plus optional deployment tracking) per component.
//!
//! Configuration is resolved global → site → site component. A more
//! specific tier overrides a less specific one field by field; unset
//! fields inherit.
//!
//! ```
//! use sentry_composer_plugin::SentryPlugin;
//! use serde_json::json;
//!
//! let mut plugin = SentryPlugin::new();
//! plugin.configure("production", "")?;
//! plugin.set_global_config(&json!({ "auth_token": "token", "organization": "acme" }))?;
//! plugin.set_site_config("eu", &json!({ "project": "shop" }))?;
//! plugin.set_component_config("api", "1.4.0", &json!({}))?;
//!
//! let rendered = plugin.render_component("eu", "api")?;
//! assert_eq!(rendered.variables, "sentry_dsn = sentry_key.api.dsn_secret");
//! assert!(rendered.resources.contains("name = \"eu_api\""));
//! # Ok::<(), sentry_composer_plugin::PluginError>(())
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod render;

pub use config::{BaseConfig, ComponentConfig, GlobalConfig, SiteComponentConfig, SiteConfig, extend};
pub use error::{PluginError, PluginResult, Tier};
pub use plugin::{EnablePolicy, PluginOptions, SentryPlugin};
pub use render::RenderedComponent;
