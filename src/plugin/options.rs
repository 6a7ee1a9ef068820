//! Plugin options

use serde::{Deserialize, Serialize};

/// Sentry provider version used when the host does not override it
pub const DEFAULT_PROVIDER_VERSION: &str = "1.0.2";

/// Registry source of the Sentry Terraform provider
pub const DEFAULT_PROVIDER_SOURCE: &str = "labd/sentry";

/// Sentry API base URL used when the global config leaves it unset
pub const DEFAULT_BASE_URL: &str = "https://sentry.io/api/";

/// Which global settings switch the integration on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnablePolicy {
    /// Enabled only when an auth token is configured
    #[default]
    AuthToken,

    /// Enabled when either an auth token or a DSN is configured
    AuthTokenOrDsn,
}

/// Options fixed when the plugin is constructed or configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOptions {
    /// Provider version, replaced by a non-empty override in `configure`
    pub provider_version: String,

    /// Provider registry source
    pub provider_source: String,

    /// Base URL rendered when the global config has none
    pub default_base_url: String,

    /// Enabled predicate
    pub enable_policy: EnablePolicy,
}

impl Default for PluginOptions {
    #[inline]
    fn default() -> Self {
        Self {
            provider_version: DEFAULT_PROVIDER_VERSION.to_owned(),
            provider_source: DEFAULT_PROVIDER_SOURCE.to_owned(),
            default_base_url: DEFAULT_BASE_URL.to_owned(),
            enable_policy: EnablePolicy::default(),
        }
    }
}

impl PluginOptions {
    /// Set the enabled predicate (builder pattern)
    #[must_use]
    #[inline]
    pub const fn with_enable_policy(mut self, enable_policy: EnablePolicy) -> Self {
        self.enable_policy = enable_policy;
        self
    }

    /// Set the provider version (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_provider_version<S: Into<String>>(mut self, version: S) -> Self {
        self.provider_version = version.into();
        self
    }
}
