//! Plugin error types

use core::fmt;
use thiserror::Error;

/// Result alias used across the plugin
pub type PluginResult<T> = Result<T, PluginError>;

/// One level of the configuration override hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Global,
    Site,
    SiteComponent,
    Component,
}

impl Tier {
    /// Name used for this tier in schema documents and error messages
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global-config",
            Self::Site => "site-config",
            Self::SiteComponent => "site-component-config",
            Self::Component => "component-config",
        }
    }
}

impl fmt::Display for Tier {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for plugin operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PluginError {
    /// Raw input failed schema validation
    #[error("Invalid {tier}{}:\n{}", describe_location(.site.as_deref(), .component.as_deref()), .errors.join("\n"))]
    InvalidConfig {
        tier: Tier,
        site: Option<String>,
        component: Option<String>,
        errors: Vec<String>,
    },

    /// Component was never registered through `set_component_config`
    #[error("Unknown component: '{component}' has no registered component config")]
    UnknownComponent { component: String },

    /// Validated input could not be projected onto the typed config
    #[error("Failed to decode {tier}: {message}")]
    Decode { tier: Tier, message: String },

    /// A bundled schema or template could not be read
    #[error("Asset error: {name}: {message}")]
    Asset { name: String, message: String },

    /// A bundled schema document does not parse or compile
    #[error("Schema error: {name}: {message}")]
    Schema { name: String, message: String },

    /// Template fill failed
    #[error("Template error: {name}: {message}")]
    Template { name: String, message: String },
}

fn describe_location(site: Option<&str>, component: Option<&str>) -> String {
    match (site, component) {
        (Some(site), Some(component)) => format!(" for component '{component}' in site '{site}'"),
        (Some(site), None) => format!(" for site '{site}'"),
        (None, Some(component)) => format!(" for component '{component}'"),
        (None, None) => String::new(),
    }
}

impl PluginError {
    /// Create an invalid configuration error
    #[inline]
    pub fn invalid_config(
        tier: Tier,
        site: Option<&str>,
        component: Option<&str>,
        errors: Vec<String>,
    ) -> Self {
        Self::InvalidConfig {
            tier,
            site: site.map(str::to_owned),
            component: component.map(str::to_owned),
            errors,
        }
    }

    /// Create an unknown component error
    #[inline]
    pub fn unknown_component<S: Into<String>>(component: S) -> Self {
        Self::UnknownComponent {
            component: component.into(),
        }
    }

    /// Create a decode error
    #[inline]
    pub fn decode<S: Into<String>>(tier: Tier, message: S) -> Self {
        Self::Decode {
            tier,
            message: message.into(),
        }
    }

    /// Create an asset error
    #[inline]
    pub fn asset<N: Into<String>, S: Into<String>>(name: N, message: S) -> Self {
        Self::Asset {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a schema error
    #[inline]
    pub fn schema<N: Into<String>, S: Into<String>>(name: N, message: S) -> Self {
        Self::Schema {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a template error
    #[inline]
    pub fn template<N: Into<String>, S: Into<String>>(name: N, message: S) -> Self {
        Self::Template {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Tier the error refers to, if any
    #[must_use]
    #[inline]
    pub const fn tier(&self) -> Option<Tier> {
        match *self {
            Self::InvalidConfig { tier, .. } | Self::Decode { tier, .. } => Some(tier),
            Self::UnknownComponent { .. } => Some(Tier::Component),
            Self::Asset { .. } | Self::Schema { .. } | Self::Template { .. } => None,
        }
    }
}
