//! Tiered Sentry configuration model
//!
//! Configuration is layered global → site → site component. Every tier
//! carries a `BaseConfig`; a more specific tier overrides a less specific
//! one field by field through [`extend`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Override-capable fields shared by every tier
///
/// Optional fields distinguish "not set at this level" (`None`) from an
/// explicit `0` or `false`. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Sentry DSN the instrumented application reports to
    pub dsn: String,

    /// Rate limit window in seconds
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub rate_limit_window: Option<i64>,

    /// Requests allowed per rate limit window
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub rate_limit_count: Option<i64>,

    /// Sentry project slug
    pub project: String,

    /// Whether deployments of the component are reported to Sentry
    pub track_deployments: Option<bool>,
}

impl BaseConfig {
    /// Merge `self` over a less specific config, see [`extend`]
    #[must_use]
    #[inline]
    pub fn extend(&self, less_specific: &Self) -> Self {
        extend(self, less_specific)
    }
}

/// Merge two tiers, the more specific one winning field by field
///
/// - `dsn`, `project`: more specific wins when non-empty
/// - `rate_limit_window`, `rate_limit_count`, `track_deployments`: more
///   specific wins when present, whatever the value
///
/// Neither input is modified.
#[must_use]
#[inline]
pub fn extend(more_specific: &BaseConfig, less_specific: &BaseConfig) -> BaseConfig {
    BaseConfig {
        dsn: non_empty_or(&more_specific.dsn, &less_specific.dsn),
        rate_limit_window: more_specific
            .rate_limit_window
            .or(less_specific.rate_limit_window),
        rate_limit_count: more_specific
            .rate_limit_count
            .or(less_specific.rate_limit_count),
        project: non_empty_or(&more_specific.project, &less_specific.project),
        track_deployments: more_specific
            .track_deployments
            .or(less_specific.track_deployments),
    }
}

/// Integer fields that also accept integral floats such as `1000.0`
///
/// JSON Schema's `integer` type admits any number with a zero fractional
/// part, so anything the schema gate lets through must decode here too.
mod whole_number {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Number;

    // 2^63, the first float above every `i64`
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(number) = Option::<Number>::deserialize(deserializer)? else {
            return Ok(None);
        };
        to_i64(&number)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{number} is not a whole number within i64 range")))
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "The float is integral and range checked"
    )]
    fn to_i64(number: &Number) -> Option<i64> {
        if let Some(value) = number.as_i64() {
            return Some(value);
        }
        let value = number.as_f64()?;
        (value.fract() == 0.0 && value >= -I64_BOUND && value < I64_BOUND).then(|| value as i64)
    }
}

fn non_empty_or(preferred: &str, fallback: &str) -> String {
    if preferred.is_empty() {
        fallback.to_owned()
    } else {
        preferred.to_owned()
    }
}

/// Process-wide Sentry configuration, the root of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(flatten)]
    pub base: BaseConfig,

    /// Token used by the Terraform provider; enables resource rendering
    #[serde(default)]
    pub auth_token: String,

    /// Sentry API base URL, empty means the provider default
    #[serde(default)]
    pub base_url: String,

    /// Sentry organization slug
    #[serde(default)]
    pub organization: String,
}

impl Default for GlobalConfig {
    #[inline]
    fn default() -> Self {
        Self {
            base: BaseConfig {
                track_deployments: Some(true),
                ..BaseConfig::default()
            },
            auth_token: String::new(),
            base_url: String::new(),
            organization: String::new(),
        }
    }
}

/// Site level overrides plus the site's component overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub base: BaseConfig,

    /// Component overrides keyed by component name
    #[serde(skip)]
    pub components: HashMap<String, SiteComponentConfig>,
}

impl SiteConfig {
    /// Merge this site over the global config
    ///
    /// The component map is carried over untouched.
    #[must_use]
    #[inline]
    pub fn extend_global(&self, global: &GlobalConfig) -> Self {
        Self {
            base: self.base.extend(&global.base),
            components: self.components.clone(),
        }
    }

    /// Stored override for a component, if one was set
    #[must_use]
    #[inline]
    pub fn component(&self, name: &str) -> Option<&SiteComponentConfig> {
        self.components.get(name)
    }
}

/// Most specific override tier: one component within one site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteComponentConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
}

impl SiteComponentConfig {
    /// Merge this component override over an (already resolved) site config
    #[must_use]
    #[inline]
    pub fn extend_site(&self, site: &SiteConfig) -> Self {
        Self {
            base: self.base.extend(&site.base),
        }
    }
}

/// General component information, independent of any site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Component version, supplied by the host rather than the user
    #[serde(skip)]
    pub version: String,
}

impl ComponentConfig {
    /// Create a component config seeded with its version
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(version: S) -> Self {
        Self {
            version: version.into(),
        }
    }
}
