//! JSON Schema validation for raw host configuration

use crate::assets::{
    AssetSource, GLOBAL_CONFIG_SCHEMA, SITE_COMPONENT_CONFIG_SCHEMA, SITE_CONFIG_SCHEMA,
};
use crate::error::{PluginError, PluginResult, Tier};
use jsonschema::{Draft, Validator};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// The schema documents handed to the host, one per validated tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSchema {
    pub global_config_schema: Value,
    pub site_config_schema: Value,
    pub site_component_config_schema: Value,
}

impl ValidationSchema {
    /// Load all three schema documents from the asset bundle
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A schema document is missing from the bundle
    /// - A schema document is not valid JSON
    #[inline]
    pub fn load(assets: &dyn AssetSource) -> PluginResult<Self> {
        Ok(Self {
            global_config_schema: load_schema(assets, GLOBAL_CONFIG_SCHEMA)?,
            site_config_schema: load_schema(assets, SITE_CONFIG_SCHEMA)?,
            site_component_config_schema: load_schema(assets, SITE_COMPONENT_CONFIG_SCHEMA)?,
        })
    }
}

/// What is being validated, used to pick the schema and label errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationTarget<'a> {
    pub tier: Tier,
    pub site: Option<&'a str>,
    pub component: Option<&'a str>,
}

impl<'a> ValidationTarget<'a> {
    /// The global tier
    #[must_use]
    #[inline]
    pub const fn global() -> Self {
        Self {
            tier: Tier::Global,
            site: None,
            component: None,
        }
    }

    /// A site block
    #[must_use]
    #[inline]
    pub const fn site(site: &'a str) -> Self {
        Self {
            tier: Tier::Site,
            site: Some(site),
            component: None,
        }
    }

    /// A component block within a site
    #[must_use]
    #[inline]
    pub const fn site_component(site: &'a str, component: &'a str) -> Self {
        Self {
            tier: Tier::SiteComponent,
            site: Some(site),
            component: Some(component),
        }
    }

    /// Name of the schema document for this tier, if the tier has one
    #[must_use]
    #[inline]
    pub const fn schema_name(&self) -> Option<&'static str> {
        match self.tier {
            Tier::Global => Some(GLOBAL_CONFIG_SCHEMA),
            Tier::Site => Some(SITE_CONFIG_SCHEMA),
            Tier::SiteComponent => Some(SITE_COMPONENT_CONFIG_SCHEMA),
            Tier::Component => None,
        }
    }
}

/// Load and parse a schema document from the asset bundle
///
/// # Errors
///
/// Returns an error if:
/// - The schema document is missing from the bundle
/// - The schema document is not valid JSON
#[inline]
pub fn load_schema(assets: &dyn AssetSource, name: &str) -> PluginResult<Value> {
    let schema_str = assets
        .read_to_string(name)
        .map_err(|e| PluginError::asset(name, e.to_string()))?;

    serde_json::from_str(&schema_str)
        .map_err(|e| PluginError::schema(name, format!("Failed to parse JSON schema: {e}")))
}

/// Load and compile a schema document
///
/// # Errors
///
/// Returns an error if:
/// - The schema document cannot be loaded
/// - The schema document is not a valid draft 7 schema
#[inline]
pub fn get_schema(assets: &dyn AssetSource, name: &str) -> PluginResult<Validator> {
    let schema = load_schema(assets, name)?;

    jsonschema::options()
        .with_draft(Draft::Draft7)
        .build(&schema)
        .map_err(|e| PluginError::schema(name, format!("Failed to compile JSON schema: {e}")))
}

/// Compiled validators, one per schema document, built on first use
///
/// A failed load or compile is not cached, so the next call retries.
#[derive(Default)]
pub struct SchemaCache {
    validators: HashMap<&'static str, Validator>,
}

impl SchemaCache {
    /// Create an empty cache
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of compiled validators held
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validator has been compiled yet
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Drop every compiled validator
    #[inline]
    pub fn clear(&mut self) {
        self.validators.clear();
    }

    /// Validate raw host input, compiling the tier's schema on first use
    ///
    /// Behaves like [`validate`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The schema document cannot be loaded or compiled
    /// - The input does not conform to the schema (`PluginError::InvalidConfig`)
    #[inline]
    pub fn validate(
        &mut self,
        assets: &dyn AssetSource,
        target: &ValidationTarget<'_>,
        data: &Value,
    ) -> PluginResult<()> {
        let Some(name) = target.schema_name() else {
            return Ok(());
        };

        let validator = match self.validators.entry(name) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(schema = name, "compiling validation schema");
                entry.insert(get_schema(assets, name)?)
            }
        };
        check(validator, target, data)
    }
}

/// Validate raw host input against the schema for `target`
///
/// `null` input is treated as an empty mapping. Tiers without a schema
/// accept anything. The schema is loaded and compiled on every call; see
/// [`SchemaCache`] for repeated validation.
///
/// # Errors
///
/// Returns an error if:
/// - The schema document cannot be loaded or compiled
/// - The input does not conform to the schema (`PluginError::InvalidConfig`)
#[inline]
pub fn validate(
    assets: &dyn AssetSource,
    target: &ValidationTarget<'_>,
    data: &Value,
) -> PluginResult<()> {
    let Some(name) = target.schema_name() else {
        return Ok(());
    };

    check(&get_schema(assets, name)?, target, data)
}

fn check(schema: &Validator, target: &ValidationTarget<'_>, data: &Value) -> PluginResult<()> {
    let empty = Value::Object(Map::new());
    let instance = if data.is_null() { &empty } else { data };

    let error_messages: Vec<String> = schema
        .iter_errors(instance)
        .map(|e| format!("  - Path '{}': {}", e.instance_path, e))
        .collect();

    if error_messages.is_empty() {
        return Ok(());
    }

    debug!(
        tier = %target.tier,
        site = target.site,
        component = target.component,
        failures = error_messages.len(),
        "configuration rejected by schema"
    );

    Err(PluginError::invalid_config(
        target.tier,
        target.site,
        target.component,
        error_messages,
    ))
}
