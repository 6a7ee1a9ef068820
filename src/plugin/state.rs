//! Process-lifetime store of decoded configuration

use crate::config::{ComponentConfig, GlobalConfig, SiteComponentConfig, SiteConfig};
use std::collections::HashMap;

/// The global config plus per-site and per-component configs, keyed by name
///
/// Entries are replaced wholesale; nothing is ever deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginState {
    global: GlobalConfig,
    sites: HashMap<String, SiteConfig>,
    components: HashMap<String, ComponentConfig>,
}

impl PluginState {
    /// Create an empty state with the default global config
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored global config
    #[must_use]
    #[inline]
    pub const fn global(&self) -> &GlobalConfig {
        &self.global
    }

    /// Stored (unresolved) site config
    #[must_use]
    #[inline]
    pub fn site(&self, site: &str) -> Option<&SiteConfig> {
        self.sites.get(site)
    }

    /// Stored component config
    #[must_use]
    #[inline]
    pub fn component(&self, component: &str) -> Option<&ComponentConfig> {
        self.components.get(component)
    }

    /// Number of sites known to the store
    #[must_use]
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Number of registered components
    #[must_use]
    #[inline]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Replace the global config
    #[inline]
    pub fn replace_global(&mut self, config: GlobalConfig) {
        self.global = config;
    }

    /// Replace a site entry, including its component map
    #[inline]
    pub fn replace_site(&mut self, site: &str, config: SiteConfig) {
        self.sites.insert(site.to_owned(), config);
    }

    /// Store a component override under a site
    ///
    /// Creates the site with default settings when it is not known yet.
    /// Sibling components under the same site are left alone.
    #[inline]
    pub fn upsert_site_component(
        &mut self,
        site: &str,
        component: &str,
        config: SiteComponentConfig,
    ) {
        self.sites
            .entry(site.to_owned())
            .or_default()
            .components
            .insert(component.to_owned(), config);
    }

    /// Replace a component entry
    #[inline]
    pub fn replace_component(&mut self, component: &str, config: ComponentConfig) {
        self.components.insert(component.to_owned(), config);
    }
}
