//! Resolution of effective configuration for a site or site component

use super::state::PluginState;
use crate::config::{SiteComponentConfig, SiteConfig};

impl PluginState {
    /// Effective config for a site: the stored site merged over global
    ///
    /// An unknown site resolves to the global values. The returned component
    /// map is the site's stored, unmerged map.
    #[must_use]
    #[inline]
    pub fn resolve_site_config(&self, site: &str) -> SiteConfig {
        match self.site(site) {
            Some(stored) => stored.extend_global(self.global()),
            None => SiteConfig::default().extend_global(self.global()),
        }
    }

    /// Effective config for a component within a site
    ///
    /// Walks global → site → site component. Unknown names fall back to
    /// empty overrides.
    #[must_use]
    #[inline]
    pub fn resolve_site_component_config(&self, site: &str, component: &str) -> SiteComponentConfig {
        let site_config = self.resolve_site_config(site);
        match site_config.component(component) {
            Some(stored) => stored.extend_site(&site_config),
            None => SiteComponentConfig::default().extend_site(&site_config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseConfig, GlobalConfig};

    fn state() -> PluginState {
        let mut state = PluginState::new();
        state.replace_global(GlobalConfig {
            base: BaseConfig {
                dsn: "https://global@sentry.io/1".to_owned(),
                project: "global-project".to_owned(),
                rate_limit_window: Some(60),
                rate_limit_count: Some(100),
                track_deployments: Some(true),
            },
            auth_token: "token".to_owned(),
            ..GlobalConfig::default()
        });
        state.replace_site(
            "s1",
            SiteConfig {
                base: BaseConfig {
                    project: "site-project".to_owned(),
                    rate_limit_count: Some(0),
                    ..BaseConfig::default()
                },
                ..SiteConfig::default()
            },
        );
        state.upsert_site_component(
            "s1",
            "api",
            SiteComponentConfig {
                base: BaseConfig {
                    dsn: "https://api@sentry.io/2".to_owned(),
                    track_deployments: Some(false),
                    ..BaseConfig::default()
                },
            },
        );
        state
    }

    #[test]
    fn unknown_site_is_global() {
        let state = state();
        let resolved = state.resolve_site_config("unknown");
        assert_eq!(resolved.base, state.global().base);
        assert!(resolved.components.is_empty());
    }

    #[test]
    fn site_overrides_global() {
        let resolved = state().resolve_site_config("s1");
        assert_eq!(resolved.base.project, "site-project");
        assert_eq!(resolved.base.dsn, "https://global@sentry.io/1");
        assert_eq!(resolved.base.rate_limit_count, Some(0));
        assert_eq!(resolved.base.rate_limit_window, Some(60));
    }

    #[test]
    fn component_walks_all_tiers() {
        let resolved = state().resolve_site_component_config("s1", "api");
        assert_eq!(resolved.base.dsn, "https://api@sentry.io/2");
        assert_eq!(resolved.base.project, "site-project");
        assert_eq!(resolved.base.rate_limit_window, Some(60));
        assert_eq!(resolved.base.rate_limit_count, Some(0));
        assert_eq!(resolved.base.track_deployments, Some(false));
    }

    #[test]
    fn unknown_component_is_site() {
        let state = state();
        let resolved = state.resolve_site_component_config("s1", "web");
        assert_eq!(resolved.base, state.resolve_site_config("s1").base);
    }

    #[test]
    fn resolution_does_not_mutate_state() {
        let state = state();
        let before = state.clone();
        let first = state.resolve_site_component_config("s1", "api");
        let second = state.resolve_site_component_config("s1", "api");
        assert_eq!(first, second);
        assert_eq!(state, before);
    }
}
