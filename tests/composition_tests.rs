//! End-to-end tests driving the plugin the way a composition host does
//!
//! The host reads a YAML composition, then calls `configure`, the `set_*`
//! operations for every block and finally the renders.

use anyhow::Result;
use sentry_composer_plugin::SentryPlugin;
use serde_json::Value;

const COMPOSITION: &str = r#"
global:
  environment: production
  sentry:
    auth_token: secret
    organization: acme
    project: platform
    rate_limit_window: 21600
    rate_limit_count: 100
sites:
  - identifier: eu
    sentry:
      project: shop-eu
    components:
      - name: api
        sentry:
          rate_limit_count: 0
          track_deployments: false
      - name: web
  - identifier: us
    components:
      - name: api
components:
  - name: api
    version: 1.4.0
  - name: web
    version: 2.0.1
"#;

fn load_composition(source: &str) -> Result<(SentryPlugin, Value)> {
    let composition: Value = serde_yaml::from_str(source)?;
    let mut plugin = SentryPlugin::new();

    let environment = composition["global"]["environment"].as_str().unwrap_or_default();
    plugin.configure(environment, "")?;
    plugin.set_global_config(&composition["global"]["sentry"])?;

    for component in composition["components"].as_array().into_iter().flatten() {
        let name = component["name"].as_str().unwrap_or_default();
        let version = component["version"].as_str().unwrap_or_default();
        plugin.set_component_config(name, version, &Value::Null)?;
    }

    for site in composition["sites"].as_array().into_iter().flatten() {
        let site_name = site["identifier"].as_str().unwrap_or_default();
        plugin.set_site_config(site_name, &site["sentry"])?;

        for component in site["components"].as_array().into_iter().flatten() {
            let name = component["name"].as_str().unwrap_or_default();
            plugin.set_site_component_config(site_name, name, &component["sentry"])?;
        }
    }

    Ok((plugin, composition))
}

#[test]
fn test_composition_loads() -> Result<()> {
    let (plugin, _) = load_composition(COMPOSITION)?;

    assert!(plugin.is_enabled());
    assert_eq!(plugin.state().site_count(), 2);
    assert_eq!(plugin.state().component_count(), 2);
    assert_eq!(plugin.environment(), "production");
    Ok(())
}

#[test]
fn test_composition_renders_site_overrides() -> Result<()> {
    let (plugin, _) = load_composition(COMPOSITION)?;

    let api = plugin.render_component("eu", "api")?;
    assert_eq!(api.variables, "sentry_dsn = sentry_key.api.dsn_secret");
    assert!(api.resources.contains("project = \"shop-eu\""));
    assert!(api.resources.contains("name = \"eu_api\""));
    assert!(api.resources.contains("rate_limit_window = 21600"));
    assert!(api.resources.contains("rate_limit_count = 0"));
    assert!(!api.resources.contains("null_resource"));

    let web = plugin.render_component("eu", "web")?;
    assert!(web.resources.contains("project = \"shop-eu\""));
    assert!(web.resources.contains("rate_limit_count = 100"));
    assert!(web.resources.contains("version = \"2.0.1\""));
    Ok(())
}

#[test]
fn test_composition_site_without_sentry_block_inherits_global() -> Result<()> {
    let (plugin, _) = load_composition(COMPOSITION)?;

    let api = plugin.render_component("us", "api")?;
    assert!(api.resources.contains("project = \"platform\""));
    assert!(api.resources.contains("name = \"us_api\""));
    assert!(api.resources.contains("-e production"));
    Ok(())
}

#[test]
fn test_composition_with_unknown_key_fails() {
    let broken = COMPOSITION.replace("project: shop-eu", "projects: shop-eu");
    let err = load_composition(&broken).err();
    let message = err.map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("site 'eu'"), "{message}");
}

#[test]
fn test_composition_without_sentry_is_disabled() -> Result<()> {
    let (plugin, _) = load_composition(
        r#"
global:
  environment: test
sites:
  - identifier: eu
    components:
      - name: api
components:
  - name: api
    version: 1.0.0
"#,
    )?;

    assert!(!plugin.is_enabled());
    assert_eq!(plugin.render_providers("eu")?, "");
    assert_eq!(plugin.render_resources("eu")?, "");
    let api = plugin.render_component("eu", "api")?;
    assert_eq!(api.variables, "sentry_dsn = \"\"");
    assert_eq!(api.resources, "");
    Ok(())
}
