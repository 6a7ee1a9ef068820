//! Template fill from the asset bundle

use crate::assets::AssetSource;
use crate::error::{PluginError, PluginResult};
use crate::render::quote::hcl_string_filter;
use serde::Serialize;
use std::error::Error as _;
use tera::{Context, Tera};

/// Render a bundled template with a serializable context
///
/// Templates get the `hcl_string` filter for emitting HCL string literals.
///
/// # Errors
///
/// Returns an error if:
/// - The template is missing from the bundle (`PluginError::Asset`)
/// - The context cannot be serialized or the template fails to render
#[inline]
pub fn fill<C: Serialize>(assets: &dyn AssetSource, name: &str, context: &C) -> PluginResult<String> {
    let source = assets
        .read_to_string(name)
        .map_err(|e| PluginError::asset(name, e.to_string()))?;

    let context = Context::from_serialize(context)
        .map_err(|e| PluginError::template(name, format!("Invalid template context: {e}")))?;

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.register_filter("hcl_string", hcl_string_filter);
    tera.add_raw_template(name, &source)
        .map_err(|e| PluginError::template(name, render_chain(&e)))?;

    tera.render(name, &context)
        .map_err(|e| PluginError::template(name, render_chain(&e)))
}

/// Flatten a tera error and its sources into one message
fn render_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::assets::MockAssets;
    use serde_json::json;

    #[test]
    fn fills_placeholders() {
        let assets = MockAssets::new().with_file("t", "hello {{ name }}");
        let rendered = fill(&assets, "t", &json!({ "name": "sentry" })).unwrap();
        assert_eq!(rendered, "hello sentry");
    }

    #[test]
    fn hcl_string_filter_is_available() {
        let assets = MockAssets::new().with_file("t", "name = {{ name | hcl_string }}");
        let rendered = fill(&assets, "t", &json!({ "name": "a\"b" })).unwrap();
        assert_eq!(rendered, r#"name = "a\"b""#);
    }

    #[test]
    fn missing_template_is_an_asset_error() {
        let assets = MockAssets::new();
        let err = fill(&assets, "t", &json!({})).unwrap_err();
        assert!(matches!(err, PluginError::Asset { .. }));
    }

    #[test]
    fn broken_template_is_a_template_error() {
        let assets = MockAssets::new().with_file("t", "{{ missing_var }}");
        let err = fill(&assets, "t", &json!({})).unwrap_err();
        assert!(matches!(err, PluginError::Template { .. }));
        assert!(err.to_string().contains("missing_var"), "{err}");
    }
}
