//! Quoting of values embedded in rendered Terraform

use crate::assets::RESOURCES_TEMPLATE;
use crate::error::{PluginError, PluginResult};
use serde_json::Value;
use std::collections::HashMap;

/// Quote a value as an HCL string literal
///
/// Escapes like a JSON string, then doubles the `${` and `%{` template
/// sequences so they render literally.
#[must_use]
#[inline]
pub fn hcl_string(value: &str) -> String {
    Value::String(value.to_owned())
        .to_string()
        .replace("${", "$${")
        .replace("%{", "%%{")
}

/// Tera filter form of [`hcl_string`]
///
/// # Errors
///
/// Returns an error if:
/// - The filtered value is not a string
#[inline]
pub fn hcl_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    value
        .as_str()
        .map(|text| Value::String(hcl_string(text)))
        .ok_or_else(|| tera::Error::msg(format!("hcl_string expects a string, got {value}")))
}

/// Build the `sentry-cli` command that records a deployment
///
/// Every argument is shell quoted.
///
/// # Errors
///
/// Returns an error if:
/// - An argument contains a NUL byte and cannot be quoted
#[inline]
pub fn deploy_command(
    organization: &str,
    project: &str,
    version: &str,
    environment: &str,
) -> PluginResult<String> {
    let args = [
        "sentry-cli", "releases", "--org", organization, "--project", project, "deploys",
        version, "new", "-e", environment,
    ];
    shlex::try_join(args).map_err(|e| {
        PluginError::template(RESOURCES_TEMPLATE, format!("Cannot quote deploy command: {e}"))
    })
}
