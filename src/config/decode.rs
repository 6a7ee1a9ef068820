//! Decoding of validated host input onto typed configuration

use crate::error::{PluginError, PluginResult, Tier};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode `data` onto a copy of `defaults`
///
/// Keys absent from `data` keep their default value; keys present in
/// `data` win, including explicit `false` and `0`. A JSON `null` for an
/// optional field decodes to `None`.
///
/// # Errors
///
/// Returns an error if:
/// - `defaults` does not serialize to a mapping
/// - A value in `data` does not fit the target field type
#[inline]
pub fn decode_onto<T>(tier: Tier, defaults: &T, data: &Map<String, Value>) -> PluginResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut seed = match serde_json::to_value(defaults) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(PluginError::decode(
                tier,
                format!("defaults must serialize to a mapping, got {other}"),
            ));
        }
        Err(e) => return Err(PluginError::decode(tier, e.to_string())),
    };

    for (key, value) in data {
        seed.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(seed)).map_err(|e| PluginError::decode(tier, e.to_string()))
}

/// View raw host input as a mapping, treating `null` as empty
///
/// Callers validate first, so anything other than an object or `null` has
/// already been rejected by the schema.
#[must_use]
#[inline]
pub fn as_mapping(data: &Value) -> Map<String, Value> {
    match *data {
        Value::Object(ref map) => map.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
            Map::new()
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::config::model::{ComponentConfig, GlobalConfig, SiteConfig};
    use serde_json::json;

    #[test]
    fn empty_input_keeps_defaults() {
        let decoded =
            decode_onto(Tier::Global, &GlobalConfig::default(), &Map::new()).unwrap();
        assert_eq!(decoded, GlobalConfig::default());
    }

    #[test]
    fn explicit_false_beats_default_true() {
        let data = as_mapping(&json!({ "track_deployments": false }));
        let decoded = decode_onto(Tier::Global, &GlobalConfig::default(), &data).unwrap();
        assert_eq!(decoded.base.track_deployments, Some(false));
    }

    #[test]
    fn null_clears_optional_field() {
        let data = as_mapping(&json!({ "track_deployments": null }));
        let decoded = decode_onto(Tier::Global, &GlobalConfig::default(), &data).unwrap();
        assert_eq!(decoded.base.track_deployments, None);
    }

    #[test]
    fn site_decode_starts_with_no_components() {
        let data = as_mapping(&json!({ "dsn": "https://key@sentry.io/1" }));
        let decoded = decode_onto(Tier::Site, &SiteConfig::default(), &data).unwrap();
        assert_eq!(decoded.base.dsn, "https://key@sentry.io/1");
        assert!(decoded.components.is_empty());
    }

    #[test]
    fn wrong_type_is_a_decode_error() {
        let data = as_mapping(&json!({ "rate_limit_window": "soon" }));
        let err = decode_onto(Tier::Site, &SiteConfig::default(), &data).unwrap_err();
        assert!(matches!(err, PluginError::Decode { tier: Tier::Site, .. }));
    }

    #[test]
    fn component_ignores_user_fields() {
        let data = as_mapping(&json!({ "anything": 1 }));
        let decoded =
            decode_onto(Tier::Component, &ComponentConfig::new("1.2.3"), &data).unwrap();
        assert_eq!(decoded, ComponentConfig::default());
    }

    #[test]
    fn non_object_is_empty_mapping() {
        assert!(as_mapping(&Value::Null).is_empty());
        assert!(as_mapping(&json!([1, 2])).is_empty());
    }
}
