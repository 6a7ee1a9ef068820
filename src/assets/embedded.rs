//! Embedded asset bundle compiled into the crate

use super::{
    AssetSource, GLOBAL_CONFIG_SCHEMA, PROVIDER_TEMPLATE, RESOURCES_TEMPLATE,
    SITE_COMPONENT_CONFIG_SCHEMA, SITE_CONFIG_SCHEMA,
};
use std::io;

const BUNDLE: &[(&str, &str)] = &[
    (
        GLOBAL_CONFIG_SCHEMA,
        include_str!("../../schemas/global-config.schema.json"),
    ),
    (
        SITE_CONFIG_SCHEMA,
        include_str!("../../schemas/site-config.schema.json"),
    ),
    (
        SITE_COMPONENT_CONFIG_SCHEMA,
        include_str!("../../schemas/site-component-config.schema.json"),
    ),
    (
        PROVIDER_TEMPLATE,
        include_str!("../../templates/provider.tf.tera"),
    ),
    (
        RESOURCES_TEMPLATE,
        include_str!("../../templates/resources.tf.tera"),
    ),
];

/// Production implementation of `AssetSource`
///
/// Serves the schema documents and templates that were compiled into the
/// crate. Never touches the filesystem at runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    /// Create a new `EmbeddedAssets` instance
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    fn lookup(name: &str) -> Option<&'static str> {
        BUNDLE
            .iter()
            .find(|&&(asset, _)| asset == name)
            .map(|&(_, contents)| contents)
    }
}

impl AssetSource for EmbeddedAssets {
    #[inline]
    fn read_to_string(&self, name: &str) -> io::Result<String> {
        Self::lookup(name).map(str::to_owned).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("asset not bundled: {name}"),
            )
        })
    }

    #[inline]
    fn exists(&self, name: &str) -> bool {
        Self::lookup(name).is_some()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;

    #[test]
    fn every_bundled_asset_is_readable() {
        let assets = EmbeddedAssets::new();
        for &(name, _) in BUNDLE {
            assert!(assets.exists(name), "{name} should exist");
            assert!(!assets.read_to_string(name).unwrap().is_empty());
        }
    }

    #[test]
    fn unknown_asset_is_not_found() {
        let assets = EmbeddedAssets::new();
        assert!(!assets.exists("templates/missing.tera"));
        let err = assets.read_to_string("templates/missing.tera").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
