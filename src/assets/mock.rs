//! Mock asset source for testing

use super::{AssetSource, EmbeddedAssets};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

/// In-memory implementation of `AssetSource` for testing
///
/// # Example
/// ```
/// use sentry_composer_plugin::assets::{AssetSource, MockAssets, PROVIDER_TEMPLATE};
///
/// let assets = MockAssets::bundled().without_file(PROVIDER_TEMPLATE);
/// assert!(!assets.exists(PROVIDER_TEMPLATE));
/// ```
#[derive(Clone, Default)]
pub struct MockAssets {
    files: Arc<RwLock<HashMap<String, String>>>,
}

impl MockAssets {
    /// Create an empty `MockAssets`
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `MockAssets` pre-filled with every embedded asset
    #[must_use]
    #[inline]
    pub fn bundled() -> Self {
        let embedded = EmbeddedAssets::new();
        let names = [
            super::GLOBAL_CONFIG_SCHEMA,
            super::SITE_CONFIG_SCHEMA,
            super::SITE_COMPONENT_CONFIG_SCHEMA,
            super::PROVIDER_TEMPLATE,
            super::RESOURCES_TEMPLATE,
        ];
        let files = names
            .iter()
            .filter_map(|&name| {
                embedded
                    .read_to_string(name)
                    .ok()
                    .map(|contents| (name.to_owned(), contents))
            })
            .collect();
        Self {
            files: Arc::new(RwLock::new(files)),
        }
    }

    /// Add or replace an asset (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(name.to_owned(), contents.to_owned());
        }
        self
    }

    /// Remove an asset (builder pattern)
    #[must_use]
    #[inline]
    pub fn without_file(self, name: &str) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.remove(name);
        }
        self
    }
}

impl AssetSource for MockAssets {
    #[inline]
    fn read_to_string(&self, name: &str) -> io::Result<String> {
        let files = self
            .files
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        files.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("asset not found: {name}"))
        })
    }

    #[inline]
    fn exists(&self, name: &str) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(name))
            .unwrap_or(false)
    }
}
