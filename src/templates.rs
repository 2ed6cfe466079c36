//! # Template Store Module
//!
//! Resolves and loads templates from a configuration-named template set:
//! `<templateRoot>/<configName>/<fileName>` for partials, static action
//! templates, and fan-out rule templates, plus `<templateRoot>/_common/` for
//! the license bodies shared between configurations.
//!
//! The store is stateless per invocation: nothing is cached across runs, and
//! a missing template is fatal before anything depending on it is written.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Error;
use crate::storage::Storage;

/// Shared directory under the template root holding license bodies.
pub const COMMON_SET: &str = "_common";

/// Loads templates for one configuration's template set.
pub struct TemplateStore {
    storage: Arc<dyn Storage>,
    root: PathBuf,
    config_name: String,
}

impl TemplateStore {
    pub fn new(storage: Arc<dyn Storage>, root: impl Into<PathBuf>, config_name: &str) -> Self {
        Self {
            storage,
            root: root.into(),
            config_name: config_name.to_string(),
        }
    }

    /// Path of a template within this configuration's set.
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.root.join(&self.config_name).join(file)
    }

    /// Load one template body from this configuration's set.
    pub fn load_template(&self, file: &str) -> Result<String, Error> {
        self.read(self.resolve(file))
    }

    /// Load a template shared between configurations (license bodies).
    pub fn load_common(&self, file: &str) -> Result<String, Error> {
        self.read(self.root.join(COMMON_SET).join(file))
    }

    /// Load every partial, keyed by name. Partial values in the
    /// configuration are file names; the returned map carries their text.
    pub fn load_partials(
        &self,
        partials: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, Error> {
        let mut loaded = BTreeMap::new();
        for (name, file) in partials {
            loaded.insert(name.clone(), self.load_template(file)?);
        }
        Ok(loaded)
    }

    fn read(&self, path: PathBuf) -> Result<String, Error> {
        match self.storage.read_text(&path) {
            Ok(text) => Ok(text),
            Err(Error::Storage { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Err(Error::TemplateNotFound { path })
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("root", &self.root)
            .field("config_name", &self.config_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;
    use std::path::Path;

    fn store_with(files: &[(&str, &str)]) -> TemplateStore {
        let storage = MemStorage::new();
        for (path, content) in files {
            storage.seed(*path, *content);
        }
        TemplateStore::new(Arc::new(storage), "templates", "ts")
    }

    #[test]
    fn test_resolves_into_config_set() {
        let store = store_with(&[("templates/ts/index.tpl", "body")]);
        assert_eq!(store.load_template("index.tpl").unwrap(), "body");
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let store = store_with(&[]);
        let err = store.load_template("absent.tpl").unwrap_err();
        match err {
            Error::TemplateNotFound { path } => {
                assert_eq!(path, Path::new("templates/ts/absent.tpl"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_partials_load_by_name() {
        let store = store_with(&[("templates/ts/h.tpl", "header text")]);
        let mut partials = BTreeMap::new();
        partials.insert("header".to_string(), "h.tpl".to_string());
        let loaded = store.load_partials(&partials).unwrap();
        assert_eq!(
            loaded.get("header").map(String::as_str),
            Some("header text")
        );
    }

    #[test]
    fn test_common_set_for_license_bodies() {
        let store = store_with(&[("templates/_common/LICENSE", "Apache License")]);
        assert_eq!(store.load_common("LICENSE").unwrap(), "Apache License");
    }
}
