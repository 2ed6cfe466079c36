//! # Configuration Module
//!
//! Declares a single generation run: where output goes, which defaults flow
//! into the model transformer and every render context, which templates are
//! rendered statically, which directories and touch files are pre-created,
//! and which fan-out rules apply per API, per data-model entity, and per
//! operation.
//!
//! Configurations are data, not code. They are loaded from YAML or JSON and
//! keep the camelCase field names of the on-disk format (`outputDir`,
//! `perApi`, ...).
//!
//! ```yaml
//! outputDir: ./out/
//! defaults:
//!   title: Example
//! partials:
//!   header: header.tpl
//! transformations:
//!   - input: index.tpl
//!     output: index.out
//! directories:
//!   - models
//! touch: ".gitkeep\n"
//! apache: true
//! perApi:
//!   - input: api.tpl
//!     output: "{{name}}.out"
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

/// A static transformation: one template rendered once per run to one
/// literally-named output file.
///
/// `input` is a file name relative to the configuration's template set. The
/// loaded template body is attached by the engine for the duration of the
/// run; it is not part of the on-disk format.
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    /// Template file name within the template set. Absent means the action
    /// is a placeholder and renders nothing.
    pub input: Option<String>,
    /// Output file name relative to the run's output root. Literal, never
    /// templated.
    pub output: String,
}

/// A fan-out rule: one template rendered once per item of a fan-out
/// collection, with an output *name template* rendered per item as well.
#[derive(Debug, Clone, Deserialize)]
pub struct FanoutRule {
    /// Template file name within the template set.
    pub input: String,
    /// Output path template, rendered against each item's context.
    pub output: String,
}

/// Declaration of a single generation run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationConfig {
    /// Root directory under which `<configName>/` is created.
    #[serde(rename = "outputDir", default = "default_output_dir")]
    pub output_dir: String,

    /// Free-form options passed to the model transformer and overlaid into
    /// every fan-out context. `defaults.verbose` toggles progress logging.
    #[serde(default)]
    pub defaults: serde_json::Map<String, Value>,

    /// Partial templates, name → file name within the template set.
    #[serde(default)]
    pub partials: BTreeMap<String, String>,

    /// Static actions, rendered in order.
    #[serde(default)]
    pub transformations: Vec<Action>,

    /// Subdirectories to create under the output root before any write.
    #[serde(default)]
    pub directories: Vec<String>,

    /// Optional template rendering to a newline-separated list of relative
    /// paths that must exist; missing ones are created empty.
    #[serde(default)]
    pub touch: Option<String>,

    /// Selects the Apache license body over the Unlicense body.
    #[serde(default)]
    pub apache: bool,

    /// One output file per API per rule.
    #[serde(rename = "perApi", default)]
    pub per_api: Vec<FanoutRule>,

    /// One output file per data-model entity per rule.
    #[serde(rename = "perModel", default)]
    pub per_model: Vec<FanoutRule>,

    /// One output file per operation per rule.
    #[serde(rename = "perOperation", default)]
    pub per_operation: Vec<FanoutRule>,
}

fn default_output_dir() -> String {
    "./out/".to_string()
}

impl GenerationConfig {
    /// Load a configuration from a YAML or JSON file, chosen by extension.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let is_yaml = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
        }
    }

    /// Whether `defaults.verbose` is set truthy.
    pub fn verbose(&self) -> bool {
        self.defaults
            .get("verbose")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config_json() {
        let raw = r#"{
            "outputDir": "./build/",
            "defaults": { "title": "X", "verbose": true },
            "partials": { "header": "header.tpl" },
            "transformations": [ { "input": "index.tpl", "output": "index.out" } ],
            "directories": [ "models" ],
            "touch": "a.txt\nb.txt\n",
            "apache": true,
            "perApi": [ { "input": "api.tpl", "output": "{{name}}.out" } ]
        }"#;
        let config: GenerationConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.output_dir, "./build/");
        assert!(config.verbose());
        assert_eq!(
            config.partials.get("header").map(String::as_str),
            Some("header.tpl")
        );
        assert_eq!(config.transformations.len(), 1);
        assert_eq!(config.directories, vec!["models".to_string()]);
        assert!(config.apache);
        assert_eq!(config.per_api.len(), 1);
        assert!(config.per_model.is_empty());
        assert!(config.per_operation.is_empty());
    }

    #[test]
    fn test_defaults_when_fields_absent() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.output_dir, "./out/");
        assert!(!config.apache);
        assert!(!config.verbose());
        assert!(config.touch.is_none());
        assert!(config.transformations.is_empty());
    }

    #[test]
    fn test_parse_yaml_config() {
        let raw = "outputDir: ./out/\ndefaults:\n  title: Y\ntransformations:\n  - input: main.tpl\n    output: main.out\n";
        let config: GenerationConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config.transformations[0].output, "main.out");
        assert_eq!(
            config.defaults.get("title").and_then(Value::as_str),
            Some("Y")
        );
    }
}
