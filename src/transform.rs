//! # Transform Module
//!
//! The seam between the raw source description and the canonical render
//! model. The transformation algorithm itself is an external collaborator:
//! the engine only depends on the [`ModelTransformer`] trait and treats the
//! returned model as opaque JSON.
//!
//! [`DefaultTransformer`] is the bundled passthrough: it overlays the raw
//! document over the run options so configuration defaults are visible to
//! every template, which is what a full adaptor does as its final step.

use serde_json::{Map, Value};

/// Produces the canonical render model from the raw input description.
///
/// `options` is the configuration's `defaults` map with the configuration
/// name injected under `configName`. Failures abort the run before any
/// output is written.
pub trait ModelTransformer: Send + Sync {
    fn transform(&self, raw: &Value, options: &Map<String, Value>) -> anyhow::Result<Value>;
}

/// Passthrough transformer: the canonical model is the raw document merged
/// over the options map, raw keys winning on collision.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTransformer;

impl ModelTransformer for DefaultTransformer {
    fn transform(&self, raw: &Value, options: &Map<String, Value>) -> anyhow::Result<Value> {
        let mut model = options.clone();
        match raw {
            Value::Object(map) => {
                for (key, value) in map {
                    model.insert(key.clone(), value.clone());
                }
            }
            Value::Null => {}
            other => anyhow::bail!("raw input must be an object, got {other}"),
        }
        Ok(Value::Object(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_keys_win_over_options() {
        let mut options = Map::new();
        options.insert("title".to_string(), json!("default"));
        options.insert("configName".to_string(), json!("ts"));
        let raw = json!({"title": "override", "models": []});
        let model = DefaultTransformer.transform(&raw, &options).unwrap();
        assert_eq!(model["title"], json!("override"));
        assert_eq!(model["configName"], json!("ts"));
        assert_eq!(model["models"], json!([]));
    }

    #[test]
    fn test_null_raw_yields_options_only() {
        let mut options = Map::new();
        options.insert("title".to_string(), json!("X"));
        let model = DefaultTransformer.transform(&Value::Null, &options).unwrap();
        assert_eq!(model, json!({"title": "X"}));
    }

    #[test]
    fn test_scalar_raw_is_rejected() {
        let result = DefaultTransformer.transform(&json!(42), &Map::new());
        assert!(result.is_err());
    }
}
