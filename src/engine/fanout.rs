//! Fan-out planning: computes the render context for every item of the
//! three fan-out dimensions. Pure functions over the canonical model, no
//! I/O; the engine pairs each context with a rule to render filename and
//! body.
//!
//! The canonical model keys the collections the way adaptors emit them:
//! APIs at `apiInfo.apis`, data-model entities at `models`, operations at
//! `apis[i].operations`.

use serde_json::{Map, Value};

/// Top-level key holding the API collection wrapper.
const API_INFO: &str = "apiInfo";
/// Key of the API array inside the wrapper.
const APIS: &str = "apis";
/// Top-level key holding the data-model entity collection.
const MODELS: &str = "models";
/// Key of an API's operation array, narrowed at top level per operation.
const OPERATIONS: &str = "operations";

fn as_array<'a>(value: Option<&'a Value>) -> &'a [Value] {
    value.and_then(Value::as_array).map_or(&[], Vec::as_slice)
}

fn apis(model: &Value) -> &[Value] {
    as_array(model.get(API_INFO).and_then(|info| info.get(APIS)))
}

/// One context per API descriptor: the run defaults (configuration
/// defaults plus the injected configuration name), then the top-level
/// model without its API collection, then the API's own fields. Later
/// keys win on collision.
pub fn per_api_contexts(model: &Value, defaults: &Map<String, Value>) -> Vec<Value> {
    let mut toplevel = model.as_object().cloned().unwrap_or_default();
    toplevel.remove(API_INFO);

    apis(model)
        .iter()
        .map(|api| {
            let mut context = defaults.clone();
            for (key, value) in &toplevel {
                context.insert(key.clone(), value.clone());
            }
            if let Some(fields) = api.as_object() {
                for (key, value) in fields {
                    context.insert(key.clone(), value.clone());
                }
            }
            Value::Object(context)
        })
        .collect()
}

/// One context per data-model entity: the full top-level model with its
/// entity collection narrowed to a single-element list. Each context owns
/// its narrowed copy; sibling iterations are unaffected.
pub fn per_model_contexts(model: &Value) -> Vec<Value> {
    as_array(model.get(MODELS))
        .iter()
        .map(|entity| {
            let mut context = model.as_object().cloned().unwrap_or_default();
            context.insert(MODELS.to_string(), Value::Array(vec![entity.clone()]));
            Value::Object(context)
        })
        .collect()
}

/// One context per operation of every API: the full top-level model (API
/// collection retained) with a top-level `operations` list narrowed to the
/// single operation. Contexts are cloned per iteration; nothing is shared
/// or mutated across siblings.
pub fn per_operation_contexts(model: &Value) -> Vec<Value> {
    let mut contexts = Vec::new();
    for api in apis(model) {
        for operation in as_array(api.get(OPERATIONS)) {
            let mut context = model.as_object().cloned().unwrap_or_default();
            context.insert(
                OPERATIONS.to_string(),
                Value::Array(vec![operation.clone()]),
            );
            contexts.push(Value::Object(context));
        }
    }
    contexts
}
