//! # Render Module
//!
//! The rendering capability consumed by the generation engine: logic-less
//! substitution over a JSON context with named partial inclusion. The engine
//! only depends on the [`Renderer`] trait, so the template language is
//! swappable by the integrator; [`JinjaRenderer`] is the bundled
//! implementation, backed by `minijinja`.
//!
//! Rendering never executes code from the context: the context is plain
//! data, partials are plain template text.

use minijinja::Environment;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::Error;

/// Logic-less template rendering with named partials.
pub trait Renderer: Send + Sync {
    /// Render `body` against `context`, with `partials` available as named
    /// includes. `name` identifies the template in error reports only.
    fn render(
        &self,
        name: &str,
        body: &str,
        context: &Value,
        partials: &BTreeMap<String, String>,
    ) -> Result<String, Error>;
}

/// `minijinja`-backed renderer.
///
/// Partials are registered as named templates and pulled in with
/// `{% include "name" %}`; variable lookup, section loops, and conditionals
/// follow Jinja semantics. Undefined variables render empty rather than
/// failing, matching the substitution semantics of logic-less engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct JinjaRenderer;

impl JinjaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for JinjaRenderer {
    fn render(
        &self,
        name: &str,
        body: &str,
        context: &Value,
        partials: &BTreeMap<String, String>,
    ) -> Result<String, Error> {
        let mut env = Environment::new();
        for (partial_name, source) in partials {
            env.add_template_owned(partial_name.clone(), source.clone())
                .map_err(|e| Error::render(partial_name.clone(), e))?;
        }
        env.render_str(body, context)
            .map_err(|e| Error::render(name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(body: &str, ctx: Value) -> String {
        JinjaRenderer::new()
            .render("test", body, &ctx, &BTreeMap::new())
            .unwrap()
    }

    #[test]
    fn test_variable_substitution() {
        assert_eq!(render("Title: {{title}}", json!({"title": "X"})), "Title: X");
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        assert_eq!(render("[{{absent}}]", json!({})), "[]");
    }

    #[test]
    fn test_loop_over_sequence() {
        let out = render(
            "{% for m in models %}{{m.name}};{% endfor %}",
            json!({"models": [{"name": "a"}, {"name": "b"}]}),
        );
        assert_eq!(out, "a;b;");
    }

    #[test]
    fn test_named_partial_inclusion() {
        let mut partials = BTreeMap::new();
        partials.insert("header".to_string(), "== {{title}} ==".to_string());
        let out = JinjaRenderer::new()
            .render(
                "test",
                "{% include \"header\" %}\nbody",
                &json!({"title": "T"}),
                &partials,
            )
            .unwrap();
        assert_eq!(out, "== T ==\nbody");
    }

    #[test]
    fn test_malformed_template_is_render_error() {
        let err = JinjaRenderer::new()
            .render("bad", "{% for %}", &json!({}), &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }
}
