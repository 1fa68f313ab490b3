//! Opaque template handles.
//!
//! A [`Template`] is what `resolve` returns: a handle to a template located
//! by an engine, used once per render call. Existence is verified at resolve
//! time, so a handle stores only what its backend needs to render. This shim
//! does not cache handles; compiled-template caching, if any, lives in the
//! engine itself.

use std::fmt;

use crate::context::{with_request, Context, RequestContext};
use crate::error::RenderError;

/// A resolved template, tied to the engine that produced it.
pub struct Template<'e> {
    repr: Repr<'e>,
}

enum Repr<'e> {
    MiniJinja {
        env: &'e minijinja::Environment<'static>,
        name: String,
    },
    #[cfg(feature = "tera")]
    Tera {
        tera: &'e tera::Tera,
        name: String,
    },
    Dynamic(Box<dyn DynamicTemplate + 'e>),
}

/// Backend-agnostic template behavior.
///
/// Implement this for template sources that are neither of the built-in
/// engines: host-project lookup chains, test doubles, in-memory stores.
pub trait DynamicTemplate {
    /// Renders with the given context and optional request handle.
    ///
    /// Output is returned as produced; surrounding-whitespace stripping is
    /// the renderer's job.
    fn render(
        &self,
        context: &Context,
        request: Option<&RequestContext>,
    ) -> Result<String, RenderError>;
}

impl<'e> Template<'e> {
    pub(crate) fn minijinja(
        env: &'e minijinja::Environment<'static>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            repr: Repr::MiniJinja {
                env,
                name: name.into(),
            },
        }
    }

    #[cfg(feature = "tera")]
    pub(crate) fn tera(tera: &'e tera::Tera, name: impl Into<String>) -> Self {
        Self {
            repr: Repr::Tera {
                tera,
                name: name.into(),
            },
        }
    }

    /// Wraps a custom template implementation.
    pub fn from_dyn<T: DynamicTemplate + 'e>(template: T) -> Self {
        Self {
            repr: Repr::Dynamic(Box::new(template)),
        }
    }

    /// The name the template was resolved under, when the backend tracks one.
    pub fn name(&self) -> Option<&str> {
        match &self.repr {
            Repr::MiniJinja { name, .. } => Some(name),
            #[cfg(feature = "tera")]
            Repr::Tera { name, .. } => Some(name),
            Repr::Dynamic(_) => None,
        }
    }

    /// Renders the template with `context` and the optional `request`.
    pub fn render(
        &self,
        context: &Context,
        request: Option<&RequestContext>,
    ) -> Result<String, RenderError> {
        match &self.repr {
            Repr::MiniJinja { env, name } => {
                let template = env.get_template(name)?;
                let merged = with_request(context, request);
                Ok(template.render(minijinja::Value::from_serialize(&merged))?)
            }
            #[cfg(feature = "tera")]
            Repr::Tera { tera, name } => {
                let merged = with_request(context, request);
                let tera_context = tera::Context::from_serialize(&merged)?;
                Ok(tera.render(name, &tera_context)?)
            }
            Repr::Dynamic(template) => template.render(context, request),
        }
    }
}

impl fmt::Debug for Template<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (backend, name) = match &self.repr {
            Repr::MiniJinja { name, .. } => ("minijinja", Some(name.as_str())),
            #[cfg(feature = "tera")]
            Repr::Tera { name, .. } => ("tera", Some(name.as_str())),
            Repr::Dynamic(_) => ("dynamic", None),
        };
        f.debug_struct("Template")
            .field("backend", &backend)
            .field("name", &name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Upper;

    impl DynamicTemplate for Upper {
        fn render(
            &self,
            context: &Context,
            _request: Option<&RequestContext>,
        ) -> Result<String, RenderError> {
            let word = context
                .get("word")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            Ok(word.to_uppercase())
        }
    }

    #[test]
    fn test_dynamic_template_render() {
        let template = Template::from_dyn(Upper);
        let mut context = Context::new();
        context.insert("word".to_string(), json!("hello"));

        assert_eq!(template.render(&context, None).unwrap(), "HELLO");
        assert_eq!(template.name(), None);
    }

    #[test]
    fn test_minijinja_template_render_with_request() {
        let mut env = minijinja::Environment::new();
        env.add_template("greeting.txt", "Hello {{ user }} via {{ request.path }}")
            .unwrap();
        // leak: test-only, keeps the environment alive for the handle
        let env: &'static minijinja::Environment<'static> = Box::leak(Box::new(env));

        let template = Template::minijinja(env, "greeting.txt");
        let mut context = Context::new();
        context.insert("user".to_string(), json!("ada"));
        let request = RequestContext::from_value(json!({"path": "/forms"}));

        let output = template.render(&context, Some(&request)).unwrap();
        assert_eq!(output, "Hello ada via /forms");
        assert_eq!(template.name(), Some("greeting.txt"));
    }
}
