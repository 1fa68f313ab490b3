//! Host-project template lookup.
//!
//! Embedding applications that resolve all of their templates through one
//! customized lookup chain (themes, per-site overrides) can route form
//! templates through that same chain: install the lookup once during startup
//! with [`set_project_template_source`] and render through
//! [`ProjectTemplateRenderer`](crate::ProjectTemplateRenderer).
//!
//! The installed source owns its own lifecycle and caching; this module
//! performs no memoization of its own.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use formcast_render::{project, MiniJinjaEngine};
//!
//! let engine = MiniJinjaEngine::new(my_project_config)?;
//! project::set_project_template_source(Arc::new(engine));
//! ```

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::context::{Context, RequestContext};
use crate::engine::TemplateEngine;
use crate::error::RenderError;
use crate::template::{DynamicTemplate, Template};

static PROJECT_SOURCE: Lazy<RwLock<Option<Arc<dyn TemplateEngine>>>> =
    Lazy::new(|| RwLock::new(None));

/// Installs the application-wide template source.
pub fn set_project_template_source(source: Arc<dyn TemplateEngine>) {
    *PROJECT_SOURCE.write().unwrap() = Some(source);
}

/// Removes the installed template source.
///
/// Mainly useful for application teardown and test harnesses.
pub fn clear_project_template_source() {
    *PROJECT_SOURCE.write().unwrap() = None;
}

/// Resolves `name` through the installed application-wide template source.
///
/// The name is passed to the source unmodified. Fails with
/// [`RenderError::ConfigError`] when no source is installed, and with
/// whatever the source raises when the template cannot be resolved.
pub fn get_template(name: &str) -> Result<Template<'static>, RenderError> {
    let source = PROJECT_SOURCE.read().unwrap().clone().ok_or_else(|| {
        RenderError::ConfigError(
            "no project template source installed; call \
             set_project_template_source() during application startup"
                .to_string(),
        )
    })?;
    trace!(source = source.name(), template = name, "resolving through project source");
    // Surface template-not-found at resolve time, like the engine-backed path.
    source.get_template(name)?;
    Ok(Template::from_dyn(ProjectTemplate {
        source,
        name: name.to_string(),
    }))
}

/// Re-resolves through the project source on each render; the source owns
/// template caching and lifecycle.
struct ProjectTemplate {
    source: Arc<dyn TemplateEngine>,
    name: String,
}

impl DynamicTemplate for ProjectTemplate {
    fn render(
        &self,
        context: &Context,
        request: Option<&RequestContext>,
    ) -> Result<String, RenderError> {
        self.source.get_template(&self.name)?.render(context, request)
    }
}
