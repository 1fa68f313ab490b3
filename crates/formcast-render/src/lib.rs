//! # Formcast Render - Template Backends for Form Rendering
//!
//! `formcast-render` selects and configures the template backend used to
//! render formcast forms and widgets, and exposes one uniform contract over
//! whichever backend is active:
//!
//! ```text
//! render(name, context, request) -> String
//! ```
//!
//! ## Strategies
//!
//! - [`BuiltinTemplateRenderer`]: the built-in minijinja engine, loading
//!   templates from registered application directories and the bundled
//!   `templates/` directory.
//! - [`AltTemplateRenderer`] (cargo feature `tera`): the alternative tera
//!   engine with its own bundled `tera/` template directory. The dependency
//!   is optional; leaving the feature off does not affect the other
//!   strategies.
//! - [`ProjectTemplateRenderer`]: resolves form templates through the host
//!   application's own globally installed template source, so forms pick up
//!   the same overrides and theming as every other template in the project.
//!
//! Engines are constructed lazily on first render and reused for the
//! lifetime of the renderer. Rendered output always has surrounding
//! whitespace stripped.
//!
//! ## Quick Start
//!
//! ```rust
//! use formcast_render::{BuiltinTemplateRenderer, Context, FormRenderer};
//! use serde_json::json;
//!
//! let renderer = BuiltinTemplateRenderer::new();
//!
//! let mut context = Context::new();
//! context.insert("field".to_string(), json!({
//!     "name": "email",
//!     "id": "id_email",
//!     "input_type": "email",
//! }));
//!
//! let html = renderer
//!     .render("formcast/widgets/text.html", &context, None)
//!     .unwrap();
//! assert_eq!(html, r#"<input type="email" name="email" id="id_email">"#);
//! ```
//!
//! ## Application Template Directories
//!
//! Hosts can override any bundled template by registering their own
//! template directories; registered directories are searched first:
//!
//! ```rust,ignore
//! formcast_render::register_app_template_dirs([
//!     "/srv/app/accounts/templates",
//!     "/srv/app/shop/templates",
//! ]);
//! ```
//!
//! ## Custom Backends
//!
//! Anything implementing [`TemplateEngine`] can serve as the host-project
//! template source, and [`DynamicTemplate`] lets such sources hand back
//! arbitrary template implementations. See [`project`].

mod appdirs;
mod config;
mod context;
mod engine;
mod error;
mod loader;
pub mod project;
mod renderer;
mod template;

pub use appdirs::{app_template_dirs, register_app_template_dirs};
pub use config::EngineConfig;
pub use context::{Context, RequestContext};
#[cfg(feature = "tera")]
pub use engine::TeraEngine;
pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use error::RenderError;
pub use loader::LoaderKind;
#[cfg(feature = "tera")]
pub use renderer::AltTemplateRenderer;
pub use renderer::{
    select_renderer, BuiltinTemplateRenderer, FormRenderer, ProjectTemplateRenderer, RendererKind,
};
pub use template::{DynamicTemplate, Template};
