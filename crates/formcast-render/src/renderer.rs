//! Renderer strategies over the configured engines.
//!
//! This module is the heart of the crate: the [`FormRenderer`] contract and
//! the three strategies that implement it.
//!
//! - [`BuiltinTemplateRenderer`] renders through the built-in minijinja
//!   engine and the crate's bundled widget templates.
//! - [`AltTemplateRenderer`] (cargo feature `tera`) renders through the
//!   alternative tera engine and the bundled tera-syntax templates.
//! - [`ProjectTemplateRenderer`] resolves through the host application's
//!   installed template source instead of a locally owned engine.
//!
//! The engine-backed renderers construct their engine lazily on first use
//! and reuse it for the lifetime of the renderer instance, so building a
//! renderer costs nothing until something is actually rendered.
//!
//! # Example
//!
//! ```rust
//! use formcast_render::{BuiltinTemplateRenderer, Context, FormRenderer};
//! use serde_json::json;
//!
//! let renderer = BuiltinTemplateRenderer::new();
//! let mut context = Context::new();
//! context.insert("field".to_string(), json!({
//!     "name": "email",
//!     "id": "id_email",
//!     "value": "ada@example.com",
//! }));
//!
//! let html = renderer
//!     .render("formcast/widgets/text.html", &context, None)
//!     .unwrap();
//! assert!(html.starts_with("<input"));
//! ```

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::EngineConfig;
use crate::context::{Context, RequestContext};
#[cfg(feature = "tera")]
use crate::engine::TeraEngine;
use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::RenderError;
use crate::loader::LoaderKind;
use crate::project;
use crate::template::Template;

/// Logical engine name shared by the bundled configurations.
const ENGINE_NAME: &str = "formcast";

/// The renderer contract shared by all strategies.
///
/// [`render`](Self::render) is defined in terms of
/// [`resolve`](Self::resolve): resolve the template, render it with the
/// context and optional request handle, strip surrounding whitespace.
/// Implementations supply `resolve`; a type that does not gets the
/// not-implemented guard.
pub trait FormRenderer {
    /// Resolves a template by name.
    fn resolve(&self, name: &str) -> Result<Template<'_>, RenderError> {
        let _ = name;
        Err(RenderError::NotImplemented(
            "renderers must implement resolve()".to_string(),
        ))
    }

    /// Renders `name` with `context`, trimming surrounding whitespace.
    ///
    /// Failures from `resolve` or from the template itself propagate
    /// unchanged: no retries, no error translation.
    fn render(
        &self,
        name: &str,
        context: &Context,
        request: Option<&RequestContext>,
    ) -> Result<String, RenderError> {
        let template = self.resolve(name)?;
        let output = template.render(context, request)?;
        Ok(output.trim().to_string())
    }
}

/// Resolves `name` through an engine. Shared by every engine-backed renderer.
pub(crate) fn resolve_via_engine<'e, E>(
    engine: &'e E,
    name: &str,
) -> Result<Template<'e>, RenderError>
where
    E: TemplateEngine + ?Sized,
{
    engine.get_template(name)
}

/// Root of the bundled minijinja templates shipped with this crate.
fn bundled_templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Root of the bundled tera templates shipped with this crate.
#[cfg(feature = "tera")]
fn bundled_tera_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tera")
}

/// Renders through the built-in minijinja engine.
///
/// Templates are located through an explicit loader chain: registered
/// application template directories first, then the crate's bundled
/// `templates/` directory. Auto-discovery stays off because it cannot be
/// combined with an explicit chain; the chain covers application
/// directories instead.
pub struct BuiltinTemplateRenderer {
    engine: OnceCell<MiniJinjaEngine>,
    config: EngineConfig,
}

impl BuiltinTemplateRenderer {
    /// Creates a renderer with the bundled configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig {
            app_dirs: false,
            dirs: vec![bundled_templates_root()],
            name: ENGINE_NAME.to_string(),
            loaders: vec![LoaderKind::AppDirectories, LoaderKind::Filesystem],
            search_app_dirs_before_dirs: false,
        })
    }

    /// Creates a renderer with a custom engine configuration.
    ///
    /// The configuration is validated when the engine is first built, so an
    /// invalid combination surfaces on the first `resolve`/`render` call.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: OnceCell::new(),
            config,
        }
    }

    fn engine(&self) -> Result<&MiniJinjaEngine, RenderError> {
        self.engine.get_or_try_init(|| {
            debug!(engine = %self.config.name, "building engine for builtin renderer");
            MiniJinjaEngine::new(self.config.clone())
        })
    }
}

impl Default for BuiltinTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRenderer for BuiltinTemplateRenderer {
    fn resolve(&self, name: &str) -> Result<Template<'_>, RenderError> {
        resolve_via_engine(self.engine()?, name)
    }
}

/// Renders through the alternative tera engine.
///
/// Auto-discovery is on, application directories are searched before the
/// crate's bundled `tera/` directory, and no extra options are set. The
/// engine is built lazily on first use, so a host that never renders
/// through this variant never touches any tera machinery.
#[cfg(feature = "tera")]
pub struct AltTemplateRenderer {
    engine: OnceCell<TeraEngine>,
    config: EngineConfig,
}

#[cfg(feature = "tera")]
impl AltTemplateRenderer {
    /// Creates a renderer with the bundled configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig {
            app_dirs: true,
            dirs: vec![bundled_tera_root()],
            name: ENGINE_NAME.to_string(),
            loaders: Vec::new(),
            search_app_dirs_before_dirs: true,
        })
    }

    /// Creates a renderer with a custom engine configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: OnceCell::new(),
            config,
        }
    }

    fn engine(&self) -> Result<&TeraEngine, RenderError> {
        self.engine.get_or_try_init(|| {
            debug!(engine = %self.config.name, "building engine for alt renderer");
            TeraEngine::new(self.config.clone())
        })
    }
}

#[cfg(feature = "tera")]
impl Default for AltTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tera")]
impl FormRenderer for AltTemplateRenderer {
    fn resolve(&self, name: &str) -> Result<Template<'_>, RenderError> {
        resolve_via_engine(self.engine()?, name)
    }
}

/// Renders through the host application's installed template source.
///
/// No locally owned engine and no memoization: the host owns that
/// lifecycle. See [`crate::project`].
#[derive(Debug, Default)]
pub struct ProjectTemplateRenderer;

impl ProjectTemplateRenderer {
    /// Creates a project renderer.
    pub fn new() -> Self {
        Self
    }
}

impl FormRenderer for ProjectTemplateRenderer {
    fn resolve(&self, name: &str) -> Result<Template<'_>, RenderError> {
        project::get_template(name)
    }
}

/// Which rendering strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// Built-in minijinja engine with the bundled widget templates.
    Builtin,
    /// Alternative tera engine with the bundled tera-syntax templates.
    #[cfg(feature = "tera")]
    Tera,
    /// The host application's installed template source.
    Project,
}

/// Selects the rendering strategy for `kind`.
pub fn select_renderer(kind: RendererKind) -> Box<dyn FormRenderer> {
    match kind {
        RendererKind::Builtin => Box::new(BuiltinTemplateRenderer::new()),
        #[cfg(feature = "tera")]
        RendererKind::Tera => Box::new(AltTemplateRenderer::new()),
        RendererKind::Project => Box::new(ProjectTemplateRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DynamicTemplate;
    use proptest::prelude::*;
    use serde_json::json;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticTemplate(String);

    impl DynamicTemplate for StaticTemplate {
        fn render(
            &self,
            _context: &Context,
            _request: Option<&RequestContext>,
        ) -> Result<String, RenderError> {
            Ok(self.0.clone())
        }
    }

    // A renderer that always resolves to the same fixed content.
    struct FixedRenderer(String);

    impl FormRenderer for FixedRenderer {
        fn resolve(&self, _name: &str) -> Result<Template<'_>, RenderError> {
            Ok(Template::from_dyn(StaticTemplate(self.0.clone())))
        }
    }

    struct ProbeEngine;

    impl TemplateEngine for ProbeEngine {
        fn name(&self) -> &str {
            "probe"
        }

        fn get_template(&self, _name: &str) -> Result<Template<'_>, RenderError> {
            Ok(Template::from_dyn(StaticTemplate("  probed  ".to_string())))
        }
    }

    // Engine-backed renderer with a construction counter.
    struct ProbeRenderer {
        engine: OnceCell<ProbeEngine>,
        builds: AtomicUsize,
    }

    impl ProbeRenderer {
        fn new() -> Self {
            Self {
                engine: OnceCell::new(),
                builds: AtomicUsize::new(0),
            }
        }

        fn engine(&self) -> Result<&ProbeEngine, RenderError> {
            self.engine.get_or_try_init(|| {
                self.builds.fetch_add(1, Ordering::SeqCst);
                Ok(ProbeEngine)
            })
        }
    }

    impl FormRenderer for ProbeRenderer {
        fn resolve(&self, name: &str) -> Result<Template<'_>, RenderError> {
            resolve_via_engine(self.engine()?, name)
        }
    }

    #[test]
    fn test_bare_contract_resolve_is_not_implemented() {
        struct Bare;
        impl FormRenderer for Bare {}

        let err = Bare.resolve("formcast/form.html").unwrap_err();
        assert!(matches!(err, RenderError::NotImplemented(_)));

        // render goes through resolve, so it hits the same guard
        let err = Bare.render("formcast/form.html", &Context::new(), None).unwrap_err();
        assert!(matches!(err, RenderError::NotImplemented(_)));
    }

    #[test]
    fn test_construction_does_not_build_an_engine() {
        let renderer = ProbeRenderer::new();
        assert_eq!(renderer.builds.load(Ordering::SeqCst), 0);
        assert!(renderer.engine.get().is_none());
    }

    #[test]
    fn test_engine_is_built_once_and_reused() {
        let renderer = ProbeRenderer::new();
        renderer.render("a.html", &Context::new(), None).unwrap();
        renderer.render("b.html", &Context::new(), None).unwrap();
        assert_eq!(renderer.builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_strips_surrounding_whitespace() {
        let renderer = FixedRenderer(" \n <p>hi</p>\n\n".to_string());
        let output = renderer.render("any", &Context::new(), None).unwrap();
        assert_eq!(output, "<p>hi</p>");
    }

    #[test]
    #[serial]
    fn test_builtin_renderer_reuses_engine_instance() {
        crate::appdirs::register_app_template_dirs(Vec::<PathBuf>::new());
        let renderer = BuiltinTemplateRenderer::new();
        assert!(renderer.engine.get().is_none());

        let mut context = Context::new();
        context.insert(
            "field".to_string(),
            json!({"name": "q", "id": "id_q", "value": "x"}),
        );
        renderer
            .render("formcast/widgets/text.html", &context, None)
            .unwrap();
        let first = renderer.engine().unwrap() as *const MiniJinjaEngine;
        renderer
            .render("formcast/widgets/text.html", &context, None)
            .unwrap();
        let second = renderer.engine().unwrap() as *const MiniJinjaEngine;
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_builtin_config_has_explicit_loader_chain() {
        let renderer = BuiltinTemplateRenderer::new();
        assert!(!renderer.config.app_dirs);
        assert_eq!(
            renderer.config.loaders,
            vec![LoaderKind::AppDirectories, LoaderKind::Filesystem]
        );
    }

    #[cfg(feature = "tera")]
    #[test]
    fn test_alt_config_has_auto_discovery_and_no_loaders() {
        let renderer = AltTemplateRenderer::new();
        assert!(renderer.config.app_dirs);
        assert!(renderer.config.loaders.is_empty());
        assert!(renderer.config.search_app_dirs_before_dirs);
    }

    #[test]
    fn test_invalid_config_surfaces_on_first_render() {
        let renderer = BuiltinTemplateRenderer::with_config(EngineConfig {
            app_dirs: true,
            loaders: vec![LoaderKind::Filesystem],
            ..EngineConfig::default()
        });
        let err = renderer
            .render("formcast/form.html", &Context::new(), None)
            .unwrap_err();
        assert!(matches!(err, RenderError::ConfigError(_)));
    }

    #[test]
    fn test_select_renderer_builtin_renders() {
        let renderer = select_renderer(RendererKind::Builtin);
        let mut context = Context::new();
        context.insert(
            "field".to_string(),
            json!({"name": "q", "id": "id_q", "checked": true}),
        );
        let html = renderer
            .render("formcast/widgets/checkbox.html", &context, None)
            .unwrap();
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("checked"));
    }

    proptest! {
        #[test]
        fn render_output_equals_its_own_trim(
            left in "[ \t\n]{0,8}",
            body in "[a-zA-Z0-9<>/= ]{0,40}",
            right in "[ \t\n]{0,8}",
        ) {
            let renderer = FixedRenderer(format!("{left}{body}{right}"));
            let output = renderer.render("any", &Context::new(), None).unwrap();
            prop_assert_eq!(output.trim(), output.as_str());
        }
    }
}
