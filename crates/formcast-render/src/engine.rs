//! Template engine wrappers.
//!
//! [`TemplateEngine`] abstracts over "a configured backend that can look up
//! named templates". Two implementations ship with the crate:
//!
//! - [`MiniJinjaEngine`], the built-in backend, which loads template sources
//!   on demand through its loader chain.
//! - [`TeraEngine`] (cargo feature `tera`), the alternative backend, which
//!   registers every template file from its search roots at construction.
//!
//! Both are built from an [`EngineConfig`] and never reconfigured afterwards.
//! The registered application template directories are snapshotted at
//! construction time.

use std::fs;
#[cfg(feature = "tera")]
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::appdirs;
use crate::config::EngineConfig;
use crate::error::RenderError;
use crate::loader::{self, LoaderKind};
use crate::template::Template;

/// A configured template backend that can look up named templates.
pub trait TemplateEngine: Send + Sync {
    /// The engine's logical name tag.
    fn name(&self) -> &str;

    /// Looks up a template by name.
    ///
    /// Returns [`RenderError::TemplateNotFound`] when no search location
    /// has the template; any other lookup failure propagates as-is.
    fn get_template(&self, name: &str) -> Result<Template<'_>, RenderError>;
}

/// The built-in minijinja backend.
#[derive(Debug)]
pub struct MiniJinjaEngine {
    env: minijinja::Environment<'static>,
    config: EngineConfig,
}

impl MiniJinjaEngine {
    /// Builds an engine from `config`.
    ///
    /// Fails with [`RenderError::ConfigError`] when the configuration
    /// violates the auto-discovery / loader-chain exclusivity rule.
    pub fn new(config: EngineConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let chain = config.loader_chain();
        let app_dirs = if chain.contains(&LoaderKind::AppDirectories) {
            appdirs::app_template_dirs()
        } else {
            Vec::new()
        };
        let dirs = config.dirs.clone();
        debug!(
            engine = %config.name,
            ?chain,
            dirs = dirs.len(),
            app_dirs = app_dirs.len(),
            "constructing minijinja engine"
        );

        // TODO: clear the environment's loaded-template cache in debug builds
        // so template edits are picked up without restarting the host process.
        let mut env = minijinja::Environment::new();
        env.set_loader(move |name| {
            let Some(path) = loader::locate(&chain, &app_dirs, &dirs, name) else {
                return Ok(None);
            };
            match fs::read_to_string(&path) {
                Ok(source) => Ok(Some(source)),
                Err(err) => Err(minijinja::Error::new(
                    minijinja::ErrorKind::InvalidOperation,
                    format!("failed to read template {}: {}", path.display(), err),
                )),
            }
        });

        Ok(Self { env, config })
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn get_template(&self, name: &str) -> Result<Template<'_>, RenderError> {
        trace!(engine = %self.config.name, template = name, "resolving template");
        self.env.get_template(name)?;
        Ok(Template::minijinja(&self.env, name))
    }
}

/// The alternative tera backend.
///
/// Tera has no lazy loader hook, so the engine walks its effective search
/// roots once at construction and registers every template file it finds.
/// Lower-precedence roots are registered first so that higher-precedence
/// roots overwrite clashing names.
#[cfg(feature = "tera")]
pub struct TeraEngine {
    tera: tera::Tera,
    config: EngineConfig,
}

#[cfg(feature = "tera")]
impl TeraEngine {
    /// Builds an engine from `config`, registering all reachable templates.
    pub fn new(config: EngineConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let chain = config.loader_chain();
        let app_dirs = if chain.contains(&LoaderKind::AppDirectories) {
            appdirs::app_template_dirs()
        } else {
            Vec::new()
        };
        debug!(
            engine = %config.name,
            ?chain,
            dirs = config.dirs.len(),
            app_dirs = app_dirs.len(),
            "constructing tera engine"
        );

        let mut files: Vec<(PathBuf, Option<String>)> = Vec::new();
        for kind in chain.iter().rev() {
            let roots: &[PathBuf] = match kind {
                LoaderKind::AppDirectories => &app_dirs,
                LoaderKind::Filesystem => &config.dirs,
            };
            for root in roots.iter().rev() {
                for (path, name) in loader::walk_templates(root)? {
                    files.push((path, Some(name)));
                }
            }
        }

        let mut tera = tera::Tera::default();
        tera.add_template_files(files)?;
        Ok(Self { tera, config })
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(feature = "tera")]
impl TemplateEngine for TeraEngine {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn get_template(&self, name: &str) -> Result<Template<'_>, RenderError> {
        trace!(engine = %self.config.name, template = name, "resolving template");
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(RenderError::TemplateNotFound(name.to_string()));
        }
        Ok(Template::tera(&self.tera, name))
    }
}
