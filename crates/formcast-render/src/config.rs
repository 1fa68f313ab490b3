//! Engine configuration.
//!
//! [`EngineConfig`] is the construction-time option set shared by the
//! engine-backed renderers: the fixed search directories, the
//! application-directory auto-discovery flag, the logical engine name, and
//! the explicit loader chain. The options are fixed when the engine is built
//! and never mutated or re-validated afterwards.

use std::path::PathBuf;

use crate::error::RenderError;
use crate::loader::LoaderKind;

/// Construction-time engine options.
///
/// Auto-discovery (`app_dirs`) and an explicit `loaders` chain are mutually
/// exclusive: auto-discovery already inserts the application-directory
/// strategy into the effective chain, so combining the two is a
/// configuration error.
///
/// # Example
///
/// ```rust
/// use formcast_render::{EngineConfig, LoaderKind};
///
/// let config = EngineConfig {
///     app_dirs: false,
///     dirs: vec!["/srv/app/templates".into()],
///     name: "myproject".to_string(),
///     loaders: vec![LoaderKind::AppDirectories, LoaderKind::Filesystem],
///     search_app_dirs_before_dirs: false,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Automatically search every registered application template directory.
    pub app_dirs: bool,

    /// Fixed search directories, tried in order by the filesystem strategy.
    pub dirs: Vec<PathBuf>,

    /// Logical engine name, used for logging and diagnostics.
    pub name: String,

    /// Explicit ordered loader chain. Mutually exclusive with `app_dirs`.
    pub loaders: Vec<LoaderKind>,

    /// With auto-discovery on, search application directories before `dirs`.
    pub search_app_dirs_before_dirs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_dirs: false,
            dirs: Vec::new(),
            name: "formcast".to_string(),
            loaders: Vec::new(),
            search_app_dirs_before_dirs: false,
        }
    }
}

impl EngineConfig {
    /// Checks the auto-discovery / loader-chain exclusivity rule.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.app_dirs && !self.loaders.is_empty() {
            return Err(RenderError::ConfigError(format!(
                "engine '{}': app_dirs must not be enabled together with an explicit loader chain",
                self.name
            )));
        }
        Ok(())
    }

    /// The effective loader chain for this configuration, in search order.
    pub fn loader_chain(&self) -> Vec<LoaderKind> {
        if !self.loaders.is_empty() {
            return self.loaders.clone();
        }
        if self.app_dirs {
            if self.search_app_dirs_before_dirs {
                vec![LoaderKind::AppDirectories, LoaderKind::Filesystem]
            } else {
                vec![LoaderKind::Filesystem, LoaderKind::AppDirectories]
            }
        } else {
            vec![LoaderKind::Filesystem]
        }
    }
}
