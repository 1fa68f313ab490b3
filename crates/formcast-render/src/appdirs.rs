//! Registered application template directories.
//!
//! Engines can automatically search every installed application's own
//! template subdirectory ("auto-discovery"). Discovering those directories
//! is the host's job: it registers the list here once at startup, and
//! engines snapshot it when they are constructed.
//!
//! ```rust
//! use formcast_render::register_app_template_dirs;
//!
//! register_app_template_dirs(["/srv/app/accounts/templates"]);
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::RwLock;

static APP_TEMPLATE_DIRS: Lazy<RwLock<Vec<PathBuf>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Replaces the set of registered application template directories.
///
/// Call once during application startup, before the first render. Engines
/// snapshot the list at construction, so later changes only affect engines
/// built afterwards.
pub fn register_app_template_dirs<I, P>(dirs: I)
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut guard = APP_TEMPLATE_DIRS.write().unwrap();
    *guard = dirs.into_iter().map(Into::into).collect();
}

/// Returns a snapshot of the registered application template directories.
pub fn app_template_dirs() -> Vec<PathBuf> {
    APP_TEMPLATE_DIRS.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_register_replaces_previous_dirs() {
        register_app_template_dirs(["/tmp/one"]);
        assert_eq!(app_template_dirs(), vec![PathBuf::from("/tmp/one")]);

        register_app_template_dirs(["/tmp/two", "/tmp/three"]);
        assert_eq!(
            app_template_dirs(),
            vec![PathBuf::from("/tmp/two"), PathBuf::from("/tmp/three")]
        );

        register_app_template_dirs(Vec::<PathBuf>::new());
        assert!(app_template_dirs().is_empty());
    }
}
