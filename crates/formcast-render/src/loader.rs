//! Template location strategies.
//!
//! An engine locates templates by walking an ordered chain of loaders, first
//! hit wins. [`LoaderKind::AppDirectories`] consults the template directories
//! registered by the host application (see [`crate::register_app_template_dirs`]);
//! [`LoaderKind::Filesystem`] consults the engine's fixed search directories.
//!
//! Template names are relative paths with extension, e.g.
//! `"formcast/widgets/text.html"`. Names that are absolute or contain parent
//! components never resolve.

use std::path::{Component, Path, PathBuf};

/// A strategy for locating a template by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    /// Search the registered application template directories.
    AppDirectories,
    /// Search the engine's fixed search directories.
    Filesystem,
}

/// Walks `chain` and returns the first existing file for `name`.
pub(crate) fn locate(
    chain: &[LoaderKind],
    app_dirs: &[PathBuf],
    dirs: &[PathBuf],
    name: &str,
) -> Option<PathBuf> {
    if !is_safe_name(name) {
        return None;
    }
    for kind in chain {
        let roots = match kind {
            LoaderKind::AppDirectories => app_dirs,
            LoaderKind::Filesystem => dirs,
        };
        for root in roots {
            let candidate = root.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// A template name must be a relative path made of normal components only.
fn is_safe_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let path = Path::new(name);
    !path.is_absolute() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Recursively collects the template files under `root` as
/// `(absolute path, relative name)` pairs, sorted by name.
///
/// A missing root yields an empty list: an application without a template
/// directory is not an error.
#[cfg(any(test, feature = "tera"))]
pub(crate) fn walk_templates(root: &Path) -> std::io::Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    if !root.is_dir() {
        return Ok(files);
    }
    collect(root, root, &mut files)?;
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

#[cfg(any(test, feature = "tera"))]
fn collect(
    root: &Path,
    dir: &Path,
    files: &mut Vec<(PathBuf, String)>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(root, &path, files)?;
        } else if path.is_file() {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let name = relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => part.to_str(),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/");
            files.push((path, name));
        }
    }
    Ok(())
}
