//! Target discovery: what the template declares and what it is called.

use crate::error::{Result, TemplateError};
use crate::fs::FileSystem;
use crate::report::{Step, StepOutcome};
use crate::template::layout::PackageLayout;

use std::path::{Component, Path};

/// Targets found in a template and the name they are renamed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Directories under `Sources/`, in listing order.
    pub targets: Vec<String>,
    /// Name of the primary target; replaced by the new package name.
    pub original_name: String,
}

impl Discovery {
    pub fn is_primary(&self, target: &str) -> bool {
        target == self.original_name
    }
}

/// Names of the target directories in `<template>/Sources`.
///
/// Order is whatever the directory listing returns. Hidden entries and
/// plain files are not targets.
pub fn discover_targets(
    fs: &dyn FileSystem,
    template: &Path,
    layout: &PackageLayout,
) -> Result<Vec<String>> {
    let sources = layout.sources(template);

    let targets = fs
        .list_directory(&sources)?
        .into_iter()
        .filter(|name| !name.starts_with('.'))
        .filter(|name| fs.path_kind(&sources.join(name)).is_dir())
        .collect();

    Ok(targets)
}

/// Last path component of `path`, ignoring trailing separators.
///
/// Returns `None` for paths that do not end in a name (`.`, `..`, `/`).
pub fn original_package_name(path: &Path) -> Option<String> {
    match path.components().next_back() {
        Some(Component::Normal(name)) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Resolves the primary target name.
///
/// An explicit name wins. Otherwise the template directory name is used,
/// canonicalizing the path first if it has no usable last component.
pub fn resolve_original_name(template: &Path, explicit: Option<&str>) -> Result<String> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }

    if let Some(name) = original_package_name(template) {
        return Ok(name);
    }

    template
        .canonicalize()
        .ok()
        .as_deref()
        .and_then(original_package_name)
        .ok_or_else(|| {
            TemplateError::InvalidTemplate(
                template.to_path_buf(),
                "cannot derive a package name from this path; use --primary-target".to_string(),
            )
        })
}

/// Discovers targets and the original name.
///
/// Errors only when `Sources/` cannot be listed or no name can be derived.
/// An empty target set is a failure on the outcome; an original name that
/// matches no target is a warning.
pub fn discover(
    fs: &dyn FileSystem,
    template: &Path,
    layout: &PackageLayout,
    primary_target: Option<&str>,
) -> Result<(Discovery, StepOutcome)> {
    let mut outcome = StepOutcome::new(Step::Discover);

    let targets = discover_targets(fs, template, layout)?;
    let original_name = resolve_original_name(template, primary_target)?;

    log::info!(
        "Discovered {} target(s) in {}: {}",
        targets.len(),
        template.display(),
        targets.join(", ")
    );
    log::debug!("Original package name: {}", original_name);

    if targets.is_empty() {
        outcome.fail(
            Some(&layout.sources(template)),
            TemplateError::EmptyTargetSet(layout.sources(template)),
        );
    } else if !targets.contains(&original_name) {
        outcome.warn(None, TemplateError::NoPrimaryTarget(original_name.clone()));
    }

    Ok((
        Discovery {
            targets,
            original_name,
        },
        outcome,
    ))
}
