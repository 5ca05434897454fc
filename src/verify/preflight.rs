//! Pre-flight checks performed before instantiating a template.
//!
//! Unlike `rules`, these functions look at the file system.

use crate::error::{Result, TemplateError};
use crate::fs::{FileSystem, PathKind, check_destination};
use crate::template::PackageLayout;

use std::path::Path;

/// Checks the template layout and the destination.
///
/// # Errors
///
/// - `InvalidTemplate`: template missing, not a directory, without
///   `Sources/`, or containing the destination
/// - `DestinationExists`: destination is a file or a non-empty directory
///
/// A template without a manifest is allowed (nothing to rewrite) but
/// logged.
pub fn preflight_checks(
    fs: &dyn FileSystem,
    template: &Path,
    destination: &Path,
    layout: &PackageLayout,
) -> Result<()> {
    match fs.path_kind(template) {
        PathKind::Directory => {}
        PathKind::Missing => {
            return Err(TemplateError::InvalidTemplate(
                template.to_path_buf(),
                "does not exist".to_string(),
            ));
        }
        PathKind::File => {
            return Err(TemplateError::InvalidTemplate(
                template.to_path_buf(),
                "not a directory".to_string(),
            ));
        }
    }

    if !fs.path_kind(&layout.sources(template)).is_dir() {
        return Err(TemplateError::InvalidTemplate(
            template.to_path_buf(),
            format!("missing {} directory", layout.sources_dir),
        ));
    }

    if !fs.path_kind(&template.join(&layout.manifest)).exists() {
        log::warn!(
            "Template {} has no {}; targets will not be declared",
            template.display(),
            layout.manifest
        );
    }

    // The staging directory lives next to the destination; inside the
    // template it would be copied into itself.
    let template_abs = std::path::absolute(template)?;
    let destination_abs = std::path::absolute(destination)?;
    if destination_abs.starts_with(&template_abs) {
        return Err(TemplateError::InvalidTemplate(
            template.to_path_buf(),
            format!("destination {} is inside the template", destination.display()),
        ));
    }

    check_destination(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::StdFs;
    use std::fs;
    use tempfile::TempDir;

    fn template(temp: &TempDir) -> std::path::PathBuf {
        let root = temp.path().join("Foo");
        fs::create_dir_all(root.join("Sources/Foo")).unwrap();
        fs::write(root.join("Package.swift"), "").unwrap();
        root
    }

    #[test]
    fn test_valid_template_passes() {
        let temp = TempDir::new().unwrap();
        let root = template(&temp);

        preflight_checks(
            &StdFs,
            &root,
            &temp.path().join("Widget"),
            &PackageLayout::default(),
        )
        .unwrap();
    }

    #[test]
    fn test_missing_template() {
        let temp = TempDir::new().unwrap();
        let err = preflight_checks(
            &StdFs,
            &temp.path().join("Nope"),
            &temp.path().join("Widget"),
            &PackageLayout::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_template_without_sources() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Foo");
        fs::create_dir(&root).unwrap();

        let err = preflight_checks(
            &StdFs,
            &root,
            &temp.path().join("Widget"),
            &PackageLayout::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("missing Sources directory"));
    }

    #[test]
    fn test_destination_inside_template() {
        let temp = TempDir::new().unwrap();
        let root = template(&temp);

        let err = preflight_checks(
            &StdFs,
            &root,
            &root.join("out/Widget"),
            &PackageLayout::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("inside the template"));
    }

    #[test]
    fn test_populated_destination() {
        let temp = TempDir::new().unwrap();
        let root = template(&temp);
        let dest = temp.path().join("Widget");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("file"), "").unwrap();

        assert!(matches!(
            preflight_checks(&StdFs, &root, &dest, &PackageLayout::default()),
            Err(TemplateError::DestinationExists(_))
        ));
    }
}
