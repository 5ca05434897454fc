//! Manifest (`Package.swift`) target regeneration.
//!
//! The template's manifest is kept up to its first `.target(` declaration.
//! Everything from there on is replaced by one `.target` / `.testTarget`
//! pair per discovered target and a fixed closing block:
//!
//! ```swift
//! let package = Package(
//!     name: "Foo",
//!     targets: [
//!         .target(
//!             name: "Foo",
//!             dependencies: []),
//!         .testTarget(
//!             name: "FooTests",
//!             dependencies: ["Foo"]),
//!     ]
//! )
//! ```
//!
//! The closing block assumes the targets list is the last argument of the
//! last expression in the file.

use crate::error::TemplateError;
use crate::fs::FileSystem;
use crate::report::{Operation, Step, StepOutcome};
use crate::template::content::substitute;
use crate::template::layout::PackageLayout;

use std::path::Path;

/// First token of a target declaration; the cut point of the rewrite.
pub const TARGET_MARKER: &str = ".target(";

const CLOSING: &str = "\n    ]\n)\n";

/// Regenerates the target section of `manifest`.
///
/// Returns `None` if the manifest has no [`TARGET_MARKER`].
pub fn rewrite_targets(manifest: &str, targets: &[String], layout: &PackageLayout) -> Option<String> {
    let cut = manifest.find(TARGET_MARKER)?;
    let mut text = manifest[..cut].to_string();

    for target in targets {
        text.push_str(&format!(
            "\n        .target(\n            name: \"{target}\",\n            dependencies: []),\
             \n        .testTarget(\n            name: \"{test}\",\n            dependencies: [\"{target}\"]),",
            target = target,
            test = layout.test_target(target),
        ));
    }

    text.push_str(CLOSING);
    Some(text)
}

/// Rewrites the manifest's targets, then renames the package inside it.
///
/// With an empty `targets` the regeneration is skipped (discovery already
/// reported it) but the rename still runs.
pub fn rewrite_manifest(
    fs: &dyn FileSystem,
    manifest: &Path,
    targets: &[String],
    original_name: &str,
    package_name: &str,
    layout: &PackageLayout,
) -> StepOutcome {
    let mut outcome = StepOutcome::new(Step::Manifest);

    if !targets.is_empty() {
        let text = match fs.read_text_file(manifest) {
            Ok(text) => text,
            Err(e) => {
                outcome.fail(Some(manifest), e);
                return outcome;
            }
        };

        match rewrite_targets(&text, targets, layout) {
            Some(new_text) => match fs.write_text_file(manifest, &new_text) {
                Ok(()) => {
                    log::info!(
                        "Declared {} target(s) in {}",
                        targets.len(),
                        manifest.display()
                    );
                    outcome.record(Operation::Rewrite {
                        path: manifest.to_path_buf(),
                    });
                }
                Err(e) => outcome.fail(Some(manifest), e),
            },
            None => outcome.fail(
                Some(manifest),
                TemplateError::MissingTargetMarker(manifest.to_path_buf()),
            ),
        }
    }

    substitute(fs, manifest, &[(original_name, package_name)], &mut outcome);
    outcome
}
