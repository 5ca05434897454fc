//! Literal text substitution inside package files.
//!
//! Replacement is a plain substring replace: no word boundaries, no
//! escaping. `Foo` inside `FooBar` or a comment is replaced too.

use crate::error::{Result, TemplateError};
use crate::fs::FileSystem;
use crate::report::{Operation, Step, StepOutcome};
use crate::template::layout::PLACEHOLDERS;

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Applies `replacements` in order and writes the file if anything changed.
///
/// Returns `Ok(true)` when the file was rewritten.
pub fn replace_in_file(
    fs: &dyn FileSystem,
    path: &Path,
    replacements: &[(&str, &str)],
) -> Result<bool> {
    let original = fs.read_text_file(path)?;
    let mut content = original.clone();

    for &(pattern, replacement) in replacements {
        if !pattern.is_empty() && content.contains(pattern) {
            content = content.replace(pattern, replacement);
        }
    }

    if content == original {
        log::debug!("Content unchanged, skipping: {}", path.display());
        return Ok(false);
    }

    fs.write_text_file(path, &content)?;
    Ok(true)
}

/// Runs [`replace_in_file`] and records the result on `outcome`.
///
/// Binary files are reported as a warning instead of a failure.
pub fn substitute(
    fs: &dyn FileSystem,
    path: &Path,
    replacements: &[(&str, &str)],
    outcome: &mut StepOutcome,
) {
    match replace_in_file(fs, path, replacements) {
        Ok(true) => outcome.record(Operation::Rewrite {
            path: path.to_path_buf(),
        }),
        Ok(false) => {}
        Err(TemplateError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
            outcome.warn(
                Some(path),
                TemplateError::Other(anyhow::anyhow!(
                    "Skipped non-text file {}",
                    path.display()
                )),
            );
        }
        Err(e) => outcome.fail(Some(path), e),
    }
}

/// Replaces both placeholders with `package_name` in every top-level file.
///
/// `entries` are names directly under `root`; directories are skipped.
pub fn substitute_placeholders(
    fs: &dyn FileSystem,
    root: &Path,
    entries: &[String],
    package_name: &str,
) -> StepOutcome {
    let mut outcome = StepOutcome::new(Step::Placeholders);
    let replacements: Vec<(&str, &str)> =
        PLACEHOLDERS.iter().map(|p| (*p, package_name)).collect();

    for name in entries {
        let path = root.join(name);
        if fs.path_kind(&path).is_dir() {
            continue;
        }
        substitute(fs, &path, &replacements, &mut outcome);
    }

    outcome
}

/// Result of scanning the staged tree for placeholders.
#[derive(Debug, Default)]
pub struct ResidualScan {
    /// Text files that still contain a placeholder.
    pub placeholders: Vec<PathBuf>,
    /// Entries that could not be walked or read, with the reason.
    pub unreadable: Vec<(Option<PathBuf>, TemplateError)>,
}

/// Scans every file under `root` for placeholders.
///
/// Hidden files are included and ignore files are not honoured: the
/// staged tree is exactly what the user gets. Non-UTF-8 files are not
/// text and are skipped; any other walk or read error is collected in
/// [`ResidualScan::unreadable`].
pub fn find_residual_placeholders(fs: &dyn FileSystem, root: &Path) -> ResidualScan {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .build();

    let mut scan = ResidualScan::default();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                scan.unreadable.push((None, TemplateError::Other(e.into())));
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        match fs.read_text_file(entry.path()) {
            Ok(text) => {
                if PLACEHOLDERS.iter().any(|p| text.contains(*p)) {
                    scan.placeholders.push(entry.into_path());
                }
            }
            Err(TemplateError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {}
            Err(e) => scan.unreadable.push((Some(entry.into_path()), e)),
        }
    }

    scan
}
