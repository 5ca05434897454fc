//! Copies the template into the staging root.

use crate::error::Result;
use crate::fs::FileSystem;
use crate::report::{Operation, Step, StepOutcome};

use std::path::Path;

/// Copies `template` to `root` and returns the template's top-level entries.
///
/// A single recursive copy; any error is fatal since nothing downstream can
/// work on a partial tree.
pub fn copy_template(
    fs: &dyn FileSystem,
    template: &Path,
    root: &Path,
) -> Result<(Vec<String>, StepOutcome)> {
    let mut outcome = StepOutcome::new(Step::Copy);

    let entries = fs.list_directory(template)?;
    fs.copy_path(template, root)?;

    log::info!(
        "Copied template {} ({} top-level entries)",
        template.display(),
        entries.len()
    );
    outcome.record(Operation::Copy {
        from: template.to_path_buf(),
        to: root.to_path_buf(),
    });

    Ok((entries, outcome))
}
