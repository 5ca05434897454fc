//! Per-target directory and file renaming.
//!
//! The primary target (the one named like the template) becomes the new
//! package: its source and test directories are moved to the new name.
//! Every other target gets a test directory cloned from the template's
//! primary test directory, renamed and rewritten for that target.

use crate::error::{Result, TemplateError};
use crate::fs::FileSystem;
use crate::report::{Operation, Step, StepOutcome};
use crate::template::content::substitute;
use crate::template::discover::Discovery;
use crate::template::layout::PackageLayout;

use std::path::Path;

/// Paths and names shared by every rename in one run.
pub struct Renamer<'a> {
    pub fs: &'a dyn FileSystem,
    /// Staged package root.
    pub root: &'a Path,
    /// Read-only template the secondary test directories are cloned from.
    pub template: &'a Path,
    pub discovery: &'a Discovery,
    pub package_name: &'a str,
    pub layout: &'a PackageLayout,
}

impl Renamer<'_> {
    /// Renames test directories per target, then the primary sources.
    ///
    /// A failure aborts the remaining moves of that target only.
    pub fn run(&self) -> StepOutcome {
        let mut outcome = StepOutcome::new(Step::Rename);
        let has_tests = self.fs.path_kind(&self.layout.tests(self.root)).is_dir();

        if has_tests {
            for target in &self.discovery.targets {
                let result = if self.discovery.is_primary(target) {
                    self.rename_primary_tests(&mut outcome)
                } else {
                    self.clone_tests_for(target, &mut outcome)
                };

                if let Err(e) = result {
                    log::warn!("Could not create tests for target '{}': {}", target, e);
                    outcome.fail(None, e);
                }
            }
        } else {
            outcome.warn(
                None,
                TemplateError::InvalidTemplate(
                    self.template.to_path_buf(),
                    format!("no {} directory; skipping test targets", self.layout.tests_dir),
                ),
            );
        }

        if let Err(e) = self.rename_primary_sources(&mut outcome) {
            log::warn!("Could not rename primary sources: {}", e);
            outcome.fail(None, e);
        }

        if has_tests {
            self.rename_in_entry_point(&mut outcome);
        }

        outcome
    }

    fn original(&self) -> &str {
        &self.discovery.original_name
    }

    fn is_noop(&self) -> bool {
        self.original() == self.package_name
    }

    /// `Tests/<Original>Tests` → `Tests/<Package>Tests`, file included.
    fn rename_primary_tests(&self, outcome: &mut StepOutcome) -> Result<()> {
        if self.is_noop() {
            return Ok(());
        }

        let from = self.layout.test_dir(self.root, self.original());
        let to = self.layout.test_dir(self.root, self.package_name);
        self.move_path(&from, &to, outcome)?;

        self.move_path(
            &to.join(self.layout.test_file(self.original())),
            &to.join(self.layout.test_file(self.package_name)),
            outcome,
        )
    }

    /// Clones the template's primary test directory as `Tests/<target>Tests`.
    ///
    /// Copies from the template rather than the staged tree: the staged
    /// primary test directory may already have been renamed. A test
    /// directory already present in staging is kept, see [`Self::keep_tests_for`].
    fn clone_tests_for(&self, target: &str, outcome: &mut StepOutcome) -> Result<()> {
        let from = self.layout.test_dir(self.template, self.original());
        let to = self.layout.test_dir(self.root, target);

        if self.fs.path_kind(&to).exists() {
            return self.keep_tests_for(target, &to, outcome);
        }

        self.fs.copy_path(&from, &to)?;
        outcome.record(Operation::Copy {
            from,
            to: to.clone(),
        });

        let test_file = to.join(self.layout.test_file(target));
        self.move_path(
            &to.join(self.layout.test_file(self.original())),
            &test_file,
            outcome,
        )?;

        let replacements = [(self.original(), target)];
        substitute(self.fs, &test_file, &replacements, outcome);
        substitute(
            self.fs,
            &to.join(&self.layout.test_manifest),
            &replacements,
            outcome,
        );

        Ok(())
    }

    /// Handles a `Tests/<target>Tests` that exists before cloning.
    ///
    /// A directory shipped by the template is kept with a warning and still
    /// gets `<Original>` replaced by `<target>` in its test file and test
    /// listing. A target named like the new package collides with the
    /// primary test directory; that is a failure and nothing is rewritten.
    fn keep_tests_for(&self, target: &str, dir: &Path, outcome: &mut StepOutcome) -> Result<()> {
        if target == self.package_name {
            return Err(TemplateError::Other(anyhow::anyhow!(
                "Target '{}' has the same name as the new package; {} left as is",
                target,
                dir.display()
            )));
        }

        log::debug!("Template already provides {}", dir.display());
        outcome.warn(
            Some(dir),
            TemplateError::Other(anyhow::anyhow!(
                "Kept existing {}; replaced '{}' with '{}' in it",
                dir.display(),
                self.original(),
                target
            )),
        );

        let replacements = [(self.original(), target)];
        for file in [
            dir.join(self.layout.test_file(target)),
            dir.join(&self.layout.test_manifest),
        ] {
            if self.fs.path_kind(&file).exists() {
                substitute(self.fs, &file, &replacements, outcome);
            }
        }

        Ok(())
    }

    /// `Sources/<Original>/<Original>.swift` → `Sources/<Package>/<Package>.swift`
    fn rename_primary_sources(&self, outcome: &mut StepOutcome) -> Result<()> {
        if self.is_noop() {
            return Ok(());
        }

        let from = self.layout.source_dir(self.root, self.original());
        let to = self.layout.source_dir(self.root, self.package_name);
        self.move_path(&from, &to, outcome)?;

        self.move_path(
            &to.join(self.layout.source_file(self.original())),
            &to.join(self.layout.source_file(self.package_name)),
            outcome,
        )
    }

    fn rename_in_entry_point(&self, outcome: &mut StepOutcome) {
        let entry_point = self.layout.test_entry_point(self.root);

        if !self.fs.path_kind(&entry_point).exists() {
            outcome.warn(
                Some(&entry_point),
                TemplateError::InvalidTemplate(
                    self.template.to_path_buf(),
                    format!("no {} to update", self.layout.test_entry_point),
                ),
            );
            return;
        }

        substitute(
            self.fs,
            &entry_point,
            &[(self.original(), self.package_name)],
            outcome,
        );
    }

    fn move_path(&self, from: &Path, to: &Path, outcome: &mut StepOutcome) -> Result<()> {
        self.fs.move_path(from, to)?;
        outcome.record(Operation::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }
}
