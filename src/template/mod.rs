//! Template instantiation pipeline.
//!
//! ## Phases
//!
//! 1. **Preflight**: template layout, package name, destination
//! 2. **Copy**: template tree into a staging directory
//! 3. **Discover**: targets under `Sources/` and the original name
//! 4. **Manifest**: regenerate target declarations, rename the package
//! 5. **Placeholders**: `__PACKAGE_NAME__` / `__TARGET_NAME__` in top-level files
//! 6. **Rename**: source/test directories and their primary files
//! 7. **Verify**: leftover placeholders and source directories
//! 8. **Commit**: one rename of the staged tree onto the destination
//!
//! Steps 4 to 7 never abort the run; their failures end up in the
//! [`InstantiateReport`].
//!
//! ## Example
//!
//! ```no_run
//! # use swift_template::template::PackageTemplate;
//! # fn example() -> swift_template::error::Result<()> {
//! let report = PackageTemplate::instantiate("Widget", "/templates/Foo", "Widget")?.run()?;
//! report.into_result()?; // Err if any step failed
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod copy;
pub mod discover;
pub mod layout;
pub mod manifest;
pub mod rename;

pub use discover::Discovery;
pub use layout::PackageLayout;

use crate::error::Result;
use crate::fs::{FileSystem, Staging, StdFs};
use crate::report::{InstantiateReport, Step, StepOutcome};
use crate::verify::{preflight_checks, validate_package_name};

use std::path::{Path, PathBuf};

/// Knobs for one instantiation.
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    /// Template target renamed to the package name. Defaults to the
    /// template's directory name.
    pub primary_target: Option<String>,
    pub layout: PackageLayout,
    /// Run the whole pipeline in staging, then throw it away.
    pub dry_run: bool,
}

/// A template bound to a package name and destination.
pub struct PackageTemplate<F: FileSystem = StdFs> {
    package_name: String,
    source: PathBuf,
    destination: PathBuf,
    options: TemplateOptions,
    fs: F,
}

impl PackageTemplate<StdFs> {
    /// Prepares an instantiation. Validates the package name; nothing is
    /// read or written until [`run`](PackageTemplate::run).
    pub fn instantiate(
        package_name: impl Into<String>,
        template: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Result<Self> {
        let package_name = package_name.into();
        validate_package_name(&package_name)?;

        Ok(Self {
            package_name,
            source: template.into(),
            destination: destination.into(),
            options: TemplateOptions::default(),
            fs: StdFs,
        })
    }
}

impl<F: FileSystem> PackageTemplate<F> {
    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_filesystem<G: FileSystem>(self, fs: G) -> PackageTemplate<G> {
        PackageTemplate {
            package_name: self.package_name,
            source: self.source,
            destination: self.destination,
            options: self.options,
            fs,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Runs the full pipeline.
    ///
    /// Returns `Err` only when nothing usable could be produced (bad
    /// template, occupied destination, failed copy or commit); the
    /// destination is then left as it was. Otherwise the package is
    /// committed (unless dry run) and per-step failures are in the report.
    pub fn run(&self) -> Result<InstantiateReport> {
        let layout = &self.options.layout;

        if let Some(primary) = &self.options.primary_target {
            validate_package_name(primary)?;
        }
        preflight_checks(&self.fs, &self.source, &self.destination, layout)?;

        let mut staging = Staging::new(&self.destination)?;
        let mut report = InstantiateReport::new(
            &self.package_name,
            staging.root(),
            &self.destination,
            self.options.dry_run,
        );

        if let Err(e) = self.stage(staging.root(), &mut report) {
            if let Err(discard_err) = staging.discard() {
                log::warn!("Could not clean up staging: {}", discard_err);
            }
            return Err(e);
        }

        if self.options.dry_run {
            staging.discard()?;
        } else {
            staging.commit()?;
            report.mark_committed();
        }

        Ok(report)
    }

    fn stage(&self, root: &Path, report: &mut InstantiateReport) -> Result<()> {
        let fs: &dyn FileSystem = &self.fs;
        let layout = &self.options.layout;

        let (entries, outcome) = copy::copy_template(fs, &self.source, root)?;
        report.push(outcome);

        let (discovery, outcome) = discover::discover(
            fs,
            &self.source,
            layout,
            self.options.primary_target.as_deref(),
        )?;
        report.push(outcome);

        if entries.iter().any(|e| e == &layout.manifest) {
            report.push(manifest::rewrite_manifest(
                fs,
                &root.join(&layout.manifest),
                &discovery.targets,
                &discovery.original_name,
                &self.package_name,
                layout,
            ));
        }

        report.push(content::substitute_placeholders(
            fs,
            root,
            &entries,
            &self.package_name,
        ));

        report.push(
            rename::Renamer {
                fs,
                root,
                template: &self.source,
                discovery: &discovery,
                package_name: &self.package_name,
                layout,
            }
            .run(),
        );

        report.push(self.verify(root, &discovery));
        Ok(())
    }

    /// Warns about anything the pipeline left behind.
    fn verify(&self, root: &Path, discovery: &Discovery) -> StepOutcome {
        let mut outcome = StepOutcome::new(Step::Verify);
        let fs: &dyn FileSystem = &self.fs;

        let scan = content::find_residual_placeholders(fs, root);
        for path in scan.placeholders {
            outcome.warn(
                Some(&path),
                crate::error::TemplateError::Other(anyhow::anyhow!(
                    "Placeholder left in {}",
                    path.display()
                )),
            );
        }
        for (path, error) in scan.unreadable {
            outcome.warn(
                path.as_deref(),
                crate::error::TemplateError::Other(anyhow::anyhow!(
                    "Could not check for placeholders: {}",
                    error
                )),
            );
        }

        let leftover = self.options.layout.source_dir(root, &discovery.original_name);
        if discovery.original_name != self.package_name && fs.path_kind(&leftover).exists() {
            outcome.warn(
                Some(&leftover),
                crate::error::TemplateError::Other(anyhow::anyhow!(
                    "Source directory still named '{}'",
                    discovery.original_name
                )),
            );
        }

        outcome
    }
}
