//! Outcome of a template instantiation run.
//!
//! Every pipeline step returns a [`StepOutcome`]: the operations it applied
//! and the issues it ran into. A failing file never stops the run; the
//! orchestrator collects the outcomes into an [`InstantiateReport`] and the
//! caller decides what a failure means via [`InstantiateReport::into_result`].

use crate::error::{Result, TemplateError};

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Pipeline stage that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Copy,
    Discover,
    Manifest,
    Placeholders,
    Rename,
    Verify,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Copy => "copy",
            Step::Discover => "discover",
            Step::Manifest => "manifest",
            Step::Placeholders => "placeholders",
            Step::Rename => "rename",
            Step::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// A file system change applied to the staged package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Copied from the template (file or directory tree).
    Copy { from: PathBuf, to: PathBuf },
    /// Renamed inside the staged package.
    Move { from: PathBuf, to: PathBuf },
    /// File contents rewritten.
    Rewrite { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The step did not do what it should have.
    Failure,
    /// Worth telling the user; the package is still as intended.
    Warning,
}

#[derive(Debug)]
pub struct Issue {
    pub severity: Severity,
    pub path: Option<PathBuf>,
    pub error: TemplateError,
}

/// What one step did.
#[derive(Debug)]
pub struct StepOutcome {
    step: Step,
    operations: Vec<Operation>,
    issues: Vec<Issue>,
}

impl StepOutcome {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            operations: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&mut self, op: Operation) {
        self.operations.push(op);
    }

    pub fn fail(&mut self, path: Option<&Path>, error: TemplateError) {
        log::debug!("[{}] failure: {}", self.step, error);
        self.issues.push(Issue {
            severity: Severity::Failure,
            path: path.map(Path::to_path_buf),
            error,
        });
    }

    pub fn warn(&mut self, path: Option<&Path>, error: TemplateError) {
        log::debug!("[{}] warning: {}", self.step, error);
        self.issues.push(Issue {
            severity: Severity::Warning,
            path: path.map(Path::to_path_buf),
            error,
        });
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn failures(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Failure)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Returns true if nothing failed (warnings allowed).
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Statistics about a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub copied: usize,
    pub moved: usize,
    pub rewritten: usize,
    pub failures: usize,
    pub warnings: usize,
}

/// Collected outcomes of every step of one run.
#[derive(Debug)]
pub struct InstantiateReport {
    package_name: String,
    staging_root: PathBuf,
    destination: PathBuf,
    dry_run: bool,
    committed: bool,
    steps: Vec<StepOutcome>,
}

impl InstantiateReport {
    pub fn new(
        package_name: &str,
        staging_root: &Path,
        destination: &Path,
        dry_run: bool,
    ) -> Self {
        Self {
            package_name: package_name.to_string(),
            staging_root: staging_root.to_path_buf(),
            destination: destination.to_path_buf(),
            dry_run,
            committed: false,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: StepOutcome) {
        for issue in outcome.issues() {
            match issue.severity {
                Severity::Failure => log::warn!("{} step failed: {}", outcome.step, issue.error),
                Severity::Warning => log::info!("{} step: {}", outcome.step, issue.error),
            }
        }
        self.steps.push(outcome);
    }

    pub fn mark_committed(&mut self) {
        self.committed = true;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.steps.iter().flat_map(|s| s.operations.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = (Step, &Issue)> {
        self.steps
            .iter()
            .flat_map(|s| s.failures().map(move |i| (s.step, i)))
    }

    pub fn warnings(&self) -> impl Iterator<Item = (Step, &Issue)> {
        self.steps
            .iter()
            .flat_map(|s| s.warnings().map(move |i| (s.step, i)))
    }

    /// Returns true if no step recorded a failure.
    pub fn is_clean(&self) -> bool {
        self.steps.iter().all(StepOutcome::is_clean)
    }

    pub fn stats(&self) -> ReportStats {
        let mut stats = ReportStats::default();

        for op in self.operations() {
            match op {
                Operation::Copy { .. } => stats.copied += 1,
                Operation::Move { .. } => stats.moved += 1,
                Operation::Rewrite { .. } => stats.rewritten += 1,
            }
        }
        stats.failures = self.failures().count();
        stats.warnings = self.warnings().count();

        stats
    }

    /// Converts recorded failures into `Incomplete`.
    pub fn into_result(self) -> Result<Self> {
        match self.failures().count() {
            0 => Ok(self),
            n => Err(TemplateError::Incomplete(n)),
        }
    }

    /// Path relative to the package root, with forward slashes.
    fn display_path(&self, path: &Path) -> String {
        if path.starts_with(&self.staging_root) {
            let relative = pathdiff::diff_paths(path, &self.staging_root)
                .unwrap_or_else(|| path.to_path_buf());
            relative.to_string_lossy().replace('\\', "/")
        } else {
            path.display().to_string()
        }
    }

    /// Prints categorized summary to stdout.
    pub fn print_summary(&self) {
        if self.dry_run {
            println!("\n{}", "DRY RUN - No changes will be made".yellow().bold());
        } else if self.committed {
            println!("\n{}", "Changes applied:".green().bold());
        }

        let mut directories = Vec::new();
        let mut files = Vec::new();

        for op in self.operations() {
            match op {
                Operation::Copy { from, to } => {
                    if to == &self.staging_root {
                        directories.push(format!("{} → {}", from.display(), self.destination.display()));
                    } else {
                        directories.push(format!("{} (copied)", self.display_path(to)));
                    }
                }
                Operation::Move { from, to } => directories.push(format!(
                    "{} → {}",
                    self.display_path(from).yellow(),
                    self.display_path(to).green()
                )),
                Operation::Rewrite { path } => files.push(self.display_path(path)),
            }
        }
        files.sort();
        files.dedup();

        let bullet = |s: &str| {
            if self.dry_run {
                println!("   • {}", s.dimmed());
            } else {
                println!("   {} {}", "✓".green(), s.dimmed());
            }
        };

        if !directories.is_empty() {
            println!("\n{} Directories", "📁".bold());
            for line in &directories {
                if self.dry_run {
                    println!("   • {}", line);
                } else {
                    println!("   {} {}", "✓".green(), line);
                }
            }
        }

        if !files.is_empty() {
            println!(
                "\n{} Files ({} file{})",
                "📝".bold(),
                files.len(),
                if files.len() == 1 { "" } else { "s" }
            );
            for path in files.iter().take(8) {
                bullet(path);
            }
            if files.len() > 8 {
                println!("   … {} more", files.len() - 8);
            }
        }

        let warnings: Vec<_> = self.warnings().collect();
        if !warnings.is_empty() {
            println!("\n{} Warnings", "⚠".yellow().bold());
            for (step, issue) in warnings {
                println!("   [{}] {}", step, issue.error.to_string().yellow());
            }
        }

        let failures: Vec<_> = self.failures().collect();
        if !failures.is_empty() {
            println!("\n{} Failures", "✗".red().bold());
            for (step, issue) in &failures {
                println!("   [{}] {}", step, issue.error.to_string().red());
            }
        }

        println!();
        let stats = self.stats();
        if self.dry_run {
            println!(
                "{} operations would create package {}. Run without {} to apply.",
                (stats.copied + stats.moved + stats.rewritten)
                    .to_string()
                    .cyan()
                    .bold(),
                self.package_name.green().bold(),
                "--dry-run".cyan()
            );
        } else if failures.is_empty() {
            println!(
                "{} Created package {} at {}",
                "✓".green().bold(),
                self.package_name.green().bold(),
                self.destination.display()
            );
        } else {
            println!(
                "{} Created package {} with {} failed step(s); review the files listed above",
                "⚠".yellow().bold(),
                self.package_name.yellow().bold(),
                failures.len()
            );
        }
    }
}
