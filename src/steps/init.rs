//! Orchestration logic for `swift-template init`.

use crate::error::{Result, TemplateError};
use crate::template::{PackageTemplate, TemplateOptions};

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Name of the new package
    pub name: String,

    /// Template package to copy (its directory name is the name being replaced)
    #[arg(long, short = 't', value_name = "PATH")]
    pub template: PathBuf,

    /// Where to create the package [default: ./<NAME>]
    pub destination: Option<PathBuf>,

    /// Template target to rename to NAME instead of the template directory name
    #[arg(long, value_name = "TARGET")]
    pub primary_target: Option<String>,

    /// Preview changes without creating the package
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Exit successfully even if some files could not be renamed
    #[arg(long)]
    pub allow_partial: bool,
}

impl InitArgs {
    /// Returns the destination, defaulting to `./<name>`.
    pub fn destination(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.name))
    }

    /// Validates the arguments are coherent.
    pub fn validate(&self) -> Result<()> {
        if self.primary_target.as_deref() == Some("") {
            return Err(TemplateError::Other(anyhow::anyhow!(
                "--primary-target cannot be empty"
            )));
        }

        Ok(())
    }

    fn options(&self) -> TemplateOptions {
        TemplateOptions {
            primary_target: self.primary_target.clone(),
            dry_run: self.dry_run,
            ..Default::default()
        }
    }
}

/// Executes a template instantiation.
///
/// ## Phases
///
/// 1. Validate arguments and package name
/// 2. Run the pipeline (staged, committed unless `--dry-run`)
/// 3. Print summary
/// 4. Fail if any step failed, unless `--allow-partial`
pub fn execute(args: InitArgs) -> Result<()> {
    args.validate()?;

    let destination = args.destination();
    log::debug!(
        "Instantiating '{}' from {} into {}",
        args.name,
        args.template.display(),
        destination.display()
    );

    let template = PackageTemplate::instantiate(&args.name, &args.template, &destination)?
        .with_options(args.options());

    let report = template.run()?;
    report.print_summary();

    if args.allow_partial {
        if !report.is_clean() {
            eprintln!(
                "{} continuing despite failures (--allow-partial)",
                "⚠".yellow().bold()
            );
        }
        return Ok(());
    }

    report.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> InitArgs {
        InitArgs {
            name: name.into(),
            template: PathBuf::from("/tpl/Foo"),
            destination: None,
            primary_target: None,
            dry_run: false,
            allow_partial: false,
        }
    }

    #[test]
    fn test_destination_defaults_to_name() {
        assert_eq!(args("Widget").destination(), PathBuf::from("Widget"));
    }

    #[test]
    fn test_destination_explicit() {
        let mut a = args("Widget");
        a.destination = Some(PathBuf::from("packages/widget"));
        assert_eq!(a.destination(), PathBuf::from("packages/widget"));
    }

    #[test]
    fn test_validate_rejects_empty_primary_target() {
        let mut a = args("Widget");
        a.primary_target = Some(String::new());
        assert!(a.validate().is_err());

        a.primary_target = Some("Core".into());
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_options_carry_flags() {
        let mut a = args("Widget");
        a.dry_run = true;
        a.primary_target = Some("Core".into());

        let options = a.options();
        assert!(options.dry_run);
        assert_eq!(options.primary_target.as_deref(), Some("Core"));
        assert_eq!(options.layout.manifest, "Package.swift");
    }
}
