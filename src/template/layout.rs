//! On-disk layout of a package.
//!
//! ```text
//! <root>/
//!   Package.swift
//!   Sources/<Target>/<Target>.swift
//!   Tests/<Target>Tests/<Target>Tests.swift
//!   Tests/<Target>Tests/XCTestManifests.swift
//!   Tests/LinuxMain.swift
//! ```

use std::path::{Path, PathBuf};

/// Literal placeholder for the package name.
pub const PACKAGE_NAME_PLACEHOLDER: &str = "__PACKAGE_NAME__";
/// Literal placeholder for the target name. Substituted with the package name.
pub const TARGET_NAME_PLACEHOLDER: &str = "__TARGET_NAME__";

pub const PLACEHOLDERS: [&str; 2] = [PACKAGE_NAME_PLACEHOLDER, TARGET_NAME_PLACEHOLDER];

/// File and directory names the pipeline expects in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    pub manifest: String,
    pub sources_dir: String,
    pub tests_dir: String,
    pub tests_suffix: String,
    pub source_extension: String,
    /// Per-target file listing the test cases of that target.
    pub test_manifest: String,
    /// Top-level test runner in `Tests/`.
    pub test_entry_point: String,
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self {
            manifest: "Package.swift".to_string(),
            sources_dir: "Sources".to_string(),
            tests_dir: "Tests".to_string(),
            tests_suffix: "Tests".to_string(),
            source_extension: "swift".to_string(),
            test_manifest: "XCTestManifests.swift".to_string(),
            test_entry_point: "LinuxMain.swift".to_string(),
        }
    }
}

impl PackageLayout {
    pub fn sources(&self, root: &Path) -> PathBuf {
        root.join(&self.sources_dir)
    }

    pub fn tests(&self, root: &Path) -> PathBuf {
        root.join(&self.tests_dir)
    }

    /// `Sources/<target>`
    pub fn source_dir(&self, root: &Path, target: &str) -> PathBuf {
        self.sources(root).join(target)
    }

    /// `<target>.swift`
    pub fn source_file(&self, target: &str) -> String {
        format!("{}.{}", target, self.source_extension)
    }

    /// `<target>Tests`
    pub fn test_target(&self, target: &str) -> String {
        format!("{}{}", target, self.tests_suffix)
    }

    /// `Tests/<target>Tests`
    pub fn test_dir(&self, root: &Path, target: &str) -> PathBuf {
        self.tests(root).join(self.test_target(target))
    }

    /// `<target>Tests.swift`
    pub fn test_file(&self, target: &str) -> String {
        format!("{}.{}", self.test_target(target), self.source_extension)
    }

    pub fn test_entry_point(&self, root: &Path) -> PathBuf {
        self.tests(root).join(&self.test_entry_point)
    }
}
