//! Shared fixtures for swift-template integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MANIFEST: &str = r#"// swift-tools-version:4.2
import PackageDescription

let package = Package(
    name: "__PACKAGE_NAME__",
    products: [
        .library(name: "Foo", targets: ["Foo"]),
    ],
    dependencies: [],
    targets: [
        .target(
            name: "Foo",
            dependencies: []),
        .testTarget(
            name: "FooTests",
            dependencies: ["Foo"]),
    ]
)
"#;

/// Creates `<temp>/templates/<dir_name>` with a primary target `Foo` plus
/// `secondary` targets. Returns the temp dir and the template path.
pub fn create_template(dir_name: &str, secondary: &[&str]) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("templates").join(dir_name);

    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("Package.swift"), MANIFEST).unwrap();
    fs::write(
        root.join("README.md"),
        "# __PACKAGE_NAME__\n\nMain target: __TARGET_NAME__\n",
    )
    .unwrap();
    fs::write(root.join(".gitignore"), ".build/\n__PACKAGE_NAME__.xcodeproj\n").unwrap();

    for target in std::iter::once(&"Foo").chain(secondary) {
        let dir = root.join("Sources").join(target);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}.swift", target)),
            format!("struct {} {{\n    var text = \"Hello\"\n}}\n", target),
        )
        .unwrap();
    }

    let tests = root.join("Tests/FooTests");
    fs::create_dir_all(&tests).unwrap();
    fs::write(
        tests.join("FooTests.swift"),
        "import XCTest\n@testable import Foo\n\nfinal class FooTests: XCTestCase {\n    func testExample() {\n        XCTAssertEqual(Foo().text, \"Hello\")\n    }\n}\n",
    )
    .unwrap();
    fs::write(
        tests.join("XCTestManifests.swift"),
        "import XCTest\n\npublic func allTests() -> [XCTestCaseEntry] {\n    return [testCase(FooTests.allTests)]\n}\n",
    )
    .unwrap();
    fs::write(
        root.join("Tests/LinuxMain.swift"),
        "import XCTest\nimport FooTests\n\nvar tests = [XCTestCaseEntry]()\ntests += FooTests.allTests()\nXCTMain(tests)\n",
    )
    .unwrap();

    (temp, root)
}

/// Runs `swift-template init` from `cwd`.
pub fn run_init(
    cwd: &Path,
    name: &str,
    template: &Path,
    extra_args: &[&str],
) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("swift-template");
    cmd.arg("init")
        .arg(name)
        .arg("--template")
        .arg(template)
        .args(extra_args)
        .current_dir(cwd);

    cmd.assert()
}

/// Every file under `root`, recursively.
#[allow(unused)]
pub fn all_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(all_files(&path));
        } else {
            files.push(path);
        }
    }
    files
}

#[allow(unused)]
pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("cannot read {}: {}", path.as_ref().display(), e))
}
