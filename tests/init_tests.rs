//! End-to-end instantiation tests through the command-line interface.

mod common;

use common::*;

use predicates::prelude::*;
use std::fs;

#[test]
fn test_widget_from_foo_template() {
    let (temp, template) = create_template("Foo", &["Bar"]);
    let dest = temp.path().join("Widget");

    run_init(temp.path(), "Widget", &template, &["Widget"]).success();

    assert!(dest.join("Sources/Widget/Widget.swift").exists());
    assert!(!dest.join("Sources/Foo").exists());
    assert_eq!(
        read(dest.join("Sources/Bar/Bar.swift")),
        read(template.join("Sources/Bar/Bar.swift"))
    );

    assert!(dest.join("Tests/WidgetTests/WidgetTests.swift").exists());
    assert!(!dest.join("Tests/FooTests").exists());

    let bar_tests = read(dest.join("Tests/BarTests/BarTests.swift"));
    assert!(!bar_tests.contains("Foo"));
    assert!(bar_tests.contains("@testable import Bar"));
    assert!(!read(dest.join("Tests/BarTests/XCTestManifests.swift")).contains("Foo"));

    assert!(read(dest.join("Tests/LinuxMain.swift")).contains("import WidgetTests"));
}

#[test]
fn test_manifest_declares_every_target() {
    let (temp, template) = create_template("Foo", &["Bar", "Baz"]);
    let dest = temp.path().join("Widget");

    run_init(temp.path(), "Widget", &template, &["Widget"]).success();

    let manifest = read(dest.join("Package.swift"));
    assert_eq!(manifest.matches(".target(").count(), 3);
    assert_eq!(manifest.matches(".testTarget(").count(), 3);
    for target in ["Widget", "Bar", "Baz"] {
        assert!(manifest.contains(&format!(
            "name: \"{}Tests\",\n            dependencies: [\"{}\"]),",
            target, target
        )));
    }
    assert!(manifest.contains("let package = Package(\n    name: \"Widget\","));
    assert!(manifest.contains(".library(name: \"Widget\", targets: [\"Widget\"])"));
    assert!(!manifest.contains("Foo"));
    assert!(manifest.ends_with("\n    ]\n)\n"));
}

#[test]
fn test_no_placeholders_remain() {
    let (temp, template) = create_template("Foo", &["Bar"]);
    let dest = temp.path().join("Widget");

    run_init(temp.path(), "Widget", &template, &["Widget"]).success();

    for file in all_files(&dest) {
        let text = read(&file);
        assert!(!text.contains("__PACKAGE_NAME__"), "{}", file.display());
        assert!(!text.contains("__TARGET_NAME__"), "{}", file.display());
    }
    assert_eq!(
        read(dest.join("README.md")),
        "# Widget\n\nMain target: Widget\n"
    );
    assert!(read(dest.join(".gitignore")).contains("Widget.xcodeproj"));
}

#[test]
fn test_template_is_left_untouched() {
    let (temp, template) = create_template("Foo", &["Bar"]);
    let before: Vec<_> = all_files(&template)
        .into_iter()
        .map(|f| (f.clone(), read(&f)))
        .collect();

    run_init(temp.path(), "Widget", &template, &["Widget"]).success();

    assert!(template.join("Tests/FooTests/FooTests.swift").exists());
    for (file, content) in before {
        assert_eq!(read(&file), content, "{}", file.display());
    }
}

#[test]
fn test_default_destination_is_name_in_cwd() {
    let (temp, template) = create_template("Foo", &[]);

    run_init(temp.path(), "Widget", &template, &[]).success();

    assert!(temp.path().join("Widget/Sources/Widget/Widget.swift").exists());
}

#[test]
fn test_nested_destination_parent_is_created() {
    let (temp, template) = create_template("Foo", &[]);

    run_init(temp.path(), "Widget", &template, &["packages/apps/Widget"]).success();

    assert!(
        temp.path()
            .join("packages/apps/Widget/Sources/Widget/Widget.swift")
            .exists()
    );
}

#[test]
fn test_trailing_separator_in_template_path() {
    let (temp, template) = create_template("Foo", &[]);
    let with_slash = format!("{}/", template.display());

    run_init(
        temp.path(),
        "Widget",
        std::path::Path::new(&with_slash),
        &["Widget"],
    )
    .success();

    assert!(temp.path().join("Widget/Sources/Widget/Widget.swift").exists());
}

#[test]
fn test_primary_target_override() {
    let (temp, template) = create_template("starter-template", &["Bar"]);

    run_init(
        temp.path(),
        "Widget",
        &template,
        &["Widget", "--primary-target", "Foo"],
    )
    .success();

    let dest = temp.path().join("Widget");
    assert!(dest.join("Sources/Widget/Widget.swift").exists());
    assert!(dest.join("Tests/WidgetTests/WidgetTests.swift").exists());
    assert!(!read(dest.join("Tests/BarTests/BarTests.swift")).contains("Foo"));
}

#[test]
fn test_dry_run_does_not_create_destination() {
    let (temp, template) = create_template("Foo", &["Bar"]);

    run_init(temp.path(), "Widget", &template, &["Widget", "--dry-run"])
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("Sources/Widget"));

    assert!(!temp.path().join("Widget").exists());
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains("-staging-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_dry_run_does_not_leave_parent_directories() {
    let (temp, template) = create_template("Foo", &[]);

    run_init(
        temp.path(),
        "Widget",
        &template,
        &["packages/apps/Widget", "--dry-run"],
    )
    .success();

    assert!(!temp.path().join("packages").exists());
}

#[test]
fn test_summary_reports_success() {
    let (temp, template) = create_template("Foo", &[]);

    run_init(temp.path(), "Widget", &template, &["Widget"])
        .success()
        .stdout(predicate::str::contains("Created package"));
}
