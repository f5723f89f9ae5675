use std::fs;
use std::path::Path;

use tempfile::TempDir;
use utilkit::readme::{self, ReconcileOptions, Section};

const MANIFEST: &str = r#"{"name":"pkg","version":"1.0.0","description":"desc"}"#;

fn repo(readme: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), MANIFEST).unwrap();
    fs::write(dir.path().join("README.md"), readme).unwrap();
    dir
}

fn options(dir: &Path, sections: Vec<Section>) -> ReconcileOptions {
    ReconcileOptions {
        auto_create_missing: true,
        repo_path: dir.to_string_lossy().to_string(),
        sections,
        ..ReconcileOptions::default()
    }
}

fn read_readme(dir: &Path) -> String {
    fs::read_to_string(dir.join("README.md")).unwrap()
}

#[test]
fn empty_readme_gets_title_description_and_required_section() {
    let dir = repo("");
    let parsed = readme::reconcile(&options(dir.path(), vec![Section::new("Usage").required()]))
        .unwrap();

    let content = read_readme(dir.path());
    assert!(content.starts_with("# pkg\n\ndesc\n\n"));
    assert!(content.contains("## Usage"));

    assert_eq!(parsed.title, "# pkg");
    assert_eq!(parsed.description, "desc");
    assert_eq!(parsed.sections, vec![Section::new("Usage").required()]);
}

#[test]
fn missing_title_is_prepended_to_existing_content() {
    let dir = repo("Some intro\n");
    readme::reconcile(&options(dir.path(), Vec::new())).unwrap();

    assert_eq!(read_readme(dir.path()), "# pkg\n\ndesc\n\nSome intro\n");
}

#[test]
fn validate_only_with_missing_required_section_fails_without_writing() {
    let original = "# pkg\n\ndesc\n";
    let dir = repo(original);

    for auto_create_missing in [true, false] {
        let opts = ReconcileOptions {
            auto_create_missing,
            validate_only: true,
            ..options(dir.path(), vec![Section::new("Usage").required()])
        };
        let err = readme::reconcile(&opts).unwrap_err();
        assert_eq!(err.code.as_str(), "readme.section_missing");
        assert!(err.is_validation());
    }

    assert_eq!(read_readme(dir.path()), original);
}

#[test]
fn validate_only_passes_conforming_readme_and_leaves_file_alone() {
    let original = "# pkg\n\ndesc\n\n## usage\n\nrun it\n";
    let dir = repo(original);

    let opts = ReconcileOptions {
        validate_only: true,
        ..options(dir.path(), vec![Section::new("Usage").required()])
    };
    readme::reconcile(&opts).unwrap();

    assert_eq!(read_readme(dir.path()), original);
}

#[test]
fn validate_only_rejects_title_drift() {
    let dir = repo("# other\n\ndesc\n");
    let opts = ReconcileOptions {
        validate_only: true,
        ..options(dir.path(), Vec::new())
    };

    let err = readme::reconcile(&opts).unwrap_err();
    assert_eq!(err.code.as_str(), "readme.title_mismatch");
}

#[test]
fn second_run_sees_sections_created_by_the_first() {
    let dir = repo("");
    let opts = options(dir.path(), vec![Section::new("Usage")]);

    readme::reconcile(&opts).unwrap();
    let first = read_readme(dir.path());
    readme::reconcile(&opts).unwrap();

    assert_eq!(read_readme(dir.path()), first);
    assert_eq!(first.matches("## Usage").count(), 1);
}

#[test]
fn repeated_create_section_duplicates_the_heading() {
    let once = readme::create_section("# pkg\n", &Section::new("Usage"));
    let twice = readme::create_section(&once, &Section::new("Usage"));

    assert_eq!(twice.matches("## Usage").count(), 2);
}

#[test]
fn update_content_replaces_existing_section_body() {
    let dir = repo("# pkg\n\ndesc\n\n## Usage\n\nold\n## License\n\nMIT\n");
    let opts = ReconcileOptions {
        update_content: true,
        ..options(
            dir.path(),
            vec![Section::new("Usage").with_content("npm i pkg\n")],
        )
    };

    readme::reconcile(&opts).unwrap();

    assert_eq!(
        read_readme(dir.path()),
        "# pkg\n\ndesc\n\n## Usage\n\nnpm i pkg\n## License\n\nMIT\n"
    );
}

#[test]
fn missing_readme_is_not_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), MANIFEST).unwrap();

    let err = readme::reconcile(&options(dir.path(), Vec::new())).unwrap_err();
    assert_eq!(err.code.as_str(), "readme.not_found");
    assert!(err.is_not_found());
}

#[test]
fn explicit_manifest_path_overrides_discovery() {
    let dir = repo("");
    let manifest_path = dir.path().join("custom.json");
    fs::write(
        &manifest_path,
        r#"{"name":"custom","version":"0.1.0","description":"other"}"#,
    )
    .unwrap();

    let opts = ReconcileOptions {
        manifest_path: Some(manifest_path),
        ..options(dir.path(), Vec::new())
    };
    let parsed = readme::reconcile(&opts).unwrap();

    assert_eq!(parsed.title, "# custom");
    assert!(read_readme(dir.path()).starts_with("# custom\n\nother\n\n"));
}

#[test]
fn settings_file_drives_sections() {
    let dir = repo("");
    fs::write(
        dir.path().join(readme::SETTINGS_FILE_NAME),
        r#"{"sections":[{"header":"Install","content":"npm i pkg"}],"repoSlug":"owner/pkg"}"#,
    )
    .unwrap();

    let manifest = utilkit::manifest::resolve(None, Some(dir.path())).unwrap();
    let file = readme::load_settings(dir.path()).unwrap();
    let effective = readme::resolve_effective_settings(
        &manifest,
        file.as_ref(),
        &readme::SettingsOverrides::default(),
        dir.path(),
    );
    let opts = effective.to_reconcile_options(
        &manifest,
        &dir.path().to_string_lossy(),
        None,
        false,
    );

    readme::reconcile(&opts).unwrap();
    assert!(read_readme(dir.path()).ends_with("## Install\n\nnpm i pkg\n"));
}

/// Path to `target` spelled relative to the process working directory.
#[cfg(unix)]
fn relative_to_cwd(target: &Path) -> std::path::PathBuf {
    let cwd = std::env::current_dir().unwrap();
    let mut relative = std::path::PathBuf::new();
    for _ in cwd.components().skip(1) {
        relative.push("..");
    }
    relative.join(target.strip_prefix("/").unwrap())
}

#[cfg(unix)]
#[test]
fn relative_repo_path_discovers_ancestor_manifest() {
    let root = TempDir::new().unwrap();
    let root = root.path();
    let readme_dir = root.join("a");
    let child = readme_dir.join("b");
    fs::create_dir_all(&child).unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"name":"ancestor","version":"1.0.0","description":"up top"}"#,
    )
    .unwrap();
    fs::write(
        child.join("package.json"),
        r#"{"name":"child","version":"1.0.0","description":"below"}"#,
    )
    .unwrap();
    fs::write(readme_dir.join("README.md"), "").unwrap();

    let repo_path = relative_to_cwd(&child).join("..");
    assert!(repo_path.is_relative());

    let opts = ReconcileOptions {
        auto_create_missing: true,
        repo_path: repo_path.to_string_lossy().to_string(),
        ..ReconcileOptions::default()
    };
    let parsed = readme::reconcile(&opts).unwrap();

    assert_eq!(parsed.title, "# ancestor");
    assert!(read_readme(&readme_dir).starts_with("# ancestor\n\nup top\n\n"));
}
