// tests/cli_test.rs
use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn actions_starter(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_actions-starter"))
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// A repository with a committed package.json at 1.0.0
fn committed_action() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    fs::write(
        dir.path().join("package.json"),
        "{\n  \"name\": \"hello-action\",\n  \"version\": \"1.0.0\"\n}\n",
    )
    .unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("package.json")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Test Author", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])
        .unwrap();

    dir
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let output = actions_starter(dir.path(), &["--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("init"));
    assert!(help.contains("publish"));
    assert!(help.contains("open"));
    assert!(help.contains("edit"));
}

#[test]
fn test_publish_help_lists_bump_keywords() {
    let dir = TempDir::new().unwrap();
    let output = actions_starter(dir.path(), &["publish", "--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("prerelease"));
    assert!(help.contains("--latest"));
    assert!(help.contains("--dry-run"));
}

#[test]
fn test_publish_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let output = actions_starter(dir.path(), &["publish", "patch"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_publish_invalid_version_fails() {
    let dir = committed_action();
    let output = actions_starter(dir.path(), &["publish", "not-a-version"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not-a-version"));
}

#[test]
fn test_publish_build_metadata_fails_without_tagging() {
    let dir = committed_action();
    let output = actions_starter(dir.path(), &["publish", "1.2.0+build.1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("build metadata"));
    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.tag_names(None).unwrap().is_empty());
}

#[test]
fn test_publish_dirty_tree_fails() {
    let dir = committed_action();
    fs::write(dir.path().join("wip.txt"), "wip").unwrap();

    let output = actions_starter(dir.path(), &["publish", "patch"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("wip.txt"));
}

#[test]
fn test_publish_dry_run_leaves_repository_untouched() {
    let dir = committed_action();
    let output = actions_starter(dir.path(), &["publish", "minor", "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("1.1.0"));
    assert!(out.contains("v1.1.0"));

    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.tag_names(None).unwrap().is_empty());
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"1.0.0\""));
}

#[test]
fn test_init_skip_install_writes_project() {
    let dir = TempDir::new().unwrap();
    let output = actions_starter(
        dir.path(),
        &[
            "init",
            "--project",
            "hello-action",
            "--author",
            "Octo Cat",
            "--license",
            "MIT",
            "--skip-install",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("action.yml").is_file());
    assert!(dir.path().join(".git").is_dir());
    let license = fs::read_to_string(dir.path().join("LICENSE")).unwrap();
    assert!(license.starts_with("MIT License"));
    assert!(stdout(&output).contains("npm run build"));
}

#[test]
fn test_init_rejects_unknown_test_framework() {
    let dir = TempDir::new().unwrap();
    let output = actions_starter(
        dir.path(),
        &["init", "--project", "hello-action", "--test", "ava", "--skip-install"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ava"));
}

#[test]
fn test_open_print_shows_repository_page() {
    let dir = committed_action();
    Repository::open(dir.path())
        .unwrap()
        .remote("origin", "git@github.com:octo/hello-action.git")
        .unwrap();

    let output = actions_starter(dir.path(), &["open", "--print"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "https://github.com/octo/hello-action");
}

#[test]
fn test_open_without_origin_fails() {
    let dir = committed_action();
    let output = actions_starter(dir.path(), &["open", "--print"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'origin' is not configured"));
}

#[test]
fn test_edit_with_missing_editor_fails() {
    let dir = TempDir::new().unwrap();
    let output = actions_starter(dir.path(), &["edit", "--editor", "definitely-not-an-editor-4242"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("definitely-not-an-editor-4242"));
}

#[cfg(unix)]
#[test]
fn test_edit_runs_configured_editor() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("actions-starter.toml"), "[edit]\neditor = \"true\"\n").unwrap();

    let output = actions_starter(dir.path(), &["edit"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}
