//! `open` and `edit`: hand the project to the browser or an editor

use std::path::Path;

use tracing::debug;

use crate::domain::remote_web_url;
use crate::error::{ActionsStarterError, Result};
use crate::git::Repository;
use crate::launch::Launcher;
use crate::ui;

/// Web page of `remote`, derived from its fetch URL
pub fn remote_page(repo: &dyn Repository, remote: &str) -> Result<String> {
    let url = repo.remote_url(remote)?.ok_or_else(|| {
        ActionsStarterError::RemoteUrl(format!(
            "remote '{}' is not configured (git remote add {} <url>)",
            remote, remote
        ))
    })?;
    debug!(remote, %url, "remote url");

    remote_web_url(&url).ok_or_else(|| {
        ActionsStarterError::RemoteUrl(format!(
            "'{}' ({}) has no web page",
            remote, url
        ))
    })
}

/// Open the repository page of `remote` in the browser; returns the URL
pub fn run_open_workflow(
    repo: &dyn Repository,
    launcher: &dyn Launcher,
    remote: &str,
) -> Result<String> {
    let page = remote_page(repo, remote)?;
    ui::display_status(&format!("Opening {}", page));
    launcher.open_url(&page)?;
    Ok(page)
}

/// Open the project directory in `editor`
pub fn run_edit_workflow(dir: &Path, launcher: &dyn Launcher, editor: &str) -> Result<()> {
    if !dir.is_dir() {
        return Err(ActionsStarterError::config(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    ui::display_status(&format!("Opening {} in {}", dir.display(), editor));
    launcher.open_editor(editor, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::launch::MockLauncher;
    use tempfile::TempDir;

    #[test]
    fn test_open_uses_web_url_of_remote() {
        let repo = MockRepository::new();
        repo.add_remote_with_url("origin", "git@github.com:octo/hello-action.git");
        let launcher = MockLauncher::new();

        let page = run_open_workflow(&repo, &launcher, "origin").unwrap();

        assert_eq!(page, "https://github.com/octo/hello-action");
        assert_eq!(launcher.urls(), vec![page]);
    }

    #[test]
    fn test_open_without_remote_fails_before_launch() {
        let repo = MockRepository::new();
        let launcher = MockLauncher::new();

        let err = run_open_workflow(&repo, &launcher, "origin").unwrap_err();

        assert!(matches!(err, ActionsStarterError::RemoteUrl(_)));
        assert!(err.to_string().contains("git remote add origin"));
        assert!(launcher.urls().is_empty());
    }

    #[test]
    fn test_open_local_remote_has_no_page() {
        let repo = MockRepository::new();
        repo.add_remote_with_url("origin", "/srv/git/hello.git");
        let launcher = MockLauncher::new();

        let err = run_open_workflow(&repo, &launcher, "origin").unwrap_err();
        assert!(err.to_string().contains("has no web page"));
    }

    #[test]
    fn test_open_launch_failure_propagates() {
        let repo = MockRepository::new();
        repo.add_remote_with_url("origin", "https://github.com/octo/hello-action");
        let launcher = MockLauncher::new();
        launcher.fail();

        let err = run_open_workflow(&repo, &launcher, "origin").unwrap_err();
        assert!(matches!(err, ActionsStarterError::Command(_)));
    }

    #[test]
    fn test_edit_opens_directory() {
        let dir = TempDir::new().unwrap();
        let launcher = MockLauncher::new();

        run_edit_workflow(dir.path(), &launcher, "code").unwrap();

        assert_eq!(
            launcher.editors(),
            vec![("code".to_string(), dir.path().to_path_buf())]
        );
    }

    #[test]
    fn test_edit_missing_directory() {
        let dir = TempDir::new().unwrap();
        let launcher = MockLauncher::new();

        let missing = dir.path().join("gone");
        assert!(run_edit_workflow(&missing, &launcher, "code").is_err());
        assert!(launcher.editors().is_empty());
    }
}
