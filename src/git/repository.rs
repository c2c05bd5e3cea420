use crate::error::{ActionsStarterError, Result};
use git2::{
    Cred, CredentialType, ErrorCode, IndexAddOption, PushOptions, RemoteCallbacks,
    Repository as Git2Repo, Status, StatusOptions,
};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Initialise a new repository in `path`
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::init(path)?;

        Ok(Git2Repository { repo })
    }

    /// Add a remote
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.repo.remote(name, url)?;
        Ok(())
    }

    /// `user.name` from the git configuration, if set
    pub fn user_name(&self) -> Option<String> {
        self.repo
            .config()
            .and_then(|config| config.get_string("user.name"))
            .ok()
            .filter(|name| !name.trim().is_empty())
    }

    fn push_refspecs(&self, remote_name: &str, refspecs: &[String]) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            ActionsStarterError::push(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let config = self.repo.config()?;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            credentials(&config, url, username_from_url, allowed_types)
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, message
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        debug!(remote = remote_name, ?refspecs, "pushing");
        remote
            .push(refspecs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    ActionsStarterError::push(format!("Network error pushing to '{}': {}", remote_name, e))
                }
                _ => ActionsStarterError::push(format!("Failed to push to '{}': {}", remote_name, e)),
            })
    }
}

/// Credential lookup for pushes: SSH keys and agent, then git's credential
/// helpers, then libgit2 defaults.
fn credentials(
    config: &git2::Config,
    url: &str,
    username_from_url: Option<&str>,
    allowed_types: CredentialType,
) -> std::result::Result<Cred, git2::Error> {
    let username = username_from_url.unwrap_or("git");

    if allowed_types.contains(CredentialType::SSH_KEY) {
        if let Some(home) = dirs::home_dir() {
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = home.join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }

        if let Ok(cred) = Cred::ssh_key_from_agent(username) {
            return Ok(cred);
        }
    }

    if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
        if let Ok(cred) = Cred::credential_helper(config, url, username_from_url) {
            return Ok(cred);
        }
    }

    Cred::default()
}

fn status_label(status: Status) -> &'static str {
    if status.is_wt_new() {
        "??"
    } else if status.is_index_new() {
        "A"
    } else if status.is_index_deleted() || status.is_wt_deleted() {
        "D"
    } else if status.is_index_renamed() || status.is_wt_renamed() {
        "R"
    } else {
        "M"
    }
}

impl super::Repository for Git2Repository {
    fn status(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .filter(|entry| !entry.status().contains(Status::IGNORED))
            .map(|entry| {
                format!(
                    "{} {}",
                    status_label(entry.status()),
                    entry.path().unwrap_or("(non-utf8 path)")
                )
            })
            .collect())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.find_reference("HEAD")?;

        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string))
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn create_tag(&self, name: &str, force: bool) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| ActionsStarterError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), force)
            .map_err(|e| {
                if e.code() == ErrorCode::Exists {
                    ActionsStarterError::TagAlreadyExists(name.to_string())
                } else {
                    ActionsStarterError::tag(format!("Cannot create tag '{}': {}", name, e))
                }
            })?;

        debug!(tag = name, force, commit = %head.id(), "tag written");
        Ok(())
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        let names = self.repo.remotes()?;
        let mut remotes: Vec<String> = names.iter().flatten().map(str::to_string).collect();

        remotes.sort_by(|a, b| match (a.as_str(), b.as_str()) {
            ("origin", _) => std::cmp::Ordering::Less,
            (_, "origin") => std::cmp::Ordering::Greater,
            _ => a.cmp(b),
        });

        Ok(remotes)
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        debug!(commit = %oid, message, "committed");
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.push_refspecs(remote, &[format!("refs/heads/{0}:refs/heads/{0}", branch)])
    }

    fn push_tags(&self, remote: &str, force: bool) -> Result<()> {
        let prefix = if force { "+" } else { "" };
        let refspecs: Vec<String> = self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(|tag| format!("{0}refs/tags/{1}:refs/tags/{1}", prefix, tag))
            .collect();

        if refspecs.is_empty() {
            return Ok(());
        }

        self.push_refspecs(remote, &refspecs)
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send; the publish
// workflow is single-threaded and never shares the handle across threads.
unsafe impl Sync for Git2Repository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn repo_with_commit() -> (TempDir, Git2Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.repo.config().unwrap();
            config.set_str("user.name", "Test Author").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        fs::write(dir.path().join("README.md"), "# test\n").unwrap();
        repo.commit_all("initial").unwrap();
        (dir, repo)
    }

    #[test]
    fn test_status_reports_untracked_files() {
        let (dir, repo) = repo_with_commit();
        assert!(repo.status().unwrap().is_empty());

        fs::write(dir.path().join("new.txt"), "x").unwrap();
        let status = repo.status().unwrap();
        assert_eq!(status, vec!["?? new.txt".to_string()]);
    }

    #[test]
    fn test_status_reports_modified_files() {
        let (dir, repo) = repo_with_commit();
        fs::write(dir.path().join("README.md"), "# changed\n").unwrap();
        assert_eq!(repo.status().unwrap(), vec!["M README.md".to_string()]);
    }

    #[test]
    fn test_create_tag_strict_and_forced() {
        let (_dir, repo) = repo_with_commit();

        repo.create_tag("v1.0.0", false).unwrap();
        assert!(repo.tag_exists("v1.0.0").unwrap());

        let err = repo.create_tag("v1.0.0", false).unwrap_err();
        assert!(matches!(err, ActionsStarterError::TagAlreadyExists(_)));

        repo.create_tag("v1", false).unwrap();
        repo.create_tag("v1", true).unwrap();
        assert!(!repo.tag_exists("v2").unwrap());
    }

    #[test]
    fn test_current_branch_and_remotes() {
        let (_dir, repo) = repo_with_commit();
        assert!(repo.current_branch().unwrap().is_some());
        assert!(repo.list_remotes().unwrap().is_empty());

        repo.add_remote("upstream", "https://example.com/a.git").unwrap();
        repo.add_remote("origin", "https://example.com/b.git").unwrap();
        assert_eq!(repo.list_remotes().unwrap(), vec!["origin", "upstream"]);
        assert_eq!(
            repo.remote_url("origin").unwrap().as_deref(),
            Some("https://example.com/b.git")
        );
        assert_eq!(repo.remote_url("missing").unwrap(), None);
    }

    #[test]
    fn test_user_name() {
        let (_dir, repo) = repo_with_commit();
        assert_eq!(repo.user_name().as_deref(), Some("Test Author"));
    }
}
