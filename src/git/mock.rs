use crate::error::{ActionsStarterError, Result};
use crate::git::Repository;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    pending: Vec<String>,
    branch: Option<String>,
    /// Commit messages, oldest first; `HEAD` is the last one
    commits: Vec<String>,
    /// Tag name -> index into `commits`
    tags: BTreeMap<String, usize>,
    remotes: Vec<String>,
    /// Remote name -> URL, for remotes added with a URL
    remote_urls: BTreeMap<String, String>,
    pushes: Vec<String>,
    fail_push: bool,
    fail_tagging: bool,
}

/// Mock repository for testing without actual git operations
///
/// Records every mutation so tests can assert on tags, commits and pushes.
#[derive(Debug)]
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// A clean repository on `main` with one commit and no remotes
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState {
                branch: Some("main".to_string()),
                commits: vec!["Initial commit".to_string()],
                ..MockState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark a path as having a pending change
    pub fn add_pending_change(&self, entry: impl Into<String>) {
        self.lock().pending.push(entry.into());
    }

    /// Add a tag pointing at the current `HEAD`
    pub fn add_tag(&self, name: impl Into<String>) {
        let mut state = self.lock();
        let head = state.commits.len() - 1;
        state.tags.insert(name.into(), head);
    }

    /// Configure a remote
    pub fn add_remote(&self, name: impl Into<String>) {
        self.lock().remotes.push(name.into());
    }

    /// Configure a remote with a fetch URL
    pub fn add_remote_with_url(&self, name: impl Into<String>, url: impl Into<String>) {
        let name = name.into();
        let mut state = self.lock();
        state.remote_urls.insert(name.clone(), url.into());
        state.remotes.push(name);
    }

    /// Detach `HEAD` (or attach it to `branch`)
    pub fn set_branch(&self, branch: Option<&str>) {
        self.lock().branch = branch.map(str::to_string);
    }

    /// Make every push fail
    pub fn fail_push(&self) {
        self.lock().fail_push = true;
    }

    /// Make every tag creation fail for a reason other than pre-existence
    pub fn fail_tagging(&self) {
        self.lock().fail_tagging = true;
    }

    /// Tag names, sorted
    pub fn tags(&self) -> Vec<String> {
        self.lock().tags.keys().cloned().collect()
    }

    /// Index of the commit a tag points at (0 is the initial commit)
    pub fn tag_target(&self, name: &str) -> Option<usize> {
        self.lock().tags.get(name).copied()
    }

    /// Index of the `HEAD` commit
    pub fn head(&self) -> usize {
        self.lock().commits.len() - 1
    }

    /// Commit messages, oldest first
    pub fn commits(&self) -> Vec<String> {
        self.lock().commits.clone()
    }

    /// Push log, e.g. `"origin refs/heads/main"` or `"origin +tags"`
    pub fn pushes(&self) -> Vec<String> {
        self.lock().pushes.clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn status(&self) -> Result<Vec<String>> {
        Ok(self.lock().pending.clone())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.lock().branch.clone())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.lock().tags.contains_key(name))
    }

    fn create_tag(&self, name: &str, force: bool) -> Result<()> {
        let mut state = self.lock();
        if state.fail_tagging {
            return Err(ActionsStarterError::tag(format!(
                "Cannot create tag '{}': object database is corrupt",
                name
            )));
        }
        if !force && state.tags.contains_key(name) {
            return Err(ActionsStarterError::TagAlreadyExists(name.to_string()));
        }
        let head = state.commits.len() - 1;
        state.tags.insert(name.to_string(), head);
        Ok(())
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        Ok(self.lock().remotes.clone())
    }

    fn remote_url(&self, name: &str) -> Result<Option<String>> {
        Ok(self.lock().remote_urls.get(name).cloned())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut state = self.lock();
        state.pending.clear();
        state.commits.push(message.to_string());
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut state = self.lock();
        if state.fail_push {
            return Err(ActionsStarterError::push(format!(
                "remote '{}' rejected refs/heads/{}",
                remote, branch
            )));
        }
        state.pushes.push(format!("{} refs/heads/{}", remote, branch));
        Ok(())
    }

    fn push_tags(&self, remote: &str, force: bool) -> Result<()> {
        let mut state = self.lock();
        if state.fail_push {
            return Err(ActionsStarterError::push(format!(
                "remote '{}' rejected tags",
                remote
            )));
        }
        let entry = if force { "+tags" } else { "tags" };
        state.pushes.push(format!("{} {}", remote, entry));
        Ok(())
    }
}
