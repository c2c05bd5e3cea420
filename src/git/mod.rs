//! Git operations abstraction layer
//!
//! The publish workflow only talks to version control through the
//! [Repository] trait, so it can be exercised against
//! [mock::MockRepository] without touching a real repository.
//!
//! - [repository::Git2Repository]: the real implementation on top of `git2`
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use actions_starter::git::Repository;
//! # fn example(repo: &dyn Repository) -> actions_starter::Result<()> {
//! if repo.status()?.is_empty() && !repo.tag_exists("v1.0.0")? {
//!     repo.create_tag("v1.0.0", false)?;
//!     repo.create_tag("v1", true)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations the publish workflow needs
///
/// Every tag operation targets the commit at `HEAD`.
///
/// ## Error Handling
///
/// Implementations report a pre-existing tag on a non-forced
/// [create_tag](Repository::create_tag) as
/// [crate::error::ActionsStarterError::TagAlreadyExists], any other tagging
/// failure as [crate::error::ActionsStarterError::TagCreation] and push
/// failures as [crate::error::ActionsStarterError::Push].
pub trait Repository: Send + Sync {
    /// Pending changes in the working tree, one entry per path.
    ///
    /// Untracked, modified, staged and deleted paths are all reported; ignored
    /// paths are not. An empty list means the tree is clean.
    fn status(&self) -> Result<Vec<String>>;

    /// Name of the checked out branch, or `None` when `HEAD` is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Whether a tag with this exact name exists locally
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create a lightweight tag at `HEAD`.
    ///
    /// With `force` an existing tag of the same name is moved; without it an
    /// existing tag is an error.
    fn create_tag(&self, name: &str, force: bool) -> Result<()>;

    /// Configured remote names, `origin` first when present
    fn list_remotes(&self) -> Result<Vec<String>>;

    /// URL of a remote, or `None` if it is not configured
    fn remote_url(&self, name: &str) -> Result<Option<String>>;

    /// Stage every change in the working tree and commit it on `HEAD`
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Push a local branch to the same name on `remote`
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push every local tag to `remote`, overwriting remote tags when `force`
    fn push_tags(&self, remote: &str, force: bool) -> Result<()>;
}
