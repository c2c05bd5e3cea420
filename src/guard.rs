//! Working-tree cleanliness check run before every publish.

use crate::error::{ActionsStarterError, Result};
use crate::git::Repository;
use tracing::debug;

/// Fail with [`ActionsStarterError::UncommittedChanges`] unless the working
/// tree has no pending changes. Read-only.
pub fn check_clean(repo: &dyn Repository) -> Result<()> {
    let pending = repo.status()?;
    debug!(pending = pending.len(), "working tree status");

    if pending.is_empty() {
        return Ok(());
    }

    const SHOWN: usize = 5;
    let mut summary = pending
        .iter()
        .take(SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if pending.len() > SHOWN {
        summary.push_str(&format!(" and {} more", pending.len() - SHOWN));
    }

    Err(ActionsStarterError::UncommittedChanges(format!(
        "{} (commit or stash them before publishing)",
        summary
    )))
}
