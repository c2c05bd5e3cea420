use thiserror::Error;

/// Unified error type for actions-starter operations
#[derive(Error, Debug)]
pub enum ActionsStarterError {
    #[error("Working tree has uncommitted changes: {0}")]
    UncommittedChanges(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Tag already exists: {0}")]
    TagAlreadyExists(String),

    #[error("Cannot read package manifest: {0}")]
    ManifestRead(String),

    #[error("Failed to update package manifest: {0}")]
    ManifestUpdate(String),

    #[error("Failed to create tag: {0}")]
    TagCreation(String),

    #[error("Push failed: {0}")]
    Push(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory is not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Cannot open remote: {0}")]
    RemoteUrl(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in actions-starter
pub type Result<T> = std::result::Result<T, ActionsStarterError>;

impl ActionsStarterError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ActionsStarterError::Config(msg.into())
    }

    /// Create an invalid version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ActionsStarterError::InvalidVersion(msg.into())
    }

    /// Create a tag creation error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ActionsStarterError::TagCreation(msg.into())
    }

    /// Create a push error with context
    pub fn push(msg: impl Into<String>) -> Self {
        ActionsStarterError::Push(msg.into())
    }

    /// Create a manifest update error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ActionsStarterError::ManifestUpdate(msg.into())
    }

    /// Create a subprocess error with context
    pub fn command(msg: impl Into<String>) -> Self {
        ActionsStarterError::Command(msg.into())
    }

    /// True when local state was already committed and tagged before the failure.
    pub fn leaves_local_state_diverged(&self) -> bool {
        matches!(self, ActionsStarterError::Push(_))
    }
}
