use std::fmt;

/// Non-fatal conditions reported to the user while publishing or scaffolding.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No remote is configured; the release stays local
    NoRemoteConfigured { version: String },
    /// `HEAD` is detached, so only tags are pushed
    DetachedHead { remote: String },
    /// Local commits and tags were written but could not be pushed
    LocalStateDiverged { remote: String, tags: Vec<String> },
    /// `init` could not determine the `origin` URL of an existing repository
    RemoteUnknown,
    /// No bundled LICENSE text for this identifier
    LicenseUnavailable { license: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoRemoteConfigured { version } => {
                write!(
                    f,
                    "No git remote configured; {} was tagged locally and not pushed",
                    version
                )
            }
            BoundaryWarning::DetachedHead { remote } => {
                write!(
                    f,
                    "HEAD is detached; pushing tags to '{}' without a branch",
                    remote
                )
            }
            BoundaryWarning::LocalStateDiverged { remote, tags } => {
                write!(
                    f,
                    "Local repository is ahead of '{}': the version commit and tags [{}] exist only locally. Push them manually with `git push {} && git push {} --tags --force`",
                    remote,
                    tags.join(", "),
                    remote,
                    remote
                )
            }
            BoundaryWarning::RemoteUnknown => {
                write!(f, "Unable to determine remote repository")
            }
            BoundaryWarning::LicenseUnavailable { license } => {
                write!(
                    f,
                    "No LICENSE text available for '{}'. You will need to add the LICENSE file yourself",
                    license
                )
            }
        }
    }
}
