//! Package manager abstraction
//!
//! The package manifest's `version` field is the single source of truth for
//! the current version. [PackageManager] reads and rewrites it and installs
//! dependencies for freshly generated projects.
//!
//! - [npm::NpmClient]: runs the `npm` executable in the project directory
//! - [mock::MockPackageManager]: in-memory implementation for tests

pub mod mock;
pub mod npm;

pub use mock::MockPackageManager;
pub use npm::NpmClient;

use crate::error::{ActionsStarterError, Result};
use semver::Version;
use serde::Deserialize;
use std::path::Path;

/// Name of the manifest file in the project root
pub const MANIFEST_FILE: &str = "package.json";

/// Package manager operations used by `init` and `publish`
pub trait PackageManager: Send + Sync {
    /// Version currently recorded in the manifest
    fn read_version(&self) -> Result<Version>;

    /// Rewrite the manifest (and lock file) to `version`.
    ///
    /// Does not commit or tag; the caller records the change in version control.
    fn set_version(&self, version: &Version) -> Result<()>;

    /// Install packages, saving them as dev dependencies when `dev` is set
    fn install(&self, packages: &[String], dev: bool) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    version: Option<String>,
}

/// Read and parse the `version` field of `<dir>/package.json`
pub fn read_manifest_version(dir: &Path) -> Result<Version> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        ActionsStarterError::ManifestRead(format!("{}: {}", path.display(), e))
    })?;

    let manifest: Manifest = serde_json::from_str(&content).map_err(|e| {
        ActionsStarterError::ManifestRead(format!("{}: {}", path.display(), e))
    })?;

    let version = manifest.version.ok_or_else(|| {
        ActionsStarterError::ManifestRead(format!("{} has no version field", path.display()))
    })?;

    Version::parse(&version).map_err(|e| {
        ActionsStarterError::version(format!(
            "Manifest version '{}' is not a semantic version: {}",
            version, e
        ))
    })
}
