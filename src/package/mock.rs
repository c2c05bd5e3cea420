use crate::error::{ActionsStarterError, Result};
use crate::package::PackageManager;
use semver::Version;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct MockState {
    version: Version,
    set_calls: Vec<Version>,
    installs: Vec<(Vec<String>, bool)>,
    fail_set_version: bool,
    /// Version `set_version` records instead of the requested one
    recorded_override: Option<Version>,
}

/// Mock package manager holding the manifest version in memory
#[derive(Debug)]
pub struct MockPackageManager {
    state: Mutex<MockState>,
}

impl MockPackageManager {
    /// A manifest recording `version`
    pub fn new(version: Version) -> Self {
        MockPackageManager {
            state: Mutex::new(MockState {
                version,
                set_calls: Vec::new(),
                installs: Vec::new(),
                fail_set_version: false,
                recorded_override: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make `set_version` fail as if the manifest were malformed
    pub fn fail_set_version(&self) {
        self.lock().fail_set_version = true;
    }

    /// Make `set_version` record `version` regardless of what was requested
    pub fn record_version_as(&self, version: Version) {
        self.lock().recorded_override = Some(version);
    }

    /// Current manifest version
    pub fn version(&self) -> Version {
        self.lock().version.clone()
    }

    /// Every version passed to `set_version`
    pub fn set_calls(&self) -> Vec<Version> {
        self.lock().set_calls.clone()
    }

    /// Every `install` call as (packages, dev)
    pub fn installs(&self) -> Vec<(Vec<String>, bool)> {
        self.lock().installs.clone()
    }
}

impl PackageManager for MockPackageManager {
    fn read_version(&self) -> Result<Version> {
        Ok(self.version())
    }

    fn set_version(&self, version: &Version) -> Result<()> {
        let mut state = self.lock();
        if state.fail_set_version {
            return Err(ActionsStarterError::manifest("package.json: unexpected token"));
        }
        state.set_calls.push(version.clone());
        state.version = state
            .recorded_override
            .clone()
            .unwrap_or_else(|| version.clone());
        Ok(())
    }

    fn install(&self, packages: &[String], dev: bool) -> Result<()> {
        self.lock().installs.push((packages.to_vec(), dev));
        Ok(())
    }
}
