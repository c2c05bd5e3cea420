use crate::error::{ActionsStarterError, Result};
use crate::package::{read_manifest_version, PackageManager};
use semver::Version;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Runs `npm` in a fixed project directory
#[derive(Debug, Clone)]
pub struct NpmClient {
    dir: PathBuf,
    program: String,
}

impl NpmClient {
    /// Create a client for the project in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let program = if cfg!(windows) { "npm.cmd" } else { "npm" };
        NpmClient {
            dir: dir.into(),
            program: program.to_string(),
        }
    }

    /// Use a different executable (e.g. a wrapper script)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run npm with `args` and return its stdout.
    ///
    /// A non-zero exit status is an error carrying npm's own stderr.
    fn run(&self, args: &[&str]) -> Result<String> {
        info!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| {
                ActionsStarterError::command(format!("Failed to execute {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ActionsStarterError::command(format!(
                "{} {} exited with code {}: {}",
                self.program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(%stdout, "npm finished");
        Ok(stdout)
    }
}

impl PackageManager for NpmClient {
    fn read_version(&self) -> Result<Version> {
        read_manifest_version(&self.dir)
    }

    fn set_version(&self, version: &Version) -> Result<()> {
        let version = version.to_string();
        self.run(&["version", &version, "--no-git-tag-version"])
        .map_err(|e| ActionsStarterError::manifest(e.to_string()))?;
        Ok(())
    }

    fn install(&self, packages: &[String], dev: bool) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let mut args = vec!["install"];
        if dev {
            args.push("--save-dev");
        }
        args.extend(packages.iter().map(String::as_str));

        self.run(&args)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_fails() {
        let dir = TempDir::new().unwrap();
        let client = NpmClient::new(dir.path()).with_program("definitely-not-npm-4242");

        let err = client
            .install(&["left-pad".to_string()], false)
            .unwrap_err();
        assert!(matches!(err, ActionsStarterError::Command(_)));
        assert!(err.to_string().contains("definitely-not-npm-4242"));
    }

    #[test]
    fn test_set_version_failure_is_manifest_error() {
        let dir = TempDir::new().unwrap();
        let client = NpmClient::new(dir.path()).with_program("definitely-not-npm-4242");

        let err = client.set_version(&Version::new(1, 0, 1)).unwrap_err();
        assert!(matches!(err, ActionsStarterError::ManifestUpdate(_)));
    }

    #[test]
    fn test_install_nothing_is_noop() {
        let dir = TempDir::new().unwrap();
        let client = NpmClient::new(dir.path()).with_program("definitely-not-npm-4242");
        assert!(client.install(&[], true).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_reports_stderr() {
        let dir = TempDir::new().unwrap();
        let client = NpmClient::new(dir.path()).with_program("false");

        let err = client.install(&["x".to_string()], true).unwrap_err();
        assert!(err.to_string().contains("exited with code 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_set_version_arguments() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fake-npm");
        std::fs::write(&script, "#!/bin/sh\necho \"$@\" > args.txt\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let client = NpmClient::new(dir.path()).with_program(script.to_string_lossy());
        client.set_version(&Version::new(1, 2, 3)).unwrap();

        let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
        assert_eq!(args.trim(), "version 1.2.3 --no-git-tag-version");
    }
}
