//! Scaffold workflow behind `init`

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::InitConfig;
use crate::domain::version::parse_version;
use crate::domain::{ProjectConfig, TestFramework};
use crate::error::{ActionsStarterError, Result};
use crate::git::{Git2Repository, Repository};
use crate::package::PackageManager;
use crate::scaffold;
use crate::ui;

/// Arguments for the init workflow; `None` falls back to configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InitWorkflowArgs {
    pub project: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub description: Option<String>,
    pub initial_version: Option<String>,
    pub test: Option<String>,
    pub repo: Option<String>,
    pub skip_install: bool,
}

/// Result of a successful init workflow
#[derive(Debug, Clone, PartialEq)]
pub struct InitResult {
    /// The configuration the project was rendered from
    pub project: ProjectConfig,

    /// Files written, absolute
    pub files: Vec<PathBuf>,

    /// Whether a new git repository was created
    pub initialized_git: bool,

    /// Checked out branch, if any
    pub branch: Option<String>,

    /// Non-fatal conditions reported along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Generate a starter action in `dir`.
///
/// `year` is used for the LICENSE copyright line.
pub fn run_init_workflow(
    dir: &Path,
    args: &InitWorkflowArgs,
    defaults: &InitConfig,
    package: &dyn PackageManager,
    year: i32,
) -> Result<InitResult> {
    scaffold::ensure_empty(dir)?;

    let mut project = project_config(dir, args, defaults)?;
    let mut warnings = Vec::new();

    ui::display_heading(&format!("Generating GitHub Actions project {}", project.name));

    let initialized_git = !dir.join(".git").exists();
    let repo = if initialized_git {
        info!("Initialising git repository in {}", dir.display());
        let repo = Git2Repository::init(dir)?;
        if let Some(url) = &args.repo {
            repo.add_remote("origin", url)?;
        }
        project.repository_url = args.repo.clone();
        repo
    } else {
        let repo = Git2Repository::open(dir)?;
        match repo.remote_url("origin")? {
            Some(url) => project.repository_url = Some(url),
            None => {
                let warning = BoundaryWarning::RemoteUnknown;
                ui::display_boundary_warning(&warning);
                warnings.push(warning);
                project.repository_url = args.repo.clone();
            }
        }
        repo
    };

    if project.author.is_empty() {
        project.author = repo.user_name().unwrap_or_default();
    }
    debug!(?project, "project configuration");

    let files = scaffold::render(&project, year)?;
    if !files.contains_key(Path::new("LICENSE")) {
        let warning = BoundaryWarning::LicenseUnavailable {
            license: project.license.clone(),
        };
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
    }
    let written = scaffold::write_project(dir, &files)?;
    ui::display_success(&format!("Wrote {} files", written.len()));

    if args.skip_install {
        ui::display_status("Skipping dependency installation");
    } else {
        ui::display_status("Installing dependencies");
        package.install(&project.dev_dependencies, true)?;
        package.install(&project.dependencies, false)?;
    }

    let branch = repo.current_branch()?;

    Ok(InitResult {
        project,
        files: written,
        initialized_git,
        branch,
        warnings,
    })
}

/// Merge CLI arguments over configured defaults
fn project_config(
    dir: &Path,
    args: &InitWorkflowArgs,
    defaults: &InitConfig,
) -> Result<ProjectConfig> {
    let name = match &args.project {
        Some(name) => name.clone(),
        None => directory_name(dir)?,
    };

    let version = parse_version(args.initial_version.as_deref().unwrap_or(&defaults.version))?;
    let test: TestFramework = args.test.as_deref().unwrap_or(&defaults.test).parse()?;

    let mut project = ProjectConfig::new(name, version, test)?;
    project.license = args
        .license
        .clone()
        .unwrap_or_else(|| defaults.license.clone());
    project.description = args.description.clone().unwrap_or_default();
    project.author = args
        .author
        .clone()
        .or_else(|| defaults.author.clone())
        .unwrap_or_default();
    project.add_dependencies(&defaults.dependencies, &defaults.dev_dependencies);

    Ok(project)
}

fn directory_name(dir: &Path) -> Result<String> {
    let absolute = dir.canonicalize()?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .ok_or_else(|| {
            ActionsStarterError::config(format!(
                "Cannot derive a project name from {}; pass --project",
                absolute.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    #[test]
    fn test_project_config_defaults() {
        let dir = TempDir::new().unwrap();
        let args = InitWorkflowArgs {
            project: Some("my-action".to_string()),
            ..InitWorkflowArgs::default()
        };

        let project = project_config(dir.path(), &args, &InitConfig::default()).unwrap();
        assert_eq!(project.name, "my-action");
        assert_eq!(project.license, "ISC");
        assert_eq!(project.initial_version, Version::new(1, 0, 0));
        assert_eq!(project.test_framework, TestFramework::Jest);
    }

    #[test]
    fn test_project_config_args_override_defaults() {
        let dir = TempDir::new().unwrap();
        let defaults = InitConfig {
            license: "MIT".to_string(),
            author: Some("Config Author".to_string()),
            dependencies: vec!["@actions/github".to_string()],
            ..InitConfig::default()
        };
        let args = InitWorkflowArgs {
            project: Some("my-action".to_string()),
            license: Some("Apache-2.0".to_string()),
            initial_version: Some("0.1.0".to_string()),
            test: Some("mocha".to_string()),
            ..InitWorkflowArgs::default()
        };

        let project = project_config(dir.path(), &args, &defaults).unwrap();
        assert_eq!(project.license, "Apache-2.0");
        assert_eq!(project.author, "Config Author");
        assert_eq!(project.initial_version, Version::new(0, 1, 0));
        assert_eq!(project.test_framework, TestFramework::Mocha);
        assert!(project.dependencies.contains(&"@actions/github".to_string()));
    }

    #[test]
    fn test_project_config_rejects_unknown_test_framework() {
        let dir = TempDir::new().unwrap();
        let args = InitWorkflowArgs {
            project: Some("my-action".to_string()),
            test: Some("foo".to_string()),
            ..InitWorkflowArgs::default()
        };
        assert!(project_config(dir.path(), &args, &InitConfig::default()).is_err());
    }

    #[test]
    fn test_project_config_rejects_bad_version() {
        let dir = TempDir::new().unwrap();
        let args = InitWorkflowArgs {
            project: Some("my-action".to_string()),
            initial_version: Some("1.0".to_string()),
            ..InitWorkflowArgs::default()
        };
        let err = project_config(dir.path(), &args, &InitConfig::default()).unwrap_err();
        assert!(matches!(err, ActionsStarterError::InvalidVersion(_)));
    }
}
