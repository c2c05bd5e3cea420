//! Publish workflow orchestration
//!
//! Runs the publish sequence against the [Repository] and [PackageManager]
//! abstractions, so the same code drives the real `git2`/`npm` clients and
//! the in-memory mocks used in tests.
//!
//! Order: working tree check, version resolution, tag existence check,
//! manifest update and commit, tagging, remote detection, push. Every failure
//! stops the sequence; nothing is retried or rolled back.

use semver::Version;
use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::domain::{tag, version, BumpRequest, TagPlan};
use crate::error::{ActionsStarterError, Result};
use crate::git::Repository;
use crate::guard;
use crate::package::PackageManager;
use crate::ui;

/// Arguments for the publish workflow
///
/// Mirrors the CLI arguments but in a format suitable for orchestration
/// logic, so the workflow can be called without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Bump keyword, explicit version, or `None` to publish the current version
    pub version: Option<String>,

    /// Also move the `latest` tag
    pub latest: bool,

    /// Pre-release identifier for `pre*` bumps
    pub preid: Option<String>,

    /// Preferred remote when several are configured
    pub remote: String,

    /// Preview mode - check and plan only
    pub dry_run: bool,
}

impl Default for PublishWorkflowArgs {
    fn default() -> Self {
        PublishWorkflowArgs {
            version: None,
            latest: false,
            preid: None,
            remote: "origin".to_string(),
            dry_run: false,
        }
    }
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version recorded in the manifest before publishing
    pub previous_version: Version,

    /// The published version
    pub version: Version,

    /// Tags written, in creation order
    pub tags: Vec<String>,

    /// Remote that was pushed to
    pub remote: Option<String>,

    /// Whether the branch and tags were pushed
    pub pushed: bool,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// Non-fatal conditions reported along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main publish workflow
///
/// # Errors
///
/// * `UncommittedChanges` - the working tree is dirty; nothing else ran
/// * `InvalidVersion` - the version argument is not a bump kind or semver
/// * `TagAlreadyExists` - the version tag is already present
/// * `ManifestUpdate` - rewriting or committing the manifest failed
/// * `TagCreation` - writing a tag failed
/// * `Push` - the push failed after local commits and tags were written
pub fn run_publish_workflow(
    repo: &dyn Repository,
    package: &dyn PackageManager,
    args: &PublishWorkflowArgs,
) -> Result<WorkflowResult> {
    guard::check_clean(repo)?;
    debug!("working tree is clean");

    let request = BumpRequest::parse(args.version.as_deref())?;
    let current = package.read_version()?;
    let resolution = version::resolve(&current, &request, args.preid.as_deref())?;
    let next = resolution.version.clone();
    info!(%current, %next, ?request, "version resolved");

    let plan = tag::plan(&next, args.latest);
    if repo.tag_exists(&plan.version_tag)? {
        return Err(ActionsStarterError::TagAlreadyExists(plan.version_tag));
    }

    ui::display_release_plan(&current, &next, &plan);

    let mut result = WorkflowResult {
        previous_version: current,
        version: next.clone(),
        tags: plan.tags().into_iter().map(str::to_string).collect(),
        remote: None,
        pushed: false,
        dry_run: args.dry_run,
        warnings: Vec::new(),
    };

    if args.dry_run {
        ui::display_status("Dry run: no files, commits or tags were changed");
        return Ok(result);
    }

    if resolution.update_manifest {
        update_manifest(repo, package, &next)?;
        ui::display_success(&format!("Updated package.json to {}", next));
    }

    write_tags(repo, &plan)?;
    ui::display_success(&format!("Created tags: {}", result.tags.join(", ")));

    let remotes = repo.list_remotes()?;
    let Some(remote) = choose_remote(&remotes, &args.remote) else {
        let warning = BoundaryWarning::NoRemoteConfigured {
            version: plan.version_tag.clone(),
        };
        ui::display_boundary_warning(&warning);
        result.warnings.push(warning);
        return Ok(result);
    };

    ui::display_status(&format!("Pushing to {}", remote));
    if let Err(e) = push(repo, &remote, &mut result.warnings) {
        let warning = BoundaryWarning::LocalStateDiverged {
            remote: remote.clone(),
            tags: result.tags.clone(),
        };
        ui::display_boundary_warning(&warning);
        return Err(e);
    }

    ui::display_success(&format!("Published {} to {}", plan.version_tag, remote));
    result.remote = Some(remote);
    result.pushed = true;
    Ok(result)
}

/// Rewrite the manifest and record it as a commit named after the version.
///
/// The manifest is read back before committing; tags are only ever written
/// for the version it actually records.
fn update_manifest(
    repo: &dyn Repository,
    package: &dyn PackageManager,
    next: &Version,
) -> Result<()> {
    package.set_version(next).map_err(as_manifest_error)?;

    let recorded = package.read_version().map_err(as_manifest_error)?;
    if &recorded != next {
        return Err(ActionsStarterError::manifest(format!(
            "package.json records {} after setting {}",
            recorded, next
        )));
    }

    repo.commit_all(&next.to_string())
        .map_err(as_manifest_error)?;
    Ok(())
}

fn as_manifest_error(e: ActionsStarterError) -> ActionsStarterError {
    match e {
        ActionsStarterError::ManifestUpdate(_) => e,
        other => ActionsStarterError::manifest(other.to_string()),
    }
}

/// Create the exact tag strictly, then force-move the rolling tags
fn write_tags(repo: &dyn Repository, plan: &TagPlan) -> Result<()> {
    repo.create_tag(&plan.version_tag, false)
        .map_err(as_tag_error)?;

    for rolling in plan.major_tag.iter().chain(plan.latest_tag.iter()) {
        repo.create_tag(rolling, true).map_err(as_tag_error)?;
    }

    Ok(())
}

fn as_tag_error(e: ActionsStarterError) -> ActionsStarterError {
    match e {
        ActionsStarterError::TagAlreadyExists(_) | ActionsStarterError::TagCreation(_) => e,
        other => ActionsStarterError::tag(other.to_string()),
    }
}

/// Prefer the configured remote, else the first one listed
fn choose_remote(remotes: &[String], preferred: &str) -> Option<String> {
    remotes
        .iter()
        .find(|name| name.as_str() == preferred)
        .or_else(|| remotes.first())
        .cloned()
}

/// Push the current branch, then force-push all tags
fn push(repo: &dyn Repository, remote: &str, warnings: &mut Vec<BoundaryWarning>) -> Result<()> {
    let outcome = match repo.current_branch() {
        Ok(Some(branch)) => repo.push_branch(remote, &branch),
        Ok(None) => {
            let warning = BoundaryWarning::DetachedHead {
                remote: remote.to_string(),
            };
            ui::display_boundary_warning(&warning);
            warnings.push(warning);
            Ok(())
        }
        Err(e) => Err(e),
    }
    .and_then(|_| repo.push_tags(remote, true));

    outcome.map_err(|e| match e {
        ActionsStarterError::Push(_) => e,
        other => ActionsStarterError::push(other.to_string()),
    })
}
