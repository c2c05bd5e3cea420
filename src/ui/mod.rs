//! User interface module.
//!
//! - `formatter` - styled output lines
//! - This module - composed messages shown at the end of a command

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_heading, display_next_steps,
    display_release_plan, display_status, display_success,
};

/// Follow-up commands printed after `init`.
///
/// # Arguments
/// * `has_remote` - Whether an `origin` remote is already configured
/// * `branch` - Current branch name, if known
/// * `version` - Initial version of the generated project
pub fn init_next_steps(has_remote: bool, branch: Option<&str>, version: &str) -> Vec<String> {
    let mut steps = vec![
        "Run your tests: npm test".to_string(),
        "Build the action: npm run build".to_string(),
    ];

    if !has_remote {
        steps.push("Set your git remote: git remote add origin <url>".to_string());
    }

    steps.push(format!(
        "Commit your changes: git add . && git commit -m \"Publish version {}\"",
        version
    ));

    match branch {
        Some(branch) => steps.push(format!("Push your branch: git push origin {}", branch)),
        None => steps.push("Push your branch: git push origin HEAD".to_string()),
    }

    steps.push("Publish the action: actions-starter publish".to_string());
    steps
}
