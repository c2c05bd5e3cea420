//! Formatting functions for UI output.
//!
//! Status and success lines go to stdout; errors and warnings go to stderr.

use crate::boundary::BoundaryWarning;
use crate::domain::TagPlan;
use console::style;
use semver::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a bold, underlined heading.
pub fn display_heading(message: &str) {
    println!("\n{}", style(message).bold().underlined());
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Display the version change and the tags a publish will write.
///
/// # Arguments
/// * `current` - Version recorded in the manifest before publishing
/// * `next` - Version being published
/// * `plan` - Tags to create or move
pub fn display_release_plan(current: &Version, next: &Version, plan: &TagPlan) {
    if current == next {
        println!("\n{}", style("Publishing current version:").bold());
        println!("  Version: {}", style(next).green());
    } else {
        println!("\n{}", style("Proposed Version Change:").bold());
        println!("  From: {}", style(current).red());
        println!("  To:   {}", style(next).green());
    }
    for line in tag_plan_lines(plan) {
        println!("  {}", line);
    }
}

/// One line per tag: the exact tag is created, rolling tags are moved.
pub fn tag_plan_lines(plan: &TagPlan) -> Vec<String> {
    let mut lines = vec![format!("create {}", plan.version_tag)];
    if let Some(major) = &plan.major_tag {
        lines.push(format!("move   {}", major));
    }
    if let Some(latest) = &plan.latest_tag {
        lines.push(format!("move   {}", latest));
    }
    lines
}

/// Print a numbered list of follow-up commands.
pub fn display_next_steps(steps: &[String]) {
    for (i, step) in steps.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
}
