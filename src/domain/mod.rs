//! Domain logic - pure rules independent of git, npm and the filesystem

pub mod project;
pub mod tag;
pub mod version;

pub use project::{remote_web_url, ProjectConfig, TestFramework};
pub use tag::{TagPlan, LATEST_TAG};
pub use version::{BumpKind, BumpRequest, Resolution};
