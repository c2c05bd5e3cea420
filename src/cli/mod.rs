//! Workflows behind the command-line subcommands.
//!
//! `main.rs` only parses arguments and wires the real clients in; the
//! workflows here take the collaborators as trait objects.

pub mod init;
pub mod open;
pub mod orchestration;

pub use init::{run_init_workflow, InitResult, InitWorkflowArgs};
pub use open::{remote_page, run_edit_workflow, run_open_workflow};
pub use orchestration::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
