pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod guard;
pub mod launch;
pub mod package;
pub mod scaffold;
pub mod ui;

pub use error::{ActionsStarterError, Result};
