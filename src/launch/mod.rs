//! Hand-off to desktop programs for `open` and `edit`
//!
//! - [system::SystemLauncher]: the platform URL opener and the configured editor
//! - [mock::MockLauncher]: records launches for tests

pub mod mock;
pub mod system;

pub use mock::MockLauncher;
pub use system::SystemLauncher;

use crate::error::Result;
use std::path::Path;

/// Starts external programs on the operator's machine
pub trait Launcher: Send + Sync {
    /// Show `url` in the default browser
    fn open_url(&self, url: &str) -> Result<()>;

    /// Open `dir` in `editor`, an executable name or path
    fn open_editor(&self, editor: &str, dir: &Path) -> Result<()>;
}
