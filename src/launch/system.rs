use crate::error::{ActionsStarterError, Result};
use crate::launch::Launcher;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Launches the platform opener and real editors
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        SystemLauncher
    }
}

// `start` treats the first quoted argument as a window title
const WINDOWS_START: &[&str] = &["/C", "start", ""];
const NO_ARGS: &[&str] = &[];

/// Program and leading arguments that open a URL on this platform
fn url_opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "windows") {
        ("cmd", WINDOWS_START)
    } else if cfg!(target_os = "macos") {
        ("open", NO_ARGS)
    } else {
        ("xdg-open", NO_ARGS)
    }
}

/// Run `program` to completion, mapping spawn failures and non-zero exits
fn run<I, S>(program: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = Command::new(program).args(args).status().map_err(|e| {
        ActionsStarterError::command(format!("Failed to execute {}: {}", program, e))
    })?;

    if !status.success() {
        return Err(ActionsStarterError::command(format!(
            "{} exited with code {}",
            program,
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        let (program, leading) = url_opener();
        info!("Opening {} with {}", url, program);
        run(program, leading.iter().copied().chain(std::iter::once(url)))
    }

    fn open_editor(&self, editor: &str, dir: &Path) -> Result<()> {
        info!("Opening {} in {}", dir.display(), editor);
        run(editor, [dir.as_os_str()])
    }
}
