use crate::error::{ActionsStarterError, Result};
use crate::launch::Launcher;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    urls: Vec<String>,
    editors: Vec<(String, PathBuf)>,
    fail: bool,
}

/// Records launches instead of starting programs
#[derive(Debug, Default)]
pub struct MockLauncher {
    state: Mutex<MockState>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every launch fail as if the program were missing
    pub fn fail(&self) {
        self.lock().fail = true;
    }

    /// URLs passed to `open_url`
    pub fn urls(&self) -> Vec<String> {
        self.lock().urls.clone()
    }

    /// (editor, directory) pairs passed to `open_editor`
    pub fn editors(&self) -> Vec<(String, PathBuf)> {
        self.lock().editors.clone()
    }
}

impl Launcher for MockLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        let mut state = self.lock();
        if state.fail {
            return Err(ActionsStarterError::command("Failed to execute xdg-open"));
        }
        state.urls.push(url.to_string());
        Ok(())
    }

    fn open_editor(&self, editor: &str, dir: &Path) -> Result<()> {
        let mut state = self.lock();
        if state.fail {
            return Err(ActionsStarterError::command(format!(
                "Failed to execute {}",
                editor
            )));
        }
        state.editors.push((editor.to_string(), dir.to_path_buf()));
        Ok(())
    }
}
