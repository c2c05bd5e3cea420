use crate::error::{ActionsStarterError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the project directory and the user config directory
pub const CONFIG_FILE: &str = "actions-starter.toml";

/// Represents the complete configuration for actions-starter.
///
/// Every value here is a default that command-line flags override.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub init: InitConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub edit: EditConfig,
}

fn default_license() -> String {
    "ISC".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_test() -> String {
    "jest".to_string()
}

/// Defaults for `init`.
///
/// `dependencies` and `dev_dependencies` are installed in addition to the
/// packages every generated action needs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InitConfig {
    #[serde(default = "default_license")]
    pub license: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_test")]
    pub test: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub dev_dependencies: Vec<String>,
}

impl Default for InitConfig {
    fn default() -> Self {
        InitConfig {
            license: default_license(),
            version: default_version(),
            test: default_test(),
            author: None,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Defaults for `publish`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    /// Remote to push to when several are configured
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Move the `latest` tag on every publish
    #[serde(default)]
    pub latest: bool,

    /// Pre-release identifier for `pre*` bumps
    #[serde(default)]
    pub preid: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            remote: default_remote(),
            latest: false,
            preid: None,
        }
    }
}

fn default_editor() -> String {
    "code".to_string()
}

/// Defaults for `edit`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EditConfig {
    /// Editor executable the project directory is opened in
    #[serde(default = "default_editor")]
    pub editor: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        EditConfig {
            editor: default_editor(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. `config_path`, when given (must exist)
/// 2. `actions-starter.toml` in `project_dir`
/// 3. `actions-starter.toml` in the user config directory
/// 4. Default configuration
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let candidate = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = project_dir.join(CONFIG_FILE);
            if local.exists() {
                Some(local)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join(CONFIG_FILE))
                    .filter(|path| path.exists())
            }
        }
    };

    let Some(path) = candidate else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        ActionsStarterError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&content)
        .map_err(|e| ActionsStarterError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ActionsStarterError::config(e.to_string()))
}
