use crate::error::{ActionsStarterError, Result};
use regex::Regex;
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Packages every generated action installs as dev dependencies
const COMMON_DEV_DEPENDENCIES: [&str; 5] = [
    "prettier",
    "tslint",
    "tslint-config-prettier",
    "typescript",
    "@zeit/ncc",
];

/// Test framework wired into the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestFramework {
    #[default]
    Jest,
    Mocha,
}

impl TestFramework {
    /// Dev dependencies the framework needs on top of the common ones
    pub fn dev_dependencies(&self) -> &'static [&'static str] {
        match self {
            TestFramework::Jest => &["@types/jest", "jest", "ts-jest"],
            TestFramework::Mocha => &["@types/mocha", "mocha", "ts-node"],
        }
    }

    /// The `npm test` script for this framework
    pub fn test_script(&self) -> &'static str {
        match self {
            TestFramework::Jest => "jest --config jestconfig.json",
            TestFramework::Mocha => "mocha -r ts-node/register src/**/*.test.ts",
        }
    }
}

impl FromStr for TestFramework {
    type Err = ActionsStarterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jest" => Ok(TestFramework::Jest),
            "mocha" => Ok(TestFramework::Mocha),
            other => Err(ActionsStarterError::config(format!(
                "Unsupported test framework '{}' (expected jest or mocha)",
                other
            ))),
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFramework::Jest => write!(f, "jest"),
            TestFramework::Mocha => write!(f, "mocha"),
        }
    }
}

/// Everything the scaffold needs to render a project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub author: String,
    pub license: String,
    pub description: String,
    pub initial_version: Version,
    pub test_framework: TestFramework,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub repository_url: Option<String>,
}

impl ProjectConfig {
    /// Build a config with the default dependency lists for `test_framework`.
    ///
    /// Fails if `name` is not usable as an npm package name.
    pub fn new(
        name: impl Into<String>,
        initial_version: Version,
        test_framework: TestFramework,
    ) -> Result<Self> {
        let name = name.into();
        validate_package_name(&name)?;

        let dev_dependencies = test_framework
            .dev_dependencies()
            .iter()
            .chain(COMMON_DEV_DEPENDENCIES.iter())
            .map(|dep| dep.to_string())
            .collect();

        Ok(ProjectConfig {
            name,
            author: String::new(),
            license: "ISC".to_string(),
            description: String::new(),
            initial_version,
            test_framework,
            dependencies: vec!["@actions/core".to_string()],
            dev_dependencies,
            repository_url: None,
        })
    }

    /// Append extra packages, skipping ones already listed
    pub fn add_dependencies(&mut self, extra: &[String], dev: &[String]) {
        for dep in extra {
            if !self.dependencies.contains(dep) {
                self.dependencies.push(dep.clone());
            }
        }
        for dep in dev {
            if !self.dev_dependencies.contains(dep) {
                self.dev_dependencies.push(dep.clone());
            }
        }
    }

    /// Browser URL of the repository, see [remote_web_url]
    pub fn repository_web_url(&self) -> Option<String> {
        self.repository_url.as_deref().and_then(remote_web_url)
    }

    /// `owner/name` of a GitHub repository URL, used in the README usage snippet
    pub fn repository_slug(&self) -> Option<String> {
        let url = self.repository_url.as_deref()?;
        let re = Regex::new(r"github\.com[:/]([^/\s]+/[^/\s]+?)(?:\.git)?/?$").ok()?;
        re.captures(url.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// `https://` page for a git remote URL.
///
/// Accepts `https://`/`http://` URLs (credentials are dropped), `ssh://` URLs
/// and scp-like `git@host:owner/repo` addresses. A trailing `.git` or `/` is
/// removed. Local paths and other schemes have no web page and yield `None`.
pub fn remote_web_url(url: &str) -> Option<String> {
    let url = url.trim();

    let (host, path) = if let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        let (authority, path) = rest.split_once('/')?;
        (without_userinfo(authority), path)
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        let (authority, path) = rest.split_once('/')?;
        let host = without_userinfo(authority);
        (host.split(':').next().unwrap_or(host), path)
    } else if !url.contains("://") {
        let (authority, path) = url.split_once(':')?;
        if authority.contains('/') {
            return None;
        }
        (without_userinfo(authority), path)
    } else {
        return None;
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path).trim_matches('/');
    if host.is_empty() || path.is_empty() || path.contains('\\') {
        return None;
    }

    Some(format!("https://{}/{}", host, path))
}

fn without_userinfo(authority: &str) -> &str {
    authority.rsplit_once('@').map_or(authority, |(_, host)| host)
}

/// Check a name against npm's package naming rules
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 214 {
        return Err(ActionsStarterError::config(format!(
            "Invalid package name '{}': must be 1 to 214 characters",
            name
        )));
    }

    let re = Regex::new(r"^(?:@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$")
        .map_err(|e| ActionsStarterError::config(e.to_string()))?;

    if re.is_match(name) {
        Ok(())
    } else {
        Err(ActionsStarterError::config(format!(
            "Invalid package name '{}': use lowercase letters, digits, '-', '.', '_' or '~'",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProjectConfig {
        ProjectConfig::new("hello-action", Version::new(1, 0, 0), TestFramework::Jest).unwrap()
    }

    #[test]
    fn test_test_framework_parse() {
        assert_eq!("jest".parse::<TestFramework>().unwrap(), TestFramework::Jest);
        assert_eq!("Mocha".parse::<TestFramework>().unwrap(), TestFramework::Mocha);
        assert!("foo".parse::<TestFramework>().is_err());
    }

    #[test]
    fn test_default_dependencies() {
        let cfg = config();
        assert_eq!(cfg.dependencies, vec!["@actions/core".to_string()]);
        assert!(cfg.dev_dependencies.contains(&"ts-jest".to_string()));
        assert!(cfg.dev_dependencies.contains(&"typescript".to_string()));
        assert!(!cfg.dev_dependencies.contains(&"mocha".to_string()));
    }

    #[test]
    fn test_mocha_dependencies() {
        let cfg =
            ProjectConfig::new("hello-action", Version::new(1, 0, 0), TestFramework::Mocha).unwrap();
        assert!(cfg.dev_dependencies.contains(&"mocha".to_string()));
        assert!(!cfg.dev_dependencies.contains(&"jest".to_string()));
    }

    #[test]
    fn test_add_dependencies_dedupes() {
        let mut cfg = config();
        cfg.add_dependencies(
            &["@actions/core".to_string(), "@actions/github".to_string()],
            &["eslint".to_string()],
        );
        assert_eq!(cfg.dependencies, vec!["@actions/core", "@actions/github"]);
        assert_eq!(cfg.dev_dependencies.last().map(String::as_str), Some("eslint"));
    }

    #[test]
    fn test_package_name_validation() {
        assert!(validate_package_name("my-action").is_ok());
        assert!(validate_package_name("@scope/my.action").is_ok());
        assert!(validate_package_name("My Action").is_err());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name(".hidden").is_err());
    }

    #[test]
    fn test_repository_slug() {
        let mut cfg = config();
        cfg.repository_url = Some("https://github.com/octo/hello-action.git".to_string());
        assert_eq!(cfg.repository_slug().as_deref(), Some("octo/hello-action"));
        assert_eq!(
            cfg.repository_web_url().as_deref(),
            Some("https://github.com/octo/hello-action")
        );

        cfg.repository_url = Some("git@github.com:octo/hello-action.git".to_string());
        assert_eq!(cfg.repository_slug().as_deref(), Some("octo/hello-action"));

        cfg.repository_url = Some("https://gitlab.com/octo/hello".to_string());
        assert_eq!(cfg.repository_slug(), None);
    }

    #[test]
    fn test_remote_web_url() {
        let cases = [
            ("https://github.com/octo/hello.git", Some("https://github.com/octo/hello")),
            ("https://token@github.com/octo/hello", Some("https://github.com/octo/hello")),
            ("git@github.com:octo/hello.git", Some("https://github.com/octo/hello")),
            ("ssh://git@github.com:22/octo/hello.git/", Some("https://github.com/octo/hello")),
            ("http://gitlab.example.com/group/sub/proj", Some("https://gitlab.example.com/group/sub/proj")),
            ("/srv/git/hello.git", None),
            ("file:///srv/git/hello.git", None),
            ("./relative/path:odd", None),
            ("C:\\src\\hello", None),
        ];

        for (remote, expected) in cases {
            assert_eq!(remote_web_url(remote).as_deref(), expected, "remote {}", remote);
        }
    }
}
