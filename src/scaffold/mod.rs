//! Starter project generation.
//!
//! [render] turns a [ProjectConfig] into file contents keyed by relative path;
//! it is pure so the generated tree can be inspected without touching disk.
//! [write_project] puts the rendered files in place.

mod license;
mod templates;

pub use license::license_text;

use crate::domain::{ProjectConfig, TestFramework};
use crate::error::{ActionsStarterError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rendered files keyed by path relative to the project root
pub type ProjectFiles = BTreeMap<PathBuf, String>;

#[derive(Serialize)]
struct Scripts<'a> {
    run: &'a str,
    test: &'a str,
    build: &'a str,
    format: &'a str,
    lint: &'a str,
}

#[derive(Serialize)]
struct RepositoryField {
    #[serde(rename = "type")]
    kind: &'static str,
    url: String,
}

#[derive(Serialize)]
struct BugsField {
    url: String,
}

#[derive(Serialize)]
struct PackageJson<'a> {
    name: &'a str,
    version: String,
    description: &'a str,
    main: &'a str,
    scripts: Scripts<'a>,
    keywords: Vec<String>,
    author: &'a str,
    license: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<RepositoryField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bugs: Option<BugsField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,
}

/// Render `package.json`
pub fn package_json(config: &ProjectConfig) -> Result<String> {
    let web_url = config.repository_web_url();

    let manifest = PackageJson {
        name: &config.name,
        version: config.initial_version.to_string(),
        description: &config.description,
        main: "lib/index.js",
        scripts: Scripts {
            run: "npm run build && node lib/index.js",
            test: config.test_framework.test_script(),
            build: "tsc && ncc build -o dist src/index.ts",
            format: "prettier --write \"src/**/*.ts\"",
            lint: "tslint -p tsconfig.json",
        },
        keywords: Vec::new(),
        author: &config.author,
        license: &config.license,
        repository: config.repository_url.as_ref().map(|url| RepositoryField {
            kind: "git",
            url: format!("git+{}", url),
        }),
        bugs: web_url.as_ref().map(|url| BugsField {
            url: format!("{}/issues", url),
        }),
        homepage: web_url.map(|url| format!("{}#readme", url)),
    };

    let mut json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| ActionsStarterError::config(format!("Cannot render package.json: {}", e)))?;
    json.push('\n');
    Ok(json)
}

/// Render every file of a starter action.
///
/// `year` goes into the LICENSE copyright line. Licenses without bundled
/// text produce no LICENSE entry; callers can detect that with
/// [license_text].
pub fn render(config: &ProjectConfig, year: i32) -> Result<ProjectFiles> {
    let mut files = ProjectFiles::new();

    files.insert(PathBuf::from("package.json"), package_json(config)?);
    files.insert(PathBuf::from("tslint.json"), templates::TSLINT_JSON.to_string());
    files.insert(PathBuf::from("tsconfig.json"), templates::TSCONFIG_JSON.to_string());
    files.insert(PathBuf::from(".prettierrc"), templates::PRETTIER_RC.to_string());
    files.insert(PathBuf::from(".gitignore"), templates::GITIGNORE.to_string());
    files.insert(PathBuf::from("action.yml"), templates::action_yml(config));
    files.insert(PathBuf::from("README.md"), templates::readme(config));
    files.insert(PathBuf::from("src/index.ts"), templates::INDEX_TS.to_string());
    files.insert(
        PathBuf::from(".github/workflows/main.yml"),
        templates::CI_WORKFLOW.to_string(),
    );

    match config.test_framework {
        TestFramework::Jest => {
            files.insert(PathBuf::from("jestconfig.json"), templates::JEST_CONFIG.to_string());
            files.insert(
                PathBuf::from("src/__tests__/index.test.ts"),
                templates::JEST_TEST.to_string(),
            );
        }
        TestFramework::Mocha => {
            files.insert(
                PathBuf::from("src/__tests__/index.test.ts"),
                templates::MOCHA_TEST.to_string(),
            );
        }
    }

    if let Some(text) = license_text(&config.license, &config.author, year) {
        files.insert(PathBuf::from("LICENSE"), text);
    }

    Ok(files)
}

/// Write rendered files below `root`, creating directories as needed.
///
/// Existing files are overwritten. Returns the written paths in order.
pub fn write_project(root: &Path, files: &ProjectFiles) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Writing {}", relative.display());
        fs::write(&path, content)?;
        written.push(path);
    }

    Ok(written)
}

/// Fail unless `dir` holds nothing but `.git` and `package.json`
pub fn ensure_empty(dir: &Path) -> Result<()> {
    let mut unexpected = Vec::new();

    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_string();
        if name != ".git" && name != "package.json" {
            unexpected.push(name);
        }
    }

    if unexpected.is_empty() {
        Ok(())
    } else {
        unexpected.sort();
        Err(ActionsStarterError::DirectoryNotEmpty(format!(
            "{} contains {}",
            dir.display(),
            unexpected.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    fn config(framework: TestFramework) -> ProjectConfig {
        let mut config =
            ProjectConfig::new("hello-action", Version::new(1, 0, 0), framework).unwrap();
        config.author = "Octo Cat".to_string();
        config.license = "MIT".to_string();
        config.description = "Says \"hello\"".to_string();
        config
    }

    fn keys(files: &ProjectFiles) -> Vec<String> {
        files
            .keys()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_render_jest_file_set() {
        let files = render(&config(TestFramework::Jest), 2024).unwrap();
        assert_eq!(
            keys(&files),
            vec![
                ".github/workflows/main.yml",
                ".gitignore",
                ".prettierrc",
                "LICENSE",
                "README.md",
                "action.yml",
                "jestconfig.json",
                "package.json",
                "src/__tests__/index.test.ts",
                "src/index.ts",
                "tsconfig.json",
                "tslint.json",
            ]
        );
    }

    #[test]
    fn test_render_mocha_has_no_jest_config() {
        let files = render(&config(TestFramework::Mocha), 2024).unwrap();
        assert!(!files.contains_key(Path::new("jestconfig.json")));
        let test = &files[Path::new("src/__tests__/index.test.ts")];
        assert!(test.contains("describe('greet'"));
    }

    #[test]
    fn test_package_json_fields() {
        let mut cfg = config(TestFramework::Jest);
        cfg.repository_url = Some("https://github.com/octo/hello-action.git".to_string());

        let json: serde_json::Value = serde_json::from_str(&package_json(&cfg).unwrap()).unwrap();
        assert_eq!(json["name"], "hello-action");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["description"], "Says \"hello\"");
        assert_eq!(json["scripts"]["test"], "jest --config jestconfig.json");
        assert_eq!(
            json["repository"]["url"],
            "git+https://github.com/octo/hello-action.git"
        );
        assert_eq!(json["bugs"]["url"], "https://github.com/octo/hello-action/issues");
        assert_eq!(json["homepage"], "https://github.com/octo/hello-action#readme");
    }

    #[test]
    fn test_package_json_without_repository() {
        let json: serde_json::Value =
            serde_json::from_str(&package_json(&config(TestFramework::Mocha)).unwrap()).unwrap();
        assert!(json.get("repository").is_none());
        assert!(json.get("homepage").is_none());
        assert!(json["scripts"]["test"].as_str().unwrap().starts_with("mocha"));
    }

    #[test]
    fn test_unknown_license_has_no_file() {
        let mut cfg = config(TestFramework::Jest);
        cfg.license = "WTFPL".to_string();
        let files = render(&cfg, 2024).unwrap();
        assert!(!files.contains_key(Path::new("LICENSE")));
    }

    #[test]
    fn test_render_is_deterministic() {
        let cfg = config(TestFramework::Jest);
        assert_eq!(render(&cfg, 2024).unwrap(), render(&cfg, 2024).unwrap());
    }

    #[test]
    fn test_write_project_creates_directories() {
        let dir = TempDir::new().unwrap();
        let files = render(&config(TestFramework::Jest), 2024).unwrap();

        let written = write_project(dir.path(), &files).unwrap();
        assert_eq!(written.len(), files.len());
        assert!(dir.path().join(".github/workflows/main.yml").is_file());
        assert!(dir.path().join("src/__tests__/index.test.ts").is_file());
    }

    #[test]
    fn test_ensure_empty() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_empty(dir.path()).is_ok());

        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert!(ensure_empty(dir.path()).is_ok());

        fs::write(dir.path().join("notes.md"), "").unwrap();
        let err = ensure_empty(dir.path()).unwrap_err();
        assert!(matches!(err, ActionsStarterError::DirectoryNotEmpty(_)));
        assert!(err.to_string().contains("notes.md"));
    }
}
