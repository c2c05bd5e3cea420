//! Version resolution for `publish`.
//!
//! Parsing and comparison are delegated to the `semver` crate; this module only
//! decides which version a publish should produce. Increment rules follow what
//! `npm version <kind>` does, since npm is the tool that records the version in
//! the manifest.

use crate::error::{ActionsStarterError, Result};
use semver::{Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// Version bump type requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
}

impl BumpKind {
    /// All keywords accepted by `publish`, in help order
    pub const KEYWORDS: [&'static str; 7] = [
        "major",
        "minor",
        "patch",
        "premajor",
        "preminor",
        "prepatch",
        "prerelease",
    ];

}

impl FromStr for BumpKind {
    type Err = ActionsStarterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            "premajor" => Ok(BumpKind::Premajor),
            "preminor" => Ok(BumpKind::Preminor),
            "prepatch" => Ok(BumpKind::Prepatch),
            "prerelease" => Ok(BumpKind::Prerelease),
            other => Err(ActionsStarterError::version(format!(
                "Unknown bump kind: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Premajor => "premajor",
            BumpKind::Preminor => "preminor",
            BumpKind::Prepatch => "prepatch",
            BumpKind::Prerelease => "prerelease",
        };
        write!(f, "{}", keyword)
    }
}

/// What the `publish` version argument asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpRequest {
    /// No argument: publish the version already recorded in the manifest
    Current,
    /// An explicit semantic version
    Explicit(Version),
    /// One of the bump keywords
    Bump(BumpKind),
}

impl BumpRequest {
    /// Interpret the optional positional `publish` argument.
    ///
    /// Bump keywords win over version strings; anything that is neither fails
    /// with [`ActionsStarterError::InvalidVersion`].
    ///
    /// Explicit versions must not carry build metadata: npm drops it when
    /// writing the manifest, so the tag would name a version the manifest
    /// never records.
    pub fn parse(arg: Option<&str>) -> Result<Self> {
        let Some(arg) = arg.map(str::trim) else {
            return Ok(BumpRequest::Current);
        };

        if let Ok(kind) = arg.parse::<BumpKind>() {
            return Ok(BumpRequest::Bump(kind));
        }

        let version = parse_version(arg)?;
        if !version.build.is_empty() {
            return Err(ActionsStarterError::version(format!(
                "'{}' carries build metadata (+{}), which package.json cannot record; publish {} instead",
                arg,
                version.build,
                Version {
                    build: semver::BuildMetadata::EMPTY,
                    ..version.clone()
                }
            )));
        }

        Ok(BumpRequest::Explicit(version))
    }
}

/// Outcome of [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The version to publish
    pub version: Version,
    /// Whether the manifest must be rewritten (and committed) before tagging
    pub update_manifest: bool,
}

/// Parse a version string, accepting one leading `v` or `V`.
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let clean = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    Version::parse(clean).map_err(|e| {
        ActionsStarterError::version(format!(
            "'{}' is neither a bump kind ({}) nor a semantic version: {}",
            input,
            BumpKind::KEYWORDS.join("|"),
            e
        ))
    })
}

/// Decide the version to publish from the current one and the request.
///
/// `preid` is the pre-release identifier used by the `pre*` bump kinds.
pub fn resolve(current: &Version, request: &BumpRequest, preid: Option<&str>) -> Result<Resolution> {
    match request {
        BumpRequest::Current => Ok(Resolution {
            version: current.clone(),
            update_manifest: false,
        }),
        BumpRequest::Explicit(version) => Ok(Resolution {
            version: version.clone(),
            update_manifest: version != current,
        }),
        BumpRequest::Bump(kind) => Ok(Resolution {
            version: increment(current, *kind, preid)?,
            update_manifest: true,
        }),
    }
}

/// Apply a bump kind to a version. Build metadata never survives a bump.
pub fn increment(current: &Version, kind: BumpKind, preid: Option<&str>) -> Result<Version> {
    let mut next = Version::new(current.major, current.minor, current.patch);
    let was_prerelease = !current.pre.is_empty();

    match kind {
        // A pre-release of X.0.0 is promoted to X.0.0 rather than bumped
        BumpKind::Major => {
            if !(was_prerelease && current.minor == 0 && current.patch == 0) {
                next.major = component_up(current.major)?;
                next.minor = 0;
                next.patch = 0;
            }
        }
        BumpKind::Minor => {
            if !(was_prerelease && current.patch == 0) {
                next.minor = component_up(current.minor)?;
                next.patch = 0;
            }
        }
        BumpKind::Patch => {
            if !was_prerelease {
                next.patch = component_up(current.patch)?;
            }
        }
        BumpKind::Premajor => {
            next.major = component_up(current.major)?;
            next.minor = 0;
            next.patch = 0;
            next.pre = first_prerelease(preid)?;
        }
        BumpKind::Preminor => {
            next.minor = component_up(current.minor)?;
            next.patch = 0;
            next.pre = first_prerelease(preid)?;
        }
        BumpKind::Prepatch => {
            next.patch = component_up(current.patch)?;
            next.pre = first_prerelease(preid)?;
        }
        BumpKind::Prerelease => {
            if was_prerelease {
                next.pre = next_prerelease(&current.pre, preid)?;
            } else {
                next.patch = component_up(current.patch)?;
                next.pre = first_prerelease(preid)?;
            }
        }
    }

    Ok(next)
}

fn component_up(value: u64) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| ActionsStarterError::version(format!("Version component {} overflows", value)))
}

fn first_prerelease(preid: Option<&str>) -> Result<Prerelease> {
    match preid {
        Some(id) => prerelease(&format!("{}.0", id)),
        None => prerelease("0"),
    }
}

fn next_prerelease(current: &Prerelease, preid: Option<&str>) -> Result<Prerelease> {
    let mut identifiers: Vec<String> = current.as_str().split('.').map(str::to_string).collect();

    match identifiers
        .iter()
        .rposition(|id| id.parse::<u64>().is_ok())
    {
        Some(index) => {
            let counter = identifiers[index]
                .parse::<u64>()
                .map_err(|e| ActionsStarterError::version(e.to_string()))?;
            identifiers[index] = component_up(counter)?.to_string();
        }
        None => identifiers.push("0".to_string()),
    }

    if let Some(id) = preid {
        let same_line = identifiers.first().map(String::as_str) == Some(id)
            && identifiers
                .get(1)
                .is_some_and(|counter| counter.parse::<u64>().is_ok());
        if !same_line {
            identifiers = vec![id.to_string(), "0".to_string()];
        }
    }

    prerelease(&identifiers.join("."))
}

fn prerelease(text: &str) -> Result<Prerelease> {
    Prerelease::new(text).map_err(|e| {
        ActionsStarterError::version(format!("Invalid pre-release identifier '{}': {}", text, e))
    })
}
