use semver::Version;

/// Name of the optional tag that follows the newest publish
pub const LATEST_TAG: &str = "latest";

/// Tags a single publish writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPlan {
    /// `v` + full version; created strictly, never moved
    pub version_tag: String,
    /// `v` + major; force-moved, absent for pre-releases
    pub major_tag: Option<String>,
    /// `latest` when requested; force-moved
    pub latest_tag: Option<String>,
}

impl TagPlan {
    /// Every tag in the plan, in the order they are written
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = vec![self.version_tag.as_str()];
        tags.extend(self.major_tag.as_deref());
        tags.extend(self.latest_tag.as_deref());
        tags
    }
}

/// Format the exact version tag (e.g. 1.2.3-rc.1 -> "v1.2.3-rc.1")
pub fn version_tag(version: &Version) -> String {
    format!("v{}", version)
}

/// Compute the tags for a new version.
///
/// Rolling major tags only ever point at stable releases. `latest` follows the
/// caller's request even for pre-releases.
pub fn plan(version: &Version, want_latest: bool) -> TagPlan {
    let major_tag = version
        .pre
        .is_empty()
        .then(|| format!("v{}", version.major));

    TagPlan {
        version_tag: version_tag(version),
        major_tag,
        latest_tag: want_latest.then(|| LATEST_TAG.to_string()),
    }
}
