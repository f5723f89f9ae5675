//! Check that the local manifest version moved relative to a remote branch.

use serde::Serialize;
use std::cmp::Ordering;
use std::path::Path;

use crate::error::{Error, Result, VersionUnchangedDetails};
use crate::git;
use crate::manifest::{self, DiscoveryOptions, MANIFEST_FILE_NAME};
use crate::utils::validation;

pub const DEFAULT_BRANCH: &str = "main";
const REMOTE: &str = "origin";

/// Local version relative to the branch version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    Newer,
    Older,
    Equal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub branch: String,
    pub branch_sha: String,
    pub branch_version: String,
    pub current_branch: String,
    pub local_version: String,
    pub changed: bool,
    /// Present when both versions parse as semver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<VersionOrdering>,
}

/// Version of the manifest discovered upward from `dir`.
pub fn local_version(dir: &Path) -> Result<String> {
    let (_, manifest) = manifest::find(&DiscoveryOptions::from_dir(dir))?;
    Ok(manifest.version)
}

/// Version of the root manifest committed at `git_ref`.
pub fn version_at_ref(dir: &Path, git_ref: &str) -> Result<String> {
    let content = git::show_file_at_ref(dir, git_ref, MANIFEST_FILE_NAME)?;
    let origin = format!("{}:{}", git_ref, MANIFEST_FILE_NAME);
    Ok(manifest::parse(&content, &origin)?.version)
}

pub fn commit_sha(dir: &Path, git_ref: &str, short: bool) -> Result<String> {
    git::rev_parse(dir, git_ref, short)
}

pub fn current_branch(dir: &Path) -> Result<String> {
    git::current_branch(dir)
}

/// Semver ordering of `local` against `base`; `None` when either fails to parse.
pub fn semver_ordering(local: &str, base: &str) -> Option<VersionOrdering> {
    let local = semver::Version::parse(local.trim()).ok()?;
    let base = semver::Version::parse(base.trim()).ok()?;

    Some(match local.cmp(&base) {
        Ordering::Greater => VersionOrdering::Newer,
        Ordering::Less => VersionOrdering::Older,
        Ordering::Equal => VersionOrdering::Equal,
    })
}

/// Decide the outcome of a comparison whose facts are already gathered.
///
/// Identical version strings fail with `version.unchanged` unless
/// `allow_match` is set, in which case a warning is logged.
pub fn evaluate(comparison: VersionComparison, allow_match: bool) -> Result<VersionComparison> {
    if comparison.changed {
        crate::log_status!(
            "version",
            "Version changed from [{}] in [{}][{}] to [{}] in [{}] (latest local changes).",
            comparison.branch_version,
            comparison.branch,
            comparison.branch_sha,
            comparison.local_version,
            comparison.current_branch
        );
        return Ok(comparison);
    }

    let err = Error::version_unchanged(VersionUnchangedDetails {
        version: comparison.local_version.clone(),
        branch: comparison.branch.clone(),
        branch_sha: comparison.branch_sha.clone(),
        current_branch: comparison.current_branch.clone(),
    });

    if !allow_match {
        return Err(err);
    }

    crate::log_status!("warn", "{}", err.message);
    Ok(comparison)
}

/// Compare the local manifest version with `origin/<branch>`.
pub fn compare_versions(dir: &Path, branch: &str, allow_match: bool) -> Result<VersionComparison> {
    let branch = validation::require_non_empty(branch, "branch", "Branch name cannot be empty")?;
    git::fetch(dir, REMOTE, branch)?;

    let remote_ref = format!("{}/{}", REMOTE, branch);
    let branch_version = version_at_ref(dir, &remote_ref)?;
    let local_version = local_version(dir)?;
    let branch_sha = commit_sha(dir, &remote_ref, true)?;
    let current_branch = current_branch(dir)?;

    let comparison = VersionComparison {
        changed: branch_version != local_version,
        ordering: semver_ordering(&local_version, &branch_version),
        branch: branch.to_string(),
        branch_sha,
        branch_version,
        current_branch,
        local_version,
    };

    evaluate(comparison, allow_match)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn comparison(branch_version: &str, local_version: &str) -> VersionComparison {
        VersionComparison {
            branch: "main".to_string(),
            branch_sha: "abc1234".to_string(),
            branch_version: branch_version.to_string(),
            current_branch: "feature".to_string(),
            local_version: local_version.to_string(),
            changed: branch_version != local_version,
            ordering: semver_ordering(local_version, branch_version),
        }
    }

    #[test]
    fn semver_ordering_compares_numerically() {
        assert_eq!(semver_ordering("1.10.0", "1.9.0"), Some(VersionOrdering::Newer));
        assert_eq!(semver_ordering("1.0.0-beta.1", "1.0.0"), Some(VersionOrdering::Older));
        assert_eq!(semver_ordering("2.0.0", "2.0.0"), Some(VersionOrdering::Equal));
        assert_eq!(semver_ordering("latest", "1.0.0"), None);
    }

    #[test]
    fn evaluate_accepts_changed_version() {
        let out = evaluate(comparison("1.0.0", "1.1.0"), false).unwrap();
        assert!(out.changed);
        assert_eq!(out.ordering, Some(VersionOrdering::Newer));
    }

    #[test]
    fn evaluate_rejects_unchanged_version() {
        let err = evaluate(comparison("1.0.0", "1.0.0"), false).unwrap_err();
        assert_eq!(err.code.as_str(), "version.unchanged");
        assert!(err.is_validation());
        assert_eq!(err.details["branchSha"], "abc1234");
        assert_eq!(err.details["currentBranch"], "feature");
    }

    #[test]
    fn evaluate_allows_unchanged_version_when_requested() {
        let out = evaluate(comparison("1.0.0", "1.0.0"), true).unwrap();
        assert!(!out.changed);
    }

    #[test]
    fn compare_versions_rejects_blank_branch() {
        let dir = TempDir::new().unwrap();
        let err = compare_versions(dir.path(), "  ", false).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn local_version_reads_discovered_manifest() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE_NAME),
            r#"{"name":"pkg","version":"3.2.1"}"#,
        )
        .unwrap();
        assert_eq!(local_version(dir.path()).unwrap(), "3.2.1");
    }
}
