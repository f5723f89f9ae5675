use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::utils::io;

use super::badges::{badge_section, default_sections, repo_slug_from_git, BadgeSectionOptions, BadgeType};
use super::{ReconcileOptions, Section};

pub const SETTINGS_FILE_NAME: &str = "readme.json";

/// Contents of an optional `readme.json` next to the README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<BadgeType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_create_missing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_content: Option<bool>,
}

/// Values given on the command line. `None` defers to the settings file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub badges: Option<Vec<BadgeType>>,
    pub linkedin_username: Option<String>,
    pub repo_slug: Option<String>,
    pub auto_create_missing: Option<bool>,
    pub update_content: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveReadmeSettings {
    pub sections: Vec<Section>,
    pub badges: Vec<BadgeType>,
    pub linkedin_username: Option<String>,
    pub repo_slug: Option<String>,
    pub auto_create_missing: bool,
    pub update_content: bool,
}

/// Read `<dir>/readme.json`; `Ok(None)` when the file does not exist.
pub fn load_settings(dir: &Path) -> Result<Option<ReadmeSettings>> {
    let path = dir.join(SETTINGS_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }

    let content = io::read_file(&path, "read readme settings")?;
    let settings = serde_json::from_str(&content)
        .map_err(|e| Error::validation_invalid_json(e, Some(path.to_string_lossy().to_string())))?;

    crate::log_status!("readme", "Loaded settings from [{}]", path.display());
    Ok(Some(settings))
}

/// Merge command-line values over `readme.json` over defaults.
///
/// The repository slug falls back to the git remote of `repo_dir` only when
/// neither layer names one.
pub fn resolve_effective_settings(
    manifest: &Manifest,
    file: Option<&ReadmeSettings>,
    overrides: &SettingsOverrides,
    repo_dir: &Path,
) -> EffectiveReadmeSettings {
    let repo_slug = overrides
        .repo_slug
        .clone()
        .or_else(|| file.and_then(|f| f.repo_slug.clone()))
        .or_else(|| repo_slug_from_git(repo_dir));

    let sections = file
        .and_then(|f| f.sections.clone())
        .unwrap_or_else(|| default_sections(manifest, repo_slug.as_deref()));

    let badges = overrides
        .badges
        .clone()
        .or_else(|| file.and_then(|f| f.badges.clone()))
        .unwrap_or_default();

    let linkedin_username = overrides
        .linkedin_username
        .clone()
        .or_else(|| file.and_then(|f| f.linkedin_username.clone()));

    let auto_create_missing = overrides
        .auto_create_missing
        .or_else(|| file.and_then(|f| f.auto_create_missing))
        .unwrap_or(true);

    let update_content = overrides
        .update_content
        .or_else(|| file.and_then(|f| f.update_content))
        .unwrap_or(false);

    EffectiveReadmeSettings {
        sections,
        badges,
        linkedin_username,
        repo_slug,
        auto_create_missing,
        update_content,
    }
}

impl EffectiveReadmeSettings {
    pub fn to_reconcile_options(
        &self,
        manifest: &Manifest,
        repo_path: &str,
        manifest_path: Option<PathBuf>,
        validate_only: bool,
    ) -> ReconcileOptions {
        let badges = badge_section(&BadgeSectionOptions {
            badge_types: &self.badges,
            linkedin_username: self.linkedin_username.as_deref(),
            manifest,
            repo_slug: self.repo_slug.as_deref(),
        });

        ReconcileOptions {
            auto_create_missing: self.auto_create_missing,
            badge_section: badges,
            manifest_path,
            repo_path: repo_path.to_string(),
            sections: self.sections.clone(),
            update_content: self.update_content,
            validate_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn manifest() -> Manifest {
        Manifest::new("pkg", "1.0.0")
    }

    fn with_slug() -> SettingsOverrides {
        SettingsOverrides {
            repo_slug: Some("owner/pkg".to_string()),
            ..SettingsOverrides::default()
        }
    }

    #[test]
    fn load_settings_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_settings(dir.path()).unwrap().is_none());
    }

    #[test]
    fn load_settings_parses_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            r#"{"sections":[{"header":"Usage","required":true}],"badges":["github-stars"],"autoCreateMissing":false}"#,
        )
        .unwrap();

        let settings = load_settings(dir.path()).unwrap().unwrap();
        assert_eq!(settings.sections.unwrap()[0], Section::new("Usage").required());
        assert_eq!(settings.badges, Some(vec![BadgeType::GithubStars]));
        assert_eq!(settings.auto_create_missing, Some(false));
    }

    #[test]
    fn load_settings_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE_NAME), "{").unwrap();

        let err = load_settings(dir.path()).unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let dir = TempDir::new().unwrap();
        let effective = resolve_effective_settings(&manifest(), None, &with_slug(), dir.path());

        assert!(effective.auto_create_missing);
        assert!(!effective.update_content);
        assert!(effective.badges.is_empty());
        assert_eq!(effective.sections[0].header, "License");
    }

    #[test]
    fn flags_override_file_values() {
        let dir = TempDir::new().unwrap();
        let file = ReadmeSettings {
            auto_create_missing: Some(false),
            update_content: Some(true),
            badges: Some(vec![BadgeType::Forks]),
            ..ReadmeSettings::default()
        };
        let overrides = SettingsOverrides {
            auto_create_missing: Some(true),
            ..with_slug()
        };

        let effective = resolve_effective_settings(&manifest(), Some(&file), &overrides, dir.path());
        assert!(effective.auto_create_missing);
        assert!(effective.update_content);
        assert_eq!(effective.badges, vec![BadgeType::Forks]);
    }

    #[test]
    fn reconcile_options_carry_rendered_badges() {
        let dir = TempDir::new().unwrap();
        let overrides = SettingsOverrides {
            badges: Some(vec![BadgeType::Issues]),
            ..with_slug()
        };
        let effective = resolve_effective_settings(&manifest(), None, &overrides, dir.path());
        let options = effective.to_reconcile_options(&manifest(), "repo", None, true);

        assert!(options.badge_section.contains("github/issues/owner/pkg"));
        assert!(options.validate_only);
        assert_eq!(options.repo_path, "repo");
    }
}
