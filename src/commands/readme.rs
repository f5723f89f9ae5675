use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use utilkit::manifest;
use utilkit::readme::{self, BadgeType, ParsedReadme, ReconcileOptions, SettingsOverrides};

use super::{repo_dir, CmdResult};

#[derive(Args)]
pub struct ReadmeArgs {
    #[command(subcommand)]
    command: ReadmeCommand,
}

#[derive(Args, Debug, Default)]
struct ReadmeTarget {
    /// Directory containing README.md (default: current directory)
    #[arg(long, default_value = "")]
    repo: String,

    /// Explicit package.json path (default: discovered upward from --repo)
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Badge to render above the title (repeatable), e.g. github-stars
    #[arg(long = "badge", value_name = "TYPE", value_parser = parse_badge)]
    badges: Vec<BadgeType>,

    /// LinkedIn username for the linkedin badge
    #[arg(long, value_name = "USERNAME")]
    linkedin: Option<String>,

    /// GitHub owner/repo used in badge URLs (default: from git remote)
    #[arg(long, value_name = "OWNER/REPO")]
    repo_slug: Option<String>,
}

#[derive(Subcommand)]
enum ReadmeCommand {
    /// Ensure title, description and sections, then write README.md
    Sync {
        #[command(flatten)]
        target: ReadmeTarget,

        /// Replace the body of existing sections that have configured content
        #[arg(long)]
        update_content: bool,

        /// Fail on missing required sections instead of creating them
        #[arg(long)]
        no_auto_create: bool,
    },
    /// Check title, description and required sections without writing
    Validate {
        #[command(flatten)]
        target: ReadmeTarget,
    },
}

#[derive(Serialize)]
pub struct ReadmeOutput {
    command: String,
    path: String,
    validate_only: bool,
    #[serde(flatten)]
    readme: ParsedReadme,
}

fn parse_badge(value: &str) -> Result<BadgeType, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|_| {
        let known: Vec<String> = BadgeType::ALL
            .iter()
            .filter_map(|b| serde_json::to_value(b).ok())
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        format!("unknown badge '{}', expected one of: {}", value, known.join(", "))
    })
}

pub fn run(args: ReadmeArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ReadmeOutput> {
    match args.command {
        ReadmeCommand::Sync {
            target,
            update_content,
            no_auto_create,
        } => {
            let overrides = overrides_for(
                &target,
                update_content.then_some(true),
                no_auto_create.then_some(false),
            );
            reconcile("readme.sync", target, overrides, false)
        }
        ReadmeCommand::Validate { target } => {
            let overrides = overrides_for(&target, None, None);
            reconcile("readme.validate", target, overrides, true)
        }
    }
}

fn overrides_for(
    target: &ReadmeTarget,
    update_content: Option<bool>,
    auto_create_missing: Option<bool>,
) -> SettingsOverrides {
    SettingsOverrides {
        badges: (!target.badges.is_empty()).then(|| target.badges.clone()),
        linkedin_username: target.linkedin.clone(),
        repo_slug: target.repo_slug.clone(),
        auto_create_missing,
        update_content,
    }
}

/// Settings layered over the located manifest. The manifest path is pinned in
/// the options so `readme::reconcile` reads it without searching again.
fn reconcile_options(
    target: &ReadmeTarget,
    overrides: &SettingsOverrides,
    validate_only: bool,
) -> utilkit::Result<(PathBuf, ReconcileOptions)> {
    let dir = repo_dir(&target.repo);
    let (manifest_path, manifest) =
        manifest::locate(target.manifest.as_deref(), Some(dir.as_path()))?;
    let file_settings = readme::load_settings(&dir)?;

    let effective =
        readme::resolve_effective_settings(&manifest, file_settings.as_ref(), overrides, &dir);
    let options =
        effective.to_reconcile_options(&manifest, &target.repo, Some(manifest_path), validate_only);

    Ok((dir, options))
}

fn reconcile(
    command: &str,
    target: ReadmeTarget,
    overrides: SettingsOverrides,
    validate_only: bool,
) -> CmdResult<ReadmeOutput> {
    let (dir, options) = reconcile_options(&target, &overrides, validate_only)?;
    let parsed = readme::reconcile(&options)?;

    Ok((
        ReadmeOutput {
            command: command.to_string(),
            path: dir.join(readme::README_FILE_NAME).to_string_lossy().to_string(),
            validate_only,
            readme: parsed,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_badge_accepts_kebab_case_names() {
        assert_eq!(parse_badge("github-stars").unwrap(), BadgeType::GithubStars);
        assert_eq!(parse_badge("open-prs").unwrap(), BadgeType::OpenPrs);
    }

    #[test]
    fn reconcile_options_pin_the_discovered_manifest() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name":"pkg","version":"1.0.0"}"#,
        )
        .unwrap();
        let target = ReadmeTarget {
            repo: dir.path().to_string_lossy().to_string(),
            ..ReadmeTarget::default()
        };

        let (_, options) =
            reconcile_options(&target, &SettingsOverrides::default(), true).unwrap();
        assert_eq!(options.manifest_path, Some(dir.path().join("package.json")));
        assert!(options.validate_only);
    }

    #[test]
    fn parse_badge_lists_known_names_on_error() {
        let err = parse_badge("sparkles").unwrap_err();
        assert!(err.contains("unknown badge 'sparkles'"));
        assert!(err.contains("npm-version"));
    }
}
