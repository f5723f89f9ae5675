use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::manifest::Manifest;
use crate::utils::command;

use super::Section;

const SHIELDS_URL: &str = "https://img.shields.io/";
const LINKEDIN_URL: &str = "https://www.linkedin.com/in/";
const VISITORS_URL: &str = "https://visitor-badge.laobi.icu/badge?page_id=";
const GITHUB_REMOTE_PATTERN: &str = r"github\.com[:/](.+/.+?)(\.git)?$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeType {
    CodeSize,
    CommitsPerMonth,
    Contributors,
    Forks,
    GithubStars,
    InstallSize,
    Issues,
    LastCommit,
    License,
    Linkedin,
    NpmVersion,
    OpenPrs,
    RepoSize,
    Version,
    Visitors,
}

impl BadgeType {
    pub const ALL: &'static [BadgeType] = &[
        BadgeType::CodeSize,
        BadgeType::CommitsPerMonth,
        BadgeType::Contributors,
        BadgeType::Forks,
        BadgeType::GithubStars,
        BadgeType::InstallSize,
        BadgeType::Issues,
        BadgeType::LastCommit,
        BadgeType::License,
        BadgeType::Linkedin,
        BadgeType::NpmVersion,
        BadgeType::OpenPrs,
        BadgeType::RepoSize,
        BadgeType::Version,
        BadgeType::Visitors,
    ];

    /// Path segment used by shields.io for this badge.
    fn shields_path(&self) -> &'static str {
        match self {
            BadgeType::CodeSize => "languages/code-size",
            BadgeType::CommitsPerMonth => "commit-activity/m",
            BadgeType::Contributors => "contributors",
            BadgeType::Forks => "forks",
            BadgeType::GithubStars => "stars",
            BadgeType::InstallSize => "npm/dw",
            BadgeType::Issues => "issues",
            BadgeType::LastCommit => "last-commit",
            BadgeType::License => "license",
            BadgeType::Linkedin => "LinkedIn",
            BadgeType::NpmVersion => "npm",
            BadgeType::OpenPrs => "issues-pr",
            BadgeType::RepoSize => "repo-size",
            BadgeType::Version => "v/release",
            BadgeType::Visitors => "visitors",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BadgeType::CodeSize => "Code Size",
            BadgeType::CommitsPerMonth => "Commits per Month",
            BadgeType::Contributors => "Contributors",
            BadgeType::Forks => "Forks",
            BadgeType::GithubStars => "GitHub Stars",
            BadgeType::InstallSize => "Install Size",
            BadgeType::Issues => "GitHub Issues",
            BadgeType::LastCommit => "Last Commit",
            BadgeType::License => "License",
            BadgeType::Linkedin => "LinkedIn",
            BadgeType::NpmVersion => "npm version",
            BadgeType::OpenPrs => "Open PRs",
            BadgeType::RepoSize => "Repo Size",
            BadgeType::Version => "Version",
            BadgeType::Visitors => "visitors",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BadgeSectionOptions<'a> {
    pub badge_types: &'a [BadgeType],
    pub linkedin_username: Option<&'a str>,
    pub manifest: &'a Manifest,
    /// `owner/repo` on GitHub.
    pub repo_slug: Option<&'a str>,
}

/// Extract `owner/repo` from a GitHub remote URL (https or ssh form).
pub fn parse_repo_slug(remote_url: &str) -> Option<String> {
    let re = Regex::new(GITHUB_REMOTE_PATTERN).ok()?;
    re.captures(remote_url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Repository slug from `git config --get remote.origin.url`.
pub fn repo_slug_from_git(dir: &Path) -> Option<String> {
    let remote = command::run_in_optional(dir, "git", &["config", "--get", "remote.origin.url"]);
    let slug = remote.as_deref().and_then(parse_repo_slug);

    if slug.is_none() {
        crate::log_status!(
            "warn",
            "Could not determine GitHub repository from git remote in [{}].",
            dir.display()
        );
    }
    slug
}

fn render_badge(badge: BadgeType, package_name: &str, options: &BadgeSectionOptions) -> Option<String> {
    let repo = options.repo_slug.unwrap_or("");
    let label = badge.label();
    let path = badge.shields_path();

    let rendered = match badge {
        BadgeType::Linkedin => {
            let username = options.linkedin_username.filter(|u| !u.is_empty())?;
            format!(
                "<a href=\"{LINKEDIN_URL}{username}\" target=\"_blank\"><img src=\"{SHIELDS_URL}badge/LinkedIn-%230077B5.svg?&style=flat-square&logo=linkedin&logoColor=white\" alt=\"LinkedIn\"></a>"
            )
        }
        BadgeType::InstallSize => format!("![{label}]({SHIELDS_URL}npm/{path}/{package_name})"),
        BadgeType::NpmVersion => format!(
            "[![{label}]({SHIELDS_URL}npm/v/{package_name}.svg?style=flat-square)](https://www.npmjs.org/package/{})",
            options.manifest.name
        ),
        BadgeType::Visitors => format!("![{label}]({VISITORS_URL}{repo})"),
        _ => format!("![{label}]({SHIELDS_URL}github/{path}/{repo})"),
    };

    Some(rendered)
}

/// Render the selected badges as a centered block.
///
/// Returns an empty string when nothing renders (e.g. only a LinkedIn badge
/// without a username).
pub fn badge_section(options: &BadgeSectionOptions) -> String {
    let name = &options.manifest.name;
    let package_name = if name.starts_with('@') {
        name.replacen('/', "%2F", 1)
    } else {
        name.clone()
    };

    if options.repo_slug.is_none()
        && options
            .badge_types
            .iter()
            .any(|badge| *badge != BadgeType::Linkedin)
    {
        crate::log_status!(
            "warn",
            "One or more badges are enabled but no repository slug is known. Badge URLs may not be generated correctly."
        );
    }

    let badges: Vec<String> = options
        .badge_types
        .iter()
        .filter_map(|badge| render_badge(*badge, &package_name, options))
        .collect();

    if badges.is_empty() {
        String::new()
    } else {
        format!("<div align=\"center\">\n\n{}\n\n</div>", badges.join("\n"))
    }
}

/// Optional sections every generated README carries by default.
pub fn default_sections(manifest: &Manifest, repo_slug: Option<&str>) -> Vec<Section> {
    crate::log_status!(
        "readme",
        "Generating default sections for [{}]...",
        manifest.name
    );

    let license = manifest.license.as_deref().unwrap_or("ISC");
    let mut sections = vec![Section::new("License").with_content(format!(
        "This project is licensed under the {} License. Please see the [LICENSE](./LICENSE) file for more details.",
        license
    ))];

    if let Some(slug) = repo_slug {
        sections.push(Section::new("🥂 Thanks Contributors").with_content(
            [
                "Thanks for spending time on this project.".to_string(),
                format!("<a href=\"https://github.com/{}/graphs/contributors\">", slug),
                format!("  <img src=\"https://contrib.rocks/image?repo={}\" />", slug),
                "</a>".to_string(),
            ]
            .join("\n"),
        ));
    }

    if let Some(scope) = package_scope(&manifest.name) {
        sections.push(Section::new("🔗 Other packages in the family").with_content(format!(
            "Check out the rest of the `@{scope}` collection on [npm/@{scope}](https://www.npmjs.com/search?q=%40{scope})."
        )));
    }

    sections
}

/// Scope of `@scope/name`, without the `@`.
fn package_scope(name: &str) -> Option<&str> {
    name.strip_prefix('@')
        .and_then(|rest| rest.split_once('/'))
        .map(|(scope, _)| scope)
        .filter(|scope| !scope.is_empty())
}
