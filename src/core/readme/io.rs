use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::{self, Manifest};
use crate::utils::{io, parser};

use super::sections::*;
use super::{ParsedReadme, ReconcileOptions, README_FILE_NAME};

#[derive(Debug, Clone)]
pub struct LoadedReadme {
    pub content: String,
    pub manifest: Manifest,
    pub path: PathBuf,
}

/// Load the manifest and `<repo_path>/README.md`.
///
/// The manifest comes from `manifest_path` when given, otherwise from an
/// upward search starting at `repo_path`.
pub fn load(manifest_path: Option<&Path>, repo_path: &str) -> Result<LoadedReadme> {
    let path = parser::resolve_path(repo_path, README_FILE_NAME);
    let search_from = path.parent().filter(|p| !p.as_os_str().is_empty());
    let manifest = manifest::resolve(manifest_path, search_from)?;

    crate::log_status!("readme", "Loading README.md from [{}]...", path.display());
    if !path.is_file() {
        return Err(Error::readme_not_found(path.to_string_lossy()));
    }

    let content = io::read_file(&path, "read readme")?;
    crate::log_status!("readme", "Successfully loaded README.md");

    Ok(LoadedReadme {
        content,
        manifest,
        path,
    })
}

pub fn save(path: &Path, content: &str) -> Result<()> {
    crate::log_status!("readme", "Saving README.md to [{}]...", path.display());
    io::write_file_atomic(path, content, "write readme")?;
    crate::log_status!("readme", "Successfully saved README.md");
    Ok(())
}

/// Apply the section pass to already-loaded content.
///
/// Sections are processed in order and each existence check sees the content
/// as left by the previous sections. Validate-only mode never mutates: it only
/// checks the preamble and the required sections.
pub fn reconcile_content(
    manifest: &Manifest,
    content: &str,
    options: &ReconcileOptions,
) -> Result<String> {
    let mut readme = format!(
        "{}{}",
        options.badge_section,
        ensure_title_and_description(manifest, content, options.validate_only)?
    );

    for section in &options.sections {
        let exists = section_exists(&readme, &section.header)?;

        if !exists && section.required && !options.auto_create_missing {
            return Err(Error::readme_section_missing(&section.header));
        }

        if options.validate_only {
            continue;
        }

        if !exists && options.auto_create_missing {
            readme = create_section(&readme, section);
        }

        if exists && options.update_content && section.provided_content().is_some() {
            readme = update_section_content(&readme, section)?;
        }
    }

    if options.validate_only {
        validate_sections(&readme, &options.sections)?;
    }

    Ok(readme)
}

/// Load, reconcile, and either validate or persist the README.
///
/// Persistence happens once, after every section was processed.
pub fn reconcile(options: &ReconcileOptions) -> Result<ParsedReadme> {
    let loaded = load(options.manifest_path.as_deref(), &options.repo_path)?;
    let readme = reconcile_content(&loaded.manifest, &loaded.content, options)?;

    if options.validate_only {
        crate::log_status!("readme", "README.md has been successfully validated.");
    } else {
        save(&loaded.path, &readme)?;
        crate::log_status!(
            "readme",
            "README.md has been successfully validated and updated."
        );
    }

    Ok(ParsedReadme {
        description: loaded.manifest.description_or_empty().to_string(),
        sections: options.sections.clone(),
        title: format!("# {}", loaded.manifest.name),
    })
}
