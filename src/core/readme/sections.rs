use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::utils::parser;

use super::{Section, DEFAULT_PLACEHOLDER};

/// Ensure the document carries `# <name>` and the manifest description.
///
/// In validate-only mode a missing title or description is an error and the
/// content is returned untouched. Otherwise a missing title causes
/// `# <name>\n\n<description>\n\n` to be prepended; when the title is already
/// present the description is not checked.
pub fn ensure_title_and_description(
    manifest: &Manifest,
    content: &str,
    validate_only: bool,
) -> Result<String> {
    let expected_title = format!("# {}", manifest.name);
    let expected_description = manifest.description_or_empty();

    let title_exists = content.contains(&expected_title);
    let description_exists =
        expected_description.is_empty() || content.contains(expected_description);

    if validate_only {
        if !title_exists || !description_exists {
            return Err(Error::readme_title_mismatch(
                expected_title,
                expected_description,
            ));
        }
        crate::log_status!(
            "readme",
            "Main title and description validated successfully for [{}].",
            manifest.name
        );
        return Ok(content.to_string());
    }

    if !title_exists {
        crate::log_status!(
            "readme",
            "Adding main title and description for [{}]...",
            manifest.name
        );
        return Ok(format!(
            "{}\n\n{}\n\n{}",
            expected_title, expected_description, content
        ));
    }

    crate::log_status!("readme", "Main title already exists for [{}]", manifest.name);
    Ok(content.to_string())
}

/// Append a `## <header>` section at the end of the document.
///
/// Body is the section content, else its placeholder, else the default
/// placeholder (empty strings count as absent). No existence check is made,
/// so creating an existing header yields a duplicate heading.
pub fn create_section(content: &str, section: &Section) -> String {
    let body = section
        .provided_content()
        .or_else(|| section.placeholder.as_deref().filter(|p| !p.is_empty()))
        .unwrap_or(DEFAULT_PLACEHOLDER);

    crate::log_status!("readme", "Creating section [{}]...", section.header);

    format!("{}\n## {}\n\n{}\n", content, section.header, body)
}

/// Replace the body of the first `## <header>` section.
///
/// The replaced range starts at the first case-insensitive match of
/// `## <header>\n` and runs up to (not including) the next `## ` occurrence,
/// or the end of the document. Content without a match is returned unchanged.
pub fn update_section_content(content: &str, section: &Section) -> Result<String> {
    let new_body = section.content.as_deref().unwrap_or("");
    let heading = parser::literal_case_insensitive(&format!("## {}\n", section.header))?;

    crate::log_status!("readme", "Updating section [{}]...", section.header);

    let Some(found) = heading.find(content) else {
        return Ok(content.to_string());
    };

    let end = content[found.end()..]
        .find("## ")
        .map(|offset| found.end() + offset)
        .unwrap_or(content.len());

    let mut out = String::with_capacity(content.len() + new_body.len());
    out.push_str(&content[..found.start()]);
    out.push_str(&format!("## {}\n\n{}", section.header, new_body));
    out.push_str(&content[end..]);
    Ok(out)
}

/// Whether `## <header>` appears in the document, ignoring case.
pub fn section_exists(content: &str, header: &str) -> Result<bool> {
    parser::contains_heading(content, header)
}

/// Fail on the first required section whose heading is absent.
///
/// Optional sections are never reported.
pub fn validate_sections(content: &str, sections: &[Section]) -> Result<()> {
    for section in sections.iter().filter(|s| s.required) {
        if !section_exists(content, &section.header)? {
            return Err(Error::readme_section_missing(&section.header));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        Manifest::new("test-package", "1.0.0").with_description("A test package description")
    }

    #[test]
    fn ensure_title_prepends_when_missing() {
        let out = ensure_title_and_description(&manifest(), "## Usage\n", false).unwrap();
        assert_eq!(
            out,
            "# test-package\n\nA test package description\n\n## Usage\n"
        );
    }

    #[test]
    fn ensure_title_leaves_content_when_title_present() {
        let content = "# test-package\n\nsomething else\n";
        let out = ensure_title_and_description(&manifest(), content, false).unwrap();
        assert_eq!(out, content);
    }

    #[test]
    fn ensure_title_with_empty_description_still_prepends_blank_block() {
        let manifest = Manifest::new("x", "0.1.0");
        let out = ensure_title_and_description(&manifest, "", false).unwrap();
        assert_eq!(out, "# x\n\n\n\n");
    }

    #[test]
    fn ensure_title_validate_only_rejects_missing_description() {
        let err = ensure_title_and_description(&manifest(), "# test-package\n", true).unwrap_err();
        assert_eq!(err.code.as_str(), "readme.title_mismatch");
        assert_eq!(err.details["expectedTitle"], "# test-package");
    }

    #[test]
    fn ensure_title_validate_only_accepts_matching_document() {
        let content = "# test-package\n\nA test package description\n";
        let out = ensure_title_and_description(&manifest(), content, true).unwrap();
        assert_eq!(out, content);
    }

    #[test]
    fn create_section_prefers_content_then_placeholder_then_default() {
        let with_content = Section::new("A").with_content("body");
        assert_eq!(create_section("x", &with_content), "x\n## A\n\nbody\n");

        let with_placeholder = Section::new("A").with_placeholder("TBD");
        assert_eq!(create_section("x", &with_placeholder), "x\n## A\n\nTBD\n");

        let empty_content = Section::new("A").with_content("");
        assert_eq!(
            create_section("x", &empty_content),
            "x\n## A\n\nPlaceholder content here\n"
        );
    }

    #[test]
    fn create_section_does_not_check_existing_headings() {
        let once = create_section("", &Section::new("Usage"));
        let twice = create_section(&once, &Section::new("Usage"));
        assert_eq!(twice.matches("## Usage").count(), 2);
    }

    #[test]
    fn update_section_replaces_up_to_next_heading() {
        let content = "## A\n\nold\n## B\n\nkeep\n";
        let section = Section::new("A").with_content("new");
        let out = update_section_content(content, &section).unwrap();
        assert_eq!(out, "## A\n\nnew## B\n\nkeep\n");
    }

    #[test]
    fn update_section_runs_to_end_of_document_for_last_section() {
        let content = "# t\n\n## Usage\n\nold text\nmore\n";
        let section = Section::new("usage").with_content("fresh");
        let out = update_section_content(content, &section).unwrap();
        assert_eq!(out, "# t\n\n## usage\n\nfresh");
    }

    #[test]
    fn update_section_only_touches_first_match() {
        let content = "## A\n\none\n## A\n\ntwo\n";
        let section = Section::new("A").with_content("new");
        let out = update_section_content(content, &section).unwrap();
        assert_eq!(out, "## A\n\nnew## A\n\ntwo\n");
    }

    #[test]
    fn update_section_without_match_is_noop() {
        let content = "## Other\n\nbody\n";
        let out = update_section_content(content, &Section::new("A").with_content("x")).unwrap();
        assert_eq!(out, content);
    }

    #[test]
    fn validate_sections_matches_case_insensitively() {
        let sections = vec![Section::new("A").required()];
        assert!(validate_sections("## a\n", &sections).is_ok());

        let err = validate_sections("## B\n", &sections).unwrap_err();
        assert_eq!(
            err.message,
            "Validation failed. Required section [A] is missing."
        );
    }

    #[test]
    fn validate_sections_ignores_optional_sections() {
        let sections = vec![Section::new("Missing"), Section::new("Present").required()];
        assert!(validate_sections("## Present\n", &sections).is_ok());
    }

    #[test]
    fn validate_sections_reports_first_missing_in_order() {
        let sections = vec![
            Section::new("Missing Section").required(),
            Section::new("Existing Section").required(),
        ];
        let err = validate_sections("## Existing Section\n", &sections).unwrap_err();
        assert_eq!(err.details["header"], "Missing Section");
    }
}
