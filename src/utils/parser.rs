//! Parsing primitives for path resolution and markdown heading lookup.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::path::PathBuf;

/// Resolve a file against a base directory.
///
/// Absolute files win; `~` in the base is expanded. An empty base resolves
/// relative to the current directory.
pub fn resolve_path(base: &str, file: &str) -> PathBuf {
    if file.starts_with('/') {
        return PathBuf::from(file);
    }

    let base = base.trim();
    if base.is_empty() {
        PathBuf::from(file)
    } else {
        PathBuf::from(shellexpand::tilde(base).to_string()).join(file)
    }
}

/// Build a case-insensitive regex matching `text` literally.
pub fn literal_case_insensitive(text: &str) -> Result<Regex> {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::internal_unexpected(format!("Invalid heading pattern: {}", e)))
}

/// Whether `## <header>` occurs anywhere in `content`, ignoring case.
///
/// This is a prefix match: `## Usage` also matches `## Usage Notes`.
pub fn contains_heading(content: &str, header: &str) -> Result<bool> {
    let re = literal_case_insensitive(&format!("## {}", header))?;
    Ok(re.is_match(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_handles_absolute() {
        assert_eq!(
            resolve_path("/base", "/absolute/README.md"),
            PathBuf::from("/absolute/README.md")
        );
    }

    #[test]
    fn resolve_path_handles_relative() {
        assert_eq!(
            resolve_path("/base", "README.md"),
            PathBuf::from("/base/README.md")
        );
    }

    #[test]
    fn resolve_path_with_empty_base_is_relative() {
        assert_eq!(resolve_path("", "README.md"), PathBuf::from("README.md"));
    }

    #[test]
    fn contains_heading_ignores_case() {
        assert!(contains_heading("# pkg\n\n## usage\n", "Usage").unwrap());
        assert!(!contains_heading("# pkg\n", "Usage").unwrap());
    }

    #[test]
    fn contains_heading_treats_metacharacters_literally() {
        let content = "## C++ (advanced)\n";
        assert!(contains_heading(content, "C++ (advanced)").unwrap());
        assert!(!contains_heading("## Cxx advanced\n", "C.. (advanced)").unwrap());
    }
}
