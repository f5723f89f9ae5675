//! README title/description and section reconciliation.
//!
//! The pipeline is load → ensure preamble → per-section create/update →
//! validate or save. Text operations live in `sections`, file-facing
//! orchestration in `io`, badge and default-section generation in `badges`,
//! and `readme.json` settings in `settings`.

mod badges;
mod io;
mod sections;
mod settings;

pub use badges::*;
pub use io::*;
pub use sections::*;
pub use settings::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const README_FILE_NAME: &str = "README.md";
pub const DEFAULT_PLACEHOLDER: &str = "Placeholder content here";

/// A named `##` section the README is expected to carry.
///
/// Identity is `header`, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl Section {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            content: None,
            placeholder: None,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Content when non-empty.
    pub(crate) fn provided_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Summary of a reconcile run, derived from the manifest and the requested sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReadme {
    pub description: String,
    pub sections: Vec<Section>,
    pub title: String,
}

/// Options for [`reconcile`].
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub auto_create_missing: bool,
    /// Prepended verbatim ahead of the document.
    pub badge_section: String,
    /// Explicit manifest path; discovered upward from `repo_path` when `None`.
    pub manifest_path: Option<PathBuf>,
    /// Directory holding `README.md`; current directory when empty.
    pub repo_path: String,
    pub sections: Vec<Section>,
    pub update_content: bool,
    pub validate_only: bool,
}
