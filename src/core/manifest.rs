//! Package manifest (`package.json`) loading and upward discovery.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

pub const MANIFEST_FILE_NAME: &str = "package.json";
pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_SCOPE_PATTERN: &str = r"^@[^/]+/";

/// Package metadata. Unknown keys are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            license: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, or `""` when absent.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Directory to start from; current directory when `None`.
    pub start_dir: Option<PathBuf>,
    pub max_depth: usize,
    pub file_name: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            start_dir: None,
            max_depth: DEFAULT_MAX_DEPTH,
            file_name: MANIFEST_FILE_NAME.to_string(),
        }
    }
}

impl DiscoveryOptions {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: Some(dir.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Return `Ok(None)` instead of failing when the file cannot be read or parsed.
    pub none_on_error: bool,
}

/// Parse manifest content.
pub fn parse(content: &str, origin: &str) -> Result<Manifest> {
    serde_json::from_str(content).map_err(|e| Error::manifest_invalid_json(origin, e.to_string()))
}

/// Read and parse a manifest file.
///
/// A missing file is `manifest.not_found`; malformed content is `manifest.invalid_json`.
/// With `none_on_error`, both become `Ok(None)` and a warning is logged.
pub fn load(path: &Path, options: LoadOptions) -> Result<Option<Manifest>> {
    let result = read_and_parse(path);

    match result {
        Ok(manifest) => {
            crate::log_status!("manifest", "Extracted package name [{}]", manifest.name);
            Ok(Some(manifest))
        }
        Err(err) if options.none_on_error => {
            crate::log_status!(
                "warn",
                "Failed to read manifest at [{}] with error [{}], returning none.",
                path.display(),
                err
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn read_and_parse(path: &Path) -> Result<Manifest> {
    if !path.is_file() {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| MANIFEST_FILE_NAME.to_string());
        return Err(Error::manifest_not_found(
            format!("Manifest not found at [{}]", path.display()),
            file_name,
            Vec::new(),
        ));
    }

    let content = io::read_file(path, "read manifest")?;
    parse(&content, &path.to_string_lossy())
}

/// Walk upward from the start directory until a manifest is found.
///
/// At most `max_depth` directories are checked; reaching the filesystem root
/// first also fails. Both failures list the checked directories.
pub fn find(options: &DiscoveryOptions) -> Result<(PathBuf, Manifest)> {
    let cwd = || {
        env::current_dir()
            .map_err(|e| Error::internal_io(e.to_string(), Some("resolve cwd".to_string())))
    };
    let start = match &options.start_dir {
        Some(dir) if dir.is_absolute() => absolute_start(dir, dir),
        Some(dir) => absolute_start(dir, &cwd()?),
        None => cwd()?,
    };

    let mut current = start.as_path();
    let mut checked_dirs: Vec<String> = Vec::new();

    while checked_dirs.len() < options.max_depth {
        checked_dirs.push(current.to_string_lossy().to_string());
        let candidate = current.join(&options.file_name);

        if candidate.is_file() {
            let manifest = read_and_parse(&candidate)?;
            crate::log_status!("manifest", "Extracted package name [{}]", manifest.name);
            return Ok((candidate, manifest));
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => {
                return Err(Error::manifest_not_found(
                    format!(
                        "No {} found during directory traversal of dirs [{}].",
                        options.file_name,
                        checked_dirs.join(", ")
                    ),
                    options.file_name.clone(),
                    checked_dirs,
                ));
            }
        }
    }

    Err(Error::manifest_not_found(
        format!(
            "Reached maximum directory traversal depth without finding a {}. Checked dirs [{}].",
            options.file_name,
            checked_dirs.join(", ")
        ),
        options.file_name.clone(),
        checked_dirs,
    ))
}

/// Join `start` onto `cwd` and fold away `.` and `..` so the upward walk only
/// ever visits real ancestors.
fn absolute_start(start: &Path, cwd: &Path) -> PathBuf {
    let mut absolute = PathBuf::new();
    for component in cwd.join(start).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                absolute.pop();
            }
            other => absolute.push(other),
        }
    }
    absolute
}

/// Like [`resolve`], but also returns where the manifest was read from.
pub fn locate(path: Option<&Path>, start_dir: Option<&Path>) -> Result<(PathBuf, Manifest)> {
    if let Some(path) = path {
        let manifest = load(path, LoadOptions::default())?.ok_or_else(|| {
            Error::internal_unexpected(format!("Manifest at [{}] yielded nothing", path.display()))
        })?;
        return Ok((path.to_path_buf(), manifest));
    }

    let options = DiscoveryOptions {
        start_dir: start_dir.map(Path::to_path_buf),
        ..DiscoveryOptions::default()
    };
    find(&options)
}

/// Load the manifest at `path` when given, otherwise discover it from `start_dir`.
pub fn resolve(path: Option<&Path>, start_dir: Option<&Path>) -> Result<Manifest> {
    locate(path, start_dir).map(|(_, manifest)| manifest)
}

/// Turn a package name into a display title.
///
/// The scope is stripped, the name split on `-`, and each word's first letter uppercased:
/// `@scope/my-tool` → `My Tool`.
pub fn format_package_name(name: &str, scope_pattern: Option<&str>) -> Result<String> {
    let pattern = scope_pattern.unwrap_or(DEFAULT_SCOPE_PATTERN);
    let scope = Regex::new(pattern).map_err(|e| {
        Error::validation_invalid_argument(
            "scope_pattern",
            format!("Invalid regex pattern: {}", e),
            Some(pattern.to_string()),
            None,
        )
    })?;

    let unscoped = scope.replace(name, "");
    let words: Vec<String> = unscoped
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    Ok(words.join(" "))
}
