//! Directory and JSON file helpers.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryOutcome {
    Created,
    Found,
}

/// Create `path` (and missing parents) unless it already exists.
pub fn make_directory(path: &Path) -> Result<DirectoryOutcome> {
    if path.exists() {
        crate::log_status!("files", "Directory found at [{}]", path.display());
        return Ok(DirectoryOutcome::Found);
    }

    fs::create_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some("create directory".to_string())))?;
    crate::log_status!("files", "Directory created at [{}]", path.display());
    Ok(DirectoryOutcome::Created)
}

/// Entry names in `path`, sorted.
pub fn read_directory(path: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some("list directory".to_string())))?;

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    Ok(names)
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = io::read_file(path, "read json file")?;
    serde_json::from_str(&content)
        .map_err(|e| Error::validation_invalid_json(e, Some(path.to_string_lossy().to_string())))
}

/// Write `data` as pretty-printed JSON.
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize json file".to_string())))?;
    io::write_file(path, &content, "write json file")?;
    crate::log_status!("files", "Data written to [{}]", path.display());
    Ok(())
}
