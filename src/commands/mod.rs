use std::path::{Path, PathBuf};

use utilkit::readme::README_FILE_NAME;
use utilkit::utils::parser;

pub type CmdResult<T> = utilkit::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod manifest;
pub mod readme;
pub mod version;

/// Directory that holds the README for a `--repo` value; `.` when empty.
pub(crate) fn repo_dir(repo: &str) -> PathBuf {
    let readme_path = parser::resolve_path(repo, README_FILE_NAME);
    readme_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (utilkit::Result<serde_json::Value>, i32) {
    crate::tty::status("utilkit is working...");

    match command {
        crate::Commands::Readme(args) => dispatch!(args, global, readme),
        crate::Commands::Version(args) => dispatch!(args, global, version),
        crate::Commands::Manifest(args) => dispatch!(args, global, manifest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_dir_defaults_to_current_directory() {
        assert_eq!(repo_dir(""), PathBuf::from("."));
        assert_eq!(repo_dir("some/repo"), PathBuf::from("some/repo"));
    }
}
