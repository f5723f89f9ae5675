//! Git primitives used by the version check and badge discovery.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::utils::command;

fn run_git(dir: &Path, args: &[&str], context: &str) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::git_command_failed(format!("Failed to run git {}: {}", context, e)))?;

    if !output.status.success() {
        return Err(Error::git_command_failed(format!(
            "git {} failed: {}",
            context,
            command::error_text(&output)
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Fetch a single branch from a remote.
pub fn fetch(dir: &Path, remote: &str, branch: &str) -> Result<()> {
    crate::log_status!("git", "Fetching [{}/{}]...", remote, branch);
    run_git(dir, &["fetch", remote, branch], "fetch")?;
    Ok(())
}

/// Contents of `file` as committed at `git_ref`.
pub fn show_file_at_ref(dir: &Path, git_ref: &str, file: &str) -> Result<String> {
    let object = format!("{}:{}", git_ref, file);
    run_git(dir, &["show", &object], "show").map_err(|e| {
        Error::git_command_failed(format!(
            "Failed fetching {} from [{}] with error [{}]",
            file, git_ref, e.message
        ))
    })
}

/// Commit SHA for a ref, abbreviated when `short` is set.
pub fn rev_parse(dir: &Path, git_ref: &str, short: bool) -> Result<String> {
    let mut args = vec!["rev-parse"];
    if short {
        args.push("--short");
    }
    args.push(git_ref);

    run_git(dir, &args, "rev-parse").map_err(|e| {
        Error::git_command_failed(format!(
            "Failed to get commit SHA for [{}] with error [{}]",
            git_ref, e.message
        ))
    })
}

/// Name of the checked-out branch (`HEAD` when detached).
pub fn current_branch(dir: &Path) -> Result<String> {
    run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"], "rev-parse").map_err(|e| {
        Error::git_command_failed(format!(
            "Failed to get current branch name with error [{}]",
            e.message
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rev_parse_outside_repository_is_git_failure() {
        let dir = TempDir::new().unwrap();
        let err = rev_parse(dir.path(), "HEAD", true).unwrap_err();
        assert_eq!(err.code.as_str(), "git.command_failed");
        assert!(err.message.starts_with("Failed to get commit SHA for [HEAD]"));
    }

    #[test]
    fn show_file_outside_repository_names_ref() {
        let dir = TempDir::new().unwrap();
        let err = show_file_at_ref(dir.path(), "origin/main", "package.json").unwrap_err();
        assert!(err
            .message
            .starts_with("Failed fetching package.json from [origin/main]"));
    }
}
