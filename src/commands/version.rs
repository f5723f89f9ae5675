use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use utilkit::version::{self, VersionComparison, DEFAULT_BRANCH};

use super::CmdResult;

#[derive(Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    command: VersionCommand,
}

#[derive(Subcommand)]
enum VersionCommand {
    /// Show the version of the nearest package.json
    Show {
        /// Directory to search from
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Fail when the local version equals the one on origin/<branch>
    Check {
        /// Branch to compare against
        #[arg(long, default_value = DEFAULT_BRANCH)]
        branch: String,

        /// Warn instead of failing when the versions match
        #[arg(long)]
        allow_match: bool,

        /// Repository directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum VersionOutput {
    Show(VersionShowOutput),
    Check(VersionCheckOutput),
}

#[derive(Serialize)]
pub struct VersionShowOutput {
    command: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct VersionCheckOutput {
    command: String,
    #[serde(flatten)]
    comparison: VersionComparison,
}

pub fn run(args: VersionArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<VersionOutput> {
    match args.command {
        VersionCommand::Show { dir } => {
            let version = version::local_version(&dir)?;

            Ok((
                VersionOutput::Show(VersionShowOutput {
                    command: "version.show".to_string(),
                    version,
                }),
                0,
            ))
        }
        VersionCommand::Check {
            branch,
            allow_match,
            dir,
        } => {
            let comparison = version::compare_versions(&dir, &branch, allow_match)?;

            Ok((
                VersionOutput::Check(VersionCheckOutput {
                    command: "version.check".to_string(),
                    comparison,
                }),
                0,
            ))
        }
    }
}
