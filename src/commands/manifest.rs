use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use utilkit::manifest::{self, Manifest};

use super::CmdResult;

#[derive(Args)]
pub struct ManifestArgs {
    #[command(subcommand)]
    command: ManifestCommand,
}

#[derive(Subcommand)]
enum ManifestCommand {
    /// Print the nearest (or given) package.json
    Show {
        /// Explicit package.json path
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Directory to search upward from
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Turn a package name into a display title
    Title {
        /// Package name (default: name from the nearest package.json)
        name: Option<String>,

        /// Regex matching the scope prefix to strip
        #[arg(long, value_name = "REGEX")]
        scope_pattern: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ManifestOutput {
    Show(ManifestShowOutput),
    Title(ManifestTitleOutput),
}

#[derive(Serialize)]
pub struct ManifestShowOutput {
    command: String,
    manifest: Manifest,
}

#[derive(Serialize)]
pub struct ManifestTitleOutput {
    command: String,
    name: String,
    title: String,
}

pub fn run(args: ManifestArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ManifestOutput> {
    match args.command {
        ManifestCommand::Show { path, dir } => {
            let manifest = manifest::resolve(path.as_deref(), Some(dir.as_path()))?;

            Ok((
                ManifestOutput::Show(ManifestShowOutput {
                    command: "manifest.show".to_string(),
                    manifest,
                }),
                0,
            ))
        }
        ManifestCommand::Title {
            name,
            scope_pattern,
        } => {
            let name = match name {
                Some(name) => name,
                None => manifest::resolve(None, None)?.name,
            };
            let title = manifest::format_package_name(&name, scope_pattern.as_deref())?;

            Ok((
                ManifestOutput::Title(ManifestTitleOutput {
                    command: "manifest.title".to_string(),
                    name,
                    title,
                }),
                0,
            ))
        }
    }
}
