//! Command dispatch and handler modules.

mod bundle;
mod clean;
mod env;
mod init;
mod list;
mod publish;
mod publish_local;
mod stage;

use std::path::PathBuf;

use miette::Result;

use aarpub_core::manifest::MANIFEST_FILE;
use aarpub_util::errors::AarpubError;
use aarpub_util::fs::find_ancestor_with;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init => init::exec(),
        Command::List => list::exec(),
        Command::Stage { publication } => stage::exec(publication.as_deref(), cli.verbose),
        Command::PublishLocal { publication } => {
            publish_local::exec(publication.as_deref(), cli.verbose)
        }
        Command::Bundle => bundle::exec(),
        Command::Publish => publish::exec(),
        Command::Clean => clean::exec(),
        Command::Env { reveal } => env::exec(reveal),
    }
}

/// Nearest directory, from the current one upwards, holding `Aarpub.toml`.
fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(AarpubError::Io)?;
    find_ancestor_with(&cwd, MANIFEST_FILE)
        .ok_or_else(|| {
            AarpubError::Manifest {
                message: format!(
                    "Could not find {MANIFEST_FILE} in this directory or any parent"
                ),
            }
            .into()
        })
}
