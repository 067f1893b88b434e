//! CLI argument definitions for aarpub.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "aarpub",
    version,
    about = "Publish pre-built Android archives to Maven Central",
    long_about = "aarpub assembles each AAR listed in Aarpub.toml with sources and javadoc \
                  jars and a POM, signs everything with an in-memory PGP key, and stages, \
                  installs or uploads the result to the Central Publisher Portal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default Aarpub.toml into the current directory
    Init,

    /// List the publications in the catalog
    List,

    /// Assemble, sign and install into the staging repository
    Stage {
        /// Publication name (all publications when omitted)
        publication: Option<String>,
    },

    /// Assemble, sign and install into ~/.m2/repository
    PublishLocal {
        /// Publication name (all publications when omitted)
        publication: Option<String>,
    },

    /// Stage every publication and zip the staging repository
    Bundle,

    /// Stage, bundle and upload to the Central Publisher Portal
    Publish,

    /// Remove staged and assembled output
    Clean,

    /// Show resolved publish settings
    Env {
        /// Show secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
