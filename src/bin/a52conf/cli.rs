//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// a52conf - build-time capability registry for the a52 decoder
#[derive(Parser)]
#[command(name = "a52conf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the probe snapshot as TOML
    Probe(ProbeArgs),

    /// Resolve the registry and write config.h
    Configure(ConfigureArgs),

    /// Show the resolved flags
    Show(ShowArgs),

    /// Check whether an existing config.h is stale
    Check(CheckArgs),

    /// Print Cargo build-script directives for the registry
    Cfg(CfgArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the probe facts come from.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Read facts from a snapshot file (.toml or .json)
    #[arg(long, value_name = "PATH", conflicts_with = "target")]
    pub snapshot: Option<PathBuf>,

    /// Use platform tables for this target triple instead of the host
    #[arg(long, value_name = "TRIPLE", env = "A52CONF_TARGET")]
    pub target: Option<String>,

    /// Project root containing .a52conf/config.toml
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Ignore ~/.a52conf/config.toml
    #[arg(long)]
    pub no_global_config: bool,
}

#[derive(Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the facts without applying configuration overrides
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (defaults to include/ under the project)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Don't write a52conf.json
    #[arg(long)]
    pub no_json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only flags whose name contains this
    pub pattern: Option<String>,

    /// Hide presence flags that are off
    #[arg(long)]
    pub present: bool,

    /// Print the JSON descriptor instead of a table
    #[arg(long, conflicts_with_all = ["pattern", "present"])]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Header to check (defaults to config.h in the output directory)
    #[arg(long, value_name = "PATH")]
    pub header: Option<PathBuf>,
}

#[derive(Args)]
pub struct CfgArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
