//! a52conf CLI - build-time capability registry for the a52 decoder

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("a52conf=debug")
    } else {
        EnvFilter::new("a52conf=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Probe(args) => commands::probe::execute(args, color),
        Commands::Configure(args) => commands::configure::execute(args, color),
        Commands::Show(args) => commands::show::execute(args, color),
        Commands::Check(args) => commands::check::execute(args, color),
        Commands::Cfg(args) => commands::cfg::execute(args, color),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
