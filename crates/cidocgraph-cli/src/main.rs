//! cidocgraph CLI - Render CIDOC CRM entity documents as RDF

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, mapping, render};

#[derive(Parser)]
#[command(name = "cidocgraph")]
#[command(author, version, about = "Project CIDOC CRM entities into RDF triples")]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render entity documents as Turtle or N-Triples
    Render(render::RenderArgs),
    /// Inspect and check mapping tables
    Mapping(mapping::MappingArgs),
    /// Manage CLI configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting cidocgraph CLI");

    match &cli.command {
        Commands::Render(args) => render::run(args, &cli)?,
        Commands::Mapping(args) => mapping::run(args)?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
