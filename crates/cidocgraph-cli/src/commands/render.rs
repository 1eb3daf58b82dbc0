//! Render command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use cidocgraph_core::{document, Graph, RdfFormat};

use crate::config::Config;
use crate::output::write_output;
use crate::Cli;

#[derive(Args)]
pub struct RenderArgs {
    /// Entity documents (JSON)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format: turtle, nt, rdfxml (default from the output
    /// extension, then from config)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Extra mapping files (TOML or JSON), applied after the config ones
    #[arg(short, long = "mapping")]
    pub mappings: Vec<PathBuf>,

    /// Predefined class profiles to register (D1DigitalObject, X1Corpus)
    #[arg(short, long = "profile")]
    pub profiles: Vec<String>,

    /// Skip the bundled CIDOC CRM mapping
    #[arg(long)]
    pub no_builtin: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RenderArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    let format = output_format(args, &config)?;
    let mapping = config.mapping_table(&args.mappings, &args.profiles, !args.no_builtin)?;

    let mut graph = Graph::new();
    for path in &args.files {
        let entities = document::load(path)
            .with_context(|| format!("reading document {}", path.display()))?;
        for entity in &entities {
            if let Err(e) = graph.extend_from(entity, &mapping) {
                let hint = if e.is_generation_error() {
                    "; run `cidocgraph mapping check` to list unmapped keys"
                } else {
                    ""
                };
                return Err(anyhow::Error::new(e).context(format!(
                    "projecting {} from {}{}",
                    entity.iri(),
                    path.display(),
                    hint
                )));
            }
        }
        tracing::info!("Projected {} entities from {}", entities.len(), path.display());
    }

    let content = cidocgraph_core::render(&graph, format)?;
    write_output(args.output.as_deref(), &content)?;

    if let Some(path) = &args.output {
        if !cli.quiet {
            eprintln!(
                "Rendered {} triples about {} subjects to {:?}",
                graph.len(),
                graph.subjects().len(),
                path
            );
        }
    }
    Ok(())
}

fn output_format(args: &RenderArgs, config: &Config) -> anyhow::Result<RdfFormat> {
    if let Some(name) = &args.format {
        return Ok(name.parse()?);
    }
    let by_extension = args
        .output
        .as_deref()
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension);
    Ok(by_extension.unwrap_or(config.format))
}
