//! Mapping table commands

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use cidocgraph_core::{document, MappingTable};

use crate::config::Config;

#[derive(Args)]
pub struct MappingArgs {
    /// Extra mapping files (TOML or JSON)
    #[arg(short, long = "mapping", global = true)]
    pub mappings: Vec<PathBuf>,

    /// Predefined class profiles to register (D1DigitalObject, X1Corpus)
    #[arg(short, long = "profile", global = true)]
    pub profiles: Vec<String>,

    /// Skip the bundled CIDOC CRM mapping
    #[arg(long, global = true)]
    pub no_builtin: bool,

    #[command(subcommand)]
    pub command: MappingCommands,
}

#[derive(Subcommand)]
pub enum MappingCommands {
    /// List every key and its IRI
    List {
        /// Print as a JSON object
        #[arg(long)]
        json: bool,
    },
    /// Print the IRI for one key
    Get {
        /// Class name or attribute name
        key: String,
    },
    /// Report keys used by documents that the mapping cannot resolve
    Check {
        /// Entity documents (JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

pub fn run(args: &MappingArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let table = config.mapping_table(&args.mappings, &args.profiles, !args.no_builtin)?;

    match &args.command {
        MappingCommands::List { json } => run_list(&table, *json),
        MappingCommands::Get { key } => run_get(&table, key),
        MappingCommands::Check { files } => run_check(&table, files),
    }
}

fn run_list(table: &MappingTable, json: bool) -> anyhow::Result<()> {
    if json {
        let entries: BTreeMap<&str, &str> = table.iter().map(|(k, v)| (k, v.as_str())).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for (key, iri) in table.iter() {
        println!("{}\t{}", key, iri.as_str());
    }
    Ok(())
}

fn run_get(table: &MappingTable, key: &str) -> anyhow::Result<()> {
    let iri = table.lookup(key)?;
    println!("{}", iri.as_str());
    Ok(())
}

fn run_check(table: &MappingTable, files: &[PathBuf]) -> anyhow::Result<()> {
    let mut failed = 0;
    for path in files {
        let entities = document::load(path)
            .with_context(|| format!("reading document {}", path.display()))?;
        for entity in &entities {
            let missing = table.missing_keys(entity);
            if missing.is_empty() {
                tracing::debug!("{} fully mapped", entity.iri());
                continue;
            }
            failed += 1;
            println!("{}: {}", entity.iri().as_str(), missing.join(", "));
        }
    }

    if failed > 0 {
        anyhow::bail!("{} entities use unmapped keys", failed);
    }
    println!("All entities mapped");
    Ok(())
}
