//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use cidocgraph_core::{profile, MappingTable, RdfFormat};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "CIDOCGRAPH_CONFIG";

/// Get the config file path
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cidocgraph")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub format: RdfFormat,
    /// Mapping files loaded on top of the built-in table
    pub mapping_files: Vec<PathBuf>,
    /// Start from the bundled CIDOC CRM table
    pub builtin_mapping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: RdfFormat::Turtle,
            mapping_files: Vec::new(),
            builtin_mapping: true,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("writing config file {}", path.display()))?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["format", "mapping_files", "builtin_mapping"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "format" => Some(self.format.to_string()),
            "mapping_files" => Some(
                self.mapping_files
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "builtin_mapping" => Some(self.builtin_mapping.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "format" => self.format = value.parse()?,
            "mapping_files" => {
                self.mapping_files = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect();
            }
            "builtin_mapping" => {
                self.builtin_mapping = value
                    .parse()
                    .with_context(|| format!("builtin_mapping must be true or false, got '{value}'"))?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    /// Build the mapping table: built-in entries, config files, `extra`,
    /// then the named class profiles
    pub fn mapping_table(
        &self,
        extra: &[PathBuf],
        profiles: &[String],
        builtin: bool,
    ) -> anyhow::Result<MappingTable> {
        let mut table = if builtin && self.builtin_mapping {
            MappingTable::cidoc_crm()?
        } else {
            MappingTable::new()
        };
        for path in self.mapping_files.iter().chain(extra) {
            let loaded = MappingTable::load(path)
                .with_context(|| format!("loading mapping file {}", path.display()))?;
            tracing::info!("Loaded {} mapping entries from {}", loaded.len(), path.display());
            table.extend(loaded);
        }
        for name in profiles {
            let Some(found) = profile::find(name) else {
                let known: Vec<String> = profile::builtin()
                    .iter()
                    .map(|p| p.class_name().to_string())
                    .collect();
                anyhow::bail!("Unknown profile: {}. Available profiles: {}", name, known.join(", "));
            };
            found.register(&mut table)?;
        }
        Ok(table)
    }
}
