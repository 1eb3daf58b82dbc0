//! Predicate mapping table: symbolic keys to absolute IRIs
//!
//! Both class names (resolved to `rdf:type` objects) and attribute names
//! (resolved to predicates) live in the same key space. A table is an
//! explicit value handed to the generator; there is no global instance.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexSet;
use oxrdf::NamedNode;

use crate::entity::{parse_iri, Entity};
use crate::error::{Error, Result};

const CIDOC_CRM_TOML: &str = include_str!("../mappings/cidoc_crm.toml");

/// Mapping from class and attribute names to IRIs
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, NamedNode>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the bundled CIDOC CRM classes and properties
    pub fn cidoc_crm() -> Result<Self> {
        Self::from_toml_str(CIDOC_CRM_TOML)
    }

    /// Resolve a key to its IRI
    pub fn lookup(&self, key: &str) -> Result<&NamedNode> {
        self.entries
            .get(key)
            .ok_or_else(|| Error::NotInMapping(key.to_string()))
    }

    /// Insert or overwrite an entry. Returns the previous IRI, if any.
    pub fn register(&mut self, key: impl Into<String>, iri: &str) -> Result<Option<NamedNode>> {
        let key = key.into();
        let node = parse_iri(iri)?;
        let previous = self.entries.insert(key.clone(), node);
        if let Some(old) = &previous {
            if old.as_str() != iri {
                tracing::warn!("Mapping for '{}' changed: {} -> {}", key, old.as_str(), iri);
            }
        }
        Ok(previous)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&NamedNode> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamedNode)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, iri)| (key.as_str(), iri))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Merge another table into this one; entries from `other` win
    pub fn extend(&mut self, other: MappingTable) {
        for (key, iri) in other.entries {
            if let Some(old) = self.entries.get(&key) {
                if old != &iri {
                    tracing::warn!("Mapping for '{}' changed: {} -> {}", key, old.as_str(), iri.as_str());
                }
            }
            self.entries.insert(key, iri);
        }
    }

    /// Keys an entity tree needs that this table cannot resolve.
    ///
    /// Keys are reported once. An entity's own keys come before those of
    /// the entities it references.
    pub fn missing_keys(&self, entity: &Entity) -> Vec<String> {
        let mut missing = IndexSet::new();
        self.collect_missing(entity, &mut missing);
        missing.into_iter().collect()
    }

    fn collect_missing(&self, entity: &Entity, missing: &mut IndexSet<String>) {
        if !self.contains(entity.class_name()) {
            missing.insert(entity.class_name().to_string());
        }
        for (name, _) in entity.attributes() {
            if !self.contains(name) {
                missing.insert(name.to_string());
            }
        }
        for child in entity.children() {
            self.collect_missing(child, missing);
        }
    }

    /// Parse a TOML mapping source.
    ///
    /// String values are entries; tables only group entries and are
    /// flattened into the same key space.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let root: toml::Table = source
            .parse()
            .map_err(|e: toml::de::Error| Error::MappingSource(e.to_string()))?;
        let mut table = Self::new();
        table.load_toml_table(&root)?;
        tracing::debug!("Loaded {} mapping entries from TOML", table.len());
        Ok(table)
    }

    fn load_toml_table(&mut self, section: &toml::Table) -> Result<()> {
        for (key, value) in section {
            match value {
                toml::Value::String(iri) => {
                    self.register(key.as_str(), iri)?;
                }
                toml::Value::Table(nested) => self.load_toml_table(nested)?,
                other => {
                    return Err(Error::MappingSource(format!(
                        "Entry '{}' must be a string or a table, found {}",
                        key,
                        other.type_str()
                    )))
                }
            }
        }
        Ok(())
    }

    /// Parse a JSON mapping source; nested objects group entries
    pub fn from_json_str(source: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(source)?;
        let serde_json::Value::Object(root) = root else {
            return Err(Error::MappingSource(
                "JSON mapping must be an object".to_string(),
            ));
        };
        let mut table = Self::new();
        table.load_json_object(&root)?;
        tracing::debug!("Loaded {} mapping entries from JSON", table.len());
        Ok(table)
    }

    fn load_json_object(&mut self, section: &serde_json::Map<String, serde_json::Value>) -> Result<()> {
        for (key, value) in section {
            match value {
                serde_json::Value::String(iri) => {
                    self.register(key.as_str(), iri)?;
                }
                serde_json::Value::Object(nested) => self.load_json_object(nested)?,
                _ => {
                    return Err(Error::MappingSource(format!(
                        "Entry '{}' must be a string or an object",
                        key
                    )))
                }
            }
        }
        Ok(())
    }

    /// Load a mapping file; `.json` files are JSON, everything else TOML
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        tracing::debug!("Reading mapping file {:?}", path);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }
}
