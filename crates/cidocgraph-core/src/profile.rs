//! Class profiles: the mapping entries an entity kind brings with it
//!
//! Ontology extensions (CRMdig, CRMcls, ...) define classes the bundled
//! CIDOC CRM table does not know. A profile names such a class, its type
//! IRI and any extra properties, and registers them into a table before
//! generation. Nothing is registered implicitly by creating an entity.

use crate::entity::{ClassName, Entity};
use crate::error::Result;
use crate::mapping::MappingTable;

/// Capability descriptor for an entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassProfile {
    class: ClassName,
    type_iri: String,
    properties: Vec<(String, String)>,
}

impl ClassProfile {
    pub fn new(class: impl Into<ClassName>, type_iri: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            type_iri: type_iri.into(),
            properties: Vec::new(),
        }
    }

    /// Add a property the class uses that needs its own entry
    pub fn with_property(mut self, key: impl Into<String>, iri: impl Into<String>) -> Self {
        self.properties.push((key.into(), iri.into()));
        self
    }

    pub fn class_name(&self) -> &str {
        self.class.as_str()
    }

    pub fn type_iri(&self) -> &str {
        &self.type_iri
    }

    /// Keys this profile contributes: the class first, then its properties
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.class.as_str()).chain(self.properties.iter().map(|(k, _)| k.as_str()))
    }

    /// Register the class and its properties
    pub fn register(&self, table: &mut MappingTable) -> Result<()> {
        table.register(self.class.as_str(), &self.type_iri)?;
        for (key, iri) in &self.properties {
            table.register(key.as_str(), iri)?;
        }
        tracing::debug!(
            "Registered profile {} ({} properties)",
            self.class,
            self.properties.len()
        );
        Ok(())
    }

    /// True when every key of this profile resolves in `table`
    pub fn is_registered(&self, table: &MappingTable) -> bool {
        self.keys().all(|key| table.contains(key))
    }

    /// New, attribute-less entity of this class
    pub fn instantiate(&self, iri: &str) -> Result<Entity> {
        Entity::new(iri, self.class.clone())
    }
}

/// CRMdig D1 Digital Object
pub fn d1_digital_object() -> ClassProfile {
    ClassProfile::new(
        "D1DigitalObject",
        "http://www.ics.forth.gr/isl/CRMdig/D1_Digital_Object",
    )
}

/// CRMcls X1 Corpus
pub fn x1_corpus() -> ClassProfile {
    ClassProfile::new("X1Corpus", "https://clscor.io/ontologies/CRMcls/X1Corpus")
}

/// Every predefined profile
pub fn builtin() -> Vec<ClassProfile> {
    vec![d1_digital_object(), x1_corpus()]
}

/// Predefined profile by class name, ignoring case
pub fn find(class: &str) -> Option<ClassProfile> {
    builtin()
        .into_iter()
        .find(|profile| profile.class_name().eq_ignore_ascii_case(class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::collect_triples;

    #[test]
    fn test_register_profile() {
        let mut table = MappingTable::new();
        let profile = ClassProfile::new("Corpus", "http://ex/Corpus")
            .with_property("has_member", "http://ex/member");

        assert!(!profile.is_registered(&table));
        profile.register(&mut table).unwrap();
        assert!(profile.is_registered(&table));
        assert_eq!(table.lookup("has_member").unwrap().as_str(), "http://ex/member");
    }

    #[test]
    fn test_keys() {
        let profile = ClassProfile::new("Corpus", "http://ex/Corpus")
            .with_property("a", "http://ex/a")
            .with_property("b", "http://ex/b");

        assert_eq!(profile.keys().collect::<Vec<_>>(), vec!["Corpus", "a", "b"]);
    }

    #[test]
    fn test_instantiate_does_not_register() {
        let table = MappingTable::new();
        let corpus = x1_corpus().instantiate("https://eltec.clscor.io/entity/corpus").unwrap();

        assert_eq!(corpus.class_name(), "X1Corpus");
        assert!(matches!(
            collect_triples(&corpus, &table),
            Err(Error::NotInMapping(key)) if key == "X1Corpus"
        ));
    }

    #[test]
    fn test_registered_profile_does_not_leak_between_tables() {
        let mut extended = MappingTable::cidoc_crm().unwrap();
        x1_corpus().register(&mut extended).unwrap();
        let plain = MappingTable::cidoc_crm().unwrap();

        assert!(extended.contains("X1Corpus"));
        assert!(!plain.contains("X1Corpus"));
    }

    #[test]
    fn test_digital_object_projects_once_registered() {
        let mut table = MappingTable::cidoc_crm().unwrap();
        let profile = d1_digital_object();
        profile.register(&mut table).unwrap();

        let object = profile
            .instantiate("https://eltec.clscor.io/entity/text/1")
            .unwrap()
            .with("p3_has_note", "plain text edition")
            .unwrap();
        let triples = collect_triples(&object, &table).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(
            triples[0].object.to_string(),
            "<http://www.ics.forth.gr/isl/CRMdig/D1_Digital_Object>"
        );
    }

    #[test]
    fn test_find_builtin() {
        assert_eq!(find("x1corpus"), Some(x1_corpus()));
        assert_eq!(find("D1DigitalObject"), Some(d1_digital_object()));
        assert_eq!(find("E55Type"), None);
        assert_eq!(builtin().len(), 2);
    }

    #[test]
    fn test_invalid_type_iri() {
        let mut table = MappingTable::new();
        let err = ClassProfile::new("Bad", "not an iri").register(&mut table).unwrap_err();
        assert!(matches!(err, Error::InvalidIri(_)));
    }
}
