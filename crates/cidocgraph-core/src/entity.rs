//! Entity (node) types and attribute values

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use indexmap::IndexMap;
use oxrdf::NamedNode;

use crate::error::{Error, Result};

/// Attribute name that holds the identity in documents; never an attribute
pub const IDENTITY_KEY: &str = "iri";

/// Symbolic ontology class name, resolved through the mapping table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(pub String);

impl ClassName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for ClassName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an absolute IRI, mapping the parser error into ours
pub(crate) fn parse_iri(iri: &str) -> Result<NamedNode> {
    NamedNode::new(iri).map_err(|e| Error::InvalidIri(format!("{iri} ({e})")))
}

/// A scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Reference to another resource; emitted as-is
    Resource(NamedNode),
    Text(String),
    Integer(i128),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl Scalar {
    /// Create a resource reference from an IRI string
    pub fn resource(iri: &str) -> Result<Self> {
        parse_iri(iri).map(Self::Resource)
    }

    /// Short name of the scalar kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resource(_) => "resource",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::DateTime(_) => "dateTime",
        }
    }
}

/// An attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value; the attribute is skipped
    Absent,
    Scalar(Scalar),
    /// Nested entity, projected recursively
    Entity(Box<Entity>),
    /// Multi-valued attribute
    List(Vec<Value>),
}

impl Value {
    /// Empty values produce no triples at all.
    ///
    /// Zero and `false` are values, not emptiness, and are kept.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Scalar(Scalar::Text(s)) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Normalize into the ordered items the attribute contributes.
    ///
    /// Only `List` fans out. Text stays a single item even though a string
    /// is iterable character by character.
    pub fn items(&self) -> &[Value] {
        match self {
            Self::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Human-readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Absent => "absent value".to_string(),
            Self::Scalar(s) => format!("{} scalar", s.kind()),
            Self::Entity(e) => format!("entity {}", e.iri().as_str()),
            Self::List(items) => format!("list of {} items", items.len()),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::Text(s))
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Self::Scalar(Scalar::Integer(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Integer(n.into()))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Scalar(Scalar::Integer(n.into()))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Scalar(Scalar::Integer(n.into()))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Scalar(Scalar::Float(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Boolean(b))
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Scalar(Scalar::Date(d))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Scalar(Scalar::DateTime(dt))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Scalar(Scalar::DateTime(dt.into()))
    }
}

impl From<NamedNode> for Value {
    fn from(node: NamedNode) -> Self {
        Self::Scalar(Scalar::Resource(node))
    }
}

impl From<Entity> for Value {
    fn from(e: Entity) -> Self {
        Self::Entity(Box::new(e))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Absent)
    }
}

/// A typed record projected into the graph (a node)
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Identity; fixed at construction
    iri: NamedNode,

    /// Ontology class
    class: ClassName,

    /// Attributes in declaration order
    attributes: IndexMap<String, Value>,
}

impl Entity {
    /// Create a new entity; the identity must be an absolute IRI
    pub fn new(iri: &str, class: impl Into<ClassName>) -> Result<Self> {
        Ok(Self {
            iri: parse_iri(iri)?,
            class: class.into(),
            attributes: IndexMap::new(),
        })
    }

    pub fn iri(&self) -> &NamedNode {
        &self.iri
    }

    pub fn class_name(&self) -> &str {
        self.class.as_str()
    }

    /// Builder form of [`Entity::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Assign an attribute. Re-assignment keeps the original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let name = name.into();
        if name == IDENTITY_KEY {
            return Err(Error::ReservedAttribute(name));
        }
        self.attributes.insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Non-empty attributes in declaration order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Entities directly referenced by this one, in attribute order
    pub fn children(&self) -> impl Iterator<Item = &Entity> {
        self.attributes().flat_map(|(_, value)| {
            value.items().iter().filter_map(|item| match item {
                Value::Entity(child) => Some(child.as_ref()),
                _ => None,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new("https://example.org/a", "E55Type").unwrap();

        assert_eq!(entity.iri().as_str(), "https://example.org/a");
        assert_eq!(entity.class_name(), "E55Type");
        assert_eq!(entity.attributes().count(), 0);
    }

    #[test]
    fn test_identity_must_be_iri() {
        let err = Entity::new("not an iri", "E55Type").unwrap_err();
        assert!(matches!(err, Error::InvalidIri(_)));
    }

    #[test]
    fn test_identity_is_not_an_attribute() {
        let mut entity = Entity::new("urn:a", "Thing").unwrap();
        let err = entity.set(IDENTITY_KEY, "urn:b").unwrap_err();

        assert!(matches!(err, Error::ReservedAttribute(name) if name == "iri"));
        assert_eq!(entity.iri().as_str(), "urn:a");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let entity = Entity::new("urn:a", "Thing")
            .unwrap()
            .with("name", "Foo")
            .unwrap()
            .with("note", "")
            .unwrap()
            .with("tags", Vec::<String>::new())
            .unwrap()
            .with("label", Option::<String>::None)
            .unwrap()
            .with("count", 0)
            .unwrap()
            .with("flag", false)
            .unwrap();

        let names: Vec<&str> = entity.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "count", "flag"]);
    }

    #[test]
    fn test_text_is_a_single_item() {
        let value = Value::from("English ELTeC Corpus");
        assert_eq!(value.items().len(), 1);

        let value = Value::from(vec!["a", "b"]);
        assert_eq!(value.items().len(), 2);
    }

    #[test]
    fn test_reassignment_keeps_position() {
        let mut entity = Entity::new("urn:a", "Thing").unwrap();
        entity.set("first", 1).unwrap();
        entity.set("second", 2).unwrap();
        entity.set("first", 3).unwrap();

        let attrs: Vec<_> = entity.attributes().collect();
        assert_eq!(attrs[0], ("first", &Value::from(3)));
        assert_eq!(attrs[1], ("second", &Value::from(2)));
    }

    #[test]
    fn test_children() {
        let child = Entity::new("urn:b", "Thing").unwrap();
        let other = Entity::new("urn:c", "Thing").unwrap();
        let entity = Entity::new("urn:a", "Thing")
            .unwrap()
            .with("single", child)
            .unwrap()
            .with("many", vec![Value::from(other), Value::from("text")])
            .unwrap();

        let iris: Vec<&str> = entity.children().map(|c| c.iri().as_str()).collect();
        assert_eq!(iris, vec!["urn:b", "urn:c"]);
    }
}
