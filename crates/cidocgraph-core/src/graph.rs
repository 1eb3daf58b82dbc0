//! Triples and the de-duplicating graph accumulator

use indexmap::IndexSet;
use oxrdf::NamedNode;

use crate::entity::Entity;
use crate::error::Result;
use crate::mapping::MappingTable;
use crate::term::Term;

/// A (subject, predicate, object) statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: NamedNode,
    pub predicate: NamedNode,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: NamedNode, predicate: NamedNode, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Set of triples collected across generation runs.
///
/// Duplicates collapse; iteration follows first insertion. A graph is only
/// emptied by an explicit [`Graph::clear`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple; returns false if it was already present
    pub fn add(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Insert many triples; returns how many were new
    pub fn merge(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .map(|triple| self.add(triple))
            .filter(|added| *added)
            .count()
    }

    /// Project an entity into this graph, see [`crate::generator::generate_into`]
    pub fn extend_from(&mut self, entity: &Entity, mapping: &MappingTable) -> Result<usize> {
        crate::generator::generate_into(entity, mapping, self)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Distinct subjects in first-seen order
    pub fn subjects(&self) -> Vec<&NamedNode> {
        let subjects: IndexSet<&NamedNode> = self.triples.iter().map(|t| &t.subject).collect();
        subjects.into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.triples.clear();
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.merge(iter);
        graph
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    fn triple(subject: &str, value: &str) -> Triple {
        Triple::new(
            NamedNode::new(subject).unwrap(),
            NamedNode::new("http://ex/name").unwrap(),
            Literal::new_simple_literal(value).into(),
        )
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.add(triple("urn:a", "Foo")));
        assert!(!graph.add(triple("urn:a", "Foo")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_merge_counts_new() {
        let mut graph = Graph::new();
        graph.add(triple("urn:a", "Foo"));

        let added = graph.merge(vec![triple("urn:a", "Foo"), triple("urn:b", "Bar"), triple("urn:b", "Bar")]);
        assert_eq!(added, 1);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_insertion_order_and_subjects() {
        let graph: Graph = vec![triple("urn:b", "1"), triple("urn:a", "2"), triple("urn:b", "3")]
            .into_iter()
            .collect();

        let subjects: Vec<&str> = graph.subjects().into_iter().map(|s| s.as_str()).collect();
        assert_eq!(subjects, vec!["urn:b", "urn:a"]);
        assert_eq!(graph.iter().next(), Some(&triple("urn:b", "1")));
    }

    #[test]
    fn test_display_is_ntriples_line() {
        assert_eq!(
            triple("urn:a", "Foo").to_string(),
            "<urn:a> <http://ex/name> \"Foo\" ."
        );
    }

    #[test]
    fn test_clear_is_explicit() {
        let mut graph = Graph::new();
        graph.add(triple("urn:a", "Foo"));
        graph.clear();
        assert!(graph.is_empty());
    }
}
