//! Projection of entities into triples
//!
//! Generation is a pre-order, depth-first walk. For every entity the type
//! triple comes first, then one triple per attribute item in declaration
//! order. A nested entity is projected completely before the triple that
//! links its parent to it.
//!
//! The walk is lazy: [`Triples`] yields one triple per `next()` call and
//! keeps an explicit frame per entity on the current path. A failed lookup
//! or conversion is yielded once as an error, after which the iterator is
//! exhausted. Triples yielded before the failure are not taken back, so a
//! caller accumulating them keeps a partial projection.

use oxrdf::vocab::rdf;
use oxrdf::NamedNode;

use crate::entity::{Entity, Value};
use crate::error::Result;
use crate::graph::{Graph, Triple};
use crate::mapping::MappingTable;
use crate::term::{to_term, Term};

/// Lazily project an entity and everything it references
pub fn generate<'a>(entity: &'a Entity, mapping: &'a MappingTable) -> Triples<'a> {
    Triples {
        mapping,
        stack: vec![Frame::new(entity, None)],
    }
}

/// Project an entity eagerly, failing on the first error
pub fn collect_triples(entity: &Entity, mapping: &MappingTable) -> Result<Vec<Triple>> {
    generate(entity, mapping).collect()
}

/// Project an entity into a graph.
///
/// Returns the number of triples that were new to the graph. On error the
/// triples added so far stay in the graph.
pub fn generate_into(entity: &Entity, mapping: &MappingTable, graph: &mut Graph) -> Result<usize> {
    let mut added = 0;
    for triple in generate(entity, mapping) {
        if graph.add(triple?) {
            added += 1;
        }
    }
    tracing::debug!(
        "Projected {} into graph: {} new triples, {} total",
        entity.iri().as_str(),
        added,
        graph.len()
    );
    Ok(added)
}

/// Iterator over the triples of one entity tree
pub struct Triples<'a> {
    mapping: &'a MappingTable,
    stack: Vec<Frame<'a>>,
}

struct Frame<'a> {
    entity: &'a Entity,
    typed: bool,
    attributes: Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>,
    /// Predicate and remaining items of the attribute being emitted
    current: Option<(&'a NamedNode, std::slice::Iter<'a, Value>)>,
    /// Parent edge, emitted once this entity is exhausted
    link: Option<Triple>,
}

impl<'a> Frame<'a> {
    fn new(entity: &'a Entity, link: Option<Triple>) -> Self {
        tracing::debug!("Projecting {} ({})", entity.iri().as_str(), entity.class_name());
        Self {
            entity,
            typed: false,
            attributes: Box::new(entity.attributes()),
            current: None,
            link,
        }
    }
}

impl<'a> Triples<'a> {
    fn advance(&mut self) -> Result<Option<Triple>> {
        let mapping = self.mapping;
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Ok(None);
            };
            let entity = frame.entity;
            let subject = entity.iri();

            if !frame.typed {
                frame.typed = true;
                let class = mapping.lookup(entity.class_name())?;
                return Ok(Some(Triple::new(
                    subject.clone(),
                    rdf::TYPE.into_owned(),
                    Term::Resource(class.clone()),
                )));
            }

            if frame.current.is_none() {
                match frame.attributes.next() {
                    Some((name, value)) => {
                        let predicate = mapping.lookup(name)?;
                        frame.current = Some((predicate, value.items().iter()));
                    }
                    None => {
                        let done = self.stack.pop();
                        if let Some(link) = done.and_then(|f| f.link) {
                            return Ok(Some(link));
                        }
                        continue;
                    }
                }
            }

            let Some((predicate, items)) = frame.current.as_mut() else {
                continue;
            };
            let predicate: &'a NamedNode = *predicate;
            match items.next() {
                Some(Value::Entity(child)) => {
                    let link = Triple::new(
                        subject.clone(),
                        predicate.clone(),
                        Term::Resource(child.iri().clone()),
                    );
                    self.stack.push(Frame::new(child, Some(link)));
                }
                Some(leaf) => {
                    return Ok(Some(Triple::new(
                        subject.clone(),
                        predicate.clone(),
                        to_term(leaf)?,
                    )));
                }
                None => frame.current = None,
            }
        }
    }
}

impl Iterator for Triples<'_> {
    type Item = Result<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(triple)) => {
                tracing::trace!("{}", triple);
                Some(Ok(triple))
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Generation aborted: {}", e);
                self.stack.clear();
                Some(Err(e))
            }
        }
    }
}
