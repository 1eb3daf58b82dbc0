//! cidocgraph Core - projection of ontology entities into RDF
//!
//! This crate turns typed, nested entities (instances of CIDOC CRM classes
//! and extensions) into subject-predicate-object triples, accumulates them
//! in a de-duplicating graph and renders that graph as Turtle or N-Triples.
//!
//! ```
//! use cidocgraph_core::{render, Entity, Graph, MappingTable, RdfFormat};
//!
//! let mapping = MappingTable::cidoc_crm()?;
//! let name_type = Entity::new("https://types.clscor.io/entity/corpus_name", "E55Type")?;
//! let name = Entity::new("https://eltec.clscor.io/entity/corpus/corpus_name", "E41Appellation")?
//!     .with("p190_has_symbolic_content", "English ELTeC Corpus")?
//!     .with("p2_has_type", name_type)?;
//!
//! let mut graph = Graph::new();
//! graph.extend_from(&name, &mapping)?;
//! assert_eq!(graph.len(), 4);
//!
//! let turtle = render(&graph, RdfFormat::Turtle)?;
//! assert!(turtle.contains("English ELTeC Corpus"));
//! # Ok::<(), cidocgraph_core::Error>(())
//! ```

pub mod document;
pub mod entity;
pub mod error;
pub mod generator;
pub mod graph;
pub mod mapping;
pub mod profile;
pub mod serializer;
pub mod term;

pub use entity::{ClassName, Entity, Scalar, Value};
pub use error::{Error, Result};
pub use generator::{collect_triples, generate, generate_into, Triples};
pub use graph::{Graph, Triple};
pub use mapping::MappingTable;
pub use profile::ClassProfile;
pub use serializer::{render, render_named, RdfFormat};
pub use term::{to_term, Term};
