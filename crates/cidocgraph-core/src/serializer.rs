//! Textual rendering of a graph
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML

use std::str::FromStr;

use oxrdf::vocab::xsd;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_turtle::{NTriplesFormatter, TurtleFormatter};
use rio_xml::RdfXmlFormatter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, Triple};
use crate::term::Term;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    /// Compact triple notation (.ttl)
    #[default]
    Turtle,
    /// One triple per line (.nt)
    NTriples,
    /// XML serialization (.rdf)
    RdfXml,
}

impl RdfFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Turtle => "turtle",
            Self::NTriples => "ntriples",
            Self::RdfXml => "rdfxml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Turtle => "ttl",
            Self::NTriples => "nt",
            Self::RdfXml => "rdf",
        }
    }

    /// Format whose usual file extension is `ext`
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Self::Turtle, Self::NTriples, Self::RdfXml]
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }
}

impl FromStr for RdfFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Self::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(Self::NTriples),
            "rdfxml" | "rdf/xml" | "xml" | "rdf" => Ok(Self::RdfXml),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Render every triple of the graph, in insertion order
pub fn render(graph: &Graph, format: RdfFormat) -> Result<String> {
    let output = match format {
        RdfFormat::Turtle => {
            let mut formatter = TurtleFormatter::new(Vec::new());
            format_all(&mut formatter, graph)?;
            formatter.finish().map_err(render_error)?
        }
        RdfFormat::NTriples => {
            let mut formatter = NTriplesFormatter::new(Vec::new());
            format_all(&mut formatter, graph)?;
            formatter.finish().map_err(render_error)?
        }
        RdfFormat::RdfXml => {
            let mut formatter = RdfXmlFormatter::with_indentation(Vec::new(), 2).map_err(render_error)?;
            format_all(&mut formatter, graph)?;
            formatter.finish().map_err(render_error)?
        }
    };
    tracing::debug!("Rendered {} triples as {}", graph.len(), format);
    String::from_utf8(output).map_err(|e| Error::Render(e.to_string()))
}

/// Render with a format given by name
pub fn render_named(graph: &Graph, format: &str) -> Result<String> {
    render(graph, format.parse()?)
}

fn format_all<F>(formatter: &mut F, graph: &Graph) -> Result<()>
where
    F: TriplesFormatter<Error = std::io::Error>,
{
    for triple in graph {
        formatter.format(&to_rio(triple)).map_err(render_error)?;
    }
    Ok(())
}

fn render_error(e: std::io::Error) -> Error {
    Error::Render(e.to_string())
}

fn to_rio(triple: &Triple) -> model::Triple<'_> {
    let object = match &triple.object {
        Term::Resource(node) => model::Term::NamedNode(model::NamedNode { iri: node.as_str() }),
        Term::Literal(literal) => {
            let value = literal.value();
            let literal = if let Some(language) = literal.language() {
                model::Literal::LanguageTaggedString { value, language }
            } else if literal.datatype() == xsd::STRING {
                model::Literal::Simple { value }
            } else {
                model::Literal::Typed {
                    value,
                    datatype: model::NamedNode {
                        iri: literal.datatype().as_str(),
                    },
                }
            };
            model::Term::Literal(literal)
        }
    };

    model::Triple {
        subject: model::Subject::NamedNode(model::NamedNode {
            iri: triple.subject.as_str(),
        }),
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::mapping::MappingTable;

    fn sample_graph() -> Graph {
        let mut table = MappingTable::new();
        table.register("Thing", "http://ex/Thing").unwrap();
        table.register("name", "http://ex/name").unwrap();
        table.register("count", "http://ex/count").unwrap();

        let entity = Entity::new("urn:a", "Thing")
            .unwrap()
            .with("name", "Foo \"quoted\"")
            .unwrap()
            .with("count", 3)
            .unwrap();

        let mut graph = Graph::new();
        graph.extend_from(&entity, &table).unwrap();
        graph
    }

    #[test]
    fn test_format_names() {
        assert_eq!("ttl".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("Turtle".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("n-triples".parse::<RdfFormat>().unwrap(), RdfFormat::NTriples);
        assert_eq!("RDF/XML".parse::<RdfFormat>().unwrap(), RdfFormat::RdfXml);
        assert!(matches!(
            "jsonld".parse::<RdfFormat>(),
            Err(Error::UnsupportedFormat(name)) if name == "jsonld"
        ));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(RdfFormat::from_extension("ttl"), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_extension("NT"), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_extension("rdf"), Some(RdfFormat::RdfXml));
        assert_eq!(RdfFormat::from_extension("json"), None);
    }

    #[test]
    fn test_rdfxml_describes_subject() {
        let graph = sample_graph();
        let xml = render(&graph, RdfFormat::RdfXml).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("rdf:about=\"urn:a\""));
        assert!(xml.contains("Foo &quot;quoted&quot;") || xml.contains("Foo \"quoted\""));
    }

    #[test]
    fn test_ntriples_lines() {
        let graph = sample_graph();
        let nt = render(&graph, RdfFormat::NTriples).unwrap();
        let lines: Vec<&str> = nt.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "<urn:a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Thing> ."
        );
        assert_eq!(lines[1], r#"<urn:a> <http://ex/name> "Foo \"quoted\"" ."#);
        assert_eq!(
            lines[2],
            "<urn:a> <http://ex/count> \"3\"^^<http://www.w3.org/2001/XMLSchema#integer> ."
        );
    }

    #[test]
    fn test_turtle_contains_all_terms() {
        let graph = sample_graph();
        let ttl = render(&graph, RdfFormat::Turtle).unwrap();

        assert!(ttl.contains("<urn:a>"));
        assert!(ttl.contains("<http://ex/Thing>"));
        assert!(ttl.contains("<http://ex/count>"));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let graph = sample_graph();
        let first = render(&graph, RdfFormat::NTriples).unwrap();
        let second = render(&graph, RdfFormat::NTriples).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_unknown_format_name() {
        let graph = sample_graph();
        assert!(matches!(
            render_named(&graph, "json-ld"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(render(&Graph::new(), RdfFormat::NTriples).unwrap(), "");
    }
}
