//! Conversion of scalar leaf values into RDF terms

use chrono::SecondsFormat;
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};

use crate::entity::{Scalar, Value};
use crate::error::{Error, Result};

/// Object position of a triple: a resource or a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Resource(NamedNode),
    Literal(Literal),
}

impl Term {
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Resource(node) => write!(f, "{}", node),
            Term::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::Resource(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

/// Convert a leaf value to a term.
///
/// Resource references pass through, other scalars become literals typed
/// after their kind. Entities, lists and absent values are not leaves.
pub fn to_term(value: &Value) -> Result<Term> {
    match value {
        Value::Scalar(scalar) => Ok(scalar_to_term(scalar)),
        other => Err(Error::InvalidType(other.describe())),
    }
}

pub fn scalar_to_term(scalar: &Scalar) -> Term {
    match scalar {
        Scalar::Resource(node) => Term::Resource(node.clone()),
        Scalar::Text(s) => Term::Literal(Literal::new_simple_literal(s.as_str())),
        Scalar::Integer(n) => Term::Literal(Literal::new_typed_literal(n.to_string(), xsd::INTEGER)),
        Scalar::Float(x) => Term::Literal(Literal::new_typed_literal(double_lexical(*x), xsd::DOUBLE)),
        Scalar::Boolean(b) => Term::Literal(Literal::new_typed_literal(b.to_string(), xsd::BOOLEAN)),
        Scalar::Date(d) => {
            Term::Literal(Literal::new_typed_literal(d.format("%Y-%m-%d").to_string(), xsd::DATE))
        }
        Scalar::DateTime(dt) => Term::Literal(Literal::new_typed_literal(
            dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            xsd::DATE_TIME,
        )),
    }
}

/// xsd:double lexical form; non-finite values use the XSD spellings
fn double_lexical(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        x.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn literal(value: impl Into<Value>) -> Literal {
        match to_term(&value.into()).unwrap() {
            Term::Literal(l) => l,
            Term::Resource(r) => panic!("expected literal, got {}", r),
        }
    }

    #[test]
    fn test_resource_passes_through() {
        let node = NamedNode::new("https://types.clscor.io/entity/id").unwrap();
        let term = to_term(&Value::from(node.clone())).unwrap();
        assert_eq!(term, Term::Resource(node));
    }

    #[test]
    fn test_text_is_plain_literal() {
        let lit = literal("English ELTeC Corpus");
        assert_eq!(lit.value(), "English ELTeC Corpus");
        assert_eq!(lit.datatype(), xsd::STRING);
    }

    #[test]
    fn test_datatype_inference() {
        assert_eq!(literal(42).datatype(), xsd::INTEGER);
        assert_eq!(literal(true).value(), "true");
        assert_eq!(literal(true).datatype(), xsd::BOOLEAN);
        assert_eq!(literal(1.5).value(), "1.5");
        assert_eq!(literal(1.5).datatype(), xsd::DOUBLE);

        let date = NaiveDate::from_ymd_opt(1847, 10, 16).unwrap();
        assert_eq!(literal(date).value(), "1847-10-16");
        assert_eq!(literal(date).datatype(), xsd::DATE);

        let dt = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(literal(dt).value(), "2023-05-01T12:00:00Z");
        assert_eq!(literal(dt).datatype(), xsd::DATE_TIME);
    }

    #[test]
    fn test_non_finite_doubles() {
        assert_eq!(literal(f64::NAN).value(), "NaN");
        assert_eq!(literal(f64::INFINITY).value(), "INF");
        assert_eq!(literal(f64::NEG_INFINITY).value(), "-INF");
    }

    #[test]
    fn test_non_leaf_values_are_rejected() {
        let nested = Value::List(vec![Value::from("a")]);
        assert!(matches!(to_term(&nested), Err(Error::InvalidType(_))));
        assert!(matches!(to_term(&Value::Absent), Err(Error::InvalidType(_))));

        let entity = Entity::new("urn:a", "Thing").unwrap();
        assert!(matches!(to_term(&Value::from(entity)), Err(Error::InvalidType(_))));
    }
}
