//! JSON entity documents
//!
//! An object carrying `"iri"` and `"class"` is an entity; every other key
//! is an attribute, kept in document order. Attribute values map as:
//!
//! - string, integer, other number, boolean: the matching scalar
//! - `null`: absent
//! - array: list
//! - `{"@id": "..."}`: resource reference
//! - `{"@value": "...", "@type": "date" | "dateTime"}`: typed scalar
//! - object with `"iri"` and `"class"`: nested entity
//!
//! A document holds a single entity or an array of entities.

use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value as Json};

use crate::entity::{Entity, Scalar, Value, IDENTITY_KEY};
use crate::error::{Error, Result};

/// Key holding the class name in an entity object
pub const CLASS_KEY: &str = "class";

/// Parse a document from a string
pub fn parse_str(source: &str) -> Result<Vec<Entity>> {
    let json: Json = serde_json::from_str(source)?;
    from_json(&json)
}

/// Read and parse a document file
pub fn load(path: &Path) -> Result<Vec<Entity>> {
    let source = std::fs::read_to_string(path)?;
    let entities = parse_str(&source)?;
    tracing::debug!("Loaded {} entities from {:?}", entities.len(), path);
    Ok(entities)
}

/// Convert a parsed document
pub fn from_json(json: &Json) -> Result<Vec<Entity>> {
    match json {
        Json::Array(items) => items.iter().map(entity_from_json).collect(),
        other => Ok(vec![entity_from_json(other)?]),
    }
}

fn entity_from_json(json: &Json) -> Result<Entity> {
    let Json::Object(object) = json else {
        return Err(Error::InvalidDocument(format!(
            "expected an entity object, found {}",
            kind(json)
        )));
    };
    entity_from_object(object)
}

fn entity_from_object(object: &Map<String, Json>) -> Result<Entity> {
    let iri = required_str(object, IDENTITY_KEY)?;
    let class = required_str(object, CLASS_KEY)?;
    let mut entity = Entity::new(iri, class)?;

    for (name, value) in object {
        if name == IDENTITY_KEY || name == CLASS_KEY {
            continue;
        }
        let value = value_from_json(value)
            .map_err(|e| Error::InvalidDocument(format!("{iri}: attribute '{name}': {e}")))?;
        entity.set(name.as_str(), value)?;
    }
    Ok(entity)
}

fn required_str<'a>(object: &'a Map<String, Json>, key: &str) -> Result<&'a str> {
    object
        .get(key)
        .and_then(Json::as_str)
        .ok_or_else(|| Error::InvalidDocument(format!("entity object needs a string '{key}'")))
}

fn value_from_json(json: &Json) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::Absent,
        Json::Bool(b) => Value::from(*b),
        Json::String(s) => Value::from(s.as_str()),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .map(Value::from)
                    .ok_or_else(|| Error::InvalidDocument(format!("number {n} out of range")))?
            }
        }
        Json::Array(items) => Value::List(items.iter().map(value_from_json).collect::<Result<_>>()?),
        Json::Object(object) => object_value(object)?,
    })
}

fn object_value(object: &Map<String, Json>) -> Result<Value> {
    if let Some(id) = object.get("@id") {
        let id = id
            .as_str()
            .ok_or_else(|| Error::InvalidDocument("'@id' must be a string".to_string()))?;
        return Ok(Value::Scalar(Scalar::resource(id)?));
    }
    if let Some(raw) = object.get("@value") {
        return typed_value(raw, object.get("@type").and_then(Json::as_str));
    }
    if object.contains_key(IDENTITY_KEY) && object.contains_key(CLASS_KEY) {
        return Ok(Value::from(entity_from_object(object)?));
    }
    Err(Error::InvalidDocument(
        "object is neither an entity, a reference nor a typed value".to_string(),
    ))
}

fn typed_value(raw: &Json, datatype: Option<&str>) -> Result<Value> {
    let Some(lexical) = raw.as_str() else {
        // untyped @value behaves like the plain JSON value
        return match datatype {
            None => value_from_json(raw),
            Some(t) => Err(Error::InvalidDocument(format!("'@value' for {t} must be a string"))),
        };
    };
    match datatype {
        None | Some("string") => Ok(Value::from(lexical)),
        Some("date") => NaiveDate::parse_from_str(lexical, "%Y-%m-%d")
            .map(Value::from)
            .map_err(|e| Error::InvalidDocument(format!("bad date '{lexical}': {e}"))),
        Some("dateTime") => DateTime::parse_from_rfc3339(lexical)
            .map(Value::from)
            .map_err(|e| Error::InvalidDocument(format!("bad dateTime '{lexical}': {e}"))),
        Some(other) => Err(Error::InvalidDocument(format!("unknown '@type' {other}"))),
    }
}

fn kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
