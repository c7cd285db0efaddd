//! Final document assembly.
//!
//! Shape definitions land under `$defs`; one shape is promoted by
//! copying its structural members onto the document root. Member order
//! is fixed so identical inputs serialize byte for byte.

use serde_json::{json, Map, Value};

pub const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";

const DOCUMENT_TITLE: &str = "Generated JSON Schema from SHACL";
const DOCUMENT_DESCRIPTION: &str =
    "Structural JSON Schema derived from SHACL shape definitions. \
     Validates shape, not full SHACL semantics.";
const GENERATED_MARKER: &str = "Auto-generated by shapegen - DO NOT EDIT MANUALLY";

/// Placeholder document for an input with no NodeShapes.
pub fn empty_schema() -> Value {
    json!({
        "$schema": SCHEMA_DIALECT,
        "title": "Empty Schema",
        "description": "No SHACL shapes found for conversion",
        "type": "object"
    })
}

/// Assembles the final document from translated definitions.
///
/// The root shape's structural members are copied onto the document
/// root; its definition stays in `$defs` untouched so `$ref`s keep
/// resolving.
pub fn build_document(definitions: Map<String, Value>, root: Option<&str>) -> Value {
    let root_fragment = root
        .and_then(|name| definitions.get(name))
        .and_then(Value::as_object)
        .cloned();

    let mut document = Map::new();
    document.insert("$schema".into(), Value::String(SCHEMA_DIALECT.into()));
    document.insert("title".into(), Value::String(DOCUMENT_TITLE.into()));
    document.insert(
        "description".into(),
        Value::String(DOCUMENT_DESCRIPTION.into()),
    );
    document.insert("$comment".into(), Value::String(GENERATED_MARKER.into()));
    document.insert("$defs".into(), Value::Object(definitions));

    let fragment = root_fragment.unwrap_or_default();
    document.insert(
        "type".into(),
        fragment
            .get("type")
            .cloned()
            .unwrap_or_else(|| Value::String("object".into())),
    );
    document.insert(
        "properties".into(),
        fragment
            .get("properties")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
    );
    document.insert(
        "required".into(),
        fragment
            .get("required")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    );
    if let Some(additional) = fragment.get("additionalProperties") {
        document.insert("additionalProperties".into(), additional.clone());
    }
    for key in ["allOf", "anyOf", "oneOf", "not"] {
        if let Some(value) = fragment.get(key) {
            document.insert(key.into(), value.clone());
        }
    }
    // Root shape titles override the document boilerplate in place.
    if let Some(title) = fragment.get("title") {
        document.insert("title".into(), title.clone());
    }
    if let Some(description) = fragment.get("description") {
        document.insert("description".into(), description.clone());
    }

    Value::Object(document)
}
