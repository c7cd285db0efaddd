//! Constraint translation: NodeShapes and PropertyShapes to JSON Schema
//! fragments.
//!
//! Translation is best-effort by design. Constructs with no structural
//! JSON Schema equivalent (`sh:sparql`, `sh:xone`, property-level
//! `sh:and`, unresolved `sh:class`) produce a diagnostic and a
//! placeholder fragment; the run always completes once the input graph
//! parsed.

use oxrdf::vocab::xsd;
use oxrdf::{NamedNodeRef, SubjectRef, TermRef};
use serde_json::{json, Map, Value};
use shapegen_core::{literal_to_json, local_name, subject_key, term_to_subject, vocab, ShapesGraph};
use tracing::warn;

use crate::assemble;
use crate::classify::ClassShapeIndex;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::naming::{strategy_term, ContextIndex, NamingStrategy, TermTable};
use crate::{ConvertOptions, SchemaError};

/// Recursion limit for nested composition nodes (`sh:not` chains).
const MAX_COMPOSITION_DEPTH: usize = 32;

const INFORMATIVE_KEYS: [&str; 14] = [
    "type",
    "$ref",
    "anyOf",
    "oneOf",
    "allOf",
    "enum",
    "format",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "pattern",
    "minLength",
    "maxLength",
];

/// Runs a full conversion over an already loaded shapes graph.
pub fn convert(
    graph: &ShapesGraph,
    options: &ConvertOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Value, SchemaError> {
    let context = match options.naming {
        NamingStrategy::Context => {
            let path = options.context.as_ref().ok_or_else(|| {
                SchemaError::InvalidContext(
                    "naming=context requires a JSON-LD context file".to_string(),
                )
            })?;
            Some(ContextIndex::load(path)?)
        }
        _ => None,
    };

    if graph.node_shapes().is_empty() {
        warn!("no NodeShapes found, emitting placeholder schema");
        return Ok(assemble::empty_schema());
    }

    let shape_keys: Vec<String> = graph
        .node_shapes()
        .iter()
        .map(|shape| subject_key(shape.as_ref()))
        .collect();
    // Definition names always use local names; the chosen strategy only
    // affects property members.
    let shape_names = TermTable::build(
        shape_keys.iter(),
        NamingStrategy::Local,
        graph.prefixes(),
        None,
        diagnostics,
    );
    let property_terms = TermTable::build(
        collect_property_paths(graph),
        options.naming,
        graph.prefixes(),
        context.as_ref(),
        diagnostics,
    );
    let class_index = ClassShapeIndex::build(graph, &shape_names);

    let translator = Translator {
        graph,
        strategy: options.naming,
        context: context.as_ref(),
        shape_names: &shape_names,
        property_terms: &property_terms,
        class_index: &class_index,
    };

    let mut definitions = Map::new();
    for shape in graph.node_shapes() {
        let key = subject_key(shape.as_ref());
        let name = translator.shape_name(&key);
        let definition = translator.node_shape_definition(shape.as_ref(), diagnostics);
        definitions.insert(name, definition);
    }

    let root = match &options.root_shape {
        Some(name) => {
            if !definitions.contains_key(name) {
                return Err(SchemaError::UnknownRootShape(name.clone()));
            }
            Some(name.clone())
        }
        None => definitions.keys().next().cloned(),
    };

    Ok(assemble::build_document(definitions, root.as_deref()))
}

/// Gathers every property path IRI reachable from the NodeShapes so the
/// term table can detect collisions up front.
fn collect_property_paths(graph: &ShapesGraph) -> Vec<String> {
    let mut paths = Vec::new();
    for shape in graph.node_shapes() {
        collect_node_paths(graph, shape.as_ref(), &mut paths, MAX_COMPOSITION_DEPTH);
        if let Some(head) = graph.value(shape.as_ref(), vocab::OR) {
            for member in graph.list_terms(head) {
                if let Some(node) = term_to_subject(member.as_ref()) {
                    collect_node_paths(graph, node, &mut paths, MAX_COMPOSITION_DEPTH);
                }
            }
        }
        if let Some(head) = graph.value(shape.as_ref(), vocab::AND) {
            for member in graph.list_terms(head) {
                // Named members become $refs; only inline ones add paths.
                if let Some(node @ SubjectRef::BlankNode(_)) = term_to_subject(member.as_ref()) {
                    collect_node_paths(graph, node, &mut paths, MAX_COMPOSITION_DEPTH);
                }
            }
        }
    }
    paths
}

fn collect_node_paths(
    graph: &ShapesGraph,
    node: SubjectRef<'_>,
    paths: &mut Vec<String>,
    depth: usize,
) {
    if depth == 0 {
        return;
    }
    for prop in graph.property_shapes(node) {
        let Some(prop) = term_to_subject(prop.as_ref()) else {
            continue;
        };
        if let Some(TermRef::NamedNode(path)) = graph.value(prop, vocab::PATH) {
            paths.push(path.as_str().to_string());
        }
    }
    if let Some(negated) = graph.value(node, vocab::NOT) {
        if let Some(negated) = term_to_subject(negated) {
            collect_node_paths(graph, negated, paths, depth - 1);
        }
    }
}

struct Translator<'a> {
    graph: &'a ShapesGraph,
    strategy: NamingStrategy,
    context: Option<&'a ContextIndex>,
    shape_names: &'a TermTable,
    property_terms: &'a TermTable,
    class_index: &'a ClassShapeIndex,
}

impl Translator<'_> {
    /// Builds the `$defs` fragment for one NodeShape.
    fn node_shape_definition(&self, shape: SubjectRef<'_>, diagnostics: &mut Diagnostics) -> Value {
        let key = subject_key(shape);
        let name = self.shape_name(&key);

        let mut definition = Map::new();
        definition.insert("type".into(), Value::String("object".into()));
        definition.insert(
            "$comment".into(),
            Value::String(format!("Generated from SHACL shape {key}")),
        );
        definition.insert("title".into(), Value::String(name.clone()));
        if let Some(description) = self
            .graph
            .literal_string(shape, vocab::DESCRIPTION)
            .or_else(|| self.graph.literal_string(shape, vocab::NAME))
        {
            definition.insert("description".into(), Value::String(description));
        }

        let mut properties = Map::new();
        let mut required: Vec<Value> = Vec::new();

        if let Some(TermRef::NamedNode(class)) = self.graph.value(shape, vocab::TARGET_CLASS) {
            let class_local = local_name(class.as_str()).to_string();
            let mut type_property = Map::new();
            type_property.insert("type".into(), Value::String("string".into()));
            type_property.insert("const".into(), Value::String(class_local.clone()));
            type_property.insert(
                "description".into(),
                Value::String(format!("Type identifier for {class_local}")),
            );
            properties.insert("@type".into(), Value::Object(type_property));
            required.push(Value::String("@type".into()));
        }

        for prop in self.graph.property_shapes(shape) {
            if let Some((prop_name, schema, is_required)) =
                self.property_definition(prop.as_ref(), diagnostics)
            {
                if is_required && !required.iter().any(|r| r.as_str() == Some(prop_name.as_str())) {
                    required.push(Value::String(prop_name.clone()));
                }
                properties.insert(prop_name, schema);
            }
        }

        let mut any_of: Vec<Value> = Vec::new();
        if let Some(head) = self.graph.value(shape, vocab::OR) {
            for member in self.graph.list_terms(head) {
                let Some(node) = term_to_subject(member.as_ref()) else {
                    continue;
                };
                let (schema, discovered) =
                    self.constraint_node_schema(node, diagnostics, MAX_COMPOSITION_DEPTH);
                if let Some(schema) = schema {
                    any_of.push(schema);
                }
                // Alternatives contribute optional outer properties.
                for (prop_name, prop_schema) in discovered {
                    merge_informative(&mut properties, prop_name, prop_schema);
                }
            }
            if any_of.is_empty() {
                diagnostics.push(
                    DiagnosticKind::Unconvertible,
                    format!("sh:or on {key} has no convertible alternatives"),
                );
            }
        }

        let mut all_of: Vec<Value> = Vec::new();
        if let Some(head) = self.graph.value(shape, vocab::AND) {
            for member in self.graph.list_terms(head) {
                match member.as_ref() {
                    TermRef::NamedNode(target) => {
                        let target_name = self.shape_name(target.as_str());
                        if target_name == name {
                            continue;
                        }
                        all_of.push(json!({"$ref": format!("#/$defs/{target_name}")}));
                    }
                    other => {
                        let Some(node) = term_to_subject(other) else {
                            continue;
                        };
                        let (schema, discovered) =
                            self.constraint_node_schema(node, diagnostics, MAX_COMPOSITION_DEPTH);
                        if let Some(schema) = schema {
                            all_of.push(schema);
                        }
                        for (prop_name, prop_schema) in discovered {
                            merge_informative(&mut properties, prop_name, prop_schema);
                        }
                    }
                }
            }
            if all_of.is_empty() {
                diagnostics.push(
                    DiagnosticKind::Unconvertible,
                    format!("sh:and on {key} has no convertible members"),
                );
            }
        }

        if self.graph.value(shape, vocab::SPARQL).is_some() {
            diagnostics.push(
                DiagnosticKind::Unconvertible,
                format!("sh:sparql on {key} has no JSON Schema equivalent"),
            );
            if let Some(Value::String(comment)) = definition.get_mut("$comment") {
                comment.push_str("; contains unconvertible SPARQL constraint");
            }
        }

        if !any_of.is_empty() {
            definition.insert("anyOf".into(), Value::Array(any_of));
        }
        if !properties.is_empty() {
            definition.insert("properties".into(), Value::Object(properties));
        }
        if !required.is_empty() {
            definition.insert("required".into(), Value::Array(required));
        }
        if !all_of.is_empty() {
            definition.insert("allOf".into(), Value::Array(all_of));
        }
        if matches!(
            self.graph.value(shape, vocab::CLOSED),
            Some(TermRef::Literal(flag)) if flag.value().eq_ignore_ascii_case("true")
        ) {
            definition.insert("additionalProperties".into(), Value::Bool(false));
        }

        Value::Object(definition)
    }

    /// Translates an inline composition node (`sh:or`/`sh:and`/`sh:not`
    /// member). Returns the node's own schema plus the property schemas
    /// discovered inside it, for hoisting into the enclosing shape.
    fn constraint_node_schema(
        &self,
        node: SubjectRef<'_>,
        diagnostics: &mut Diagnostics,
        depth: usize,
    ) -> (Option<Value>, Map<String, Value>) {
        if depth == 0 {
            diagnostics.push(
                DiagnosticKind::Unconvertible,
                format!(
                    "constraint nesting at {} exceeds supported depth",
                    subject_key(node)
                ),
            );
            return (None, Map::new());
        }

        let mut pieces: Vec<Value> = Vec::new();
        let mut discovered = Map::new();

        if let Some(inline) = self.inline_constraint_schema(node, diagnostics) {
            pieces.push(inline);
        }

        let mut properties = Map::new();
        let mut required: Vec<Value> = Vec::new();
        for prop in self.graph.property_shapes(node) {
            if let Some((prop_name, schema, is_required)) =
                self.property_definition(prop.as_ref(), diagnostics)
            {
                if is_required {
                    required.push(Value::String(prop_name.clone()));
                }
                discovered.insert(prop_name.clone(), schema.clone());
                properties.insert(prop_name, schema);
            }
        }
        if !properties.is_empty() {
            let mut piece = Map::new();
            piece.insert("type".into(), Value::String("object".into()));
            piece.insert("properties".into(), Value::Object(properties));
            if !required.is_empty() {
                piece.insert("required".into(), Value::Array(required));
            }
            pieces.push(Value::Object(piece));
        }

        if let Some(negated) = self.graph.value(node, vocab::NOT) {
            if let Some(negated) = term_to_subject(negated) {
                // Properties inside a negation are prohibitions, not
                // members; they are not hoisted.
                let (schema, _) = self.constraint_node_schema(negated, diagnostics, depth - 1);
                if let Some(schema) = schema {
                    pieces.push(json!({"not": schema}));
                }
            }
        }

        let schema = match pieces.len() {
            0 => None,
            1 => pieces.pop(),
            _ => Some(json!({"allOf": pieces})),
        };
        (schema, discovered)
    }

    /// Value constraints carried directly on a composition node.
    fn inline_constraint_schema(
        &self,
        node: SubjectRef<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<Value> {
        if let Some(TermRef::NamedNode(datatype)) = self.graph.value(node, vocab::DATATYPE) {
            return Some(datatype_schema(datatype.as_str()));
        }
        if let Some(TermRef::NamedNode(kind)) = self.graph.value(node, vocab::NODE_KIND) {
            return Some(node_kind_schema(kind.as_str()));
        }
        if let Some(TermRef::NamedNode(class)) = self.graph.value(node, vocab::CLASS) {
            return Some(self.class_ref_schema(class.as_str(), diagnostics));
        }
        if let Some(TermRef::NamedNode(target)) = self.graph.value(node, vocab::NODE) {
            let target_name = self.shape_name(target.as_str());
            return Some(json!({"$ref": format!("#/$defs/{target_name}")}));
        }
        None
    }

    /// Translates one `sh:property` object into `(term, schema, required)`.
    fn property_definition(
        &self,
        prop: TermRef<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<(String, Value, bool)> {
        let prop = term_to_subject(prop)?;
        let path = match self.graph.value(prop, vocab::PATH) {
            Some(TermRef::NamedNode(path)) => path.as_str().to_string(),
            _ => {
                diagnostics.push(
                    DiagnosticKind::MissingPath,
                    format!("property shape {} has no usable sh:path", subject_key(prop)),
                );
                return None;
            }
        };
        let name = self.property_term(&path);

        let mut schema = self.property_core_schema(prop, diagnostics, &path);

        if let Some(description) = self
            .graph
            .literal_string(prop, vocab::DESCRIPTION)
            .or_else(|| self.graph.literal_string(prop, vocab::MESSAGE))
        {
            schema.insert("description".into(), Value::String(description));
        }

        // A $ref never carries sibling keywords; downstream generators
        // turn such siblings into spurious helper types.
        if schema.len() == 2 && schema.contains_key("$ref") && schema.contains_key("description") {
            let reference = schema.remove("$ref");
            let description = schema.remove("description");
            let mut rewritten = Map::new();
            if let Some(description) = description {
                rewritten.insert("description".into(), description);
            }
            if let Some(reference) = reference {
                rewritten.insert("allOf".into(), json!([{"$ref": reference}]));
            }
            schema = rewritten;
        }

        let min_count = self.count_literal(prop, vocab::MIN_COUNT, diagnostics);
        let max_count = self.count_literal(prop, vocab::MAX_COUNT, diagnostics);
        let is_required = min_count.is_some_and(|n| n >= 1);

        let multi_valued = max_count.is_some_and(|n| n > 1)
            || (max_count.is_none() && min_count.is_some_and(|n| n > 1));
        if multi_valued {
            let description = schema.remove("description");
            let mut wrapped = Map::new();
            wrapped.insert("type".into(), Value::String("array".into()));
            // Only a schema with a concrete value type becomes the item
            // schema; anything else leaves the array untyped.
            if schema.contains_key("type") || schema.contains_key("$ref") {
                wrapped.insert("items".into(), Value::Object(schema));
            }
            if let Some(description) = description {
                wrapped.insert("description".into(), description);
            }
            if let Some(min) = min_count.filter(|n| *n >= 1) {
                wrapped.insert("minItems".into(), Value::from(min));
            }
            if let Some(max) = max_count {
                wrapped.insert("maxItems".into(), Value::from(max));
            }
            schema = wrapped;
        }

        if let Some(head) = self.graph.value(prop, vocab::IN) {
            let values = self.list_values(head);
            if !values.is_empty() && !is_redundant_boolean_enum(&schema, &values) {
                with_value_target(&mut schema, |target| {
                    target.insert("enum".into(), Value::Array(values));
                });
            }
        }

        self.apply_bounds(prop, &mut schema, diagnostics);

        if self.graph.value(prop, vocab::XONE).is_some() {
            diagnostics.push(
                DiagnosticKind::Unconvertible,
                format!("sh:xone on property {name} has no JSON Schema equivalent"),
            );
        }
        if self.graph.value(prop, vocab::AND).is_some() {
            diagnostics.push(
                DiagnosticKind::Unconvertible,
                format!("sh:and on property {name} has no JSON Schema equivalent"),
            );
        }
        if self.graph.value(prop, vocab::SPARQL).is_some() {
            diagnostics.push(
                DiagnosticKind::Unconvertible,
                format!("sh:sparql on property {name} has no JSON Schema equivalent"),
            );
            schema.insert(
                "$comment".into(),
                Value::String("Unconvertible SPARQL constraint".into()),
            );
        }

        Some((name, Value::Object(schema), is_required))
    }

    /// Type/shape constraint precedence: hasValue, or, datatype,
    /// nodeKind, node, class; first match wins.
    fn property_core_schema(
        &self,
        prop: SubjectRef<'_>,
        diagnostics: &mut Diagnostics,
        path: &str,
    ) -> Map<String, Value> {
        let mut schema = Map::new();

        match self.graph.value(prop, vocab::HAS_VALUE) {
            Some(TermRef::NamedNode(iri)) => {
                schema.insert(
                    "const".into(),
                    Value::String(strategy_term(
                        iri.as_str(),
                        self.strategy,
                        self.graph.prefixes(),
                        self.context,
                    )),
                );
                schema.insert("type".into(), Value::String("string".into()));
                return schema;
            }
            Some(TermRef::Literal(literal)) => {
                let constant = literal_to_json(literal);
                let json_type = match &constant {
                    Value::Bool(_) => "boolean",
                    Value::Number(_) => "number",
                    _ => "string",
                };
                schema.insert("const".into(), constant);
                schema.insert("type".into(), Value::String(json_type.into()));
                return schema;
            }
            _ => {}
        }

        if let Some(head) = self.graph.value(prop, vocab::OR) {
            let mut any_of: Vec<Value> = Vec::new();
            for member in self.graph.list_terms(head) {
                let Some(node) = term_to_subject(member.as_ref()) else {
                    continue;
                };
                let member_schema = match node {
                    SubjectRef::NamedNode(target) => {
                        let target_name = self.shape_name(target.as_str());
                        json!({"$ref": format!("#/$defs/{target_name}")})
                    }
                    SubjectRef::BlankNode(_) => {
                        match self.inline_constraint_schema(node, diagnostics) {
                            Some(inline) => inline,
                            None => {
                                let (nested, _) = self.constraint_node_schema(
                                    node,
                                    diagnostics,
                                    MAX_COMPOSITION_DEPTH,
                                );
                                match nested {
                                    Some(nested) => nested,
                                    None => continue,
                                }
                            }
                        }
                    }
                };
                // Flatten nested anyOf (nodeKind alternatives produce them).
                match member_schema {
                    Value::Object(mut map) if map.len() == 1 && map.contains_key("anyOf") => {
                        if let Some(Value::Array(inner)) = map.remove("anyOf") {
                            any_of.extend(inner);
                        }
                    }
                    other => any_of.push(other),
                }
            }
            if !any_of.is_empty() {
                schema.insert("anyOf".into(), Value::Array(any_of));
                return schema;
            }
        }

        if let Some(TermRef::NamedNode(datatype)) = self.graph.value(prop, vocab::DATATYPE) {
            return into_map(datatype_schema(datatype.as_str()));
        }
        if let Some(TermRef::NamedNode(kind)) = self.graph.value(prop, vocab::NODE_KIND) {
            return into_map(node_kind_schema(kind.as_str()));
        }
        if let Some(TermRef::NamedNode(target)) = self.graph.value(prop, vocab::NODE) {
            let target_name = self.shape_name(target.as_str());
            schema.insert(
                "$ref".into(),
                Value::String(format!("#/$defs/{target_name}")),
            );
            return schema;
        }
        if let Some(TermRef::NamedNode(class)) = self.graph.value(prop, vocab::CLASS) {
            return into_map(self.class_ref_schema(class.as_str(), diagnostics));
        }

        schema.insert(
            "$comment".into(),
            Value::String(format!("No convertible constraint for {path}")),
        );
        schema
    }

    fn class_ref_schema(&self, class_iri: &str, diagnostics: &mut Diagnostics) -> Value {
        match self.class_index.shape_for(class_iri) {
            Some(target_name) => json!({"$ref": format!("#/$defs/{target_name}")}),
            None => {
                diagnostics.push(
                    DiagnosticKind::UnresolvedClass,
                    format!("no NodeShape targets class <{class_iri}>"),
                );
                json!({"$comment": format!("No shape found for class {class_iri}")})
            }
        }
    }

    fn apply_bounds(
        &self,
        prop: SubjectRef<'_>,
        schema: &mut Map<String, Value>,
        diagnostics: &mut Diagnostics,
    ) {
        let numeric = [
            (vocab::MIN_INCLUSIVE, "minimum"),
            (vocab::MAX_INCLUSIVE, "maximum"),
            (vocab::MIN_EXCLUSIVE, "exclusiveMinimum"),
            (vocab::MAX_EXCLUSIVE, "exclusiveMaximum"),
        ];
        for (predicate, keyword) in numeric {
            let Some(TermRef::Literal(literal)) = self.graph.value(prop, predicate) else {
                continue;
            };
            match literal.value().parse::<f64>() {
                Ok(bound) => {
                    if let Some(number) = serde_json::Number::from_f64(bound) {
                        with_value_target(schema, |target| {
                            target.insert(keyword.into(), Value::Number(number));
                        });
                    }
                }
                Err(_) => diagnostics.push(
                    DiagnosticKind::Unconvertible,
                    format!("non-numeric {keyword} bound '{}'", literal.value()),
                ),
            }
        }

        let lengths = [(vocab::MIN_LENGTH, "minLength"), (vocab::MAX_LENGTH, "maxLength")];
        for (predicate, keyword) in lengths {
            let Some(TermRef::Literal(literal)) = self.graph.value(prop, predicate) else {
                continue;
            };
            match literal.value().parse::<u64>() {
                Ok(bound) => with_value_target(schema, |target| {
                    target.insert(keyword.into(), Value::from(bound));
                }),
                Err(_) => diagnostics.push(
                    DiagnosticKind::Unconvertible,
                    format!("non-integer {keyword} bound '{}'", literal.value()),
                ),
            }
        }

        if let Some(TermRef::Literal(pattern)) = self.graph.value(prop, vocab::PATTERN) {
            let pattern = pattern.value().to_string();
            with_value_target(schema, |target| {
                target.insert("pattern".into(), Value::String(pattern));
            });
        }
    }

    fn count_literal(
        &self,
        prop: SubjectRef<'_>,
        predicate: NamedNodeRef<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<u64> {
        let TermRef::Literal(literal) = self.graph.value(prop, predicate)? else {
            return None;
        };
        match literal.value().parse::<u64>() {
            Ok(count) => Some(count),
            Err(_) => {
                diagnostics.push(
                    DiagnosticKind::Unconvertible,
                    format!("non-integer cardinality '{}'", literal.value()),
                );
                None
            }
        }
    }

    fn list_values(&self, head: TermRef<'_>) -> Vec<Value> {
        self.graph
            .list_terms(head)
            .iter()
            .filter_map(|term| match term.as_ref() {
                TermRef::NamedNode(iri) => Some(Value::String(iri.as_str().to_string())),
                TermRef::Literal(literal) => Some(literal_to_json(literal)),
                TermRef::BlankNode(_) => None,
            })
            .collect()
    }

    fn property_term(&self, iri: &str) -> String {
        self.property_terms
            .get(iri)
            .map(str::to_string)
            .unwrap_or_else(|| strategy_term(iri, self.strategy, self.graph.prefixes(), self.context))
    }

    fn shape_name(&self, key: &str) -> String {
        self.shape_names
            .get(key)
            .map(str::to_string)
            .unwrap_or_else(|| local_name(key).to_string())
    }
}

fn datatype_schema(datatype: &str) -> Value {
    if datatype == xsd::ANY_URI.as_str() {
        return json!({"type": "string", "format": "uri"});
    }
    if datatype == xsd::DATE.as_str() {
        return json!({"type": "string", "format": "date"});
    }
    if datatype == xsd::DATE_TIME.as_str() {
        return json!({"type": "string", "format": "date-time"});
    }
    if datatype == xsd::TIME.as_str() {
        return json!({"type": "string", "format": "time"});
    }
    if [xsd::INTEGER, xsd::INT, xsd::LONG, xsd::SHORT, xsd::BYTE]
        .iter()
        .any(|t| datatype == t.as_str())
    {
        return json!({"type": "integer"});
    }
    if [xsd::DECIMAL, xsd::FLOAT, xsd::DOUBLE]
        .iter()
        .any(|t| datatype == t.as_str())
    {
        return json!({"type": "number"});
    }
    if datatype == xsd::BOOLEAN.as_str() {
        return json!({"type": "boolean"});
    }
    // xsd:string and any unmapped datatype degrade to a plain string.
    json!({"type": "string"})
}

fn node_kind_schema(kind: &str) -> Value {
    if kind == vocab::IRI.as_str() {
        json!({"anyOf": [uri_string(), jsonld_id_object()]})
    } else if kind == vocab::LITERAL.as_str() {
        json!({"type": "string"})
    } else if kind == vocab::BLANK_NODE.as_str() {
        json!({"type": "object"})
    } else if kind == vocab::BLANK_NODE_OR_IRI.as_str() {
        json!({"anyOf": [{"type": "object"}, uri_string(), jsonld_id_object()]})
    } else if kind == vocab::IRI_OR_LITERAL.as_str() {
        json!({"anyOf": [uri_string(), jsonld_id_object(), {"type": "string"}]})
    } else if kind == vocab::BLANK_NODE_OR_LITERAL.as_str() {
        json!({"anyOf": [{"type": "object"}, {"type": "string"}]})
    } else {
        json!({"$comment": format!("Unknown sh:nodeKind {kind}")})
    }
}

fn uri_string() -> Value {
    json!({"type": "string", "format": "uri"})
}

/// IRI values may also appear as JSON-LD node references.
fn jsonld_id_object() -> Value {
    json!({
        "type": "object",
        "properties": {"@id": {"type": "string", "format": "uri"}},
        "required": ["@id"],
        "additionalProperties": true
    })
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("$comment".into(), other);
            map
        }
    }
}

/// Applies a mutation to the value schema: the `items` schema of an
/// array wrapper, otherwise the schema itself.
fn with_value_target(schema: &mut Map<String, Value>, apply: impl FnOnce(&mut Map<String, Value>)) {
    let wraps_array = schema.get("type").and_then(Value::as_str) == Some("array");
    if wraps_array {
        if let Some(Value::Object(items)) = schema.get_mut("items") {
            apply(items);
            return;
        }
    }
    apply(schema);
}

fn value_target(schema: &Map<String, Value>) -> &Map<String, Value> {
    if schema.get("type").and_then(Value::as_str) == Some("array") {
        if let Some(Value::Object(items)) = schema.get("items") {
            return items;
        }
    }
    schema
}

/// `sh:in (true false)` on a boolean adds nothing.
fn is_redundant_boolean_enum(schema: &Map<String, Value>, values: &[Value]) -> bool {
    let target = value_target(schema);
    target.get("type").and_then(Value::as_str) == Some("boolean")
        && values.len() == 2
        && values.contains(&Value::Bool(true))
        && values.contains(&Value::Bool(false))
}

fn is_informative(schema: &Value) -> bool {
    schema
        .as_object()
        .is_some_and(|map| INFORMATIVE_KEYS.iter().any(|key| map.contains_key(*key)))
}

/// Hoists a property discovered inside a composition alternative. An
/// existing entry is only replaced when the newcomer carries structural
/// information and the incumbent does not.
fn merge_informative(properties: &mut Map<String, Value>, name: String, schema: Value) {
    match properties.get(&name) {
        None => {
            properties.insert(name, schema);
        }
        Some(existing) if !is_informative(existing) && is_informative(&schema) => {
            properties.insert(name, schema);
        }
        Some(_) => {}
    }
}
