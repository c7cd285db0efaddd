//! Shapes-graph model: an `oxrdf::Graph` plus the ordering information
//! the converter needs (prefix declaration order, NodeShape parse order).

use std::collections::{HashMap, HashSet};

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, LiteralRef, NamedNodeRef, Subject, SubjectRef, Term, TermRef, Triple};
use serde_json::Value;

/// Upper bound on RDF list traversal. Malformed lists (cycles are
/// caught separately) cannot make the translator walk forever.
const MAX_LIST_LENGTH: usize = 10_000;

/// An RDF graph of SHACL shapes, immutable once loaded.
///
/// Unlike the raw `oxrdf::Graph`, this wrapper remembers two things the
/// conversion depends on: namespace prefixes in declaration order (for
/// CURIE naming) and NodeShape subjects in the order they first appear
/// in the parsed input (for deterministic root selection).
#[derive(Debug, Default, Clone)]
pub struct ShapesGraph {
    graph: Graph,
    prefixes: Vec<(String, String)>,
    shape_order: Vec<Subject>,
    shape_seen: HashSet<String>,
    property_links: HashMap<String, Vec<Term>>,
}

impl ShapesGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a triple, recording NodeShape subjects and `sh:property`
    /// links in first-seen order. Anonymous property shapes get fresh
    /// blank node ids on every parse, so the graph's sorted iteration
    /// order over them is not reproducible; the recorded document order
    /// is.
    pub fn insert(&mut self, triple: &Triple) {
        if triple.predicate.as_ref() == rdf::TYPE {
            if let Term::NamedNode(object) = &triple.object {
                if object.as_ref() == crate::vocab::NODE_SHAPE {
                    let key = subject_key(triple.subject.as_ref());
                    if self.shape_seen.insert(key) {
                        self.shape_order.push(triple.subject.clone());
                    }
                }
            }
        } else if triple.predicate.as_ref() == crate::vocab::PROPERTY {
            let links = self
                .property_links
                .entry(subject_key(triple.subject.as_ref()))
                .or_default();
            if !links.contains(&triple.object) {
                links.push(triple.object.clone());
            }
        }
        self.graph.insert(triple.as_ref());
    }

    /// Declares a namespace prefix. The first declaration of a prefix
    /// name wins; later rebindings are ignored so CURIE resolution stays
    /// stable across imports.
    pub fn declare_prefix(&mut self, name: &str, iri: &str) {
        if !self.prefixes.iter().any(|(p, _)| p == name) {
            self.prefixes.push((name.to_string(), iri.to_string()));
        }
    }

    /// Single object for (subject, predicate), if any.
    pub fn value<'a>(
        &'a self,
        subject: SubjectRef<'a>,
        predicate: NamedNodeRef<'a>,
    ) -> Option<TermRef<'a>> {
        self.graph.object_for_subject_predicate(subject, predicate)
    }

    /// All objects for (subject, predicate), in graph order.
    pub fn objects<'a>(
        &'a self,
        subject: SubjectRef<'a>,
        predicate: NamedNodeRef<'a>,
    ) -> impl Iterator<Item = TermRef<'a>> + 'a {
        self.graph.objects_for_subject_predicate(subject, predicate)
    }

    /// Lexical form of the object for (subject, predicate). IRIs yield
    /// the IRI string, literals their value.
    pub fn literal_string(&self, subject: SubjectRef<'_>, predicate: NamedNodeRef<'_>) -> Option<String> {
        self.value(subject, predicate).map(|term| match term {
            TermRef::NamedNode(n) => n.as_str().to_string(),
            TermRef::BlankNode(b) => b.as_str().to_string(),
            TermRef::Literal(l) => l.value().to_string(),
        })
    }

    /// Walks an RDF list (`rdf:first`/`rdf:rest`) into a vector of member
    /// terms. Guarded against cycles and unbounded length so a malformed
    /// list cannot hang the caller.
    pub fn list_terms(&self, head: TermRef<'_>) -> Vec<Term> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut current = head.into_owned();

        loop {
            if matches!(&current, Term::NamedNode(n) if n.as_ref() == rdf::NIL) {
                break;
            }
            let Some(subject) = term_to_subject(current.as_ref()) else {
                break;
            };
            if !visited.insert(subject_key(subject)) || items.len() >= MAX_LIST_LENGTH {
                break;
            }
            if let Some(first) = self.value(subject, rdf::FIRST) {
                items.push(first.into_owned());
            }
            match self.value(subject, rdf::REST) {
                Some(rest) => current = rest.into_owned(),
                None => break,
            }
        }

        items
    }

    /// `sh:property` objects of a shape, in document order.
    pub fn property_shapes(&self, subject: SubjectRef<'_>) -> &[Term] {
        self.property_links
            .get(&subject_key(subject))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// NodeShape subjects in the order they first appeared in the input.
    pub fn node_shapes(&self) -> &[Subject] {
        &self.shape_order
    }

    /// Namespace prefixes in declaration order.
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Stable string key for a subject: the IRI, or `_:<id>` for blank nodes.
pub fn subject_key(subject: SubjectRef<'_>) -> String {
    match subject {
        SubjectRef::NamedNode(n) => n.as_str().to_string(),
        SubjectRef::BlankNode(b) => format!("_:{}", b.as_str()),
    }
}

/// Views a term as a subject, when it is one.
pub fn term_to_subject(term: TermRef<'_>) -> Option<SubjectRef<'_>> {
    match term {
        TermRef::NamedNode(n) => Some(n.into()),
        TermRef::BlankNode(b) => Some(b.into()),
        _ => None,
    }
}

/// Extracts the local name of an IRI: the suffix after the last `#` or `/`.
pub fn local_name(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(pos) => &iri[pos + 1..],
        None => iri,
    }
}

/// Converts a typed RDF literal to the closest JSON value.
///
/// Only the XSD types the schema mapping understands are converted;
/// anything else keeps its lexical form as a JSON string.
pub fn literal_to_json(literal: LiteralRef<'_>) -> Value {
    let datatype = literal.datatype();
    let lexical = literal.value();

    if datatype == xsd::BOOLEAN {
        match lexical {
            "true" | "1" => return Value::Bool(true),
            "false" | "0" => return Value::Bool(false),
            _ => {}
        }
    } else if datatype == xsd::INTEGER
        || datatype == xsd::INT
        || datatype == xsd::LONG
        || datatype == xsd::SHORT
        || datatype == xsd::BYTE
    {
        if let Ok(n) = lexical.parse::<i64>() {
            return Value::from(n);
        }
    } else if datatype == xsd::DECIMAL || datatype == xsd::FLOAT || datatype == xsd::DOUBLE {
        if let Ok(f) = lexical.parse::<f64>() {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }

    Value::String(lexical.to_string())
}
