//! Class to shape indexing.
//!
//! `sh:class` constraints resolve to `$ref`s through this index: a class
//! IRI maps to the definition key of the NodeShape that targets it via
//! `sh:targetClass`. When several shapes target one class the shape
//! declared last wins.

use std::collections::HashMap;

use oxrdf::TermRef;
use shapegen_core::{subject_key, vocab, ShapesGraph};

use crate::naming::TermTable;

#[derive(Debug, Default)]
pub struct ClassShapeIndex {
    map: HashMap<String, String>,
}

impl ClassShapeIndex {
    pub fn build(graph: &ShapesGraph, shape_names: &TermTable) -> Self {
        let mut map = HashMap::new();
        for shape in graph.node_shapes() {
            let Some(TermRef::NamedNode(class)) =
                graph.value(shape.as_ref(), vocab::TARGET_CLASS)
            else {
                continue;
            };
            if let Some(name) = shape_names.get(&subject_key(shape.as_ref())) {
                map.insert(class.as_str().to_string(), name.to_string());
            }
        }
        Self { map }
    }

    pub fn shape_for(&self, class_iri: &str) -> Option<&str> {
        self.map.get(class_iri).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
