//! SHACL shapes to structural JSON Schema conversion.
//!
//! This crate turns a Turtle shapes graph (plus recursively resolved
//! local `owl:imports`) into one JSON Schema document:
//! - shapes graph loading (loader)
//! - term/shape naming (naming)
//! - class to shape indexing (classify)
//! - constraint translation (translate)
//! - document assembly (assemble)
//! - non-fatal anomaly collection (diagnostics)
//!
//! The conversion is structural, not semantic: constructs with no JSON
//! Schema equivalent degrade to diagnostics and placeholder fragments,
//! never to a failed run. Only an unreadable root input, an invalid
//! JSON-LD context under `naming=context`, or an unknown root-shape
//! override abort a run.

pub mod assemble;
pub mod classify;
pub mod diagnostics;
pub mod loader;
pub mod naming;
pub mod translate;

pub use classify::ClassShapeIndex;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use naming::{ContextIndex, NamingStrategy, TermTable};

use std::path::{Path, PathBuf};

use serde_json::Value;
use shapegen_core::ShapesGraph;
use thiserror::Error;

/// Fatal conversion errors. Everything recoverable is a [`Diagnostic`].
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("invalid JSON-LD context: {0}")]
    InvalidContext(String),

    #[error("unknown root shape '{0}'")]
    UnknownRootShape(String),
}

/// Configuration for one conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Property naming strategy (default: CURIE).
    pub naming: NamingStrategy,
    /// JSON-LD context document, required for `NamingStrategy::Context`.
    pub context: Option<PathBuf>,
    /// Shape promoted to the document root. Defaults to the first
    /// NodeShape in parse order.
    pub root_shape: Option<String>,
}

/// Result of a completed conversion run.
#[derive(Debug)]
pub struct Conversion {
    /// The assembled JSON Schema document.
    pub schema: Value,
    /// Non-fatal anomalies recorded along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Clean success, as opposed to success-with-diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Converts a Turtle shapes file (and its local `owl:imports`) into a
/// JSON Schema document.
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<Conversion, SchemaError> {
    let mut diagnostics = Diagnostics::new();
    let graph = loader::load_shapes(input, &mut diagnostics)?;
    let schema = translate::convert(&graph, options, &mut diagnostics)?;
    Ok(Conversion {
        schema,
        diagnostics: diagnostics.into_vec(),
    })
}

/// Converts an already loaded shapes graph.
pub fn convert_graph(graph: &ShapesGraph, options: &ConvertOptions) -> Result<Conversion, SchemaError> {
    let mut diagnostics = Diagnostics::new();
    let schema = translate::convert(graph, options, &mut diagnostics)?;
    Ok(Conversion {
        schema,
        diagnostics: diagnostics.into_vec(),
    })
}
