//! Non-fatal anomaly collection.
//!
//! Conversion never aborts on a SHACL construct it cannot express; it
//! records a diagnostic and keeps going. The collector mirrors every
//! entry through `tracing::warn!` so batch logs show them as they occur.

use serde::Serialize;

/// What kind of anomaly was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// An `owl:imports` target could not be read or parsed.
    SkippedImport,
    /// A SHACL construct with no JSON Schema equivalent.
    Unconvertible,
    /// `sh:class` pointing at a class no NodeShape targets.
    UnresolvedClass,
    /// Distinct IRIs reduced to the same term and were re-derived.
    NamingCollision,
    /// A property shape without `sh:path`.
    MissingPath,
}

/// A single recorded anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Accumulator for diagnostics raised during one conversion run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(?kind, "{message}");
        self.items.push(Diagnostic { kind, message });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
