//! Term derivation for shapes and properties.
//!
//! Every IRI that becomes a JSON Schema definition key or property name
//! goes through a [`TermTable`]. The table guarantees that distinct
//! IRIs never share a term: contested terms are re-derived from prefix
//! declarations, then from a stable hash of the full IRI, so the same
//! input always yields the same output.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use shapegen_core::local_name;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::SchemaError;

/// How property IRIs are reduced to JSON member names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingStrategy {
    /// Local name after the last `#` or `/`.
    Local,
    /// `prefix:local` when a declared namespace matches, else local.
    #[default]
    Curie,
    /// Term from a JSON-LD context document, else local.
    Context,
}

impl FromStr for NamingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "curie" => Ok(Self::Curie),
            "context" => Ok(Self::Context),
            other => Err(format!(
                "unknown naming strategy '{other}' (expected local, curie, or context)"
            )),
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Curie => "curie",
            Self::Context => "context",
        })
    }
}

/// Reverse index from expanded IRIs to JSON-LD context terms.
#[derive(Debug, Default)]
pub struct ContextIndex {
    terms: HashMap<String, String>,
}

impl ContextIndex {
    /// Loads a JSON-LD context document from disk.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&text).map_err(|e| SchemaError::InvalidContext(e.to_string()))?;
        Self::from_document(&document).map_err(SchemaError::InvalidContext)
    }

    /// Builds the index from a parsed JSON-LD document.
    ///
    /// Term definitions may be plain string mappings or expanded objects
    /// with an `@id`. CURIE values are expanded against prefix entries of
    /// the same context. When two terms map to one IRI the first wins.
    pub fn from_document(document: &Value) -> Result<Self, String> {
        let context = document
            .get("@context")
            .ok_or_else(|| "missing @context member".to_string())?;
        let entries = context
            .as_object()
            .ok_or_else(|| "@context is not an object".to_string())?;

        let mut prefixes: HashMap<&str, &str> = HashMap::new();
        for (term, value) in entries {
            if let Some(iri) = value.as_str() {
                if iri.ends_with('/') || iri.ends_with('#') {
                    prefixes.insert(term.as_str(), iri);
                }
            }
        }

        let mut terms = HashMap::new();
        for (term, value) in entries {
            if term.starts_with('@') {
                continue;
            }
            let id = match value {
                Value::String(s) => Some(s.as_str()),
                Value::Object(map) => map.get("@id").and_then(Value::as_str),
                _ => None,
            };
            let Some(id) = id else { continue };
            // Namespace declarations are not terms.
            if id.ends_with('/') || id.ends_with('#') {
                continue;
            }
            let expanded = expand_curie(id, &prefixes);
            terms.entry(expanded).or_insert_with(|| term.clone());
        }

        Ok(Self { terms })
    }

    pub fn term_for(&self, iri: &str) -> Option<&str> {
        self.terms.get(iri).map(String::as_str)
    }
}

fn expand_curie(id: &str, prefixes: &HashMap<&str, &str>) -> String {
    if id.starts_with("http://") || id.starts_with("https://") || id.starts_with("urn:") {
        return id.to_string();
    }
    if let Some((prefix, local)) = id.split_once(':') {
        if let Some(namespace) = prefixes.get(prefix) {
            return format!("{namespace}{local}");
        }
    }
    id.to_string()
}

/// Derives the uncontested term for one IRI under a strategy.
pub(crate) fn strategy_term(
    iri: &str,
    strategy: NamingStrategy,
    prefixes: &[(String, String)],
    context: Option<&ContextIndex>,
) -> String {
    match strategy {
        NamingStrategy::Local => local_name(iri).to_string(),
        NamingStrategy::Curie => {
            for (prefix, namespace) in prefixes {
                if let Some(local) = iri.strip_prefix(namespace.as_str()) {
                    if !local.is_empty() {
                        return format!("{prefix}:{local}");
                    }
                }
            }
            local_name(iri).to_string()
        }
        NamingStrategy::Context => context
            .and_then(|c| c.term_for(iri))
            .map(str::to_string)
            .unwrap_or_else(|| local_name(iri).to_string()),
    }
}

fn prefixed_fallback(iri: &str, prefixes: &[(String, String)]) -> Option<String> {
    for (prefix, namespace) in prefixes {
        if let Some(local) = iri.strip_prefix(namespace.as_str()) {
            if !local.is_empty() {
                return Some(format!("{prefix}_{local}"));
            }
        }
    }
    None
}

/// Injective mapping from IRIs to derived terms.
#[derive(Debug, Default)]
pub struct TermTable {
    terms: HashMap<String, String>,
}

impl TermTable {
    /// Derives terms for a set of IRIs, resolving collisions.
    ///
    /// When two or more IRIs reduce to the same preliminary term, every
    /// member of the contested group is re-derived (none keeps the bare
    /// term) so readers see at a glance that disambiguation happened.
    pub fn build<I, S>(
        iris: I,
        strategy: NamingStrategy,
        prefixes: &[(String, String)],
        context: Option<&ContextIndex>,
        diagnostics: &mut Diagnostics,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for iri in iris {
            let iri = iri.as_ref();
            if seen.insert(iri.to_string()) {
                ordered.push(iri.to_string());
            }
        }

        let preliminary: Vec<String> = ordered
            .iter()
            .map(|iri| strategy_term(iri, strategy, prefixes, context))
            .collect();

        let mut claims: HashMap<&str, usize> = HashMap::new();
        for term in &preliminary {
            *claims.entry(term.as_str()).or_insert(0) += 1;
        }

        let mut used: HashSet<String> = HashSet::new();
        let mut terms = HashMap::new();
        for (iri, prelim) in ordered.iter().zip(&preliminary) {
            let contested = claims[prelim.as_str()] > 1;
            let base = if contested {
                prefixed_fallback(iri, prefixes)
                    .unwrap_or_else(|| format!("{prelim}_{}", stable_hash_hex(iri, 8)))
            } else {
                prelim.clone()
            };
            let candidate = disambiguate(&base, iri, &used);
            if candidate != *prelim {
                diagnostics.push(
                    DiagnosticKind::NamingCollision,
                    format!("term '{prelim}' for <{iri}> renamed to '{candidate}'"),
                );
            }
            used.insert(candidate.clone());
            terms.insert(iri.clone(), candidate);
        }

        Self { terms }
    }

    pub fn get(&self, iri: &str) -> Option<&str> {
        self.terms.get(iri).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn disambiguate(base: &str, iri: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    let hashed = format!("{base}_{}", stable_hash_hex(iri, 8));
    if !used.contains(&hashed) {
        return hashed;
    }
    let full = stable_hash_hex(iri, 16);
    if !used.contains(&full) {
        return full;
    }
    let mut n = 2usize;
    loop {
        let numbered = format!("{full}_{n}");
        if !used.contains(&numbered) {
            return numbered;
        }
        n += 1;
    }
}

/// FNV-1a 64, truncated to `width` lowercase hex characters.
fn stable_hash_hex(input: &str, width: usize) -> String {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x1_0000_0001_b3;
    let mut hash = OFFSET;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    let hex = format!("{hash:016x}");
    hex[..width.min(16)].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_hash_is_deterministic() {
        assert_eq!(stable_hash_hex("abc", 8), stable_hash_hex("abc", 8));
        assert_ne!(stable_hash_hex("abc", 8), stable_hash_hex("abd", 8));
        assert_eq!(stable_hash_hex("abc", 8).len(), 8);
        assert_eq!(stable_hash_hex("abc", 16).len(), 16);
    }
}
