//! Shapes graph loading: Turtle parsing plus recursive resolution of
//! local `owl:imports`.
//!
//! Remote (`http`/`https`) imports are intentionally not fetched. Files
//! merge depth-first, root first: a file's own imports merge before its
//! siblings, so prefix declarations from earlier files stay
//! authoritative for CURIE naming. A visited set of canonicalized paths
//! makes cyclic import graphs terminate.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use oxrdf::{Term, Triple};
use oxttl::TurtleParser;
use shapegen_core::{vocab, ShapesGraph};
use tracing::{debug, info};
use url::Url;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::SchemaError;

struct ParsedFile {
    triples: Vec<Triple>,
    prefixes: Vec<(String, String)>,
    imports: Vec<String>,
}

/// Loads a Turtle shapes file and merges every reachable local
/// `owl:imports` target into one graph.
///
/// A root file that cannot be read or parsed is fatal. An import that
/// cannot be read or parsed is skipped with a diagnostic; nothing from
/// a failed import is merged.
pub fn load_shapes(root: &Path, diagnostics: &mut Diagnostics) -> Result<ShapesGraph, SchemaError> {
    let root_abs = canonical_or_absolute(root);
    let parsed = parse_file(&root_abs)?;

    let mut graph = ShapesGraph::new();
    let mut visited = HashSet::from([root_abs.clone()]);
    let mut pending: Vec<(PathBuf, String)> = Vec::new();
    merge_parsed(&mut graph, parsed, &root_abs, &mut pending);
    info!(triples = graph.len(), "loaded shapes file {}", root_abs.display());

    while let Some((base_dir, import_iri)) = pending.pop() {
        let Some(path) = resolve_import_path(&import_iri, &base_dir) else {
            debug!("skipping non-local owl:imports: {import_iri}");
            continue;
        };
        let path = canonical_or_absolute(&path);
        // Mark before parsing so a failing import is never retried.
        if !visited.insert(path.clone()) {
            continue;
        }
        match parse_file(&path) {
            Ok(parsed) => {
                merge_parsed(&mut graph, parsed, &path, &mut pending);
                info!(triples = graph.len(), "merged owl:imports {}", path.display());
            }
            Err(err) => {
                diagnostics.push(
                    DiagnosticKind::SkippedImport,
                    format!("owl:imports {import_iri} skipped: {err}"),
                );
            }
        }
    }

    Ok(graph)
}

/// Parses an in-memory Turtle document. `owl:imports` are not resolved.
pub fn load_shapes_str(turtle: &str) -> Result<ShapesGraph, SchemaError> {
    let mut parser = TurtleParser::new().for_reader(turtle.as_bytes());
    let mut graph = ShapesGraph::new();
    for result in &mut parser {
        let triple = result.map_err(|e| SchemaError::Parse {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })?;
        graph.insert(&triple);
    }
    for (prefix, iri) in parser.prefixes() {
        graph.declare_prefix(prefix, iri);
    }
    Ok(graph)
}

fn parse_file(path: &Path) -> Result<ParsedFile, SchemaError> {
    let file = File::open(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut parser = TurtleParser::new().for_reader(BufReader::new(file));

    let mut triples = Vec::new();
    let mut imports = Vec::new();
    for result in &mut parser {
        let triple = result.map_err(|e| SchemaError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if triple.predicate.as_ref() == vocab::IMPORTS {
            if let Term::NamedNode(target) = &triple.object {
                imports.push(target.as_str().to_string());
            }
        }
        triples.push(triple);
    }
    let prefixes = parser
        .prefixes()
        .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
        .collect();

    Ok(ParsedFile {
        triples,
        prefixes,
        imports,
    })
}

fn merge_parsed(
    graph: &mut ShapesGraph,
    parsed: ParsedFile,
    file: &Path,
    pending: &mut Vec<(PathBuf, String)>,
) {
    for triple in &parsed.triples {
        graph.insert(triple);
    }
    for (prefix, iri) in &parsed.prefixes {
        graph.declare_prefix(prefix, iri);
    }
    let base_dir = file.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    // Pushed in reverse so the stack pops this file's imports in
    // declaration order, before any sibling still waiting below.
    for import in parsed.imports.into_iter().rev() {
        pending.push((base_dir.clone(), import));
    }
}

/// Maps an `owl:imports` IRI onto a local filesystem path.
///
/// `http`/`https` IRIs return `None` (not fetched). `file:` URIs are
/// converted; anything else is treated as an absolute or relative path,
/// relative to the directory of the declaring file.
fn resolve_import_path(import_iri: &str, base_dir: &Path) -> Option<PathBuf> {
    if let Ok(url) = Url::parse(import_iri) {
        match url.scheme() {
            "http" | "https" => return None,
            "file" => return url.to_file_path().ok(),
            // Windows drive letters parse as single-letter schemes;
            // treat everything else as a plain path below.
            _ => {}
        }
    }
    let candidate = PathBuf::from(import_iri);
    if candidate.is_absolute() {
        Some(candidate)
    } else {
        Some(base_dir.join(candidate))
    }
}

fn canonical_or_absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
