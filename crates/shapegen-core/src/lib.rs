//! Core RDF data model for the SHACL to JSON Schema converter:
//! - ShapesGraph wrapper over `oxrdf::Graph` with ordering guarantees
//! - SHACL/OWL vocabulary constants

pub mod model;
pub mod vocab;

pub use model::{literal_to_json, local_name, subject_key, term_to_subject, ShapesGraph};
