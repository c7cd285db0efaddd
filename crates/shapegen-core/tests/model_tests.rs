use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Literal, NamedNode, Term, Triple};
use serde_json::json;
use shapegen_core::{literal_to_json, local_name, subject_key, vocab, ShapesGraph};

fn iri(s: &str) -> NamedNode {
    NamedNode::new_unchecked(s)
}

#[test]
fn node_shape_order_follows_insertion_and_deduplicates() {
    let mut graph = ShapesGraph::new();
    let a = iri("http://example.org/A");
    let b = iri("http://example.org/B");

    graph.insert(&Triple::new(b.clone(), rdf::TYPE, vocab::NODE_SHAPE.into_owned()));
    graph.insert(&Triple::new(a.clone(), rdf::TYPE, vocab::NODE_SHAPE.into_owned()));
    // duplicate declaration of B must not reorder or repeat
    graph.insert(&Triple::new(b.clone(), rdf::TYPE, vocab::NODE_SHAPE.into_owned()));

    let order: Vec<String> = graph
        .node_shapes()
        .iter()
        .map(|s| subject_key(s.as_ref()))
        .collect();
    assert_eq!(order, vec!["http://example.org/B", "http://example.org/A"]);
}

#[test]
fn property_shapes_preserve_document_order() {
    let mut graph = ShapesGraph::new();
    let shape = iri("http://example.org/S");
    let late_sorting = BlankNode::new_unchecked("zzz");
    let early_sorting = BlankNode::new_unchecked("aaa");
    graph.insert(&Triple::new(shape.clone(), vocab::PROPERTY, late_sorting.clone()));
    graph.insert(&Triple::new(shape.clone(), vocab::PROPERTY, early_sorting.clone()));
    // duplicate link is ignored
    graph.insert(&Triple::new(shape.clone(), vocab::PROPERTY, late_sorting.clone()));

    let links = graph.property_shapes(shape.as_ref().into());
    assert_eq!(links.len(), 2);
    assert_eq!(links[0], Term::from(late_sorting));
    assert_eq!(links[1], Term::from(early_sorting));
}

#[test]
fn first_prefix_declaration_wins() {
    let mut graph = ShapesGraph::new();
    graph.declare_prefix("ex", "http://example.org/");
    graph.declare_prefix("ex", "http://other.org/");
    graph.declare_prefix("sh", "http://www.w3.org/ns/shacl#");

    assert_eq!(
        graph.prefixes(),
        &[
            ("ex".to_string(), "http://example.org/".to_string()),
            ("sh".to_string(), "http://www.w3.org/ns/shacl#".to_string()),
        ]
    );
}

#[test]
fn literal_string_reads_iris_and_literals() {
    let mut graph = ShapesGraph::new();
    let subject = iri("http://example.org/s");
    graph.insert(&Triple::new(
        subject.clone(),
        vocab::PATH,
        iri("http://example.org/name"),
    ));
    graph.insert(&Triple::new(
        subject.clone(),
        vocab::DESCRIPTION,
        Literal::new_simple_literal("a name"),
    ));

    assert_eq!(
        graph.literal_string(subject.as_ref().into(), vocab::PATH),
        Some("http://example.org/name".to_string())
    );
    assert_eq!(
        graph.literal_string(subject.as_ref().into(), vocab::DESCRIPTION),
        Some("a name".to_string())
    );
    assert_eq!(graph.literal_string(subject.as_ref().into(), vocab::PATTERN), None);
}

fn push_list(graph: &mut ShapesGraph, cells: &[(BlankNode, Term, Term)]) {
    for (cell, first, rest) in cells {
        graph.insert(&Triple::new(cell.clone(), rdf::FIRST, first.clone()));
        graph.insert(&Triple::new(cell.clone(), rdf::REST, rest.clone()));
    }
}

#[test]
fn list_terms_walks_well_formed_lists() {
    let mut graph = ShapesGraph::new();
    let c1 = BlankNode::new_unchecked("c1");
    let c2 = BlankNode::new_unchecked("c2");
    push_list(
        &mut graph,
        &[
            (
                c1.clone(),
                Literal::new_typed_literal("1", xsd::INTEGER).into(),
                c2.clone().into(),
            ),
            (
                c2.clone(),
                Literal::new_typed_literal("2", xsd::INTEGER).into(),
                rdf::NIL.into_owned().into(),
            ),
        ],
    );

    let items = graph.list_terms(Term::from(c1).as_ref());
    assert_eq!(items.len(), 2);
}

#[test]
fn list_terms_terminates_on_cycles() {
    let mut graph = ShapesGraph::new();
    let c1 = BlankNode::new_unchecked("c1");
    let c2 = BlankNode::new_unchecked("c2");
    // c1 -> c2 -> c1, never reaching rdf:nil
    push_list(
        &mut graph,
        &[
            (
                c1.clone(),
                Literal::new_simple_literal("a").into(),
                c2.clone().into(),
            ),
            (
                c2.clone(),
                Literal::new_simple_literal("b").into(),
                c1.clone().into(),
            ),
        ],
    );

    let items = graph.list_terms(Term::from(c1).as_ref());
    assert_eq!(items.len(), 2);
}

#[test]
fn list_terms_stops_on_missing_rest() {
    let mut graph = ShapesGraph::new();
    let c1 = BlankNode::new_unchecked("c1");
    graph.insert(&Triple::new(
        c1.clone(),
        rdf::FIRST,
        Literal::new_simple_literal("only"),
    ));

    let items = graph.list_terms(Term::from(c1).as_ref());
    assert_eq!(items.len(), 1);
}

#[test]
fn local_name_strips_hash_and_slash() {
    assert_eq!(local_name("http://example.org/ns#Party"), "Party");
    assert_eq!(local_name("http://example.org/ns/name"), "name");
    assert_eq!(local_name("urn-like-token"), "urn-like-token");
}

#[test]
fn literal_to_json_maps_xsd_types() {
    let boolean = Literal::new_typed_literal("true", xsd::BOOLEAN);
    assert_eq!(literal_to_json(boolean.as_ref()), json!(true));

    let integer = Literal::new_typed_literal("42", xsd::INTEGER);
    assert_eq!(literal_to_json(integer.as_ref()), json!(42));

    let decimal = Literal::new_typed_literal("2.5", xsd::DECIMAL);
    assert_eq!(literal_to_json(decimal.as_ref()), json!(2.5));

    let date = Literal::new_typed_literal("2024-01-01", xsd::DATE);
    assert_eq!(literal_to_json(date.as_ref()), json!("2024-01-01"));

    let plain = Literal::new_simple_literal("hello");
    assert_eq!(literal_to_json(plain.as_ref()), json!("hello"));
}

#[test]
fn literal_to_json_keeps_unparsable_numerics_as_strings() {
    let bad = Literal::new_typed_literal("not-a-number", xsd::INTEGER);
    assert_eq!(literal_to_json(bad.as_ref()), json!("not-a-number"));
}
