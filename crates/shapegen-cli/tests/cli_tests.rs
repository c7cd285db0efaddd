use std::fs;

use clap::Parser;
use shapegen_cli::commands::{run, Cli};
use shapegen_schema::NamingStrategy;

#[test]
fn defaults_to_curie_naming_and_stdout() {
    let cli = Cli::try_parse_from(["shapegen", "--input", "shapes.ttl"]).unwrap();
    assert_eq!(cli.input.to_str(), Some("shapes.ttl"));
    assert_eq!(cli.naming, NamingStrategy::Curie);
    assert!(cli.output.is_none());
    assert!(cli.root_shape.is_none());
    assert!(!cli.verbose);
}

#[test]
fn parses_all_flags() {
    let cli = Cli::try_parse_from([
        "shapegen",
        "--input",
        "shapes.ttl",
        "--output",
        "schema.json",
        "--naming",
        "context",
        "--context",
        "ctx.jsonld",
        "--root-shape",
        "Party",
        "--verbose",
    ])
    .unwrap();
    assert_eq!(cli.naming, NamingStrategy::Context);
    assert_eq!(cli.output.unwrap().to_str(), Some("schema.json"));
    assert_eq!(cli.context.unwrap().to_str(), Some("ctx.jsonld"));
    assert_eq!(cli.root_shape.as_deref(), Some("Party"));
    assert!(cli.verbose);
}

#[test]
fn rejects_unknown_naming_strategy() {
    assert!(
        Cli::try_parse_from(["shapegen", "--input", "shapes.ttl", "--naming", "camel"]).is_err()
    );
}

#[test]
fn requires_an_input_path() {
    assert!(Cli::try_parse_from(["shapegen"]).is_err());
}

#[test]
fn clean_conversion_exits_zero_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shapes.ttl");
    fs::write(
        &input,
        "@prefix sh: <http://www.w3.org/ns/shacl#> .\n\
         @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
         @prefix ex: <http://example.org/ns#> .\n\
         ex:PartyShape a sh:NodeShape ;\n\
         sh:property [ sh:path ex:name ; sh:datatype xsd:string ; sh:minCount 1 ] .\n",
    )
    .unwrap();
    // nested path exercises parent-directory creation
    let output = dir.path().join("out/schema.json");

    let cli = Cli::try_parse_from([
        "shapegen",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(run(cli), 0);

    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(schema["$defs"]["PartyShape"]["type"], "object");
}

#[test]
fn diagnostics_exit_with_code_two() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shapes.ttl");
    // sh:class with no matching shape produces a diagnostic
    fs::write(
        &input,
        "@prefix sh: <http://www.w3.org/ns/shacl#> .\n\
         @prefix ex: <http://example.org/ns#> .\n\
         ex:S a sh:NodeShape ;\n\
         sh:property [ sh:path ex:ref ; sh:class ex:Unknown ] .\n",
    )
    .unwrap();
    let output = dir.path().join("schema.json");

    let cli = Cli::try_parse_from([
        "shapegen",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(run(cli), 2);
    // output is still produced on success-with-diagnostics
    assert!(output.exists());
}

#[test]
fn missing_input_exits_with_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.ttl");
    let cli = Cli::try_parse_from(["shapegen", "--input", absent.to_str().unwrap()]).unwrap();
    assert_eq!(run(cli), 1);
}
