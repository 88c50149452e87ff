//! Parse → generate round-trips over canonical subscription strings
//!
//! Every fixture compiles to a tree and renders back to the exact source
//! text, which pins both directions at once.

use fql_parser::{generate_fql, parse_fql};

fn assert_round_trip(source: &str) {
    let ast = parse_fql(source).expect(source);
    let rendered = generate_fql(&ast).expect(source);
    assert_eq!(rendered, source);
}

#[test]
fn test_round_trip_simple_comparisons() -> anyhow::Result<()> {
    for source in [
        "type = \"track\"",
        "event = \"Product Added\"",
        "name != \"Home\"",
        "userId = \"u-1\"",
        "properties.price >= 100",
        "traits.plan = \"free\"",
        "context.app.version = \"1.0\"",
        "properties.premium = \"true\"",
    ] {
        assert_round_trip(source);
    }
    Ok(())
}

#[test]
fn test_round_trip_conjunctions() {
    for source in [
        "type = \"track\" or type = \"identify\"",
        "event = \"Product Added\" or event = \"Order Completed\"",
        "type = \"track\" and event = \"Product Added\"",
        "event = \"Product Added\" and properties.price >= 100",
        "event = \"Product Added\" and properties.price >= 100 and properties.premium = \"true\"",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_round_trip_groups() {
    for source in [
        "type = \"track\" and (event = \"Product Added\" or event = \"Order Completed\")",
        "(event = \"Product Added\" and properties.price >= 100) or (event = \"Order Completed\" and properties.total >= 500)",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_round_trip_functions() {
    for source in [
        "contains(event, \"Nike\")",
        "!contains(event, \"Nike\")",
        "event = \"Product Added\" and contains(properties.name, \"Nike\")",
        "event = \"Product Added\" and !contains(traits.name, \"Nike\")",
        "match(event, \"X*\")",
        "!match(event, \"X*\")",
        "match(event, \"*X\")",
        "!match(event, \"*X\")",
        "event = \"Product Added\" and match(properties.name, \"X*\")",
        "event = \"Product Added\" and !match(traits.name, \"*X\")",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_round_trip_presence_shorthand() {
    for source in [
        "userId != null",
        "properties.name != null",
        "traits.name = null",
        "properties.active = true",
        "properties.active = false",
        "event = \"Product Added\" and properties.name != null",
    ] {
        assert_round_trip(source);
    }
}
