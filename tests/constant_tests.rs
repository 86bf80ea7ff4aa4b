// tests/constant_tests.rs

use paradox_script::{
    collect_constants, parse, parse_document, process, resolve_constants, Node, ParseOptions, Value,
};
use rust_decimal::Decimal;

fn resolved(text: &str) -> Node {
    parse_document("t.txt", text, &ParseOptions::default()).unwrap()
}

fn unresolved(text: &str) -> Node {
    process("t.txt", "t.txt", parse("t.txt", text).unwrap()).unwrap()
}

fn leaf_value(node: &Node, key: &str) -> Value {
    node.leaf(key).unwrap().value().clone()
}

// ============================================================================
// Substitution
// ============================================================================

#[test]
fn test_constant_replaces_use() {
    let root = resolved("@pi = 3.14\nshape = { radius_factor = @pi }");
    let shape = root.child("shape").unwrap();
    assert_eq!(leaf_value(shape, "radius_factor"), Value::Float(Decimal::new(314, 2)));
}

#[test]
fn test_use_before_definition() {
    let root = resolved("x = @size\n@size = 12");
    assert_eq!(leaf_value(&root, "x"), Value::Int(12));
}

#[test]
fn test_definitions_inside_blocks_are_visible_everywhere() {
    let root = resolved("a = { @inner = yes }\nb = @inner\nc = { d = { e = @inner } }");
    assert_eq!(leaf_value(&root, "b"), Value::Bool(true));
    let e = root.child("c").and_then(|c| c.child("d")).unwrap();
    assert_eq!(leaf_value(e, "e"), Value::Bool(true));
}

#[test]
fn test_last_definition_wins() {
    let root = resolved("@v = 1\nx = @v\n@v = 2");
    assert_eq!(leaf_value(&root, "x"), Value::Int(2));
}

#[test]
fn test_bare_list_items_are_substituted() {
    let root = resolved("@v = 1\nlist = { @v 2 @v }");
    let values: Vec<Value> = root
        .child("list")
        .unwrap()
        .leaf_values()
        .map(|item| item.value().clone())
        .collect();
    assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(1)]);
}

#[test]
fn test_quoted_constant_value() {
    let root = resolved("@title = \"Two Words\"\nname = @title");
    assert_eq!(leaf_value(&root, "name"), Value::qstring("Two Words"));
}

#[test]
fn test_undefined_reference_stays_text() {
    let root = resolved("@known = 1\nx = @missing");
    assert_eq!(leaf_value(&root, "x"), Value::String("@missing".to_string()));
}

#[test]
fn test_non_textual_values_never_match() {
    let root = resolved("@v = 1\nx = 5\ny = yes");
    assert_eq!(leaf_value(&root, "x"), Value::Int(5));
    assert_eq!(leaf_value(&root, "y"), Value::Bool(true));
}

#[test]
fn test_substitution_is_not_transitive() {
    let root = resolved("@b = 1\n@a = @b\nx = @a");
    assert_eq!(leaf_value(&root, "@a"), Value::Int(1));
    assert_eq!(leaf_value(&root, "x"), Value::String("@b".to_string()));
}

#[test]
fn test_substituted_values_are_independent_copies() {
    let mut root = resolved("@pi = 3.14\na = @pi\nb = @pi");
    root.leaf_mut("a").unwrap().set_value(0);

    assert_eq!(leaf_value(&root, "a"), Value::Int(0));
    assert_eq!(leaf_value(&root, "b"), Value::Float(Decimal::new(314, 2)));
    assert_eq!(leaf_value(&root, "@pi"), Value::Float(Decimal::new(314, 2)));
}

#[test]
fn test_substitution_keeps_leaf_identity() {
    let root = resolved("@v = 1\nx >= @v");
    let leaf = root.leaf("x").unwrap();
    assert_eq!(leaf.operator(), paradox_script::Operator::GreaterThanOrEqual);
    assert_eq!(leaf.position().start.line, 2);
    assert_eq!(root.tag_positions("x"), &[1]);
}

// ============================================================================
// Resolver Entry Points
// ============================================================================

#[test]
fn test_resolve_counts_replacements() {
    let mut root = unresolved("@pi = 3.14\na = @pi\nb = { c = @pi }\nd = @other");
    assert_eq!(resolve_constants(&mut root), 2);
    assert_eq!(resolve_constants(&mut root), 0);
}

#[test]
fn test_resolve_without_constants() {
    let mut root = unresolved("a = @pi");
    let before = root.clone();
    assert_eq!(resolve_constants(&mut root), 0);
    assert_eq!(root, before);
}

#[test]
fn test_resolution_can_be_disabled() {
    let options = ParseOptions {
        resolve_constants: false,
        ..Default::default()
    };
    let root = parse_document("t.txt", "@pi = 3.14\na = @pi", &options).unwrap();
    assert_eq!(leaf_value(&root, "a"), Value::String("@pi".to_string()));
}

#[test]
fn test_collect_constants() {
    let root = unresolved("@a = 1\nblock = { @b = town }\n@a = 2\nplain = 3");
    let constants = collect_constants(&root);

    assert_eq!(constants.len(), 2);
    assert_eq!(constants["@a"], Value::Int(2));
    assert_eq!(constants["@b"], Value::String("town".to_string()));
    assert!(!constants.contains_key("plain"));
}
