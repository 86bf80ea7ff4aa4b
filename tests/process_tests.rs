// tests/process_tests.rs

use paradox_script::{
    parse, process, Child, KeyValueItem, Leaf, Location, Node, Operator, Position, ProcessError,
    Statement, Value,
};

const TEXT: &str = "# comment1
key1 = value1
node1 = {
    key2 = value2
}
";

fn create_node() -> Node {
    build("123.txt", TEXT)
}

fn build(file_name: &str, text: &str) -> Node {
    process(file_name, "123", parse(file_name, text).unwrap()).unwrap()
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_leaves() {
    let root = create_node();
    assert_eq!(root.leaves().count(), 1);
    assert_eq!(root.nodes().count(), 1);
    assert_eq!(root.len(), 3);
}

#[test]
fn test_get_leaf() {
    let root = create_node();

    let leaf = root.leaf("key1").unwrap();
    assert_eq!(leaf.value().to_raw_string(), "value1");

    assert!(root.leaf("notKey").is_none());
}

#[test]
fn test_get_child_node() {
    let root = create_node();

    assert!(root.child("key1").is_none());

    let node = root.child("node1").unwrap();
    assert_eq!(node.key(), "node1");
    assert_eq!(node.leaf("key2").unwrap().value_text(), "value2");
}

#[test]
fn test_leaf_lookup_skips_nodes_with_same_key() {
    let root = build("t.txt", "dup = { a = 1 }\ndup = 2");
    assert_eq!(root.leaf("dup").unwrap().value().as_int(), Some(2));
    assert_eq!(root.child("dup").unwrap().len(), 1);
    assert_eq!(root.tag_positions("dup"), &[0, 1]);
}

#[test]
fn test_comments() {
    let root = create_node();
    let comments: Vec<&str> = root.comments().map(|c| c.text()).collect();
    assert_eq!(comments, vec![" comment1"]);
    assert_eq!(root.comments().next().unwrap().position().start, Location::new(1, 1));
}

#[test]
fn test_comments_attach_to_following_statement() {
    let root = create_node();

    let above_key1: Vec<&str> = root.leading_comments(1).map(|c| c.text()).collect();
    assert_eq!(above_key1, vec![" comment1"]);
    assert_eq!(root.leading_comments(2).count(), 0);
    assert_eq!(root.leading_comments(0).count(), 0);
}

#[test]
fn test_several_leading_comments() {
    let root = build("t.txt", "a = 1\n# one\n# two\nb = 2");
    let above_b: Vec<&str> = root.leading_comments(3).map(|c| c.text()).collect();
    assert_eq!(above_b, vec![" one", " two"]);
}

#[test]
fn test_nested_comments_are_recoverable() {
    let root = build("t.txt", "a = {\n  # inner\n  b = { # deeper\n  }\n}");
    let a = root.child("a").unwrap();
    assert_eq!(a.comments().next().unwrap().text(), " inner");
    assert_eq!(a.child("b").unwrap().comments().next().unwrap().text(), " deeper");
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_root_identity() {
    let root = create_node();
    assert_eq!(root.key(), "123.txt");
    assert_eq!(&*root.position().file, "123");
}

#[test]
fn test_child_positions_name_the_file() {
    let root = create_node();
    let leaf = root.leaf("key1").unwrap();
    assert_eq!(&*leaf.position().file, "123.txt");
    assert_eq!(leaf.position().start, Location::new(2, 1));
}

#[test]
fn test_node_keeps_operator() {
    let root = build("t.txt", "limit > { a = 1 }");
    assert_eq!(root.child("limit").unwrap().operator(), Operator::GreaterThan);
}

#[test]
fn test_value_list_children() {
    let root = build("t.txt", "provinces = { 1004 1139 1603 }");
    let provinces = root.child("provinces").unwrap();
    let values: Vec<i64> = provinces
        .leaf_values()
        .filter_map(|v| v.value().as_int())
        .collect();
    assert_eq!(values, vec![1004, 1139, 1603]);
    assert!(provinces.tag_index().is_empty());
}

#[test]
fn test_anonymous_blocks_become_unnamed_nodes() {
    let root = build("t.txt", "x = { { 1 2 } { 3 } }");
    let x = root.child("x").unwrap();
    let blocks: Vec<&Node> = x.children_with_key("").collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].leaf_values().count(), 2);
    assert_eq!(blocks[1].leaf_values().count(), 1);
}

#[test]
fn test_duplicate_keys_keep_order() {
    let root = build(
        "t.txt",
        "set_province_controller = 1004\nowner = JAP\nset_province_controller = 1139",
    );

    assert_eq!(root.tag_positions("set_province_controller"), &[0, 2]);
    let values: Vec<String> = root
        .leaves_with_key("set_province_controller")
        .map(|l| l.value_text())
        .collect();
    assert_eq!(values, vec!["1004", "1139"]);
}

#[test]
fn test_index_consistent_after_processing() {
    fn check(node: &Node) {
        assert!(node.tag_index().is_consistent_with(node.children()), "index of {}", node.key());
        node.nodes().for_each(check);
    }

    check(&build(
        "t.txt",
        "# c\na = 1\nb = { c = 2 c = { d = 3 } 7 }\na = 2\n{ e = 4 }\n",
    ));
}

#[test]
fn test_statements_built_by_hand() {
    let statements = vec![
        Statement::Comment {
            position: Position::zero(),
            text: " made by hand".to_string(),
        },
        Statement::KeyValue {
            position: Position::zero(),
            item: KeyValueItem::new("size", Value::Int(3), Operator::LessThan),
        },
    ];

    let root = process("hand", "hand", statements).unwrap();
    assert_eq!(root.leaf("size").unwrap().operator(), Operator::LessThan);
    assert_eq!(root.comments().count(), 1);
}

#[test]
fn test_empty_key_fails_fast() {
    let bad = Position::new(
        "hand".into(),
        Location::new(4, 2),
        Location::new(4, 7),
    );
    let statements = vec![Statement::Value {
        position: Position::zero(),
        value: Value::Clause(vec![Statement::KeyValue {
            position: bad.clone(),
            item: KeyValueItem::new("", Value::Int(1), Operator::Equals),
        }]),
    }];

    let err = process("hand", "hand", statements).unwrap_err();
    assert_eq!(err, ProcessError::EmptyKey { position: bad });

    let err = err.into_parser_error("hand");
    assert_eq!((err.line, err.column), (4, 2));
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_add_child() {
    let mut node = create_node();
    node.add_child(Leaf::create(
        KeyValueItem::new("addKey", Value::Int(1), Operator::Equals),
        Position::zero(),
    ));

    let leaf = node.leaf("addKey").unwrap();
    assert_eq!(leaf.value().to_raw_string(), "1");
    assert!(leaf.value().is_int());
}

#[test]
fn test_add_child_helpers() {
    let mut node = Node::new("root");
    assert_eq!(node.add_child(Child::leaf("i", 1)), 0);
    assert_eq!(node.add_child(Child::leaf("b", true)), 1);
    assert_eq!(node.add_child(Child::leaf("s", "town")), 2);
    assert_eq!(node.add_child(Child::leaf("q", Value::qstring("Two Words"))), 3);
    assert_eq!(node.add_child(Child::leaf_with("g", 5, Operator::GreaterThanOrEqual)), 4);
    assert_eq!(node.add_child(Child::node("n")), 5);

    assert_eq!(node.leaf("b").unwrap().value_text(), "yes");
    assert_eq!(node.leaf("q").unwrap().value().to_string(), "\"Two Words\"");
    assert_eq!(node.leaf("g").unwrap().operator(), Operator::GreaterThanOrEqual);
    assert!(node.child("n").unwrap().is_empty());
}

#[test]
fn test_set_leaf_value_in_place() {
    let mut root = create_node();

    assert!(root.set_leaf_value("key1", Value::qstring("new value")));

    let leaf = root.leaf("key1").unwrap();
    assert_eq!(leaf.value_text(), "new value");
    assert_eq!(leaf.key(), "key1");
    assert_eq!(leaf.operator(), Operator::Equals);
    assert_eq!(leaf.position().start, Location::new(2, 1));
    assert_eq!(root.tag_positions("key1"), &[1]);

    assert!(!root.set_leaf_value("missing", 1));
    assert!(!root.set_leaf_value("node1", 1));
}

#[test]
fn test_nested_mutation_through_child_mut() {
    let mut root = create_node();
    let node1 = root.child_mut("node1").unwrap();
    node1.add_child(Child::leaf("key3", 3));
    node1.leaf_mut("key2").unwrap().set_value(2);

    let node1 = root.child("node1").unwrap();
    assert_eq!(node1.leaf("key2").unwrap().value().as_int(), Some(2));
    assert_eq!(node1.tag_positions("key3"), &[1]);
}
