//! Tests for the JSON projection of trees.
#![cfg(feature = "serde")]

use idforest::{Identify, InsertAs, Tree};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
struct Item {
    #[serde(skip)]
    id: Uuid,
    name: &'static str,
}

impl Identify for Item {
    type Identity = Uuid;

    fn identity(&self) -> Option<Uuid> {
        Some(self.id)
    }
}

fn item(name: &'static str) -> Item {
    Item {
        id: Uuid::new_v4(),
        name,
    }
}

#[test]
fn nested_projection() {
    let [a, b, c, d] = ["a", "b", "c", "d"].map(item);
    let mut tree = Tree::from_roots([a.clone(), d.clone()]).expect("distinct roots");
    tree.add(b.clone(), InsertAs::LastChildOf(&a)).expect("a exists");
    tree.add(c.clone(), InsertAs::LastChildOf(&b)).expect("b exists");

    let value = serde_json::to_value(&tree).expect("serialization never fails for JSON");
    let expected = json!({
        "roots": [
            {
                "element": { "name": "a" },
                "children": [
                    {
                        "element": { "name": "b" },
                        "children": [
                            { "element": { "name": "c" }, "children": [] }
                        ]
                    }
                ]
            },
            { "element": { "name": "d" }, "children": [] }
        ]
    });
    assert_eq!(value, expected);
}

#[test]
fn empty_tree_projection() {
    let tree = Tree::<Item>::new();
    let text = serde_json::to_string(&tree).expect("serialization never fails for JSON");
    assert_eq!(text, r#"{"roots":[]}"#);
}

#[test]
fn node_projection() {
    let [a, b] = ["a", "b"].map(item);
    let mut tree = Tree::from_roots([a.clone()]).expect("single root");
    tree.add(b.clone(), InsertAs::LastChildOf(&a)).expect("a exists");

    let node = tree.node(&b).expect("b is a member");
    let value = serde_json::to_value(node).expect("serialization never fails for JSON");
    assert_eq!(value, json!({ "element": { "name": "b" }, "children": [] }));
}
