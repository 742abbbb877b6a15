//! Tests to ensure merged roots land contiguously at the requested place.

use std::collections::HashMap;

use idforest::{DftEvent, Identify, InsertAs, Tree, TreeError};
use rstest::rstest;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Item {
    id: Uuid,
    label: &'static str,
}

impl Identify for Item {
    type Identity = Uuid;

    fn identity(&self) -> Option<Uuid> {
        Some(self.id)
    }
}

/// Trees to merge and the elements by label.
struct Fixture {
    /// Target tree.
    tree: Tree<Item>,
    /// Tree to be merged.
    other: Tree<Item>,
    /// Elements of both trees.
    items: HashMap<&'static str, Item>,
}

/// Returns the fixture.
///
/// Target tree:
///
/// ```text
/// r0
/// r1
/// |-- c0
/// |-- c1
/// `-- c2
/// r2
/// ```
///
/// Tree to be merged:
///
/// ```text
/// x
/// `-- x0
/// y
/// ```
fn fixture() -> Fixture {
    let items: HashMap<_, _> = ["r0", "r1", "r2", "c0", "c1", "c2", "x", "x0", "y"]
        .into_iter()
        .map(|label| {
            let id = Uuid::new_v4();
            (label, Item { id, label })
        })
        .collect();
    let get = |label: &str| items[label].clone();

    let mut tree = Tree::from_roots([get("r0"), get("r1"), get("r2")])
        .expect("should never fail: distinct roots");
    for child in ["c0", "c1", "c2"] {
        tree.add(get(child), InsertAs::LastChildOf(&items["r1"]))
            .expect("should never fail: r1 exists");
    }

    let mut other =
        Tree::from_roots([get("x"), get("y")]).expect("should never fail: distinct roots");
    other
        .add(get("x0"), InsertAs::LastChildOf(&items["x"]))
        .expect("should never fail: x exists");

    Fixture { tree, other, items }
}

/// Returns the forest in the `a b(c d)` form.
fn outline(tree: &Tree<Item>) -> String {
    let mut out = String::new();
    for ev in tree.depth_first_traverse() {
        match ev {
            DftEvent::Open(node) => {
                if !out.is_empty() && !out.ends_with('(') {
                    out.push(' ');
                }
                out.push_str(node.element().label);
                if node.children().len() != 0 {
                    out.push('(');
                }
            }
            DftEvent::Close(node) => {
                if node.children().len() != 0 {
                    out.push(')');
                }
            }
        }
    }
    out
}

#[rstest]
#[case::before_middle_root(InsertAs::PreviousSiblingOf("r1"), "r0 x(x0) y r1(c0 c1 c2) r2", None)]
#[case::after_middle_root(InsertAs::NextSiblingOf("r1"), "r0 r1(c0 c1 c2) x(x0) y r2", None)]
#[case::before_first_root(InsertAs::PreviousSiblingOf("r0"), "x(x0) y r0 r1(c0 c1 c2) r2", None)]
#[case::after_last_root(InsertAs::NextSiblingOf("r2"), "r0 r1(c0 c1 c2) r2 x(x0) y", None)]
#[case::last_root(InsertAs::LastRoot, "r0 r1(c0 c1 c2) r2 x(x0) y", None)]
#[case::before_middle_child(InsertAs::PreviousSiblingOf("c1"), "r0 r1(c0 x(x0) y c1 c2) r2", Some("r1"))]
#[case::after_last_child(InsertAs::NextSiblingOf("c2"), "r0 r1(c0 c1 c2 x(x0) y) r2", Some("r1"))]
#[case::first_child(InsertAs::FirstChildOf("r1"), "r0 r1(x(x0) y c0 c1 c2) r2", Some("r1"))]
#[case::last_child(InsertAs::LastChildOf("r1"), "r0 r1(c0 c1 c2 x(x0) y) r2", Some("r1"))]
#[case::under_leaf(InsertAs::LastChildOf("c0"), "r0 r1(c0(x(x0) y) c1 c2) r2", Some("c0"))]
fn merge_places_roots_contiguously(
    #[case] dest: InsertAs<&'static str>,
    #[case] expected: &str,
    #[case] expected_parent: Option<&str>,
) {
    let Fixture {
        mut tree,
        other,
        items,
    } = fixture();
    tree.merge(&other, dest.map(|label| &items[label]))
        .expect("should succeed");

    assert_eq!(outline(&tree), expected);
    for root in ["x", "y"] {
        let parent = tree.parent(&items[root]).expect("merged roots are members");
        assert_eq!(parent.map(|p| p.label), expected_parent);
    }
    // Non-root members keep their parent from the merged tree.
    let x0_parent = tree.parent(&items["x0"]).expect("x0 is a member");
    assert_eq!(x0_parent.map(|p| p.label), Some("x"));
    assert_eq!(tree.validate(), Ok(()));
}

#[rstest]
fn merge_leaves_other_untouched() {
    let Fixture {
        mut tree,
        other,
        items,
    } = fixture();
    tree.merge(&other, InsertAs::FirstChildOf(&items["c1"]))
        .expect("should succeed");

    assert_eq!(outline(&other), "x(x0) y");
    assert_eq!(other.parent(&items["x"]), Ok(None));
    assert_eq!(other.validate(), Ok(()));
}

#[rstest]
fn merge_empty_tree_is_noop() {
    let Fixture {
        mut tree, items, ..
    } = fixture();
    tree.merge(&Tree::new(), InsertAs::NextSiblingOf(&items["c0"]))
        .expect("should succeed");
    assert_eq!(outline(&tree), "r0 r1(c0 c1 c2) r2");
}

#[rstest]
fn failed_merge_keeps_structure() {
    let Fixture {
        mut tree,
        mut other,
        items,
    } = fixture();
    other
        .add(items["c2"].clone(), InsertAs::LastChildOf(&items["x0"]))
        .expect("c2 is new to the other tree");

    let result = tree.merge(&other, InsertAs::FirstChildOf(&items["r0"]));
    assert!(matches!(result, Err(TreeError::DuplicateElement(_))));
    assert_eq!(outline(&tree), "r0 r1(c0 c1 c2) r2");
    assert!(!tree.contains(&items["x"]));
}

#[rstest]
#[case::root("r1", "r0 r2", "r1(c0 c1 c2)")]
#[case::middle_child("c1", "r0 r1(c0 c2) r2", "c1")]
#[case::leaf_root("r2", "r0 r1(c0 c1 c2)", "r2")]
fn prune_detaches_whole_subtree(
    #[case] target: &str,
    #[case] expected_rest: &str,
    #[case] expected_pruned: &str,
) {
    let Fixture {
        mut tree, items, ..
    } = fixture();
    let before = tree.len();

    let pruned = tree.prune(&items[target]).expect("should succeed");
    assert_eq!(outline(&tree), expected_rest);
    assert_eq!(outline(&pruned), expected_pruned);
    assert_eq!(tree.len() + pruned.len(), before);
    assert_eq!(pruned.parent(&items[target]), Ok(None));
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(pruned.validate(), Ok(()));
}
