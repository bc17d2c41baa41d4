//! Scenario: Org Chart
//!
//! Journey: departments (composites) hold people (leaves); one person sits
//! in two departments. The chart is rendered, reorganized and re-rendered.

use kitbash::ComponentTree;

#[test]
fn scenario_render_and_reorganize() {
    let tree = ComponentTree::new();
    let company = tree.new_composite("Company");
    let eng = tree.new_composite("Engineering");
    let ops = tree.new_composite("Operations");
    let ada = tree.new_leaf("Ada");
    let grace = tree.new_leaf("Grace");

    tree.add_child(company, eng).unwrap();
    tree.add_child(company, ops).unwrap();
    tree.add_child(eng, ada).unwrap();
    tree.add_child(eng, grace).unwrap();
    tree.add_child(ops, grace).unwrap();

    assert_eq!(
        tree.operate(company).unwrap(),
        "Company\nEngineering\nAda\nGrace\nOperations\nGrace"
    );

    tree.remove_child(eng, grace).unwrap();

    assert_eq!(
        tree.operate(company).unwrap(),
        "Company\nEngineering\nAda\nOperations\nGrace"
    );
    assert_eq!(tree.parents(grace), vec![ops]);
}

#[test]
fn scenario_leaf_shared_by_two_composites() {
    let tree = ComponentTree::new();
    let leaf_one = tree.new_leaf("Leaf 1");
    let leaf_two = tree.new_leaf("Leaf 2");
    let first = tree.new_composite("Composite 1");
    let second = tree.new_composite("Composite 2");

    tree.add_child(first, leaf_one).unwrap();
    tree.add_child(second, leaf_one).unwrap();
    tree.add_child(second, leaf_two).unwrap();

    assert_eq!(tree.operate(first).unwrap(), "Composite 1\nLeaf 1");
    assert_eq!(tree.operate(second).unwrap(), "Composite 2\nLeaf 1\nLeaf 2");
}
