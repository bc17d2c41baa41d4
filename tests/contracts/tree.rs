//! Component tree contracts

use std::sync::{Arc, Barrier};
use std::thread;

use kitbash::{ComponentTree, KitError};

/// CONTRACT: no node is ever its own ancestor, and a rejected link changes nothing.
#[test]
fn contract_cycles_are_rejected() {
    let tree = ComponentTree::new();
    let a = tree.new_composite("a");
    let b = tree.new_composite("b");
    let c = tree.new_composite("c");
    tree.add_child(a, b).unwrap();
    tree.add_child(b, c).unwrap();

    for (parent, child) in [(a, a), (c, a), (c, b), (b, a)] {
        let err = tree.add_child(parent, child).unwrap_err();
        assert!(matches!(err, KitError::Cycle { .. }), "expected cycle, got {err}");
    }

    assert_eq!(tree.operate(a).unwrap(), "a\nb\nc");
    assert!(tree.children(c).unwrap().is_empty());
}

/// CONTRACT: a composite aggregates itself first, then children in insertion order.
#[test]
fn contract_aggregation_is_pre_order() {
    let tree = ComponentTree::with_separator(",");
    let root = tree.new_composite("root");
    let inner = tree.new_composite("inner");
    let (x, y, z) = (tree.new_leaf("x"), tree.new_leaf("y"), tree.new_leaf("z"));

    tree.add_child(root, z).unwrap();
    tree.add_child(inner, x).unwrap();
    tree.add_child(inner, y).unwrap();
    tree.add_child(root, inner).unwrap();

    assert_eq!(tree.operate(root).unwrap(), "root,z,inner,x,y");
}

/// CONTRACT: a traversal racing a mutation sees the tree before or after it, never between.
#[test]
fn contract_operate_sees_a_consistent_snapshot() {
    const READERS: usize = 4;
    const ROUNDS: usize = 200;

    let tree = Arc::new(ComponentTree::new());
    let root = tree.new_composite("root");
    let a = tree.new_leaf("a");
    let b = tree.new_leaf("b");
    tree.add_child(root, a).unwrap();
    let barrier = Arc::new(Barrier::new(READERS + 1));

    let writer = {
        let tree = Arc::clone(&tree);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                tree.add_child(root, b).unwrap();
                tree.remove_child(root, b).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let tree = Arc::clone(&tree);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..ROUNDS)
                    .map(|_| tree.operate(root).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        for seen in reader.join().unwrap() {
            assert!(seen == "root\na" || seen == "root\na\nb", "torn read: {seen:?}");
        }
    }
    assert_eq!(tree.operate(root).unwrap(), "root\na");
}
