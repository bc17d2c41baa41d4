//! Property tests for component tree aggregation.

use proptest::prelude::*;

use kitbash::{ComponentTree, NodeId};

/// Shape of a generated tree: a leaf, or a composite with children.
#[derive(Debug, Clone)]
enum Shape {
    Leaf,
    Composite(Vec<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = Just(Shape::Leaf);
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            Just(Shape::Leaf),
            proptest::collection::vec(inner, 0..4).prop_map(Shape::Composite),
        ]
    })
}

/// Build `shape` into `tree`, returning the root and the expected pre-order labels.
fn build(
    tree: &ComponentTree,
    shape: &Shape,
    next: &mut usize,
    labels: &mut Vec<String>,
) -> NodeId {
    let label = format!("n{}", next);
    *next += 1;
    labels.push(label.clone());
    match shape {
        Shape::Leaf => tree.new_leaf(label),
        Shape::Composite(children) => {
            let node = tree.new_composite(label);
            for child in children {
                let child_id = build(tree, child, next, labels);
                tree.add_child(node, child_id).unwrap();
            }
            node
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: operate() is the pre-order labels joined by the separator.
    #[test]
    fn property_operate_is_pre_order(shape in shape()) {
        let tree = ComponentTree::with_separator("|");
        let mut labels = Vec::new();
        let root = build(&tree, &shape, &mut 0, &mut labels);

        prop_assert_eq!(tree.operate(root).unwrap(), labels.join("|"));
    }

    /// PROPERTY: folding leaves counts exactly the generated leaves.
    #[test]
    fn property_fold_counts_leaves(shape in shape()) {
        fn leaves(shape: &Shape) -> usize {
            match shape {
                Shape::Leaf => 1,
                Shape::Composite(children) => children.iter().map(leaves).sum(),
            }
        }

        let tree = ComponentTree::new();
        let root = build(&tree, &shape, &mut 0, &mut Vec::new());
        let counted = tree
            .fold(root, |_| 1usize, |_, children| children.into_iter().sum())
            .unwrap();

        prop_assert_eq!(counted, leaves(&shape));
    }

    /// PROPERTY: linking the root under any of its descendants is always rejected.
    #[test]
    fn property_descendant_cannot_adopt_root(shape in shape()) {
        let tree = ComponentTree::new();
        let root = build(&tree, &shape, &mut 0, &mut Vec::new());
        let before = tree.operate(root).unwrap();

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if tree.is_composite(node).unwrap() {
                prop_assert!(tree.add_child(node, root).is_err());
                stack.extend(tree.children(node).unwrap());
            }
        }

        prop_assert_eq!(tree.operate(root).unwrap(), before);
    }
}
