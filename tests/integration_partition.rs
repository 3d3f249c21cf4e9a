use std::collections::BTreeSet;

use snapgrid::layout::{PartitionTree, Region, RegionKind};
use snapgrid::{Edge, LayoutError, Point, Rect, RegionId, Size};

fn tree() -> PartitionTree<u32> {
    PartitionTree::new(Size::new(1200.0, 800.0))
}

/// Shape of a tree without ids: nested (rect, occupant) pairs.
#[derive(Debug, PartialEq)]
enum Shape {
    Leaf(Rect, Option<u32>),
    Split(Rect, Box<Shape>, Box<Shape>),
}

fn shape(tree: &PartitionTree<u32>, id: RegionId) -> Shape {
    let region: &Region<u32> = tree.region(id).unwrap();
    match region.kind {
        RegionKind::Leaf { occupant } => Shape::Leaf(region.rect, occupant),
        RegionKind::Internal { first, second, .. } => Shape::Split(
            region.rect,
            Box::new(shape(tree, first)),
            Box::new(shape(tree, second)),
        ),
    }
}

fn check_children_partition(tree: &PartitionTree<u32>) {
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let region = tree.region(id).unwrap();
        if let Some((first, second)) = region.children() {
            let a = tree.rect(first).unwrap();
            let b = tree.rect(second).unwrap();
            assert!(!a.intersects(&b), "children of {id:?} overlap");
            assert!(a.union(&b).approx_eq(&region.rect), "children of {id:?} do not cover it");
            assert_eq!(tree.parent(first), Some(id));
            assert_eq!(tree.parent(second), Some(id));
            stack.extend([first, second]);
        }
    }
}

/// Builds a deeper tree: 1 left of root, 2 bottom of 1's leaf, 3 right of
/// the remaining empty leaf.
fn populated() -> PartitionTree<u32> {
    let t = tree();
    let s1 = t.split(t.root(), Edge::Left, 1).unwrap();
    let s2 = s1.tree.split(s1.occupied, Edge::Bottom, 2).unwrap();
    let s3 = s2.tree.split(s1.inherited, Edge::Right, 3).unwrap();
    s3.tree
}

#[test]
fn occupants_are_unique_across_leaves() {
    let t = populated();
    let occupants: Vec<u32> = t.leaves().iter().filter_map(|l| l.occupant()).collect();
    let unique: BTreeSet<u32> = occupants.iter().copied().collect();
    assert_eq!(occupants.len(), unique.len());
    assert_eq!(unique, BTreeSet::from([1, 2, 3]));
    assert!(t.validate().is_ok());
}

#[test]
fn children_are_disjoint_and_cover_parent() {
    check_children_partition(&populated());
}

#[test]
fn split_then_merge_restores_shape() {
    let base = populated();
    let before = shape(&base, base.root());
    for leaf in base.leaves().iter().map(|l| l.id) {
        for edge in Edge::PRIORITY {
            let split = base.split(leaf, edge, 99).unwrap();
            let merged = split.tree.merge(split.occupied).unwrap();
            assert_eq!(merged.merged, leaf);
            assert_eq!(shape(&merged.tree, merged.tree.root()), before);
            assert_eq!(merged.tree.len(), base.len());
        }
    }
}

#[test]
fn locate_finds_the_unique_leaf() {
    let t = populated();
    for leaf in t.leaves() {
        let r = leaf.rect;
        let center = Point::new(r.x + r.width / 2.0, r.y + r.height / 2.0);
        assert_eq!(t.locate(center), Some(leaf.id));
        assert_eq!(t.locate(r.origin()), Some(leaf.id));
    }
    assert_eq!(t.locate(Point::new(1200.0, 10.0)), None);
    assert_eq!(t.locate(Point::new(-1.0, 10.0)), None);
}

#[test]
fn merging_next_to_subtree_promotes_it() {
    let t = populated();
    let leaf_1 = t.leaf_of(1).unwrap();
    let leaf_2 = t.leaf_of(2).unwrap();
    // 2's sibling is 1's leaf; 1's leaf's parent is a left-column split
    let column = t.parent(leaf_1).unwrap();
    let merged = t.merge(leaf_2).unwrap();
    assert_eq!(merged.merged, column);
    assert_eq!(merged.tree.occupant(column), Some(1));

    // now drop the whole left column: the right subtree fills the root
    let after = merged.tree.merge(column).unwrap();
    let root = after.tree.root();
    assert_eq!(after.merged, root);
    let rects: Vec<Rect> = after.tree.leaves().iter().map(|l| l.rect).collect();
    assert_eq!(
        rects,
        vec![
            Rect::new(0.0, 0.0, 600.0, 800.0),
            Rect::new(600.0, 0.0, 600.0, 800.0)
        ]
    );
    check_children_partition(&after.tree);
    assert!(after.tree.validate().is_ok());
}

#[test]
fn structural_errors_are_typed() {
    let t = populated();
    let root = t.root();
    assert_eq!(t.merge(root).unwrap_err(), LayoutError::NotALeaf(root));
    assert!(matches!(
        t.split(root, Edge::Left, 7),
        Err(LayoutError::NotALeaf(_))
    ));
    let single = tree();
    assert_eq!(
        single.merge(single.root()).unwrap_err(),
        LayoutError::RootHasNoSibling(single.root())
    );
}

#[test]
fn operations_leave_source_tree_untouched() {
    let t = populated();
    let before = shape(&t, t.root());
    let leaf = t.leaf_of(3).unwrap();
    let _ = t.split(leaf, Edge::Top, 4).unwrap();
    let _ = t.merge(leaf).unwrap();
    let _ = t.vacate(leaf).unwrap();
    let _ = t.relayout(Size::new(10.0, 10.0));
    assert_eq!(shape(&t, t.root()), before);
}
