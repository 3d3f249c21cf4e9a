//! Binary space partition of the viewport into regions.
//!
//! Regions live in an arena keyed by [`RegionId`]; parent and child links are
//! ids rather than owned pointers. Every mutating operation takes `&self` and
//! returns a fresh tree, so callers swap whole snapshots instead of editing in
//! place.

use std::collections::{BTreeMap, BTreeSet};

use super::{Edge, SplitAxis};
use crate::error::LayoutError;
use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u64);

impl RegionId {
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionKind<W: Copy + Eq + Ord> {
    Leaf {
        occupant: Option<W>,
    },
    /// Always exactly two children, ordered left-to-right or top-to-bottom.
    Internal {
        axis: SplitAxis,
        first: RegionId,
        second: RegionId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region<W: Copy + Eq + Ord> {
    pub id: RegionId,
    pub rect: Rect,
    pub parent: Option<RegionId>,
    pub kind: RegionKind<W>,
}

impl<W: Copy + Eq + Ord> Region<W> {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, RegionKind::Leaf { .. })
    }

    pub fn occupant(&self) -> Option<W> {
        match self.kind {
            RegionKind::Leaf { occupant } => occupant,
            RegionKind::Internal { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(RegionId, RegionId)> {
        match self.kind {
            RegionKind::Internal { first, second, .. } => Some((first, second)),
            RegionKind::Leaf { .. } => None,
        }
    }
}

/// Result of [`PartitionTree::split`].
#[derive(Debug, Clone)]
pub struct SplitOutcome<W: Copy + Eq + Ord> {
    pub tree: PartitionTree<W>,
    /// Leaf on the requested edge, holding the new occupant.
    pub occupied: RegionId,
    /// Leaf that inherited the original occupant, if there was one.
    pub inherited: RegionId,
}

/// Result of [`PartitionTree::merge`].
#[derive(Debug, Clone)]
pub struct MergeOutcome<W: Copy + Eq + Ord> {
    pub tree: PartitionTree<W>,
    /// The former parent, now covering the merged area.
    pub merged: RegionId,
}

#[derive(Debug, Clone)]
pub struct PartitionTree<W: Copy + Eq + Ord> {
    regions: BTreeMap<RegionId, Region<W>>,
    root: RegionId,
    next_id: u64,
}

impl<W: Copy + Eq + Ord> PartitionTree<W> {
    /// A tree made of a single empty root leaf covering `viewport`.
    pub fn new(viewport: Size) -> Self {
        let root = RegionId(1);
        let mut regions = BTreeMap::new();
        regions.insert(
            root,
            Region {
                id: root,
                rect: Rect::from_size(viewport),
                parent: None,
                kind: RegionKind::Leaf { occupant: None },
            },
        );
        Self {
            regions,
            root,
            next_id: 2,
        }
    }

    pub fn root(&self) -> RegionId {
        self.root
    }

    pub fn root_rect(&self) -> Rect {
        self.rect(self.root).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region<W>> {
        self.regions.get(&id)
    }

    pub fn rect(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(&id).map(|region| region.rect)
    }

    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.regions.get(&id)?.parent
    }

    pub fn is_root(&self, id: RegionId) -> bool {
        id == self.root
    }

    pub fn is_leaf(&self, id: RegionId) -> bool {
        self.regions.get(&id).is_some_and(Region::is_leaf)
    }

    pub fn occupant(&self, id: RegionId) -> Option<W> {
        self.regions.get(&id)?.occupant()
    }

    pub fn sibling(&self, id: RegionId) -> Option<RegionId> {
        let parent = self.parent(id)?;
        let (first, second) = self.regions.get(&parent)?.children()?;
        if first == id { Some(second) } else { Some(first) }
    }

    /// Leaves in depth-first order, first child before second.
    pub fn leaves(&self) -> Vec<&Region<W>> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(region) = self.regions.get(&id) else {
                continue;
            };
            match region.kind {
                RegionKind::Leaf { .. } => out.push(region),
                RegionKind::Internal { first, second, .. } => {
                    stack.push(second);
                    stack.push(first);
                }
            }
        }
        out
    }

    pub fn leaf_of(&self, occupant: W) -> Option<RegionId> {
        self.regions
            .values()
            .find(|region| region.occupant() == Some(occupant))
            .map(|region| region.id)
    }

    /// Descends from the root towards the leaf containing `point`.
    ///
    /// Returns `None` when the point is outside the root, or when a root-only
    /// resize left part of the root uncovered by its children.
    pub fn locate(&self, point: Point) -> Option<RegionId> {
        let mut current = self.regions.get(&self.root)?;
        if !current.rect.contains(point) {
            return None;
        }
        loop {
            let (first, second) = match current.kind {
                RegionKind::Leaf { .. } => return Some(current.id),
                RegionKind::Internal { first, second, .. } => (first, second),
            };
            current = [first, second]
                .into_iter()
                .filter_map(|id| self.regions.get(&id))
                .find(|child| child.rect.contains(point))?;
        }
    }

    /// Halves `leaf` along the axis implied by `edge`. The half against
    /// `edge` receives `occupant`, the other half keeps whatever occupied the
    /// leaf before.
    pub fn split(
        &self,
        leaf: RegionId,
        edge: Edge,
        occupant: W,
    ) -> Result<SplitOutcome<W>, LayoutError> {
        let region = self
            .regions
            .get(&leaf)
            .ok_or(LayoutError::UnknownRegion(leaf))?;
        let RegionKind::Leaf { occupant: previous } = region.kind else {
            return Err(LayoutError::NotALeaf(leaf));
        };
        let axis = edge.axis();
        let (first_rect, second_rect) = region.rect.split_along(axis);

        let mut next = self.clone();
        let first = next.alloc_id();
        let second = next.alloc_id();
        let (occupied, inherited) = if edge.is_leading() {
            (first, second)
        } else {
            (second, first)
        };
        for (id, rect) in [(first, first_rect), (second, second_rect)] {
            let occupant = if id == occupied {
                Some(occupant)
            } else {
                previous
            };
            next.regions.insert(
                id,
                Region {
                    id,
                    rect,
                    parent: Some(leaf),
                    kind: RegionKind::Leaf { occupant },
                },
            );
        }
        if let Some(region) = next.regions.get_mut(&leaf) {
            region.kind = RegionKind::Internal {
                axis,
                first,
                second,
            };
        }
        Ok(SplitOutcome {
            tree: next,
            occupied,
            inherited,
        })
    }

    /// Collapses `leaf` and its sibling back into their parent.
    ///
    /// A leaf sibling hands its occupant to the merged region. An internal
    /// sibling is promoted wholesale: its subtree takes the parent's place and
    /// is re-laid out to fill the parent's rectangle.
    pub fn merge(&self, leaf: RegionId) -> Result<MergeOutcome<W>, LayoutError> {
        let region = self
            .regions
            .get(&leaf)
            .ok_or(LayoutError::UnknownRegion(leaf))?;
        if !region.is_leaf() {
            return Err(LayoutError::NotALeaf(leaf));
        }
        let parent = region.parent.ok_or(LayoutError::RootHasNoSibling(leaf))?;
        let sibling = self
            .sibling(leaf)
            .ok_or(LayoutError::RootHasNoSibling(leaf))?;
        let sibling_kind = self
            .regions
            .get(&sibling)
            .map(|region| region.kind.clone())
            .ok_or(LayoutError::UnknownRegion(sibling))?;
        let parent_rect = self
            .rect(parent)
            .ok_or(LayoutError::UnknownRegion(parent))?;

        let mut next = self.clone();
        next.regions.remove(&leaf);
        next.regions.remove(&sibling);
        if let RegionKind::Internal { first, second, .. } = sibling_kind {
            for child in [first, second] {
                if let Some(region) = next.regions.get_mut(&child) {
                    region.parent = Some(parent);
                }
            }
        }
        if let Some(region) = next.regions.get_mut(&parent) {
            region.kind = sibling_kind;
        }
        next.layout_subtree(parent, parent_rect);
        Ok(MergeOutcome {
            tree: next,
            merged: parent,
        })
    }

    /// Replaces the root rectangle only; descendants keep their geometry.
    pub fn resize(&self, viewport: Size) -> Self {
        let mut next = self.clone();
        if let Some(root) = next.regions.get_mut(&next.root) {
            root.rect = Rect::from_size(viewport);
        }
        next
    }

    /// Re-lays out every region inside a new root rectangle, keeping each
    /// split an equal halving.
    pub fn relayout(&self, viewport: Size) -> Self {
        let mut next = self.clone();
        next.layout_subtree(next.root, Rect::from_size(viewport));
        next
    }

    /// Clears the occupant of `leaf`, leaving the structure untouched.
    pub fn vacate(&self, leaf: RegionId) -> Result<Self, LayoutError> {
        let mut next = self.clone();
        let region = next
            .regions
            .get_mut(&leaf)
            .ok_or(LayoutError::UnknownRegion(leaf))?;
        match &mut region.kind {
            RegionKind::Leaf { occupant } => {
                *occupant = None;
                Ok(next)
            }
            RegionKind::Internal { .. } => Err(LayoutError::NotALeaf(leaf)),
        }
    }

    /// Checks every structural invariant, reporting the first violation.
    ///
    /// A tree resized with [`PartitionTree::resize`] intentionally fails the
    /// covering check until it is re-laid out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invariant = |region: RegionId, reason: &str| LayoutError::Invariant {
            region,
            reason: reason.to_string(),
        };
        let root = self
            .regions
            .get(&self.root)
            .ok_or(LayoutError::UnknownRegion(self.root))?;
        if root.parent.is_some() {
            return Err(invariant(self.root, "root has a parent"));
        }

        let mut seen = BTreeSet::new();
        let mut occupants = BTreeSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(invariant(id, "region reachable twice"));
            }
            let region = self
                .regions
                .get(&id)
                .ok_or(LayoutError::UnknownRegion(id))?;
            match region.kind {
                RegionKind::Leaf { occupant } => {
                    if let Some(occupant) = occupant
                        && !occupants.insert(occupant)
                    {
                        return Err(invariant(id, "occupant listed in two leaves"));
                    }
                }
                RegionKind::Internal {
                    axis,
                    first,
                    second,
                } => {
                    let a = self
                        .regions
                        .get(&first)
                        .ok_or(LayoutError::UnknownRegion(first))?;
                    let b = self
                        .regions
                        .get(&second)
                        .ok_or(LayoutError::UnknownRegion(second))?;
                    if a.parent != Some(id) || b.parent != Some(id) {
                        return Err(invariant(id, "child does not point back at parent"));
                    }
                    let (want_a, want_b) = region.rect.split_along(axis);
                    if !a.rect.approx_eq(&want_a) || !b.rect.approx_eq(&want_b) {
                        return Err(invariant(id, "children do not halve the parent"));
                    }
                    stack.push(first);
                    stack.push(second);
                }
            }
        }
        if seen.len() != self.regions.len() {
            return Err(invariant(self.root, "unreachable regions in arena"));
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn layout_subtree(&mut self, id: RegionId, rect: Rect) {
        let mut stack = vec![(id, rect)];
        while let Some((id, rect)) = stack.pop() {
            let Some(region) = self.regions.get_mut(&id) else {
                continue;
            };
            region.rect = rect;
            if let RegionKind::Internal {
                axis,
                first,
                second,
            } = region.kind
            {
                let (a, b) = rect.split_along(axis);
                stack.push((first, a));
                stack.push((second, b));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> PartitionTree<u32> {
        PartitionTree::new(Size::new(1200.0, 800.0))
    }

    #[test]
    fn new_tree_is_single_empty_leaf() {
        let t = tree();
        assert_eq!(t.len(), 1);
        assert!(t.is_leaf(t.root()));
        assert_eq!(t.occupant(t.root()), None);
        assert_eq!(t.root_rect(), Rect::new(0.0, 0.0, 1200.0, 800.0));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn split_left_places_occupant_first() {
        let t = tree();
        let out = t.split(t.root(), Edge::Left, 7).unwrap();
        let t2 = &out.tree;
        assert_eq!(t2.occupant(out.occupied), Some(7));
        assert_eq!(t2.occupant(out.inherited), None);
        assert_eq!(
            t2.rect(out.occupied),
            Some(Rect::new(0.0, 0.0, 600.0, 800.0))
        );
        assert_eq!(
            t2.rect(out.inherited),
            Some(Rect::new(600.0, 0.0, 600.0, 800.0))
        );
        assert!(!t2.is_leaf(t2.root()));
        assert!(t2.validate().is_ok());
        // the source snapshot is untouched
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn split_bottom_inherits_previous_occupant_on_top() {
        let t = tree();
        let a = t.split(t.root(), Edge::Left, 1).unwrap();
        let b = a.tree.split(a.occupied, Edge::Bottom, 2).unwrap();
        let t = b.tree;
        assert_eq!(t.occupant(b.inherited), Some(1));
        assert_eq!(t.occupant(b.occupied), Some(2));
        assert_eq!(t.rect(b.inherited), Some(Rect::new(0.0, 0.0, 600.0, 400.0)));
        assert_eq!(
            t.rect(b.occupied),
            Some(Rect::new(0.0, 400.0, 600.0, 400.0))
        );
        assert!(t.validate().is_ok());
    }

    #[test]
    fn split_rejects_internal_and_unknown() {
        let t = tree();
        let out = t.split(t.root(), Edge::Top, 1).unwrap();
        assert_eq!(
            out.tree.split(out.tree.root(), Edge::Left, 2).unwrap_err(),
            LayoutError::NotALeaf(out.tree.root())
        );
        assert!(matches!(
            t.split(RegionId(99), Edge::Left, 2),
            Err(LayoutError::UnknownRegion(_))
        ));
    }

    #[test]
    fn merge_restores_sibling_occupant() {
        let t = tree();
        let a = t.split(t.root(), Edge::Left, 1).unwrap();
        let b = a.tree.split(a.inherited, Edge::Top, 2).unwrap();
        // collapse the empty half under 2
        let m = b.tree.merge(b.inherited).unwrap();
        assert_eq!(m.merged, a.inherited);
        assert_eq!(m.tree.occupant(m.merged), Some(2));
        assert_eq!(
            m.tree.rect(m.merged),
            Some(Rect::new(600.0, 0.0, 600.0, 800.0))
        );
        assert_eq!(m.tree.len(), 3);
        assert!(m.tree.validate().is_ok());
    }

    #[test]
    fn merge_promotes_internal_sibling() {
        let t = tree();
        let a = t.split(t.root(), Edge::Left, 1).unwrap();
        let b = a.tree.split(a.inherited, Edge::Top, 2).unwrap();
        let m = b.tree.merge(a.occupied).unwrap();
        let t = m.tree;
        assert_eq!(m.merged, t.root());
        assert_eq!(t.len(), 3);
        let leaf = t.leaf_of(2).unwrap();
        assert_eq!(t.rect(leaf), Some(Rect::new(0.0, 0.0, 1200.0, 400.0)));
        assert_eq!(t.leaf_of(1), None);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn merge_root_is_rejected() {
        let t = tree();
        assert_eq!(
            t.merge(t.root()).unwrap_err(),
            LayoutError::RootHasNoSibling(t.root())
        );
    }

    #[test]
    fn locate_descends_to_leaf() {
        let t = tree();
        let a = t.split(t.root(), Edge::Right, 1).unwrap();
        let t = a.tree;
        assert_eq!(t.locate(Point::new(900.0, 10.0)), Some(a.occupied));
        assert_eq!(t.locate(Point::new(599.9, 10.0)), Some(a.inherited));
        assert_eq!(t.locate(Point::new(600.0, 10.0)), Some(a.occupied));
        assert_eq!(t.locate(Point::new(1200.0, 10.0)), None);
        assert_eq!(t.locate(Point::new(-1.0, 10.0)), None);
    }

    #[test]
    fn resize_touches_root_only() {
        let t = tree();
        let a = t.split(t.root(), Edge::Left, 1).unwrap();
        let resized = a.tree.resize(Size::new(2000.0, 1000.0));
        assert_eq!(
            resized.root_rect(),
            Rect::new(0.0, 0.0, 2000.0, 1000.0)
        );
        assert_eq!(
            resized.rect(a.occupied),
            Some(Rect::new(0.0, 0.0, 600.0, 800.0))
        );
        assert!(resized.validate().is_err());
        // uncovered area of the grown root resolves to no leaf
        assert_eq!(resized.locate(Point::new(1500.0, 10.0)), None);

        let relaid = resized.relayout(Size::new(2000.0, 1000.0));
        assert_eq!(
            relaid.rect(a.occupied),
            Some(Rect::new(0.0, 0.0, 1000.0, 1000.0))
        );
        assert!(relaid.validate().is_ok());
    }

    #[test]
    fn vacate_clears_only_leaves() {
        let t = tree();
        let a = t.split(t.root(), Edge::Left, 1).unwrap();
        let v = a.tree.vacate(a.occupied).unwrap();
        assert_eq!(v.occupant(a.occupied), None);
        assert!(a.tree.vacate(a.tree.root()).is_err());
    }
}
