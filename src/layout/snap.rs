//! Snap-zone detection for a window being dragged.
//!
//! Detection is a pure function of the pointer, the dragged window's
//! prospective rectangle, its dock state, the region tree and the viewport.
//! Nothing here mutates state.

use super::{Edge, PartitionTree, RegionId};
use crate::geometry::{Point, Rect, Size};

/// What a drop would commit to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// Half-viewport dock that lives outside the region tree.
    ScreenEdge,
    /// Split of the given leaf.
    Region(RegionId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapIndicator {
    pub edge: Edge,
    pub target: SnapTarget,
    /// Area the window would occupy if dropped now.
    pub highlight: Rect,
}

#[derive(Debug, Clone, Copy)]
pub struct SnapQuery<'a, W: Copy + Eq + Ord> {
    pub pointer: Point,
    /// Where the dragged window would sit after clamping.
    pub window_rect: Rect,
    /// Leaf the dragged window currently occupies, if docked.
    pub docked_in: Option<RegionId>,
    pub tree: &'a PartitionTree<W>,
    pub viewport: Size,
    pub margin: f64,
}

/// Canonical half-viewport rectangle for a screen-edge dock.
pub fn screen_edge_rect(edge: Edge, viewport: Size) -> Rect {
    edge.half_of(Rect::from_size(viewport))
}

pub fn detect<W: Copy + Eq + Ord>(query: &SnapQuery<'_, W>) -> Option<SnapIndicator> {
    let tree = query.tree;
    if let Some(leaf) = query.docked_in {
        // Docked windows never leave their parent region through a snap.
        let bounds = tree
            .parent(leaf)
            .and_then(|parent| tree.rect(parent))
            .unwrap_or_else(|| Rect::from_size(query.viewport));
        if !bounds.contains(query.pointer) {
            return None;
        }
        return region_indicator(query);
    }
    region_indicator(query).or_else(|| {
        screen_edge(query.window_rect, query.viewport, query.margin).map(|edge| SnapIndicator {
            edge,
            target: SnapTarget::ScreenEdge,
            highlight: screen_edge_rect(edge, query.viewport),
        })
    })
}

/// Edges of `rect` allowed as drop targets.
///
/// The root accepts all four. Other regions only split across their longer
/// side: wide regions accept left/right, tall ones top/bottom, squares all.
pub fn eligible_edges(rect: Rect, is_root: bool) -> &'static [Edge] {
    if is_root {
        &Edge::PRIORITY
    } else if rect.is_wider_than_tall() {
        &[Edge::Left, Edge::Right]
    } else if rect.is_taller_than_wide() {
        &[Edge::Top, Edge::Bottom]
    } else {
        &Edge::PRIORITY
    }
}

/// First edge of `rect`, in priority order, whose margin band contains the
/// pointer. Measured in region-local coordinates.
pub fn region_edge(rect: Rect, pointer: Point, margin: f64, eligible: &[Edge]) -> Option<Edge> {
    let local = pointer.offset_from(rect.origin());
    eligible.iter().copied().find(|edge| match edge {
        Edge::Left => local.x < margin,
        Edge::Right => local.x > rect.width - margin,
        Edge::Top => local.y < margin,
        Edge::Bottom => local.y > rect.height - margin,
    })
}

/// First viewport edge, in priority order, that the window rectangle comes
/// within `margin` of.
pub fn screen_edge(window: Rect, viewport: Size, margin: f64) -> Option<Edge> {
    Edge::PRIORITY.into_iter().find(|edge| match edge {
        Edge::Left => window.x < margin,
        Edge::Right => window.right() > viewport.width - margin,
        Edge::Top => window.y < margin,
        Edge::Bottom => window.bottom() > viewport.height - margin,
    })
}

fn region_indicator<W: Copy + Eq + Ord>(query: &SnapQuery<'_, W>) -> Option<SnapIndicator> {
    let tree = query.tree;
    let leaf = tree.locate(query.pointer)?;
    let rect = tree.rect(leaf)?;
    let eligible = eligible_edges(rect, tree.is_root(leaf));
    let edge = region_edge(rect, query.pointer, query.margin, eligible)?;
    Some(SnapIndicator {
        edge,
        target: SnapTarget::Region(leaf),
        highlight: edge.half_of(rect),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query<'a>(
        tree: &'a PartitionTree<u32>,
        pointer: Point,
        window_rect: Rect,
        docked_in: Option<RegionId>,
    ) -> SnapQuery<'a, u32> {
        SnapQuery {
            pointer,
            window_rect,
            docked_in,
            tree,
            viewport: tree.root_rect().size(),
            margin: 30.0,
        }
    }

    #[test]
    fn root_prefers_left_over_top() {
        let tree = PartitionTree::<u32>::new(Size::new(1000.0, 800.0));
        let window = Rect::new(400.0, 300.0, 300.0, 200.0);
        let hit = detect(&query(&tree, Point::new(15.0, 15.0), window, None)).unwrap();
        assert_eq!(hit.edge, Edge::Left);
        assert_eq!(hit.target, SnapTarget::Region(tree.root()));
        assert_eq!(hit.highlight, Rect::new(0.0, 0.0, 500.0, 800.0));
    }

    #[test]
    fn root_accepts_bottom_when_nothing_else_matches() {
        let tree = PartitionTree::<u32>::new(Size::new(1000.0, 800.0));
        let window = Rect::new(400.0, 300.0, 300.0, 200.0);
        let hit = detect(&query(&tree, Point::new(500.0, 790.0), window, None)).unwrap();
        assert_eq!(hit.edge, Edge::Bottom);
    }

    #[test]
    fn wide_region_only_accepts_left_right() {
        let tree = PartitionTree::<u32>::new(Size::new(2000.0, 800.0));
        let split = tree.split(tree.root(), Edge::Left, 1).unwrap();
        let tree = split.tree;
        let window = Rect::new(1200.0, 0.0, 300.0, 200.0);
        // top is not eligible for a wide region, so only the viewport edge
        // the window touches can match
        assert_eq!(
            detect(&query(&tree, Point::new(1500.0, 10.0), window, None)).map(|h| h.target),
            Some(SnapTarget::ScreenEdge)
        );
        let hit = detect(&query(&tree, Point::new(1010.0, 400.0), window, None)).unwrap();
        assert_eq!(hit.edge, Edge::Left);
        assert_eq!(hit.target, SnapTarget::Region(split.inherited));
        assert_eq!(hit.highlight, Rect::new(1000.0, 0.0, 500.0, 800.0));
    }

    #[test]
    fn tall_region_only_accepts_top_bottom() {
        let rect = Rect::new(600.0, 0.0, 600.0, 800.0);
        assert_eq!(eligible_edges(rect, false), &[Edge::Top, Edge::Bottom]);
        assert_eq!(
            region_edge(rect, Point::new(610.0, 400.0), 30.0, eligible_edges(rect, false)),
            None
        );
        assert_eq!(eligible_edges(rect, true).len(), 4);
        let square = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(eligible_edges(square, false).len(), 4);
    }

    #[test]
    fn screen_edge_falls_back_for_floating_windows() {
        assert_eq!(
            screen_edge(Rect::new(900.0, 300.0, 300.0, 200.0), Size::new(1200.0, 800.0), 30.0),
            Some(Edge::Right)
        );
        assert_eq!(
            screen_edge(Rect::new(300.0, 300.0, 300.0, 200.0), Size::new(1200.0, 800.0), 30.0),
            None
        );
        assert_eq!(
            screen_edge_rect(Edge::Bottom, Size::new(1200.0, 800.0)),
            Rect::new(0.0, 400.0, 1200.0, 400.0)
        );
    }

    #[test]
    fn docked_window_is_confined_to_parent() {
        let tree = PartitionTree::<u32>::new(Size::new(1200.0, 800.0));
        let a = tree.split(tree.root(), Edge::Left, 1).unwrap();
        let b = a.tree.split(a.inherited, Edge::Top, 2).unwrap();
        let tree = b.tree;
        let window = Rect::new(600.0, 0.0, 600.0, 400.0);
        // pointer over the left half, outside the docked window's parent
        assert_eq!(
            detect(&query(&tree, Point::new(10.0, 10.0), window, Some(b.occupied))),
            None
        );
        // inside the parent, near the bottom sibling's bottom edge
        let hit = detect(&query(&tree, Point::new(900.0, 790.0), window, Some(b.occupied))).unwrap();
        assert_eq!(hit.edge, Edge::Bottom);
        assert_eq!(hit.target, SnapTarget::Region(b.inherited));
        // inside the parent but away from any eligible edge: no screen fallback
        assert_eq!(
            detect(&query(&tree, Point::new(900.0, 200.0), window, Some(b.occupied))),
            None
        );
    }
}
