//! Drag lifecycle: pointer-down starts a drag, pointer-moves give transient
//! feedback, pointer-up commits at most one tree or registry mutation.

use crate::config::WmConfig;
use crate::geometry::{Point, Rect, Size};
use crate::layout::{Edge, PartitionTree, RegionId, SnapIndicator, SnapQuery, SnapTarget, detect};
use crate::window::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        window: WindowId,
        /// Pointer position relative to the window origin at drag start.
        offset: Point,
    },
}

/// What a pointer-up committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// No drag was in progress.
    Ignored,
    /// Dropped without an indicator; the tree is unchanged.
    Released(WindowId),
    /// Snapped to half the viewport, outside the tree.
    SnappedToScreen { window: WindowId, edge: Edge },
    /// Split `leaf` and docked the window into the `edge` half.
    Docked {
        window: WindowId,
        edge: Edge,
        leaf: RegionId,
    },
}

/// Shared state a drag step reads and writes.
pub struct DragContext<'a> {
    pub windows: &'a mut WindowRegistry,
    pub tree: &'a mut PartitionTree<WindowId>,
    pub viewport: Size,
    pub config: &'a WmConfig,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    indicator: Option<SnapIndicator>,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn indicator(&self) -> Option<SnapIndicator> {
        self.indicator
    }

    pub fn dragging(&self) -> Option<WindowId> {
        match self.state {
            DragState::Dragging { window, .. } => Some(window),
            DragState::Idle => None,
        }
    }

    /// Begins dragging `window`. Ignored for unknown windows and while
    /// another drag is active.
    pub fn start(&mut self, windows: &mut WindowRegistry, window: WindowId, pointer: Point) -> bool {
        if self.dragging().is_some() {
            tracing::debug!(window_id = ?window, "pointer down ignored: drag in progress");
            return false;
        }
        let Some(origin) = windows.get(window).map(|w| w.position()) else {
            tracing::debug!(window_id = ?window, "pointer down ignored: unknown window");
            return false;
        };
        windows.raise(window);
        self.state = DragState::Dragging {
            window,
            offset: pointer.offset_from(origin),
        };
        self.indicator = None;
        tracing::debug!(window_id = ?window, "drag started");
        true
    }

    /// Moves the dragged window under the pointer and refreshes the snap
    /// indicator. Only the displayed position changes.
    pub fn update(&mut self, ctx: &mut DragContext<'_>, pointer: Point) -> Option<SnapIndicator> {
        let DragState::Dragging { window, offset } = self.state else {
            return None;
        };
        let Some(current) = ctx.windows.get(window) else {
            tracing::debug!(window_id = ?window, "drag dropped: window disappeared");
            self.reset();
            return None;
        };
        let docked_in = current.docked_leaf();
        let size = current.size();
        let bounds = docked_in
            .and_then(|leaf| ctx.tree.parent(leaf))
            .and_then(|parent| ctx.tree.rect(parent))
            .unwrap_or_else(|| Rect::from_size(ctx.viewport));
        let candidate = Point::new(pointer.x - offset.x, pointer.y - offset.y);
        let position = bounds.clamp_origin(candidate, size);
        ctx.windows.set_position(window, position);

        self.indicator = detect(&SnapQuery {
            pointer,
            window_rect: Rect::from_parts(position, size),
            docked_in,
            tree: ctx.tree,
            viewport: ctx.viewport,
            margin: ctx.config.snap_margin,
        });
        tracing::trace!(
            window_id = ?window,
            x = position.x,
            y = position.y,
            edge = ?self.indicator.map(|i| i.edge),
            "drag update"
        );
        self.indicator
    }

    /// Finishes the drag at `pointer` and commits whatever the indicator
    /// points at.
    pub fn end(&mut self, ctx: &mut DragContext<'_>, pointer: Point) -> DragOutcome {
        let Some(window) = self.dragging() else {
            return DragOutcome::Ignored;
        };
        self.update(ctx, pointer);
        let indicator = self.indicator.take();
        self.state = DragState::Idle;
        if !ctx.windows.contains(window) {
            return DragOutcome::Ignored;
        }

        let outcome = match indicator {
            None => DragOutcome::Released(window),
            Some(SnapIndicator {
                edge,
                target: SnapTarget::ScreenEdge,
                highlight,
            }) => {
                ctx.windows.set_rect(window, highlight);
                DragOutcome::SnappedToScreen { window, edge }
            }
            Some(SnapIndicator {
                edge,
                target: SnapTarget::Region(leaf),
                ..
            }) => dock_into(ctx, window, leaf, edge),
        };
        // Docked windows dropped without a commit return to their leaf.
        ctx.windows.rehome(ctx.tree);
        tracing::debug!(?outcome, "drag ended");
        outcome
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.indicator = None;
    }
}

fn dock_into(
    ctx: &mut DragContext<'_>,
    window: WindowId,
    leaf: RegionId,
    edge: Edge,
) -> DragOutcome {
    let previous = ctx.windows.get(window).and_then(|w| w.docked_leaf());
    let base = match previous {
        Some(old) => ctx.tree.vacate(old),
        None => Ok(ctx.tree.clone()),
    };
    match base.and_then(|tree| tree.split(leaf, edge, window)) {
        Ok(outcome) => {
            *ctx.tree = outcome.tree;
            DragOutcome::Docked {
                window,
                edge,
                leaf: outcome.occupied,
            }
        }
        Err(err) => {
            tracing::debug!(window_id = ?window, error = %err, "drop target rejected");
            DragOutcome::Released(window)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::DockState;

    struct Fixture {
        windows: WindowRegistry,
        tree: PartitionTree<WindowId>,
        viewport: Size,
        config: WmConfig,
    }

    impl Fixture {
        fn new(width: f64, height: f64) -> Self {
            let viewport = Size::new(width, height);
            Self {
                windows: WindowRegistry::default(),
                tree: PartitionTree::new(viewport),
                viewport,
                config: WmConfig::default(),
            }
        }

        fn ctx(&mut self) -> DragContext<'_> {
            DragContext {
                windows: &mut self.windows,
                tree: &mut self.tree,
                viewport: self.viewport,
                config: &self.config,
            }
        }
    }

    #[test]
    fn update_clamps_into_viewport() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let a = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let mut drag = DragController::default();
        // window sits at (30, 30); grab it 10 units in
        assert!(drag.start(&mut fx.windows, a, Point::new(40.0, 40.0)));
        drag.update(&mut fx.ctx(), Point::new(5000.0, 5000.0));
        assert_eq!(fx.windows.get(a).unwrap().position(), Point::new(900.0, 600.0));
        drag.update(&mut fx.ctx(), Point::new(-50.0, 400.0));
        assert_eq!(fx.windows.get(a).unwrap().position(), Point::new(0.0, 390.0));
    }

    #[test]
    fn start_ignores_unknown_and_nested_drags() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let a = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let b = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let mut drag = DragController::default();
        assert!(!drag.start(&mut fx.windows, WindowId::from_raw(99), Point::new(0.0, 0.0)));
        assert_eq!(drag.state(), DragState::Idle);
        assert!(drag.start(&mut fx.windows, a, Point::new(40.0, 40.0)));
        assert!(!drag.start(&mut fx.windows, b, Point::new(70.0, 70.0)));
        assert_eq!(drag.dragging(), Some(a));
    }

    #[test]
    fn release_without_indicator_keeps_floating_position() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let a = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let mut drag = DragController::default();
        drag.start(&mut fx.windows, a, Point::new(40.0, 40.0));
        let out = drag.end(&mut fx.ctx(), Point::new(500.0, 400.0));
        assert_eq!(out, DragOutcome::Released(a));
        let w = fx.windows.get(a).unwrap();
        assert_eq!(w.position(), Point::new(490.0, 390.0));
        assert_eq!(w.dock(), DockState::Free);
        assert_eq!(fx.tree.len(), 1);
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.indicator(), None);
    }

    #[test]
    fn screen_edge_snap_stays_outside_tree() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let a = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let mut drag = DragController::default();
        // grab near the right border of the window so the pointer is far
        // from any root edge while the window itself touches the viewport
        drag.start(&mut fx.windows, a, Point::new(320.0, 40.0));
        let out = drag.end(&mut fx.ctx(), Point::new(1165.0, 400.0));
        assert_eq!(
            out,
            DragOutcome::SnappedToScreen {
                window: a,
                edge: Edge::Right
            }
        );
        let w = fx.windows.get(a).unwrap();
        assert_eq!(w.rect(), Rect::new(600.0, 0.0, 600.0, 800.0));
        assert_eq!(w.dock(), DockState::Free);
        assert_eq!(fx.tree.len(), 1);
    }

    #[test]
    fn docked_window_returns_to_leaf_when_released() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let a = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let mut drag = DragController::default();
        drag.start(&mut fx.windows, a, Point::new(40.0, 40.0));
        let out = drag.end(&mut fx.ctx(), Point::new(10.0, 400.0));
        assert!(matches!(out, DragOutcome::Docked { edge: Edge::Left, .. }));

        drag.start(&mut fx.windows, a, Point::new(300.0, 400.0));
        drag.update(&mut fx.ctx(), Point::new(400.0, 400.0));
        // parent is the root, so the window may slide within the viewport
        assert_eq!(fx.windows.get(a).unwrap().position(), Point::new(100.0, 0.0));
        let out = drag.end(&mut fx.ctx(), Point::new(400.0, 400.0));
        assert_eq!(out, DragOutcome::Released(a));
        assert_eq!(
            fx.windows.get(a).unwrap().rect(),
            Rect::new(0.0, 0.0, 600.0, 800.0)
        );
    }

    #[test]
    fn redocking_vacates_previous_leaf() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let a = fx.windows.create(Size::new(300.0, 200.0), fx.viewport);
        let mut drag = DragController::default();
        drag.start(&mut fx.windows, a, Point::new(40.0, 40.0));
        drag.end(&mut fx.ctx(), Point::new(10.0, 400.0));
        let first_leaf = fx.windows.get(a).unwrap().docked_leaf().unwrap();

        // drop onto the empty right half near its top edge (tall region)
        drag.start(&mut fx.windows, a, Point::new(300.0, 400.0));
        let out = drag.end(&mut fx.ctx(), Point::new(900.0, 10.0));
        let DragOutcome::Docked { leaf, edge, .. } = out else {
            panic!("expected a dock, got {out:?}");
        };
        assert_eq!(edge, Edge::Top);
        assert_eq!(fx.tree.occupant(first_leaf), None);
        assert_eq!(fx.tree.occupant(leaf), Some(a));
        assert_eq!(
            fx.windows.get(a).unwrap().rect(),
            Rect::new(600.0, 0.0, 600.0, 400.0)
        );
        assert!(fx.tree.validate().is_ok());
    }

    #[test]
    fn pointer_up_without_drag_is_ignored() {
        let mut fx = Fixture::new(1200.0, 800.0);
        let mut drag = DragController::default();
        assert_eq!(drag.end(&mut fx.ctx(), Point::new(1.0, 1.0)), DragOutcome::Ignored);
        assert_eq!(drag.update(&mut fx.ctx(), Point::new(1.0, 1.0)), None);
    }
}
