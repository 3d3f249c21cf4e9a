//! The single entry point hosts talk to.
//!
//! A [`Workspace`] owns the window registry, the region tree and the drag
//! controller. Hosts feed it [`WmEvent`]s one at a time and read back a
//! [`Snapshot`]; nothing else is exposed to renderers.

use std::sync::Arc;

use crate::config::{ResizePolicy, WmConfig};
use crate::drag::{DragContext, DragController, DragOutcome, DragState};
use crate::geometry::{Point, Rect, Size};
use crate::layout::{Edge, PartitionTree, RegionId, SnapIndicator};
use crate::viewport::ViewportResizeHandler;
use crate::window::{CascadePlacement, DockState, Placement, WindowId, WindowRegistry};

/// Host-delivered input, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WmEvent {
    PointerDown { window: WindowId, position: Point },
    PointerMove(Point),
    PointerUp(Point),
    ViewportResize { width: f64, height: f64 },
    CreateWindow,
    CloseWindow(WindowId),
    MoveWindowOut(WindowId),
}

/// What applying one event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// The event referenced something unknown or was out of place.
    Unchanged,
    Created(WindowId),
    Closed(WindowId),
    MovedOut(WindowId),
    DragStarted(WindowId),
    Dragged(Option<Edge>),
    Dropped(DragOutcome),
    Resized(Size),
}

#[derive(Debug, Clone)]
pub struct Workspace {
    config: WmConfig,
    viewport: Size,
    windows: WindowRegistry,
    tree: PartitionTree<WindowId>,
    drag: DragController,
}

impl Workspace {
    pub fn new(viewport: Size, config: WmConfig) -> Self {
        Self::with_placement(viewport, config, Arc::new(CascadePlacement::default()))
    }

    pub fn with_placement(viewport: Size, config: WmConfig, placement: Arc<dyn Placement>) -> Self {
        Self {
            config,
            viewport,
            windows: WindowRegistry::new(placement),
            tree: PartitionTree::new(viewport),
            drag: DragController::default(),
        }
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn windows(&self) -> &WindowRegistry {
        &self.windows
    }

    pub fn tree(&self) -> &PartitionTree<WindowId> {
        &self.tree
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn indicator(&self) -> Option<SnapIndicator> {
        self.drag.indicator()
    }

    /// Pure transition: the current workspace is left untouched.
    pub fn reduce(&self, event: &WmEvent) -> (Workspace, Effect) {
        let mut next = self.clone();
        let effect = next.apply(event);
        (next, effect)
    }

    /// Applies `event` in place. Invalid references degrade to
    /// [`Effect::Unchanged`].
    pub fn apply(&mut self, event: &WmEvent) -> Effect {
        match *event {
            WmEvent::PointerDown { window, position } => {
                if self.drag.start(&mut self.windows, window, position) {
                    Effect::DragStarted(window)
                } else {
                    Effect::Unchanged
                }
            }
            WmEvent::PointerMove(position) => {
                if self.drag.dragging().is_none() {
                    return Effect::Unchanged;
                }
                let mut ctx = DragContext {
                    windows: &mut self.windows,
                    tree: &mut self.tree,
                    viewport: self.viewport,
                    config: &self.config,
                };
                let indicator = self.drag.update(&mut ctx, position);
                Effect::Dragged(indicator.map(|i| i.edge))
            }
            WmEvent::PointerUp(position) => {
                let mut ctx = DragContext {
                    windows: &mut self.windows,
                    tree: &mut self.tree,
                    viewport: self.viewport,
                    config: &self.config,
                };
                match self.drag.end(&mut ctx, position) {
                    DragOutcome::Ignored => Effect::Unchanged,
                    outcome => Effect::Dropped(outcome),
                }
            }
            WmEvent::ViewportResize { width, height } => self.resize(Size::new(width, height)),
            WmEvent::CreateWindow => {
                Effect::Created(self.windows.create(self.config.default_window_size, self.viewport))
            }
            WmEvent::CloseWindow(window) => {
                if self.windows.close(window, &mut self.tree) {
                    Effect::Closed(window)
                } else {
                    Effect::Unchanged
                }
            }
            WmEvent::MoveWindowOut(window) => {
                let size = self.config.default_window_size;
                if self
                    .windows
                    .move_out(window, &mut self.tree, size, self.viewport)
                {
                    Effect::MovedOut(window)
                } else {
                    tracing::debug!(window_id = ?window, "move out ignored: not docked");
                    Effect::Unchanged
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let dragging = self.drag.dragging();
        Snapshot {
            viewport: self.viewport,
            windows: self
                .windows
                .iter()
                .map(|w| WindowView {
                    id: w.id(),
                    rect: w.rect(),
                    dock: w.dock(),
                    dragging: dragging == Some(w.id()),
                })
                .collect(),
            leaves: self
                .tree
                .leaves()
                .into_iter()
                .map(|leaf| LeafView {
                    id: leaf.id,
                    rect: leaf.rect,
                    occupant: leaf.occupant(),
                })
                .collect(),
            indicator: self.drag.indicator().map(|i| IndicatorView {
                edge: i.edge,
                rect: i.highlight,
            }),
        }
    }

    fn resize(&mut self, viewport: Size) -> Effect {
        let handler = ViewportResizeHandler::new(self.config.resize_policy);
        let Some(tree) = handler.apply(&self.tree, viewport) else {
            return Effect::Unchanged;
        };
        self.tree = tree;
        self.viewport = viewport;
        if handler.policy() == ResizePolicy::Proportional {
            self.windows.rehome(&self.tree);
        }
        Effect::Resized(viewport)
    }
}

/// A window as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowView {
    pub id: WindowId,
    pub rect: Rect,
    pub dock: DockState,
    pub dragging: bool,
}

/// A leaf region as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafView {
    pub id: RegionId,
    pub rect: Rect,
    pub occupant: Option<WindowId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorView {
    pub edge: Edge,
    pub rect: Rect,
}

/// Immutable view of a workspace after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub viewport: Size,
    /// Bottom to top.
    pub windows: Vec<WindowView>,
    pub leaves: Vec<LeafView>,
    pub indicator: Option<IndicatorView>,
}

impl Snapshot {
    pub fn window(&self, id: WindowId) -> Option<&WindowView> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Topmost window under `point`.
    pub fn window_at(&self, point: Point) -> Option<WindowId> {
        self.windows
            .iter()
            .rev()
            .find(|w| w.rect.contains(point))
            .map(|w| w.id)
    }
}
