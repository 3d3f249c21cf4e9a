use std::collections::BTreeMap;
use std::sync::Arc;

use super::{CascadePlacement, DockState, Placement, Window, WindowId};
use crate::geometry::{Point, Rect, Size};
use crate::layout::PartitionTree;

/// Owns every window and its dock state, plus the stacking order.
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, Window>,
    /// Bottom to top.
    z_order: Vec<WindowId>,
    next_id: u64,
    placements: u64,
    placement: Arc<dyn Placement>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new(Arc::new(CascadePlacement::default()))
    }
}

impl WindowRegistry {
    pub fn new(placement: Arc<dyn Placement>) -> Self {
        Self {
            windows: BTreeMap::new(),
            z_order: Vec::new(),
            next_id: 1,
            placements: 0,
            placement,
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Windows from bottom to top of the stack.
    pub fn iter(&self) -> impl Iterator<Item = &Window> + '_ {
        self.z_order.iter().filter_map(|id| self.windows.get(id))
    }

    pub fn topmost_at(&self, point: Point) -> Option<WindowId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(|w| w.rect().contains(point)))
    }

    /// Adds a floating window of `size` on top of the stack.
    pub fn create(&mut self, size: Size, viewport: Size) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        let position = self.next_position(size, viewport);
        self.windows.insert(id, Window::new(id, position, size));
        self.z_order.push(id);
        tracing::debug!(window_id = ?id, x = position.x, y = position.y, "created window");
        id
    }

    /// Removes `id`, first collapsing its leaf if it was docked.
    pub fn close(&mut self, id: WindowId, tree: &mut PartitionTree<WindowId>) -> bool {
        if !self.contains(id) {
            tracing::debug!(window_id = ?id, "close ignored: unknown window");
            return false;
        }
        self.undock(id, tree);
        self.windows.remove(&id);
        self.z_order.retain(|z| *z != id);
        tracing::debug!(window_id = ?id, "closed window");
        true
    }

    /// Undocks `id` in place and gives it fresh floating geometry.
    ///
    /// Returns `false` without touching anything when the window is unknown
    /// or already floating.
    pub fn move_out(
        &mut self,
        id: WindowId,
        tree: &mut PartitionTree<WindowId>,
        size: Size,
        viewport: Size,
    ) -> bool {
        if !self.get(id).is_some_and(Window::is_docked) {
            return false;
        }
        self.undock(id, tree);
        let position = self.next_position(size, viewport);
        if let Some(window) = self.windows.get_mut(&id) {
            window.dock = DockState::Free;
            window.set_rect(Rect::from_parts(position, size));
        }
        tracing::debug!(window_id = ?id, "moved window out of the tree");
        true
    }

    /// Brings `id` to the top of the stack.
    pub fn raise(&mut self, id: WindowId) {
        if let Some(pos) = self.z_order.iter().position(|z| *z == id) {
            let id = self.z_order.remove(pos);
            self.z_order.push(id);
        }
    }

    /// Makes window dock state agree with the tree.
    ///
    /// Every occupant is docked to its leaf and resized to fill it. A window
    /// claiming a leaf that no longer lists it becomes free and keeps its
    /// current geometry.
    pub fn rehome(&mut self, tree: &PartitionTree<WindowId>) {
        for window in self.windows.values_mut() {
            if let DockState::Docked(leaf) = window.dock
                && tree.occupant(leaf) != Some(window.id)
            {
                window.dock = DockState::Free;
            }
        }
        for leaf in tree.leaves() {
            let Some(occupant) = leaf.occupant() else {
                continue;
            };
            if let Some(window) = self.windows.get_mut(&occupant) {
                window.dock = DockState::Docked(leaf.id);
                window.set_rect(leaf.rect);
            }
        }
    }

    pub(crate) fn set_position(&mut self, id: WindowId, position: Point) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.position = position;
        }
    }

    pub(crate) fn set_rect(&mut self, id: WindowId, rect: Rect) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.set_rect(rect);
        }
    }

    /// Collapses the leaf `id` occupies and re-homes whoever survives the
    /// merge. Leaves `id` itself marked free.
    fn undock(&mut self, id: WindowId, tree: &mut PartitionTree<WindowId>) {
        let Some(leaf) = self.get(id).and_then(Window::docked_leaf) else {
            return;
        };
        if tree.occupant(leaf) == Some(id) {
            match tree.merge(leaf) {
                Ok(outcome) => {
                    tracing::debug!(
                        window_id = ?id,
                        merged = ?outcome.merged,
                        "merged leaf of undocked window"
                    );
                    *tree = outcome.tree;
                }
                Err(err) => {
                    tracing::debug!(window_id = ?id, error = %err, "merge skipped");
                }
            }
        }
        if let Some(window) = self.windows.get_mut(&id) {
            window.dock = DockState::Free;
        }
        self.rehome(tree);
    }

    fn next_position(&mut self, size: Size, viewport: Size) -> Point {
        let position = self.placement.place(self.placements, size, viewport);
        self.placements += 1;
        position
    }
}
