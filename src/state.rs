use crate::window::WindowId;

/// Host-side state that never reaches the core: focus, overlays, capture.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
    help_visible: bool,
    focused: Option<WindowId>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mouse_capture_enabled: true,
            mouse_capture_dirty: false,
            help_visible: false,
            focused: None,
        }
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    pub fn toggle_mouse_capture(&mut self) {
        let enabled = !self.mouse_capture_enabled;
        self.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn toggle_help_visible(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn set_focused(&mut self, window: Option<WindowId>) {
        self.focused = window;
    }

    /// Moves focus to the window after the focused one in `order`, wrapping
    /// around. Falls back to the first window when focus is stale.
    pub fn focus_next(&mut self, order: &[WindowId]) {
        self.focused = match self
            .focused
            .and_then(|id| order.iter().position(|w| *w == id))
        {
            Some(idx) => order.get((idx + 1) % order.len()).copied(),
            None => order.first().copied(),
        };
    }

    /// Moves focus to the window before the focused one in `order`, wrapping
    /// around. Falls back to the last window when focus is stale.
    pub fn focus_previous(&mut self, order: &[WindowId]) {
        self.focused = match self
            .focused
            .and_then(|id| order.iter().position(|w| *w == id))
        {
            Some(idx) => order.get((idx + order.len() - 1) % order.len()).copied(),
            None => order.last().copied(),
        };
    }

    /// Drops focus if the focused window no longer exists.
    pub fn retain_focus(&mut self, order: &[WindowId]) {
        if let Some(id) = self.focused
            && !order.contains(&id)
        {
            self.focused = order.last().copied();
        }
    }
}
