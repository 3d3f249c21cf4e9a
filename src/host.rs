//! Glue between crossterm input and the workspace reducer.

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::config::WmConfig;
use crate::event_loop::ControlFlow;
use crate::keybindings::{Action, KeyBindings};
use crate::render::CellScale;
use crate::state::AppState;
use crate::window::WindowId;
use crate::workspace::{Effect, Snapshot, WmEvent, Workspace};

pub struct TerminalHost {
    workspace: Workspace,
    scale: CellScale,
    bindings: KeyBindings,
    state: AppState,
}

impl TerminalHost {
    pub fn new(cols: u16, rows: u16, config: WmConfig, scale: CellScale) -> Self {
        Self {
            workspace: Workspace::new(scale.viewport(cols, rows), config),
            scale,
            bindings: KeyBindings::defaults(),
            state: AppState::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn scale(&self) -> CellScale {
        self.scale
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.workspace.snapshot()
    }

    /// Maps a terminal event to the core event it stands for, if any.
    ///
    /// Pointer-downs only translate when they land on a window; the topmost
    /// one under the cell wins.
    pub fn translate(&self, event: &Event) -> Option<WmEvent> {
        match event {
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            Event::Resize(cols, rows) => {
                let size = self.scale.viewport(*cols, *rows);
                Some(WmEvent::ViewportResize {
                    width: size.width,
                    height: size.height,
                })
            }
            _ => None,
        }
    }

    /// Feeds one terminal event through translation, the reducer and the
    /// key bindings.
    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if let Event::Key(key) = event {
            return self.handle_key(key);
        }
        let Some(wm_event) = self.translate(event) else {
            return ControlFlow::Continue;
        };
        self.dispatch(&wm_event);
        ControlFlow::Continue
    }

    /// Applies a core event and keeps host-side focus in step with it.
    pub fn dispatch(&mut self, event: &WmEvent) -> Effect {
        let effect = self.workspace.apply(event);
        match effect {
            Effect::Created(id) | Effect::DragStarted(id) => self.state.set_focused(Some(id)),
            Effect::Closed(_) => {
                let order = self.window_order();
                self.state.retain_focus(&order);
            }
            _ => {}
        }
        tracing::trace!(?event, ?effect, "dispatched");
        effect
    }

    fn translate_mouse(&self, mouse: &MouseEvent) -> Option<WmEvent> {
        let position = self.scale.to_logical(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let window = self.workspace.windows().topmost_at(position)?;
                Some(WmEvent::PointerDown { window, position })
            }
            MouseEventKind::Drag(MouseButton::Left) => Some(WmEvent::PointerMove(position)),
            MouseEventKind::Up(MouseButton::Left) => Some(WmEvent::PointerUp(position)),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        let Some(action) = self.bindings.action_for_key(key) else {
            return ControlFlow::Continue;
        };
        tracing::debug!(%action, "key action");
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::NewWindow => {
                self.dispatch(&WmEvent::CreateWindow);
            }
            Action::CloseWindow => {
                if let Some(id) = self.state.focused() {
                    self.dispatch(&WmEvent::CloseWindow(id));
                }
            }
            Action::MoveWindowOut => {
                if let Some(id) = self.state.focused() {
                    self.dispatch(&WmEvent::MoveWindowOut(id));
                }
            }
            Action::FocusNext => {
                let order = self.window_order();
                self.state.focus_next(&order);
            }
            Action::FocusPrevious => {
                let order = self.window_order();
                self.state.focus_previous(&order);
            }
            Action::ToggleHelp => self.state.toggle_help_visible(),
            Action::ToggleMouseCapture => self.state.toggle_mouse_capture(),
        }
        ControlFlow::Continue
    }

    fn window_order(&self) -> Vec<WindowId> {
        self.workspace.windows().iter().map(|w| w.id()).collect()
    }
}
