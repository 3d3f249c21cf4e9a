//! Draws a [`Snapshot`] into a ratatui buffer.
//!
//! The core works in logical units; [`CellScale`] maps them onto terminal
//! cells and back.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::geometry::{Point, Rect, Size};
use crate::keybindings::KeyBindings;
use crate::window::{DockState, WindowId};
use crate::window::decorator::{Chrome, WindowDecorator};
use crate::workspace::Snapshot;

/// Logical size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    cell_width: f64,
    cell_height: f64,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
        }
    }
}

impl CellScale {
    /// Falls back to the default for any non-positive or non-finite value.
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        let fallback = Self::default();
        let pick = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };
        Self {
            cell_width: pick(cell_width, fallback.cell_width),
            cell_height: pick(cell_height, fallback.cell_height),
        }
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Logical viewport covering `cols` x `rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Size {
        Size::new(
            f64::from(cols) * self.cell_width,
            f64::from(rows) * self.cell_height,
        )
    }

    /// Logical position of the center of a cell.
    pub fn to_logical(&self, col: u16, row: u16) -> Point {
        Point::new(
            (f64::from(col) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }

    /// Cells covered by `rect`, clipped to `area`. Edges are rounded so
    /// neighbouring regions share a boundary column or row.
    pub fn to_cells(&self, rect: Rect, area: CellRect) -> Option<CellRect> {
        let x0 = to_cell(rect.x / self.cell_width);
        let y0 = to_cell(rect.y / self.cell_height);
        let x1 = to_cell(rect.right() / self.cell_width);
        let y1 = to_cell(rect.bottom() / self.cell_height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let cells = CellRect::new(x0, y0, x1 - x0, y1 - y0).intersection(area);
        (!cells.is_empty()).then_some(cells)
    }
}

fn to_cell(v: f64) -> u16 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Paints leaves, then windows bottom to top, then the snap indicator.
pub fn render_snapshot(
    buffer: &mut Buffer,
    area: CellRect,
    snapshot: &Snapshot,
    scale: CellScale,
    decorator: &dyn WindowDecorator,
    focused: Option<WindowId>,
) {
    for leaf in snapshot.leaves.iter().filter(|l| l.occupant.is_none()) {
        if let Some(cells) = scale.to_cells(leaf.rect, area) {
            decorator.render_empty_region(buffer, cells);
        }
    }
    for window in &snapshot.windows {
        let Some(cells) = scale.to_cells(window.rect, area) else {
            continue;
        };
        let chrome = Chrome {
            focused: focused == Some(window.id),
            docked: window.dock != DockState::Free,
            dragging: window.dragging,
        };
        decorator.render_window(buffer, cells, &window.id.to_string(), chrome);
    }
    if let Some(indicator) = snapshot.indicator
        && let Some(cells) = scale.to_cells(indicator.rect, area)
    {
        decorator.render_indicator(buffer, cells);
    }
}

/// Centered help box listing every binding.
pub fn render_help(buffer: &mut Buffer, area: CellRect, bindings: &KeyBindings) {
    let mut lines: Vec<Line<'_>> = vec![
        Line::from("Drag a window near an edge to snap it."),
        Line::from(""),
    ];
    for (action, combos) in bindings.help_entries() {
        lines.push(Line::from(format!("{:<12} {}", combos.join(", "), action)));
    }
    let width = (lines.iter().map(Line::width).max().unwrap_or(0) as u16)
        .saturating_add(4)
        .min(area.width);
    let height = (lines.len() as u16).saturating_add(2).min(area.height);
    let popup = CellRect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    Clear.render(popup, buffer);
    Paragraph::new(lines)
        .block(Block::bordered().title(" Help "))
        .render(popup, buffer);
}

/// Full frame: workspace plus the optional help overlay.
pub fn draw(
    frame: &mut Frame<'_>,
    snapshot: &Snapshot,
    scale: CellScale,
    decorator: &dyn WindowDecorator,
    focused: Option<WindowId>,
    help: Option<&KeyBindings>,
) {
    let area = frame.area();
    let buffer = frame.buffer_mut();
    render_snapshot(buffer, area, snapshot, scale, decorator, focused);
    if let Some(bindings) = help {
        render_help(buffer, area, bindings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WmConfig;
    use crate::window::decorator::TitleBarDecorator;
    use crate::workspace::{WmEvent, Workspace};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn scale_round_trips_cell_centers() {
        let scale = CellScale::default();
        assert_eq!(scale.viewport(120, 40), Size::new(1200.0, 800.0));
        assert_eq!(scale.to_logical(0, 0), Point::new(5.0, 10.0));
        let area = CellRect::new(0, 0, 120, 40);
        assert_eq!(
            scale.to_cells(Rect::new(600.0, 0.0, 600.0, 800.0), area),
            Some(CellRect::new(60, 0, 60, 40))
        );
        assert_eq!(scale.to_cells(Rect::new(2000.0, 0.0, 10.0, 10.0), area), None);
    }

    #[test]
    fn invalid_scale_falls_back() {
        assert_eq!(CellScale::new(0.0, f64::NAN), CellScale::default());
        assert_eq!(CellScale::new(8.0, 16.0).cell_width(), 8.0);
    }

    #[test]
    fn draws_docked_window_and_empty_leaf() {
        let scale = CellScale::default();
        let mut ws = Workspace::new(scale.viewport(40, 10), WmConfig::default());
        ws.apply(&WmEvent::CreateWindow);
        let snap = ws.snapshot();
        let id = snap.windows[0].id;
        // drag from the window's origin to the left edge
        let origin = snap.windows[0].rect.origin();
        ws.apply(&WmEvent::PointerDown {
            window: id,
            position: origin,
        });
        ws.apply(&WmEvent::PointerUp(Point::new(5.0, 100.0)));

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let snap = ws.snapshot();
        terminal
            .draw(|frame| {
                draw(frame, &snap, scale, &TitleBarDecorator, Some(id), None);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "╔");
        assert_eq!(buffer[(19, 9)].symbol(), "╝");
        // the empty right half is outlined
        assert_eq!(buffer[(20, 5)].symbol(), "┆");
    }

    #[test]
    fn help_overlay_is_drawn_on_top() {
        let area = CellRect::new(0, 0, 60, 20);
        let mut buffer = Buffer::empty(area);
        render_help(&mut buffer, area, &KeyBindings::defaults());
        let text: String = (0..60).map(|x| buffer[(x, 10)].symbol().to_string()).collect();
        assert!(text.contains('│'));
    }
}
