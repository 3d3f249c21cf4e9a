use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

/// Per-window state the chrome reflects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chrome {
    pub focused: bool,
    pub docked: bool,
    pub dragging: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Paints a window frame into `rect`, clipped to the buffer area. The
    /// interior is cleared so later windows cover earlier ones.
    fn render_window(&self, buffer: &mut Buffer, rect: Rect, title: &str, chrome: Chrome);

    /// Outlines a drop target while a drag hovers it.
    fn render_indicator(&self, buffer: &mut Buffer, rect: Rect);

    /// Outlines an unoccupied leaf region.
    fn render_empty_region(&self, buffer: &mut Buffer, rect: Rect);
}

struct BorderSet {
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
    horizontal: &'static str,
    vertical: &'static str,
}

const PLAIN: BorderSet = BorderSet {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    horizontal: "─",
    vertical: "│",
};

const DOUBLE: BorderSet = BorderSet {
    top_left: "╔",
    top_right: "╗",
    bottom_left: "╚",
    bottom_right: "╝",
    horizontal: "═",
    vertical: "║",
};

const DOTTED: BorderSet = BorderSet {
    top_left: "·",
    top_right: "·",
    bottom_left: "·",
    bottom_right: "·",
    horizontal: "┄",
    vertical: "┆",
};

/// Title-bar style chrome: floating windows get a thin frame, docked ones a
/// double frame.
#[derive(Debug, Default)]
pub struct TitleBarDecorator;

impl WindowDecorator for TitleBarDecorator {
    fn render_window(&self, buffer: &mut Buffer, rect: Rect, title: &str, chrome: Chrome) {
        let header_style = if chrome.focused || chrome.dragging {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let border_style = if chrome.dragging {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let body_style = Style::default().bg(Color::Reset);
        let borders = if chrome.docked { &DOUBLE } else { &PLAIN };

        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                put(buffer, x, y, " ", body_style);
            }
        }
        draw_border(buffer, rect, borders, border_style);

        // Title bar sits on the top border between the corners.
        if rect.width > 2 {
            let header_width = rect.width - 2;
            for x in rect.x + 1..rect.x + 1 + header_width {
                put(buffer, x, rect.y, " ", header_style);
            }
            let title_len = title.chars().count() as u16;
            if title_len <= header_width {
                let start_x = rect.x + 1 + (header_width - title_len) / 2;
                for (idx, ch) in title.chars().enumerate() {
                    put(
                        buffer,
                        start_x + idx as u16,
                        rect.y,
                        &ch.to_string(),
                        header_style,
                    );
                }
            }
        }
    }

    fn render_indicator(&self, buffer: &mut Buffer, rect: Rect) {
        let style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        draw_border(buffer, rect, &DOUBLE, style);
    }

    fn render_empty_region(&self, buffer: &mut Buffer, rect: Rect) {
        draw_border(buffer, rect, &DOTTED, Style::default().fg(Color::DarkGray));
    }
}

fn put(buffer: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style) {
    if let Some(cell) = buffer.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn draw_border(buffer: &mut Buffer, rect: Rect, set: &BorderSet, style: Style) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let left = rect.x;
    let top = rect.y;
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    for x in left..=right {
        put(buffer, x, top, set.horizontal, style);
        put(buffer, x, bottom, set.horizontal, style);
    }
    for y in top..=bottom {
        put(buffer, left, y, set.vertical, style);
        put(buffer, right, y, set.vertical, style);
    }
    put(buffer, left, top, set.top_left, style);
    put(buffer, right, top, set.top_right, style);
    put(buffer, left, bottom, set.bottom_left, style);
    put(buffer, right, bottom, set.bottom_right, style);
}
