pub mod detail_panel;
pub mod editor;
pub mod filter_bar;
pub mod footer;
pub mod record_list;
pub mod stats_panel;
pub mod status_picker;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, ViewMode};

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    // Filters (3) + stats (3) + main content + footer (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(size);

    filter_bar::render(f, vertical[0], app);
    stats_panel::render(f, vertical[1], app);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[2]);

    record_list::render(f, horizontal[0], app);
    detail_panel::render(f, horizontal[1], app);
    footer::render(f, vertical[3], app);

    match app.view_mode {
        ViewMode::Board => {}
        ViewMode::StatusPicker => status_picker::render(f, size, app),
        ViewMode::EditTitle | ViewMode::EditContent => editor::render(f, size, app),
    }
}

/// A rect of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
