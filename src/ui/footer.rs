use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ViewMode};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match app.view_mode {
        ViewMode::Board => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("a/A", "assignee"));
            spans.push(hint("s/S", "status"));
            if !app.filter.is_empty() {
                spans.push(hint("0", "clear filters"));
            }
            spans.push(hint("enter", "set status"));
            spans.push(hint("t", "title"));
            spans.push(hint("e", "content"));
            spans.push(hint("r", "refresh"));
            spans.push(hint("q", "quit"));
        }
        ViewMode::StatusPicker => {
            spans.push(hint("↑↓", "choose"));
            spans.push(hint("enter", "apply"));
            spans.push(hint("esc", "cancel"));
        }
        ViewMode::EditTitle => {
            spans.push(hint("enter", "save"));
            spans.push(hint("esc", "cancel"));
        }
        ViewMode::EditContent => {
            spans.push(hint("ctrl+s", "save"));
            spans.push(hint("esc", "cancel"));
        }
    }

    if !app.updating.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            " SAVING ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    // Flash message
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(Color::DarkGray),
    )
}
