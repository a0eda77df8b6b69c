use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::ui::theme::{status_style, ACCENT};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible();

    let items: Vec<ListItem> = if visible.is_empty() && !app.loading {
        vec![ListItem::new(Line::styled(
            "No records found.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let selected = i == app.selected;

                let marker = if app.updating.contains(&record.id) {
                    Span::styled("… ", Style::default().fg(Color::Yellow))
                } else {
                    Span::raw("  ")
                };

                let status_span = Span::styled(
                    format!("{} ", fit(&record.status, 10, true)),
                    status_style(&record.status),
                );

                // Truncate title to fit
                let max_title = area.width.saturating_sub(32) as usize;
                let title_style = if selected {
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let title_span = Span::styled(fit(&record.title, max_title, false), title_style);

                let assignee_span = Span::styled(
                    format!(" [{}]", record.assignee.as_deref().unwrap_or("-")),
                    Style::default().fg(Color::DarkGray),
                );

                ListItem::new(Line::from(vec![marker, status_span, title_span, assignee_span]))
            })
            .collect()
    };

    let title = if app.loading {
        " Tasks (loading...) ".to_string()
    } else {
        format!(" Tasks ({}) ", visible.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::Rgb(0x20, 0x24, 0x2c)));

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Cut `s` to at most `width` terminal columns, padding with spaces when `pad` is set.
fn fit(s: &str, width: usize, pad: bool) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if pad {
        out.extend(std::iter::repeat(' ').take(width - used));
    }
    out
}
