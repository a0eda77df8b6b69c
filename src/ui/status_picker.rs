use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::model::status::STATUS_SUGGESTIONS;
use crate::ui::centered_rect;
use crate::ui::theme::status_style;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let height = STATUS_SUGGESTIONS.len() as u16 + 2;
    let popup = centered_rect(30, height, area);

    let current = app.selected_record().map(|r| r.status.as_str());

    let items: Vec<ListItem> = STATUS_SUGGESTIONS
        .iter()
        .map(|status| {
            let marker = if Some(*status) == current { "● " } else { "  " };
            ListItem::new(Line::styled(format!("{marker}{status}"), status_style(status)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Set Status "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(0x20, 0x24, 0x2c))
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.picker_index));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}
