use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::model::filter;
use crate::ui::theme::{label_style, status_style};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let assignee_counts = filter::assignee_counts(&app.records);
    let status_counts = filter::status_counts(&app.records);

    let assignee_span = match &app.filter.assignee {
        Some(name) => Span::styled(
            format!("{name} ({})", assignee_counts.get(name).copied().unwrap_or(0)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(format!(
            "All ({})",
            assignee_counts.values().sum::<usize>()
        )),
    };

    let status_span = match &app.filter.status {
        Some(status) => Span::styled(
            format!("{status} ({})", status_counts.get(status).copied().unwrap_or(0)),
            status_style(status).add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(format!("All Status ({})", app.records.len())),
    };

    let line = Line::from(vec![
        Span::styled(" Assignee: ", label_style()),
        assignee_span,
        Span::styled("   Status: ", label_style()),
        status_span,
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters "),
    );
    f.render_widget(paragraph, area);
}
