use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::model::status::StatusCategory;
use crate::ui::theme::{label_style, status_style, ACCENT};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Details ");

    let Some(record) = app.selected_record() else {
        f.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::raw(record.title.clone()), Line::raw("")];

    lines.push(Line::from(vec![
        Span::styled("Status: ", label_style()),
        Span::styled(record.status.clone(), status_style(&record.status)),
        Span::styled(
            format!(" ({})", StatusCategory::classify(&record.status).label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Assignee: ", label_style()),
        Span::raw(record.assignee.clone().unwrap_or_else(|| "Unassigned".into())),
    ]));

    if let Some(avatar) = &record.assignee_avatar_url {
        lines.push(Line::from(vec![
            Span::styled("Avatar: ", label_style()),
            Span::styled(avatar.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    if let Some(path) = record.depth_path() {
        lines.push(Line::from(vec![
            Span::styled("Category: ", label_style()),
            Span::raw(path),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Last edited: ", label_style()),
        Span::raw(record.last_edited_display()),
    ]));

    lines.push(Line::from(vec![
        Span::styled("URL: ", label_style()),
        Span::styled(record.url.clone(), Style::default().fg(Color::Blue)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
