use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::app::App;
use crate::ui::theme::ACCENT;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Line::from(vec![
            Span::raw(" Overview for "),
            Span::styled(app.filter.heading().to_string(), Style::default().fg(ACCENT)),
            Span::raw(format!(" · {} tasks ", stats.total)),
        ]));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let buckets = [
        ("Completed", stats.completed, stats.completed_percentage, Color::Green),
        ("In Progress", stats.in_progress, stats.in_progress_percentage, Color::Blue),
        ("Not Started", stats.not_started, stats.not_started_percentage, Color::Gray),
    ];

    for ((label, count, pct, color), column) in buckets.into_iter().zip(columns.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .percent(pct.min(100) as u16)
            .label(format!("{label} {count} ({pct}%)"));
        f.render_widget(gauge, *column);
    }
}
