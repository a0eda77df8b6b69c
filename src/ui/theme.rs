use ratatui::style::{Color, Style};

use crate::model::status::StatusCategory;

pub const ACCENT: Color = Color::Cyan;

pub fn category_color(category: StatusCategory) -> Color {
    match category {
        StatusCategory::Completed => Color::Green,
        StatusCategory::InProgress => Color::Blue,
        StatusCategory::Issue => Color::Red,
        StatusCategory::Delayed => Color::Yellow,
        StatusCategory::NotStarted => Color::Gray,
        StatusCategory::Review => Color::Magenta,
        StatusCategory::Uncategorized => Color::DarkGray,
    }
}

pub fn status_style(status: &str) -> Style {
    Style::default().fg(category_color(StatusCategory::classify(status)))
}

pub fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}
