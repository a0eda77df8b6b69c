use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, ViewMode};
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = &app.editor else {
        return;
    };

    let (title, width, height) = match app.view_mode {
        ViewMode::EditTitle => (" Edit Title (enter: save, esc: cancel) ", 70, 3),
        _ => (
            " Edit Content (ctrl+s: save, esc: cancel) ",
            80,
            area.height.saturating_sub(4).max(5),
        ),
    };
    let popup = centered_rect(width, height, area);
    let inner_height = popup.height.saturating_sub(2);

    let (line, _) = editor.input.line_col();
    // Keep the cursor row on screen
    let scroll = (line as u16).saturating_sub(inner_height.saturating_sub(1));

    let paragraph = Paragraph::new(editor.input.text().to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(title),
        )
        .scroll((scroll, 0));

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);

    let x = popup.x + 1 + editor.input.cursor_width() as u16;
    let y = popup.y + 1 + (line as u16).saturating_sub(scroll);
    f.set_cursor_position((
        x.min(popup.x + popup.width.saturating_sub(2)),
        y.min(popup.y + popup.height.saturating_sub(2)),
    ));
}
