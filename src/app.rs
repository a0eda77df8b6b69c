use std::collections::HashSet;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::board::Board;
use crate::event::KeyAction;
use crate::input::TextInput;
use crate::model::filter::{self, Filter};
use crate::model::record::Record;
use crate::model::status::{BoardStats, STATUS_SUGGESTIONS};

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    RecordsLoaded(Vec<Record>),
    FetchError(String),
    StatusSaved {
        page_id: String,
        status: String,
        result: Result<(), String>,
    },
    Redraw,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Board,
    StatusPicker,
    EditTitle,
    EditContent,
}

/// An open title or content editor. Survives a failed save so the user can retry.
#[derive(Debug, Clone)]
pub struct Editor {
    pub page_id: String,
    pub input: TextInput,
}

pub struct App {
    pub records: Vec<Record>,
    pub filter: Filter,
    pub selected: usize,
    pub view_mode: ViewMode,
    pub picker_index: usize,
    pub editor: Option<Editor>,
    pub loading: bool,
    pub updating: HashSet<String>,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    board: Board,
}

impl App {
    pub fn new(board: Board, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            records: Vec::new(),
            filter: Filter::default(),
            selected: 0,
            view_mode: ViewMode::Board,
            picker_index: 0,
            editor: None,
            loading: true,
            updating: HashSet::new(),
            flash_message: None,
            should_quit: false,
            action_tx,
            board,
        }
    }

    pub fn visible(&self) -> Vec<&Record> {
        self.filter.apply(&self.records)
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.visible().get(self.selected).copied()
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats::from_records(self.visible())
    }

    fn flash(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), Instant::now()));
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub async fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::RecordsLoaded(records) => {
                self.records = records;
                self.loading = false;
                self.clamp_selection();
            }
            Action::FetchError(msg) => {
                self.loading = false;
                self.flash(format!("Fetch error: {msg}"));
            }
            Action::StatusSaved {
                page_id,
                status,
                result,
            } => self.finish_status_update(page_id, status, result),
            Action::Redraw => {}
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        match self.view_mode {
            ViewMode::Board => self.handle_board_key(key).await,
            ViewMode::StatusPicker => self.handle_picker_key(key).await,
            ViewMode::EditTitle | ViewMode::EditContent => self.handle_editor_key(key).await,
        }
    }

    async fn handle_board_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up | KeyAction::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyAction::Down | KeyAction::Char('j') => {
                if self.selected + 1 < self.visible().len() {
                    self.selected += 1;
                }
            }
            KeyAction::Char('a') => self.cycle_assignee(true),
            KeyAction::Char('A') => self.cycle_assignee(false),
            KeyAction::Char('s') => self.cycle_status(true),
            KeyAction::Char('S') => self.cycle_status(false),
            KeyAction::Char('0') => {
                self.filter = Filter::default();
                self.selected = 0;
            }
            KeyAction::Enter => self.open_status_picker(),
            KeyAction::Char('t') => self.start_title_edit(),
            KeyAction::Char('e') => self.start_content_edit().await,
            KeyAction::Char('r') => self.refresh_records().await,
            KeyAction::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn handle_picker_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                self.picker_index = self.picker_index.saturating_sub(1);
            }
            KeyAction::Down => {
                if self.picker_index + 1 < STATUS_SUGGESTIONS.len() {
                    self.picker_index += 1;
                }
            }
            KeyAction::Enter => {
                self.view_mode = ViewMode::Board;
                let status = STATUS_SUGGESTIONS[self.picker_index];
                self.apply_status(status);
            }
            KeyAction::Escape => self.view_mode = ViewMode::Board,
            _ => {}
        }
    }

    async fn handle_editor_key(&mut self, key: KeyAction) {
        let multiline = self.view_mode == ViewMode::EditContent;
        match key {
            KeyAction::Escape => {
                self.editor = None;
                self.view_mode = ViewMode::Board;
            }
            KeyAction::Save => self.save_editor().await,
            KeyAction::Enter if !multiline => self.save_editor().await,
            key => {
                let Some(editor) = self.editor.as_mut() else {
                    return;
                };
                let input = &mut editor.input;
                match key {
                    KeyAction::Enter => input.insert('\n'),
                    KeyAction::Tab if multiline => input.insert('\t'),
                    KeyAction::Char(c) => input.insert(c),
                    KeyAction::Backspace => input.backspace(),
                    KeyAction::Left => input.left(),
                    KeyAction::Right => input.right(),
                    KeyAction::Up if multiline => input.up(),
                    KeyAction::Down if multiline => input.down(),
                    _ => {}
                }
            }
        }
    }

    fn cycle_assignee(&mut self, forward: bool) {
        let options = filter::assignees(&self.records);
        self.filter.assignee = filter::cycle(self.filter.assignee.as_deref(), &options, forward);
        self.selected = 0;
    }

    fn cycle_status(&mut self, forward: bool) {
        let options = filter::statuses(&self.records);
        self.filter.status = filter::cycle(self.filter.status.as_deref(), &options, forward);
        self.selected = 0;
    }

    fn open_status_picker(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        self.picker_index = STATUS_SUGGESTIONS
            .iter()
            .position(|s| *s == record.status)
            .unwrap_or(0);
        self.view_mode = ViewMode::StatusPicker;
    }

    /// Starts the update in the background. The row stays marked as updating until
    /// `Action::StatusSaved` comes back.
    fn apply_status(&mut self, status: &str) {
        let Some(record) = self.selected_record() else {
            return;
        };
        if record.status == status || self.updating.contains(&record.id) {
            return;
        }
        let page_id = record.id.clone();
        let status = status.to_string();

        self.updating.insert(page_id.clone());
        let board = self.board.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = board
                .set_status(&page_id, &status)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::StatusSaved {
                page_id,
                status,
                result,
            });
        });
    }

    fn finish_status_update(&mut self, page_id: String, status: String, result: Result<(), String>) {
        self.updating.remove(&page_id);
        match result {
            Ok(()) => {
                if let Some(r) = self.records.iter_mut().find(|r| r.id == page_id) {
                    r.status = status.clone();
                }
                self.flash(format!("Status set to {status}"));
                self.clamp_selection();
            }
            Err(e) => self.flash(format!("Failed to update status: {e}")),
        }
    }

    fn start_title_edit(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        self.editor = Some(Editor {
            page_id: record.id.clone(),
            input: TextInput::new(record.title.clone()),
        });
        self.view_mode = ViewMode::EditTitle;
    }

    async fn start_content_edit(&mut self) {
        let Some(record) = self.selected_record() else {
            return;
        };
        let page_id = record.id.clone();
        let content = self.board.content(&page_id).await;
        self.editor = Some(Editor {
            page_id,
            input: TextInput::new(content),
        });
        self.view_mode = ViewMode::EditContent;
    }

    async fn save_editor(&mut self) {
        let Some(editor) = self.editor.clone() else {
            return;
        };
        let text = editor.input.text();

        match self.view_mode {
            ViewMode::EditTitle => {
                let title = text.trim();
                if title.is_empty() {
                    self.flash("Task title cannot be empty");
                    return;
                }
                let result = self.board.set_title(&editor.page_id, title).await;
                match result {
                    Ok(()) => {
                        if let Some(r) = self.records.iter_mut().find(|r| r.id == editor.page_id) {
                            r.title = title.to_string();
                        }
                        self.close_editor("Title saved");
                    }
                    Err(e) => self.flash(format!("Failed to update title: {e}")),
                }
            }
            ViewMode::EditContent => {
                let result = self.board.save_content(&editor.page_id, text).await;
                match result {
                    Ok(outcome) if outcome.is_clean() => self.close_editor("Content saved"),
                    Ok(outcome) => self.close_editor(format!(
                        "Content saved; {} old block(s) could not be removed",
                        outcome.failed_deletes.len()
                    )),
                    Err(e) => self.flash(format!("Failed to save content: {e}")),
                }
            }
            _ => {}
        }
    }

    fn close_editor(&mut self, msg: impl Into<String>) {
        self.editor = None;
        self.view_mode = ViewMode::Board;
        self.flash(msg);
    }

    pub async fn refresh_records(&mut self) {
        self.loading = true;
        let action = match self.board.records().await {
            Ok(records) => Action::RecordsLoaded(records),
            Err(e) => {
                tracing::error!("Failed to fetch records: {e}");
                Action::FetchError(e.to_string())
            }
        };
        let _ = self.action_tx.send(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::notion::mock::{block, page, MockNotion};
    use serde_json::json;

    fn mock() -> MockNotion {
        MockNotion::new()
            .with_page(page(
                "p1",
                json!({
                    "Task": { "title": [ { "plain_text": "Alpha" } ] },
                    "Status": { "select": { "name": "진행중" } },
                    "Assignee": { "multi_select": [ { "name": "Bob" } ] },
                }),
            ))
            .with_page(page(
                "p2",
                json!({
                    "Task": { "title": [ { "plain_text": "Beta" } ] },
                    "Status": { "select": { "name": "완료" } },
                    "Assignee": { "multi_select": [ { "name": "Alice" } ] },
                }),
            ))
            .with_children("p1", vec![block("b1", "paragraph", &["notes"])])
    }

    async fn loaded_app(api: MockNotion) -> (App, mpsc::UnboundedReceiver<Action>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(Board::new(Arc::new(api)), tx);
        app.refresh_records().await;
        let action = rx.recv().await.unwrap();
        app.update(action).await;
        (app, rx)
    }

    async fn press(app: &mut App, keys: &[KeyAction]) {
        for key in keys {
            app.update(Action::Key(key.clone())).await;
        }
    }

    #[tokio::test]
    async fn refresh_loads_records() {
        let (app, _rx) = loaded_app(mock()).await;
        assert!(!app.loading);
        assert_eq!(app.records.len(), 2);
        assert_eq!(app.stats().total, 2);
        assert_eq!(app.stats().completed, 1);
    }

    #[tokio::test]
    async fn fetch_error_is_flashed() {
        let (app, _rx) = loaded_app(mock().failing_reads()).await;
        assert!(app.records.is_empty());
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.starts_with("Fetch error"));
    }

    #[tokio::test]
    async fn assignee_filter_cycles_in_sorted_order() {
        let (mut app, _rx) = loaded_app(mock()).await;
        press(&mut app, &[KeyAction::Char('a')]).await;
        assert_eq!(app.filter.assignee.as_deref(), Some("Alice"));
        assert_eq!(app.visible().len(), 1);
        assert_eq!(app.selected_record().unwrap().title, "Beta");
        press(&mut app, &[KeyAction::Char('a'), KeyAction::Char('a')]).await;
        assert_eq!(app.filter.assignee, None);
        assert_eq!(app.visible().len(), 2);
    }

    #[tokio::test]
    async fn status_picker_marks_row_until_saved() {
        let (mut app, mut rx) = loaded_app(mock()).await;
        // p1 is 진행중 (index 1); one step down is 완료.
        press(&mut app, &[KeyAction::Enter]).await;
        assert_eq!(app.view_mode, ViewMode::StatusPicker);
        assert_eq!(app.picker_index, 1);
        press(&mut app, &[KeyAction::Down, KeyAction::Enter]).await;

        // Between actions the renderer sees the row as in flight
        assert_eq!(app.view_mode, ViewMode::Board);
        assert!(app.updating.contains("p1"));
        assert_eq!(app.records[0].status, "진행중");

        let action = rx.recv().await.unwrap();
        app.update(action).await;
        assert!(app.updating.is_empty());
        assert_eq!(app.records[0].status, "완료");
        assert_eq!(
            app.board.record("p1").await.unwrap().status,
            "완료"
        );
    }

    #[tokio::test]
    async fn failed_status_update_keeps_old_status() {
        let (mut app, mut rx) = loaded_app(mock().failing_writes()).await;
        press(
            &mut app,
            &[KeyAction::Enter, KeyAction::Down, KeyAction::Enter],
        )
        .await;
        assert!(app.updating.contains("p1"));

        let action = rx.recv().await.unwrap();
        app.update(action).await;
        assert!(app.updating.is_empty());
        assert_eq!(app.records[0].status, "진행중");
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.starts_with("Failed to update status"));
    }

    #[tokio::test]
    async fn title_edit_saves_on_enter() {
        let (mut app, _rx) = loaded_app(mock()).await;
        press(
            &mut app,
            &[
                KeyAction::Char('t'),
                KeyAction::Backspace,
                KeyAction::Char('!'),
                KeyAction::Enter,
            ],
        )
        .await;
        assert_eq!(app.view_mode, ViewMode::Board);
        assert!(app.editor.is_none());
        assert_eq!(app.records[0].title, "Alph!");
    }

    #[tokio::test]
    async fn content_edit_loads_and_saves() {
        let (mut app, _rx) = loaded_app(mock()).await;
        press(&mut app, &[KeyAction::Char('e')]).await;
        assert_eq!(app.view_mode, ViewMode::EditContent);
        assert_eq!(app.editor.as_ref().unwrap().input.text(), "notes");

        press(
            &mut app,
            &[KeyAction::Enter, KeyAction::Char('q'), KeyAction::Save],
        )
        .await;
        assert_eq!(app.view_mode, ViewMode::Board);
        assert_eq!(app.board.content("p1").await, "notes\nq");
    }

    #[tokio::test]
    async fn failed_content_save_keeps_editor() {
        let (mut app, _rx) = loaded_app(mock().failing_writes()).await;
        press(
            &mut app,
            &[KeyAction::Char('e'), KeyAction::Char('!'), KeyAction::Save],
        )
        .await;
        assert_eq!(app.view_mode, ViewMode::EditContent);
        assert_eq!(app.editor.as_ref().unwrap().input.text(), "notes!");
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.starts_with("Failed to save content"));
    }

    #[tokio::test]
    async fn escape_discards_edit() {
        let (mut app, _rx) = loaded_app(mock()).await;
        press(
            &mut app,
            &[KeyAction::Char('t'), KeyAction::Char('x'), KeyAction::Escape],
        )
        .await;
        assert!(app.editor.is_none());
        assert_eq!(app.records[0].title, "Alpha");
    }

    #[tokio::test]
    async fn q_quits_only_on_board() {
        let (mut app, _rx) = loaded_app(mock()).await;
        press(&mut app, &[KeyAction::Char('t'), KeyAction::Char('q')]).await;
        assert!(!app.should_quit);
        press(&mut app, &[KeyAction::Escape, KeyAction::Char('q')]).await;
        assert!(app.should_quit);
    }
}
