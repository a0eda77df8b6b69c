mod app;
mod board;
mod cli;
mod config;
mod error;
mod event;
mod input;
mod logging;
mod model;
mod normalize;
mod notion;
mod sync;
mod ui;

use std::io;
use std::panic;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};
use board::Board;
use cli::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = cli::parse_args(&args)?;

    if matches!(command, Command::Help) {
        cli::print_help();
        return Ok(());
    }

    // The TUI owns the terminal, so its logs go to a file
    if command.is_tui() {
        logging::init_file()?;
    } else {
        logging::init_stderr();
    }

    let config = config::load_config()?;
    let notion = config::resolve_notion(&config)?;
    let board = Board::from_config(notion)?;

    if command.is_tui() {
        run_tui(board).await
    } else {
        cli::run(command, &board).await
    }
}

async fn run_tui(board: Board) -> Result<()> {
    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(board, action_tx.clone());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Spawn event reader
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });

    tracing::info!("Board started");
    app.refresh_records().await;

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        match action_rx.recv().await {
            Some(action) => {
                app.update(action).await;
                if app.should_quit {
                    break;
                }
            }
            None => break,
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
