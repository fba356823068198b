//! BLOCKFALL - a terminal falling-block puzzle game

mod board;
mod game;
mod input;
mod piece;
mod score;
mod settings;
mod spawner;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use game::{Action, Game};
use input::InputHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::Duration,
};

/// Target frame rate
const TARGET_FPS: u64 = 30;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

fn main() -> io::Result<()> {
    // Setup tracing to a log file; stderr belongs to the UI while playing.
    let log_dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::never(&log_dir, "blockfall.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().unwrap()),
        )
        .with_ansi(false)
        .init();

    tracing::info!("blockfall starting up, log={}", log_dir.join("blockfall.log").display());

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the game and capture the result before restoring the terminal.
    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    match &result {
        Ok(game) => {
            if game.is_over() {
                println!("Game over!");
            }
            println!("Final score: {}", game.score.points);
            println!("Lines cleared: {}", game.score.lines);
        }
        Err(_) => {}
    }

    result.map(|_| ())
}

/// The main loop: poll input, tick the simulation, render
///
/// Returns the finished game for the final score printout. Polling with a
/// frame-length timeout doubles as the frame pacing sleep.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let mut game = Game::new();
    let input = InputHandler::from_settings(settings);

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match input.action_for(key) {
                        Some(Action::Quit) => {
                            tracing::info!("quit requested");
                            return Ok(game);
                        }
                        Some(action) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        game.tick();

        if game.is_over() {
            return Ok(game);
        }
    }
}
