//! Terminal UI rendering with ratatui

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell};
use crate::game::Game;
use crate::piece::Piece;
use crate::settings::Settings;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Total width needed: board(22) + next/score(16) = 38
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders = 22
const GAME_HEIGHT: u16 = 22;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Main layout: board | next + score
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next preview + score
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let side_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Next preview
            Constraint::Min(6),    // Score
        ])
        .split(main_layout[1]);

    render_next(frame, side_layout[0], &game.next, settings);
    render_score(frame, side_layout[1], game);
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the board with the locked stack and the active piece
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let piece_cells = game.current.cells();
    let piece_color = game.current.kind.color();

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);
    for row in 0..BOARD_HEIGHT {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);
        for col in 0..BOARD_WIDTH {
            let here = (col as i32, row as i32);
            let (text, style) = if piece_cells.contains(&here) {
                (block_char, Style::default().fg(piece_color))
            } else {
                match game.grid.cell(col as i32, row as i32) {
                    Some(Cell::Filled(kind)) => (block_char, Style::default().fg(kind.color())),
                    _ => (empty_char, Style::default().fg(Color::DarkGray)),
                }
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next-piece preview box
fn render_next(frame: &mut Frame, area: Rect, next: &Piece, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();

    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 6 {
        return;
    }

    let color = next.kind.color();
    let frame_cells = next.kind.frames()[0];
    let min_col = frame_cells.iter().map(|&(dc, _)| dc).min().unwrap_or(0);

    // Spawn frames occupy two rows; draw them against the frame origin.
    let mut lines: Vec<Line> = Vec::new();
    for row in 0..2 {
        let mut spans = Vec::new();
        for col in 0..3 {
            if frame_cells.contains(&(min_col + col, row)) {
                spans.push(Span::styled(block_char, Style::default().fg(color)));
            } else {
                spans.push(Span::raw("  "));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render the score panel
fn render_score(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.score.points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.score.lines),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
