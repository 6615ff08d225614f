use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{self, stdout, Stdout},
    time::{Duration, Instant},
};

use blockfall::{CellState, Command, Game, GameEvent, Piece, GRID_COLS, GRID_ROWS};

/// Falling-block puzzle in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece bag; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between gravity steps, 0 disables gravity.
    #[arg(short, long, default_value_t = 500)]
    gravity_ms: u64,
}

// ============================================================================
// Visual Constants
// ============================================================================

const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const PREVIEW_SIZE: i16 = 4;
const FLASH_DURATION: Duration = Duration::from_millis(600);

// ============================================================================
// Color Mapping
// ============================================================================

fn cell_color(id: u8) -> Color {
    match id {
        1 => Color::Green,
        2 => Color::Red,
        3 => Color::Rgb(255, 165, 0),
        4 => Color::Yellow,
        5 => Color::Magenta,
        6 => Color::Cyan,
        7 => Color::Blue,
        8 => Color::LightMagenta,
        _ => Color::DarkGray,
    }
}

struct Flash {
    text: &'static str,
    until: Instant,
}

impl Flash {
    fn for_event(event: &GameEvent) -> Self {
        let text = match event {
            GameEvent::Rotated => "rotate",
            GameEvent::LinesCleared(_) => "clear!",
            GameEvent::GameOver => "game over",
        };
        Self {
            text,
            until: Instant::now() + FLASH_DURATION,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, game: &Game, flash: Option<&Flash>) {
    let area = frame.size();

    let grid_width = (GRID_COLS as u16 * 2) + 2;
    let grid_height = GRID_ROWS as u16 + 2;
    let side_width = 14;
    let main_area = centered_rect(grid_width + side_width, grid_height + 1, area);

    let vertical = Layout::vertical([Constraint::Length(grid_height), Constraint::Fill(1)]).split(main_area);
    let horizontal =
        Layout::horizontal([Constraint::Length(grid_width), Constraint::Length(side_width)]).split(vertical[0]);
    let side = Layout::vertical([Constraint::Length(PREVIEW_SIZE as u16 + 2), Constraint::Fill(1)])
        .split(horizontal[1]);

    render_grid(frame, game, horizontal[0]);
    render_next(frame, game.next_piece(), side[0]);
    render_info(frame, game, flash, side[1]);

    let controls = Paragraph::new(Line::from("←→: Move | ↓: Drop | ↑: Rotate | Q/ESC: Quit"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, vertical[1]);

    if game.is_game_over() {
        render_game_over(frame, game, area);
    }
}

fn render_grid(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Blockfall ").title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .render_grid()
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        CellState::Empty => Span::raw(EMPTY_CHAR),
                        filled => Span::styled(BLOCK_CHAR, Style::default().fg(cell_color(filled.id()))),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_next(frame: &mut Frame, next: &Piece, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Next ").title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Shape state 0 shifted by the kind's preview offset.
    let (d_row, d_column) = next.kind.def().preview;
    let preview = Piece::new_at(next.kind, d_row, d_column).cells();
    let color = cell_color(next.id());

    let lines: Vec<Line> = (0..PREVIEW_SIZE)
        .map(|row| {
            let mut spans = vec![Span::raw(" ")];
            for column in 0..PREVIEW_SIZE {
                if preview.iter().any(|p| p.row == row && p.column == column) {
                    spans.push(Span::styled(BLOCK_CHAR, Style::default().fg(color)));
                } else {
                    spans.push(Span::raw(EMPTY_CHAR));
                }
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, game: &Game, flash: Option<&Flash>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Score ").title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(game.score().to_string(), Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            flash.map_or("", |f| f.text),
            Style::default().fg(Color::Cyan),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_game_over(frame: &mut Frame, game: &Game, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", game.score())),
        Line::from(""),
        Line::from(Span::styled("Any key: restart", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("ESC: quit", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(24, 10, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Input
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Game(Option<Command>),
    Restart(Option<Command>),
}

fn map_key(code: KeyCode, game_over: bool) -> Input {
    let command = match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Input::Quit,
        KeyCode::Left => Some(Command::Left),
        KeyCode::Right => Some(Command::Right),
        KeyCode::Down => Some(Command::Down),
        KeyCode::Up => Some(Command::Rotate),
        _ => None,
    };
    // Any other key restarts a finished game and then plays into the new one.
    if game_over {
        Input::Restart(command)
    } else {
        Input::Game(command)
    }
}

/// The event worth flashing from one batch; game over wins over the rest.
fn flash_event(events: &[GameEvent]) -> Option<&GameEvent> {
    events.iter().find(|e| **e == GameEvent::GameOver).or(events.last())
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, game: &mut Game, gravity: Option<Duration>) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let mut flash: Option<Flash> = None;

    loop {
        if let Some(event) = flash_event(&game.take_events()) {
            flash = Some(Flash::for_event(event));
        }
        if flash.as_ref().is_some_and(|f| Instant::now() >= f.until) {
            flash = None;
        }

        terminal.draw(|frame| render(frame, game, flash.as_ref()))?;

        let timeout = match gravity {
            Some(interval) => interval.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO),
            None => FLASH_DURATION,
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key.code, game.is_game_over()) {
                        Input::Quit => return Ok(()),
                        Input::Game(command) => game.handle(command),
                        Input::Restart(command) => {
                            game.handle(Some(Command::Restart));
                            game.handle(command);
                        }
                    }
                }
            }
        }

        if let Some(interval) = gravity {
            if last_tick.elapsed() >= interval {
                game.tick();
                last_tick = Instant::now();
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    let gravity = (args.gravity_ms > 0).then(|| Duration::from_millis(args.gravity_ms));

    enable_raw_mode().context("failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout())).context("failed to create terminal")?;

    let result = run(&mut terminal, &mut game, gravity);

    // Restore the terminal before reporting any loop error.
    disable_raw_mode().context("failed to disable raw mode")?;
    stdout().execute(LeaveAlternateScreen).context("failed to leave alternate screen")?;

    result.context("game loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(map_key(KeyCode::Left, false), Input::Game(Some(Command::Left)));
        assert_eq!(map_key(KeyCode::Up, false), Input::Game(Some(Command::Rotate)));
        assert_eq!(map_key(KeyCode::Char('x'), false), Input::Game(None));
        assert_eq!(map_key(KeyCode::Esc, false), Input::Quit);
    }

    #[test]
    fn key_after_game_over_restarts_then_applies() {
        assert_eq!(map_key(KeyCode::Right, true), Input::Restart(Some(Command::Right)));
        assert_eq!(map_key(KeyCode::Char(' '), true), Input::Restart(None));
        assert_eq!(map_key(KeyCode::Char('q'), true), Input::Quit);
    }

    #[test]
    fn game_over_flash_wins() {
        let events = [GameEvent::GameOver, GameEvent::LinesCleared(1)];
        assert_eq!(flash_event(&events), Some(&GameEvent::GameOver));

        let events = [GameEvent::Rotated, GameEvent::LinesCleared(2)];
        assert_eq!(flash_event(&events), Some(&GameEvent::LinesCleared(2)));
        assert_eq!(flash_event(&[]), None);
    }
}
