//! TUI rendering with ratatui
//!
//! Board, keyboard, and status panels for the daily puzzle.

use super::app::{App, MessageStyle};
use crate::core::{WORD_LEN, Word};
use crate::engine::{PuzzleState, Status};
use crate::oracle::WordStore;
use crate::output::formatters::{
    COME_BACK_MESSAGE, congrats_message, exhausted_message, share_text,
};
use crate::storage::StorageProvider;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

const TILE_WIDTH: u16 = 5;
const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Main UI rendering function
///
/// Returns the screen areas of the guess slots, empty when no editable
/// board is shown.
pub fn ui<S: WordStore, P: StorageProvider>(f: &mut Frame, app: &App<S, P>) -> [Rect; WORD_LEN] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(16),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Board
            Constraint::Percentage(40), // Keyboard and messages
        ])
        .split(chunks[1]);

    let view = app.session.view();
    let slots = match (view.error, view.state) {
        _ if app.show_help => {
            render_help(f, main_chunks[0]);
            [Rect::default(); WORD_LEN]
        }
        (Some(error), _) => {
            render_error(f, error, main_chunks[0]);
            [Rect::default(); WORD_LEN]
        }
        (None, Some(state)) if state.status().is_terminal() => {
            render_completed(f, state, main_chunks[0]);
            [Rect::default(); WORD_LEN]
        }
        (None, Some(state)) => render_board(f, state, main_chunks[0]),
        (None, None) => {
            render_loading(f, main_chunks[0]);
            [Rect::default(); WORD_LEN]
        }
    };

    render_side_panel(f, app, view.state, main_chunks[1]);
    render_status(f, view.state, chunks[2]);

    slots
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("FRANTIC FIVE - Find the word between the bounds")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn render_loading(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Loading today's puzzle...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(panel(" Today's Puzzle "));
    f.render_widget(paragraph, area);
}

fn render_error(f: &mut Frame, error: &str, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press r to retry or Esc to quit"),
    ];
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel(" Today's Puzzle ").style(Style::default().fg(Color::Red)));
    f.render_widget(paragraph, area);
}

const RULES: [&str; 7] = [
    "The secret word sits alphabetically between the TOP and BOTTOM words.",
    "Type a five-letter word and press Enter to guess.",
    "A valid guess replaces the bound on its side of the secret.",
    "Letters both bounds share are filled in for you.",
    "Click a typed letter to remove it.",
    "Tab eliminates three letters not in the secret, once per day.",
    "A new secret word arrives every day.",
];

fn render_help(f: &mut Frame, area: Rect) {
    let mut content = vec![Line::from("")];
    for rule in RULES {
        content.push(Line::from(format!("• {rule}")));
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(panel(" How to Play ").style(Style::default().fg(Color::Cyan)));
    f.render_widget(paragraph, area);
}

fn render_completed(f: &mut Frame, state: &PuzzleState, area: Rect) {
    let mut content = vec![Line::from("")];
    if let Some(secret) = state.revealed_secret() {
        content.push(tile_line(&secret, Color::Green));
        content.push(Line::from(""));
        match state.status() {
            Status::Won => {
                content.push(Line::from(Span::styled(
                    congrats_message(&secret, state.attempts()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
                content.push(Line::from(Span::styled(
                    share_text(state.date(), state.attempts()),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Status::Exhausted | Status::InProgress => {
                content.push(Line::from(Span::styled(
                    exhausted_message(&secret, state.attempts()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
            }
        }
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        COME_BACK_MESSAGE,
        Style::default().fg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(match state.status() {
            Status::Won => panel(" Solved ").style(Style::default().fg(Color::Green)),
            _ => panel(" Game Over ").style(Style::default().fg(Color::Red)),
        });
    f.render_widget(paragraph, area);
}

fn tile_line(word: &Word, color: Color) -> Line<'static> {
    let spans: Vec<Span> = word
        .chars()
        .iter()
        .map(|&c| {
            Span::styled(
                format!(" {} ", char::from(c).to_ascii_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}

fn render_board(f: &mut Frame, state: &PuzzleState, area: Rect) -> [Rect; WORD_LEN] {
    let block = panel(" Today's Puzzle ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Top label
            Constraint::Length(TILE_HEIGHT), // Top word
            Constraint::Length(1),           // Spacer
            Constraint::Length(TILE_HEIGHT), // Guess
            Constraint::Length(1),           // Feedback
            Constraint::Length(TILE_HEIGHT), // Bottom word
            Constraint::Length(1),           // Bottom label
            Constraint::Min(0),
        ])
        .split(inner);

    let label = |text: &'static str, updated: bool| {
        let style = if updated {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(text).alignment(Alignment::Center).style(style)
    };
    let bounds = state.bounds_snapshot();

    f.render_widget(label("TOP", bounds.top_word_updated), rows[0]);
    render_word_row(f, &state.top_word(), rows[1]);

    let guess = state.guess();
    let rejected = state.feedback().is_some();
    let slots = tile_areas(rows[3]);
    for (i, &slot) in slots.iter().enumerate() {
        let letter = guess.slots()[i].map_or(' ', |c| char::from(c).to_ascii_uppercase());
        let style = if rejected {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if guess.is_auto_filled(i) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        render_tile(f, letter, style, slot);
    }

    if let Some(message) = state.feedback_message() {
        let feedback = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red));
        f.render_widget(feedback, rows[4]);
    }

    render_word_row(f, &state.bottom_word(), rows[5]);
    f.render_widget(label("BOTTOM", bounds.bottom_word_updated), rows[6]);

    slots
}

/// Centered tile positions for one row
fn tile_areas(area: Rect) -> [Rect; WORD_LEN] {
    let count = WORD_LEN as u16;
    let width = count * TILE_WIDTH + (count - 1) * TILE_GAP;
    let x0 = area.x + area.width.saturating_sub(width) / 2;
    std::array::from_fn(|i| {
        let x = x0 + i as u16 * (TILE_WIDTH + TILE_GAP);
        Rect::new(x, area.y, TILE_WIDTH, TILE_HEIGHT).intersection(area)
    })
}

fn render_word_row(f: &mut Frame, word: &Word, area: Rect) {
    let style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    for (slot, &c) in tile_areas(area).iter().zip(word.chars()) {
        render_tile(f, char::from(c).to_ascii_uppercase(), style, *slot);
    }
}

fn render_tile(f: &mut Frame, letter: char, style: Style, area: Rect) {
    let tile = Paragraph::new(letter.to_string())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(tile, area);
}

fn render_side_panel<S, P>(f: &mut Frame, app: &App<S, P>, state: Option<&PuzzleState>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Keyboard
            Constraint::Min(3),    // Messages
        ])
        .split(area);

    render_keyboard(f, state, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_keyboard(f: &mut Frame, state: Option<&PuzzleState>, area: Rect) {
    let disabled = state.map(PuzzleState::disabled_letters).unwrap_or_default();
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .bytes()
                .map(|c| {
                    let style = if disabled.contains(c) {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    };
                    Span::styled(format!(" {} ", char::from(c).to_ascii_uppercase()), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel(" Keyboard "));
    f.render_widget(keyboard, area);
}

fn render_messages<S, P>(f: &mut Frame, app: &App<S, P>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, state: Option<&PuzzleState>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(17),
            Constraint::Percentage(14),
            Constraint::Percentage(16),
            Constraint::Percentage(53),
        ])
        .split(area);

    let date_text = state.map_or_else(String::new, |s| format!("Date: {}", s.date()));
    f.render_widget(Paragraph::new(date_text).alignment(Alignment::Center), chunks[0]);

    let attempts_text = state.map_or_else(String::new, |s| match s.max_attempts() {
        Some(max) => format!("Attempts: {}/{max}", s.attempts()),
        None => format!("Attempts: {}", s.attempts()),
    });
    f.render_widget(
        Paragraph::new(attempts_text).alignment(Alignment::Center),
        chunks[1],
    );

    let (powerup_text, powerup_color) = match state {
        Some(s) if s.powerup_available() => ("Power-up: ready", Color::Green),
        Some(_) => ("Power-up: used", Color::DarkGray),
        None => ("", Color::DarkGray),
    };
    f.render_widget(
        Paragraph::new(powerup_text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(powerup_color)),
        chunks[2],
    );

    let help_text = match state {
        Some(s) if !s.status().is_terminal() => {
            "Esc: Quit | Enter: Submit | Tab: Power-up | ?: Help"
        }
        Some(_) => "Esc: Quit | ?: Help",
        None => "Esc: Quit | r: Retry | ?: Help",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
