//! TUI application state and logic

use crate::core::WORD_LEN;
use crate::engine::{Event as PuzzleEvent, Outcome};
use crate::oracle::WordStore;
use crate::output::formatters::{COME_BACK_MESSAGE, congrats_message, exhausted_message, tiles};
use crate::session::Session;
use crate::storage::StorageProvider;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for input
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Messages kept on screen
const MAX_MESSAGES: usize = 5;

/// Application state
pub struct App<S, P> {
    pub session: Session<S, P>,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    /// Rules panel shown in place of the board
    pub show_help: bool,
    /// Screen areas of the guess slots from the last draw, for clicks
    pub slot_areas: [Rect; WORD_LEN],
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<S: WordStore, P: StorageProvider> App<S, P> {
    #[must_use]
    pub fn new(session: Session<S, P>) -> Self {
        Self {
            session,
            messages: vec![Message {
                text: "Find the word that sits between the top and bottom words.".to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
            show_help: false,
            slot_areas: [Rect::default(); WORD_LEN],
        }
    }

    /// Load today's puzzle and greet accordingly
    pub fn start(&mut self) {
        self.session.initialize();
        self.announce_load();
    }

    fn announce_load(&mut self) {
        let view = self.session.view();
        if let Some(error) = view.error {
            let text = format!("{error}. Press r to retry.");
            self.add_message(&text, MessageStyle::Error);
        } else if view.state.is_some_and(|s| s.status().is_terminal()) {
            self.add_message("You already finished today's puzzle.", MessageStyle::Info);
            self.add_message(COME_BACK_MESSAGE, MessageStyle::Info);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// How long the event loop may block before the next tick
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.session
            .pending_timer()
            .map_or(IDLE_POLL, |timer| timer.remaining(now).min(IDLE_POLL))
    }

    /// Fire due timers and pick up a new day
    pub fn on_tick(&mut self, now: Instant) {
        self.session.tick(now);
        if self.session.refresh_if_stale() {
            self.add_message("A new day has started. Fresh puzzle loaded!", MessageStyle::Success);
            self.announce_load();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }
        if key.code == KeyCode::Char('?') {
            self.show_help = true;
            return;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        let view = self.session.view();
        if view.is_loading {
            return;
        }
        if view.error.is_some() {
            if matches!(key.code, KeyCode::Char('r' | 'R')) {
                self.session.retry();
                self.announce_load();
            }
            return;
        }
        if view.state.is_none_or(|s| s.status().is_terminal()) {
            return;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                self.session.dispatch(PuzzleEvent::KeyPress(c as u8), now);
            }
            KeyCode::Backspace => {
                self.session.dispatch(PuzzleEvent::Backspace, now);
            }
            KeyCode::Enter => self.submit(now),
            KeyCode::Tab => self.use_powerup(now),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.show_help || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let at = Position::new(mouse.column, mouse.row);
        if let Some(index) = self.slot_areas.iter().position(|area| area.contains(at)) {
            self.session.dispatch(PuzzleEvent::RemoveLetter(index), now);
        }
    }

    fn submit(&mut self, now: Instant) {
        let Some(word) = self.session.state().and_then(|s| s.guess().to_word()) else {
            return;
        };
        let outcome = self.session.dispatch(PuzzleEvent::Submit, now);
        let Some(state) = self.session.state() else {
            return;
        };

        let (text, style) = match outcome {
            Outcome::Rejected(rejection) => (
                format!("{}: {rejection}", word.as_str().to_uppercase()),
                MessageStyle::Error,
            ),
            Outcome::NarrowedTop => (
                format!("{} is the new top word", tiles(&word)),
                MessageStyle::Info,
            ),
            Outcome::NarrowedBottom => (
                format!("{} is the new bottom word", tiles(&word)),
                MessageStyle::Info,
            ),
            Outcome::Won => (
                congrats_message(&word, state.attempts()),
                MessageStyle::Success,
            ),
            Outcome::Exhausted => match state.revealed_secret() {
                Some(secret) => (
                    exhausted_message(&secret, state.attempts()),
                    MessageStyle::Error,
                ),
                None => return,
            },
            Outcome::Ignored | Outcome::Updated => return,
        };
        self.add_message(&text, style);
    }

    fn use_powerup(&mut self, now: Instant) {
        if self.session.dispatch(PuzzleEvent::PowerUp, now) == Outcome::Ignored {
            self.add_message("Power-up already used today", MessageStyle::Error);
            return;
        }
        if let Some(state) = self.session.state() {
            let text = format!(
                "Letters eliminated: {}",
                state.disabled_letters().to_string().to_uppercase()
            );
            self.add_message(&text, MessageStyle::Success);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: WordStore, P: StorageProvider>(app: App<S, P>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B, S, P>(terminal: &mut Terminal<B>, mut app: App<S, P>) -> Result<()>
where
    B: ratatui::backend::Backend,
    S: WordStore,
    P: StorageProvider,
{
    app.start();

    loop {
        let mut slots = app.slot_areas;
        terminal.draw(|f| slots = super::rendering::ui(f, &app))?;
        app.slot_areas = slots;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dictionary;
    use crate::engine::Status;
    use crate::oracle::{DictionaryOracle, FixedClock, LocalWordStore};
    use crate::session::SessionConfig;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    type TestApp = App<LocalWordStore<FixedClock>, MemoryStorage>;

    fn app(dir: &TempDir) -> TestApp {
        let words = Dictionary::from_strs(&["apple", "mango", "peach", "table", "zebra"]);
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let mut store = LocalWordStore::open(dir.path().join("words.json"), clock).with_seed(5);
        store.seed_if_empty(words.words()).unwrap();
        let session = Session::new(
            DictionaryOracle::new(store, words),
            MemoryStorage::new(),
            SessionConfig::default(),
        )
        .with_seed(5);
        let mut app = App::new(session);
        app.start();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(area: Rect) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + area.width / 2,
            row: area.y + area.height / 2,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        a.handle_key(key(KeyCode::Esc), Instant::now());
        assert!(a.should_quit);

        let mut b = app(&dir);
        b.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(b.should_quit);
    }

    #[test]
    fn letters_are_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();

        a.handle_key(key(KeyCode::Char('Z')), now);
        let guess = a.session.state().unwrap().guess();
        assert_eq!(guess.player_filled_count(), 1);
        assert!(guess.slots().contains(&Some(b'z')));

        a.handle_key(key(KeyCode::Backspace), now);
        assert_eq!(a.session.state().unwrap().guess().player_filled_count(), 0);
    }

    #[test]
    fn rejection_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();

        for _ in 0..WORD_LEN {
            a.handle_key(key(KeyCode::Char('z')), now);
        }
        a.handle_key(key(KeyCode::Enter), now);

        let last = a.messages.last().unwrap();
        assert_eq!(last.style, MessageStyle::Error);
        assert!(a.session.state().unwrap().feedback().is_some());
        assert_eq!(a.session.state().unwrap().attempts(), 0);
    }

    #[test]
    fn tab_uses_the_powerup_once() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();

        a.handle_key(key(KeyCode::Tab), now);
        assert!(!a.session.state().unwrap().powerup_available());
        assert_eq!(a.messages.last().unwrap().style, MessageStyle::Success);

        a.handle_key(key(KeyCode::Tab), now);
        assert_eq!(a.messages.last().unwrap().style, MessageStyle::Error);
    }

    #[test]
    fn clicking_a_slot_removes_its_letter() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();
        for (i, area) in a.slot_areas.iter_mut().enumerate() {
            *area = Rect::new(10 + 6 * i as u16, 5, 5, 3);
        }

        a.handle_key(key(KeyCode::Char('q')), now);
        let guess = a.session.state().unwrap().guess();
        let typed = (0..WORD_LEN).find(|&i| !guess.is_auto_filled(i)).unwrap();

        // Clicking outside every slot does nothing
        a.handle_mouse(click(Rect::new(0, 0, 2, 2)), now);
        assert_eq!(a.session.state().unwrap().guess().player_filled_count(), 1);

        a.handle_mouse(click(a.slot_areas[typed]), now);
        assert_eq!(a.session.state().unwrap().guess().player_filled_count(), 0);
    }

    #[test]
    fn help_toggles_without_touching_the_guess() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();

        a.handle_key(key(KeyCode::Char('?')), now);
        assert!(a.show_help);

        // Keys are swallowed while the rules are open
        a.handle_key(key(KeyCode::Char('q')), now);
        a.handle_key(key(KeyCode::Tab), now);
        let state = a.session.state().unwrap();
        assert_eq!(state.guess().player_filled_count(), 0);
        assert!(state.powerup_available());

        // Esc closes the panel before it quits
        a.handle_key(key(KeyCode::Esc), now);
        assert!(!a.show_help);
        assert!(!a.should_quit);

        a.handle_key(key(KeyCode::Char('?')), now);
        a.handle_key(key(KeyCode::Char('?')), now);
        assert!(!a.show_help);
    }

    #[test]
    fn messages_are_capped() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        for i in 0..10 {
            a.add_message(&format!("message {i}"), MessageStyle::Info);
        }
        assert_eq!(a.messages.len(), MAX_MESSAGES);
        assert_eq!(a.messages.last().unwrap().text, "message 9");
    }

    #[test]
    fn input_is_ignored_after_winning() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();

        // Play the middle of the range until the puzzle is solved
        while a.session.state().unwrap().status() == Status::InProgress {
            let state = a.session.state().unwrap();
            let range = state
                .dictionary()
                .between(&state.top_word(), &state.bottom_word())
                .to_vec();
            let guess = range[range.len() / 2];
            for (i, &letter) in guess.chars().iter().enumerate() {
                if !a.session.state().unwrap().guess().is_auto_filled(i) {
                    a.handle_key(key(KeyCode::Char(char::from(letter))), now);
                }
            }
            a.handle_key(key(KeyCode::Enter), now);
        }

        assert_eq!(a.session.state().unwrap().status(), Status::Won);
        assert_eq!(a.messages.last().unwrap().style, MessageStyle::Success);

        a.handle_key(key(KeyCode::Char('a')), now);
        a.handle_key(key(KeyCode::Tab), now);
        assert_eq!(a.session.state().unwrap().status(), Status::Won);
    }

    #[test]
    fn poll_timeout_tracks_the_feedback_timer() {
        let dir = TempDir::new().unwrap();
        let mut a = app(&dir);
        let now = Instant::now();
        assert_eq!(a.poll_timeout(now), IDLE_POLL);

        for _ in 0..WORD_LEN {
            a.handle_key(key(KeyCode::Char('z')), now);
        }
        a.handle_key(key(KeyCode::Enter), now);
        let later = now + Duration::from_millis(1400);
        assert_eq!(a.poll_timeout(later), Duration::from_millis(100));

        a.on_tick(now + Duration::from_secs(2));
        assert!(a.session.state().unwrap().feedback().is_none());
    }
}
