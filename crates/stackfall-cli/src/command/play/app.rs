use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use stackfall_engine::{Command, GameSession, GameStats, PieceSeed, SessionState, TimerRequest};

use crate::{
    command::play::input::{self, Input},
    tui::{App, Tui},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const IDLE_BINDINGS: &[KeyBinding<'static>] =
    &[(&["Enter", "S"], "Start"), (&["Q", "Esc"], "Quit")];
const ACTIVE_BINDINGS: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Enter"], "Restart"),
    (&["Q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding<'static>] = &[
    (&["P"], "Resume"),
    (&["Enter"], "Restart"),
    (&["Q"], "Quit"),
];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(seed: PieceSeed) -> Self {
        Self {
            session: GameSession::with_seed(seed),
            is_exiting: false,
        }
    }

    pub fn stats(&self) -> &GameStats {
        self.session.stats()
    }

    /// Feeds `command` to the session and forwards any timer change to the loop.
    fn apply(&mut self, tui: &mut Tui, command: Command) {
        self.session.apply(command);
        let interval = match self.session.take_timer_request() {
            Some(TimerRequest::Restart(interval)) => Some(interval),
            Some(TimerRequest::Stop) => None,
            None => return,
        };
        tui.set_tick_interval(interval);
        log::debug!("gravity interval: {:?}", tui.tick_interval());
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        // Gravity starts with the first game.
        tui.set_tick_interval(None);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        match input::input_for_key(&key) {
            Some(Input::Command(command)) => self.apply(tui, command),
            Some(Input::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let bindings = match snapshot.state() {
            SessionState::Idle => IDLE_BINDINGS,
            SessionState::Active => ACTIVE_BINDINGS,
            SessionState::Paused => PAUSED_BINDINGS,
        };

        let session_display = SessionDisplay::new(&snapshot);
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.apply(tui, Command::Tick);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> PlayApp {
        PlayApp::new(PieceSeed::from_bytes([7; 16]))
    }

    #[test]
    fn test_start_arms_gravity_timer() {
        let mut app = app();
        let mut tui = Tui::new();
        app.init(&mut tui);
        assert_eq!(tui.tick_interval(), None);

        app.handle_event(&mut tui, key(KeyCode::Enter));
        assert!(app.session.state().is_active());
        assert_eq!(tui.tick_interval(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut app = app();
        let mut tui = Tui::new();
        app.handle_event(&mut tui, key(KeyCode::Enter));
        let before = app.session.falling_piece().unwrap().position();
        app.update(&mut tui);
        assert_eq!(app.session.falling_piece().unwrap().position(), before.down());
    }

    #[test]
    fn test_quit_and_unbound_keys() {
        let mut app = app();
        let mut tui = Tui::new();
        app.handle_event(&mut tui, key(KeyCode::Char('x')));
        assert!(!app.should_exit());
        assert!(app.session.state().is_idle());

        app.handle_event(&mut tui, key(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_game_over_stops_timer() {
        let mut app = app();
        let mut tui = Tui::new();
        app.handle_event(&mut tui, key(KeyCode::Enter));
        for _ in 0..200 {
            if app.session.state().is_idle() {
                break;
            }
            app.handle_event(&mut tui, key(KeyCode::Char(' ')));
        }
        assert!(app.session.state().is_idle());
        assert_eq!(tui.tick_interval(), None);
        assert!(app.stats().completed_pieces() > 0);
    }
}
