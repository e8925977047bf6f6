use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use stackfall_engine::Command;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Maps a key to its input; unbound keys and key releases map to `None`.
pub fn input_for_key(key: &KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Input::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Enter | KeyCode::Char('s') => Command::Start,
        KeyCode::Char('p') => Command::TogglePause,
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        _ => return None,
    };
    Some(Input::Command(command))
}
