use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    R,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (m, _) if !normal_modifiers.contains(m) => None,
            (_, KeyCode::Char('w' | 'k' | 'W' | 'K') | KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Char('s' | 'j' | 'S' | 'J') | KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Char('a' | 'h' | 'A' | 'H') | KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Char('d' | 'l' | 'D' | 'L') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Char('r' | 'R')) => Some(Command::R),
            (_, KeyCode::Char('q' | 'Q')) => Some(Command::Q),
            _ => None,
        }
    }
}
