use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keypress translated into what it means to the program
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Home,
    End,
    Next,
    Prev,
    P,
    Q,
    R,
    M,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Char('w'), KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Char('k'), KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Left, KeyModifiers::NONE, Some(Command::Left))]
    #[case(KeyCode::Char('l'), KeyModifiers::NONE, Some(Command::Right))]
    #[case(KeyCode::Char('s'), KeyModifiers::NONE, Some(Command::Down))]
    #[case(KeyCode::Esc, KeyModifiers::NONE, Some(Command::Esc))]
    #[case(KeyCode::Char(' '), KeyModifiers::NONE, Some(Command::Space))]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(Command::Quit))]
    #[case(KeyCode::Char('c'), KeyModifiers::NONE, None)]
    #[case(KeyCode::Char('r'), KeyModifiers::NONE, Some(Command::R))]
    #[case(KeyCode::Char('R'), KeyModifiers::SHIFT, None)]
    #[case(KeyCode::BackTab, KeyModifiers::SHIFT, Some(Command::Prev))]
    fn keys(#[case] code: KeyCode, #[case] mods: KeyModifiers, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(KeyEvent::new(code, mods)), cmd);
    }
}
